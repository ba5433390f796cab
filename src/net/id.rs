//! 标识符类型
//!
//! 定义交换机（datapath）、端口以及图内节点/边的标识符。
//!
//! `SwitchId` 与 `PortNo` 在所有 JSON/路径中都使用固定宽度的小写十六进制
//! 规范形式：dpid 为 16 位，端口号为 8 位。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// dpid 规范字符串长度
pub const DPID_LEN: usize = 16;

/// 端口号规范字符串长度
pub const PORT_NO_LEN: usize = 8;

/// 标识符解析错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    #[error("invalid dpid {0:?}: expected 16 lowercase hex digits")]
    Dpid(String),
    #[error("invalid port number {0:?}: expected 8 lowercase hex digits")]
    PortNo(String),
}

fn is_lower_hex(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// 交换机标识符（64-bit datapath id）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SwitchId(pub u64);

impl fmt::Display for SwitchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for SwitchId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_lower_hex(s, DPID_LEN) {
            return Err(IdParseError::Dpid(s.to_string()));
        }
        u64::from_str_radix(s, 16)
            .map(SwitchId)
            .map_err(|_| IdParseError::Dpid(s.to_string()))
    }
}

impl TryFrom<String> for SwitchId {
    type Error = IdParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SwitchId> for String {
    fn from(id: SwitchId) -> Self {
        id.to_string()
    }
}

/// 端口号
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PortNo(pub u32);

impl fmt::Display for PortNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

impl FromStr for PortNo {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_lower_hex(s, PORT_NO_LEN) {
            return Err(IdParseError::PortNo(s.to_string()));
        }
        u32::from_str_radix(s, 16)
            .map(PortNo)
            .map_err(|_| IdParseError::PortNo(s.to_string()))
    }
}

impl TryFrom<String> for PortNo {
    type Error = IdParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PortNo> for String {
    fn from(port: PortNo) -> Self {
        port.to_string()
    }
}

/// 图内节点下标（按交换机首次出现的顺序分配）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIdx(pub usize);

/// 图内边标识符（与输入链路一一对应）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(pub usize);
