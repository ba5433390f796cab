//! 端口与链路类型
//!
//! 定义发现层上报的交换机端口、单向链路，以及路由结果中使用的
//! (交换机, 端口) 二元组。

use std::fmt;

use serde::{Deserialize, Serialize};

use super::id::{PortNo, SwitchId};

/// (交换机, 端口) 二元组，既是路由查询的端点，也是路由结果的单位。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodePortTuple {
    pub switch: SwitchId,
    pub port: PortNo,
}

impl NodePortTuple {
    pub fn new(switch: SwitchId, port: PortNo) -> Self {
        Self { switch, port }
    }
}

impl fmt::Display for NodePortTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.switch, self.port)
    }
}

/// 交换机端口
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Port {
    pub dpid: SwitchId,
    pub port_no: PortNo,
    #[serde(default)]
    pub hw_addr: String,
    #[serde(default)]
    pub name: String,
}

impl Port {
    /// 创建一个没有 MAC 地址和名称的端口
    pub fn new(dpid: SwitchId, port_no: PortNo) -> Self {
        Self {
            dpid,
            port_no,
            hw_addr: String::new(),
            name: String::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_hw_addr(mut self, hw_addr: impl Into<String>) -> Self {
        self.hw_addr = hw_addr.into();
        self
    }

    pub fn endpoint(&self) -> NodePortTuple {
        NodePortTuple::new(self.dpid, self.port_no)
    }
}

/// 单向链路：从一个交换机端口到另一个交换机端口。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub src: Port,
    pub dst: Port,
}

impl Link {
    /// 创建新链路
    pub fn new(src: Port, dst: Port) -> Self {
        Self { src, dst }
    }

    /// 只按 (交换机, 端口) 描述两端的链路
    pub fn between(src: NodePortTuple, dst: NodePortTuple) -> Self {
        Self {
            src: Port::new(src.switch, src.port),
            dst: Port::new(dst.switch, dst.port),
        }
    }
}
