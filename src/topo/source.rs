//! 拓扑数据源
//!
//! 发现层（LLDP、交换机连接管理）不在本 crate 内实现，这里只定义它
//! 需要提供的两个只读查询。数据源在构造时注入解析器，不使用全局状态。

use std::path::PathBuf;

use thiserror::Error;

use crate::net::{Link, Switch, SwitchId};

/// 数据源错误
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("failed to read topology snapshot {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid topology snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
    #[error("invalid fat-tree (k={k}, parallel_links={parallel_links}): {reason}")]
    InvalidFatTree {
        k: usize,
        parallel_links: usize,
        reason: &'static str,
    },
    #[error("topology source unavailable: {0}")]
    Unavailable(String),
}

/// 发现层查询接口
pub trait TopologySource: Send + Sync {
    /// 全部交换机；`filter` 非空时只返回该 dpid 的交换机（不存在则为空）。
    fn get_switches(&self, filter: Option<SwitchId>) -> Result<Vec<Switch>, TopologyError>;

    /// 全部链路；`filter` 非空时只返回源端在该交换机上的链路。
    fn get_links(&self, filter: Option<SwitchId>) -> Result<Vec<Link>, TopologyError>;
}
