//! 拓扑数据源模块
//!
//! 发现层查询接口、基于 JSON 快照的静态实现，以及 fat-tree 快照生成。

pub mod fat_tree;
mod snapshot;
mod source;

pub use snapshot::{StaticTopology, TopologySnapshot};
pub use source::{TopologyError, TopologySource};
