//! 网络拓扑模型
//!
//! 此模块包含交换机、端口、链路等基础类型，以及由链路构建的有向多重图。

// 子模块声明
mod graph;
mod id;
mod link;
mod switch;

// 重新导出公共接口
pub use graph::{GraphEdge, TopologyGraph};
pub use id::{DPID_LEN, EdgeId, IdParseError, NodeIdx, PORT_NO_LEN, PortNo, SwitchId};
pub use link::{Link, NodePortTuple, Port};
pub use switch::Switch;
