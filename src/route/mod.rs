//! 路由解析模块
//!
//! 最短跳数搜索、平行链路选择策略，以及把交换机路径展开为端口跳序列的解析器。

mod bfs;
mod resolver;
mod select;

pub use bfs::shortest_path;
pub use resolver::{Resolver, Route, resolve};
pub use select::{
    EdgeSelection, EdgeSelector, FlowHashSelector, HopContext, LowestPortSelector,
    RandomSelector, SeededRandomSelector,
};
