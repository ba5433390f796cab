//! 路由解析
//!
//! 把交换机级别的最短路径展开成端口级别的跳序列：
//!
//! ```text
//! [src] ++ [(a, 出端口), (b, 入端口)] * 每条经过的链路 ++ [dst]
//! ```
//!
//! 空序列表示不可达。

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::bfs::shortest_path;
use super::select::{EdgeSelection, EdgeSelector, HopContext};
use crate::net::{NodePortTuple, TopologyGraph};
use crate::topo::{TopologyError, TopologySource};

/// 端口级路由
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route(Vec<NodePortTuple>);

impl Route {
    /// 不可达
    pub fn unreachable() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[NodePortTuple] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<NodePortTuple> {
        self.0
    }

    /// 两个端点之间的 (出端口, 入端口) 条目
    pub fn hops(&self) -> &[NodePortTuple] {
        if self.0.len() < 2 {
            return &[];
        }
        &self.0[1..self.0.len() - 1]
    }

    /// 经过的链路数
    pub fn link_count(&self) -> usize {
        self.hops().len() / 2
    }
}

/// 在给定拓扑图上解析 `src` 到 `dst` 的路由。
#[tracing::instrument(skip_all, fields(src = %src, dst = %dst))]
pub fn resolve(
    graph: &TopologyGraph,
    src: NodePortTuple,
    dst: NodePortTuple,
    selector: &dyn EdgeSelector,
) -> Route {
    let Some(path) = shortest_path(graph, src.switch, dst.switch) else {
        debug!("没有可达路径");
        return Route::unreachable();
    };
    trace!(?path, "交换机级最短路径");

    let mut hops = Vec::with_capacity(2 * path.len());
    hops.push(src);
    for pair in path.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let cands = graph.parallel_edges(from, to);
        if cands.is_empty() {
            // BFS 路径上相邻交换机之间必有边
            return Route::unreachable();
        }
        let hop = HopContext { src, dst, from, to };
        let edge = cands[selector.select(&hop, &cands) % cands.len()];
        trace!(
            from = %from,
            to = %to,
            parallel = cands.len(),
            src_port = %edge.src_port,
            dst_port = %edge.dst_port,
            "选择链路"
        );
        hops.push(NodePortTuple::new(from, edge.src_port));
        hops.push(NodePortTuple::new(to, edge.dst_port));
    }
    hops.push(dst);

    Route(hops)
}

/// 路由解析器：持有发现层数据源和平行边选择策略。
///
/// 每次查询都从数据源取完整链路集合并重建拓扑图，不跨请求缓存。
#[derive(Debug)]
pub struct Resolver<S> {
    source: S,
    selector: Box<dyn EdgeSelector>,
}

impl<S: TopologySource> Resolver<S> {
    pub fn new(source: S, selector: Box<dyn EdgeSelector>) -> Self {
        Self { source, selector }
    }

    pub fn with_selection(source: S, selection: EdgeSelection) -> Self {
        Self::new(source, selection.build())
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// 查询 `src` 到 `dst` 的路由。数据源失败时直接返回错误，不做部分解析。
    #[tracing::instrument(skip_all, fields(src = %src, dst = %dst))]
    pub fn route(&self, src: NodePortTuple, dst: NodePortTuple) -> Result<Route, TopologyError> {
        let links = self.source.get_links(None)?;
        let graph = TopologyGraph::build(&links);
        let route = resolve(&graph, src, dst, self.selector.as_ref());
        info!(entries = route.len(), links = route.link_count(), "路由解析完成");
        Ok(route)
    }
}
