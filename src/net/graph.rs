//! 拓扑多重图
//!
//! 把一组扁平的单向链路转换为以交换机为节点的有向多重图。
//! 同一对交换机之间的多条链路保留为独立的平行边，每条边各自携带
//! 出端口/入端口。

use std::collections::HashMap;

use super::id::{EdgeId, NodeIdx, PortNo, SwitchId};
use super::link::Link;
use tracing::{debug, trace};

/// 多重图中的一条有向边
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GraphEdge {
    pub from: SwitchId,
    pub to: SwitchId,
    /// `from` 上的出端口
    pub src_port: PortNo,
    /// `to` 上的入端口
    pub dst_port: PortNo,
}

/// 交换机拓扑（有向多重图）
///
/// 节点与边都按插入顺序编号，BFS 按此顺序探索出边。
#[derive(Debug, Default, Clone)]
pub struct TopologyGraph {
    nodes: Vec<SwitchId>,
    index: HashMap<SwitchId, NodeIdx>,
    edges: Vec<GraphEdge>,
    /// `adj[from]` 为从 `from` 出发的所有出边终点（每条边一项）
    adj: Vec<Vec<NodeIdx>>,
    /// (from, to) -> 平行边集合
    parallel: HashMap<(NodeIdx, NodeIdx), Vec<EdgeId>>,
}

impl TopologyGraph {
    /// 由链路集合构建拓扑图，每条链路恰好对应一条边。
    #[tracing::instrument(skip_all, fields(links = links.len()))]
    pub fn build(links: &[Link]) -> Self {
        let mut graph = Self::default();
        for link in links {
            trace!(src = %link.src.endpoint(), dst = %link.dst.endpoint(), "添加链路");
            graph.connect(link.src.dpid, link.src.port_no, link.dst.dpid, link.dst.port_no);
        }
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "拓扑图构建完成"
        );
        graph
    }

    /// 添加交换机节点（已存在时返回原下标）
    pub fn add_switch(&mut self, id: SwitchId) -> NodeIdx {
        if let Some(&idx) = self.index.get(&id) {
            return idx;
        }
        let idx = NodeIdx(self.nodes.len());
        self.nodes.push(id);
        self.adj.push(Vec::new());
        self.index.insert(id, idx);
        idx
    }

    /// 添加一条单向边（不与已有平行边合并）
    pub fn connect(
        &mut self,
        from: SwitchId,
        src_port: PortNo,
        to: SwitchId,
        dst_port: PortNo,
    ) -> EdgeId {
        let a = self.add_switch(from);
        let b = self.add_switch(to);
        let id = EdgeId(self.edges.len());
        self.edges.push(GraphEdge {
            from,
            to,
            src_port,
            dst_port,
        });
        self.adj[a.0].push(b);
        self.parallel.entry((a, b)).or_default().push(id);
        id
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains(&self, id: SwitchId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn switches(&self) -> &[SwitchId] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn edge(&self, id: EdgeId) -> &GraphEdge {
        &self.edges[id.0]
    }

    /// 获取 from -> to 的全部平行边（按插入顺序）
    pub fn parallel_edges(&self, from: SwitchId, to: SwitchId) -> Vec<&GraphEdge> {
        let (Some(&a), Some(&b)) = (self.index.get(&from), self.index.get(&to)) else {
            return Vec::new();
        };
        self.parallel
            .get(&(a, b))
            .map(|ids| ids.iter().map(|id| &self.edges[id.0]).collect())
            .unwrap_or_default()
    }

    pub(crate) fn node_index(&self, id: SwitchId) -> Option<NodeIdx> {
        self.index.get(&id).copied()
    }

    pub(crate) fn switch_at(&self, idx: NodeIdx) -> SwitchId {
        self.nodes[idx.0]
    }

    /// 按出边插入顺序遍历邻居（平行边会重复出现）
    pub(crate) fn neighbors(&self, idx: NodeIdx) -> impl Iterator<Item = NodeIdx> + '_ {
        self.adj[idx.0].iter().copied()
    }

    /// 边的多重集合（排序后），用于比较两次构建的结果
    pub fn edge_multiset(&self) -> Vec<GraphEdge> {
        let mut edges = self.edges.clone();
        edges.sort();
        edges
    }
}
