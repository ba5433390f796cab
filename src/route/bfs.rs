//! 最短跳数路径搜索
//!
//! 在有向多重图上做无权 BFS。出边按插入顺序探索，因此同一张图上
//! 等长路径之间的选择是稳定的。

use std::collections::VecDeque;

use crate::net::{NodeIdx, SwitchId, TopologyGraph};

/// 计算 `src` 到 `dst` 的最短跳数路径（交换机序列，含两端）。
///
/// 任一端点不在图中，或不存在有向路径时返回 `None`。
/// `src == dst` 且该交换机在图中时返回单节点路径。
pub fn shortest_path(graph: &TopologyGraph, src: SwitchId, dst: SwitchId) -> Option<Vec<SwitchId>> {
    let s = graph.node_index(src)?;
    let d = graph.node_index(dst)?;
    if s == d {
        return Some(vec![src]);
    }

    let n = graph.node_count();
    let mut prev: Vec<Option<NodeIdx>> = vec![None; n];
    let mut seen = vec![false; n];
    let mut q: VecDeque<NodeIdx> = VecDeque::new();

    seen[s.0] = true;
    q.push_back(s);

    'search: while let Some(v) = q.pop_front() {
        for next in graph.neighbors(v) {
            if seen[next.0] {
                continue;
            }
            seen[next.0] = true;
            prev[next.0] = Some(v);
            if next == d {
                break 'search;
            }
            q.push_back(next);
        }
    }

    if !seen[d.0] {
        return None; // unreachable
    }

    let mut path = vec![dst];
    let mut cur = d;
    while let Some(p) = prev[cur.0] {
        path.push(graph.switch_at(p));
        cur = p;
    }
    path.reverse();
    Some(path)
}
