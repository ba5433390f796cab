//! Fat-tree 交换网络快照生成
//!
//! 生成 k-ary fat-tree 的交换机层（core / aggregation / edge），
//! 交换机之间用双向链路（两条单向 Link）连接。edge 交换机的前 k/2 个
//! 端口留给主机，不产生链路，可直接作为路由查询的端点。

use crate::net::{Link, NodePortTuple, Port, PortNo, Switch, SwitchId};

use super::snapshot::TopologySnapshot;
use super::source::TopologyError;

#[derive(Debug, Clone)]
pub struct FatTreeOpts {
    pub k: usize,
    /// 第一台交换机的 dpid，之后顺序递增
    pub first_dpid: u64,
    /// 每对相邻交换机之间的平行链路数
    pub parallel_links: usize,
}

impl Default for FatTreeOpts {
    fn default() -> Self {
        Self {
            k: 4,
            first_dpid: 1,
            parallel_links: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FatTreeTopology {
    pub k: usize,
    pub edge_switches: Vec<SwitchId>,
    pub agg_switches: Vec<SwitchId>,
    pub core_switches: Vec<SwitchId>,
    pub snapshot: TopologySnapshot,
}

impl FatTreeTopology {
    fn half(&self) -> usize {
        self.k / 2
    }

    /// `group * k/2 + index`，两个下标都必须小于 k/2
    fn slot(&self, group: usize, index: usize) -> Option<usize> {
        let half = self.half();
        if index >= half {
            return None;
        }
        group.checked_mul(half)?.checked_add(index)
    }

    /// 主机接入点：edge 交换机上的第 `host` 个主机端口（端口号 `host + 1`）
    pub fn host(&self, pod: usize, edge: usize, host: usize) -> Option<NodePortTuple> {
        if host >= self.half() {
            return None;
        }
        let port = u32::try_from(host).ok()?.checked_add(1)?;
        Some(NodePortTuple::new(self.edge(pod, edge)?, PortNo(port)))
    }

    pub fn edge(&self, pod: usize, edge: usize) -> Option<SwitchId> {
        self.edge_switches.get(self.slot(pod, edge)?).copied()
    }

    pub fn agg(&self, pod: usize, agg: usize) -> Option<SwitchId> {
        self.agg_switches.get(self.slot(pod, agg)?).copied()
    }

    pub fn core(&self, group: usize, index: usize) -> Option<SwitchId> {
        self.core_switches.get(self.slot(group, index)?).copied()
    }
}

/// 逐台分配 dpid 与端口号
struct FabricBuilder {
    k: usize,
    first_dpid: u64,
    parallel_links: usize,
    switches: Vec<Switch>,
    links: Vec<Link>,
}

impl FabricBuilder {
    fn invalid(&self, reason: &'static str) -> TopologyError {
        TopologyError::InvalidFatTree {
            k: self.k,
            parallel_links: self.parallel_links,
            reason,
        }
    }

    /// 返回新交换机在 `switches` 中的下标
    fn add_switch(&mut self) -> Result<usize, TopologyError> {
        let idx = self.switches.len();
        let dpid = u64::try_from(idx)
            .ok()
            .and_then(|offset| self.first_dpid.checked_add(offset))
            .ok_or_else(|| self.invalid("dpids overflow u64"))?;
        self.switches.push(Switch::new(SwitchId(dpid)));
        Ok(idx)
    }

    fn id(&self, idx: usize) -> SwitchId {
        self.switches[idx].dpid
    }

    fn add_port(&mut self, idx: usize) -> Result<Port, TopologyError> {
        let port_no = u32::try_from(self.switches[idx].ports.len())
            .ok()
            .and_then(|n| n.checked_add(1))
            .map(PortNo)
            .ok_or_else(|| self.invalid("port numbers overflow u32"))?;
        let sw = &mut self.switches[idx];
        let name = format!("s{}-eth{}", sw.dpid.0, port_no.0);
        Ok(sw.add_port(port_no, name).clone())
    }

    /// 双向连接两台交换机（每条平行链路占用两端各一个新端口）
    fn connect(&mut self, a: usize, b: usize) -> Result<(), TopologyError> {
        for _ in 0..self.parallel_links {
            let port_a = self.add_port(a)?;
            let port_b = self.add_port(b)?;
            self.links.push(Link::new(port_a.clone(), port_b.clone()));
            self.links.push(Link::new(port_b, port_a));
        }
        Ok(())
    }
}

pub fn build_fat_tree(opts: &FatTreeOpts) -> Result<FatTreeTopology, TopologyError> {
    let k = opts.k;
    let mut fabric = FabricBuilder {
        k,
        first_dpid: opts.first_dpid,
        parallel_links: opts.parallel_links,
        switches: Vec::new(),
        links: Vec::new(),
    };
    if k < 2 || k % 2 != 0 {
        return Err(fabric.invalid("k must be even and >= 2"));
    }
    if opts.parallel_links == 0 {
        return Err(fabric.invalid("parallel_links must be >= 1"));
    }

    let half = k / 2;
    let core_count = half
        .checked_mul(half)
        .ok_or_else(|| fabric.invalid("switch count overflows usize"))?;

    let mut core = Vec::new();
    for _ in 0..core_count {
        core.push(fabric.add_switch()?);
    }

    let mut pod_edges: Vec<Vec<usize>> = Vec::new();
    let mut pod_aggs: Vec<Vec<usize>> = Vec::new();
    for _pod in 0..k {
        let mut edges = Vec::new();
        for _ in 0..half {
            let edge = fabric.add_switch()?;
            // 主机端口：1..=half
            for _ in 0..half {
                fabric.add_port(edge)?;
            }
            edges.push(edge);
        }
        let mut aggs = Vec::new();
        for _ in 0..half {
            aggs.push(fabric.add_switch()?);
        }
        pod_edges.push(edges);
        pod_aggs.push(aggs);
    }

    for (edges, aggs) in pod_edges.iter().zip(&pod_aggs) {
        for &edge in edges {
            for &agg in aggs {
                fabric.connect(edge, agg)?;
            }
        }
    }

    for aggs in &pod_aggs {
        for (j, &agg) in aggs.iter().enumerate() {
            for &c in &core[j * half..(j + 1) * half] {
                fabric.connect(agg, c)?;
            }
        }
    }

    let ids = |groups: &[Vec<usize>]| -> Vec<SwitchId> {
        groups.iter().flatten().map(|&idx| fabric.id(idx)).collect()
    };
    let edge_switches = ids(&pod_edges);
    let agg_switches = ids(&pod_aggs);
    let core_switches = core.iter().map(|&idx| fabric.id(idx)).collect();

    Ok(FatTreeTopology {
        k,
        edge_switches,
        agg_switches,
        core_switches,
        snapshot: TopologySnapshot {
            switches: fabric.switches,
            links: fabric.links,
        },
    })
}
