use std::collections::HashSet;

use crate::net::{NodePortTuple, PortNo, TopologyGraph};
use crate::route::{FlowHashSelector, LowestPortSelector, RandomSelector, resolve};
use crate::topo::TopologyError;
use crate::topo::fat_tree::{FatTreeOpts, FatTreeTopology, build_fat_tree};

fn host(topo: &FatTreeTopology, pod: usize, edge: usize, h: usize) -> NodePortTuple {
    topo.host(pod, edge, h).expect("host in range")
}

#[test]
fn fat_tree_counts_and_indexing() {
    let opts = FatTreeOpts::default();
    let topo = build_fat_tree(&opts).expect("k=4 fat-tree");

    let half = opts.k / 2;
    assert_eq!(topo.edge_switches.len(), opts.k * half);
    assert_eq!(topo.agg_switches.len(), opts.k * half);
    assert_eq!(topo.core_switches.len(), half * half);
    assert_eq!(topo.snapshot.switches.len(), 20);
    // 每个 pod 4 条 edge-agg，全网 16 条 agg-core，每条双向
    assert_eq!(topo.snapshot.links.len(), 64);

    let mut dpids = HashSet::new();
    for s in &topo.snapshot.switches {
        assert!(dpids.insert(s.dpid), "duplicate dpid {}", s.dpid);
    }

    // dpid 顺序：core 1..=4，之后每个 pod 先 edge 后 agg
    assert_eq!(topo.core(0, 0).map(|id| id.0), Some(opts.first_dpid));
    assert_eq!(topo.core(1, 1).map(|id| id.0), Some(4));
    assert_eq!(topo.edge(0, 0).map(|id| id.0), Some(5));
    assert_eq!(topo.agg(0, 0).map(|id| id.0), Some(7));
    assert_eq!(topo.agg(3, 1).map(|id| id.0), Some(20));

    let h = host(&topo, 1, 1, 1);
    assert_eq!(Some(h.switch), topo.edge(1, 1));
    assert_eq!(h.port, PortNo(2));

    // 主机端口不出现在任何链路上
    for l in &topo.snapshot.links {
        if topo.edge_switches.contains(&l.src.dpid) {
            assert!(l.src.port_no.0 as usize > half);
        }
    }
}

#[test]
fn agg_switches_link_to_their_core_group() {
    let topo = build_fat_tree(&FatTreeOpts::default()).expect("fat-tree");
    let graph = TopologyGraph::build(&topo.snapshot.links);

    for pod in 0..topo.k {
        for j in 0..topo.k / 2 {
            let agg = topo.agg(pod, j).expect("agg");
            for group in 0..topo.k / 2 {
                for index in 0..topo.k / 2 {
                    let core = topo.core(group, index).expect("core");
                    let linked = !graph.parallel_edges(agg, core).is_empty();
                    assert_eq!(linked, group == j, "agg({pod},{j}) -> core({group},{index})");
                }
            }
        }
    }
}

#[test]
fn index_helpers_reject_out_of_range() {
    let topo = build_fat_tree(&FatTreeOpts::default()).expect("fat-tree");
    assert_eq!(topo.host(0, 0, 2), None);
    assert_eq!(topo.host(4, 0, 0), None);
    assert_eq!(topo.host(usize::MAX, 0, 0), None);
    assert_eq!(topo.edge(0, 2), None);
    assert_eq!(topo.agg(4, 0), None);
    assert_eq!(topo.core(2, 0), None);
    assert_eq!(topo.core(0, usize::MAX), None);
}

#[test]
fn fat_tree_route_lengths_follow_locality() {
    let topo = build_fat_tree(&FatTreeOpts::default()).expect("fat-tree");
    let graph = TopologyGraph::build(&topo.snapshot.links);

    let src = host(&topo, 0, 0, 0);
    let same_edge = resolve(&graph, src, host(&topo, 0, 0, 1), &LowestPortSelector);
    assert_eq!(same_edge.link_count(), 0);
    assert_eq!(same_edge.len(), 2);

    let same_pod = resolve(&graph, src, host(&topo, 0, 1, 0), &LowestPortSelector);
    assert_eq!(same_pod.link_count(), 2);
    assert_eq!(same_pod.len(), 6);

    let dst = host(&topo, 3, 1, 1);
    let cross_pod = resolve(&graph, src, dst, &LowestPortSelector);
    assert_eq!(cross_pod.link_count(), 4);
    assert_eq!(cross_pod.len(), 10);
    assert_eq!(cross_pod.as_slice()[0], src);
    assert_eq!(cross_pod.as_slice()[9], dst);
}

#[test]
fn parallel_fabric_links_are_all_used_by_random_selection() {
    let opts = FatTreeOpts {
        parallel_links: 2,
        ..FatTreeOpts::default()
    };
    let topo = build_fat_tree(&opts).expect("fat-tree");
    assert_eq!(topo.snapshot.links.len(), 128);

    let graph = TopologyGraph::build(&topo.snapshot.links);
    let src = host(&topo, 0, 0, 0);
    let dst = host(&topo, 0, 1, 0);

    let mut first_egress = HashSet::new();
    for _ in 0..300 {
        let route = resolve(&graph, src, dst, &RandomSelector);
        assert_eq!(route.link_count(), 2);
        first_egress.insert(route.hops()[0].port);
    }
    assert_eq!(first_egress.len(), 2, "both parallel uplinks should be picked");

    let selector = FlowHashSelector::new(9);
    let pinned = resolve(&graph, src, dst, &selector);
    for _ in 0..50 {
        assert_eq!(resolve(&graph, src, dst, &selector), pinned);
    }
}

#[test]
fn invalid_fat_tree_parameters_are_rejected() {
    for (k, parallel_links) in [(3, 1), (0, 1), (4, 0)] {
        let opts = FatTreeOpts {
            k,
            parallel_links,
            ..FatTreeOpts::default()
        };
        let err = build_fat_tree(&opts).expect_err("invalid parameters");
        assert!(matches!(err, TopologyError::InvalidFatTree { .. }));
    }
}

#[test]
fn dpid_overflow_is_rejected() {
    // k=4 需要 20 个 dpid，从 u64::MAX - 2 开始放不下
    let opts = FatTreeOpts {
        first_dpid: u64::MAX - 2,
        ..FatTreeOpts::default()
    };
    let err = build_fat_tree(&opts).expect_err("dpid overflow");
    assert!(
        matches!(err, TopologyError::InvalidFatTree { reason, .. } if reason.contains("dpid")),
        "{err}"
    );

    // 恰好用到 u64::MAX
    let opts = FatTreeOpts {
        first_dpid: u64::MAX - 19,
        ..FatTreeOpts::default()
    };
    let topo = build_fat_tree(&opts).expect("fits exactly");
    assert_eq!(topo.agg(3, 1).map(|id| id.0), Some(u64::MAX));
}
