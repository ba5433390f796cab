//! 平行链路选择策略
//!
//! 路径上相邻两台交换机之间可能存在多条平行链路，路由展开时需要从中
//! 选一条。选哪一条不影响正确性，这里把它做成可插拔的策略：
//!
//! - `random`：均匀随机（默认）
//! - `seeded_random`：带种子的均匀随机，便于复现
//! - `lowest_port`：确定性地取端口号最小的一条
//! - `flow_hash`：按端点做稳定哈希，同一对端点总是落在同一条链路上

use std::fmt;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::net::{GraphEdge, NodePortTuple, SwitchId};

/// 一次选择的上下文：整条路由的端点以及当前这一跳的两台交换机。
#[derive(Debug, Clone, Copy)]
pub struct HopContext {
    pub src: NodePortTuple,
    pub dst: NodePortTuple,
    pub from: SwitchId,
    pub to: SwitchId,
}

/// 平行边选择器
pub trait EdgeSelector: Send + Sync + fmt::Debug {
    /// 返回 `candidates` 中被选中边的下标。`candidates` 非空。
    fn select(&self, hop: &HopContext, candidates: &[&GraphEdge]) -> usize;
}

/// 选择策略配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EdgeSelection {
    #[default]
    Random,
    SeededRandom {
        seed: u64,
    },
    LowestPort,
    FlowHash {
        #[serde(default)]
        salt: u64,
    },
}

impl EdgeSelection {
    pub fn build(self) -> Box<dyn EdgeSelector> {
        match self {
            EdgeSelection::Random => Box::new(RandomSelector),
            EdgeSelection::SeededRandom { seed } => Box::new(SeededRandomSelector::new(seed)),
            EdgeSelection::LowestPort => Box::new(LowestPortSelector),
            EdgeSelection::FlowHash { salt } => Box::new(FlowHashSelector::new(salt)),
        }
    }
}

/// 均匀随机（线程本地 RNG）
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSelector;

impl EdgeSelector for RandomSelector {
    fn select(&self, _hop: &HopContext, candidates: &[&GraphEdge]) -> usize {
        if candidates.len() <= 1 {
            return 0;
        }
        rand::thread_rng().gen_range(0..candidates.len())
    }
}

/// 带种子的均匀随机
#[derive(Debug)]
pub struct SeededRandomSelector {
    rng: Mutex<StdRng>,
}

impl SeededRandomSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl EdgeSelector for SeededRandomSelector {
    fn select(&self, _hop: &HopContext, candidates: &[&GraphEdge]) -> usize {
        if candidates.len() <= 1 {
            return 0;
        }
        // RNG 状态在 panic 后仍然可用
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(0..candidates.len())
    }
}

/// 取 (出端口, 入端口) 最小的平行边
#[derive(Debug, Default, Clone, Copy)]
pub struct LowestPortSelector;

impl EdgeSelector for LowestPortSelector {
    fn select(&self, _hop: &HopContext, candidates: &[&GraphEdge]) -> usize {
        candidates
            .iter()
            .enumerate()
            .min_by_key(|(_, e)| (e.src_port, e.dst_port))
            .map(|(idx, _)| idx)
            .unwrap_or(0)
    }
}

/// 基于路由端点的稳定哈希选择（ECMP 风格）
#[derive(Debug, Default, Clone, Copy)]
pub struct FlowHashSelector {
    salt: u64,
}

impl FlowHashSelector {
    pub fn new(salt: u64) -> Self {
        Self { salt }
    }

    fn key(&self, hop: &HopContext) -> u64 {
        let src = mix64(hop.src.switch.0 ^ (u64::from(hop.src.port.0) << 32));
        let dst = mix64(hop.dst.switch.0 ^ (u64::from(hop.dst.port.0) << 32));
        src ^ dst.rotate_left(17)
            ^ hop.from.0.wrapping_mul(0x9E3779B97F4A7C15)
            ^ hop.to.0
            ^ self.salt
    }
}

impl EdgeSelector for FlowHashSelector {
    fn select(&self, hop: &HopContext, candidates: &[&GraphEdge]) -> usize {
        if candidates.len() <= 1 {
            return 0;
        }
        (mix64(self.key(hop)) as usize) % candidates.len()
    }
}

/// 一个简单、确定性的 64-bit mixing（splitmix64）。
pub(crate) fn mix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}
