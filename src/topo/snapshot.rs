//! 静态拓扑快照
//!
//! 从 JSON 文件加载交换机与链路，格式与 REST 接口输出一致：
//!
//! ```json
//! {
//!     "switches": [ { "dpid": "0000000000000001", "ports": [ ... ] } ],
//!     "links": [ { "src": { "dpid": "...", "port_no": "00000001" }, "dst": { ... } } ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::source::{TopologyError, TopologySource};
use crate::net::{Link, Switch, SwitchId};

/// 拓扑快照
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologySnapshot {
    #[serde(default)]
    pub switches: Vec<Switch>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl TopologySnapshot {
    pub fn from_json_str(raw: &str) -> Result<Self, TopologyError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TopologyError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| TopologyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json_str(&raw)?;
        info!(
            path = %path.display(),
            switches = snapshot.switches.len(),
            links = snapshot.links.len(),
            "📂 加载拓扑快照"
        );
        Ok(snapshot)
    }

    pub fn to_json_pretty(&self) -> Result<String, TopologyError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// 内存中的静态数据源
#[derive(Debug, Clone, Default)]
pub struct StaticTopology {
    snapshot: TopologySnapshot,
}

impl StaticTopology {
    pub fn new(snapshot: TopologySnapshot) -> Self {
        Self { snapshot }
    }

    pub fn from_links(links: Vec<Link>) -> Self {
        Self::new(TopologySnapshot {
            switches: Vec::new(),
            links,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TopologyError> {
        TopologySnapshot::load(path).map(Self::new)
    }

    pub fn snapshot(&self) -> &TopologySnapshot {
        &self.snapshot
    }
}

impl TopologySource for StaticTopology {
    fn get_switches(&self, filter: Option<SwitchId>) -> Result<Vec<Switch>, TopologyError> {
        let switches: Vec<Switch> = self
            .snapshot
            .switches
            .iter()
            .filter(|sw| filter.is_none_or(|dpid| sw.dpid == dpid))
            .cloned()
            .collect();
        debug!(filter = ?filter, count = switches.len(), "查询交换机");
        Ok(switches)
    }

    fn get_links(&self, filter: Option<SwitchId>) -> Result<Vec<Link>, TopologyError> {
        let links: Vec<Link> = self
            .snapshot
            .links
            .iter()
            .filter(|link| filter.is_none_or(|dpid| link.src.dpid == dpid))
            .cloned()
            .collect();
        debug!(filter = ?filter, count = links.len(), "查询链路");
        Ok(links)
    }
}
