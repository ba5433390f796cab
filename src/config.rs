//! 运行配置
//!
//! JSON 配置文件，所有字段都有默认值：
//!
//! ```json
//! {
//!     "edge_selection": { "kind": "flow_hash", "salt": 7 },
//!     "log_filter": "debug"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::route::EdgeSelection;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// 平行链路选择策略
    pub edge_selection: EdgeSelection,
    /// `RUST_LOG` 未设置时使用的日志过滤
    pub log_filter: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            edge_selection: EdgeSelection::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl RouteConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}
