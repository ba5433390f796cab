//! 交换机类型
//!
//! 定义发现层上报的交换机（datapath）及其端口列表。

use serde::{Deserialize, Serialize};

use super::id::{PortNo, SwitchId};
use super::link::Port;

/// 交换机节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Switch {
    pub dpid: SwitchId,
    #[serde(default)]
    pub ports: Vec<Port>,
}

impl Switch {
    /// 创建没有端口的交换机
    pub fn new(dpid: SwitchId) -> Self {
        Self {
            dpid,
            ports: Vec::new(),
        }
    }

    /// 添加端口，返回新端口
    pub fn add_port(&mut self, port_no: PortNo, name: impl Into<String>) -> &Port {
        self.ports.push(Port::new(self.dpid, port_no).named(name));
        &self.ports[self.ports.len() - 1]
    }

    pub fn port(&self, port_no: PortNo) -> Option<&Port> {
        self.ports.iter().find(|p| p.port_no == port_no)
    }
}
