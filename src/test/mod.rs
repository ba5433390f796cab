mod topologies;

use crate::net::{Link, NodePortTuple, PortNo, SwitchId};

pub(crate) fn sw(n: u64) -> SwitchId {
    SwitchId(n)
}

pub(crate) fn ep(switch: u64, port: u32) -> NodePortTuple {
    NodePortTuple::new(SwitchId(switch), PortNo(port))
}

/// (a, pa) -> (b, pb)
pub(crate) fn link(a: u64, pa: u32, b: u64, pb: u32) -> Link {
    Link::between(ep(a, pa), ep(b, pb))
}
