//! REST 接口模块
//!
//! 基于 axum 的拓扑查询路由表，以及进程内分发。

mod rest;

pub use axum::http::{Method, StatusCode};
pub use rest::{ApiError, CONTENT_TYPE_JSON, DispatchError, Reply, RestApi};
