//! 拓扑 REST 接口
//!
//! ```text
//! GET /v1.0/topology/switches
//! GET /v1.0/topology/switches/{dpid}
//! GET /v1.0/topology/links
//! GET /v1.0/topology/links/{dpid}
//! GET /v1.0/topology/route/{srcdpid}/{srcport}/{dstdpid}/{dstport}
//! ```
//!
//! `{dpid}` 为 16 位小写十六进制，`{port}` 为 8 位小写十六进制；格式不符的
//! 参数按未匹配处理（404）。路由表是一个 `axum::Router`，请求通过
//! `tower::ServiceExt::oneshot` 在进程内分发，不绑定 socket。

use std::sync::Arc;

use axum::body::Body;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Method, Request, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tower::ServiceExt;
use tracing::{debug, warn};

use crate::net::{Link, NodePortTuple, PortNo, Switch, SwitchId};
use crate::route::{Resolver, Route};
use crate::topo::{TopologyError, TopologySource};

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// 处理器错误，转换为带 `{"error": ..}` 的 JSON 响应
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Topology(#[from] TopologyError),
    #[error("{0}")]
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Topology(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        };
        if status.is_server_error() {
            warn!(error = %self, "请求处理失败");
        } else {
            debug!(error = %self, "没有匹配的资源");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// 进程内分发失败（请求无法构造或响应体无法读取）
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("invalid request: {0}")]
    Request(#[from] axum::http::Error),
    #[error("failed to read response body: {0}")]
    Body(#[from] axum::Error),
}

/// 分发结果
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl Reply {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }
}

#[derive(Debug, Deserialize)]
struct SwitchPath {
    dpid: SwitchId,
}

#[derive(Debug, Deserialize)]
struct RoutePath {
    srcdpid: SwitchId,
    srcport: PortNo,
    dstdpid: SwitchId,
    dstport: PortNo,
}

fn path_params<T>(params: Result<Path<T>, PathRejection>) -> Result<T, ApiError> {
    params
        .map(|Path(p)| p)
        .map_err(|rejection| ApiError::NotFound(rejection.body_text()))
}

type Shared<S> = State<Arc<Resolver<S>>>;

async fn list_switches<S: TopologySource + 'static>(
    State(resolver): Shared<S>,
) -> Result<Json<Vec<Switch>>, ApiError> {
    Ok(Json(resolver.source().get_switches(None)?))
}

async fn get_switch<S: TopologySource + 'static>(
    State(resolver): Shared<S>,
    params: Result<Path<SwitchPath>, PathRejection>,
) -> Result<Json<Vec<Switch>>, ApiError> {
    let SwitchPath { dpid } = path_params(params)?;
    Ok(Json(resolver.source().get_switches(Some(dpid))?))
}

async fn list_links<S: TopologySource + 'static>(
    State(resolver): Shared<S>,
) -> Result<Json<Vec<Link>>, ApiError> {
    Ok(Json(resolver.source().get_links(None)?))
}

async fn get_links<S: TopologySource + 'static>(
    State(resolver): Shared<S>,
    params: Result<Path<SwitchPath>, PathRejection>,
) -> Result<Json<Vec<Link>>, ApiError> {
    let SwitchPath { dpid } = path_params(params)?;
    Ok(Json(resolver.source().get_links(Some(dpid))?))
}

async fn get_route<S: TopologySource + 'static>(
    State(resolver): Shared<S>,
    params: Result<Path<RoutePath>, PathRejection>,
) -> Result<Json<Route>, ApiError> {
    let p = path_params(params)?;
    let src = NodePortTuple::new(p.srcdpid, p.srcport);
    let dst = NodePortTuple::new(p.dstdpid, p.dstport);
    Ok(Json(resolver.route(src, dst)?))
}

async fn no_route(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("no route matches {}", uri.path()))
}

/// 拓扑 REST 接口
#[derive(Debug, Clone)]
pub struct RestApi {
    router: Router,
}

impl RestApi {
    pub fn new<S: TopologySource + 'static>(resolver: Resolver<S>) -> Self {
        let router = Router::new()
            .route("/v1.0/topology/switches", get(list_switches::<S>))
            .route("/v1.0/topology/switches/{dpid}", get(get_switch::<S>))
            .route("/v1.0/topology/links", get(list_links::<S>))
            .route("/v1.0/topology/links/{dpid}", get(get_links::<S>))
            .route(
                "/v1.0/topology/route/{srcdpid}/{srcport}/{dstdpid}/{dstport}",
                get(get_route::<S>),
            )
            .fallback(no_route)
            .with_state(Arc::new(resolver));
        Self { router }
    }

    /// 底层 axum 路由表
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// 在进程内分发一个请求。查询串不参与匹配。
    #[tracing::instrument(skip(self, method), fields(method = %method))]
    pub async fn dispatch(&self, method: Method, path: &str) -> Result<Reply, DispatchError> {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())?;
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|never| match never {});

        let (parts, body) = response.into_parts();
        let bytes = axum::body::to_bytes(body, usize::MAX).await?;
        debug!(status = %parts.status, bytes = bytes.len(), "请求完成");
        Ok(Reply {
            status: parts.status,
            headers: parts.headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}
