//! 核心中间件模块

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use super::error::ApiError;

pub const API_KEY_HEADER: &str = "x-api-key";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// 请求日志中间件
///
/// 在路由匹配之前记录方法、路径和时间戳，对响应内容没有影响。
pub async fn access_log_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    info!(
        "{} {} - {} (request_id={})",
        method,
        path,
        chrono::Utc::now().to_rfc3339(),
        request_id
    );

    let mut response = next.run(req).await;

    debug!(
        "{} {} -> {} in {}ms (request_id={})",
        method,
        path,
        response.status(),
        start.elapsed().as_millis(),
        request_id
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// 把框架层生成的空响应体 405/408 改写为统一的错误响应
///
/// 带 `Content-Type` 的响应已由 handler 生成，原样返回。
pub async fn normalize_error_response(response: Response) -> Response {
    if response.headers().contains_key(header::CONTENT_TYPE) {
        return response;
    }

    let err = match response.status() {
        StatusCode::METHOD_NOT_ALLOWED => ApiError::MethodNotAllowed,
        StatusCode::REQUEST_TIMEOUT => ApiError::Timeout,
        _ => return response,
    };

    let allow = response.headers().get(header::ALLOW).cloned();
    let mut normalized = err.into_response();
    if let Some(allow) = allow {
        normalized.headers_mut().insert(header::ALLOW, allow);
    }
    normalized
}

/// 写接口要求的共享密钥
#[derive(Clone)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 检查 `x-api-key` 请求头，缺失或不匹配都视为认证失败
pub fn check_api_key(headers: &HeaderMap, expected: &str) -> Result<(), ApiError> {
    match headers.get(API_KEY_HEADER).map(HeaderValue::as_bytes) {
        Some(provided) if provided == expected.as_bytes() => Ok(()),
        _ => Err(ApiError::auth("Invalid API key")),
    }
}

/// 认证中间件，只挂在写接口上
pub async fn require_api_key(
    State(key): State<ApiKey>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    check_api_key(req.headers(), key.as_str())?;
    Ok(next.run(req).await)
}
