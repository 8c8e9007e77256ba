//! 核心错误处理模块
//!
//! 所有失败都汇聚到 [`ApiError`]，其 `IntoResponse` 实现是唯一生成错误响应的地方。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use tracing::{error, warn};

pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON format";
pub const SERVER_ERROR_MESSAGE: &str = "Something went wrong on the server";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";
pub const TIMEOUT_MESSAGE: &str = "Request timed out";

/// 核心错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Auth(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    /// 路径存在但方法不匹配
    #[error("Method not allowed")]
    MethodNotAllowed,
    /// 请求超过配置的超时时间
    #[error("Request timed out")]
    Timeout,
    /// 请求体无法解析为 JSON，内容为解析器给出的原因
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),
    /// 未分类的内部错误，内容只写日志不返回给客户端
    #[error("{0}")]
    Internal(String),
}

/// 错误响应结构
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ApiError {
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// 错误种类名，即响应体中的 `error` 字段
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Auth(_) => "AuthError",
            ApiError::Validation(_) | ApiError::InvalidJson(_) => "ValidationError",
            ApiError::NotFound(_) => "NotFoundError",
            ApiError::MethodNotAllowed => "MethodNotAllowedError",
            ApiError::Timeout => "TimeoutError",
            ApiError::Internal(_) => "ServerError",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) | ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回给客户端的消息
    ///
    /// 已分类错误原样返回；JSON 解析失败和内部错误使用固定文案，不暴露内部细节。
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Auth(msg) | ApiError::Validation(msg) | ApiError::NotFound(msg) => {
                msg.clone()
            }
            ApiError::InvalidJson(_) => INVALID_JSON_MESSAGE.to_string(),
            ApiError::MethodNotAllowed => METHOD_NOT_ALLOWED_MESSAGE.to_string(),
            ApiError::Timeout => TIMEOUT_MESSAGE.to_string(),
            ApiError::Internal(_) => SERVER_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn to_body(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.kind().to_string(),
            message: self.public_message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Error: {}", self);
        } else {
            warn!("Error: {}", self);
        }

        (status, Json(self.to_body())).into_response()
    }
}

/// `CatchPanicLayer` 的回调：handler panic 时走 500 分支
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    ApiError::internal(format!("handler panicked: {}", detail)).into_response()
}
