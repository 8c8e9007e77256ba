//! # 产品目录 HTTP 服务
//!
//! 基于 Axum 的产品接口，数据来自启动时构建的只读目录：
//! - 列表（分类过滤、分页）、名称搜索、统计、按 ID 查询
//! - 需要 `x-api-key` 的创建、更新、删除接口，结果只回显不落地
//! - 统一的错误响应 `{ "error": ..., "message": ... }`

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::{build_router, AppState};
pub use config::{Config, ConfigError};
pub use crate::core::error::ApiError;
