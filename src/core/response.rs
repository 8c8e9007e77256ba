//! 核心响应处理模块

use serde::{Deserialize, Serialize};

/// 只包含提示信息的响应，可附带产品
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<T>,
}

impl<T> MessageResponse<T> {
    pub fn with_product(message: impl Into<String>, product: T) -> Self {
        Self {
            message: message.into(),
            product: Some(product),
        }
    }
}

impl MessageResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            product: None,
        }
    }
}
