//! 产品数据模型

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// 保留客户端提交时的数字形式（整数或小数）
    pub price: Number,
    pub category: String,
    pub in_stock: bool,
}

/// 创建/更新请求体
///
/// 字段全部按原始 JSON 值接收，由 `validation` 统一判定缺失与类型，
/// 这样类型错误也会得到和缺失字段一致的校验错误而不是解析错误。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: Option<Value>,
    pub description: Option<Value>,
    pub price: Option<Value>,
    pub category: Option<Value>,
    pub in_stock: Option<Value>,
}

/// 通过校验、尚未分配 ID 的产品
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Number,
    pub category: String,
    pub in_stock: bool,
}

impl NewProduct {
    pub fn into_product(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            in_stock: self.in_stock,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductEnvelope {
    pub product: Product,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_products: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub search_term: String,
    pub results: Vec<Product>,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockStats {
    pub in_stock: usize,
    pub out_of_stock: usize,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_products: usize,
    pub category_stats: BTreeMap<String, usize>,
    pub stock_stats: StockStats,
}
