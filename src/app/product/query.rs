//! 查询参数与分页

use serde::Deserialize;

use super::model::Pagination;

/// 列表接口查询参数，数字参数按文本接收后再宽松转换
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// 已确定的分页请求，`page` 和 `limit` 都至少为 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl PageRequest {
    pub fn from_query(query: &ListQuery, default_limit: usize) -> Self {
        Self {
            page: coerce_positive(query.page.as_deref(), 1),
            limit: coerce_positive(query.limit.as_deref(), default_limit),
        }
    }

    /// 截取当前页；越界时返回空列表
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let start = (self.page - 1).saturating_mul(self.limit);
        items.iter().skip(start).take(self.limit).cloned().collect()
    }

    pub fn pagination(&self, total: usize) -> Pagination {
        Pagination {
            current_page: self.page,
            total_pages: total.div_ceil(self.limit),
            total_products: total,
        }
    }
}

/// 取文本开头的整数部分，如 `"2abc"` -> 2；没有数字时返回 `None`
///
/// 超出 `i64` 范围的数字按 `i64::MAX` / `-i64::MAX` 饱和处理，仍视为数字。
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// 缺失、非数字、零或负数都回落到默认值
fn coerce_positive(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(parse_leading_int)
        .filter(|v| *v > 0)
        .map(|v| usize::try_from(v).unwrap_or(usize::MAX))
        .unwrap_or(default)
}
