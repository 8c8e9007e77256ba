//! 产品请求校验

use serde_json::{Number, Value};

use super::model::{NewProduct, ProductPayload};
use crate::core::error::ApiError;

pub const REQUIRED_FIELDS_MESSAGE: &str =
    "All fields are required: name, description, price, category, inStock";
pub const POSITIVE_PRICE_MESSAGE: &str = "Price must be a positive number";
pub const INVALID_ID_MESSAGE: &str = "Product id must be an integer";

/// 校验创建/更新请求体
///
/// 先检查字段是否齐全，再检查价格是否为正数。两步分别产生不同的错误信息。
pub fn validate_product(payload: &ProductPayload) -> Result<NewProduct, ApiError> {
    let name = non_empty_text(payload.name.as_ref());
    let description = non_empty_text(payload.description.as_ref());
    let category = non_empty_text(payload.category.as_ref());
    let in_stock = payload.in_stock.as_ref().and_then(Value::as_bool);
    let price = payload.price.as_ref().filter(|v| is_truthy(v));

    let (Some(name), Some(description), Some(category), Some(in_stock), Some(price)) =
        (name, description, category, in_stock, price)
    else {
        return Err(ApiError::validation(REQUIRED_FIELDS_MESSAGE));
    };

    let price = positive_number(price).ok_or_else(|| ApiError::validation(POSITIVE_PRICE_MESSAGE))?;

    Ok(NewProduct {
        name: name.to_string(),
        description: description.to_string(),
        price,
        category: category.to_string(),
        in_stock,
    })
}

/// 解析路径中的产品 ID
///
/// 接受整数和值为整数的小数写法（`"3.0"`、`"3e0"`），其余一律视为无效。
pub fn parse_product_id(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<i64>() {
        return Some(id);
    }

    let value: f64 = raw.parse().ok()?;
    let integral = value.is_finite() && value.fract() == 0.0;
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (integral && in_range).then_some(value as i64)
}

fn non_empty_text(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn positive_number(value: &Value) -> Option<Number> {
    match value {
        Value::Number(n) if n.as_f64().is_some_and(|f| f > 0.0) => Some(n.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> ProductPayload {
        serde_json::from_value(value).unwrap()
    }

    fn valid_body() -> Value {
        json!({
            "name": "Drone",
            "description": "Camera drone",
            "price": 349.5,
            "category": "Electronics",
            "inStock": false
        })
    }

    fn message(result: Result<NewProduct, ApiError>) -> String {
        result.unwrap_err().public_message()
    }

    #[test]
    fn test_valid_payload() {
        let product = validate_product(&payload(valid_body())).unwrap();
        assert_eq!(product.name, "Drone");
        assert_eq!(product.price.as_f64(), Some(349.5));
        assert!(!product.in_stock);
    }

    #[test]
    fn test_missing_field() {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("price");
        assert_eq!(message(validate_product(&payload(body))), REQUIRED_FIELDS_MESSAGE);

        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("inStock");
        assert_eq!(message(validate_product(&payload(body))), REQUIRED_FIELDS_MESSAGE);
    }

    #[test]
    fn test_empty_text_counts_as_missing() {
        let mut body = valid_body();
        body["name"] = json!("");
        assert_eq!(message(validate_product(&payload(body))), REQUIRED_FIELDS_MESSAGE);
    }

    #[test]
    fn test_in_stock_must_be_boolean() {
        let mut body = valid_body();
        body["inStock"] = json!(null);
        assert_eq!(message(validate_product(&payload(body))), REQUIRED_FIELDS_MESSAGE);
    }

    #[test]
    fn test_zero_price_is_missing() {
        let mut body = valid_body();
        body["price"] = json!(0);
        assert_eq!(message(validate_product(&payload(body))), REQUIRED_FIELDS_MESSAGE);
    }

    #[test]
    fn test_price_must_be_positive_number() {
        let mut body = valid_body();
        body["price"] = json!(-5);
        assert_eq!(message(validate_product(&payload(body))), POSITIVE_PRICE_MESSAGE);

        let mut body = valid_body();
        body["price"] = json!("12");
        assert_eq!(message(validate_product(&payload(body))), POSITIVE_PRICE_MESSAGE);
    }

    #[test]
    fn test_presence_checked_before_price() {
        let body = json!({ "price": -5 });
        assert_eq!(message(validate_product(&payload(body))), REQUIRED_FIELDS_MESSAGE);
    }

    #[test]
    fn test_parse_product_id() {
        assert_eq!(parse_product_id("3"), Some(3));
        assert_eq!(parse_product_id(" 42 "), Some(42));
        assert_eq!(parse_product_id("abc"), None);
        assert_eq!(parse_product_id("3abc"), None);
    }

    #[test]
    fn test_parse_integral_decimal_id() {
        assert_eq!(parse_product_id("3.0"), Some(3));
        assert_eq!(parse_product_id("3e0"), Some(3));
        assert_eq!(parse_product_id("3.5"), None);
        assert_eq!(parse_product_id("NaN"), None);
        assert_eq!(parse_product_id("inf"), None);
        assert_eq!(parse_product_id("1e30"), None);
    }
}
