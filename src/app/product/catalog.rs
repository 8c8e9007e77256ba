//! 只读产品目录

use serde_json::Number;

use super::model::Product;

/// 固定的六条种子数据
///
/// 启动时构建一次，通过 `Arc` 注入各 handler。写接口从不修改它，
/// 所以每次读请求看到的都是同样的六条记录。
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn seed() -> Self {
        let products = [
            (1, "Mobiles", "Latest smartphones", 699, true),
            (2, "Laptops", "High performance laptops", 1299, true),
            (3, "Headphones", "Noise-cancelling headphones", 199, true),
            (4, "Smartwatch", "Fitness tracking smartwatch", 249, true),
            (5, "Tablets", "Portable tablets for work and play", 499, false),
            (6, "Cameras", "Digital cameras for photography enthusiasts", 899, false),
        ]
        .into_iter()
        .map(
            |(id, name, description, price, in_stock): (i64, &str, &str, u64, bool)| Product {
                id,
                name: name.to_string(),
                description: description.to_string(),
                price: Number::from(price),
                category: "Electronics".to_string(),
                in_stock,
            },
        )
        .collect();

        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seed()
    }
}
