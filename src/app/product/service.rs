//! 产品业务服务

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::catalog::Catalog;
use super::model::{
    NewProduct, Product, ProductListResponse, SearchResponse, StatsResponse, StockStats,
};
use super::query::{ListQuery, PageRequest};
use crate::core::error::ApiError;
use crate::infrastructure::id_generator::IdGenerator;

pub const SEARCH_QUERY_REQUIRED: &str = "Search query parameter \"q\" is required";
pub const PRODUCT_NOT_FOUND: &str = "Product not found";

/// 产品服务
///
/// 读接口只查询共享的只读目录；写接口返回构造出的产品但不写回目录。
#[derive(Clone)]
pub struct ProductService {
    catalog: Arc<Catalog>,
    ids: Arc<IdGenerator>,
    latency: Duration,
    default_page_size: usize,
}

impl ProductService {
    pub fn new(catalog: Arc<Catalog>, latency: Duration, default_page_size: usize) -> Self {
        Self {
            catalog,
            ids: Arc::new(IdGenerator::new()),
            latency,
            default_page_size,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// 按分类过滤并分页
    pub async fn list(&self, query: &ListQuery) -> ProductListResponse {
        let filtered: Vec<Product> = match query.category.as_deref().filter(|c| !c.is_empty()) {
            Some(category) => {
                let category = category.to_lowercase();
                self.catalog
                    .products()
                    .iter()
                    .filter(|p| p.category.to_lowercase() == category)
                    .cloned()
                    .collect()
            }
            None => self.catalog.products().to_vec(),
        };

        let page = PageRequest::from_query(query, self.default_page_size);
        let products = page.slice(&filtered);

        self.simulate_latency().await;

        ProductListResponse {
            products,
            pagination: page.pagination(filtered.len()),
        }
    }

    /// 按名称做大小写不敏感的子串搜索
    pub async fn search(&self, term: Option<&str>) -> Result<SearchResponse, ApiError> {
        let term = term
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::validation(SEARCH_QUERY_REQUIRED))?;

        let needle = term.to_lowercase();
        let results: Vec<Product> = self
            .catalog
            .products()
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        self.simulate_latency().await;

        Ok(SearchResponse {
            search_term: term.to_string(),
            count: results.len(),
            results,
        })
    }

    pub async fn stats(&self) -> StatsResponse {
        let products = self.catalog.products();

        let mut category_stats = BTreeMap::new();
        for product in products {
            *category_stats.entry(product.category.clone()).or_insert(0) += 1;
        }

        let in_stock = products.iter().filter(|p| p.in_stock).count();

        self.simulate_latency().await;

        StatsResponse {
            total_products: products.len(),
            category_stats,
            stock_stats: StockStats {
                in_stock,
                out_of_stock: products.len() - in_stock,
            },
        }
    }

    /// `id` 为 `None` 表示路径参数不是整数，按未找到处理
    pub async fn get(&self, id: Option<i64>) -> Result<Product, ApiError> {
        self.simulate_latency().await;

        id.and_then(|id| self.catalog.find(id))
            .cloned()
            .ok_or_else(|| ApiError::not_found(PRODUCT_NOT_FOUND))
    }

    /// 分配新 ID 并回显，目录保持不变
    pub async fn create(&self, draft: NewProduct) -> Product {
        self.simulate_latency().await;

        let product = draft.into_product(self.ids.next_id());
        debug!("created product {} (not persisted)", product.id);
        product
    }

    /// 整体替换，ID 取自路径参数；不检查产品是否存在
    pub async fn update(&self, id: i64, draft: NewProduct) -> Product {
        self.simulate_latency().await;

        debug!("updated product {} (not persisted)", id);
        draft.into_product(id)
    }

    /// 总是成功，不检查产品是否存在
    pub async fn delete(&self, id: i64) -> String {
        self.simulate_latency().await;

        debug!("deleted product {} (not persisted)", id);
        format!("Product with ID {} deleted successfully", id)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Number;

    fn service() -> ProductService {
        ProductService::new(Arc::new(Catalog::seed()), Duration::ZERO, 10)
    }

    fn list_query(category: Option<&str>, page: Option<&str>, limit: Option<&str>) -> ListQuery {
        ListQuery {
            category: category.map(str::to_string),
            page: page.map(str::to_string),
            limit: limit.map(str::to_string),
        }
    }

    fn draft() -> NewProduct {
        NewProduct {
            name: "Drone".to_string(),
            description: "Camera drone".to_string(),
            price: Number::from(349),
            category: "Electronics".to_string(),
            in_stock: true,
        }
    }

    #[tokio::test]
    async fn test_list_filters_category_case_insensitively() {
        let service = service();

        let page = service.list(&list_query(Some("electronics"), None, None)).await;
        assert_eq!(page.products.len(), 6);
        assert!(page
            .products
            .iter()
            .all(|p| p.category.eq_ignore_ascii_case("electronics")));

        let page = service.list(&list_query(Some("Books"), None, None)).await;
        assert!(page.products.is_empty());
        assert_eq!(page.pagination.total_products, 0);
        assert_eq!(page.pagination.total_pages, 0);
    }

    #[tokio::test]
    async fn test_list_paginates() {
        let service = service();

        let page = service.list(&list_query(None, Some("2"), Some("4"))).await;
        let ids: Vec<i64> = page.products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![5, 6]);
        assert_eq!(page.pagination.current_page, 2);
        assert_eq!(page.pagination.total_pages, 2);

        let page = service.list(&list_query(None, Some("3"), Some("4"))).await;
        assert!(page.products.is_empty());
    }

    #[tokio::test]
    async fn test_search() {
        let service = service();

        let found = service.search(Some("LAP")).await.unwrap();
        assert_eq!(found.count, 1);
        assert_eq!(found.results[0].name, "Laptops");
        assert_eq!(found.search_term, "LAP");

        let none = service.search(Some("zz")).await.unwrap();
        assert_eq!(none.count, 0);

        let err = service.search(Some("")).await.unwrap_err();
        assert_eq!(err.public_message(), SEARCH_QUERY_REQUIRED);
        assert!(service.search(None).await.is_err());
    }

    #[tokio::test]
    async fn test_stats() {
        let stats = service().stats().await;
        assert_eq!(stats.total_products, 6);
        assert_eq!(stats.category_stats.get("Electronics"), Some(&6));
        assert_eq!(stats.stock_stats.in_stock, 4);
        assert_eq!(stats.stock_stats.out_of_stock, 2);
    }

    #[tokio::test]
    async fn test_get() {
        let service = service();
        assert_eq!(service.get(Some(3)).await.unwrap().name, "Headphones");

        let err = service.get(Some(999)).await.unwrap_err();
        assert_eq!(err.public_message(), PRODUCT_NOT_FOUND);
        assert!(service.get(None).await.is_err());
    }

    #[tokio::test]
    async fn test_writes_do_not_touch_catalog() {
        let service = service();

        let created = service.create(draft()).await;
        let again = service.create(draft()).await;
        assert_ne!(created.id, again.id);

        let updated = service.update(2, draft()).await;
        assert_eq!(updated.id, 2);
        assert_eq!(updated.name, "Drone");

        let message = service.delete(1).await;
        assert_eq!(message, "Product with ID 1 deleted successfully");

        assert_eq!(service.catalog().len(), 6);
        assert_eq!(service.get(Some(2)).await.unwrap().name, "Laptops");
        assert_eq!(service.get(Some(1)).await.unwrap().name, "Mobiles");
    }
}
