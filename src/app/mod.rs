//! 应用层：路由装配与共享状态

pub mod product;

use axum::{
    http::Uri,
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::core::{
    error::{panic_response, ApiError},
    middleware::{access_log_middleware, normalize_error_response, require_api_key, ApiKey},
};
use product::{handler, Catalog, ProductService};

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            product_service: ProductService::new(
                Arc::new(Catalog::seed()),
                config.catalog.simulated_latency(),
                config.catalog.default_page_size,
            ),
        }
    }
}

/// 构建完整路由
///
/// 中间件由外到内：访问日志 -> CORS -> 追踪 -> 405/408 改写 -> 超时 -> panic 捕获 -> 路由。
/// 写接口额外挂认证中间件，认证先于请求体解析执行。
pub fn build_router(config: &Config) -> Router {
    let state = AppState::from_config(config);
    let api_key = ApiKey::new(config.auth.api_key.as_str());

    let public = Router::new()
        .route("/api/products", get(handler::list_products))
        .route("/api/products/search", get(handler::search_products))
        .route("/api/products/stats", get(handler::product_stats))
        .route("/api/products/:id", get(handler::get_product));

    let protected = Router::new()
        .route("/api/products", post(handler::create_product))
        .route(
            "/api/products/:id",
            put(handler::update_product).delete(handler::delete_product),
        )
        .route_layer(middleware::from_fn_with_state(api_key, require_api_key));

    Router::new()
        .route("/", get(hello))
        .merge(public)
        .merge(protected)
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TimeoutLayer::new(config.http.timeout()))
        .layer(middleware::map_response(normalize_error_response))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(middleware::from_fn(access_log_middleware))
        .with_state(state)
}

async fn hello() -> &'static str {
    "Hello World!"
}

async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("Route {} not found", uri.path()))
}
