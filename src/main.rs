use product_catalog_api::{build_router, infrastructure::logger::Logger, Config};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    let _log_guard = Logger::init(&config.logging)?;

    info!("启动产品目录服务...");

    let app = build_router(&config);
    let addr = config.http.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;

    info!("🚀 服务器运行在 http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET    /                     - Hello World");
    info!("   GET    /api/products         - 产品列表 (category, page, limit)");
    info!("   GET    /api/products/search  - 按名称搜索 (q)");
    info!("   GET    /api/products/stats   - 产品统计");
    info!("   GET    /api/products/:id     - 获取产品");
    info!("   POST   /api/products         - 创建产品 (需要 x-api-key)");
    info!("   PUT    /api/products/:id     - 更新产品 (需要 x-api-key)");
    info!("   DELETE /api/products/:id     - 删除产品 (需要 x-api-key)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("服务器已关闭");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("无法监听 Ctrl-C 信号: {}", e);
        std::future::pending::<()>().await;
    }
    info!("收到关闭信号，正在停止...");
}
