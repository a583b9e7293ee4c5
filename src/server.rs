//! HTTP 服务启动与优雅退出

use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use crate::app::catalog::handler::AppState;
use crate::app::catalog::routes::router;
use crate::app::catalog::service::CatalogService;
use crate::app::catalog::store::ProductStore;
use crate::infrastructure::config::AppConfig;

pub fn app_state(config: &AppConfig, store: ProductStore) -> AppState {
    AppState {
        catalog: CatalogService::new(store),
        environment: config.server.environment,
        port: config.server.port,
    }
}

/// 在已绑定的监听器上运行服务，直到收到退出信号
pub async fn serve(
    listener: TcpListener,
    config: AppConfig,
    store: ProductStore,
) -> anyhow::Result<()> {
    let app = router(app_state(&config, store), &config.server);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("服务器已关闭");
    Ok(())
}

pub async fn run(config: AppConfig, store: ProductStore) -> anyhow::Result<()> {
    let address = config.server.bind_addr();
    let listener = TcpListener::bind(&address).await?;
    let port = config.server.port;

    info!("🚀 服务器运行在端口 {}", port);
    info!("🌍 运行环境: {}", config.server.environment);
    info!("📝 健康检查: http://localhost:{}/health", port);
    info!("📦 商品 API: http://localhost:{}/api/products", port);

    serve(listener, config, store).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("收到 Ctrl+C，准备关闭"),
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("收到 SIGTERM，准备关闭");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
