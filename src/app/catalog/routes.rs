//! 商品目录路由

use std::any::Any;
use std::time::Duration;

use axum::{
    http::Method,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{self, CorsLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info};

use super::handler::{catalog_page, fallback, health_check, list_products, AppState};
use crate::core::error::CoreError;
use crate::core::middleware::request_logging_middleware;
use crate::core::response::fallback_page;
use crate::infrastructure::config::ServerConfig;

pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let pages = catch_page_panics(
        Router::new()
            .route("/", get(catalog_page))
            .fallback(fallback),
    );

    let mut app = Router::new()
        .route("/api/products", get(list_products))
        .route("/health", get(health_check))
        .merge(pages);

    if config.environment.serves_static_assets() {
        info!("提供静态资源: /public -> {}", config.static_dir.display());
        app = app.nest_service("/public", ServeDir::new(&config.static_dir));
    }

    catch_api_panics(app)
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeout_seconds)))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(cors::Any)
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers(cors::Any),
        )
        .with_state(state)
}

/// 页面路由：处理器 panic 时返回静态错误页
pub fn catch_page_panics<S>(pages: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    pages.layer(CatchPanicLayer::custom(page_panic_response))
}

/// 其余路由：处理器 panic 时返回 JSON `{error}`
pub fn catch_api_panics<S>(routes: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    routes.layer(CatchPanicLayer::custom(api_panic_response))
}

fn page_panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    error!("目录页面渲染失败: {}", panic_detail(err.as_ref()));
    fallback_page()
}

fn api_panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic_detail(err.as_ref());
    CoreError::InternalServerError(format!("处理器 panic: {}", detail)).into_response()
}

fn panic_detail(err: &(dyn Any + Send)) -> String {
    if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    async fn broken_page() -> &'static str {
        panic!("页面模板损坏")
    }

    async fn broken_api() -> &'static str {
        panic!("商品序列化失败")
    }

    fn app() -> Router {
        catch_api_panics(
            Router::new()
                .route("/api/products", get(broken_api))
                .merge(catch_page_panics(
                    Router::new().route("/", get(broken_page)).fallback(broken_page),
                )),
        )
    }

    async fn call(uri: &str) -> (StatusCode, String, String) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn page_panic_serves_fallback_html() {
        for uri in ["/", "/rings/latest"] {
            let (status, content_type, body) = call(uri).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert!(content_type.starts_with("text/html"));
            assert!(body.contains(r#"href="/api/products""#));
            assert!(body.contains(r#"href="/health""#));
        }
    }

    #[tokio::test]
    async fn api_panic_is_json_error() {
        let (status, content_type, body) = call("/api/products").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(content_type.starts_with("application/json"));
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value, serde_json::json!({ "error": "Internal server error" }));
    }
}
