mod common;

use std::net::SocketAddr;
use std::time::Duration;

use axum::{routing::get, Router};
use gold_catalog::app::ui::CatalogPage;
use gold_catalog::core::error::CoreError;
use gold_catalog::{server, ApiClient, AppConfig, FetchFailure, FetchOutcome, FilterParams};
use tokio::net::TcpListener;

use common::{names, sample_store};

async fn spawn_catalog() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(server::serve(listener, AppConfig::default(), sample_store()));
    addr
}

async fn spawn_router(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client(addr: SocketAddr) -> ApiClient {
    ApiClient::new(format!("http://{}", addr), Duration::from_secs(5))
}

#[tokio::test]
async fn test_fetch_with_filters() {
    let addr = spawn_catalog().await;
    let params = FilterParams {
        min_price: Some(60.0),
        ..Default::default()
    };

    match client(addr).get_products(&params).await {
        FetchOutcome::Loaded(products) => {
            assert_eq!(names(&products), vec!["Ring One", "Ring Three"]);
        }
        FetchOutcome::Failed(failure) => panic!("unexpected failure: {}", failure),
    }
}

#[tokio::test]
async fn test_zero_matches_is_not_a_failure() {
    let addr = spawn_catalog().await;
    let params = FilterParams {
        min_price: Some(300.0),
        ..Default::default()
    };

    let outcome = client(addr).get_products(&params).await;
    assert_eq!(outcome, FetchOutcome::Loaded(Vec::new()));
}

#[tokio::test]
async fn test_transport_failure_is_reported() {
    // 先占一个端口再释放，保证没有服务在监听
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let outcome = client(addr).get_products(&FilterParams::default()).await;
    assert!(matches!(
        outcome,
        FetchOutcome::Failed(FetchFailure::Transport(_))
    ));
    assert!(outcome.products_or_empty().is_empty());
}

#[tokio::test]
async fn test_server_error_is_reported() {
    let app = Router::new().route(
        "/api/products",
        get(|| async { Err::<String, _>(CoreError::InternalServerError("boom".to_string())) }),
    );
    let addr = spawn_router(app).await;

    let outcome = client(addr).get_products(&FilterParams::default()).await;
    assert_eq!(outcome, FetchOutcome::Failed(FetchFailure::Status(500)));
}

#[tokio::test]
async fn test_undecodable_body_is_reported() {
    let app = Router::new().route("/api/products", get(|| async { "not json" }));
    let addr = spawn_router(app).await;

    let outcome = client(addr).get_products(&FilterParams::default()).await;
    assert!(matches!(outcome, FetchOutcome::Failed(FetchFailure::Decode(_))));
}

#[tokio::test]
async fn test_client_timeout_is_applied() {
    let app = Router::new().route(
        "/api/products",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "[]"
        }),
    );
    let addr = spawn_router(app).await;

    let client = ApiClient::new(format!("http://{}", addr), Duration::from_millis(200));
    let outcome = client.get_products(&FilterParams::default()).await;
    assert!(matches!(
        outcome,
        FetchOutcome::Failed(FetchFailure::Transport(_))
    ));
}

#[tokio::test]
async fn test_health_round_trip() {
    let addr = spawn_catalog().await;
    let health = client(addr).health().await.unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.port, 3001);
}

#[tokio::test]
async fn test_requested_filters_are_normalised_before_sending() {
    let addr = spawn_catalog().await;
    let mut page = CatalogPage::new();
    let requested = FilterParams {
        max_price: Some(2000.0),
        min_rating: Some(4.3),
        ..Default::default()
    };

    assert!(page.load(&client(addr), requested).await);
    assert_eq!(page.sidebar().ceiling(), 200.0);

    let sent = page.active_filters();
    assert_eq!(
        sent,
        FilterParams {
            min_rating: Some(4.5),
            ..Default::default()
        }
    );
    assert_eq!(names(page.products()), vec!["Ring One", "Ring Three"]);
    assert!(page
        .render_text()
        .contains(&format!("Filters: {}\n", sent.summary_text())));
    assert_eq!(page.sidebar().active_filters_text(), sent.summary_text());
}

#[tokio::test]
async fn test_page_flow_against_live_server() {
    let addr = spawn_catalog().await;
    let client = client(addr);
    let mut page = CatalogPage::new();

    assert!(page.refresh(&client, FilterParams::default()).await);
    assert_eq!(page.count_caption(), "3 products");
    assert_eq!(page.sidebar().ceiling(), 200.0);

    page.sidebar_mut().open();
    page.sidebar_mut().set_min_rating(4.5);
    let (ticket, params) = page.apply_filters();
    assert!(!page.sidebar().is_open());

    let outcome = client.get_products(&params).await;
    assert!(page.finish_fetch(ticket, outcome));
    assert_eq!(page.count_caption(), "2 products found");
    assert_eq!(page.sidebar().active_filters_text(), "4.5★+");
    // 过滤后的结果不会收窄价格上限
    assert_eq!(page.sidebar().ceiling(), 200.0);

    let (ticket, params) = page.clear_filters();
    let outcome = client.get_products(&params).await;
    page.finish_fetch(ticket, outcome);
    assert_eq!(page.products().len(), 3);
    assert!(!page.has_active_filters());
}
