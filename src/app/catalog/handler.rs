//! 商品目录处理器

use axum::{
    extract::{Query, State},
    http::{header, Method, Uri},
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::{debug, error};

use super::model::FilterCriteria;
use super::service::CatalogService;
use crate::app::client::{FetchOutcome, FilterParams};
use crate::app::ui::{price_ceiling, CatalogPage};
use crate::core::error::CoreError;
use crate::core::response::{fallback_page, HealthResponse};
use crate::infrastructure::config::Environment;

#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub environment: Environment,
    pub port: u16,
}

/// 原始查询参数
///
/// 按键值对接收，重复或未知的参数都不会导致请求被拒绝。
pub type RawQuery = Vec<(String, String)>;

/// 宽松解析：空值、非数字、非有限值都视为未设置
pub fn parse_number(raw: Option<&str>) -> Option<f64> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn criteria_from_query(query: &[(String, String)]) -> FilterCriteria {
    let first = |key: &str| {
        query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };

    FilterCriteria {
        min_price: parse_number(first("minPrice")),
        max_price: parse_number(first("maxPrice")),
        min_rating: parse_number(first("minRating")),
    }
}

/// GET /api/products
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<RawQuery>,
) -> Result<Response, CoreError> {
    let criteria = criteria_from_query(&query);
    let products = state.catalog.list_products(&criteria);
    debug!("商品查询 {:?} 返回 {} 条", criteria, products.len());

    let body = serde_json::to_vec(&products)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.environment, state.port))
}

/// GET / ，服务端渲染的目录页面
///
/// 查询参数先经过侧栏的草稿 -> 提交流程，默认值维度会被丢弃；
/// `color.<商品名>` 参数决定各卡片展示的款式。
pub async fn catalog_page(
    State(state): State<AppState>,
    Query(query): Query<RawQuery>,
) -> Response {
    let requested = FilterParams::from(criteria_from_query(&query));

    let mut page = CatalogPage::with_price_ceiling(price_ceiling(state.catalog.all()));
    let (ticket, params) = page.apply_requested(&requested);
    let products = state.catalog.list_products(&FilterCriteria::from(params));
    page.finish_fetch(ticket, FetchOutcome::Loaded(products));
    page.display_mut()
        .apply_color_choices(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    match page.render_html() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("目录页面渲染失败: {}", e);
            fallback_page()
        }
    }
}

/// 未匹配的路径：GET 返回目录页面，其他方法返回 404
pub async fn fallback(
    method: Method,
    uri: Uri,
    state: State<AppState>,
    query: Query<RawQuery>,
) -> Response {
    if method == Method::GET {
        catalog_page(state, query).await
    } else {
        CoreError::NotFound(uri.path().to_string()).into_response()
    }
}
