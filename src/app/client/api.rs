//! 客户端数据服务
//!
//! 每次调用只发一个请求，不重试、不缓存。失败以 [`FetchOutcome::Failed`]
//! 返回，调用方可以区分“请求失败”和“没有匹配的商品”。

use std::time::Duration;

use tracing::{debug, warn};

use super::params::FilterParams;
use crate::app::catalog::model::Product;
use crate::core::response::HealthResponse;
use crate::infrastructure::config::ClientConfig;

/// 请求失败原因
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchFailure {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// 一次商品请求的结果
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Loaded(Vec<Product>),
    Failed(FetchFailure),
}

impl FetchOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }

    /// 把失败折叠为空列表，与“无匹配”无法区分
    pub fn products_or_empty(self) -> Vec<Product> {
        match self {
            FetchOutcome::Loaded(products) => products,
            FetchOutcome::Failed(_) => Vec::new(),
        }
    }
}

impl From<Result<Vec<Product>, FetchFailure>> for FetchOutcome {
    fn from(result: Result<Vec<Product>, FetchFailure>) -> Self {
        match result {
            Ok(products) => FetchOutcome::Loaded(products),
            Err(failure) => FetchOutcome::Failed(failure),
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = match reqwest::Client::builder().timeout(timeout).build() {
            Ok(client) => client,
            Err(e) => {
                warn!("HTTP 客户端构建失败，使用默认客户端（无超时）: {}", e);
                reqwest::Client::new()
            }
        };

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            config.api_url.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn products_url(&self, params: &FilterParams) -> String {
        let query = params.to_query_string();
        if query.is_empty() {
            format!("{}/api/products", self.base_url)
        } else {
            format!("{}/api/products?{}", self.base_url, query)
        }
    }

    pub async fn get_products(&self, params: &FilterParams) -> FetchOutcome {
        let url = self.products_url(params);
        debug!("请求商品列表: {}", url);

        let outcome = FetchOutcome::from(self.fetch_json::<Vec<Product>>(&url).await);
        if let FetchOutcome::Failed(failure) = &outcome {
            warn!("获取商品列表失败: {}", failure);
        }
        outcome
    }

    pub async fn health(&self) -> Result<HealthResponse, FetchFailure> {
        let url = format!("{}/health", self.base_url);
        self.fetch_json(&url).await
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, FetchFailure> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchFailure::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FetchFailure::Decode(e.to_string()))
    }
}
