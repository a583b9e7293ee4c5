//! 核心响应处理模块

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::infrastructure::config::Environment;

/// 健康检查响应，与商品数据无关
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub environment: Environment,
    pub port: u16,
}

impl HealthResponse {
    pub fn ok(environment: Environment, port: u16) -> Self {
        Self {
            status: "ok".to_string(),
            environment,
            port,
        }
    }
}

/// 页面渲染失败时返回的静态错误页
pub const FALLBACK_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <title>Jewelry Store</title>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <style>
      body { font-family: Arial, sans-serif; max-width: 600px; margin: 50px auto; padding: 20px; }
      .card { border: 1px solid #ddd; padding: 20px; border-radius: 8px; margin: 20px 0; }
    </style>
  </head>
  <body>
    <h1>Jewelry Store</h1>
    <div class="card">
      <h2>Application Error</h2>
      <p>We're experiencing some technical difficulties. Please try again in a few moments.</p>
      <p>In the meantime, you can access:</p>
      <ul>
        <li><a href="/api/products">API Products</a></li>
        <li><a href="/health">Health Check</a></li>
      </ul>
    </div>
  </body>
</html>
"#;

pub fn fallback_page() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Html(FALLBACK_PAGE)).into_response()
}
