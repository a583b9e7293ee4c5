//! # 黄金首饰商品目录
//!
//! 一个只读的商品目录服务，包括：
//! - 启动时加载的静态商品数据集
//! - 按价格区间和最低评分过滤的纯函数过滤引擎
//! - 基于 Axum 的 HTTP API 与服务端渲染的目录页面
//! - 客户端数据服务（查询串构造、请求序号）
//! - 与 UI 框架无关的过滤侧栏状态机和商品展示

pub mod app;
pub mod core;
pub mod error;
pub mod infrastructure;
pub mod server;

pub use error::{CatalogError, Result};
pub use app::catalog::filter::filter_products;
pub use app::catalog::model::{FilterCriteria, GoldColor, Product, ProductImages};
pub use app::catalog::store::ProductStore;
pub use app::client::{ApiClient, FetchFailure, FetchOutcome, FilterParams};
pub use infrastructure::config::{AppConfig, Environment};
