//! 商品目录：数据模型、商品存储、过滤引擎与 HTTP 处理器

pub mod filter;
pub mod handler;
pub mod model;
pub mod routes;
pub mod service;
pub mod store;
