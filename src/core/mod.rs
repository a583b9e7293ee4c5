//! 核心层：错误映射、响应体与中间件

pub mod error;
pub mod middleware;
pub mod response;
