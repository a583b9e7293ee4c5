//! 客户端：过滤参数、API 请求和请求序号

pub mod api;
pub mod params;
pub mod sequence;

pub use api::{ApiClient, FetchFailure, FetchOutcome};
pub use params::FilterParams;
pub use sequence::{RequestSequencer, RequestTicket};
