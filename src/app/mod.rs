//! 应用层

pub mod catalog;
pub mod client;
pub mod ui;
