//! 与 UI 框架无关的界面状态：过滤侧栏、商品卡片展示和目录页面

pub mod display;
pub mod filter_state;
pub mod page;

pub use display::{CatalogDisplay, ProductCard};
pub use filter_state::{price_ceiling, FilterDraft, FilterSidebar};
pub use page::CatalogPage;
