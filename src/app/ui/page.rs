//! 目录页面控制器
//!
//! 把过滤侧栏、数据请求和商品展示串起来：
//! 侧栏提交 -> 领取请求票据 -> 请求 API -> 只有最新票据的结果会更新页面。

use std::fmt::{self, Write};

use tracing::debug;

use super::display::{escape_html, CatalogDisplay};
use super::filter_state::{price_ceiling, FilterSidebar, MAX_RATING, PRICE_STEP, RATING_STEP};
use crate::app::catalog::model::Product;
use crate::app::client::{
    ApiClient, FetchFailure, FetchOutcome, FilterParams, RequestSequencer, RequestTicket,
};

pub const EMPTY_RESULTS_MESSAGE: &str = "No products found with current filters.";

#[derive(Debug, Default)]
pub struct CatalogPage {
    products: Vec<Product>,
    loading: bool,
    active_filters: FilterParams,
    failure: Option<FetchFailure>,
    sidebar: FilterSidebar,
    display: CatalogDisplay,
    sequencer: RequestSequencer,
}

impl CatalogPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以已知的价格上限创建页面，通常来自未过滤的全集
    pub fn with_price_ceiling(ceiling: f64) -> Self {
        Self {
            sidebar: FilterSidebar::new(ceiling),
            ..Self::default()
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn active_filters(&self) -> FilterParams {
        self.active_filters
    }

    pub fn has_active_filters(&self) -> bool {
        !self.active_filters.is_empty()
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        self.failure.as_ref()
    }

    pub fn sidebar(&self) -> &FilterSidebar {
        &self.sidebar
    }

    pub fn sidebar_mut(&mut self) -> &mut FilterSidebar {
        &mut self.sidebar
    }

    pub fn display(&self) -> &CatalogDisplay {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut CatalogDisplay {
        &mut self.display
    }

    /// 记录当前过滤条件并领取票据
    pub fn begin_fetch(&mut self, params: FilterParams) -> RequestTicket {
        self.loading = true;
        self.active_filters = params;
        self.sequencer.issue()
    }

    /// 处理请求结果，过期票据的结果直接丢弃并返回 false
    pub fn finish_fetch(&mut self, ticket: RequestTicket, outcome: FetchOutcome) -> bool {
        if !self.sequencer.is_latest(ticket) {
            debug!("丢弃过期的响应，票据: {}", ticket.id());
            return false;
        }

        match outcome {
            FetchOutcome::Loaded(products) => {
                // 只有未过滤的结果才会更新滑块上限
                if self.active_filters.is_empty() && !products.is_empty() {
                    self.sidebar.set_ceiling(price_ceiling(&products));
                }
                self.products = products;
                self.failure = None;
            }
            FetchOutcome::Failed(failure) => {
                self.products.clear();
                self.failure = Some(failure);
            }
        }

        self.display.replace(&self.products);
        self.loading = false;
        true
    }

    /// 侧栏 Apply：提交草稿并开始请求
    pub fn apply_filters(&mut self) -> (RequestTicket, FilterParams) {
        let params = self.sidebar.apply();
        (self.begin_fetch(params), params)
    }

    /// 侧栏 Clear：重置并立即以空条件请求
    pub fn clear_filters(&mut self) -> (RequestTicket, FilterParams) {
        let params = self.sidebar.clear();
        (self.begin_fetch(params), params)
    }

    /// 外部传入的条件（查询串、命令行）先经过侧栏夹紧和对齐，再提交
    pub fn apply_requested(&mut self, requested: &FilterParams) -> (RequestTicket, FilterParams) {
        self.sidebar.load_draft(requested);
        self.apply_filters()
    }

    /// 发起一次请求并在返回后更新页面
    pub async fn refresh(&mut self, client: &ApiClient, params: FilterParams) -> bool {
        let ticket = self.begin_fetch(params);
        let outcome = client.get_products(&params).await;
        self.finish_fetch(ticket, outcome)
    }

    /// 先做一次未过滤加载确定价格上限，再按规范化后的条件请求
    ///
    /// 实际发送的条件可以通过 [`CatalogPage::active_filters`] 读取。
    pub async fn load(&mut self, client: &ApiClient, requested: FilterParams) -> bool {
        if !self.refresh(client, FilterParams::default()).await {
            return false;
        }
        if requested.is_empty() || self.failure.is_some() {
            return true;
        }

        let (ticket, params) = self.apply_requested(&requested);
        let outcome = client.get_products(&params).await;
        self.finish_fetch(ticket, outcome)
    }

    /// 例如 `3 products found`
    pub fn count_caption(&self) -> String {
        let count = self.products.len();
        let mut caption = format!("{} product{}", count, if count == 1 { "" } else { "s" });
        if self.has_active_filters() {
            caption.push_str(" found");
        }
        caption
    }

    /// 列表为空时展示的提示
    pub fn empty_message(&self) -> Option<String> {
        if !self.products.is_empty() {
            return None;
        }
        Some(match &self.failure {
            Some(failure) => format!("Failed to load products: {}", failure),
            None => EMPTY_RESULTS_MESSAGE.to_string(),
        })
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.count_caption());
        if self.has_active_filters() {
            let _ = writeln!(out, "Filters: {}", self.active_filters.summary_text());
        }
        match self.empty_message() {
            Some(message) => {
                let _ = writeln!(out, "{}", message);
            }
            None => out.push_str(&self.display.render_text()),
        }
        out
    }

    pub fn render_html(&self) -> Result<String, fmt::Error> {
        let mut out = String::new();
        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, r#"<html lang="en">"#)?;
        writeln!(out, "<head>")?;
        writeln!(out, r#"  <meta charset="UTF-8">"#)?;
        writeln!(
            out,
            r#"  <meta name="viewport" content="width=device-width, initial-scale=1.0">"#
        )?;
        writeln!(out, "  <title>Product List</title>")?;
        writeln!(out, "  <style>{}</style>", PAGE_STYLE)?;
        writeln!(out, "</head>")?;
        writeln!(out, "<body>")?;
        writeln!(out, "<main>")?;
        writeln!(out, "<h1>Product List</h1>")?;
        self.write_filter_form(&mut out)?;
        writeln!(out, r#"<p class="count">{}</p>"#, escape_html(&self.count_caption()))?;

        match self.empty_message() {
            Some(message) => {
                writeln!(out, r#"<div class="empty">"#)?;
                writeln!(out, "  <p>{}</p>", escape_html(&message))?;
                writeln!(out, r#"  <a class="button" href="/">Clear Filters</a>"#)?;
                writeln!(out, "</div>")?;
            }
            None => self.display.write_html(&mut out, &self.active_filters)?,
        }

        writeln!(out, "</main>")?;
        writeln!(out, "</body>")?;
        writeln!(out, "</html>")?;
        Ok(out)
    }

    fn write_filter_form(&self, out: &mut String) -> fmt::Result {
        let draft = self.sidebar.draft();
        let ceiling = self.sidebar.ceiling();

        writeln!(out, r#"<form class="filters" method="get" action="/">"#)?;
        writeln!(out, "  <h2>Filters</h2>")?;
        if self.has_active_filters() {
            writeln!(
                out,
                r#"  <p class="active">{}</p>"#,
                escape_html(&self.active_filters.summary_text())
            )?;
        }
        writeln!(out, "  <h3>Price Range</h3>")?;
        writeln!(
            out,
            r#"  <label>Minimum <input type="range" name="minPrice" min="0" max="{}" step="{}" value="{}"></label>"#,
            ceiling, PRICE_STEP, draft.min_price
        )?;
        writeln!(
            out,
            r#"  <label>Maximum <input type="range" name="maxPrice" min="0" max="{}" step="{}" value="{}"></label>"#,
            ceiling, PRICE_STEP, draft.max_price
        )?;
        writeln!(out, "  <h3>Minimum Rating</h3>")?;
        writeln!(
            out,
            r#"  <label>{:.1} <input type="range" name="minRating" min="0" max="{}" step="{}" value="{}"></label>"#,
            draft.min_rating, MAX_RATING, RATING_STEP, draft.min_rating
        )?;
        writeln!(out, r#"  <button type="submit">Apply Filters</button>"#)?;
        if self.has_active_filters() {
            writeln!(out, r#"  <a class="button" href="/">Clear</a>"#)?;
        }
        writeln!(out, "</form>")
    }
}

const PAGE_STYLE: &str = "body { font-family: Arial, sans-serif; background: #f9fafb; margin: 0; } \
main { max-width: 1440px; margin: 0 auto; padding: 48px 16px; } \
h1 { text-align: center; font-size: 32px; } \
.filters { background: #fff; border: 1px solid #ddd; border-radius: 8px; padding: 16px; margin-bottom: 24px; } \
.product-strip { display: flex; gap: 32px; overflow-x: auto; } \
.product-card { background: #fff; padding: 16px; min-width: 260px; } \
.product-card img { width: 100%; aspect-ratio: 1; object-fit: contain; } \
.swatch { display: inline-block; width: 16px; height: 16px; border-radius: 50%; border: 1px solid #e5e7eb; } \
.swatch.selected { border-color: #9ca3af; } \
.empty { text-align: center; padding: 48px 0; }";
