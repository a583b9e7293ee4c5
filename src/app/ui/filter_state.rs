//! 过滤侧栏状态
//!
//! 两阶段状态机：滑块修改的是草稿 (Draft)，只有显式的 Apply / Clear
//! 才会把草稿提交为已应用 (Applied) 的过滤参数。

use crate::app::catalog::model::Product;
use crate::app::client::FilterParams;

/// 商品为空时的价格上限
pub const DEFAULT_PRICE_CEILING: f64 = 1000.0;
/// 价格滑块步长
pub const PRICE_STEP: f64 = 10.0;
/// 评分滑块步长
pub const RATING_STEP: f64 = 0.5;
pub const MAX_RATING: f64 = 5.0;

/// 价格滑块上限：最高价向上取整到 100 的倍数
pub fn price_ceiling(products: &[Product]) -> f64 {
    products
        .iter()
        .map(|p| p.price)
        .filter(|p| p.is_finite())
        .reduce(f64::max)
        .map(|max| (max / 100.0).ceil() * 100.0)
        .unwrap_or(DEFAULT_PRICE_CEILING)
}

/// 侧栏中尚未提交的取值
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterDraft {
    pub min_price: f64,
    pub max_price: f64,
    pub min_rating: f64,
}

impl FilterDraft {
    fn defaults(ceiling: f64) -> Self {
        Self {
            min_price: 0.0,
            max_price: ceiling,
            min_rating: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilterSidebar {
    ceiling: f64,
    draft: FilterDraft,
    applied: FilterParams,
    open: bool,
}

impl Default for FilterSidebar {
    fn default() -> Self {
        Self::new(DEFAULT_PRICE_CEILING)
    }
}

impl FilterSidebar {
    pub fn new(ceiling: f64) -> Self {
        let ceiling = sanitize_ceiling(ceiling);
        Self {
            ceiling,
            draft: FilterDraft::defaults(ceiling),
            applied: FilterParams::default(),
            open: false,
        }
    }

    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    pub fn draft(&self) -> FilterDraft {
        self.draft
    }

    pub fn applied(&self) -> FilterParams {
        self.applied
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// 更新价格上限，草稿中的最大价格跟随新上限，最小价格重新夹紧
    pub fn set_ceiling(&mut self, ceiling: f64) {
        self.ceiling = sanitize_ceiling(ceiling);
        self.draft.max_price = self.ceiling;
        self.draft.min_price = self.draft.min_price.clamp(0.0, self.ceiling);
    }

    pub fn set_min_price(&mut self, value: f64) {
        self.draft.min_price = clamp_or(value, 0.0, self.ceiling, 0.0);
    }

    pub fn set_max_price(&mut self, value: f64) {
        self.draft.max_price = clamp_or(value, 0.0, self.ceiling, self.ceiling);
    }

    /// 评分夹紧到 [0, 5] 并对齐到 0.5
    pub fn set_min_rating(&mut self, value: f64) {
        let snapped = (value / RATING_STEP).round() * RATING_STEP;
        self.draft.min_rating = clamp_or(snapped, 0.0, MAX_RATING, 0.0);
    }

    /// 用已有参数填充草稿，未设置的维度回到默认值
    pub fn load_draft(&mut self, params: &FilterParams) {
        self.draft = FilterDraft::defaults(self.ceiling);
        if let Some(min) = params.min_price {
            self.set_min_price(min);
        }
        if let Some(max) = params.max_price {
            self.set_max_price(max);
        }
        if let Some(rating) = params.min_rating {
            self.set_min_rating(rating);
        }
    }

    /// 提交草稿：只包含与默认值不同的维度，提交后关闭侧栏
    pub fn apply(&mut self) -> FilterParams {
        let draft = self.draft;
        let params = FilterParams {
            min_price: (draft.min_price > 0.0).then_some(draft.min_price),
            max_price: (draft.max_price < self.ceiling).then_some(draft.max_price),
            min_rating: (draft.min_rating > 0.0).then_some(draft.min_rating),
        };

        self.applied = params;
        self.open = false;
        params
    }

    /// 重置草稿并立即应用空参数
    pub fn clear(&mut self) -> FilterParams {
        self.draft = FilterDraft::defaults(self.ceiling);
        self.applied = FilterParams::default();
        self.applied
    }

    pub fn has_active_filters(&self) -> bool {
        !self.applied.is_empty()
    }

    /// 已应用条件的摘要，例如 `Min: $100, Max: $500, 3.5★+`
    pub fn active_filters_text(&self) -> String {
        self.applied.summary_text()
    }
}

fn sanitize_ceiling(ceiling: f64) -> f64 {
    if ceiling.is_finite() && ceiling > 0.0 {
        ceiling
    } else {
        DEFAULT_PRICE_CEILING
    }
}

fn clamp_or(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}
