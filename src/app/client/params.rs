//! 客户端过滤参数与查询串构造

use serde::{Deserialize, Serialize};

use crate::app::catalog::model::FilterCriteria;

/// 发送给 API 的过滤参数，未设置的字段不会出现在查询串中
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
}

impl FilterParams {
    pub fn is_empty(&self) -> bool {
        self.pairs().is_empty()
    }

    /// 已设置且为有限数值的参数，顺序固定为 minPrice、maxPrice、minRating
    pub fn pairs(&self) -> Vec<(&'static str, f64)> {
        [
            ("minPrice", self.min_price),
            ("maxPrice", self.max_price),
            ("minRating", self.min_rating),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.filter(|v| v.is_finite()).map(|v| (key, v)))
        .collect()
    }

    /// 构造查询串（不含 `?`），没有参数时返回空串
    pub fn to_query_string(&self) -> String {
        self.pairs()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// 条件摘要，例如 `Min: $100, Max: $500, 3.5★+`
    pub fn summary_text(&self) -> String {
        self.pairs()
            .into_iter()
            .map(|(key, value)| match key {
                "minPrice" => format!("Min: ${}", value),
                "maxPrice" => format!("Max: ${}", value),
                _ => format!("{}★+", value),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl From<FilterParams> for FilterCriteria {
    fn from(params: FilterParams) -> Self {
        let finite = |v: Option<f64>| v.filter(|v| v.is_finite());
        FilterCriteria {
            min_price: finite(params.min_price),
            max_price: finite(params.max_price),
            min_rating: finite(params.min_rating),
        }
    }
}

impl From<FilterCriteria> for FilterParams {
    fn from(criteria: FilterCriteria) -> Self {
        FilterParams {
            min_price: criteria.min_price,
            max_price: criteria.max_price,
            min_rating: criteria.min_rating,
        }
    }
}
