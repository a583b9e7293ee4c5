//! 商品目录数据模型

use serde::{Deserialize, Serialize};
use std::fmt;

/// 商品记录，在进程生命周期内只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    pub popularity_score: f64,
    pub weight: f64,
    pub price: f64,
    pub rating: f64,
    pub images: ProductImages,
}

/// 三种金色款式对应的图片地址
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImages {
    pub yellow: String,
    pub rose: String,
    pub white: String,
}

impl ProductImages {
    pub fn get(&self, color: GoldColor) -> &str {
        match color {
            GoldColor::Yellow => &self.yellow,
            GoldColor::Rose => &self.rose,
            GoldColor::White => &self.white,
        }
    }
}

/// 金色款式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoldColor {
    #[default]
    Yellow,
    Rose,
    White,
}

impl GoldColor {
    pub const ALL: [GoldColor; 3] = [GoldColor::Yellow, GoldColor::Rose, GoldColor::White];

    pub fn label(self) -> &'static str {
        match self {
            GoldColor::Yellow => "Yellow Gold",
            GoldColor::Rose => "Rose Gold",
            GoldColor::White => "White Gold",
        }
    }

    /// 色块颜色
    pub fn swatch(self) -> &'static str {
        match self {
            GoldColor::Yellow => "#F6ECA9",
            GoldColor::Rose => "#E1A69F",
            GoldColor::White => "#D9D9D9",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GoldColor::Yellow => "yellow",
            GoldColor::Rose => "rose",
            GoldColor::White => "white",
        }
    }
}

impl fmt::Display for GoldColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GoldColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yellow" => Ok(GoldColor::Yellow),
            "rose" => Ok(GoldColor::Rose),
            "white" => Ok(GoldColor::White),
            other => Err(format!("未知的金色款式: {}", other)),
        }
    }
}

/// 单次请求的过滤条件，各维度都是闭区间且相互独立
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterCriteria {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_price(mut self, value: f64) -> Self {
        self.min_price = Some(value);
        self
    }

    pub fn with_max_price(mut self, value: f64) -> Self {
        self.max_price = Some(value);
        self
    }

    pub fn with_min_rating(mut self, value: f64) -> Self {
        self.min_rating = Some(value);
        self
    }

    /// 没有任何约束
    pub fn is_empty(&self) -> bool {
        self.min_price.is_none() && self.max_price.is_none() && self.min_rating.is_none()
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.min_price.map_or(true, |min| product.price >= min)
            && self.max_price.map_or(true, |max| product.price <= max)
            && self.min_rating.map_or(true, |min| product.rating >= min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> Product {
        Product {
            name: "Engagement Ring 1".to_string(),
            popularity_score: 0.85,
            weight: 2.1,
            price: 412.5,
            rating: 4.3,
            images: ProductImages {
                yellow: "/img/ring-y.jpg".to_string(),
                rose: "/img/ring-r.jpg".to_string(),
                white: "/img/ring-w.jpg".to_string(),
            },
        }
    }

    #[test]
    fn product_uses_camel_case_fields() {
        let value = serde_json::to_value(ring()).unwrap();
        assert_eq!(value["popularityScore"], 0.85);
        assert_eq!(value["images"]["rose"], "/img/ring-r.jpg");
        assert!(value.get("popularity_score").is_none());
    }

    #[test]
    fn images_select_by_color() {
        let product = ring();
        assert_eq!(product.images.get(GoldColor::Yellow), "/img/ring-y.jpg");
        assert_eq!(product.images.get(GoldColor::White), "/img/ring-w.jpg");
    }

    #[test]
    fn gold_color_parses_case_insensitively() {
        assert_eq!("Rose".parse::<GoldColor>(), Ok(GoldColor::Rose));
        assert!("platinum".parse::<GoldColor>().is_err());
        assert_eq!(GoldColor::default(), GoldColor::Yellow);
    }

    #[test]
    fn criteria_bounds_are_inclusive() {
        let product = ring();
        assert!(FilterCriteria::new().with_min_price(412.5).matches(&product));
        assert!(FilterCriteria::new().with_max_price(412.5).matches(&product));
        assert!(FilterCriteria::new().with_min_rating(4.3).matches(&product));
        assert!(!FilterCriteria::new().with_min_rating(4.35).matches(&product));
        assert!(FilterCriteria::new().is_empty());
    }
}
