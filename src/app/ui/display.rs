//! 商品卡片展示
//!
//! 每张卡片独立选择金色款式，选择不在卡片之间共享，换一批结果时重置。
//! 服务端页面用 `color.<商品名>=<款式>` 查询参数记录每张卡片的选择。

use std::fmt::{self, Write};

use url::form_urlencoded;

use crate::app::catalog::model::{GoldColor, Product};
use crate::app::client::FilterParams;

/// 卡片款式选择的查询参数前缀
pub const COLOR_KEY_PREFIX: &str = "color.";

#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    product: Product,
    selected: GoldColor,
}

impl ProductCard {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            selected: GoldColor::default(),
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn selected_color(&self) -> GoldColor {
        self.selected
    }

    pub fn select_color(&mut self, color: GoldColor) {
        self.selected = color;
    }

    pub fn image_url(&self) -> &str {
        self.product.images.get(self.selected)
    }

    pub fn price_text(&self) -> String {
        format!("${:.2} USD", self.product.price)
    }

    pub fn rating_text(&self) -> String {
        format!("{:.1}", self.product.rating)
    }

    /// 五颗星，按四舍五入后的评分点亮
    pub fn stars(&self) -> String {
        let lit = self.product.rating.round().clamp(0.0, 5.0) as usize;
        (0..5).map(|i| if i < lit { '★' } else { '☆' }).collect()
    }

    fn write_html<F>(&self, out: &mut String, link: F) -> fmt::Result
    where
        F: Fn(GoldColor) -> String,
    {
        let name = escape_html(&self.product.name);
        writeln!(out, r#"<div class="product-card" data-name="{}">"#, name)?;
        writeln!(
            out,
            r#"  <img src="{}" alt="{}" data-color="{}">"#,
            escape_html(self.image_url()),
            name,
            self.selected
        )?;
        writeln!(out, "  <h3>{}</h3>", name)?;
        writeln!(
            out,
            r#"  <div class="rating"><span class="stars">{}</span> <span>{}</span></div>"#,
            self.stars(),
            self.rating_text()
        )?;
        writeln!(out, r#"  <div class="price">{}</div>"#, self.price_text())?;
        writeln!(
            out,
            r#"  <div class="colors"><span>{}</span>"#,
            self.selected.label()
        )?;
        for color in GoldColor::ALL {
            let pressed = color == self.selected;
            writeln!(
                out,
                r#"    <a class="swatch{}" href="{}" title="{}" aria-label="{}" aria-pressed="{}" style="background:{}"></a>"#,
                if pressed { " selected" } else { "" },
                escape_html(&link(color)),
                color.label(),
                color.label(),
                pressed,
                color.swatch()
            )?;
        }
        writeln!(out, "  </div>")?;
        writeln!(out, "</div>")
    }
}

#[derive(Debug, Clone, Default)]
pub struct CatalogDisplay {
    cards: Vec<ProductCard>,
}

impl CatalogDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// 换成新的结果集，所有卡片回到默认款式
    pub fn replace(&mut self, products: &[Product]) {
        self.cards = products.iter().cloned().map(ProductCard::new).collect();
    }

    pub fn cards(&self) -> &[ProductCard] {
        &self.cards
    }

    pub fn card(&self, name: &str) -> Option<&ProductCard> {
        self.cards.iter().find(|c| c.product.name == name)
    }

    /// 按商品名选择款式，找不到商品时返回 false
    pub fn select_color(&mut self, name: &str, color: GoldColor) -> bool {
        match self.cards.iter_mut().find(|c| c.product.name == name) {
            Some(card) => {
                card.select_color(color);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// 从查询参数中读取 `color.<商品名>` 选择，无法识别的款式忽略
    pub fn apply_color_choices<'a, I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (key, value) in pairs {
            let Some(name) = key.strip_prefix(COLOR_KEY_PREFIX) else {
                continue;
            };
            if let Ok(color) = value.parse::<GoldColor>() {
                self.select_color(name, color);
            }
        }
    }

    /// 切换某张卡片款式的页面链接，保留过滤条件和其他卡片的选择
    pub fn color_link(&self, filters: &FilterParams, name: &str, color: GoldColor) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        for (key, value) in filters.pairs() {
            query.append_pair(key, &value.to_string());
        }
        for card in &self.cards {
            let chosen = if card.product.name == name {
                color
            } else {
                card.selected
            };
            if chosen != GoldColor::default() {
                query.append_pair(
                    &format!("{}{}", COLOR_KEY_PREFIX, card.product.name),
                    chosen.as_str(),
                );
            }
        }

        let query = query.finish();
        if query.is_empty() {
            "/".to_string()
        } else {
            format!("/?{}", query)
        }
    }

    /// 横向滚动的卡片条
    pub fn write_html(&self, out: &mut String, filters: &FilterParams) -> fmt::Result {
        writeln!(out, r#"<div class="product-strip">"#)?;
        for card in &self.cards {
            card.write_html(out, |color| {
                self.color_link(filters, &card.product.name, color)
            })?;
        }
        writeln!(out, "</div>")
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for card in &self.cards {
            let _ = writeln!(
                out,
                "{:<24} {} {:>4}  {:>14}  [{}] {}",
                card.product.name,
                card.stars(),
                card.rating_text(),
                card.price_text(),
                card.selected.label(),
                card.image_url()
            );
        }
        out
    }
}

pub(crate) fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
