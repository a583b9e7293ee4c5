//! 商品存储
//!
//! 进程启动时加载一次，之后只读共享，请求之间不需要加锁。

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use super::model::Product;
use crate::{CatalogError, Result};

/// 内置数据集
const EMBEDDED_PRODUCTS: &str = include_str!("../../../data/products.json");

#[derive(Debug, Clone)]
pub struct ProductStore {
    products: Arc<[Product]>,
}

impl ProductStore {
    /// 校验并包装一组商品
    pub fn from_products(products: Vec<Product>) -> Result<Self> {
        validate(&products)?;
        Ok(Self {
            products: products.into(),
        })
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let products: Vec<Product> =
            serde_json::from_str(content).map_err(|e| CatalogError::DatasetParse(e.to_string()))?;
        Self::from_products(products)
    }

    /// 使用编译期嵌入的数据集
    pub fn embedded() -> Result<Self> {
        Self::from_json_str(EMBEDDED_PRODUCTS)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| CatalogError::DatasetRead(format!("{}: {}", path.display(), e)))?;
        let store = Self::from_json_str(&content)?;
        info!("从 {} 加载了 {} 个商品", path.display(), store.len());
        Ok(store)
    }

    /// 有配置路径时从文件加载，否则使用内置数据集
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => {
                let store = Self::embedded()?;
                info!("使用内置数据集，共 {} 个商品", store.len());
                Ok(store)
            }
        }
    }

    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// 全集中的最高价格
    pub fn max_price(&self) -> Option<f64> {
        self.products.iter().map(|p| p.price).reduce(f64::max)
    }
}

fn validate(products: &[Product]) -> Result<()> {
    let mut names = HashSet::with_capacity(products.len());

    for product in products {
        if product.name.trim().is_empty() {
            return Err(CatalogError::InvalidDataset("商品名称不能为空".to_string()));
        }
        if !names.insert(product.name.as_str()) {
            return Err(CatalogError::InvalidDataset(format!(
                "商品名称重复: {}",
                product.name
            )));
        }
        if !product.price.is_finite() || product.price < 0.0 {
            return Err(CatalogError::InvalidDataset(format!(
                "商品 {} 的价格无效: {}",
                product.name, product.price
            )));
        }
        if !product.rating.is_finite() || !(0.0..=5.0).contains(&product.rating) {
            return Err(CatalogError::InvalidDataset(format!(
                "商品 {} 的评分超出 [0, 5]: {}",
                product.name, product.rating
            )));
        }
    }

    Ok(())
}
