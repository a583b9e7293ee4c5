//! 商品目录业务服务

use super::filter::filter_products;
use super::model::{FilterCriteria, Product};
use super::store::ProductStore;

#[derive(Clone)]
pub struct CatalogService {
    store: ProductStore,
}

impl CatalogService {
    pub fn new(store: ProductStore) -> Self {
        Self { store }
    }

    /// 条件为空时返回全集，否则交给过滤引擎
    pub fn list_products(&self, criteria: &FilterCriteria) -> Vec<Product> {
        if criteria.is_empty() {
            return self.store.all().to_vec();
        }

        filter_products(self.store.all(), criteria)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn all(&self) -> &[Product] {
        self.store.all()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
