#![allow(dead_code)]

use gold_catalog::{Product, ProductImages, ProductStore};

pub fn product(name: &str, price: f64, rating: f64) -> Product {
    Product {
        name: name.to_string(),
        popularity_score: 0.8,
        weight: 2.5,
        price,
        rating,
        images: ProductImages {
            yellow: format!("https://cdn.test/{}-Y.jpg", name),
            rose: format!("https://cdn.test/{}-R.jpg", name),
            white: format!("https://cdn.test/{}-W.jpg", name),
        },
    }
}

/// 三个商品：(100, 4.5)、(50, 3.0)、(200, 5.0)
pub fn sample_store() -> ProductStore {
    ProductStore::from_products(vec![
        product("Ring One", 100.0, 4.5),
        product("Ring Two", 50.0, 3.0),
        product("Ring Three", 200.0, 5.0),
    ])
    .unwrap()
}

pub fn names(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.name.as_str()).collect()
}
