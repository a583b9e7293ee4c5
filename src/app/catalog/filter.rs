//! 商品过滤引擎
//!
//! 单次线性扫描，结果保持原有顺序，不修改输入也不缓存。

use super::model::{FilterCriteria, Product};

/// 返回满足全部约束的商品，顺序与输入一致
///
/// 条件为空时等价于返回全集。
pub fn filter_products<'a>(products: &'a [Product], criteria: &FilterCriteria) -> Vec<&'a Product> {
    if criteria.is_empty() {
        return products.iter().collect();
    }

    products
        .iter()
        .filter(|product| criteria.matches(product))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::catalog::model::ProductImages;

    fn product(name: &str, price: f64, rating: f64) -> Product {
        Product {
            name: name.to_string(),
            popularity_score: 0.5,
            weight: 1.0,
            price,
            rating,
            images: ProductImages {
                yellow: format!("/{}-yellow.jpg", name),
                rose: format!("/{}-rose.jpg", name),
                white: format!("/{}-white.jpg", name),
            },
        }
    }

    fn sample() -> Vec<Product> {
        vec![
            product("p1", 100.0, 4.5),
            product("p2", 50.0, 3.0),
            product("p3", 200.0, 5.0),
        ]
    }

    fn names(result: &[&Product]) -> Vec<String> {
        result.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn empty_criteria_is_identity() {
        let products = sample();
        let result = filter_products(&products, &FilterCriteria::default());
        assert_eq!(names(&result), vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn min_price_keeps_order() {
        let products = sample();
        let result = filter_products(&products, &FilterCriteria::new().with_min_price(60.0));
        assert_eq!(names(&result), vec!["p1", "p3"]);
    }

    #[test]
    fn min_rating_threshold() {
        let products = sample();
        let result = filter_products(&products, &FilterCriteria::new().with_min_rating(4.5));
        assert_eq!(names(&result), vec!["p1", "p3"]);
    }

    #[test]
    fn min_price_above_everything_is_empty() {
        let products = sample();
        let result = filter_products(&products, &FilterCriteria::new().with_min_price(300.0));
        assert!(result.is_empty());
    }

    #[test]
    fn max_price_is_inclusive() {
        let products = sample();
        let result = filter_products(&products, &FilterCriteria::new().with_max_price(100.0));
        assert_eq!(names(&result), vec!["p1", "p2"]);
    }

    #[test]
    fn combined_constraints_equal_intersection() {
        let products = vec![
            product("a", 10.0, 1.0),
            product("b", 120.0, 4.0),
            product("c", 480.0, 4.8),
            product("d", 90.0, 4.9),
            product("e", 300.0, 2.5),
            product("f", 250.0, 4.0),
        ];
        let combined = FilterCriteria::new()
            .with_min_price(90.0)
            .with_max_price(300.0)
            .with_min_rating(4.0);

        let expected: Vec<String> = products
            .iter()
            .filter(|p| {
                let by_min = filter_products(&products, &FilterCriteria::new().with_min_price(90.0));
                let by_max = filter_products(&products, &FilterCriteria::new().with_max_price(300.0));
                let by_rating =
                    filter_products(&products, &FilterCriteria::new().with_min_rating(4.0));
                [by_min, by_max, by_rating]
                    .iter()
                    .all(|set| set.iter().any(|q| q.name == p.name))
            })
            .map(|p| p.name.clone())
            .collect();

        let result = filter_products(&products, &combined);
        assert_eq!(names(&result), expected);
        assert_eq!(names(&result), vec!["b", "d", "f"]);
    }

    #[test]
    fn input_is_left_untouched() {
        let products = sample();
        let before = products.clone();
        let _ = filter_products(&products, &FilterCriteria::new().with_max_price(10.0));
        assert_eq!(products, before);
    }
}
