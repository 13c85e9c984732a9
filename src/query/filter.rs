//! Composable catalog filtering and sorting
//!
//! Pure functions over product slices. Each filter field is independently
//! skippable; the three retain predicates commute, only the final sort is
//! order-sensitive. All sorts are stable so equal keys keep input order.

use crate::catalog::types::Product;
use crate::errors::{Result, SearchError};
use serde::{Deserialize, Serialize};

/// Result ordering applied after filtering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum SortOption {
    /// Catalog order (substring matching assigns no scores)
    #[default]
    Relevance,
    /// Ascending by price
    PriceLowToHigh,
    /// Descending by price
    PriceHighToLow,
    /// Descending by average rating, ties keep input order
    Rating,
    /// Catalog order; products carry no timestamp to sort by
    Newest,
}

impl std::fmt::Display for SortOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Matches the CLI value names
        let name = match self {
            SortOption::Relevance => "relevance",
            SortOption::PriceLowToHigh => "price-low-to-high",
            SortOption::PriceHighToLow => "price-high-to-low",
            SortOption::Rating => "rating",
            SortOption::Newest => "newest",
        };
        f.write_str(name)
    }
}

/// Composable search filter descriptor
///
/// All fields default to unset. Out-of-order price bounds are not rejected;
/// they simply reduce the result set (possibly to empty). `validate` is
/// available for callers that prefer an up-front error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilter {
    /// Category restriction (applied via `by_category`, not the pipeline)
    pub category: Option<String>,
    /// Keep products priced at or above this bound
    pub min_price: Option<f64>,
    /// Keep products priced at or below this bound
    pub max_price: Option<f64>,
    /// Keep products rated at or above this bound, in [0, 5]
    pub rating: Option<f32>,
    /// Final ordering
    pub sort_by: SortOption,
}

impl SearchFilter {
    /// Check that price bounds are ordered
    pub fn validate(&self) -> Result<()> {
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(SearchError::InvalidFilterRange { min, max });
            }
        }
        Ok(())
    }
}

/// Apply filter predicates, then sort
///
/// Pure: the input slice is untouched. With an all-default filter this is
/// the identity (original order preserved).
pub fn filter_and_sort(products: &[Product], filter: &SearchFilter) -> Vec<Product> {
    let mut filtered: Vec<Product> = products
        .iter()
        .filter(|p| filter.min_price.map_or(true, |min| p.price >= min))
        .filter(|p| filter.max_price.map_or(true, |max| p.price <= max))
        .filter(|p| filter.rating.map_or(true, |min| p.rating.rate >= min))
        .cloned()
        .collect();

    match filter.sort_by {
        SortOption::PriceLowToHigh => {
            filtered.sort_by(|a, b| a.price.total_cmp(&b.price));
        }
        SortOption::PriceHighToLow => {
            filtered.sort_by(|a, b| b.price.total_cmp(&a.price));
        }
        SortOption::Rating => {
            filtered.sort_by(|a, b| b.rating.rate.total_cmp(&a.rating.rate));
        }
        SortOption::Relevance | SortOption::Newest => {}
    }

    filtered
}

/// Case-insensitive exact category match
///
/// Empty category or no match yields an empty vec, never an error.
pub fn by_category(products: &[Product], category: &str) -> Vec<Product> {
    if category.is_empty() {
        return Vec::new();
    }

    products
        .iter()
        .filter(|p| p.category.eq_ignore_ascii_case(category))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::Rating;
    use quickcheck_macros::quickcheck;

    fn product(id: u64, price: f64, rate: f32) -> Product {
        Product {
            id,
            title: format!("Product {}", id),
            description: String::new(),
            category: "electronics".to_string(),
            price,
            rating: Rating { rate, count: 10 },
            image: String::new(),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, 109.95, 3.9),
            product(2, 22.3, 4.1),
            product(3, 55.99, 4.7),
            product(4, 22.3, 2.1),
            product(5, 695.0, 4.6),
        ]
    }

    #[test]
    fn test_default_filter_is_identity() {
        let input = catalog();
        let output = filter_and_sort(&input, &SearchFilter::default());
        assert_eq!(output, input);
    }

    #[test]
    fn test_min_price_retains_only_matching() {
        let filter = SearchFilter {
            min_price: Some(50.0),
            ..Default::default()
        };
        let output = filter_and_sort(&catalog(), &filter);
        assert!(output.iter().all(|p| p.price >= 50.0));
        assert_eq!(
            output.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![1, 3, 5]
        );
    }

    #[test]
    fn test_max_price_and_rating_combined() {
        let filter = SearchFilter {
            max_price: Some(100.0),
            rating: Some(4.0),
            ..Default::default()
        };
        let output = filter_and_sort(&catalog(), &filter);
        assert_eq!(output.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_price_sorts_reverse_each_other() {
        let input = catalog();

        let asc = filter_and_sort(
            &input,
            &SearchFilter {
                sort_by: SortOption::PriceLowToHigh,
                ..Default::default()
            },
        );
        let desc = filter_and_sort(
            &input,
            &SearchFilter {
                sort_by: SortOption::PriceHighToLow,
                ..Default::default()
            },
        );

        // Ascending: equal-price products 2 and 4 keep input order
        assert_eq!(asc.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2, 4, 3, 1, 5]);
        // Descending is stable too, so the 22.3 pair stays 2 before 4
        assert_eq!(desc.iter().map(|p| p.id).collect::<Vec<_>>(), vec![5, 1, 3, 2, 4]);
    }

    #[test]
    fn test_rating_sort_descending_stable() {
        let input = vec![product(1, 10.0, 4.0), product(2, 20.0, 4.5), product(3, 30.0, 4.0)];
        let output = filter_and_sort(
            &input,
            &SearchFilter {
                sort_by: SortOption::Rating,
                ..Default::default()
            },
        );
        assert_eq!(output.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2, 1, 3]);
    }

    #[test]
    fn test_newest_preserves_input_order() {
        let input = catalog();
        let output = filter_and_sort(
            &input,
            &SearchFilter {
                sort_by: SortOption::Newest,
                ..Default::default()
            },
        );
        assert_eq!(output, input);
    }

    #[test]
    fn test_out_of_order_bounds_yield_empty_not_error() {
        let filter = SearchFilter {
            min_price: Some(500.0),
            max_price: Some(100.0),
            ..Default::default()
        };
        let output = filter_and_sort(&catalog(), &filter);
        assert!(output.is_empty());
    }

    #[test]
    fn test_validate_rejects_out_of_order_bounds() {
        let filter = SearchFilter {
            min_price: Some(500.0),
            max_price: Some(100.0),
            ..Default::default()
        };
        assert!(matches!(
            filter.validate(),
            Err(SearchError::InvalidFilterRange { .. })
        ));
        assert!(SearchFilter::default().validate().is_ok());
    }

    #[test]
    fn test_by_category_case_insensitive() {
        let output = by_category(&catalog(), "Electronics");
        assert_eq!(output.len(), 5);
    }

    #[test]
    fn test_by_category_no_match_is_empty() {
        assert!(by_category(&catalog(), "nonexistent").is_empty());
        assert!(by_category(&catalog(), "").is_empty());
    }

    #[quickcheck]
    fn prop_min_price_keeps_exactly_matching(prices: Vec<u32>, min: u32) -> bool {
        let input: Vec<Product> = prices
            .iter()
            .enumerate()
            .map(|(i, &p)| product(i as u64, f64::from(p), 3.0))
            .collect();
        let filter = SearchFilter {
            min_price: Some(f64::from(min)),
            ..Default::default()
        };

        let output = filter_and_sort(&input, &filter);
        let expected = input.iter().filter(|p| p.price >= f64::from(min)).count();

        output.len() == expected && output.iter().all(|p| p.price >= f64::from(min))
    }
}
