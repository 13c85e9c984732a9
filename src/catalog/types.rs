//! Product catalog data model
//!
//! Immutable snapshot types as served by the upstream catalog API.
//! The query pipeline never mutates these.

use serde::{Deserialize, Serialize};

/// Aggregate customer rating for a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average rating in [0, 5]
    pub rate: f32,
    /// Number of ratings
    pub count: u32,
}

/// A single catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog-assigned product id
    pub id: u64,
    /// Display title
    pub title: String,
    /// Long-form description
    pub description: String,
    /// Category name (free-form, matched case-insensitively)
    pub category: String,
    /// Unit price, non-negative
    pub price: f64,
    /// Aggregate rating
    pub rating: Rating,
    /// Image URL
    pub image: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserialization() {
        let json = r#"{
            "id": 1,
            "title": "Fjallraven Backpack",
            "price": 109.95,
            "description": "Fits 15 inch laptops",
            "category": "men's clothing",
            "image": "https://example.com/backpack.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(product.title, "Fjallraven Backpack");
        assert_eq!(product.category, "men's clothing");
        assert_eq!(product.rating.count, 120);
    }

    #[test]
    fn test_product_roundtrip() {
        let product = Product {
            id: 7,
            title: "Gold Chain".to_string(),
            description: "Plated bracelet".to_string(),
            category: "jewelery".to_string(),
            price: 168.0,
            rating: Rating {
                rate: 4.1,
                count: 70,
            },
            image: "https://example.com/chain.jpg".to_string(),
        };

        let json = serde_json::to_string(&product).unwrap();
        let back: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(back, product);
    }
}
