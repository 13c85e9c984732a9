//! Catalog source collaborators
//!
//! The query engine fetches product snapshots through the `CatalogSource`
//! trait. The HTTP implementation talks to a fakestore-style JSON API;
//! `StaticCatalogSource` serves a fixed snapshot for offline use and tests.

use crate::catalog::types::Product;
use crate::errors::{Result, SearchError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Supplier of product catalog snapshots
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the full catalog.
    ///
    /// Fails with `SearchError::CatalogUnavailable` when the upstream
    /// source cannot be reached or returns malformed data.
    async fn get_products(&self) -> Result<Vec<Product>>;
}

/// HTTP client for a fakestore-style catalog API
pub struct HttpCatalogSource {
    client: Client,
    base_url: String,
}

impl HttpCatalogSource {
    /// Create a new HTTP catalog source
    ///
    /// # Arguments
    /// * `base_url` - API base URL, e.g. `https://fakestoreapi.com`
    /// * `timeout_secs` - per-request timeout
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL this source is pointed at
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn get_products(&self) -> Result<Vec<Product>> {
        let url = format!("{}/products", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SearchError::CatalogUnavailable {
                reason: format!("request to {} failed: {}", url, e),
            })?;

        if !response.status().is_success() {
            return Err(SearchError::CatalogUnavailable {
                reason: format!("catalog API returned {}", response.status()),
            });
        }

        let products: Vec<Product> =
            response
                .json()
                .await
                .map_err(|e| SearchError::CatalogUnavailable {
                    reason: format!("failed to decode catalog response: {}", e),
                })?;

        Ok(products)
    }
}

/// In-memory catalog source serving a fixed snapshot
pub struct StaticCatalogSource {
    products: Vec<Product>,
}

impl StaticCatalogSource {
    /// Create a source that always serves the given snapshot
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn get_products(&self) -> Result<Vec<Product>> {
        Ok(self.products.clone())
    }
}
