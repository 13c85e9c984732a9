//! Error types for the storefront search core
//!
//! Library errors are explicit variants so callers can match on them;
//! the CLI binary wraps them with anyhow for display.

use thiserror::Error;

/// Main error type for the search core
#[derive(Error, Debug)]
pub enum SearchError {
    /// Upstream catalog fetch failed (network or decode error)
    #[error("Catalog unavailable: {reason}")]
    CatalogUnavailable { reason: String },

    /// Price bounds out of order. The filter pipeline never raises this
    /// itself (out-of-order bounds simply reduce the result set); it exists
    /// for callers that opt into up-front validation.
    #[error("Invalid filter range: min price {min} exceeds max price {max}")]
    InvalidFilterRange { min: f64, max: f64 },

    /// Backend rejected a concurrent write to a recency category
    #[error("Write conflict on recency category '{category}'")]
    StoreWriteConflict { category: String },

    /// Recency category not registered with the store
    #[error("Unknown recency category '{category}'")]
    UnknownCategory { category: String },

    /// Illegal session state transition
    #[error("Invalid session transition from {from} on {event}")]
    InvalidTransition { from: String, event: String },

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for search core operations
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SearchError::InvalidFilterRange {
            min: 50.0,
            max: 10.0,
        };
        assert!(err.to_string().contains("50"));
        assert!(err.to_string().contains("10"));
    }

    #[test]
    fn test_catalog_unavailable_display() {
        let err = SearchError::CatalogUnavailable {
            reason: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_write_conflict_display() {
        let err = SearchError::StoreWriteConflict {
            category: "search_history".to_string(),
        };
        assert!(err.to_string().contains("search_history"));
    }
}
