//! Product catalog: data model and snapshot sources
//!
//! Components:
//! - Types: immutable `Product` / `Rating` snapshot model
//! - Sources: `CatalogSource` trait with HTTP and static implementations

pub mod source;
pub mod types;

pub use source::{CatalogSource, HttpCatalogSource, StaticCatalogSource};
pub use types::{Product, Rating};
