//! Command-line argument parsing for the shopsearch CLI
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use crate::query::filter::{SearchFilter, SortOption};
use clap::{Parser, Subcommand};

/// Shopsearch - search, filter, and recency tracking over a product catalog
#[derive(Parser, Debug)]
#[command(name = "shopsearch")]
#[command(version = "0.1.0")]
#[command(about = "Search a storefront catalog from the terminal", long_about = None)]
pub struct Args {
    /// Verbosity level: default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress log output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the catalog by free text
    Search {
        /// Query text, matched against title, category, and description
        query: String,

        /// Keep products priced at or above this bound
        #[arg(long)]
        min_price: Option<f64>,

        /// Keep products priced at or below this bound
        #[arg(long)]
        max_price: Option<f64>,

        /// Keep products rated at or above this bound (0-5)
        #[arg(long)]
        min_rating: Option<f32>,

        /// Result ordering
        #[arg(long, value_enum, default_value_t = SortOption::Relevance)]
        sort: SortOption,
    },

    /// List products in a category (case-insensitive exact match)
    Category {
        /// Category name
        name: String,
    },

    /// Mark a product as viewed
    View {
        /// Product id
        id: u64,
    },

    /// Show recent search terms
    History,

    /// Show recently viewed product ids
    Recent,

    /// Display current configuration
    Config,
}

impl Commands {
    /// Build a `SearchFilter` from search flags
    pub fn filter(&self) -> Option<SearchFilter> {
        match self {
            Commands::Search {
                min_price,
                max_price,
                min_rating,
                sort,
                ..
            } => Some(SearchFilter {
                category: None,
                min_price: *min_price,
                max_price: *max_price,
                rating: *min_rating,
                sort_by: *sort,
            }),
            _ => None,
        }
    }
}
