//! shopsearch - Main CLI Entry Point

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use shopsearch::cli::{Args, Commands};
use shopsearch::{
    by_category, CancelToken, CatalogSource, Config, HttpCatalogSource, JsonFileStore, Product,
    QueryEngine, RecencyStore, SearchError, SearchSession, RECENTLY_VIEWED, SEARCH_HISTORY,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let config = Config::load()?;
    let store = Arc::new(RecencyStore::new(Box::new(JsonFileStore::new(
        config.recency_path()?,
    )?)));

    match &args.command {
        Commands::Search { query, .. } => {
            let filter = args
                .command
                .filter()
                .unwrap_or_default();

            let source =
                HttpCatalogSource::new(&config.catalog.base_url, config.catalog.timeout_secs)?;
            let engine = QueryEngine::new(source, store);

            let session = SearchSession::new();
            session.set_filter(filter);

            let spinner = start_spinner("Searching catalog...");
            let outcome = engine
                .search(&session, query, &CancelToken::new())
                .await?;
            spinner.finish_and_clear();

            let results = outcome.into_products();
            if results.is_empty() {
                println!("{}", "No products matched.".yellow());
            } else {
                print_products(&results);
            }
        }

        Commands::Category { name } => {
            let source =
                HttpCatalogSource::new(&config.catalog.base_url, config.catalog.timeout_secs)?;

            let spinner = start_spinner("Fetching catalog...");
            let catalog = match source.get_products().await {
                Ok(products) => products,
                Err(SearchError::CatalogUnavailable { reason }) => {
                    spinner.finish_and_clear();
                    println!("{} {}", "Catalog unavailable:".red(), reason);
                    return Ok(());
                }
                Err(e) => {
                    spinner.finish_and_clear();
                    return Err(e.into());
                }
            };
            spinner.finish_and_clear();

            let products = by_category(&catalog, name);
            if products.is_empty() {
                println!("{}", format!("No products in category '{}'.", name).yellow());
            } else {
                print_products(&products);
            }
        }

        Commands::View { id } => {
            store.add(RECENTLY_VIEWED, &id.to_string()).await?;
            println!("Recorded product {} as viewed.", id.to_string().bold());
        }

        Commands::History => {
            print_recency_list("Search history", &store.get_all(SEARCH_HISTORY).await?);
        }

        Commands::Recent => {
            print_recency_list("Recently viewed", &store.get_all(RECENTLY_VIEWED).await?);
        }

        Commands::Config => {
            println!("{} {}", "Config file:".bold(), Config::config_path()?.display());
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn init_logging(args: &Args) {
    let level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("shopsearch={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn start_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

fn print_products(products: &[Product]) {
    for product in products {
        println!(
            "{:>4}  {}  {}  {}  {}",
            product.id,
            product.title.bold(),
            format!("${:.2}", product.price).green(),
            product.category.cyan(),
            format!("{:.1}★ ({})", product.rating.rate, product.rating.count).yellow(),
        );
    }
    println!("{}", format!("{} product(s)", products.len()).dimmed());
}

fn print_recency_list(label: &str, entries: &[String]) {
    if entries.is_empty() {
        println!("{}", format!("{} is empty.", label).yellow());
        return;
    }

    println!("{}", label.bold());
    for (i, entry) in entries.iter().enumerate() {
        println!("{:>3}. {}", i + 1, entry);
    }
}
