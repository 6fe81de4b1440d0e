//! One-shot catalog build.
//!
//! Reads the raw books CSV named by `BOOKS_CSV_PATH` (default `books.csv`),
//! runs the extractor over every row and writes the JSON artifact the
//! server loads to `CATALOG_PATH` (default `shared/books.json`).

use std::path::Path;

use anyhow::Context;
use bookmatch_api::{
    config::Config,
    services::{extractor, sources},
};
use tracing_subscriber::EnvFilter;

const DEFAULT_CSV_PATH: &str = "books.csv";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bookmatch_api=info,process_books=info")),
        )
        .init();

    let config = Config::from_env()?;
    let csv_path = config
        .books_csv_path
        .clone()
        .unwrap_or_else(|| DEFAULT_CSV_PATH.to_string());

    let bytes = tokio::fs::read(&csv_path)
        .await
        .with_context(|| format!("Failed to read {}", csv_path))?;
    let raws = sources::read_raw_records(bytes.as_slice())?;
    let report = extractor::extract_batch(raws);

    sources::save_catalog(Path::new(&config.catalog_path), &report.books).await?;

    tracing::info!(
        input = %csv_path,
        output = %config.catalog_path,
        books = report.books.len(),
        malformed = report.malformed,
        duplicates = report.duplicates,
        "Processed books"
    );

    Ok(())
}
