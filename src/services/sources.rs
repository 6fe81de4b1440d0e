//! Catalog data sources
//!
//! A source knows how to produce the full, extracted list of books. The
//! server loads one at startup and again on every reload request.

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::{
    error::{AppError, AppResult},
    models::{BookRecord, RawRecord},
    services::extractor,
};

/// Trait for catalog sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Loads every book, in source order, with duplicates removed
    async fn load(&self) -> AppResult<Vec<BookRecord>>;

    /// Human-readable origin, recorded on the catalog for diagnostics
    fn describe(&self) -> String;
}

/// Raw books CSV, run through the extractor on every load
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl CatalogSource for CsvSource {
    async fn load(&self) -> AppResult<Vec<BookRecord>> {
        let bytes = tokio::fs::read(&self.path).await?;

        // Extraction is CPU-bound; keep it off the request-serving workers
        let report = tokio::task::spawn_blocking(move || {
            read_raw_records(bytes.as_slice()).map(extractor::extract_batch)
        })
        .await
        .map_err(|e| AppError::Internal(format!("Catalog extraction task failed: {}", e)))??;

        Ok(report.books)
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }
}

/// Previously extracted catalog artifact
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl CatalogSource for JsonSource {
    async fn load(&self) -> AppResult<Vec<BookRecord>> {
        let bytes = tokio::fs::read(&self.path).await?;
        let entries: Vec<serde_json::Value> = serde_json::from_slice(&bytes)?;

        let mut books = Vec::with_capacity(entries.len());
        let mut skipped = 0;

        for (position, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<BookRecord>(entry) {
                Ok(book) => books.push(book),
                Err(e) => {
                    skipped += 1;
                    tracing::warn!(position, error = %e, "Skipping undecodable catalog entry");
                }
            }
        }

        if skipped > 0 {
            tracing::warn!(skipped, path = %self.path.display(), "Catalog artifact contains undecodable entries");
        }

        let (books, duplicates) = extractor::dedup(books);

        if duplicates > 0 {
            tracing::warn!(duplicates, path = %self.path.display(), "Catalog artifact contains duplicates");
        }

        Ok(books)
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}

/// Reads raw rows from CSV text
///
/// The header row must be readable. Individual rows that fail to decode
/// are logged and skipped so one bad line never drops the whole file.
pub fn read_raw_records<R: Read>(input: R) -> AppResult<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(input);
    reader.headers()?;

    let mut records = Vec::new();
    let mut skipped = 0;

    for (row, result) in reader.deserialize::<RawRecord>().enumerate() {
        match result {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                tracing::warn!(row, error = %e, "Skipping undecodable CSV row");
            }
        }
    }

    tracing::debug!(rows = records.len(), skipped, "Read books CSV");

    Ok(records)
}

/// Writes the catalog artifact as pretty-printed JSON, creating parent directories
pub async fn save_catalog(path: &Path, books: &[BookRecord]) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_vec_pretty(books)?;
    tokio::fs::write(path, json).await?;

    tracing::info!(books = books.len(), path = %path.display(), "Catalog artifact written");
    Ok(())
}
