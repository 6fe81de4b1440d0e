use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::BookRecord,
    services::sources::CatalogSource,
};

/// An immutable, versioned snapshot of every book available for matching
///
/// Book ids are positions in `books`, so they are only meaningful together
/// with the snapshot's version.
#[derive(Debug)]
pub struct Catalog {
    version: u64,
    built_at: DateTime<Utc>,
    source: String,
    books: Vec<BookRecord>,
}

/// Summary of a catalog snapshot
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogInfo {
    pub version: u64,
    pub built_at: DateTime<Utc>,
    pub source: String,
    pub size: usize,
}

impl Catalog {
    /// Version 0: no books loaded yet
    pub fn empty() -> Self {
        Self {
            version: 0,
            built_at: Utc::now(),
            source: "empty".to_string(),
            books: Vec::new(),
        }
    }

    pub fn books(&self) -> &[BookRecord] {
        &self.books
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Looks up a book by its position in this snapshot
    pub fn get(&self, id: usize) -> AppResult<&BookRecord> {
        self.books
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("Book {} not in catalog", id)))
    }

    pub fn info(&self) -> CatalogInfo {
        CatalogInfo {
            version: self.version,
            built_at: self.built_at,
            source: self.source.clone(),
            size: self.books.len(),
        }
    }
}

/// Shared handle to the current catalog snapshot
///
/// Readers clone the inner `Arc` and then work without holding the lock;
/// replacing the catalog swaps that pointer under a short write lock, so a
/// reader always sees one complete snapshot.
#[derive(Clone)]
pub struct CatalogStore {
    current: Arc<RwLock<Arc<Catalog>>>,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    /// Creates a store holding the empty catalog
    pub fn new() -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(Catalog::empty()))),
        }
    }

    /// Returns the snapshot current at the time of the call
    pub async fn snapshot(&self) -> Arc<Catalog> {
        self.current.read().await.clone()
    }

    /// Installs a new catalog, one version above the current one
    pub async fn replace(&self, books: Vec<BookRecord>, source: String) -> Arc<Catalog> {
        let mut current = self.current.write().await;
        let next = Arc::new(Catalog {
            version: current.version + 1,
            built_at: Utc::now(),
            source,
            books,
        });
        *current = next.clone();

        tracing::info!(
            version = next.version,
            size = next.len(),
            source = %next.source,
            "Catalog swapped"
        );

        next
    }

    /// Loads from `source` and swaps the result in
    ///
    /// On failure the current snapshot stays in place.
    pub async fn reload_from(&self, source: &dyn CatalogSource) -> AppResult<Arc<Catalog>> {
        let books = source.load().await.map_err(|e| {
            tracing::error!(error = %e, source = %source.describe(), "Catalog reload failed");
            e
        })?;
        Ok(self.replace(books, source.describe()).await)
    }
}
