pub mod book_search;
pub mod catalog;
pub mod extractor;
pub mod matcher;
pub mod recommendations;
pub mod sources;

pub use catalog::{Catalog, CatalogInfo, CatalogStore};
pub use sources::{CatalogSource, CsvSource, JsonSource};
