use crate::models::BookRecord;

/// Suggestions returned when a request does not ask for a count
pub const DEFAULT_SUGGESTION_LIMIT: usize = 8;

/// Title autocomplete over a catalog snapshot
///
/// Returns `(id, book)` pairs whose title contains `query`
/// case-insensitively, in catalog order. A blank query matches nothing.
pub fn search_titles<'a>(
    books: &'a [BookRecord],
    query: &str,
    limit: usize,
) -> Vec<(usize, &'a BookRecord)> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    books
        .iter()
        .enumerate()
        .filter(|(_, book)| book.title.to_lowercase().contains(&needle))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::extractor;
    use crate::models::RawRecord;

    fn catalog(titles: &[&str]) -> Vec<BookRecord> {
        titles
            .iter()
            .map(|title| {
                extractor::extract(&RawRecord {
                    title: title.to_string(),
                    ..RawRecord::default()
                })
            })
            .collect()
    }

    #[test]
    fn test_search_is_case_insensitive_and_ordered() {
        let books = catalog(&["The Hobbit", "Harry Potter", "The Two Towers", "Dune"]);
        let hits: Vec<usize> = search_titles(&books, "THE", 8)
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(hits, vec![0, 2]);
    }

    #[test]
    fn test_search_respects_limit() {
        let books = catalog(&["A1", "A2", "A3"]);
        assert_eq!(search_titles(&books, "a", 2).len(), 2);
    }

    #[test]
    fn test_blank_query_matches_nothing() {
        let books = catalog(&["Dune"]);
        assert!(search_titles(&books, "   ", 8).is_empty());
    }
}
