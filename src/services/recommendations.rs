use std::time::Instant;

use crate::{
    error::AppResult,
    models::{PreferenceProfile, RecommendationInput, RecommendationItem, RecommendationResponse},
    services::{catalog::CatalogStore, matcher},
};

/// Generates book recommendations for one quiz submission
///
/// Converts the wire input into a preference profile, ranks the current
/// catalog snapshot against it and shapes the result for the front end.
/// The snapshot is taken once, so a concurrent catalog swap never mixes
/// books from two versions into one response.
pub async fn get_recommendations(
    store: &CatalogStore,
    input: RecommendationInput,
    top_n: usize,
) -> AppResult<RecommendationResponse> {
    let start = Instant::now();
    let profile = PreferenceProfile::from(input);

    tracing::info!(
        seed_books = profile.seed_books.len(),
        genres = profile.desired_genres.len(),
        aspect = ?profile.desired_aspect,
        pacing = ?profile.desired_pacing,
        length = ?profile.desired_length,
        has_context = profile.additional_context.is_some(),
        top_n,
        "Starting recommendation"
    );

    let catalog = store.snapshot().await;
    let ranked = matcher::match_candidates(&profile, catalog.books(), top_n)?;

    if catalog.is_empty() {
        tracing::warn!("Catalog is empty, returning no recommendations");
    }

    tracing::info!(
        catalog_version = catalog.version(),
        returned = ranked.len(),
        processing_time_ms = start.elapsed().as_millis(),
        "Recommendation completed"
    );

    Ok(RecommendationResponse {
        recommendations: ranked.into_iter().map(RecommendationItem::from).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{RawRecord, RecommendationInput};
    use crate::services::extractor;
    use serde_json::json;

    fn raw(title: &str, description: &str, genres: &str) -> RawRecord {
        RawRecord {
            title: title.to_string(),
            author: "Author".to_string(),
            description: description.to_string(),
            genres: genres.to_string(),
            average_rating: "4.0".to_string(),
            number_of_ratings: "0".to_string(),
            ..RawRecord::default()
        }
    }

    async fn seeded_store() -> CatalogStore {
        let report = extractor::extract_batch(vec![
            raw("The Hobbit", "A thrilling adventure.", "['Fantasy']"),
            raw("Rebecca", "A slow burn mystery.", "['Mystery', 'Romance']"),
            raw("Dune", "Politics and sand.", "['Science Fiction']"),
        ]);
        let store = CatalogStore::new();
        store.replace(report.books, "test".to_string()).await;
        store
    }

    fn input(value: serde_json::Value) -> RecommendationInput {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_recommendations_follow_quiz() {
        let store = seeded_store().await;
        let response = get_recommendations(
            &store,
            input(json!({
                "seedBooks": ["Dune"],
                "quizAnswers": { "genres": ["Fantasy", "Mystery"], "pacing": "fast" }
            })),
            10,
        )
        .await
        .unwrap();

        let titles: Vec<&str> = response
            .recommendations
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, vec!["The Hobbit", "Rebecca"]);
        assert_eq!(response.recommendations[0].id, 0);
        assert_eq!(response.recommendations[0].match_score, 76);
    }

    #[tokio::test]
    async fn test_missing_seed_books_rejected() {
        let store = seeded_store().await;
        let result = get_recommendations(&store, input(json!({ "seedBooks": [] })), 10).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_empty_catalog_yields_no_recommendations() {
        let store = CatalogStore::new();
        let response = get_recommendations(&store, input(json!({ "seedBooks": ["Dune"] })), 10)
            .await
            .unwrap();
        assert!(response.recommendations.is_empty());
    }
}
