use std::collections::HashSet;

use crate::{
    error::{AppError, AppResult},
    models::{
        normalize_title, Aspect, BookRecord, LengthBucket, LengthPreference, Pacing,
        PreferenceProfile, RankedBook,
    },
};

const BASE_SCORE: f64 = 60.0;
const GENRE_BONUS: f64 = 8.0;
const GENRE_BONUS_CAP: f64 = 24.0;
const ASPECT_BONUS: f64 = 10.0;
const PACING_BONUS: f64 = 8.0;
const LENGTH_BONUS: f64 = 6.0;
const RATINGS_PER_POPULARITY_POINT: f64 = 100_000.0;
const POPULARITY_BONUS_CAP: f64 = 4.0;
const RATING_PIVOT: f64 = 4.0;
const RATING_BONUS_PER_POINT: f64 = 2.0;
const RATING_BONUS_CAP: f64 = 4.0;

const FALLBACK_REASON: &str = "Recommended for its overall reader reception.";

/// Criteria of a profile that a book satisfied
///
/// Only criteria the user actually chose are recorded, so a `noPreference`
/// length never shows up here even though it earns the length bonus.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchedCriteria {
    /// Shared genres in sorted order
    pub genres: Vec<String>,
    pub aspect: Option<Aspect>,
    pub pacing: Option<Pacing>,
    pub length: Option<LengthBucket>,
}

impl MatchedCriteria {
    /// Justification naming the dominant criterion: genre, aspect, pacing, then length
    pub fn reason(&self) -> String {
        if let Some((first, rest)) = self.genres.split_first() {
            if rest.is_empty() {
                return format!("Matched on shared genre: {}.", first);
            }
            return format!("Matched on shared genres: {}.", self.genres.join(", "));
        }
        if let Some(aspect) = self.aspect {
            return format!("Matched on the {} feel you asked for.", aspect);
        }
        if let Some(pacing) = self.pacing {
            return format!("Matched on your preferred {} pacing.", pacing);
        }
        if let Some(length) = self.length {
            return format!("Matched on your preferred {} length.", length);
        }
        FALLBACK_REASON.to_string()
    }
}

/// A book's score against one profile, before ranking
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    pub value: u8,
    pub criteria: MatchedCriteria,
}

/// Ranks catalog entries against a preference profile
///
/// Returns at most `top_n` books, best first; equal scores keep catalog
/// order. Books named as seeds are never returned. An empty catalog or a
/// `top_n` of zero yields an empty list.
pub fn match_candidates(
    profile: &PreferenceProfile,
    catalog: &[BookRecord],
    top_n: usize,
) -> AppResult<Vec<RankedBook>> {
    validate_profile(profile)?;

    if top_n == 0 || catalog.is_empty() {
        return Ok(Vec::new());
    }

    let seeds: HashSet<String> = profile
        .seed_books
        .iter()
        .map(|title| normalize_title(title))
        .collect();

    let mut scored: Vec<(usize, &BookRecord, Score)> = catalog
        .iter()
        .enumerate()
        .filter(|(_, book)| shares_desired_genre(profile, book))
        .filter(|(_, book)| !seeds.contains(&book.normalized_title()))
        .map(|(id, book)| (id, book, score_book(profile, book)))
        .collect();

    let candidates = scored.len();

    // sort_by is stable, so ties stay in catalog order
    scored.sort_by(|a, b| b.2.value.cmp(&a.2.value));
    scored.truncate(top_n);

    tracing::debug!(
        catalog_size = catalog.len(),
        candidates,
        returned = scored.len(),
        "Matched candidates"
    );

    Ok(scored
        .into_iter()
        .map(|(id, book, score)| RankedBook {
            id,
            book: book.clone(),
            match_score: score.value,
            match_reason: score.criteria.reason(),
        })
        .collect())
}

/// Scores a single book; does not apply the genre filter or seed exclusion
pub fn score_book(profile: &PreferenceProfile, book: &BookRecord) -> Score {
    let mut criteria = MatchedCriteria {
        genres: profile
            .desired_genres
            .intersection(&book.genres)
            .cloned()
            .collect(),
        ..MatchedCriteria::default()
    };

    let mut total = BASE_SCORE;
    total += (criteria.genres.len() as f64 * GENRE_BONUS).min(GENRE_BONUS_CAP);

    if let Some(aspect) = profile.desired_aspect.filter(|a| book.aspects.contains(a)) {
        total += ASPECT_BONUS;
        criteria.aspect = Some(aspect);
    }

    if profile.desired_pacing == Some(book.pacing) {
        total += PACING_BONUS;
        criteria.pacing = Some(book.pacing);
    }

    if let Some(length) = profile.desired_length {
        if length.accepts(book.length_bucket) {
            total += LENGTH_BONUS;
            if length != LengthPreference::NoPreference {
                criteria.length = Some(book.length_bucket);
            }
        }
    }

    total += popularity_bonus(book.number_of_ratings);
    total += rating_bonus(book.average_rating);

    Score {
        value: total.clamp(0.0, 100.0).round() as u8,
        criteria,
    }
}

fn validate_profile(profile: &PreferenceProfile) -> AppResult<()> {
    if profile.seed_books.iter().all(|title| title.trim().is_empty()) {
        return Err(AppError::InvalidInput(
            "Must provide at least one seed book".to_string(),
        ));
    }
    if profile.seed_books.len() > PreferenceProfile::MAX_SEED_BOOKS {
        return Err(AppError::InvalidInput(format!(
            "At most {} seed books are allowed",
            PreferenceProfile::MAX_SEED_BOOKS
        )));
    }
    Ok(())
}

fn shares_desired_genre(profile: &PreferenceProfile, book: &BookRecord) -> bool {
    profile.desired_genres.is_empty()
        || profile
            .desired_genres
            .iter()
            .any(|genre| book.genres.contains(genre))
}

fn popularity_bonus(number_of_ratings: u64) -> f64 {
    (number_of_ratings as f64 / RATINGS_PER_POPULARITY_POINT).min(POPULARITY_BONUS_CAP)
}

fn rating_bonus(average_rating: f64) -> f64 {
    if !average_rating.is_finite() {
        return 0.0;
    }
    ((average_rating - RATING_PIVOT) * RATING_BONUS_PER_POINT).clamp(0.0, RATING_BONUS_CAP)
}
