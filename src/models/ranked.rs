use serde::Serialize;

use super::BookRecord;

/// A catalog entry scored against one preference profile
#[derive(Debug, Clone, PartialEq)]
pub struct RankedBook {
    /// Position of the book in the catalog snapshot it was ranked from
    pub id: usize,
    pub book: BookRecord,
    /// Always within `0..=100`
    pub match_score: u8,
    pub match_reason: String,
}

/// Single entry of the recommendation response
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationItem {
    pub id: usize,
    pub title: String,
    pub author: String,
    pub match_score: u8,
    pub match_reason: String,
}

impl From<RankedBook> for RecommendationItem {
    fn from(ranked: RankedBook) -> Self {
        Self {
            id: ranked.id,
            title: ranked.book.title,
            author: ranked.book.author,
            match_score: ranked.match_score,
            match_reason: ranked.match_reason,
        }
    }
}

/// Body returned by `POST /api/recommend`
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<RecommendationItem>,
}
