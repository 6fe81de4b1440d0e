use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Aspect, LengthBucket, Pacing};

/// Length preference from the quiz; `NoPreference` matches every bucket
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum LengthPreference {
    Short,
    Medium,
    Long,
    NoPreference,
}

impl LengthPreference {
    /// Whether a book of the given bucket satisfies this preference
    pub fn accepts(&self, bucket: LengthBucket) -> bool {
        match self {
            LengthPreference::NoPreference => true,
            LengthPreference::Short => bucket == LengthBucket::Short,
            LengthPreference::Medium => bucket == LengthBucket::Medium,
            LengthPreference::Long => bucket == LengthBucket::Long,
        }
    }
}

/// What the user told us about their taste
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferenceProfile {
    /// Titles the user already likes, in the order given
    pub seed_books: Vec<String>,
    pub desired_aspect: Option<Aspect>,
    /// Lower-cased genre names
    pub desired_genres: BTreeSet<String>,
    pub desired_pacing: Option<Pacing>,
    pub desired_length: Option<LengthPreference>,
    pub additional_context: Option<String>,
}

impl PreferenceProfile {
    /// Most seed books a profile may carry
    pub const MAX_SEED_BOOKS: usize = 3;

    /// Creates a profile from seed titles, dropping blank entries
    pub fn new<I, S>(seed_books: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            seed_books: seed_books
                .into_iter()
                .map(Into::into)
                .filter(|title: &String| !title.trim().is_empty())
                .collect(),
            ..Self::default()
        }
    }

    pub fn with_aspect(mut self, aspect: Aspect) -> Self {
        self.desired_aspect = Some(aspect);
        self
    }

    /// Adds a genre, normalizing it to lower-case
    pub fn with_genre(mut self, genre: &str) -> Self {
        let genre = genre.trim().to_lowercase();
        if !genre.is_empty() {
            self.desired_genres.insert(genre);
        }
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.desired_pacing = Some(pacing);
        self
    }

    pub fn with_length(mut self, length: LengthPreference) -> Self {
        self.desired_length = Some(length);
        self
    }
}

/// Optional quiz answers as posted by the front end
///
/// Values are kept as strings so unknown options degrade to "no preference"
/// instead of rejecting the whole request.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswers {
    #[serde(default)]
    pub aspects: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub pacing: Option<String>,
    #[serde(default)]
    pub length: Option<String>,
    #[serde(default)]
    pub additional_context: Option<String>,
}

/// Body of `POST /api/recommend`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationInput {
    #[serde(default)]
    pub seed_books: Vec<String>,
    #[serde(default)]
    pub quiz_answers: Option<QuizAnswers>,
    /// Requested result count; non-positive values yield no results
    #[serde(default)]
    pub top_n: Option<i64>,
}

impl From<RecommendationInput> for PreferenceProfile {
    fn from(input: RecommendationInput) -> Self {
        let mut profile = PreferenceProfile::new(input.seed_books);
        let Some(quiz) = input.quiz_answers else {
            return profile;
        };

        if let Some(raw) = quiz.aspects.as_deref() {
            match Aspect::parse(raw) {
                Some(aspect) => profile.desired_aspect = Some(aspect),
                None => tracing::debug!(aspect = raw, "Ignoring non-thematic aspect answer"),
            }
        }

        for genre in &quiz.genres {
            profile = profile.with_genre(genre);
        }

        profile.desired_pacing = quiz.pacing.as_deref().and_then(parse_pacing);
        profile.desired_length = quiz.length.as_deref().and_then(parse_length);
        profile.additional_context = quiz
            .additional_context
            .filter(|context| !context.trim().is_empty());

        profile
    }
}

/// Accepts the quiz's "moderate" as an alias for medium
fn parse_pacing(value: &str) -> Option<Pacing> {
    match value.trim().to_lowercase().as_str() {
        "fast" => Some(Pacing::Fast),
        "medium" | "moderate" => Some(Pacing::Medium),
        "slow" => Some(Pacing::Slow),
        other => {
            tracing::debug!(pacing = other, "Ignoring unknown pacing answer");
            None
        }
    }
}

/// Accepts the quiz's "any" as an alias for no preference
fn parse_length(value: &str) -> Option<LengthPreference> {
    match value.trim().to_lowercase().as_str() {
        "short" => Some(LengthPreference::Short),
        "medium" => Some(LengthPreference::Medium),
        "long" => Some(LengthPreference::Long),
        "nopreference" | "any" => Some(LengthPreference::NoPreference),
        other => {
            tracing::debug!(length = other, "Ignoring unknown length answer");
            None
        }
    }
}
