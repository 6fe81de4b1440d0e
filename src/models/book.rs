use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt::Display;

/// Length class derived from the description word count
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LengthBucket {
    Short,
    Medium,
    Long,
}

impl LengthBucket {
    /// Descriptions shorter than this many words are short
    pub const SHORT_BELOW: usize = 200;
    /// Descriptions longer than this many words are long
    pub const LONG_ABOVE: usize = 1000;

    /// Buckets a word count; both thresholds are exclusive
    pub fn from_word_count(words: usize) -> Self {
        if words < Self::SHORT_BELOW {
            LengthBucket::Short
        } else if words > Self::LONG_ABOVE {
            LengthBucket::Long
        } else {
            LengthBucket::Medium
        }
    }
}

impl Display for LengthBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LengthBucket::Short => write!(f, "short"),
            LengthBucket::Medium => write!(f, "medium"),
            LengthBucket::Long => write!(f, "long"),
        }
    }
}

/// Pacing class inferred from description keywords
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Pacing {
    Fast,
    Medium,
    Slow,
}

impl Display for Pacing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pacing::Fast => write!(f, "fast"),
            Pacing::Medium => write!(f, "medium"),
            Pacing::Slow => write!(f, "slow"),
        }
    }
}

/// Thematic tag describing a book's dominant appeal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Aspect {
    Romantic,
    Mysterious,
    Adventurous,
    Horrific,
    Fantastical,
}

impl Aspect {
    pub const ALL: [Aspect; 5] = [
        Aspect::Romantic,
        Aspect::Mysterious,
        Aspect::Adventurous,
        Aspect::Horrific,
        Aspect::Fantastical,
    ];

    /// Genre tags and description substrings that trigger this aspect
    pub fn triggers(&self) -> &'static [&'static str] {
        match self {
            Aspect::Romantic => &["romance"],
            Aspect::Mysterious => &["mystery", "thriller"],
            Aspect::Adventurous => &["adventure"],
            Aspect::Horrific => &["horror"],
            Aspect::Fantastical => &["fantasy"],
        }
    }

    /// Parses a lower-case aspect name, returning `None` for anything else
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "romantic" => Some(Aspect::Romantic),
            "mysterious" => Some(Aspect::Mysterious),
            "adventurous" => Some(Aspect::Adventurous),
            "horrific" => Some(Aspect::Horrific),
            "fantastical" => Some(Aspect::Fantastical),
            _ => None,
        }
    }
}

impl Display for Aspect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Aspect::Romantic => write!(f, "romantic"),
            Aspect::Mysterious => write!(f, "mysterious"),
            Aspect::Adventurous => write!(f, "adventurous"),
            Aspect::Horrific => write!(f, "horrific"),
            Aspect::Fantastical => write!(f, "fantastical"),
        }
    }
}

/// A catalog entry with its derived attributes
///
/// Built once by the extractor from a single raw record and never mutated
/// afterwards. The `(title, author)` pair identifies a book within a catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    pub title: String,
    pub author: String,
    pub description: String,
    pub genres: BTreeSet<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub number_of_ratings: u64,
    pub url: String,
    pub length_bucket: LengthBucket,
    pub pacing: Pacing,
    pub aspects: BTreeSet<Aspect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
}

impl BookRecord {
    /// Key used to collapse duplicate rows
    pub fn dedup_key(&self) -> (String, String) {
        (
            self.title.trim().to_lowercase(),
            self.author.trim().to_lowercase(),
        )
    }

    /// Title normalized for comparison against user-supplied seed titles
    pub fn normalized_title(&self) -> String {
        normalize_title(&self.title)
    }
}

/// Trims and lower-cases a title for case-insensitive equality
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Reads `null` as the type's zero value, the same sentinel the extractor
/// uses for unparseable ratings. Non-finite floats serialize as `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
