use std::collections::{BTreeSet, HashSet};
use std::fmt::Display;

use crate::models::{Aspect, BookRecord, LengthBucket, Pacing, RawRecord};

/// Description keywords that mark a book as fast-paced; checked before the slow set
const FAST_KEYWORDS: &[&str] = &["fast-paced", "action-packed", "thrilling"];

const SLOW_KEYWORDS: &[&str] = &["slow burn", "gradual", "introspective", "contemplative"];

/// A raw field that could not be interpreted and was replaced by its fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordDefect {
    /// Genre text was neither a JSON nor a quoted list; genres left empty
    Genres,
    /// Average rating was not a finite number; coerced to 0.0
    AverageRating,
    /// Rating count was not an integer; coerced to 0
    NumberOfRatings,
}

impl Display for RecordDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordDefect::Genres => write!(f, "genres"),
            RecordDefect::AverageRating => write!(f, "average_rating"),
            RecordDefect::NumberOfRatings => write!(f, "number_of_ratings"),
        }
    }
}

/// A derived record together with the fields that had to be degraded
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub record: BookRecord,
    pub defects: Vec<RecordDefect>,
}

impl Extraction {
    pub fn is_malformed(&self) -> bool {
        !self.defects.is_empty()
    }
}

/// Outcome of a batch extraction
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    /// Extracted books in input order, duplicates removed
    pub books: Vec<BookRecord>,
    /// Rows that had at least one degraded field
    pub malformed: usize,
    /// Rows dropped because their `(title, author)` was already seen
    pub duplicates: usize,
}

/// Derives a book record from one raw row
///
/// Never fails; malformed fields fall back to empty or zero values.
pub fn extract(raw: &RawRecord) -> BookRecord {
    extract_checked(raw).record
}

/// Like [`extract`], but also reports which fields were degraded
pub fn extract_checked(raw: &RawRecord) -> Extraction {
    let mut defects = Vec::new();

    let genres = parse_genres(&raw.genres).unwrap_or_else(|| {
        defects.push(RecordDefect::Genres);
        BTreeSet::new()
    });

    let average_rating = parse_rating(&raw.average_rating).unwrap_or_else(|| {
        defects.push(RecordDefect::AverageRating);
        0.0
    });

    let number_of_ratings = parse_rating_count(&raw.number_of_ratings).unwrap_or_else(|| {
        defects.push(RecordDefect::NumberOfRatings);
        0
    });

    let description_lower = raw.description.to_lowercase();

    let record = BookRecord {
        title: raw.title.trim().to_string(),
        author: raw.author.trim().to_string(),
        description: raw.description.clone(),
        length_bucket: bucket_length(&raw.description),
        pacing: infer_pacing(&description_lower),
        aspects: infer_aspects(&description_lower, &genres),
        series: extract_series(&raw.title),
        genres,
        average_rating,
        number_of_ratings,
        url: raw.url.trim().to_string(),
    };

    Extraction { record, defects }
}

/// Extracts a whole batch, preserving input order
///
/// A bad row never aborts the batch: its defects are logged and counted.
/// Rows repeating an earlier `(title, author)` pair are dropped.
pub fn extract_batch<I>(raws: I) -> IngestReport
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut malformed = 0;
    let mut extracted = Vec::new();

    for (position, raw) in raws.into_iter().enumerate() {
        let extraction = extract_checked(&raw);
        if extraction.is_malformed() {
            malformed += 1;
            let defects: Vec<String> = extraction.defects.iter().map(ToString::to_string).collect();
            tracing::warn!(
                position,
                title = %extraction.record.title,
                defects = %defects.join(","),
                "Malformed book record, degraded fields"
            );
        }
        extracted.push(extraction.record);
    }

    let (books, duplicates) = dedup(extracted);

    tracing::info!(
        books = books.len(),
        malformed,
        duplicates,
        "Extracted book catalog"
    );

    IngestReport {
        books,
        malformed,
        duplicates,
    }
}

/// Keeps the first occurrence of every `(title, author)` pair
pub fn dedup(books: Vec<BookRecord>) -> (Vec<BookRecord>, usize) {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(books.len());
    let mut duplicates = 0;

    for book in books {
        if seen.insert(book.dedup_key()) {
            kept.push(book);
        } else {
            duplicates += 1;
            tracing::debug!(title = %book.title, author = %book.author, "Dropping duplicate book");
        }
    }

    (kept, duplicates)
}

/// Word count over whitespace runs, so irregular spacing is not over-counted
pub fn bucket_length(description: &str) -> LengthBucket {
    LengthBucket::from_word_count(description.split_whitespace().count())
}

/// Expects an already lower-cased description
fn infer_pacing(description: &str) -> Pacing {
    if FAST_KEYWORDS.iter().any(|k| description.contains(k)) {
        Pacing::Fast
    } else if SLOW_KEYWORDS.iter().any(|k| description.contains(k)) {
        Pacing::Slow
    } else {
        Pacing::Medium
    }
}

/// Expects an already lower-cased description
fn infer_aspects(description: &str, genres: &BTreeSet<String>) -> BTreeSet<Aspect> {
    Aspect::ALL
        .into_iter()
        .filter(|aspect| {
            aspect
                .triggers()
                .iter()
                .any(|t| genres.contains(*t) || description.contains(t))
        })
        .collect()
}

/// Parses the genre column
///
/// Accepts a JSON string array or the single-quoted list form found in
/// Goodreads exports. Blank input is an empty set; anything else that does
/// not parse is `None`.
fn parse_genres(raw: &str) -> Option<BTreeSet<String>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(BTreeSet::new());
    }

    if let Ok(list) = serde_json::from_str::<Vec<String>>(raw) {
        return Some(normalize_genres(list));
    }

    let body = raw.strip_prefix('[')?.strip_suffix(']')?;
    let mut list = Vec::new();
    for item in body.split(',') {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        list.push(strip_quotes(item)?.to_string());
    }

    Some(normalize_genres(list))
}

fn strip_quotes(item: &str) -> Option<&str> {
    ['\'', '"']
        .into_iter()
        .find_map(|q| item.strip_prefix(q)?.strip_suffix(q))
}

fn normalize_genres(list: Vec<String>) -> BTreeSet<String> {
    list.into_iter()
        .map(|g| g.trim().to_lowercase())
        .filter(|g| !g.is_empty())
        .collect()
}

fn parse_rating(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|r| r.is_finite())
}

/// Strips thousands separators before parsing
fn parse_rating_count(raw: &str) -> Option<u64> {
    raw.replace(',', "").trim().parse::<u64>().ok()
}

/// First parenthesized group of the title, if it has any content
pub fn extract_series(title: &str) -> Option<String> {
    let open = title.find('(')?;
    let rest = &title[open + 1..];
    let close = rest.find(')')?;
    let inner = rest[..close].trim();
    (!inner.is_empty()).then(|| inner.to_string())
}
