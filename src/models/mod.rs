pub mod book;
pub mod preferences;
pub mod ranked;
pub mod raw;

pub use book::{normalize_title, Aspect, BookRecord, LengthBucket, Pacing};
pub use preferences::{LengthPreference, PreferenceProfile, QuizAnswers, RecommendationInput};
pub use ranked::{RankedBook, RecommendationItem, RecommendationResponse};
pub use raw::RawRecord;
