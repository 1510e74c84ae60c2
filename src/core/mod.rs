// Core algorithm exports
pub mod matcher;
pub mod scoring;
pub mod similarity;

pub use matcher::{Matcher, MatchResult};
pub use scoring::{score_record, EXACT_MATCH_CUTOFF};
pub use similarity::{name_similarity, date_proximity, parse_date, proximity_between, DATE_WINDOW_DAYS};
