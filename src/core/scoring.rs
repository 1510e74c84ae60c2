use crate::models::{Record, SearchQuery, ScoredRecord, ScoringWeights};
use crate::core::similarity::{date_proximity, name_similarity};

/// Minimum score every field must reach for a record to count as exact
pub const EXACT_MATCH_CUTOFF: f64 = 95.0;

/// Score one record against a query
///
/// Scoring formula:
/// total = (
///     first_name_similarity * 0.4 +   # case-insensitive Levenshtein ratio
///     last_name_similarity * 0.4 +    # case-insensitive Levenshtein ratio
///     date_proximity * 0.2            # linear decay over 30 days
/// )
///
/// The record is cloned into the result; the dataset itself is never touched.
pub fn score_record(
    record: &Record,
    query: &SearchQuery,
    weights: &ScoringWeights,
) -> ScoredRecord {
    let first_name_similarity =
        name_similarity(record.first_name.as_deref(), Some(query.first_name.as_str()));
    let last_name_similarity =
        name_similarity(record.last_name.as_deref(), Some(query.last_name.as_str()));
    let date_proximity = date_proximity(record.date_of_birth.as_deref(), query.date_of_birth);

    let total_similarity = (first_name_similarity as f64 * weights.first_name
        + last_name_similarity as f64 * weights.last_name
        + date_proximity * weights.date_of_birth)
        .clamp(0.0, 100.0);

    ScoredRecord {
        record: record.clone(),
        first_name_similarity,
        last_name_similarity,
        date_proximity,
        total_similarity,
    }
}

impl ScoredRecord {
    /// Every field individually at or above the exact cutoff.
    /// Independent of `total_similarity`.
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.first_name_similarity as f64 >= EXACT_MATCH_CUTOFF
            && self.last_name_similarity as f64 >= EXACT_MATCH_CUTOFF
            && self.date_proximity >= EXACT_MATCH_CUTOFF
    }
}
