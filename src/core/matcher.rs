use crate::models::{Record, SearchQuery, ScoredRecord, ScoringWeights};
use crate::core::scoring::score_record;

/// Result of the matching process
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Records passing the per-field exact gate, in dataset order
    pub exact_matches: Vec<ScoredRecord>,
    /// Remaining records at or above the threshold, best first
    pub similar_matches: Vec<ScoredRecord>,
    pub total_records: usize,
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Per-field scoring of every record (full linear scan)
/// 2. Exact partition (each field >= 95)
/// 3. Similar partition (weighted total >= threshold, exact excluded)
/// 4. Ranking of the similar set
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Search a dataset for records resembling the query
    ///
    /// Does not check that the query carries a name; callers reject blank
    /// queries before getting here.
    ///
    /// # Arguments
    /// * `dataset` - All records, in source order
    /// * `query` - Names, date of birth and similarity threshold
    ///
    /// # Returns
    /// MatchResult with disjoint exact and similar sets
    pub fn search(&self, dataset: &[Record], query: &SearchQuery) -> MatchResult {
        let threshold = query.threshold as f64;

        let mut exact_matches = Vec::new();
        let mut similar_matches = Vec::new();

        for scored in dataset
            .iter()
            .map(|record| score_record(record, query, &self.weights))
        {
            if scored.is_exact() {
                exact_matches.push(scored);
            } else if scored.total_similarity >= threshold {
                similar_matches.push(scored);
            }
        }

        // Sort by score (descending) and then by row (ascending)
        similar_matches.sort_by(|a, b| {
            b.total_similarity
                .partial_cmp(&a.total_similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.record.row_index.cmp(&b.record.row_index))
        });

        tracing::debug!(
            "Scanned {} records: {} exact, {} similar (threshold {})",
            dataset.len(),
            exact_matches.len(),
            similar_matches.len(),
            query.threshold
        );

        MatchResult {
            exact_matches,
            similar_matches,
            total_records: dataset.len(),
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn create_query(first: &str, last: &str, dob: &str, threshold: u8) -> SearchQuery {
        SearchQuery {
            first_name: first.to_string(),
            last_name: last.to_string(),
            date_of_birth: NaiveDate::parse_from_str(dob, "%Y-%m-%d").unwrap(),
            threshold,
        }
    }

    fn create_dataset() -> Vec<Record> {
        vec![
            Record::new(0, Some("John"), Some("Smith"), Some("1990-01-01")),
            Record::new(1, Some("Jon"), Some("Smith"), Some("1990-01-15")),
            Record::new(2, Some("Jane"), Some("Doe"), Some("1985-06-30")),
            Record::new(3, Some("John"), Some("Smyth"), None),
            Record::new(4, Some("john"), Some("SMITH"), Some("1990-01-02")),
        ]
    }

    #[test]
    fn test_search_basic() {
        let matcher = Matcher::with_default_weights();
        let query = create_query("John", "Smith", "1990-01-01", 60);

        let result = matcher.search(&create_dataset(), &query);

        let exact: Vec<usize> = result.exact_matches.iter().map(|m| m.record.row_index).collect();
        assert_eq!(exact, vec![0, 4]);

        let similar: Vec<usize> = result.similar_matches.iter().map(|m| m.record.row_index).collect();
        assert_eq!(similar, vec![1, 3]);
        assert_eq!(result.total_records, 5);
    }

    #[test]
    fn test_similar_sorted_by_score() {
        let matcher = Matcher::with_default_weights();
        let query = create_query("John", "Smith", "1990-01-01", 0);

        let result = matcher.search(&create_dataset(), &query);

        for pair in result.similar_matches.windows(2) {
            assert!(pair[0].total_similarity >= pair[1].total_similarity);
        }
    }

    #[test]
    fn test_ties_keep_dataset_order() {
        let matcher = Matcher::with_default_weights();
        let query = create_query("John", "Smith", "1990-01-01", 0);
        let dataset = vec![
            Record::new(0, Some("Jane"), Some("Smith"), None),
            Record::new(1, Some("Jane"), Some("Smith"), None),
            Record::new(2, Some("Jane"), Some("Smith"), None),
        ];

        let result = matcher.search(&dataset, &query);

        let order: Vec<usize> = result.similar_matches.iter().map(|m| m.record.row_index).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_exact_never_duplicated_into_similar() {
        let matcher = Matcher::with_default_weights();
        let query = create_query("John", "Smith", "1990-01-01", 0);

        let result = matcher.search(&create_dataset(), &query);

        for exact in &result.exact_matches {
            assert!(result
                .similar_matches
                .iter()
                .all(|s| s.record.row_index != exact.record.row_index));
        }
        assert_eq!(
            result.exact_matches.len() + result.similar_matches.len(),
            result.total_records
        );
    }

    #[test]
    fn test_near_exact_name_goes_to_similar() {
        let matcher = Matcher::with_default_weights();
        let query = create_query("Alexandra", "Smith", "1990-01-01", 60);
        let dataset = vec![Record::new(0, Some("Alexandria"), Some("Smith"), Some("1990-01-01"))];

        let result = matcher.search(&dataset, &query);

        assert!(result.exact_matches.is_empty());
        assert_eq!(result.similar_matches.len(), 1);
        assert_eq!(result.similar_matches[0].first_name_similarity, 94);
    }

    #[test]
    fn test_threshold_above_100_yields_no_similar() {
        let matcher = Matcher::with_default_weights();
        let query = create_query("John", "Smith", "1990-01-01", 101);

        let result = matcher.search(&create_dataset(), &query);

        assert!(result.similar_matches.is_empty());
        assert_eq!(result.exact_matches.len(), 2);
    }

    #[test]
    fn test_empty_dataset() {
        let matcher = Matcher::default();
        let query = create_query("John", "Smith", "1990-01-01", 60);

        let result = matcher.search(&[], &query);

        assert!(result.exact_matches.is_empty());
        assert!(result.similar_matches.is_empty());
        assert_eq!(result.total_records, 0);
    }
}
