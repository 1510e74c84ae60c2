use serde::{Deserialize, Serialize};

use crate::core::MatchResult;
use crate::models::{Record, ScoredRecord};

pub const NO_EXACT_MATCHES: &str = "No exact matches found.";
pub const NO_SIMILAR_MATCHES: &str = "No similar matches found.";

/// One rendered match: the source fields plus its scores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRow {
    #[serde(rename = "rowIndex")]
    pub row_index: usize,
    #[serde(rename = "Fname")]
    pub first_name: Option<String>,
    #[serde(rename = "Lname")]
    pub last_name: Option<String>,
    #[serde(rename = "DOB")]
    pub date_of_birth: Option<String>,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
    #[serde(rename = "firstNameSimilarity")]
    pub first_name_similarity: u8,
    #[serde(rename = "lastNameSimilarity")]
    pub last_name_similarity: u8,
    #[serde(rename = "dateProximity")]
    pub date_proximity: f64,
}

impl From<ScoredRecord> for MatchRow {
    fn from(scored: ScoredRecord) -> Self {
        Self {
            row_index: scored.record.row_index,
            first_name: scored.record.first_name,
            last_name: scored.record.last_name,
            date_of_birth: scored.record.date_of_birth,
            match_score: round_score(scored.total_similarity),
            first_name_similarity: scored.first_name_similarity,
            last_name_similarity: scored.last_name_similarity,
            date_proximity: round_score(scored.date_proximity),
        }
    }
}

/// Round to two decimal places for display
pub fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

/// A list of matches with an empty-state message when there are none
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSection {
    pub matches: Vec<MatchRow>,
    pub message: Option<String>,
}

impl MatchSection {
    fn build(matches: Vec<ScoredRecord>, empty_message: &str) -> Self {
        let message = matches.is_empty().then(|| empty_message.to_string());
        Self {
            matches: matches.into_iter().map(MatchRow::from).collect(),
            message,
        }
    }
}

/// Response for the search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "datasetId")]
    pub dataset_id: String,
    #[serde(rename = "totalRecords")]
    pub total_records: usize,
    #[serde(rename = "exactMatches")]
    pub exact_matches: MatchSection,
    #[serde(rename = "similarMatches")]
    pub similar_matches: MatchSection,
}

impl SearchResponse {
    pub fn from_result(dataset_id: String, result: MatchResult) -> Self {
        Self {
            dataset_id,
            total_records: result.total_records,
            exact_matches: MatchSection::build(result.exact_matches, NO_EXACT_MATCHES),
            similar_matches: MatchSection::build(result.similar_matches, NO_SIMILAR_MATCHES),
        }
    }
}

/// Summary of the loaded dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetResponse {
    #[serde(rename = "datasetId")]
    pub dataset_id: String,
    pub source: String,
    pub rows: usize,
    #[serde(rename = "loadedAt")]
    pub loaded_at: chrono::DateTime<chrono::Utc>,
    pub sample: Vec<Record>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(rename = "datasetLoaded")]
    pub dataset_loaded: bool,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(row_index: usize, total: f64) -> ScoredRecord {
        ScoredRecord {
            record: Record::new(row_index, Some("John"), Some("Smith"), Some("1990-01-01")),
            first_name_similarity: 100,
            last_name_similarity: 100,
            date_proximity: 53.333333,
            total_similarity: total,
        }
    }

    #[test]
    fn test_round_score() {
        assert_eq!(round_score(90.666666), 90.67);
        assert_eq!(round_score(100.0), 100.0);
        assert_eq!(round_score(0.004), 0.0);
    }

    #[test]
    fn test_empty_sections_carry_message() {
        let result = MatchResult {
            exact_matches: vec![],
            similar_matches: vec![scored(0, 90.666666)],
            total_records: 1,
        };

        let response = SearchResponse::from_result("ds".to_string(), result);

        assert_eq!(response.exact_matches.message.as_deref(), Some(NO_EXACT_MATCHES));
        assert!(response.similar_matches.message.is_none());
        assert_eq!(response.similar_matches.matches[0].match_score, 90.67);
        assert_eq!(response.similar_matches.matches[0].date_proximity, 53.33);
    }
}
