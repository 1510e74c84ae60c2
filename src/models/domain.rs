use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the dataset
///
/// Field values are kept exactly as they appeared in the source; a missing
/// cell is `None`. `row_index` is the position in the source and acts as the
/// record's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "rowIndex")]
    pub row_index: usize,
    #[serde(rename = "Fname")]
    pub first_name: Option<String>,
    #[serde(rename = "Lname")]
    pub last_name: Option<String>,
    #[serde(rename = "DOB")]
    pub date_of_birth: Option<String>,
}

impl Record {
    pub fn new(
        row_index: usize,
        first_name: Option<&str>,
        last_name: Option<&str>,
        date_of_birth: Option<&str>,
    ) -> Self {
        Self {
            row_index,
            first_name: first_name.map(str::to_string),
            last_name: last_name.map(str::to_string),
            date_of_birth: date_of_birth.map(str::to_string),
        }
    }
}

/// A resolved search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub threshold: u8,
}

impl SearchQuery {
    /// True when at least one of the name fields carries non-whitespace text
    pub fn has_name(&self) -> bool {
        !self.first_name.trim().is_empty() || !self.last_name.trim().is_empty()
    }
}

/// A record together with the scores computed for one query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecord {
    pub record: Record,
    pub first_name_similarity: u8,
    pub last_name_similarity: u8,
    pub date_proximity: f64,
    pub total_similarity: f64,
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub first_name: f64,
    pub last_name: f64,
    pub date_of_birth: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            first_name: 0.4,
            last_name: 0.4,
            date_of_birth: 0.2,
        }
    }
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.first_name + self.last_name + self.date_of_birth
    }
}
