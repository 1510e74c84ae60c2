use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::SearchQuery;

/// Request to search the loaded dataset
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_has_name", skip_on_field_errors = false))]
pub struct SearchRequest {
    #[serde(default)]
    #[serde(alias = "first_name", rename = "firstName")]
    pub first_name: String,
    #[serde(default)]
    #[serde(alias = "last_name", rename = "lastName")]
    pub last_name: String,
    #[serde(alias = "date_of_birth", rename = "dateOfBirth")]
    pub date_of_birth: NaiveDate,
    #[validate(range(max = 100))]
    #[serde(default)]
    pub threshold: Option<u8>,
}

fn validate_has_name(req: &SearchRequest) -> Result<(), ValidationError> {
    if req.first_name.trim().is_empty() && req.last_name.trim().is_empty() {
        let mut err = ValidationError::new("missing_name");
        err.message = Some("Please enter at least one name to search.".into());
        return Err(err);
    }
    Ok(())
}

impl SearchRequest {
    /// Resolve into a query, filling the threshold from the configured default
    pub fn into_query(self, default_threshold: u8) -> SearchQuery {
        SearchQuery {
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            threshold: self.threshold.unwrap_or(default_threshold),
        }
    }
}
