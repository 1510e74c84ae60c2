//! Pattern Search - fuzzy record matching over personal-record datasets
//!
//! This library scores every record of a dataset against a query of first
//! name, last name and date of birth, and splits the dataset into exact
//! matches, similar matches above a threshold, and non-matches.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, MatchResult, similarity::{name_similarity, date_proximity}};
pub use models::{Record, SearchQuery, ScoredRecord, ScoringWeights, SearchRequest, SearchResponse};
pub use services::{Dataset, DatasetLoader, DatasetStore};
