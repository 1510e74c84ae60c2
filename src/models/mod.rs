// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Record, SearchQuery, ScoredRecord, ScoringWeights};
pub use requests::SearchRequest;
pub use responses::{SearchResponse, MatchRow, MatchSection, DatasetResponse, HealthResponse, ErrorResponse};
