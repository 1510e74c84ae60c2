use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::Matcher;
use crate::models::{DatasetResponse, ErrorResponse, HealthResponse, SearchRequest, SearchResponse};
use crate::services::{Dataset, DatasetLoader, DatasetStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DatasetStore>,
    pub matcher: Matcher,
    pub default_threshold: u8,
    pub sample_rows: usize,
}

/// Configure all search-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/dataset", web::post().to(upload_dataset))
        .route("/dataset", web::get().to(get_dataset))
        .route("/search", web::post().to(search));
}

fn no_dataset() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "No dataset loaded".to_string(),
        message: "Please upload a CSV file to begin.".to_string(),
        status_code: 404,
    })
}

fn dataset_summary(dataset: &Dataset, sample_rows: usize) -> DatasetResponse {
    DatasetResponse {
        dataset_id: dataset.id.to_string(),
        source: dataset.source.clone(),
        rows: dataset.len(),
        loaded_at: dataset.loaded_at,
        sample: dataset.sample(sample_rows).to_vec(),
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let dataset_loaded = state.store.is_loaded().await;

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        dataset_loaded,
        timestamp: chrono::Utc::now(),
    })
}

/// Upload dataset endpoint
///
/// POST /api/v1/dataset
///
/// Request body: raw CSV with at least the columns `Fname`, `Lname`, `DOB`.
/// Replaces the dataset currently being searched.
async fn upload_dataset(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> impl Responder {
    let source = format!("upload ({} bytes)", body.len());

    let loaded = web::block(move || DatasetLoader::from_bytes(&source, &body)).await;

    let dataset = match loaded {
        Ok(Ok(dataset)) => dataset,
        Ok(Err(e)) => {
            tracing::info!("Rejected dataset upload: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid dataset".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
        Err(e) => {
            tracing::error!("Dataset upload failed: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Error processing file".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let response = dataset_summary(&dataset, state.sample_rows);
    state.store.replace(dataset).await;

    tracing::info!("Dataset {} loaded with {} rows", response.dataset_id, response.rows);

    HttpResponse::Ok().json(response)
}

/// Current dataset summary endpoint
///
/// GET /api/v1/dataset
async fn get_dataset(state: web::Data<AppState>) -> impl Responder {
    match state.store.current().await {
        Some(dataset) => HttpResponse::Ok().json(dataset_summary(&dataset, state.sample_rows)),
        None => no_dataset(),
    }
}

/// Search endpoint
///
/// POST /api/v1/search
///
/// Request body:
/// ```json
/// {
///   "firstName": "string",
///   "lastName": "string",
///   "dateOfBirth": "YYYY-MM-DD",
///   "threshold": 60
/// }
/// ```
async fn search(
    state: web::Data<AppState>,
    req: web::Json<SearchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: {}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let dataset = match state.store.current().await {
        Some(dataset) => dataset,
        None => return no_dataset(),
    };

    let query = req.into_inner().into_query(state.default_threshold);

    tracing::info!(
        "Searching dataset {} ({} rows), threshold: {}",
        dataset.id,
        dataset.len(),
        query.threshold
    );

    let matcher = state.matcher.clone();
    let records = Arc::clone(&dataset);
    let result = match web::block(move || matcher.search(&records.records, &query)).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Search over dataset {} failed: {}", dataset.id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Error processing file".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let response = SearchResponse::from_result(dataset.id.to_string(), result);

    tracing::info!(
        "Returning {} exact and {} similar matches from {} records",
        response.exact_matches.matches.len(),
        response.similar_matches.matches.len(),
        response.total_records
    );

    HttpResponse::Ok().json(response)
}
