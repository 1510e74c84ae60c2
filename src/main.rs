use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use pattern_search::config::{LoggingSettings, Settings};
use pattern_search::core::Matcher;
use pattern_search::routes::{self, AppState};
use pattern_search::services::{DatasetLoader, DatasetStore};
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Initialize the tracing subscriber; `RUST_LOG` overrides the configured level
fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();

    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default();
    init_logging(&logging);

    info!("Starting Pattern Search service...");

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    info!("Configuration loaded successfully");

    let weights = settings.weights();
    let matcher = Matcher::new(weights);

    info!("Matcher initialized with weights: {:?}", weights);

    // Preload a dataset if one is configured
    let store = match &settings.dataset.path {
        Some(path) => {
            let dataset = DatasetLoader::from_path(path).map_err(|e| {
                error!("Failed to load dataset from {}: {}", path, e);
                std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
            })?;
            info!("Startup dataset {} loaded ({} rows)", dataset.id, dataset.len());
            DatasetStore::with_dataset(dataset)
        }
        None => {
            info!("No startup dataset configured, waiting for upload");
            DatasetStore::new()
        }
    };

    let app_state = AppState {
        store: Arc::new(store),
        matcher,
        default_threshold: settings.matching.default_threshold,
        sample_rows: settings.dataset.sample_rows,
    };

    let max_upload_bytes = settings.dataset.max_upload_bytes;

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::PayloadConfig::new(max_upload_bytes))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
