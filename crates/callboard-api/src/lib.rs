//! API layer for Callboard
//!
//! HTTP handlers for the call dashboard and the paged call history, plus the
//! upstream record sources and the shared snapshot state.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod dto;
pub mod handlers;
pub mod state;
pub mod upstream;

use actix_cors::Cors;
use actix_web::{http::header, web, HttpResponse};

// Re-export DTOs (common types)
pub use dto::{ApiResponse, PaginationParams};

pub use handlers::{configure_calls, configure_dashboard, health_check};
pub use state::{AppState, SnapshotStore};
pub use upstream::{FileCallSource, HttpCallSource};

/// Configure API routes under `/api/v1`
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(query_config())
            // Health check
            .route("/health", web::get().to(health_check))
            // Dashboard summary and charts
            .configure(configure_dashboard)
            // Call history and detail
            .configure(configure_calls),
    );
}

/// Query extractor config returning JSON errors for malformed parameters
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let error_message = err.to_string();
        actix_web::error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(serde_json::json!({
                "error": "invalid_query",
                "message": error_message
            })),
        )
        .into()
    })
}

/// CORS policy for a comma separated list of allowed origins
pub fn cors(origins: &str) -> Cors {
    let allowed: Vec<String> = origins
        .split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect();

    Cors::default()
        .allowed_origin_fn(move |origin, _req_head| {
            origin
                .to_str()
                .map(|o| allowed.iter().any(|a| a == o))
                .unwrap_or(false)
        })
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
        .max_age(3600)
}
