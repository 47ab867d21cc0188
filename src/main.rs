//! Callboard Server
//!
//! Serves the call dashboard and the paged call history for one phone
//! identifier, derived from records fetched from the upstream calls API.

use actix_web::{middleware, web, App, HttpResponse, HttpServer};
use callboard_api::{configure_routes, cors, AppState, FileCallSource, HttpCallSource};
use callboard_core::config::LogConfig;
use callboard_core::traits::CallSource;
use callboard_core::AppConfig;
use std::io;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging
fn init_tracing(log: &LogConfig) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "callboard={},callboard_api={},callboard_analytics={},actix_web=info",
            log.level, log.level, log.level
        ))
    });

    let registry = tracing_subscriber::registry().with(env_filter);

    if log.json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init();
    }
}

/// Pick the record source from configuration
fn build_source(config: &AppConfig) -> io::Result<Arc<dyn CallSource>> {
    if let Some(path) = config.upstream.file.as_deref() {
        return Ok(Arc::new(FileCallSource::new(path)));
    }

    let source = HttpCallSource::new(&config.upstream, &config.access)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    Ok(Arc::new(source))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().map_err(|e| {
        eprintln!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    // Initialize logging
    init_tracing(&config.log);

    info!("Starting Callboard v{}", env!("CARGO_PKG_VERSION"));

    if !config.access.retell_enabled {
        warn!("Call views are disabled (access.retell_enabled = false); only /api/v1/health will answer");
    }

    let source = build_source(&config).map_err(|e| {
        error!("Cannot create call source: {}", e);
        e
    })?;

    info!(
        "Calls source: {}, timezone {}, page size {}",
        source.describe(),
        config.analytics.timezone,
        config.analytics.page_size
    );

    let state = web::Data::new(AppState::new(source, &config));
    let cors_origins = config.server.cors_origins.clone();
    let bind_addr = config.server_addr();
    let workers = config.server.workers;

    info!(
        "Starting HTTP server on {} with {} workers",
        bind_addr, workers
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            // Middleware
            .wrap(cors(&cors_origins))
            .wrap(TracingLogger::default())
            .wrap(middleware::Compress::default())
            .wrap(middleware::NormalizePath::trim())
            // Configure routes
            .configure(configure_routes)
            // Root redirect to health
            .route(
                "/",
                web::get().to(|| async {
                    HttpResponse::Found()
                        .append_header(("Location", "/api/v1/health"))
                        .finish()
                }),
            )
    })
    .workers(workers)
    .bind(&bind_addr)?
    .run()
    .await
}
