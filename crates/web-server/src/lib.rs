use axum::{Router, routing::get};
use configuration::Settings;
use core_types::PreparedSale;
use dataset::DatasetCache;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod filters;
pub mod handlers;

use crate::error::AppError;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub settings: Settings,
    pub cache: DatasetCache,
}

impl AppState {
    /// The prepared table for the configured sales file. Cached after the
    /// first request; reloaded when the file changes on disk.
    pub fn prepared_table(&self) -> Result<Arc<Vec<PreparedSale>>, AppError> {
        Ok(self.cache.get_or_load(&self.settings.data.sales_file)?)
    }
}

/// Builds the application router. Split from `run_server` so tests can drive
/// the routes without binding a socket.
pub fn app(settings: Settings) -> Router {
    let app_state = Arc::new(AppState {
        settings,
        cache: DatasetCache::new(),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::dashboard_page))
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/config", get(handlers::get_config))
        .route("/api/filters", get(handlers::get_filters))
        .route("/api/kpis", get(handlers::get_kpis))
        .route("/api/top", get(handlers::get_top))
        .route("/api/insights", get(handlers::get_insights))
        .route("/api/monthly", get(handlers::get_monthly))
        .route("/api/regions", get(handlers::get_regions))
        .route("/api/tickets", get(handlers::get_ticket_distribution))
        .with_state(app_state)
        .layer(cors)
        // This middleware logs information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    let router = app(settings);

    tracing::info!("Dashboard listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
