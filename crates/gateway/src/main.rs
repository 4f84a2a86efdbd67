//! Licitamos API Gateway
//!
//! The main entry point for all external API requests.
//! Handles:
//! - Authentication
//! - Request routing
//! - Observability (logging, metrics, tracing)

mod handlers;
mod middleware;

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post, put},
    Router,
};
use licitamos_common::{
    auth::JwtManager, config::AppConfig, db::DbPool, lookup::LookupClient, metrics,
};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DbPool,
    pub jwt: Arc<JwtManager>,
    pub lookup: LookupClient,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));
    if config.observability.json_logging {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }

    info!("Starting Licitamos API Gateway v{}", licitamos_common::VERSION);

    // Initialize metrics
    metrics::register_metrics();
    if config.observability.metrics_port > 0 {
        let metrics_addr = SocketAddr::from(([0, 0, 0, 0], config.observability.metrics_port));
        PrometheusBuilder::new()
            .with_http_listener(metrics_addr)
            .install()?;
        info!("Metrics exporter listening on {}", metrics_addr);
    }

    // Initialize database connection
    info!("Connecting to database...");
    let db = DbPool::connect(&config.database).await?;

    // Create app state
    let state = AppState {
        jwt: Arc::new(JwtManager::new(&config.auth.jwt_secret)),
        lookup: LookupClient::new(&config.lookup)?,
        config: config.clone(),
        db,
    };

    // Build the router
    let app = create_router(state);

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Create the main application router
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    // Everything below requires a valid bearer token
    let api_routes = Router::new()
        // Client endpoints
        .route("/clients", get(handlers::clients::list_clients))
        .route("/clients", post(handlers::clients::save_client))
        .route("/clients/{id}", delete(handlers::clients::delete_client))
        // Client document endpoints
        .route("/clients/{id}/documents", get(handlers::documents::list_documents))
        .route("/clients/{id}/documents", post(handlers::documents::add_document))
        .route("/documents/{id}", delete(handlers::documents::delete_document))
        // Client history endpoints
        .route("/clients/{id}/history", get(handlers::history::list_history))
        .route("/clients/{id}/history", post(handlers::history::append_history))
        // Pipeline endpoints
        .route("/bids", get(handlers::bids::get_board))
        .route("/bids", post(handlers::bids::save_bid))
        .route("/bids/{id}", delete(handlers::bids::delete_bid))
        .route("/bids/{id}/status", patch(handlers::bids::update_status))
        // Financial endpoints
        .route("/financial/summary", get(handlers::financial::summary))
        .route("/financial/report", get(handlers::financial::report))
        // Dashboard endpoints
        .route("/dashboard/stats", get(handlers::dashboard::stats))
        // Agenda endpoints
        .route("/events", get(handlers::events::list_events))
        .route("/events", post(handlers::events::create_event))
        .route("/events/{id}", put(handlers::events::update_event))
        .route("/events/{id}", delete(handlers::events::delete_event))
        // Profile endpoints
        .route("/profile", get(handlers::profile::get_profile))
        .route("/profile", put(handlers::profile::save_profile))
        .route("/profile/theme", patch(handlers::profile::update_theme))
        // Document generation endpoints
        .route("/reports/generate", post(handlers::reports::generate))
        // Backup endpoints
        .route("/backup/export", get(handlers::backup::export))
        .route("/backup/import", post(handlers::backup::import))
        // External lookup endpoints
        .route("/lookup/cep/{cep}", get(handlers::lookup::cep))
        .route("/lookup/cnpj/{cnpj}", get(handlers::lookup::cnpj))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    // Health endpoints stay outside the auth gate
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready));

    // Compose the app
    Router::new()
        .nest("/v1", public_routes.merge(api_routes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(request_id)
        .layer(propagate_id)
        .with_state(state)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
