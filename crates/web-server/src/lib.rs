use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use configuration::Settings;
use database::{DbRepository, InstallationStore};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
/// It carries the store handle and nothing else; all data lives in the store.
pub struct AppState {
    pub store: Box<dyn InstallationStore>,
}

impl AppState {
    pub fn new(store: impl InstallationStore + 'static) -> Self {
        Self { store: Box::new(store) }
    }
}

/// Builds the router with every route and middleware layer attached.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/installations", post(handlers::create_installation))
        .route("/installations/:id", get(handlers::get_installation))
        .route(
            "/installations/:id/deactivate",
            post(handlers::deactivate_installation),
        )
        .route(
            "/installations/:id/reports",
            post(handlers::submit_production_report).get(handlers::sum_produced_wattage),
        )
        .with_state(Arc::new(state))
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024))
}

/// The main function to configure and run the web server.
///
/// Tracing must already be initialized by the caller.
pub async fn run_server(settings: &Settings) -> anyhow::Result<()> {
    let addr = settings.server.socket_addr()?;

    let db_pool = database::connect(&settings.database).await?;
    database::run_migrations(&db_pool).await?;
    let app = create_app(AppState::new(DbRepository::new(db_pool)));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
