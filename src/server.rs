//! Router assembly and store provisioning.

use std::sync::Arc;

use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::ServerConfig;
use crate::error::Result;
use crate::fixtures::{demo_fixtures, load_fixture_file, seed_if_empty};
use crate::lookup::LookupService;
use crate::store::IdentityDatabase;

/// Shared server state.
#[derive(Clone)]
pub struct AppState {
    pub lookup: LookupService,
}

impl AppState {
    pub fn new(lookup: LookupService) -> Self {
        Self { lookup }
    }
}

/// Open the identity database and run the fixture loader.
///
/// Demo fixtures and the fixture file (if any) are provisioned together, and
/// only into an empty store.
pub fn open_store(config: &ServerConfig) -> Result<IdentityDatabase> {
    let db = IdentityDatabase::open(config.database_path.as_deref())?;

    match &config.database_path {
        Some(path) => tracing::info!(path = %path.display(), "Identity store opened"),
        None => tracing::info!("No database path configured, running in-memory only"),
    }

    let mut fixtures = Vec::new();
    if config.seed_demo {
        fixtures.extend(demo_fixtures());
    }
    if let Some(path) = &config.fixtures_path {
        fixtures.extend(load_fixture_file(path)?);
    }
    if !fixtures.is_empty() {
        seed_if_empty(&db, &fixtures)?;
    }

    Ok(db)
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/", get(api::health))
        .route("/health", get(api::health))
        .route("/search-number", post(api::search_number))
        .route("/stats", get(api::stats))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the router over an opened store.
pub fn app(db: IdentityDatabase) -> Router {
    router(AppState::new(LookupService::new(Arc::new(db))))
}
