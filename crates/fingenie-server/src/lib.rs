//! HTTP API for the FinGenie loan calculators.

pub mod error;
pub mod routes;
pub mod settings;

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use fingenie_core::loans::presets::{default_presets, LoanPreset};

pub use error::ApiError;
pub use settings::{load_settings, Settings, SettingsError};

/// Shared, read-only state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub presets: Arc<Vec<LoanPreset>>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let presets = settings.presets.clone().unwrap_or_else(default_presets);
        Self {
            settings: Arc::new(settings),
            presets: Arc::new(presets),
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.settings.server.cors_origins);

    let finance = Router::new()
        .route("/calculate_emi", post(routes::calculate_emi))
        .route("/calculate_prepayment", post(routes::calculate_prepayment))
        .route("/calculate_affordability", post(routes::calculate_affordability))
        .route("/calculate_interest_only", post(routes::calculate_interest_only))
        .route("/compare_loans", post(routes::compare_loans))
        .route("/get_loan_presets", get(routes::get_loan_presets));

    Router::new()
        .nest("/api/finance", finance)
        .route("/health", get(routes::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() {
        return base.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed.is_empty() {
        tracing::warn!("No valid CORS origins configured, allowing any origin");
        return base.allow_origin(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed.len());
    base.allow_origin(parsed)
}
