//! Shared application state and router construction.
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use crate::api::handlers;
use crate::export::job::ExportHandle;
use crate::gallery::collection::{ImageCollection, Selection};
use crate::genai::client::GenClient;
use crate::genai::keyselect::KeySelection;
use crate::github::client::GitHubClient;

pub struct AppState {
    pub github_client: GitHubClient,
    pub gen_client: GenClient,
    pub key_selection: Arc<dyn KeySelection>,
    pub collection: RwLock<ImageCollection>,
    pub selection: RwLock<Selection>,
    pub export: Arc<ExportHandle>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/images", get(handlers::list_images))
        .route("/images/upload", post(handlers::upload_image))
        .route("/images/url", post(handlers::add_urls))
        .route("/images/generate", post(handlers::generate_image))
        .route("/images/analyze", post(handlers::analyze_image))
        .route("/speech", post(handlers::generate_speech))
        .route("/import", post(handlers::import_from_github))
        .route("/export", post(handlers::start_export))
        .route("/export/status", get(handlers::export_status))
        .route("/export/cancel", post(handlers::cancel_export))
        .route("/selection", get(handlers::get_selection).post(handlers::set_selection))
        .route("/selection/next", post(handlers::select_next))
        .route("/selection/prev", post(handlers::select_prev))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
