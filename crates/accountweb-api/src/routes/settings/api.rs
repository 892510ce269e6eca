//! Settings API endpoints - JSON API

use accountweb_config::Config;
use axum::extract::State;
use axum::Json;

use crate::AppState;

/// Effective configuration (JSON API)
pub async fn api_settings(state: State<AppState>) -> Json<Config> {
    Json(state.config.clone())
}
