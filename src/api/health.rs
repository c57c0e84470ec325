use axum::extract::State;
use axum::Json;

use crate::api::AppState;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Ready once the default period has published something other than "loading".
///
/// The binary runs a warm-up pass before serving, so "warming" only persists
/// while the feeds themselves report loading.
pub async fn ready(State(state): State<AppState>) -> Json<serde_json::Value> {
    let period = state.config.default_period;
    let status = if state.service.current(period).is_loading {
        "warming"
    } else {
        "ready"
    };
    Json(serde_json::json!({"status": status, "defaultPeriod": period}))
}
