use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::orchestration::LeaderboardError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Feed unavailable: {0}")]
    FeedUnavailable(String),
    #[error("Data integrity fault: {0}")]
    DataIntegrity(String),
}

impl From<LeaderboardError> for AppError {
    fn from(err: LeaderboardError) -> Self {
        match err {
            LeaderboardError::FeedUnavailable { .. } => AppError::FeedUnavailable(err.to_string()),
            LeaderboardError::DataIntegrity(_) => AppError::DataIntegrity(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            // Leaderboard failures keep the `{ data, isLoading, error }` shape.
            AppError::FeedUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({ "data": [], "isLoading": false, "error": msg }),
            ),
            AppError::DataIntegrity(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "data": [], "isLoading": false, "error": msg }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
