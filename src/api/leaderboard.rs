use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

use crate::api::AppState;
use crate::domain::{AccountScore, ScoringPeriod};
use crate::error::AppError;
use crate::orchestration::TopAccounts;

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub period: Option<String>,
}

/// Wire form of [`TopAccounts`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopAccountsResponse {
    pub data: Arc<Vec<AccountScore>>,
    pub is_loading: bool,
    pub error: Option<String>,
}

pub async fn get_leaderboard(
    Query(params): Query<LeaderboardQuery>,
    State(state): State<AppState>,
) -> Result<Json<TopAccountsResponse>, AppError> {
    let period = parse_period(params.period.as_deref(), state.config.default_period)?;

    let TopAccounts {
        data,
        is_loading,
        error,
    } = state.service.top_accounts(period).await;

    if let Some(err) = error {
        return Err(err.into());
    }

    Ok(Json(TopAccountsResponse {
        data,
        is_loading,
        error: None,
    }))
}

fn parse_period(raw: Option<&str>, default: ScoringPeriod) -> Result<ScoringPeriod, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => ScoringPeriod::from_str(s).map_err(|_| {
            AppError::BadRequest("period must be one of: day, week, month, total".to_string())
        }),
        None => Ok(default),
    }
}
