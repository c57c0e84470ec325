//! Memoizing driver that republishes the ranked leaderboard for one period.

use super::fingerprint::InputsFingerprint;
use crate::datasource::{FeedError, FeedState};
use crate::domain::{AccountPerformanceRecord, AccountScore, OpenPositionSnapshot, ScoringPeriod};
use crate::engine::{compute_top_accounts, ScoringError};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    Performance,
    Positions,
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedKind::Performance => write!(f, "performance"),
            FeedKind::Positions => write!(f, "positions"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaderboardError {
    #[error("{feed} feed failed: {source}")]
    FeedUnavailable { feed: FeedKind, source: FeedError },
    #[error(transparent)]
    DataIntegrity(#[from] ScoringError),
}

/// Published leaderboard: `{ data, isLoading, error }`.
///
/// `data` is shared read-only between consumers and is empty whenever
/// `is_loading` is set or `error` is present.
#[derive(Debug, Clone, PartialEq)]
pub struct TopAccounts {
    pub data: Arc<Vec<AccountScore>>,
    pub is_loading: bool,
    pub error: Option<LeaderboardError>,
}

impl TopAccounts {
    pub fn ready(data: Arc<Vec<AccountScore>>) -> Self {
        Self {
            data,
            is_loading: false,
            error: None,
        }
    }

    pub fn loading() -> Self {
        Self {
            data: Arc::new(Vec::new()),
            is_loading: true,
            error: None,
        }
    }

    pub fn failed(error: LeaderboardError) -> Self {
        Self {
            data: Arc::new(Vec::new()),
            is_loading: false,
            error: Some(error),
        }
    }
}

#[derive(Debug)]
struct CachedPass {
    fingerprint: InputsFingerprint,
    data: Arc<Vec<AccountScore>>,
}

/// Recomputes the ranking only when the feeds' fingerprint changes.
///
/// Each update carries a ticket taken when its feeds were read; an update
/// older than the newest one already accepted is dropped.
#[derive(Debug)]
pub struct LeaderboardDriver {
    period: ScoringPeriod,
    cache: Option<CachedPass>,
    published: TopAccounts,
    latest_ticket: Option<u64>,
    aggregation_runs: u64,
}

impl LeaderboardDriver {
    pub fn new(period: ScoringPeriod) -> Self {
        Self {
            period,
            cache: None,
            published: TopAccounts::loading(),
            latest_ticket: None,
            aggregation_runs: 0,
        }
    }

    /// The most recently published result.
    pub fn current(&self) -> TopAccounts {
        self.published.clone()
    }

    /// Number of full aggregation + scoring passes run so far.
    pub fn aggregation_runs(&self) -> u64 {
        self.aggregation_runs
    }

    pub fn update(
        &mut self,
        ticket: u64,
        performance: FeedState<AccountPerformanceRecord>,
        positions: FeedState<OpenPositionSnapshot>,
    ) -> TopAccounts {
        if let Some(latest) = self.latest_ticket {
            if ticket < latest {
                debug!(
                    period = %self.period,
                    ticket,
                    latest,
                    "Discarding stale leaderboard pass"
                );
                return self.current();
            }
        }
        self.latest_ticket = Some(ticket);
        self.published = self.evaluate(performance, positions);
        self.current()
    }

    fn evaluate(
        &mut self,
        performance: FeedState<AccountPerformanceRecord>,
        positions: FeedState<OpenPositionSnapshot>,
    ) -> TopAccounts {
        for (feed, feed_error) in [
            (FeedKind::Performance, performance.error.clone()),
            (FeedKind::Positions, positions.error.clone()),
        ] {
            if let Some(source) = feed_error {
                warn!(period = %self.period, %feed, error = %source, "Feed reported an error");
                return TopAccounts::failed(LeaderboardError::FeedUnavailable { feed, source });
            }
        }

        if performance.is_loading || positions.is_loading {
            return TopAccounts::loading();
        }

        let fingerprint = InputsFingerprint::new(self.period, &performance.data, &positions.data);
        if let Some(cached) = &self.cache {
            if cached.fingerprint == fingerprint {
                debug!(period = %self.period, "Feed fingerprint unchanged, reusing ranking");
                return TopAccounts::ready(cached.data.clone());
            }
        }

        self.aggregation_runs += 1;
        match compute_top_accounts(&performance.data, &positions.data, self.period) {
            Ok(scores) => {
                info!(
                    period = %self.period,
                    accounts = scores.len(),
                    open_positions = positions.data.len(),
                    "Recomputed leaderboard"
                );
                let data = Arc::new(scores);
                self.cache = Some(CachedPass {
                    fingerprint,
                    data: data.clone(),
                });
                TopAccounts::ready(data)
            }
            Err(e) => {
                error!(period = %self.period, error = %e, "Leaderboard pass aborted");
                TopAccounts::failed(e.into())
            }
        }
    }
}
