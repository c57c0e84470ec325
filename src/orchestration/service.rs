use super::driver::{LeaderboardDriver, TopAccounts};
use crate::datasource::{PerformanceFeed, PositionsFeed};
use crate::domain::ScoringPeriod;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};

/// Reads both feeds and keeps one memoizing driver per scoring period.
pub struct LeaderboardService {
    performance: Arc<dyn PerformanceFeed>,
    positions: Arc<dyn PositionsFeed>,
    drivers: Mutex<HashMap<ScoringPeriod, LeaderboardDriver>>,
    next_ticket: AtomicU64,
}

impl LeaderboardService {
    pub fn new(performance: Arc<dyn PerformanceFeed>, positions: Arc<dyn PositionsFeed>) -> Self {
        Self {
            performance,
            positions,
            drivers: Mutex::new(HashMap::new()),
            next_ticket: AtomicU64::new(0),
        }
    }

    /// Read both feeds and publish the ranking for `period`.
    ///
    /// The ticket is taken before reading, so when two calls overlap the one
    /// that read later wins regardless of which finishes first.
    pub async fn top_accounts(&self, period: ScoringPeriod) -> TopAccounts {
        let ticket = self.next_ticket.fetch_add(1, Ordering::SeqCst);

        let (performance, positions) = futures::join!(
            self.performance.account_performance(period),
            self.positions.open_positions()
        );

        let mut drivers = self.drivers.lock().unwrap_or_else(PoisonError::into_inner);
        drivers
            .entry(period)
            .or_insert_with(|| LeaderboardDriver::new(period))
            .update(ticket, performance, positions)
    }

    /// Run the first pass for `period` so readiness does not wait on a client.
    pub async fn warm_up(&self, period: ScoringPeriod) -> TopAccounts {
        let published = self.top_accounts(period).await;
        match &published.error {
            Some(e) => warn!(%period, error = %e, "Warm-up pass failed"),
            None if published.is_loading => info!(%period, "Feeds still loading after warm-up"),
            None => info!(%period, accounts = published.data.len(), "Leaderboard warmed up"),
        }
        published
    }

    /// Last published ranking for `period` without touching the feeds.
    pub fn current(&self, period: ScoringPeriod) -> TopAccounts {
        let drivers = self.drivers.lock().unwrap_or_else(PoisonError::into_inner);
        drivers
            .get(&period)
            .map(LeaderboardDriver::current)
            .unwrap_or_else(TopAccounts::loading)
    }

    pub fn aggregation_runs(&self, period: ScoringPeriod) -> u64 {
        let drivers = self.drivers.lock().unwrap_or_else(PoisonError::into_inner);
        drivers
            .get(&period)
            .map(LeaderboardDriver::aggregation_runs)
            .unwrap_or(0)
    }
}

impl fmt::Debug for LeaderboardService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeaderboardService")
            .field("performance", &self.performance)
            .field("positions", &self.positions)
            .field("next_ticket", &self.next_ticket)
            .finish_non_exhaustive()
    }
}
