//! In-memory feeds for tests and local runs.

use super::{FeedError, FeedState, PerformanceFeed, PositionsFeed};
use crate::domain::{AccountPerformanceRecord, OpenPositionSnapshot, ScoringPeriod};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct MockState {
    records: HashMap<ScoringPeriod, Vec<AccountPerformanceRecord>>,
    positions: Vec<OpenPositionSnapshot>,
    performance_loading: bool,
    positions_loading: bool,
    performance_error: Option<FeedError>,
    positions_error: Option<FeedError>,
}

/// Mock feed serving both performance records and open positions.
///
/// Clones share state, so a test can keep a handle and swap data between reads.
#[derive(Debug, Clone, Default)]
pub struct MockFeed {
    state: Arc<RwLock<MockState>>,
}

/// Seeds a [`MockFeed`] before it is shared.
#[derive(Debug, Default)]
pub struct MockFeedBuilder {
    state: MockState,
}

impl MockFeedBuilder {
    /// Serve these records for `period`.
    pub fn with_records(mut self, period: ScoringPeriod, records: Vec<AccountPerformanceRecord>) -> Self {
        self.state.records.insert(period, records);
        self
    }

    /// Serve these open positions.
    pub fn with_positions(mut self, positions: Vec<OpenPositionSnapshot>) -> Self {
        self.state.positions = positions;
        self
    }

    pub fn build(self) -> MockFeed {
        MockFeed {
            state: Arc::new(RwLock::new(self.state)),
        }
    }
}

impl MockFeed {
    /// Create a new mock feed with empty data.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> MockFeedBuilder {
        MockFeedBuilder::default()
    }

    pub async fn set_records(&self, period: ScoringPeriod, records: Vec<AccountPerformanceRecord>) {
        self.state.write().await.records.insert(period, records);
    }

    pub async fn set_positions(&self, positions: Vec<OpenPositionSnapshot>) {
        self.state.write().await.positions = positions;
    }

    pub async fn set_performance_loading(&self, loading: bool) {
        self.state.write().await.performance_loading = loading;
    }

    pub async fn set_positions_loading(&self, loading: bool) {
        self.state.write().await.positions_loading = loading;
    }

    pub async fn set_performance_error(&self, error: Option<FeedError>) {
        self.state.write().await.performance_error = error;
    }

    pub async fn set_positions_error(&self, error: Option<FeedError>) {
        self.state.write().await.positions_error = error;
    }
}

#[async_trait]
impl PerformanceFeed for MockFeed {
    async fn account_performance(
        &self,
        period: ScoringPeriod,
    ) -> FeedState<AccountPerformanceRecord> {
        let state = self.state.read().await;
        if let Some(err) = &state.performance_error {
            return FeedState::failed(err.clone());
        }
        if state.performance_loading {
            return FeedState::loading();
        }
        FeedState::ready(state.records.get(&period).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl PositionsFeed for MockFeed {
    async fn open_positions(&self) -> FeedState<OpenPositionSnapshot> {
        let state = self.state.read().await;
        if let Some(err) = &state.positions_error {
            return FeedState::failed(err.clone());
        }
        if state.positions_loading {
            return FeedState::loading();
        }
        FeedState::ready(state.positions.clone())
    }
}
