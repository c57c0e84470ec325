//! Inbound feed boundary: closed-trade performance and live open positions.

use crate::domain::{AccountPerformanceRecord, OpenPositionSnapshot, ScoringPeriod};
use async_trait::async_trait;
use std::fmt;

pub mod file;
pub mod mock;

pub use file::JsonFileFeed;
pub use mock::{MockFeed, MockFeedBuilder};

/// One read of a feed: `{ data, isLoading, error }`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedState<T> {
    pub data: Vec<T>,
    pub is_loading: bool,
    pub error: Option<FeedError>,
}

impl<T> FeedState<T> {
    pub fn ready(data: Vec<T>) -> Self {
        Self {
            data,
            is_loading: false,
            error: None,
        }
    }

    pub fn loading() -> Self {
        Self {
            data: Vec::new(),
            is_loading: true,
            error: None,
        }
    }

    pub fn failed(error: FeedError) -> Self {
        Self {
            data: Vec::new(),
            is_loading: false,
            error: Some(error),
        }
    }
}

/// Closed-trade performance records for a scoring period.
///
/// Implementations own retry policy; a returned error is final for the read.
#[async_trait]
pub trait PerformanceFeed: Send + Sync + fmt::Debug {
    async fn account_performance(
        &self,
        period: ScoringPeriod,
    ) -> FeedState<AccountPerformanceRecord>;
}

/// Snapshot of all currently-open positions.
#[async_trait]
pub trait PositionsFeed: Send + Sync + fmt::Debug {
    async fn open_positions(&self) -> FeedState<OpenPositionSnapshot>;
}

/// Error reported by a feed adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// Source has nothing to serve (e.g. snapshot not published yet)
    Unavailable(String),
    /// I/O failure while reading the source
    Io(String),
    /// Malformed payload
    Parse(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Unavailable(msg) => write!(f, "Feed unavailable: {}", msg),
            FeedError::Io(msg) => write!(f, "I/O error: {}", msg),
            FeedError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for FeedError {}
