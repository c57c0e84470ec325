//! Feed adapter reading JSON snapshots published into a directory.
//!
//! Layout:
//! - `{dir}/performance/{period}.json`: array of performance records
//! - `{dir}/positions.json`: array of open positions

use super::{FeedError, FeedState, PerformanceFeed, PositionsFeed};
use crate::domain::{AccountPerformanceRecord, OpenPositionSnapshot, ScoringPeriod};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Re-reads the snapshot files on every call, so an external publisher can
/// replace them atomically between reads.
#[derive(Debug, Clone)]
pub struct JsonFileFeed {
    dir: PathBuf,
}

impl JsonFileFeed {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn performance_path(&self, period: ScoringPeriod) -> PathBuf {
        self.dir
            .join("performance")
            .join(format!("{}.json", period.as_str()))
    }

    pub fn positions_path(&self) -> PathBuf {
        self.dir.join("positions.json")
    }
}

async fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, FeedError> {
    debug!("Reading feed snapshot {}", path.display());

    let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => FeedError::Unavailable(format!("{} not found", path.display())),
        _ => FeedError::Io(format!("{}: {}", path.display(), e)),
    })?;

    serde_json::from_slice(&bytes)
        .map_err(|e| FeedError::Parse(format!("{}: {}", path.display(), e)))
}

fn into_state<T>(result: Result<Vec<T>, FeedError>) -> FeedState<T> {
    match result {
        Ok(data) => FeedState::ready(data),
        Err(e) => FeedState::failed(e),
    }
}

#[async_trait]
impl PerformanceFeed for JsonFileFeed {
    async fn account_performance(
        &self,
        period: ScoringPeriod,
    ) -> FeedState<AccountPerformanceRecord> {
        into_state(read_json_array(&self.performance_path(period)).await)
    }
}

#[async_trait]
impl PositionsFeed for JsonFileFeed {
    async fn open_positions(&self) -> FeedState<OpenPositionSnapshot> {
        into_state(read_json_array(&self.positions_path()).await)
    }
}
