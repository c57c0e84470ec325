pub mod api;
pub mod config;
pub mod datasource;
pub mod domain;
pub mod engine;
pub mod error;
pub mod orchestration;

pub use config::Config;
pub use datasource::{FeedError, FeedState, JsonFileFeed, MockFeed, PerformanceFeed, PositionsFeed};
pub use domain::{
    AccountPerformanceRecord, AccountPositionsSummary, AccountScore, Address, OpenPositionSnapshot,
    ScoringPeriod, Usd,
};
pub use error::AppError;
pub use orchestration::{LeaderboardDriver, LeaderboardError, LeaderboardService, TopAccounts};
