//! Domain types for the account leaderboard.
//!
//! This module provides:
//! - Fixed-point USD arithmetic at the exchange's 30-decimal scale
//! - Domain primitives: Address, ScoringPeriod
//! - The two inbound feed records and the derived summary and score types

pub mod performance;
pub mod position;
pub mod primitives;
pub mod score;
pub mod usd;

pub use performance::AccountPerformanceRecord;
pub use position::{AccountPositionsSummary, OpenPositionSnapshot};
pub use primitives::{Address, ScoringPeriod};
pub use score::AccountScore;
pub use usd::{Usd, UsdParseError, USD_DECIMALS};
