//! Pure computation engine for the account leaderboard.
//!
//! No I/O happens here: feeds go in, a ranked score list comes out.

pub mod aggregator;
pub mod ranking;
pub mod scoring;

pub use aggregator::{group_positions_by_account, PositionsByAccount};
pub use ranking::{compute_top_accounts, rank_scores};
pub use scoring::{realized_pnl, score_account, unrealized_pnl, IntegrityFault, ScoringError};
