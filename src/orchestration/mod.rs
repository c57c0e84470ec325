//! Recomputation driver around the pure engine.
//!
//! This module provides:
//! - Feed fingerprints used to skip passes whose inputs did not change
//! - A per-period memoizing driver publishing `{ data, isLoading, error }`
//! - An async service reading both feeds for each request

pub mod driver;
pub mod fingerprint;
pub mod service;

pub use driver::{FeedKind, LeaderboardDriver, LeaderboardError, TopAccounts};
pub use fingerprint::{FeedFingerprint, InputsFingerprint};
pub use service::LeaderboardService;
