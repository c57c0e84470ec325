//! Final leaderboard entry.

use crate::domain::{Address, ScoringPeriod, Usd};
use serde::{Deserialize, Serialize};

/// Ranked score for one account in one scoring period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountScore {
    /// `"{account}:{period}"`, stable across recomputations.
    pub id: String,
    pub account: Address,
    /// Realized plus unrealized PnL, net of fees.
    pub absolute_profit: Usd,
    /// `absolute_profit / max_collateral` as a scaled ratio (multiply by 100 for percent).
    pub relative_profit: Usd,
    pub average_size: Usd,
    pub average_leverage: Usd,
    pub wins: u64,
    pub losses: u64,
}

impl AccountScore {
    pub fn score_id(account: &Address, period: ScoringPeriod) -> String {
        format!("{}:{}", account, period)
    }
}
