//! Closed-trade performance aggregates, one per account per scoring period.

use crate::domain::{Address, Usd};
use serde::{Deserialize, Serialize};

/// Historical ledger entry for an account's closed trades in a scoring period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPerformanceRecord {
    pub account: Address,
    /// PnL over all closed trades, before the fees below.
    pub total_pnl: Usd,
    pub borrowing_fee_usd: Usd,
    pub funding_fee_usd: Usd,
    pub position_fee_usd: Usd,
    pub price_impact_usd: Usd,
    /// High-water mark of committed collateral. Zero is an upstream integrity fault.
    pub max_collateral: Usd,
    /// Time-weighted collateral sum. Zero is an upstream integrity fault.
    pub cumsum_collateral: Usd,
    pub cumsum_size: Usd,
    pub sum_max_size: Usd,
    pub closed_count: u64,
    pub wins: u64,
    pub losses: u64,
}

impl AccountPerformanceRecord {
    /// A record with every amount zeroed, for building fixtures field by field.
    pub fn empty(account: Address) -> Self {
        Self {
            account,
            total_pnl: Usd::zero(),
            borrowing_fee_usd: Usd::zero(),
            funding_fee_usd: Usd::zero(),
            position_fee_usd: Usd::zero(),
            price_impact_usd: Usd::zero(),
            max_collateral: Usd::zero(),
            cumsum_collateral: Usd::zero(),
            cumsum_size: Usd::zero(),
            sum_max_size: Usd::zero(),
            closed_count: 0,
            wins: 0,
            losses: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserializes_from_feed_json() {
        let json = serde_json::json!({
            "account": "0xABC",
            "totalPnl": "100",
            "borrowingFeeUsd": "1",
            "fundingFeeUsd": "2",
            "positionFeeUsd": "3",
            "priceImpactUsd": "-4",
            "maxCollateral": "1000",
            "cumsumCollateral": "2000",
            "cumsumSize": "6000",
            "sumMaxSize": "500",
            "closedCount": 2,
            "wins": 1,
            "losses": 1
        });

        let record: AccountPerformanceRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.account.as_str(), "0xabc");
        assert_eq!(record.price_impact_usd, Usd::from_raw_str("-4").unwrap());
        assert_eq!(record.closed_count, 2);
    }
}
