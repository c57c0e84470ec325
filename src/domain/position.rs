//! Live open positions and their per-account summary.

use crate::domain::{Address, Usd};
use serde::{Deserialize, Serialize};

/// One currently-open position as reported by the positions feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenPositionSnapshot {
    pub account: Address,
    /// Unique position identifier; only used for change detection.
    pub key: String,
    pub unrealized_pnl: Usd,
    pub size_in_usd: Usd,
    pub collateral_amount_usd: Usd,
    pub max_size: Usd,
    pub price_impact_usd: Usd,
    pub collected_borrowing_fees_usd: Usd,
    pub collected_funding_fees_usd: Usd,
    pub collected_position_fees_usd: Usd,
    pub pending_borrowing_fees_usd: Usd,
    pub pending_funding_fees_usd: Usd,
    pub pending_claimable_funding_fees_usd: Usd,
    pub closing_fee_usd: Usd,
}

impl OpenPositionSnapshot {
    /// A snapshot with every amount zeroed.
    pub fn empty(account: Address, key: impl Into<String>) -> Self {
        Self {
            account,
            key: key.into(),
            unrealized_pnl: Usd::zero(),
            size_in_usd: Usd::zero(),
            collateral_amount_usd: Usd::zero(),
            max_size: Usd::zero(),
            price_impact_usd: Usd::zero(),
            collected_borrowing_fees_usd: Usd::zero(),
            collected_funding_fees_usd: Usd::zero(),
            collected_position_fees_usd: Usd::zero(),
            pending_borrowing_fees_usd: Usd::zero(),
            pending_funding_fees_usd: Usd::zero(),
            pending_claimable_funding_fees_usd: Usd::zero(),
            closing_fee_usd: Usd::zero(),
        }
    }
}

/// Field-wise sum of all open positions of one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPositionsSummary {
    pub account: Address,
    pub unrealized_pnl: Usd,
    pub sum_size: Usd,
    pub sum_collateral: Usd,
    pub sum_max_size: Usd,
    pub price_impact_usd: Usd,
    pub collected_borrowing_fees_usd: Usd,
    pub collected_funding_fees_usd: Usd,
    pub collected_position_fees_usd: Usd,
    pub pending_borrowing_fees_usd: Usd,
    pub pending_funding_fees_usd: Usd,
    pub pending_claimable_funding_fees_usd: Usd,
    pub closing_fee_usd: Usd,
    pub open_positions_count: u64,
}

impl AccountPositionsSummary {
    /// Fresh all-zero summary; also the stand-in for accounts without open positions.
    pub fn zero(account: Address) -> Self {
        Self {
            account,
            unrealized_pnl: Usd::zero(),
            sum_size: Usd::zero(),
            sum_collateral: Usd::zero(),
            sum_max_size: Usd::zero(),
            price_impact_usd: Usd::zero(),
            collected_borrowing_fees_usd: Usd::zero(),
            collected_funding_fees_usd: Usd::zero(),
            collected_position_fees_usd: Usd::zero(),
            pending_borrowing_fees_usd: Usd::zero(),
            pending_funding_fees_usd: Usd::zero(),
            pending_claimable_funding_fees_usd: Usd::zero(),
            closing_fee_usd: Usd::zero(),
            open_positions_count: 0,
        }
    }

    /// Add one snapshot into the running totals. No validation is applied.
    ///
    /// On overflow the name of the offending total is returned and the
    /// summary is left partially updated; callers discard it.
    pub fn absorb(&mut self, p: &OpenPositionSnapshot) -> Result<(), &'static str> {
        self.open_positions_count = self
            .open_positions_count
            .checked_add(1)
            .ok_or("open positions count")?;

        accumulate(&mut self.unrealized_pnl, p.unrealized_pnl, "unrealized pnl")?;
        accumulate(&mut self.sum_size, p.size_in_usd, "sum of sizes")?;
        accumulate(&mut self.sum_collateral, p.collateral_amount_usd, "sum of collateral")?;
        accumulate(&mut self.sum_max_size, p.max_size, "sum of max sizes")?;
        accumulate(&mut self.price_impact_usd, p.price_impact_usd, "price impact")?;
        accumulate(
            &mut self.collected_borrowing_fees_usd,
            p.collected_borrowing_fees_usd,
            "collected borrowing fees",
        )?;
        accumulate(
            &mut self.collected_funding_fees_usd,
            p.collected_funding_fees_usd,
            "collected funding fees",
        )?;
        accumulate(
            &mut self.collected_position_fees_usd,
            p.collected_position_fees_usd,
            "collected position fees",
        )?;
        accumulate(
            &mut self.pending_borrowing_fees_usd,
            p.pending_borrowing_fees_usd,
            "pending borrowing fees",
        )?;
        accumulate(
            &mut self.pending_funding_fees_usd,
            p.pending_funding_fees_usd,
            "pending funding fees",
        )?;
        accumulate(
            &mut self.pending_claimable_funding_fees_usd,
            p.pending_claimable_funding_fees_usd,
            "pending claimable funding fees",
        )?;
        accumulate(&mut self.closing_fee_usd, p.closing_fee_usd, "closing fee")?;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.open_positions_count == 0
    }
}

fn accumulate(total: &mut Usd, amount: Usd, name: &'static str) -> Result<(), &'static str> {
    *total = total.checked_add(amount).ok_or(name)?;
    Ok(())
}
