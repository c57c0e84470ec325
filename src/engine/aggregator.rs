use super::scoring::ScoringError;
use crate::domain::{AccountPositionsSummary, Address, OpenPositionSnapshot};
use std::collections::HashMap;

/// Open-position summaries keyed by account. Iteration order is unspecified.
pub type PositionsByAccount = HashMap<Address, AccountPositionsSummary>;

/// Fold open positions into one summary per account in a single pass.
///
/// Accounts without positions are simply absent; callers substitute
/// [`AccountPositionsSummary::zero`]. A total that overflows aborts the
/// whole grouping.
pub fn group_positions_by_account(
    positions: &[OpenPositionSnapshot],
) -> Result<PositionsByAccount, ScoringError> {
    let mut grouping = PositionsByAccount::new();

    for p in positions {
        grouping
            .entry(p.account.clone())
            .or_insert_with(|| AccountPositionsSummary::zero(p.account.clone()))
            .absorb(p)
            .map_err(|quantity| ScoringError::Overflow {
                account: p.account.clone(),
                quantity,
            })?;
    }

    Ok(grouping)
}
