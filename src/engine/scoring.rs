use crate::domain::{
    AccountPerformanceRecord, AccountPositionsSummary, AccountScore, Address, ScoringPeriod, Usd,
};
use std::fmt;
use thiserror::Error;

/// An impossible upstream state detected while scoring an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityFault {
    MaxCollateralZero,
    CumsumCollateralZero,
    /// Neither closed nor open positions.
    NoTrades,
}

impl fmt::Display for IntegrityFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityFault::MaxCollateralZero => write!(f, "max collateral is 0"),
            IntegrityFault::CumsumCollateralZero => write!(f, "collateral history is 0"),
            IntegrityFault::NoTrades => write!(f, "no closed or open positions"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("Account {account} {fault}, please verify data integrity")]
    DataIntegrity {
        account: Address,
        fault: IntegrityFault,
    },
    #[error("Account {account} overflowed computing {quantity}")]
    Overflow {
        account: Address,
        quantity: &'static str,
    },
}

/// PnL from closed trades net of the fees they paid.
///
/// Price impact is added back: the feed reports it net of cost.
/// `None` on overflow.
pub fn realized_pnl(record: &AccountPerformanceRecord) -> Option<Usd> {
    record
        .total_pnl
        .checked_sub(record.borrowing_fee_usd)?
        .checked_sub(record.funding_fee_usd)?
        .checked_sub(record.position_fee_usd)?
        .checked_add(record.price_impact_usd)
}

/// Mark-to-market PnL of open positions net of fees due if they closed now.
/// `None` on overflow.
pub fn unrealized_pnl(summary: &AccountPositionsSummary) -> Option<Usd> {
    summary
        .unrealized_pnl
        .checked_sub(summary.pending_borrowing_fees_usd)?
        .checked_sub(summary.pending_funding_fees_usd)?
        .checked_sub(summary.closing_fee_usd)
}

/// Combine an account's closed-trade record with its open positions into one score.
///
/// Pass [`AccountPositionsSummary::zero`] for accounts without open positions.
pub fn score_account(
    record: &AccountPerformanceRecord,
    positions: &AccountPositionsSummary,
    period: ScoringPeriod,
) -> Result<AccountScore, ScoringError> {
    let account = &record.account;
    let integrity = |fault| ScoringError::DataIntegrity {
        account: account.clone(),
        fault,
    };
    let overflow = |quantity| ScoringError::Overflow {
        account: account.clone(),
        quantity,
    };

    if record.max_collateral.is_zero() {
        return Err(integrity(IntegrityFault::MaxCollateralZero));
    }
    if record.cumsum_collateral.is_zero() {
        return Err(integrity(IntegrityFault::CumsumCollateralZero));
    }
    let positions_count = record
        .closed_count
        .checked_add(positions.open_positions_count)
        .ok_or_else(|| overflow("positions count"))?;
    if positions_count == 0 {
        return Err(integrity(IntegrityFault::NoTrades));
    }

    let realized = realized_pnl(record).ok_or_else(|| overflow("realized pnl"))?;
    let unrealized = unrealized_pnl(positions).ok_or_else(|| overflow("unrealized pnl"))?;
    let absolute_profit = realized
        .checked_add(unrealized)
        .ok_or_else(|| overflow("absolute profit"))?;
    let relative_profit = absolute_profit
        .checked_div(record.max_collateral)
        .ok_or_else(|| overflow("relative profit"))?;

    let sum_max_size = record
        .sum_max_size
        .checked_add(positions.sum_max_size)
        .ok_or_else(|| overflow("sum of max sizes"))?;
    let average_size = sum_max_size
        .checked_div_count(positions_count)
        .ok_or_else(|| overflow("average size"))?;
    let average_leverage = record
        .cumsum_size
        .checked_div(record.cumsum_collateral)
        .ok_or_else(|| overflow("average leverage"))?;

    Ok(AccountScore {
        id: AccountScore::score_id(account, period),
        account: account.clone(),
        absolute_profit,
        relative_profit,
        average_size,
        average_leverage,
        wins: record.wins,
        losses: record.losses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OpenPositionSnapshot;

    fn usd(s: &str) -> Usd {
        s.parse().unwrap()
    }

    fn sample_record() -> AccountPerformanceRecord {
        let mut r = AccountPerformanceRecord::empty(Address::new("0xA"));
        r.total_pnl = usd("100");
        r.borrowing_fee_usd = usd("10");
        r.funding_fee_usd = usd("5");
        r.position_fee_usd = usd("5");
        r.max_collateral = usd("1000");
        r.cumsum_collateral = usd("2000");
        r.cumsum_size = usd("6000");
        r.sum_max_size = usd("500");
        r.closed_count = 2;
        r.wins = 1;
        r.losses = 1;
        r
    }

    #[test]
    fn test_closed_trades_only_scenario() {
        let record = sample_record();
        let zero = AccountPositionsSummary::zero(record.account.clone());

        let score = score_account(&record, &zero, ScoringPeriod::Week).unwrap();

        assert_eq!(score.id, "0xa:week");
        assert_eq!(score.absolute_profit, usd("80"));
        assert_eq!(score.relative_profit, usd("0.08"));
        assert_eq!(score.average_leverage, usd("3"));
        assert_eq!(score.average_size, usd("250"));
        assert_eq!((score.wins, score.losses), (1, 1));
    }

    #[test]
    fn test_price_impact_is_added_back() {
        let mut record = sample_record();
        record.price_impact_usd = usd("-7.5");
        assert_eq!(realized_pnl(&record), Some(usd("72.5")));
    }

    #[test]
    fn test_open_positions_net_pending_fees() {
        let record = sample_record();
        let mut p = OpenPositionSnapshot::empty(record.account.clone(), "k1");
        p.unrealized_pnl = usd("50");
        p.pending_borrowing_fees_usd = usd("2");
        p.pending_funding_fees_usd = usd("3");
        p.closing_fee_usd = usd("5");
        // Collected and claimable fees do not move the score.
        p.collected_position_fees_usd = usd("9");
        p.pending_claimable_funding_fees_usd = usd("4");
        p.max_size = usd("700");

        let mut summary = AccountPositionsSummary::zero(record.account.clone());
        summary.absorb(&p).unwrap();

        assert_eq!(unrealized_pnl(&summary), Some(usd("40")));

        let score = score_account(&record, &summary, ScoringPeriod::Day).unwrap();
        assert_eq!(score.absolute_profit, usd("120"));
        assert_eq!(score.relative_profit, usd("0.12"));
        // (500 + 700) / (2 closed + 1 open)
        assert_eq!(score.average_size, usd("400"));
    }

    #[test]
    fn test_negative_relative_profit_truncates_toward_zero() {
        let mut record = sample_record();
        record.total_pnl = usd("-1");
        record.borrowing_fee_usd = Usd::zero();
        record.funding_fee_usd = Usd::zero();
        record.position_fee_usd = Usd::zero();
        record.max_collateral = usd("3");
        let zero = AccountPositionsSummary::zero(record.account.clone());

        let score = score_account(&record, &zero, ScoringPeriod::Total).unwrap();
        assert_eq!(score.relative_profit.to_string(), format!("-0.{}", "3".repeat(30)));
    }

    #[test]
    fn test_zero_max_collateral_is_integrity_fault() {
        let mut record = sample_record();
        record.max_collateral = Usd::zero();
        record.cumsum_collateral = Usd::zero();
        let zero = AccountPositionsSummary::zero(record.account.clone());

        let err = score_account(&record, &zero, ScoringPeriod::Week).unwrap_err();
        assert_eq!(
            err,
            ScoringError::DataIntegrity {
                account: Address::new("0xa"),
                fault: IntegrityFault::MaxCollateralZero,
            }
        );
        assert_eq!(
            err.to_string(),
            "Account 0xa max collateral is 0, please verify data integrity"
        );
    }

    #[test]
    fn test_zero_cumsum_collateral_is_integrity_fault() {
        let mut record = sample_record();
        record.cumsum_collateral = Usd::zero();
        let zero = AccountPositionsSummary::zero(record.account.clone());

        let err = score_account(&record, &zero, ScoringPeriod::Week).unwrap_err();
        assert!(matches!(
            err,
            ScoringError::DataIntegrity {
                fault: IntegrityFault::CumsumCollateralZero,
                ..
            }
        ));
    }

    #[test]
    fn test_no_trades_is_integrity_fault() {
        let mut record = sample_record();
        record.closed_count = 0;
        let zero = AccountPositionsSummary::zero(record.account.clone());

        let err = score_account(&record, &zero, ScoringPeriod::Week).unwrap_err();
        assert!(matches!(
            err,
            ScoringError::DataIntegrity {
                fault: IntegrityFault::NoTrades,
                ..
            }
        ));
    }

    #[test]
    fn test_open_positions_alone_satisfy_trade_count() {
        let mut record = sample_record();
        record.closed_count = 0;
        let mut summary = AccountPositionsSummary::zero(record.account.clone());
        summary
            .absorb(&OpenPositionSnapshot::empty(record.account.clone(), "k1"))
            .unwrap();

        let score = score_account(&record, &summary, ScoringPeriod::Week).unwrap();
        assert_eq!(score.average_size, usd("500"));
    }

    #[test]
    fn test_overflow_is_reported() {
        let mut record = sample_record();
        record.total_pnl = Usd::from_raw_str(&"9".repeat(70)).unwrap();
        let zero = AccountPositionsSummary::zero(record.account.clone());

        let err = score_account(&record, &zero, ScoringPeriod::Week).unwrap_err();
        assert!(matches!(
            err,
            ScoringError::Overflow {
                quantity: "relative profit",
                ..
            }
        ));
    }

    #[test]
    fn test_realized_pnl_overflow_is_reported() {
        let huge = Usd::from_raw_str(&format!("6{}", "0".repeat(76))).unwrap();
        let mut record = sample_record();
        record.borrowing_fee_usd = Usd::zero();
        record.funding_fee_usd = Usd::zero();
        record.position_fee_usd = Usd::zero();
        record.total_pnl = huge;
        record.price_impact_usd = huge;
        assert_eq!(realized_pnl(&record), None);

        let zero = AccountPositionsSummary::zero(record.account.clone());
        let err = score_account(&record, &zero, ScoringPeriod::Week).unwrap_err();
        assert_eq!(
            err,
            ScoringError::Overflow {
                account: Address::new("0xa"),
                quantity: "realized pnl",
            }
        );
    }

    #[test]
    fn test_unrealized_pnl_overflow_is_reported() {
        let huge = Usd::from_raw_str(&format!("6{}", "0".repeat(76))).unwrap();
        let record = sample_record();
        let mut summary = AccountPositionsSummary::zero(record.account.clone());
        summary.open_positions_count = 1;
        summary.unrealized_pnl = -huge;
        summary.closing_fee_usd = huge;

        let err = score_account(&record, &summary, ScoringPeriod::Week).unwrap_err();
        assert!(matches!(
            err,
            ScoringError::Overflow {
                quantity: "unrealized pnl",
                ..
            }
        ));
    }
}
