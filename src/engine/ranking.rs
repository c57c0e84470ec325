use super::aggregator::group_positions_by_account;
use super::scoring::{score_account, ScoringError};
use crate::domain::{
    AccountPerformanceRecord, AccountPositionsSummary, AccountScore, OpenPositionSnapshot,
    ScoringPeriod,
};

/// Sort scores by absolute profit, highest first.
///
/// Equal profits are ordered by account ascending so output is reproducible.
pub fn rank_scores(scores: &mut [AccountScore]) {
    scores.sort_by(|a, b| {
        b.absolute_profit
            .cmp(&a.absolute_profit)
            .then_with(|| a.account.cmp(&b.account))
    });
}

/// Run one full scoring pass over both feeds.
///
/// Every performance record yields a score; accounts that only appear in
/// `positions` are ignored. The first failing account aborts the whole pass.
pub fn compute_top_accounts(
    records: &[AccountPerformanceRecord],
    positions: &[OpenPositionSnapshot],
    period: ScoringPeriod,
) -> Result<Vec<AccountScore>, ScoringError> {
    let open_positions_by_account = group_positions_by_account(positions)?;

    let mut scores = records
        .iter()
        .map(|record| match open_positions_by_account.get(&record.account) {
            Some(summary) => score_account(record, summary, period),
            None => score_account(
                record,
                &AccountPositionsSummary::zero(record.account.clone()),
                period,
            ),
        })
        .collect::<Result<Vec<_>, _>>()?;

    rank_scores(&mut scores);
    Ok(scores)
}
