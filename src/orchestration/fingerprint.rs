//! Cheap, order-sensitive fingerprints of feed composition.
//!
//! Only identifiers are hashed (account ids, position keys), never amounts:
//! a feed whose values move but whose membership is unchanged keeps its
//! fingerprint.

use crate::domain::{AccountPerformanceRecord, OpenPositionSnapshot, ScoringPeriod};
use sha2::{Digest, Sha256};

const ID_SEPARATOR: [u8; 1] = [0x1f];

/// Hex SHA-256 over a feed's identifiers in feed order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedFingerprint(String);

impl FeedFingerprint {
    pub fn of<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let mut hasher = Sha256::new();
        for id in ids {
            hasher.update(id.as_bytes());
            hasher.update(ID_SEPARATOR);
        }
        FeedFingerprint(hex::encode(hasher.finalize()))
    }

    pub fn of_performance(records: &[AccountPerformanceRecord]) -> Self {
        Self::of(records.iter().map(|r| r.account.as_str()))
    }

    pub fn of_positions(positions: &[OpenPositionSnapshot]) -> Self {
        Self::of(positions.iter().map(|p| p.key.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Fingerprint of everything a scoring pass reads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputsFingerprint {
    pub period: ScoringPeriod,
    pub performance: FeedFingerprint,
    pub positions: FeedFingerprint,
}

impl InputsFingerprint {
    pub fn new(
        period: ScoringPeriod,
        records: &[AccountPerformanceRecord],
        positions: &[OpenPositionSnapshot],
    ) -> Self {
        Self {
            period,
            performance: FeedFingerprint::of_performance(records),
            positions: FeedFingerprint::of_positions(positions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, Usd};

    #[test]
    fn test_fingerprint_is_hex_sha256() {
        let fp = FeedFingerprint::of(["0xa", "0xb"]);
        assert_eq!(fp.as_str().len(), 64);
        assert!(fp.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(fp, FeedFingerprint::of(["0xa", "0xb"]));
    }

    #[test]
    fn test_fingerprint_is_order_sensitive() {
        assert_ne!(
            FeedFingerprint::of(["0xa", "0xb"]),
            FeedFingerprint::of(["0xb", "0xa"])
        );
    }

    #[test]
    fn test_fingerprint_separates_ids() {
        assert_ne!(FeedFingerprint::of(["ab", "c"]), FeedFingerprint::of(["a", "bc"]));
        assert_ne!(FeedFingerprint::of(Vec::<&str>::new()), FeedFingerprint::of([""]));
    }

    #[test]
    fn test_value_changes_keep_fingerprint() {
        let mut p = OpenPositionSnapshot::empty(Address::new("0x1"), "key-1");
        let before = FeedFingerprint::of_positions(std::slice::from_ref(&p));
        p.unrealized_pnl = Usd::from_whole(42);
        let after = FeedFingerprint::of_positions(std::slice::from_ref(&p));
        assert_eq!(before, after);
    }

    #[test]
    fn test_inputs_fingerprint_includes_period() {
        let records = vec![AccountPerformanceRecord::empty(Address::new("0x1"))];
        let day = InputsFingerprint::new(ScoringPeriod::Day, &records, &[]);
        let week = InputsFingerprint::new(ScoringPeriod::Week, &records, &[]);
        assert_ne!(day, week);
        assert_eq!(day.performance, week.performance);
    }
}
