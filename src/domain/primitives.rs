//! Domain primitives: Address, ScoringPeriod.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Trading account address, trimmed and lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Create an Address, normalizing case so feeds that disagree on
    /// checksum casing still pair up.
    pub fn new(addr: impl AsRef<str>) -> Self {
        Address(addr.as_ref().trim().to_ascii_lowercase())
    }

    /// Get the address as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Address {
    fn from(value: String) -> Self {
        Address::new(value)
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Time window over which closed-trade performance is aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringPeriod {
    Day,
    Week,
    Month,
    /// All-time.
    Total,
}

impl ScoringPeriod {
    pub const ALL: [ScoringPeriod; 4] = [
        ScoringPeriod::Day,
        ScoringPeriod::Week,
        ScoringPeriod::Month,
        ScoringPeriod::Total,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringPeriod::Day => "day",
            ScoringPeriod::Week => "week",
            ScoringPeriod::Month => "month",
            ScoringPeriod::Total => "total",
        }
    }
}

impl FromStr for ScoringPeriod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(ScoringPeriod::Day),
            "week" => Ok(ScoringPeriod::Week),
            "month" => Ok(ScoringPeriod::Month),
            "total" => Ok(ScoringPeriod::Total),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for ScoringPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
