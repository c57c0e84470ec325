//! Signed fixed-point USD amounts at the exchange's on-chain scale.
//!
//! Values are stored as a sign plus a 256-bit magnitude so that intermediate
//! products such as `profit * 10^30` stay exact. Magnitudes above `2^256 - 1`
//! are rejected at parse time and every arithmetic operation is checked.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uint::construct_uint;

construct_uint! {
    /// 256-bit unsigned integer.
    pub struct U256(4);
}

/// Number of decimal digits carried by every [`Usd`] value.
pub const USD_DECIMALS: usize = 30;

fn precision() -> U256 {
    U256::exp10(USD_DECIMALS)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsdParseError {
    #[error("empty amount")]
    Empty,
    #[error("invalid digits in amount: {0}")]
    InvalidDigits(String),
    #[error("more than 30 fractional digits: {0}")]
    TooManyDecimals(String),
    #[error("amount out of range: {0}")]
    Overflow(String),
}

/// Fixed-point USD value scaled by `10^USD_DECIMALS`.
///
/// Serializes as the raw scaled integer string, e.g. `"80000000000000000000000000000000"`
/// for 80 USD. Zero is never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Usd {
    negative: bool,
    magnitude: U256,
}

impl Usd {
    fn from_parts(negative: bool, magnitude: U256) -> Self {
        Usd {
            negative: negative && !magnitude.is_zero(),
            magnitude,
        }
    }

    /// The additive identity (0).
    pub fn zero() -> Self {
        Usd::default()
    }

    /// Exactly 1 USD.
    pub fn one() -> Self {
        Usd::from_parts(false, precision())
    }

    /// A whole number of dollars.
    pub fn from_whole(value: i64) -> Self {
        let magnitude = U256::from(value.unsigned_abs()) * precision();
        Usd::from_parts(value < 0, magnitude)
    }

    /// Parse an already-scaled integer such as an on-chain amount (`"-1500000…"`).
    pub fn from_raw_str(s: &str) -> Result<Self, UsdParseError> {
        let s = s.trim();
        let (negative, digits) = split_sign(s);
        if digits.is_empty() {
            return Err(UsdParseError::Empty);
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(UsdParseError::InvalidDigits(s.to_string()));
        }
        let magnitude =
            U256::from_dec_str(digits).map_err(|_| UsdParseError::Overflow(s.to_string()))?;
        Ok(Usd::from_parts(negative, magnitude))
    }

    /// The raw scaled integer as a decimal string.
    pub fn to_raw_string(&self) -> String {
        if self.negative {
            format!("-{}", self.magnitude)
        } else {
            self.magnitude.to_string()
        }
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude.is_zero()
    }

    /// Returns true if the value is < 0.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Returns true if the value is > 0.
    pub fn is_positive(&self) -> bool {
        !self.negative && !self.is_zero()
    }

    pub fn abs(&self) -> Self {
        Usd::from_parts(false, self.magnitude)
    }

    pub fn checked_add(self, rhs: Usd) -> Option<Usd> {
        if self.negative == rhs.negative {
            let magnitude = self.magnitude.checked_add(rhs.magnitude)?;
            return Some(Usd::from_parts(self.negative, magnitude));
        }
        if self.magnitude >= rhs.magnitude {
            Some(Usd::from_parts(self.negative, self.magnitude - rhs.magnitude))
        } else {
            Some(Usd::from_parts(rhs.negative, rhs.magnitude - self.magnitude))
        }
    }

    pub fn checked_sub(self, rhs: Usd) -> Option<Usd> {
        self.checked_add(-rhs)
    }

    /// Fixed-point product: `self * rhs / 10^USD_DECIMALS`, truncated toward zero.
    pub fn checked_mul(self, rhs: Usd) -> Option<Usd> {
        let magnitude = self
            .magnitude
            .checked_mul(rhs.magnitude)?
            .checked_div(precision())?;
        Some(Usd::from_parts(self.negative != rhs.negative, magnitude))
    }

    /// Fixed-point quotient: `self * 10^USD_DECIMALS / rhs`, truncated toward zero.
    ///
    /// Returns `None` when `rhs` is zero or the scaled numerator overflows.
    pub fn checked_div(self, rhs: Usd) -> Option<Usd> {
        if rhs.is_zero() {
            return None;
        }
        let magnitude = self
            .magnitude
            .checked_mul(precision())?
            .checked_div(rhs.magnitude)?;
        Some(Usd::from_parts(self.negative != rhs.negative, magnitude))
    }

    /// Divide by a plain count (e.g. number of positions), truncated toward zero.
    pub fn checked_div_count(self, count: u64) -> Option<Usd> {
        let magnitude = self.magnitude.checked_div(U256::from(count))?;
        Some(Usd::from_parts(self.negative, magnitude))
    }
}

fn split_sign(s: &str) -> (bool, &str) {
    match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    }
}

impl Ord for Usd {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, false) => self.magnitude.cmp(&other.magnitude),
            (true, true) => other.magnitude.cmp(&self.magnitude),
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
        }
    }
}

impl PartialOrd for Usd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Usd {
    /// Human-readable decimal without exponent, trailing zeros trimmed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (whole, frac) = self.magnitude.div_mod(precision());
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "{}", whole)?;
        if !frac.is_zero() {
            let frac = format!("{:0>width$}", frac.to_string(), width = USD_DECIMALS);
            write!(f, ".{}", frac.trim_end_matches('0'))?;
        }
        Ok(())
    }
}

impl FromStr for Usd {
    type Err = UsdParseError;

    /// Parse a human decimal amount such as `"80"`, `"-0.08"` or `"1250.5"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (negative, body) = split_sign(s);
        let (whole, frac) = body.split_once('.').unwrap_or((body, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(UsdParseError::Empty);
        }
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole) || !all_digits(frac) {
            return Err(UsdParseError::InvalidDigits(s.to_string()));
        }
        if frac.len() > USD_DECIMALS {
            return Err(UsdParseError::TooManyDecimals(s.to_string()));
        }

        let overflow = || UsdParseError::Overflow(s.to_string());
        let whole = if whole.is_empty() {
            U256::zero()
        } else {
            U256::from_dec_str(whole).map_err(|_| overflow())?
        };
        let frac = format!("{:0<width$}", frac, width = USD_DECIMALS);
        let frac = U256::from_dec_str(&frac).map_err(|_| overflow())?;
        let magnitude = whole
            .checked_mul(precision())
            .and_then(|scaled| scaled.checked_add(frac))
            .ok_or_else(overflow)?;
        Ok(Usd::from_parts(negative, magnitude))
    }
}

impl TryFrom<String> for Usd {
    type Error = UsdParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Usd::from_raw_str(&value)
    }
}

impl From<Usd> for String {
    fn from(value: Usd) -> Self {
        value.to_raw_string()
    }
}

impl std::ops::Neg for Usd {
    type Output = Usd;

    fn neg(self) -> Usd {
        Usd::from_parts(!self.negative, self.magnitude)
    }
}
