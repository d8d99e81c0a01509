//! Lossless decimal numeric type backed by rust_decimal.
//!
//! Prices and thresholds are stored and compared as decimals so that the
//! threshold test never suffers from float rounding at the boundary.

use rust_decimal::Decimal as RustDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lossless decimal numeric type for prices and fractional thresholds.
///
/// Serializes to JSON number (not string) by default.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Decimal(#[serde(with = "rust_decimal::serde::float")] RustDecimal);

impl Decimal {
    /// Create a Decimal from a RustDecimal.
    pub fn new(value: RustDecimal) -> Self {
        Decimal(value)
    }

    /// Parse a Decimal from a string losslessly.
    ///
    /// # Errors
    /// Returns an error if the string is not a valid decimal number.
    pub fn from_str_canonical(s: &str) -> Result<Self, rust_decimal::Error> {
        RustDecimal::from_str(s.trim()).map(Decimal)
    }

    /// Format the Decimal as a canonical string (no exponent notation, no trailing zeros).
    pub fn to_canonical_string(&self) -> String {
        format!("{}", self.0.normalize())
    }

    /// Get the underlying RustDecimal.
    pub fn inner(&self) -> RustDecimal {
        self.0
    }

    /// The additive identity (0).
    pub fn zero() -> Self {
        Decimal(RustDecimal::ZERO)
    }

    /// Returns true if the value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the value is > 0.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.0.is_sign_positive()
    }

    /// Division that yields `None` instead of panicking on a zero divisor or overflow.
    pub fn checked_div(&self, rhs: Decimal) -> Option<Decimal> {
        self.0.checked_div(rhs.0).map(Decimal)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl FromStr for Decimal {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_canonical(s)
    }
}

impl From<RustDecimal> for Decimal {
    fn from(value: RustDecimal) -> Self {
        Decimal(value)
    }
}

impl std::ops::Sub for Decimal {
    type Output = Decimal;

    fn sub(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 - rhs.0)
    }
}

impl std::ops::Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    #[test]
    fn test_parse_trims_and_normalizes() {
        assert_eq!(d(" -0.050 ").to_canonical_string(), "-0.05");
        assert_eq!(d("100.00").to_canonical_string(), "100");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Decimal::from_str_canonical("five percent").is_err());
    }

    #[test]
    fn test_checked_div_by_zero_is_none() {
        assert_eq!(d("94").checked_div(Decimal::zero()), None);
        assert_eq!(d("-6").checked_div(d("100")), Some(d("-0.06")));
    }

    #[test]
    fn test_sign_helpers() {
        assert!(d("0.05").is_positive());
        assert!(!d("-0.05").is_positive());
        assert!(!Decimal::zero().is_positive());
        assert_eq!(-d("0.05"), d("-0.05"));
    }

    #[test]
    fn test_json_is_number() {
        let json = serde_json::to_value(d("83.25")).unwrap();
        assert!(json.is_number());
        assert_eq!(json.to_string(), "83.25");
    }

    #[test]
    fn test_ordering_around_threshold() {
        assert!(d("-0.06") < d("-0.05"));
        assert!(d("-0.0499") > d("-0.05"));
    }
}
