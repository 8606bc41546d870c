//! Money type
//!
//! Monetary values are held as an integer count of minor units (cents) so
//! that balance arithmetic and equality checks are exact. Decimal values only
//! appear at the HTTP boundary.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of decimal places carried by a minor unit
pub const SCALE: u32 = 2;

/// Minor units in one major unit
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Errors that can occur when converting a decimal value into Money
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Amount has too many decimal places (max {SCALE}, got {0})")]
    TooManyDecimals(u32),

    #[error("Amount exceeds the representable range")]
    Overflow,
}

/// A signed amount of money in minor units.
///
/// Money itself may be zero or negative; positivity of an operation amount
/// and non-negativity of a balance are enforced by the ledger.
///
/// # Example
/// ```
/// use rust_decimal::Decimal;
/// use atm_ledger::domain::Money;
///
/// let money = Money::from_decimal(Decimal::new(10050, 2)).unwrap();
/// assert_eq!(money.minor_units(), 10050);
/// assert_eq!(money.to_string(), "100.50");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Create from a count of minor units
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Create from whole major units
    pub fn from_major(major: i64) -> Result<Self, AmountError> {
        major
            .checked_mul(MINOR_UNITS_PER_MAJOR)
            .map(Self)
            .ok_or(AmountError::Overflow)
    }

    /// Convert a decimal major-unit value.
    ///
    /// # Errors
    /// - `AmountError::TooManyDecimals` if the value has more than two
    ///   significant decimal places
    /// - `AmountError::Overflow` if it does not fit in `i64` minor units
    pub fn from_decimal(value: Decimal) -> Result<Self, AmountError> {
        let normalized = value.normalize();
        if normalized.scale() > SCALE {
            return Err(AmountError::TooManyDecimals(normalized.scale()));
        }

        normalized
            .checked_mul(Decimal::from(MINOR_UNITS_PER_MAJOR))
            .and_then(|minor| minor.to_i64())
            .map(Self)
            .ok_or(AmountError::Overflow)
    }

    pub fn minor_units(&self) -> i64 {
        self.0
    }

    /// Exact decimal representation in major units
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, SCALE)
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl TryFrom<Decimal> for Money {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Money::from_decimal(value)
    }
}
