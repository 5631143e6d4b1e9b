//! Currency amounts in the smallest indivisible unit.
//!
//! Every stake, fee and payout is an [`Amount`]: a `u128` count of smallest
//! units (18 decimals per major unit, as with wei/ether). Arithmetic is
//! checked; conversion to and from major units goes through `rust_decimal`
//! and is only used at the display / input edges.
//!
//! Amounts serialize as decimal strings of smallest units: a `u128` does not
//! survive JSON number handling in most consumers.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Result, WagerError, constants};

/// A non-negative amount of currency in smallest units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(pub u128);

impl Amount {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn new(units: u128) -> Self {
        Self(units)
    }

    #[must_use]
    pub const fn units(self) -> u128 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    #[must_use]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// `self + rhs`, or [`WagerError::AmountOutOfRange`] on overflow.
    pub fn try_add(self, rhs: Self) -> Result<Self> {
        self.checked_add(rhs)
            .ok_or_else(|| WagerError::AmountOutOfRange {
                reason: format!("{self} + {rhs} overflows"),
            })
    }

    /// `self - rhs`, or [`WagerError::AmountOutOfRange`] on underflow.
    pub fn try_sub(self, rhs: Self) -> Result<Self> {
        self.checked_sub(rhs)
            .ok_or_else(|| WagerError::AmountOutOfRange {
                reason: format!("{self} - {rhs} underflows"),
            })
    }

    /// Parse a major-unit string such as `"14.25"` into smallest units.
    pub fn from_major(input: &str) -> Result<Self> {
        let value = Decimal::from_str(input.trim()).map_err(|e| WagerError::InvalidAmount {
            reason: format!("cannot parse {input:?}: {e}"),
        })?;
        Self::from_major_decimal(value)
    }

    /// Convert a major-unit decimal into smallest units.
    ///
    /// Rejects negative values and values finer than one smallest unit.
    pub fn from_major_decimal(value: Decimal) -> Result<Self> {
        if value < Decimal::ZERO {
            return Err(WagerError::InvalidAmount {
                reason: format!("{value} is negative"),
            });
        }
        let value = value.normalize();
        let scale = value.scale();
        if scale > constants::UNIT_DECIMALS {
            return Err(WagerError::InvalidAmount {
                reason: format!(
                    "{value} has {scale} decimals, smallest unit is 1e-{}",
                    constants::UNIT_DECIMALS
                ),
            });
        }
        let mantissa = u128::try_from(value.mantissa()).map_err(|_| WagerError::InvalidAmount {
            reason: format!("{value} is negative"),
        })?;
        let factor = 10u128.pow(constants::UNIT_DECIMALS - scale);
        mantissa
            .checked_mul(factor)
            .map(Self)
            .ok_or_else(|| WagerError::AmountOutOfRange {
                reason: format!("{value} does not fit in smallest units"),
            })
    }

    /// This amount expressed in major units.
    pub fn to_major(self) -> Result<Decimal> {
        let units = i128::try_from(self.0).map_err(|_| WagerError::AmountOutOfRange {
            reason: format!("{self} exceeds the decimal range"),
        })?;
        Decimal::try_from_i128_with_scale(units, constants::UNIT_DECIMALS)
            .map(|d| d.normalize())
            .map_err(|e| WagerError::AmountOutOfRange {
                reason: format!("{self}: {e}"),
            })
    }

    /// Human-readable major-unit string; falls back to raw units when the
    /// value is too large for a decimal.
    #[must_use]
    pub fn display_major(self) -> String {
        match self.to_major() {
            Ok(major) => major.to_string(),
            Err(_) => format!("{} units", self.0),
        }
    }
}

impl From<u128> for Amount {
    fn from(units: u128) -> Self {
        Self(units)
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.0.to_string()
    }
}

impl TryFrom<String> for Amount {
    type Error = WagerError;

    fn try_from(units: String) -> Result<Self> {
        units
            .parse::<u128>()
            .map(Self)
            .map_err(|e| WagerError::InvalidAmount {
                reason: format!("{units:?} is not a unit count: {e}"),
            })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Random non-zero amount below `max_units`. **Test use only.**
#[cfg(any(test, feature = "test-helpers"))]
impl Amount {
    pub fn random_below(max_units: u128) -> Self {
        let max = max_units.max(2);
        Self(rand::random::<u128>() % (max - 1) + 1)
    }
}
