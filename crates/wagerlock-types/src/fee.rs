//! Arbiter fee rate and fee computation.
//!
//! Rates are integer basis points (`550` = 5.50%). The fee on a pot is
//! always rounded **down** to the smallest unit:
//!
//! ```text
//! fee = floor(total * bps / 10_000)
//! ```
//!
//! The product is split as `(total / D) * bps + (total % D) * bps / D` so it
//! never overflows `u128`, and because `bps < D` the result never exceeds
//! `total`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Amount, Result, WagerError, constants};

/// A validated fee rate in basis points, always in `[0, 10000)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct FeeRate(u16);

impl FeeRate {
    pub const ZERO: Self = Self(0);

    /// Validate and wrap a basis-point rate.
    ///
    /// # Errors
    /// Returns [`WagerError::InvalidFeeRate`] if `bps >= 10000`.
    pub fn new(bps: u32) -> Result<Self> {
        if bps > constants::MAX_FEE_BPS {
            return Err(WagerError::InvalidFeeRate { bps });
        }
        let bps = u16::try_from(bps).map_err(|_| WagerError::InvalidFeeRate { bps })?;
        Ok(Self(bps))
    }

    /// The rate in basis points.
    #[must_use]
    pub fn bps(self) -> u16 {
        self.0
    }

    /// Fee owed on `total`, rounded down.
    #[must_use]
    pub fn fee_on(self, total: Amount) -> Amount {
        let denominator = u128::from(constants::BPS_DENOMINATOR);
        let bps = u128::from(self.0);
        let t = total.units();
        Amount::new((t / denominator) * bps + (t % denominator) * bps / denominator)
    }
}

impl TryFrom<u32> for FeeRate {
    type Error = WagerError;

    fn try_from(bps: u32) -> Result<Self> {
        Self::new(bps)
    }
}

impl From<FeeRate> for u32 {
    fn from(rate: FeeRate) -> Self {
        u32::from(rate.0)
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}
