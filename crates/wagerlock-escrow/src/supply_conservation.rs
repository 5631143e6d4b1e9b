//! Supply conservation invariant checker.
//!
//! Invariant enforced after every settlement:
//! ```text
//! Σ(account balances) == Σ(minted) - Σ(burned)
//! ```
//!
//! Joins and settlements only move value between accounts; if the sum of
//! balances ever drifts from what was minted minus what was burned, value
//! was created or destroyed and the ledger must stop.

use wagerlock_types::{Amount, Result, WagerError};

/// Tracks minted and burned totals for one ledger.
#[derive(Debug, Default)]
pub struct SupplyConservation {
    /// Total value credited from outside the ledger since genesis.
    minted: Amount,
    /// Total value removed from the ledger since genesis.
    burned: Amount,
}

impl SupplyConservation {
    /// Create a new supply conservation tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record value entering the ledger.
    pub fn record_mint(&mut self, amount: Amount) -> Result<()> {
        self.minted = self.minted.try_add(amount)?;
        Ok(())
    }

    /// Record value leaving the ledger.
    pub fn record_burn(&mut self, amount: Amount) -> Result<()> {
        self.burned = self.burned.try_add(amount)?;
        Ok(())
    }

    /// Expected total supply: minted - burned.
    pub fn expected_supply(&self) -> Result<Amount> {
        self.minted.try_sub(self.burned)
    }

    /// Verify that `actual_supply` (the sum of all balances) matches the
    /// expected supply.
    ///
    /// # Errors
    /// Returns [`WagerError::SupplyInvariantViolation`] if actual ≠ expected.
    pub fn verify(&self, actual_supply: Amount) -> Result<()> {
        let expected = self.expected_supply()?;
        if actual_supply != expected {
            return Err(WagerError::SupplyInvariantViolation {
                reason: format!(
                    "actual supply {actual_supply} != expected {expected} \
                     (minted={}, burned={})",
                    self.minted, self.burned,
                ),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn total_minted(&self) -> Amount {
        self.minted
    }

    #[must_use]
    pub fn total_burned(&self) -> Amount {
        self.burned
    }
}
