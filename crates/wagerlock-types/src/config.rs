//! Configuration types for escrow factories and individual escrows.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{AccountId, DrawPolicy, FeeRate, Result};

/// Fixed terms of a single escrow, chosen at creation and never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowTerms {
    /// The only identity allowed to settle.
    pub arbiter: AccountId,
    /// Arbiter's cut of the pot.
    pub fee_rate: FeeRate,
    /// How a draw is paid out.
    #[serde(default)]
    pub draw_policy: DrawPolicy,
}

impl EscrowTerms {
    /// Terms with the default [`DrawPolicy::EvenSplit`].
    #[must_use]
    pub fn new(arbiter: AccountId, fee_rate: FeeRate) -> Self {
        Self {
            arbiter,
            fee_rate,
            draw_policy: DrawPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_draw_policy(mut self, draw_policy: DrawPolicy) -> Self {
        self.draw_policy = draw_policy;
        self
    }
}

/// Per-deployment factory configuration.
///
/// Every escrow a factory creates is arbitrated by `arbiter`; callers choose
/// only the fee rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactoryConfig {
    /// Arbiter bound into every escrow this factory creates.
    pub arbiter: AccountId,
    /// Fee rate used when a caller does not name one.
    #[serde(default)]
    pub default_fee_rate: Option<FeeRate>,
    /// Draw policy bound into every escrow this factory creates.
    #[serde(default)]
    pub draw_policy: DrawPolicy,
}

impl FactoryConfig {
    #[must_use]
    pub fn new(arbiter: AccountId) -> Self {
        Self {
            arbiter,
            default_fee_rate: None,
            draw_policy: DrawPolicy::default(),
        }
    }

    /// Parse a JSON config document.
    ///
    /// # Errors
    /// Returns `Serialization` for malformed JSON or an out-of-range fee rate.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON config file.
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be read, otherwise as [`Self::from_json`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Terms for a new escrow at `fee_rate`, or the default rate, or zero.
    #[must_use]
    pub fn terms(&self, fee_rate: Option<FeeRate>) -> EscrowTerms {
        EscrowTerms::new(
            self.arbiter,
            fee_rate
                .or(self.default_fee_rate)
                .unwrap_or(FeeRate::ZERO),
        )
        .with_draw_policy(self.draw_policy)
    }
}
