//! Error types for the wagerlock escrow engine.
//!
//! All errors use the `WL_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Lifecycle errors
//! - 2xx: Identity / authorization errors
//! - 3xx: Amount and fee errors
//! - 4xx: Value transfer / custody errors
//! - 9xx: General / internal errors

use thiserror::Error;

use crate::{AccountId, Amount, EscrowPhase};

/// Central error enum for all wagerlock operations.
#[derive(Debug, Error)]
pub enum WagerError {
    // =================================================================
    // Lifecycle Errors (1xx)
    // =================================================================
    /// An operation was attempted in the wrong escrow phase.
    #[error("WL_ERR_100: Invalid phase: expected {expected}, got {actual}")]
    InvalidPhase {
        expected: EscrowPhase,
        actual: EscrowPhase,
    },

    // =================================================================
    // Identity / Authorization Errors (2xx)
    // =================================================================
    /// Self-pairing, double join, or the arbiter trying to join as a party.
    #[error("WL_ERR_200: Identity conflict: {reason}")]
    IdentityConflict { reason: String },

    /// The caller does not hold the role the operation requires.
    #[error("WL_ERR_201: Unauthorized: {reason}")]
    Unauthorized { reason: String },

    /// The named winner is neither party nor the arbiter (draw).
    #[error("WL_ERR_202: Invalid winner: {0} is not a party to this escrow")]
    InvalidWinner(AccountId),

    // =================================================================
    // Amount / Fee Errors (3xx)
    // =================================================================
    /// Zero stake, or an amount that cannot be represented.
    #[error("WL_ERR_300: Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    /// Fee rate outside `[0, 10000)` basis points.
    #[error("WL_ERR_301: Invalid fee rate: {bps} basis points (must be below 10000)")]
    InvalidFeeRate { bps: u32 },

    /// Checked arithmetic on amounts overflowed or went out of range.
    #[error("WL_ERR_302: Amount out of range: {reason}")]
    AmountOutOfRange { reason: String },

    // =================================================================
    // Value Transfer Errors (4xx)
    // =================================================================
    /// A value transfer into or out of custody was rejected.
    #[error("WL_ERR_400: Transfer failed: {reason}")]
    TransferFailure { reason: String },

    /// The source account cannot cover the transfer.
    #[error("WL_ERR_401: Insufficient funds in {account}: need {needed}, have {available}")]
    InsufficientFunds {
        account: AccountId,
        needed: Amount,
        available: Amount,
    },

    /// The recipient refuses incoming value.
    #[error("WL_ERR_402: Recipient rejected funds: {0}")]
    RecipientRejected(AccountId),

    /// Supply conservation invariant violated: critical safety alert.
    #[error("WL_ERR_403: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("WL_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("WL_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, missing fields, etc.).
    #[error("WL_ERR_902: Configuration error: {0}")]
    Configuration(String),

    /// I/O error.
    #[error("WL_ERR_903: I/O error: {0}")]
    Io(String),
}

impl WagerError {
    /// Wrap a ledger-level error as a [`WagerError::TransferFailure`].
    ///
    /// Escrow callers only ever see `TransferFailure` for rejected value
    /// movement; the underlying cause is kept in the reason string.
    #[must_use]
    pub fn into_transfer_failure(self) -> Self {
        match self {
            Self::TransferFailure { .. } => self,
            other => Self::TransferFailure {
                reason: other.to_string(),
            },
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, WagerError>;

impl From<std::io::Error> for WagerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for WagerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
