//! Escrow lifecycle phases.
//!
//! ```text
//!   ┌──────────────────┐ 2nd join ┌─────────────────────┐ settle ┌─────────┐
//!   │ AWAITING_PARTIES ├─────────▶│ AWAITING_SETTLEMENT ├───────▶│ SETTLED │
//!   └──┬───────────────┘          └─────────────────────┘        └─────────┘
//!      │ 1st join
//!      └──▶ (stays AWAITING_PARTIES)
//! ```
//!
//! Transitions are **monotonic**: a phase never regresses or skips, and
//! `SETTLED` is terminal.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The lifecycle phase of one escrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EscrowPhase {
    /// Fewer than two parties have joined. Joins are accepted.
    AwaitingParties,
    /// Both stakes are in custody. Only the arbiter's settlement is accepted.
    AwaitingSettlement,
    /// Funds have been paid out. Read-only from here on.
    Settled,
}

impl EscrowPhase {
    /// Can this phase advance to `target`?
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::AwaitingParties, Self::AwaitingSettlement)
                | (Self::AwaitingSettlement, Self::Settled)
        )
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        *self == Self::Settled
    }
}

impl fmt::Display for EscrowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AwaitingParties => write!(f, "AWAITING_PARTIES"),
            Self::AwaitingSettlement => write!(f, "AWAITING_SETTLEMENT"),
            Self::Settled => write!(f, "SETTLED"),
        }
    }
}
