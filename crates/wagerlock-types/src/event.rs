//! Events emitted by factories and escrows for off-chain indexing.
//!
//! Every state change produces exactly one event. Events are appended to an
//! in-process log by the component that emitted them and are also logged via
//! `tracing`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountId, Amount, EscrowId, FeeRate, Outcome, PartySlot, SettlementReceipt};

/// A single observable state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EscrowEvent {
    /// A factory provisioned a new escrow.
    ContractCreated {
        escrow: EscrowId,
        arbiter: AccountId,
        fee_rate: FeeRate,
        at: DateTime<Utc>,
    },
    /// A party staked into an escrow.
    PartyJoined {
        escrow: EscrowId,
        party: AccountId,
        slot: PartySlot,
        amount: Amount,
        at: DateTime<Utc>,
    },
    /// The arbiter settled an escrow.
    Settled {
        escrow: EscrowId,
        outcome: Outcome,
        fee: Amount,
        payout_a: Amount,
        payout_b: Amount,
        at: DateTime<Utc>,
    },
}

impl EscrowEvent {
    /// The escrow this event concerns.
    #[must_use]
    pub fn escrow(&self) -> EscrowId {
        match self {
            Self::ContractCreated { escrow, .. }
            | Self::PartyJoined { escrow, .. }
            | Self::Settled { escrow, .. } => *escrow,
        }
    }

    /// Short event name, matching the serialized tag.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ContractCreated { .. } => "contract_created",
            Self::PartyJoined { .. } => "party_joined",
            Self::Settled { .. } => "settled",
        }
    }
}

impl From<&SettlementReceipt> for EscrowEvent {
    fn from(receipt: &SettlementReceipt) -> Self {
        Self::Settled {
            escrow: receipt.escrow,
            outcome: receipt.outcome,
            fee: receipt.payout.fee,
            payout_a: receipt.payout.payout_a,
            payout_b: receipt.payout.payout_b,
            at: receipt.settled_at,
        }
    }
}
