//! Settlement receipts for the escrow audit trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountId, Amount, EscrowId, Outcome, Payout};

/// Proof of a completed settlement: who was paid what, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReceipt {
    pub escrow: EscrowId,
    pub outcome: Outcome,
    pub arbiter: AccountId,
    pub party_a: AccountId,
    pub party_b: AccountId,
    pub payout: Payout,
    pub settled_at: DateTime<Utc>,
}

impl SettlementReceipt {
    /// Amount paid to `account` by this settlement.
    #[must_use]
    pub fn paid_to(&self, account: AccountId) -> Amount {
        let mut paid = Amount::ZERO;
        if account == self.arbiter {
            paid = paid.checked_add(self.payout.fee).unwrap_or(paid);
        }
        if account == self.party_a {
            paid = paid.checked_add(self.payout.payout_a).unwrap_or(paid);
        }
        if account == self.party_b {
            paid = paid.checked_add(self.payout.payout_b).unwrap_or(paid);
        }
        paid
    }
}
