//! Thread-safe escrow handle.
//!
//! A [`SharedEscrow`] serializes every operation on one engine behind a
//! single mutex. A join or settlement holds the lock for its whole
//! check → transfer → commit sequence, and snapshots take the same lock, so
//! no reader ever observes a half-applied operation.

use std::sync::Arc;

use parking_lot::Mutex;
use wagerlock_types::{
    AccountId, Amount, EscrowEvent, EscrowId, Outcome, PartySlot, Result, SettlementReceipt,
};

use crate::engine::{EscrowEngine, EscrowSnapshot};
use crate::ledger::Ledger;

/// Cloneable handle to one escrow engine.
#[derive(Debug, Clone)]
pub struct SharedEscrow {
    id: EscrowId,
    inner: Arc<Mutex<EscrowEngine>>,
}

impl SharedEscrow {
    #[must_use]
    pub fn new(engine: EscrowEngine) -> Self {
        Self {
            id: engine.id(),
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// The escrow's id. Does not take the lock.
    #[must_use]
    pub fn id(&self) -> EscrowId {
        self.id
    }

    pub fn join<L: Ledger + ?Sized>(
        &self,
        ledger: &mut L,
        caller: AccountId,
        amount: Amount,
    ) -> Result<PartySlot> {
        self.inner.lock().join(ledger, caller, amount)
    }

    pub fn settle<L: Ledger + ?Sized>(
        &self,
        ledger: &mut L,
        caller: AccountId,
        outcome: Outcome,
    ) -> Result<SettlementReceipt> {
        self.inner.lock().settle(ledger, caller, outcome)
    }

    pub fn decide_winner<L: Ledger + ?Sized>(
        &self,
        ledger: &mut L,
        caller: AccountId,
        winner: AccountId,
    ) -> Result<SettlementReceipt> {
        self.inner.lock().decide_winner(ledger, caller, winner)
    }

    #[must_use]
    pub fn snapshot(&self) -> EscrowSnapshot {
        self.inner.lock().snapshot()
    }

    #[must_use]
    pub fn events(&self) -> Vec<EscrowEvent> {
        self.inner.lock().events().to_vec()
    }

    /// Run a read-only closure against the engine under the lock.
    pub fn read<T>(&self, f: impl FnOnce(&EscrowEngine) -> T) -> T {
        f(&self.inner.lock())
    }
}

impl PartialEq for SharedEscrow {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SharedEscrow {}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::ledger::InMemoryLedger;
    use wagerlock_types::{EscrowPhase, EscrowTerms, FeeRate};

    fn shared(arbiter: AccountId) -> SharedEscrow {
        SharedEscrow::new(EscrowEngine::new(
            EscrowId::new(),
            EscrowTerms::new(arbiter, FeeRate::new(500).unwrap()),
        ))
    }

    #[test]
    fn clones_share_state() {
        let arbiter = AccountId::new();
        let alice = AccountId::new();
        let mut ledger = InMemoryLedger::new();
        ledger.fund(alice, Amount::new(100)).unwrap();

        let a = shared(arbiter);
        let b = a.clone();
        a.join(&mut ledger, alice, Amount::new(40)).unwrap();
        assert_eq!(b.snapshot().stake_a, Amount::new(40));
        assert_eq!(a, b);
        assert_eq!(b.events().len(), 1);
    }

    #[test]
    fn concurrent_joins_admit_exactly_two_parties() {
        let arbiter = AccountId::new();
        let escrow = shared(arbiter);
        let ledger = Arc::new(Mutex::new(InMemoryLedger::new()));
        let players: Vec<AccountId> = (0..8).map(|_| AccountId::new()).collect();
        for p in &players {
            ledger.lock().fund(*p, Amount::new(10)).unwrap();
        }

        let handles: Vec<_> = players
            .iter()
            .map(|p| {
                let escrow = escrow.clone();
                let ledger = Arc::clone(&ledger);
                let p = *p;
                thread::spawn(move || {
                    let mut ledger = ledger.lock();
                    escrow.join(&mut *ledger, p, Amount::new(10)).is_ok()
                })
            })
            .collect();
        let admitted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(admitted, 2);
        let snap = escrow.snapshot();
        assert_eq!(snap.phase, EscrowPhase::AwaitingSettlement);
        assert_eq!(snap.held, Amount::new(20));
        let ledger = ledger.lock();
        escrow.read(|e| e.verify_custody(&*ledger)).unwrap();
    }
}
