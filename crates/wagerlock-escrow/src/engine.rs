//! The two-party wager escrow engine.
//!
//! One [`EscrowEngine`] per wager:
//! 1. Two distinct parties join, each moving a stake into custody
//! 2. The arbiter renders an [`Outcome`]
//! 3. The fee goes to the arbiter, the rest to the winner (or split on a draw)
//! 4. The engine becomes `SETTLED` and accepts nothing further
//!
//! Every operation validates first and mutates last: the ledger transfer is
//! the final fallible step, and engine state changes only after it succeeds.
//! A failed call leaves the engine exactly as it was.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wagerlock_types::{
    AccountId, Amount, EscrowEvent, EscrowId, EscrowPhase, EscrowTerms, FeeRate, Outcome,
    PartySlot, Payout, Result, SettlementReceipt, WagerError,
};

use crate::ledger::{Ledger, Transfer};

/// A party's recorded stake. Set once at join, never modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stake {
    pub party: AccountId,
    pub amount: Amount,
}

/// Read-only view of an escrow's stored values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowSnapshot {
    pub escrow: EscrowId,
    pub arbiter: AccountId,
    pub fee_rate: FeeRate,
    pub party_a: Option<AccountId>,
    pub stake_a: Amount,
    pub party_b: Option<AccountId>,
    pub stake_b: Amount,
    pub phase: EscrowPhase,
    pub held: Amount,
}

/// Custody and settlement state machine for a single two-party wager.
#[derive(Debug)]
pub struct EscrowEngine {
    id: EscrowId,
    terms: EscrowTerms,
    stake_a: Option<Stake>,
    stake_b: Option<Stake>,
    phase: EscrowPhase,
    /// Internal bookkeeping of custodied value: `stake_a + stake_b` until
    /// settlement, zero afterwards.
    held: Amount,
    receipt: Option<SettlementReceipt>,
    events: Vec<EscrowEvent>,
    created_at: DateTime<Utc>,
}

impl EscrowEngine {
    /// Create an engine with already-validated terms.
    #[must_use]
    pub fn new(id: EscrowId, terms: EscrowTerms) -> Self {
        tracing::info!(
            escrow = %id,
            arbiter = %terms.arbiter,
            fee_rate = %terms.fee_rate,
            "Escrow created"
        );
        Self {
            id,
            terms,
            stake_a: None,
            stake_b: None,
            phase: EscrowPhase::AwaitingParties,
            held: Amount::ZERO,
            receipt: None,
            events: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Create an engine from a raw basis-point fee rate.
    ///
    /// # Errors
    /// Returns `InvalidFeeRate` if `fee_rate_bps >= 10000`.
    pub fn with_fee_bps(id: EscrowId, arbiter: AccountId, fee_rate_bps: u32) -> Result<Self> {
        let fee_rate = FeeRate::new(fee_rate_bps)?;
        Ok(Self::new(id, EscrowTerms::new(arbiter, fee_rate)))
    }

    // -----------------------------------------------------------------
    // Join
    // -----------------------------------------------------------------

    /// Stake `amount` from `caller` into custody.
    ///
    /// The first caller becomes party A, the second party B. The second
    /// successful join moves the engine to `AWAITING_SETTLEMENT`.
    ///
    /// # Errors
    /// - `InvalidPhase` unless `AWAITING_PARTIES`
    /// - `InvalidAmount` if `amount` is zero
    /// - `IdentityConflict` if `caller` is the arbiter, the escrow itself, or
    ///   already party A
    /// - `TransferFailure` if the ledger refuses to move the stake
    pub fn join<L: Ledger + ?Sized>(
        &mut self,
        ledger: &mut L,
        caller: AccountId,
        amount: Amount,
    ) -> Result<PartySlot> {
        self.expect_phase(EscrowPhase::AwaitingParties)?;

        if amount.is_zero() {
            return Err(WagerError::InvalidAmount {
                reason: "stake must be greater than zero".into(),
            });
        }
        if caller == self.terms.arbiter {
            return Err(WagerError::IdentityConflict {
                reason: format!("arbiter {caller} cannot join as a party"),
            });
        }
        if caller == self.custody_account() {
            return Err(WagerError::IdentityConflict {
                reason: format!("{} cannot join itself", self.id),
            });
        }
        if self.stake_a.is_some_and(|s| s.party == caller) {
            return Err(WagerError::IdentityConflict {
                reason: format!("{caller} has already joined {}", self.id),
            });
        }

        let held = self.held.try_add(amount)?;
        let slot = if self.stake_a.is_none() {
            PartySlot::A
        } else {
            PartySlot::B
        };

        ledger
            .transfer(caller, self.custody_account(), amount)
            .map_err(|e| {
                tracing::warn!(
                    escrow = %self.id,
                    party = %caller,
                    amount = %amount,
                    error = %e,
                    "Stake transfer into custody failed"
                );
                e.into_transfer_failure()
            })?;

        // Commit.
        let stake = Stake {
            party: caller,
            amount,
        };
        match slot {
            PartySlot::A => self.stake_a = Some(stake),
            PartySlot::B => {
                self.stake_b = Some(stake);
                self.phase = EscrowPhase::AwaitingSettlement;
            }
        }
        self.held = held;

        tracing::info!(
            escrow = %self.id,
            party = %caller,
            slot = %slot,
            amount = %amount,
            phase = %self.phase,
            "Party joined"
        );
        self.events.push(EscrowEvent::PartyJoined {
            escrow: self.id,
            party: caller,
            slot,
            amount,
            at: Utc::now(),
        });
        Ok(slot)
    }

    // -----------------------------------------------------------------
    // Settlement
    // -----------------------------------------------------------------

    /// Settle the wager for `outcome`. Only the arbiter may call this, once.
    ///
    /// The fee and both payouts leave custody in one atomic ledger batch.
    /// If the batch fails, the engine stays `AWAITING_SETTLEMENT` and the
    /// arbiter may retry.
    ///
    /// # Errors
    /// - `InvalidPhase` unless `AWAITING_SETTLEMENT`
    /// - `Unauthorized` if `caller` is not the arbiter
    /// - `TransferFailure` if any payout is refused
    pub fn settle<L: Ledger + ?Sized>(
        &mut self,
        ledger: &mut L,
        caller: AccountId,
        outcome: Outcome,
    ) -> Result<SettlementReceipt> {
        self.ensure_settleable(caller)?;
        let (a, b) = self.stakes()?;

        let payout = Payout::compute_with(
            a.amount,
            b.amount,
            self.terms.fee_rate,
            outcome,
            self.terms.draw_policy,
        )?;
        if payout.total != self.held {
            return Err(WagerError::Internal(format!(
                "{}: custody bookkeeping {} does not match stakes {}",
                self.id, self.held, payout.total
            )));
        }
        tracing::debug!(
            escrow = %self.id,
            total = %payout.total,
            fee_rate = %self.terms.fee_rate,
            fee = %payout.fee,
            "Fee computed"
        );

        let transfers = [
            Transfer::new(self.terms.arbiter, payout.fee),
            Transfer::new(a.party, payout.payout_a),
            Transfer::new(b.party, payout.payout_b),
        ];
        ledger
            .transfer_batch(self.custody_account(), &transfers)
            .map_err(|e| {
                tracing::warn!(
                    escrow = %self.id,
                    outcome = %outcome,
                    error = %e,
                    "Settlement rejected, escrow remains open"
                );
                e.into_transfer_failure()
            })?;

        // Commit.
        self.phase = EscrowPhase::Settled;
        self.held = Amount::ZERO;
        let receipt = SettlementReceipt {
            escrow: self.id,
            outcome,
            arbiter: self.terms.arbiter,
            party_a: a.party,
            party_b: b.party,
            payout,
            settled_at: Utc::now(),
        };

        tracing::info!(
            escrow = %self.id,
            outcome = %outcome,
            fee = %payout.fee,
            payout_a = %payout.payout_a,
            payout_b = %payout.payout_b,
            "Escrow settled"
        );
        self.events.push(EscrowEvent::from(&receipt));
        self.receipt = Some(receipt.clone());
        Ok(receipt)
    }

    /// Settle by naming the winner's identity.
    ///
    /// Party A's identity means `WinnerA`, party B's means `WinnerB`, and
    /// the arbiter's own identity means `Draw`.
    ///
    /// # Errors
    /// As [`EscrowEngine::settle`], plus `InvalidWinner` for any other
    /// identity.
    pub fn decide_winner<L: Ledger + ?Sized>(
        &mut self,
        ledger: &mut L,
        caller: AccountId,
        winner: AccountId,
    ) -> Result<SettlementReceipt> {
        self.ensure_settleable(caller)?;
        let outcome = self.resolve_winner(winner)?;
        self.settle(ledger, caller, outcome)
    }

    /// Map a winner identity to an [`Outcome`].
    pub fn resolve_winner(&self, winner: AccountId) -> Result<Outcome> {
        if self.stake_a.is_some_and(|s| s.party == winner) {
            Ok(Outcome::WinnerA)
        } else if self.stake_b.is_some_and(|s| s.party == winner) {
            Ok(Outcome::WinnerB)
        } else if winner == self.terms.arbiter {
            Ok(Outcome::Draw)
        } else {
            Err(WagerError::InvalidWinner(winner))
        }
    }

    // -----------------------------------------------------------------
    // Invariants
    // -----------------------------------------------------------------

    /// Check custody bookkeeping against the recorded stakes and the ledger.
    ///
    /// # Errors
    /// Returns `SupplyInvariantViolation` if `held` differs from the stake
    /// sum (or from zero once settled), or from the custody account balance.
    pub fn verify_custody<L: Ledger + ?Sized>(&self, ledger: &L) -> Result<()> {
        let expected = if self.phase.is_terminal() {
            Amount::ZERO
        } else {
            self.stake1().try_add(self.stake2())?
        };
        if self.held != expected {
            return Err(WagerError::SupplyInvariantViolation {
                reason: format!(
                    "{}: held {} != expected {expected} in {}",
                    self.id, self.held, self.phase
                ),
            });
        }
        let on_ledger = ledger.balance(self.custody_account());
        if on_ledger != self.held {
            return Err(WagerError::SupplyInvariantViolation {
                reason: format!(
                    "{}: custody account holds {on_ledger}, bookkeeping says {}",
                    self.id, self.held
                ),
            });
        }
        Ok(())
    }

    fn expect_phase(&self, expected: EscrowPhase) -> Result<()> {
        if self.phase != expected {
            return Err(WagerError::InvalidPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    fn ensure_settleable(&self, caller: AccountId) -> Result<()> {
        self.expect_phase(EscrowPhase::AwaitingSettlement)?;
        if caller != self.terms.arbiter {
            tracing::warn!(escrow = %self.id, caller = %caller, "Non-arbiter settlement attempt");
            return Err(WagerError::Unauthorized {
                reason: format!("only the arbiter can settle {}", self.id),
            });
        }
        Ok(())
    }

    fn stakes(&self) -> Result<(Stake, Stake)> {
        match (self.stake_a, self.stake_b) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(WagerError::Internal(format!(
                "{} is {} without both stakes",
                self.id, self.phase
            ))),
        }
    }

    // -----------------------------------------------------------------
    // Read accessors
    // -----------------------------------------------------------------

    #[must_use]
    pub fn id(&self) -> EscrowId {
        self.id
    }

    #[must_use]
    pub fn terms(&self) -> EscrowTerms {
        self.terms
    }

    #[must_use]
    pub fn arbiter(&self) -> AccountId {
        self.terms.arbiter
    }

    #[must_use]
    pub fn fee_rate(&self) -> FeeRate {
        self.terms.fee_rate
    }

    /// The fee rate in basis points.
    #[must_use]
    pub fn arbiter_fee_percentage(&self) -> u16 {
        self.terms.fee_rate.bps()
    }

    #[must_use]
    pub fn party1(&self) -> Option<AccountId> {
        self.stake_a.map(|s| s.party)
    }

    #[must_use]
    pub fn party2(&self) -> Option<AccountId> {
        self.stake_b.map(|s| s.party)
    }

    /// Party A's stake, zero before they join.
    #[must_use]
    pub fn stake1(&self) -> Amount {
        self.stake_a.map_or(Amount::ZERO, |s| s.amount)
    }

    /// Party B's stake, zero before they join.
    #[must_use]
    pub fn stake2(&self) -> Amount {
        self.stake_b.map_or(Amount::ZERO, |s| s.amount)
    }

    #[must_use]
    pub fn phase(&self) -> EscrowPhase {
        self.phase
    }

    #[must_use]
    pub fn held_balance(&self) -> Amount {
        self.held
    }

    #[must_use]
    pub fn custody_account(&self) -> AccountId {
        self.id.custody_account()
    }

    /// The settlement receipt, once settled.
    #[must_use]
    pub fn receipt(&self) -> Option<&SettlementReceipt> {
        self.receipt.as_ref()
    }

    /// Every event this engine has emitted, oldest first.
    #[must_use]
    pub fn events(&self) -> &[EscrowEvent] {
        &self.events
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn snapshot(&self) -> EscrowSnapshot {
        EscrowSnapshot {
            escrow: self.id,
            arbiter: self.terms.arbiter,
            fee_rate: self.terms.fee_rate,
            party_a: self.party1(),
            stake_a: self.stake1(),
            party_b: self.party2(),
            stake_b: self.stake2(),
            phase: self.phase,
            held: self.held,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::InMemoryLedger;

    const ETHER: u128 = 1_000_000_000_000_000_000;

    fn ether(n: u128) -> Amount {
        Amount::new(n * ETHER)
    }

    struct Fixture {
        ledger: InMemoryLedger,
        engine: EscrowEngine,
        arbiter: AccountId,
        alice: AccountId,
        bob: AccountId,
    }

    fn setup(fee_bps: u32) -> Fixture {
        let arbiter = AccountId::new();
        let alice = AccountId::new();
        let bob = AccountId::new();
        let mut ledger = InMemoryLedger::new();
        ledger.fund(alice, ether(100)).unwrap();
        ledger.fund(bob, ether(100)).unwrap();
        let engine = EscrowEngine::with_fee_bps(EscrowId::new(), arbiter, fee_bps).unwrap();
        Fixture {
            ledger,
            engine,
            arbiter,
            alice,
            bob,
        }
    }

    fn joined(fee_bps: u32, stake_a: Amount, stake_b: Amount) -> Fixture {
        let mut f = setup(fee_bps);
        f.engine.join(&mut f.ledger, f.alice, stake_a).unwrap();
        f.engine.join(&mut f.ledger, f.bob, stake_b).unwrap();
        f
    }

    #[test]
    fn new_engine_awaits_parties() {
        let f = setup(200);
        assert_eq!(f.engine.phase(), EscrowPhase::AwaitingParties);
        assert_eq!(f.engine.arbiter(), f.arbiter);
        assert_eq!(f.engine.arbiter_fee_percentage(), 200);
        assert_eq!(f.engine.party1(), None);
        assert_eq!(f.engine.stake1(), Amount::ZERO);
        assert_eq!(f.engine.held_balance(), Amount::ZERO);
        assert!(f.engine.events().is_empty());
    }

    #[test]
    fn fee_rate_validated_at_creation() {
        let err = EscrowEngine::with_fee_bps(EscrowId::new(), AccountId::new(), 10_000)
            .unwrap_err();
        assert!(matches!(err, WagerError::InvalidFeeRate { bps: 10_000 }));
    }

    #[test]
    fn joins_record_parties_and_stakes() {
        let mut f = setup(200);
        let slot = f.engine.join(&mut f.ledger, f.alice, ether(1)).unwrap();
        assert_eq!(slot, PartySlot::A);
        assert_eq!(f.engine.party1(), Some(f.alice));
        assert_eq!(f.engine.stake1(), ether(1));
        assert_eq!(f.engine.phase(), EscrowPhase::AwaitingParties);

        let slot = f.engine.join(&mut f.ledger, f.bob, ether(2)).unwrap();
        assert_eq!(slot, PartySlot::B);
        assert_eq!(f.engine.party2(), Some(f.bob));
        assert_eq!(f.engine.stake2(), ether(2));
        assert_eq!(f.engine.phase(), EscrowPhase::AwaitingSettlement);

        assert_eq!(f.engine.held_balance(), ether(3));
        assert_eq!(f.ledger.balance(f.engine.custody_account()), ether(3));
        assert_eq!(f.ledger.balance(f.alice), ether(99));
        assert_eq!(f.ledger.balance(f.bob), ether(98));
        f.engine.verify_custody(&f.ledger).unwrap();
        assert_eq!(f.engine.events().len(), 2);
    }

    #[test]
    fn zero_stake_rejected() {
        let mut f = setup(200);
        let err = f.engine.join(&mut f.ledger, f.alice, Amount::ZERO).unwrap_err();
        assert!(matches!(err, WagerError::InvalidAmount { .. }));
        assert_eq!(f.engine.party1(), None);
    }

    #[test]
    fn arbiter_cannot_join() {
        let mut f = setup(200);
        f.ledger.fund(f.arbiter, ether(10)).unwrap();
        let err = f.engine.join(&mut f.ledger, f.arbiter, ether(1)).unwrap_err();
        assert!(matches!(err, WagerError::IdentityConflict { .. }));
        assert_eq!(f.ledger.balance(f.arbiter), ether(10));
    }

    #[test]
    fn double_join_rejected() {
        let mut f = setup(200);
        f.engine.join(&mut f.ledger, f.alice, ether(1)).unwrap();
        let err = f.engine.join(&mut f.ledger, f.alice, ether(1)).unwrap_err();
        assert!(matches!(err, WagerError::IdentityConflict { .. }));
        assert_eq!(f.engine.held_balance(), ether(1));
        assert_eq!(f.engine.party2(), None);
    }

    #[test]
    fn third_join_rejected_by_phase() {
        let mut f = joined(200, ether(1), ether(1));
        let carol = AccountId::new();
        f.ledger.fund(carol, ether(5)).unwrap();
        let err = f.engine.join(&mut f.ledger, carol, ether(1)).unwrap_err();
        assert!(matches!(
            err,
            WagerError::InvalidPhase {
                expected: EscrowPhase::AwaitingParties,
                actual: EscrowPhase::AwaitingSettlement,
            }
        ));
        assert_eq!(f.ledger.balance(carol), ether(5));
    }

    #[test]
    fn underfunded_join_is_transfer_failure_without_state_change() {
        let mut f = setup(200);
        let err = f.engine.join(&mut f.ledger, f.alice, ether(1_000)).unwrap_err();
        assert!(matches!(err, WagerError::TransferFailure { .. }));
        assert_eq!(f.engine.party1(), None);
        assert_eq!(f.engine.held_balance(), Amount::ZERO);
        assert!(f.engine.events().is_empty());
    }

    #[test]
    fn settle_before_both_joined_rejected() {
        let mut f = setup(200);
        f.engine.join(&mut f.ledger, f.alice, ether(1)).unwrap();
        let err = f
            .engine
            .settle(&mut f.ledger, f.arbiter, Outcome::WinnerA)
            .unwrap_err();
        assert!(matches!(err, WagerError::InvalidPhase { .. }));
    }

    #[test]
    fn winner_a_receives_pot_minus_fee() {
        let mut f = joined(500, ether(10), ether(5));
        let receipt = f
            .engine
            .settle(&mut f.ledger, f.arbiter, Outcome::WinnerA)
            .unwrap();

        assert_eq!(receipt.payout.fee, Amount::new(750_000_000_000_000_000));
        assert_eq!(f.ledger.balance(f.arbiter), Amount::new(750_000_000_000_000_000));
        assert_eq!(
            f.ledger.balance(f.alice),
            Amount::new(104_250_000_000_000_000_000)
        );
        assert_eq!(f.ledger.balance(f.bob), ether(95));
        assert_eq!(f.ledger.balance(f.engine.custody_account()), Amount::ZERO);
        assert_eq!(f.engine.phase(), EscrowPhase::Settled);
        assert_eq!(f.engine.held_balance(), Amount::ZERO);
        f.engine.verify_custody(&f.ledger).unwrap();
        f.ledger.verify_supply().unwrap();
    }

    #[test]
    fn winner_b_receives_pot_minus_fee() {
        let mut f = joined(500, ether(10), ether(5));
        f.engine
            .settle(&mut f.ledger, f.arbiter, Outcome::WinnerB)
            .unwrap();
        assert_eq!(f.ledger.balance(f.alice), ether(90));
        assert_eq!(
            f.ledger.balance(f.bob),
            Amount::new(109_250_000_000_000_000_000)
        );
    }

    #[test]
    fn draw_splits_remainder() {
        let mut f = joined(500, ether(10), ether(5));
        let receipt = f
            .engine
            .settle(&mut f.ledger, f.arbiter, Outcome::Draw)
            .unwrap();
        assert_eq!(receipt.payout.payout_a, Amount::new(7_125_000_000_000_000_000));
        assert_eq!(receipt.payout.payout_b, Amount::new(7_125_000_000_000_000_000));
        // alice staked 10, got 7.125 back; bob staked 5, got 7.125 back
        assert_eq!(f.ledger.balance(f.alice), Amount::new(97_125_000_000_000_000_000));
        assert_eq!(f.ledger.balance(f.bob), Amount::new(102_125_000_000_000_000_000));
    }

    #[test]
    fn non_arbiter_cannot_settle() {
        let mut f = joined(500, ether(1), ether(1));
        let err = f
            .engine
            .settle(&mut f.ledger, f.alice, Outcome::WinnerA)
            .unwrap_err();
        assert!(matches!(err, WagerError::Unauthorized { .. }));
        assert_eq!(f.engine.phase(), EscrowPhase::AwaitingSettlement);
        assert_eq!(f.engine.held_balance(), ether(2));
    }

    #[test]
    fn second_settlement_rejected_and_moves_nothing() {
        let mut f = joined(500, ether(10), ether(5));
        f.engine
            .settle(&mut f.ledger, f.arbiter, Outcome::WinnerA)
            .unwrap();
        let alice_after = f.ledger.balance(f.alice);
        let arbiter_after = f.ledger.balance(f.arbiter);

        let err = f
            .engine
            .settle(&mut f.ledger, f.arbiter, Outcome::WinnerB)
            .unwrap_err();
        assert!(matches!(
            err,
            WagerError::InvalidPhase {
                actual: EscrowPhase::Settled,
                ..
            }
        ));
        assert_eq!(f.ledger.balance(f.alice), alice_after);
        assert_eq!(f.ledger.balance(f.arbiter), arbiter_after);
        assert_eq!(f.engine.events().len(), 3);
    }

    #[test]
    fn rejected_payout_rolls_back_whole_settlement() {
        let mut f = joined(500, ether(10), ether(5));
        f.ledger.reject_incoming(f.arbiter);

        let err = f
            .engine
            .settle(&mut f.ledger, f.arbiter, Outcome::WinnerA)
            .unwrap_err();
        assert!(matches!(err, WagerError::TransferFailure { .. }));
        assert_eq!(f.engine.phase(), EscrowPhase::AwaitingSettlement);
        assert_eq!(f.engine.held_balance(), ether(15));
        assert_eq!(f.ledger.balance(f.alice), ether(90));
        assert_eq!(f.ledger.balance(f.engine.custody_account()), ether(15));
        assert!(f.engine.receipt().is_none());
        f.engine.verify_custody(&f.ledger).unwrap();

        // Arbiter retries once the recipient accepts funds again.
        f.ledger.accept_incoming(f.arbiter);
        f.engine
            .settle(&mut f.ledger, f.arbiter, Outcome::WinnerA)
            .unwrap();
        assert_eq!(f.engine.phase(), EscrowPhase::Settled);
    }

    #[test]
    fn losing_party_rejecting_funds_does_not_block_win() {
        let mut f = joined(500, ether(10), ether(5));
        f.ledger.reject_incoming(f.bob);
        f.engine
            .settle(&mut f.ledger, f.arbiter, Outcome::WinnerA)
            .unwrap();
        assert_eq!(f.engine.phase(), EscrowPhase::Settled);
    }

    #[test]
    fn decide_winner_maps_identities() {
        let f = joined(500, ether(1), ether(1));
        assert_eq!(f.engine.resolve_winner(f.alice).unwrap(), Outcome::WinnerA);
        assert_eq!(f.engine.resolve_winner(f.bob).unwrap(), Outcome::WinnerB);
        assert_eq!(f.engine.resolve_winner(f.arbiter).unwrap(), Outcome::Draw);
        let stranger = AccountId::new();
        assert!(matches!(
            f.engine.resolve_winner(stranger),
            Err(WagerError::InvalidWinner(id)) if id == stranger
        ));
    }

    #[test]
    fn decide_winner_with_arbiter_identity_is_a_draw() {
        let mut f = joined(500, ether(10), ether(5));
        let receipt = f
            .engine
            .decide_winner(&mut f.ledger, f.arbiter, f.arbiter)
            .unwrap();
        assert_eq!(receipt.outcome, Outcome::Draw);
    }

    #[test]
    fn decide_winner_unknown_identity_leaves_engine_open() {
        let mut f = joined(500, ether(1), ether(1));
        let err = f
            .engine
            .decide_winner(&mut f.ledger, f.arbiter, AccountId::new())
            .unwrap_err();
        assert!(matches!(err, WagerError::InvalidWinner(_)));
        assert_eq!(f.engine.phase(), EscrowPhase::AwaitingSettlement);
    }

    #[test]
    fn decide_winner_checks_caller_before_winner() {
        let mut f = joined(500, ether(1), ether(1));
        let err = f
            .engine
            .decide_winner(&mut f.ledger, f.bob, AccountId::new())
            .unwrap_err();
        assert!(matches!(err, WagerError::Unauthorized { .. }));
    }

    #[test]
    fn events_trace_lifecycle() {
        let mut f = joined(500, ether(2), ether(4));
        f.engine
            .settle(&mut f.ledger, f.arbiter, Outcome::WinnerB)
            .unwrap();
        let names: Vec<&str> = f.engine.events().iter().map(EscrowEvent::name).collect();
        assert_eq!(names, ["party_joined", "party_joined", "settled"]);
        assert!(f.engine.events().iter().all(|e| e.escrow() == f.engine.id()));
    }

    #[test]
    fn snapshot_reflects_state() {
        let f = joined(550, ether(2), ether(4));
        let snap = f.engine.snapshot();
        assert_eq!(snap.party_a, Some(f.alice));
        assert_eq!(snap.party_b, Some(f.bob));
        assert_eq!(snap.stake_a, ether(2));
        assert_eq!(snap.stake_b, ether(4));
        assert_eq!(snap.held, ether(6));
        assert_eq!(snap.fee_rate.bps(), 550);
        assert_eq!(snap.phase, EscrowPhase::AwaitingSettlement);
    }
}
