//! The value-transfer seam between escrows and the host environment.
//!
//! Escrows never own money directly. Every stake moves from the caller's
//! account into the escrow's custody account, and every payout moves out of
//! it, through a [`Ledger`]. Hosts plug in their own ledger; this crate
//! ships [`InMemoryLedger`] for tests, simulations and single-process use.

use std::collections::{HashMap, HashSet};

use wagerlock_types::{AccountId, Amount, Result, WagerError};

use crate::supply_conservation::SupplyConservation;

/// One leg of a batch transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub to: AccountId,
    pub amount: Amount,
}

impl Transfer {
    #[must_use]
    pub fn new(to: AccountId, amount: Amount) -> Self {
        Self { to, amount }
    }
}

/// Atomic value transfer, supplied by whatever hosts the escrows.
pub trait Ledger {
    /// Current balance of `account`. Unknown accounts hold zero.
    fn balance(&self, account: AccountId) -> Amount;

    /// Move `amount` from `from` to `to`, or fail without moving anything.
    fn transfer(&mut self, from: AccountId, to: AccountId, amount: Amount) -> Result<()> {
        self.transfer_batch(from, &[Transfer::new(to, amount)])
    }

    /// Pay every leg out of `from`. **All-or-nothing**: if any leg would
    /// fail, no balance changes.
    fn transfer_batch(&mut self, from: AccountId, transfers: &[Transfer]) -> Result<()>;
}

/// Single-process ledger with supply conservation tracking.
///
/// Accounts can be flagged to reject incoming value, modelling a recipient
/// that refuses funds. Zero-amount legs are skipped entirely.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    balances: HashMap<AccountId, Amount>,
    rejecting: HashSet<AccountId>,
    supply: SupplyConservation,
}

impl InMemoryLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` from outside the ledger (a deposit / mint).
    pub fn fund(&mut self, account: AccountId, amount: Amount) -> Result<()> {
        let updated = self.balance(account).try_add(amount)?;
        self.supply.record_mint(amount)?;
        self.balances.insert(account, updated);
        Ok(())
    }

    /// Remove `amount` from the ledger entirely (a withdrawal / burn).
    pub fn withdraw(&mut self, account: AccountId, amount: Amount) -> Result<()> {
        let available = self.balance(account);
        let updated = available
            .checked_sub(amount)
            .ok_or(WagerError::InsufficientFunds {
                account,
                needed: amount,
                available,
            })?;
        self.supply.record_burn(amount)?;
        self.balances.insert(account, updated);
        Ok(())
    }

    /// Make `account` refuse all incoming value.
    pub fn reject_incoming(&mut self, account: AccountId) {
        self.rejecting.insert(account);
    }

    /// Undo [`InMemoryLedger::reject_incoming`].
    pub fn accept_incoming(&mut self, account: AccountId) {
        self.rejecting.remove(&account);
    }

    /// Sum of every account balance.
    pub fn total_supply(&self) -> Result<Amount> {
        self.balances
            .values()
            .try_fold(Amount::ZERO, |acc, balance| acc.try_add(*balance))
    }

    /// Check that no value has been created or destroyed.
    pub fn verify_supply(&self) -> Result<()> {
        self.supply.verify(self.total_supply()?)
    }

    /// Access the supply tracker.
    #[must_use]
    pub fn supply(&self) -> &SupplyConservation {
        &self.supply
    }
}

impl Ledger for InMemoryLedger {
    fn balance(&self, account: AccountId) -> Amount {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    fn transfer_batch(&mut self, from: AccountId, transfers: &[Transfer]) -> Result<()> {
        let legs: Vec<&Transfer> = transfers.iter().filter(|t| !t.amount.is_zero()).collect();

        let needed = legs
            .iter()
            .try_fold(Amount::ZERO, |acc, t| acc.try_add(t.amount))?;
        let available = self.balance(from);
        if available < needed {
            return Err(WagerError::InsufficientFunds {
                account: from,
                needed,
                available,
            });
        }
        if let Some(rejected) = legs.iter().find(|t| self.rejecting.contains(&t.to)) {
            tracing::warn!(
                from = %from,
                to = %rejected.to,
                amount = %rejected.amount,
                "Transfer refused by recipient"
            );
            return Err(WagerError::RecipientRejected(rejected.to));
        }

        // Stage every touched balance; commit only once all legs fit.
        let mut staged: HashMap<AccountId, Amount> = HashMap::new();
        staged.insert(from, available);
        for leg in &legs {
            let source = staged.get(&from).copied().unwrap_or_default();
            staged.insert(from, source.try_sub(leg.amount)?);
            let target = staged
                .get(&leg.to)
                .copied()
                .unwrap_or_else(|| self.balance(leg.to));
            staged.insert(leg.to, target.try_add(leg.amount)?);
        }

        for leg in &legs {
            tracing::debug!(from = %from, to = %leg.to, amount = %leg.amount, "Transfer");
        }
        self.balances.extend(staged);
        Ok(())
    }
}
