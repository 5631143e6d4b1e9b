//! Escrow factory.
//!
//! Any caller may provision a new escrow; every escrow is arbitrated by the
//! arbiter in the factory's [`FactoryConfig`]. Only the factory owner may
//! enumerate the registry.

use chrono::Utc;
use wagerlock_escrow::{EscrowEngine, SharedEscrow};
use wagerlock_types::{
    AccountId, EscrowEvent, EscrowId, FactoryConfig, FactoryId, FeeRate, Result, WagerError,
    constants,
};

use crate::registry::EscrowRegistry;

/// Provisions independent escrow engines and keeps track of all of them.
#[derive(Debug)]
pub struct EscrowFactory {
    id: FactoryId,
    owner: AccountId,
    config: FactoryConfig,
    registry: EscrowRegistry,
    events: Vec<EscrowEvent>,
}

impl EscrowFactory {
    /// Deploy a factory owned by `owner`.
    #[must_use]
    pub fn new(owner: AccountId, config: FactoryConfig) -> Self {
        let id = FactoryId::new();
        tracing::info!(
            factory = %id,
            owner = %owner,
            arbiter = %config.arbiter,
            "Factory deployed"
        );
        Self {
            id,
            owner,
            config,
            registry: EscrowRegistry::new(),
            events: Vec::new(),
        }
    }

    /// Create a new escrow at `fee_rate_bps`.
    ///
    /// # Errors
    /// Returns `InvalidFeeRate` if `fee_rate_bps >= 10000`; nothing is
    /// registered in that case.
    pub fn create_contract(&mut self, caller: AccountId, fee_rate_bps: u32) -> Result<SharedEscrow> {
        let fee_rate = FeeRate::new(fee_rate_bps)?;
        Ok(self.provision(caller, Some(fee_rate)))
    }

    /// Create a new escrow at the configured default fee rate.
    pub fn create_default(&mut self, caller: AccountId) -> SharedEscrow {
        self.provision(caller, None)
    }

    fn provision(&mut self, caller: AccountId, fee_rate: Option<FeeRate>) -> SharedEscrow {
        let terms = self.config.terms(fee_rate);
        let escrow_id = EscrowId::deterministic(self.id, self.registry.next_index());
        let escrow = SharedEscrow::new(EscrowEngine::new(escrow_id, terms));
        let index = self.registry.push(escrow.clone());

        tracing::info!(
            factory = %self.id,
            escrow = %escrow_id,
            index,
            creator = %caller,
            fee_rate = %terms.fee_rate,
            "Contract created"
        );
        self.events.push(EscrowEvent::ContractCreated {
            escrow: escrow_id,
            arbiter: terms.arbiter,
            fee_rate: terms.fee_rate,
            at: Utc::now(),
        });
        escrow
    }

    /// Every escrow created so far, in creation order. Owner only.
    ///
    /// # Errors
    /// Returns `Unauthorized` if `caller` is not the owner.
    pub fn get_contracts(&self, caller: AccountId) -> Result<Vec<SharedEscrow>> {
        self.ensure_owner(caller)?;
        Ok(self.registry.as_slice().to_vec())
    }

    /// Ids of every escrow created so far, in creation order. Owner only.
    pub fn get_contract_ids(&self, caller: AccountId) -> Result<Vec<EscrowId>> {
        self.ensure_owner(caller)?;
        Ok(self.registry.as_slice().iter().map(SharedEscrow::id).collect())
    }

    fn ensure_owner(&self, caller: AccountId) -> Result<()> {
        if caller != self.owner {
            tracing::warn!(factory = %self.id, caller = %caller, "Registry read refused");
            return Err(WagerError::Unauthorized {
                reason: constants::REGISTRY_OWNER_ONLY.into(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn id(&self) -> FactoryId {
        self.id
    }

    #[must_use]
    pub fn owner(&self) -> AccountId {
        self.owner
    }

    /// The arbiter bound into every escrow from this factory.
    #[must_use]
    pub fn arbiter(&self) -> AccountId {
        self.config.arbiter
    }

    #[must_use]
    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// `ContractCreated` events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[EscrowEvent] {
        &self.events
    }
}
