//! Identifiers used throughout wagerlock.
//!
//! Accounts and factories use UUIDv7. Escrow ids are derived
//! deterministically from the creating factory and the creation index, so
//! the same factory replaying the same creations yields the same ids.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// Identity of anything that can hold value: a party, an arbiter, a factory
/// owner, or an escrow's own custody account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AccountId(pub Uuid);

impl AccountId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "acct:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// FactoryId
// ---------------------------------------------------------------------------

/// Unique identifier for an escrow factory deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct FactoryId(pub Uuid);

impl FactoryId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for FactoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FactoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "factory:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// EscrowId
// ---------------------------------------------------------------------------

/// Handle of one escrow instance. Doubles as the address of the escrow's
/// custody account on the ledger (see [`EscrowId::custody_account`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct EscrowId(pub Uuid);

impl EscrowId {
    /// Random id for an escrow created outside of a factory.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Deterministic `EscrowId` from the factory id and creation index.
    #[must_use]
    pub fn deterministic(factory_id: FactoryId, index: u64) -> Self {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(b"wagerlock:escrow_id:v1:");
        hasher.update(factory_id.0.as_bytes());
        hasher.update(index.to_le_bytes());
        let hash = hasher.finalize();
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&hash[..16]);
        Self(Uuid::from_bytes(bytes))
    }

    /// The ledger account that holds this escrow's custodied stakes.
    #[must_use]
    pub fn custody_account(&self) -> AccountId {
        AccountId(self.0)
    }
}

impl Default for EscrowId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EscrowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "escrow:{}", hex::encode(&self.0.as_bytes()[..8]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_uniqueness() {
        let a = AccountId::new();
        let b = AccountId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn escrow_id_deterministic() {
        let factory = FactoryId::new();
        let a = EscrowId::deterministic(factory, 0);
        let b = EscrowId::deterministic(factory, 0);
        assert_eq!(a, b);
        let c = EscrowId::deterministic(factory, 1);
        assert_ne!(a, c);
        let d = EscrowId::deterministic(FactoryId::new(), 0);
        assert_ne!(a, d);
    }

    #[test]
    fn custody_account_tracks_escrow_id() {
        let id = EscrowId::new();
        assert_eq!(id.custody_account().0, id.0);
    }

    #[test]
    fn display_prefixes() {
        assert!(AccountId::new().to_string().starts_with("acct:"));
        assert!(FactoryId::new().to_string().starts_with("factory:"));
        let escrow = EscrowId::new().to_string();
        assert!(escrow.starts_with("escrow:"));
        assert_eq!(escrow.len(), "escrow:".len() + 16);
    }

    #[test]
    fn serde_roundtrips() {
        let acct = AccountId::new();
        let json = serde_json::to_string(&acct).unwrap();
        let back: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(acct, back);

        let escrow = EscrowId::deterministic(FactoryId::new(), 7);
        let json = serde_json::to_string(&escrow).unwrap();
        let back: EscrowId = serde_json::from_str(&json).unwrap();
        assert_eq!(escrow, back);
    }
}
