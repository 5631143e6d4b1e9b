//! Append-only registry of escrow handles.
//!
//! Entries are stored in creation order and are never removed or
//! reordered, so an index handed out once stays valid forever.

use wagerlock_escrow::SharedEscrow;
use wagerlock_types::EscrowId;

/// Ordered, append-only list of escrows.
#[derive(Debug, Default)]
pub struct EscrowRegistry {
    entries: Vec<SharedEscrow>,
}

impl EscrowRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `escrow`, returning its index.
    pub fn push(&mut self, escrow: SharedEscrow) -> usize {
        self.entries.push(escrow);
        self.entries.len() - 1
    }

    /// Index the next pushed escrow will receive.
    #[must_use]
    pub fn next_index(&self) -> u64 {
        self.entries.len() as u64
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SharedEscrow> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn find(&self, id: EscrowId) -> Option<&SharedEscrow> {
        self.entries.iter().find(|e| e.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[SharedEscrow] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wagerlock_escrow::EscrowEngine;
    use wagerlock_types::{AccountId, EscrowTerms, FeeRate};

    fn escrow() -> SharedEscrow {
        SharedEscrow::new(EscrowEngine::new(
            EscrowId::new(),
            EscrowTerms::new(AccountId::new(), FeeRate::ZERO),
        ))
    }

    #[test]
    fn indices_follow_insertion_order() {
        let mut registry = EscrowRegistry::new();
        assert!(registry.is_empty());
        let first = escrow();
        let second = escrow();
        assert_eq!(registry.next_index(), 0);
        assert_eq!(registry.push(first.clone()), 0);
        assert_eq!(registry.push(second.clone()), 1);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(0), Some(&first));
        assert_eq!(registry.get(1), Some(&second));
        assert_eq!(registry.get(2), None);
        assert_eq!(registry.find(second.id()), Some(&second));
        assert_eq!(registry.as_slice(), &[first, second]);
    }
}
