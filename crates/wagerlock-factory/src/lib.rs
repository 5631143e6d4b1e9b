//! # wagerlock-factory
//!
//! Provisions independent escrow engines and keeps an append-only,
//! owner-guarded registry of them.
//!
//! ```text
//! create_contract(fee) ──▶ EscrowEngine(arbiter from config, fee)
//!                              │
//!                              └──▶ registry (append-only, creation order)
//! get_contracts(owner) ──▶ registry snapshot
//! ```

pub mod factory;
pub mod registry;

pub use factory::EscrowFactory;
pub use registry::EscrowRegistry;
