//! # wagerlock-types
//!
//! Shared types, errors, and configuration for the **wagerlock** escrow
//! engine.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`EscrowId`], [`FactoryId`]
//! - **Money**: [`Amount`] (smallest units), [`FeeRate`] (basis points)
//! - **Settlement model**: [`Outcome`], [`DrawPolicy`], [`PartySlot`], [`Payout`], [`SettlementReceipt`]
//! - **Lifecycle**: [`EscrowPhase`]
//! - **Events**: [`EscrowEvent`]
//! - **Configuration**: [`FactoryConfig`], [`EscrowTerms`]
//! - **Errors**: [`WagerError`] with `WL_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod amount;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod fee;
pub mod ids;
pub mod outcome;
pub mod phase;
pub mod receipt;

pub use amount::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use fee::*;
pub use ids::*;
pub use outcome::*;
pub use phase::*;
pub use receipt::*;

// Constants are accessed via `wagerlock_types::constants::FOO`
// (not re-exported to avoid name collisions).
