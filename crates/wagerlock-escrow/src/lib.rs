//! # wagerlock-escrow
//!
//! **Escrow engine**: stake custody, arbiter settlement, and the ledger
//! seam through which value moves.
//!
//! ## Architecture
//!
//! 1. **Ledger**: trait for atomic value transfer, supplied by the host
//! 2. **InMemoryLedger**: single-process ledger with per-account balances
//! 3. **SupplyConservation**: checks no value is created or destroyed
//! 4. **EscrowEngine**: the two-party join/settle state machine
//! 5. **SharedEscrow**: mutex-serialized handle for multi-threaded hosts
//!
//! ## Flow
//!
//! ```text
//! party A join ──▶ custody ◀── party B join
//!                    │
//!        arbiter settle(outcome)
//!                    │
//!     fee ─▶ arbiter, remainder ─▶ winner (or split on draw)
//! ```

pub mod engine;
pub mod ledger;
pub mod shared;
pub mod supply_conservation;

pub use engine::{EscrowEngine, EscrowSnapshot, Stake};
pub use ledger::{InMemoryLedger, Ledger, Transfer};
pub use shared::SharedEscrow;
pub use supply_conservation::SupplyConservation;
