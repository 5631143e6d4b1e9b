//! System-wide constants for the wagerlock escrow engine.

/// Basis-point denominator: a fee of `BPS_DENOMINATOR` would be 100%.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Highest accepted fee rate in basis points (99.99%).
pub const MAX_FEE_BPS: u32 = BPS_DENOMINATOR - 1;

/// Decimals between the smallest unit and one major unit.
pub const UNIT_DECIMALS: u32 = 18;

/// Reason given when a non-owner asks for the factory registry.
pub const REGISTRY_OWNER_ONLY: &str = "Only the contract owner can view all contracts";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "wagerlock";
