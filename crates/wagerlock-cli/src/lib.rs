//! # wagerlock-cli
//!
//! Provides the `wagerlock` command-line interface.
//!
//! ## Subcommands
//!
//! - `wagerlock fee`: arbiter fee and payout quote for a pot.
//! - `wagerlock simulate`: run a complete wager from a JSON scenario.
//!
//! ```bash
//! wagerlock fee --total 15 --bps 500
//! wagerlock simulate demos/winner.json --json
//! ```

pub mod fee;
pub mod simulate;
