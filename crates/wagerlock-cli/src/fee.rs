//! # Fee Subcommand
//!
//! Quotes the arbiter fee for a pot, together with what a winner and each
//! side of a draw would receive.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use wagerlock_types::{Amount, FeeRate, Outcome, Payout};

/// Arguments for the `wagerlock fee` subcommand.
#[derive(Args, Debug)]
pub struct FeeArgs {
    /// Combined stakes in major units (e.g. `15` or `0.5`).
    #[arg(long)]
    pub total: String,

    /// Arbiter fee in basis points (`500` = 5%).
    #[arg(long)]
    pub bps: u32,

    /// Print the quote as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Fee and payouts for one pot, in major units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeQuote {
    pub fee_rate: FeeRate,
    pub total: String,
    pub fee: String,
    pub winner_payout: String,
    /// Draw payout to party A, which receives any odd unit.
    pub draw_payout_a: String,
    pub draw_payout_b: String,
}

/// Quote `total` (major units) at `bps`.
pub fn quote(total: &str, bps: u32) -> Result<FeeQuote> {
    let fee_rate = FeeRate::new(bps)?;
    let total = Amount::from_major(total).with_context(|| format!("invalid total: {total}"))?;

    let win = Payout::compute(total, Amount::ZERO, fee_rate, Outcome::WinnerA)?;
    let draw = Payout::compute(total, Amount::ZERO, fee_rate, Outcome::Draw)?;
    tracing::debug!(total = %total, fee_rate = %fee_rate, fee = %win.fee, "Fee quoted");

    Ok(FeeQuote {
        fee_rate,
        total: total.display_major(),
        fee: win.fee.display_major(),
        winner_payout: win.payout_a.display_major(),
        draw_payout_a: draw.payout_a.display_major(),
        draw_payout_b: draw.payout_b.display_major(),
    })
}

/// Execute the fee subcommand.
pub fn run_fee(args: &FeeArgs) -> Result<u8> {
    let quote = quote(&args.total, args.bps)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
    } else {
        println!("fee rate       {}", quote.fee_rate);
        println!("total          {}", quote.total);
        println!("arbiter fee    {}", quote.fee);
        println!("winner payout  {}", quote.winner_payout);
        println!("draw payouts   {} / {}", quote.draw_payout_a, quote.draw_payout_b);
    }
    Ok(0)
}
