//! # Simulate Subcommand
//!
//! Runs one complete wager from a JSON scenario file against an in-memory
//! ledger: deploy a factory, fund the named accounts, create an escrow, join
//! both parties, render the verdict, then report events and final balances.
//!
//! ```json
//! {
//!   "fee_bps": 500,
//!   "accounts": { "alice": "100", "bob": "100" },
//!   "party_a": { "account": "alice", "stake": "10" },
//!   "party_b": { "account": "bob", "stake": "5" },
//!   "verdict": { "winner": "alice" }
//! }
//! ```
//!
//! The names `owner` and `arbiter` always exist; fund them in `accounts`
//! like any other name. A verdict is either `{"winner": <name>}` (naming
//! the arbiter declares a draw) or `{"outcome": "WinnerA" | "WinnerB" | "Draw"}`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use serde::{Deserialize, Serialize};

use wagerlock_escrow::{EscrowEngine, InMemoryLedger, Ledger};
use wagerlock_factory::EscrowFactory;
use wagerlock_types::{
    AccountId, Amount, DrawPolicy, EscrowEvent, EscrowId, FactoryConfig, FeeRate, Outcome,
    SettlementReceipt,
};

const OWNER: &str = "owner";
const ARBITER: &str = "arbiter";

/// Arguments for the `wagerlock simulate` subcommand.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Path to a scenario JSON file.
    #[arg(value_name = "SCENARIO_JSON")]
    pub scenario: PathBuf,

    /// Print the report as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// A party's entry into the wager.
#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    pub account: String,
    /// Stake in major units.
    pub stake: String,
}

/// How the arbiter settles.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Settle by identity, as `decide_winner` does.
    Winner(String),
    /// Settle with an explicit outcome.
    Outcome(Outcome),
}

/// A scenario file.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub fee_bps: u32,
    #[serde(default)]
    pub draw_policy: DrawPolicy,
    /// Opening balances in major units, keyed by account name.
    #[serde(default)]
    pub accounts: BTreeMap<String, String>,
    pub party_a: Entry,
    pub party_b: Entry,
    pub verdict: Verdict,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse scenario")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario: {}", path.display()))?;
        Self::from_json(&text)
    }
}

/// Everything that happened in one simulated wager.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub escrow: EscrowId,
    pub fee_rate: FeeRate,
    pub receipt: SettlementReceipt,
    pub events: Vec<EscrowEvent>,
    /// Final balances in major units, keyed by account name.
    pub balances: BTreeMap<String, String>,
}

/// Name-to-account directory for one simulation.
struct Accounts(BTreeMap<String, AccountId>);

impl Accounts {
    fn new<'a>(names: impl IntoIterator<Item = &'a String>) -> Self {
        let mut map: BTreeMap<String, AccountId> = [OWNER, ARBITER]
            .into_iter()
            .map(|name| (name.to_string(), AccountId::new()))
            .collect();
        for name in names {
            map.entry(name.clone()).or_insert_with(AccountId::new);
        }
        Self(map)
    }

    fn get(&self, name: &str) -> Result<AccountId> {
        match self.0.get(name) {
            Some(id) => Ok(*id),
            None => bail!("unknown account in scenario: {name}"),
        }
    }
}

/// Run `scenario` to completion.
///
/// Failures from the escrow itself (a refused join, an invalid verdict) are
/// returned as errors carrying the `WL_ERR_` code.
pub fn simulate(scenario: &Scenario) -> Result<SimulationReport> {
    let accounts = Accounts::new(
        scenario
            .accounts
            .keys()
            .chain([&scenario.party_a.account, &scenario.party_b.account]),
    );
    let owner = accounts.get(OWNER)?;
    let arbiter = accounts.get(ARBITER)?;

    let mut ledger = InMemoryLedger::new();
    for (name, balance) in &scenario.accounts {
        let amount = parse_major(balance, name)?;
        ledger.fund(accounts.get(name)?, amount)?;
    }

    let mut config = FactoryConfig::new(arbiter);
    config.draw_policy = scenario.draw_policy;
    let mut factory = EscrowFactory::new(owner, config);
    let escrow = factory.create_contract(owner, scenario.fee_bps)?;

    for entry in [&scenario.party_a, &scenario.party_b] {
        let stake = parse_major(&entry.stake, &entry.account)?;
        escrow
            .join(&mut ledger, accounts.get(&entry.account)?, stake)
            .with_context(|| format!("{} could not join", entry.account))?;
    }

    let receipt = match &scenario.verdict {
        Verdict::Winner(name) => escrow.decide_winner(&mut ledger, arbiter, accounts.get(name)?),
        Verdict::Outcome(outcome) => escrow.settle(&mut ledger, arbiter, *outcome),
    }
    .context("settlement failed")?;

    ledger.verify_supply()?;
    escrow.read(|engine| engine.verify_custody(&ledger))?;

    let mut events = factory.events().to_vec();
    events.extend(escrow.events());

    let balances = accounts
        .0
        .iter()
        .map(|(name, id)| (name.clone(), ledger.balance(*id).display_major()))
        .collect();

    Ok(SimulationReport {
        escrow: escrow.id(),
        fee_rate: escrow.read(EscrowEngine::fee_rate),
        receipt,
        events,
        balances,
    })
}

fn parse_major(value: &str, account: &str) -> Result<Amount> {
    Amount::from_major(value).with_context(|| format!("invalid amount for {account}: {value}"))
}

/// Execute the simulate subcommand.
///
/// Returns exit code 0 once the wager settles.
pub fn run_simulate(args: &SimulateArgs) -> Result<u8> {
    let scenario = Scenario::from_path(&args.scenario)?;
    let report = simulate(&scenario)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(0);
    }

    let payout = &report.receipt.payout;
    println!("{}", report.escrow);
    println!("  fee rate  {}", report.fee_rate);
    println!("  outcome   {}", report.receipt.outcome);
    println!("  pot       {}", payout.total.display_major());
    println!("  fee       {}", payout.fee.display_major());
    println!("  party A   {}", payout.payout_a.display_major());
    println!("  party B   {}", payout.payout_b.display_major());
    println!();
    println!("events:");
    for event in &report.events {
        println!("  {}", event.name());
    }
    println!();
    println!("balances:");
    for (name, balance) in &report.balances {
        println!("  {name:<12} {balance}");
    }
    Ok(0)
}
