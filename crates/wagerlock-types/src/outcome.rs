//! Settlement outcomes and payout computation.
//!
//! The arbiter renders one of three verdicts. [`Payout::compute`] turns a
//! verdict plus the two stakes into exact amounts for the arbiter and each
//! party. Whatever the outcome, `fee + payout_a + payout_b == total`: the
//! escrow is always emptied and nothing is created or lost.
//!
//! How a draw is paid out depends on the [`DrawPolicy`]:
//! - `EvenSplit` (default): the post-fee remainder is halved; when it is odd
//!   the single leftover unit goes to party A.
//! - `RefundLessHalfFee`: each party gets its own stake back minus half the
//!   fee (party A absorbs an odd unit). A party never absorbs more than its
//!   own stake; any excess shifts to the other party.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Amount, FeeRate, Result};

/// The arbiter's verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The first party to join wins the pot.
    WinnerA,
    /// The second party to join wins the pot.
    WinnerB,
    /// Neither wins; the pot is split.
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WinnerA => write!(f, "WINNER_A"),
            Self::WinnerB => write!(f, "WINNER_B"),
            Self::Draw => write!(f, "DRAW"),
        }
    }
}

/// Which of the two party slots an account occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartySlot {
    A,
    B,
}

impl fmt::Display for PartySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// How the pot is divided when the arbiter declares a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawPolicy {
    /// Both parties receive half of `total - fee`.
    #[default]
    EvenSplit,
    /// Each party receives its own stake minus half of the fee.
    RefundLessHalfFee,
}

impl fmt::Display for DrawPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EvenSplit => write!(f, "EVEN_SPLIT"),
            Self::RefundLessHalfFee => write!(f, "REFUND_LESS_HALF_FEE"),
        }
    }
}

/// Exact distribution of an escrow's pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    /// `stake_a + stake_b`.
    pub total: Amount,
    /// Paid to the arbiter.
    pub fee: Amount,
    /// Paid to party A.
    pub payout_a: Amount,
    /// Paid to party B.
    pub payout_b: Amount,
}

impl Payout {
    /// Distribute `stake_a + stake_b` for `outcome` at `fee_rate`, paying
    /// draws under [`DrawPolicy::EvenSplit`].
    ///
    /// # Errors
    /// Returns `AmountOutOfRange` if the stakes do not sum within `u128`.
    pub fn compute(
        stake_a: Amount,
        stake_b: Amount,
        fee_rate: FeeRate,
        outcome: Outcome,
    ) -> Result<Self> {
        Self::compute_with(stake_a, stake_b, fee_rate, outcome, DrawPolicy::EvenSplit)
    }

    /// As [`Payout::compute`], with an explicit draw policy.
    pub fn compute_with(
        stake_a: Amount,
        stake_b: Amount,
        fee_rate: FeeRate,
        outcome: Outcome,
        draw_policy: DrawPolicy,
    ) -> Result<Self> {
        let total = stake_a.try_add(stake_b)?;
        let fee = fee_rate.fee_on(total);
        let remainder = total.try_sub(fee)?;

        let (payout_a, payout_b) = match outcome {
            Outcome::WinnerA => (remainder, Amount::ZERO),
            Outcome::WinnerB => (Amount::ZERO, remainder),
            Outcome::Draw => match draw_policy {
                DrawPolicy::EvenSplit => {
                    let half = remainder.units() / 2;
                    let odd = remainder.units() % 2;
                    (Amount::new(half + odd), Amount::new(half))
                }
                DrawPolicy::RefundLessHalfFee => {
                    let (share_a, share_b) = split_fee(stake_a, stake_b, fee);
                    (stake_a.try_sub(share_a)?, stake_b.try_sub(share_b)?)
                }
            },
        };

        Ok(Self {
            total,
            fee,
            payout_a,
            payout_b,
        })
    }

    /// Sum of everything paid out. Always equals `total`.
    #[must_use]
    pub fn distributed(&self) -> Option<Amount> {
        self.fee
            .checked_add(self.payout_a)
            .and_then(|sum| sum.checked_add(self.payout_b))
    }
}

/// Split `fee` in half between the parties, party A taking the odd unit,
/// without charging either party more than it staked. Requires
/// `fee <= stake_a + stake_b`.
fn split_fee(stake_a: Amount, stake_b: Amount, fee: Amount) -> (Amount, Amount) {
    let mut share_b = fee.units() / 2;
    let mut share_a = fee.units() - share_b;
    if share_a > stake_a.units() {
        share_b += share_a - stake_a.units();
        share_a = stake_a.units();
    }
    if share_b > stake_b.units() {
        share_a += share_b - stake_b.units();
        share_b = stake_b.units();
    }
    (Amount::new(share_a), Amount::new(share_b))
}
