// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! SendWithCheck.
//!
//! A dealer `D` lets `P_j` forward a message `m` to `P_i`, and `P_i` learns
//! whether `P_j` altered it:
//!
//! - `D` draws pads `r_i`, `r_j`
//! - `D` sends `r_j` to `P_j`
//! - `D` sends `r_i` and `beta = r_i + r_j + m` to `P_i`
//! - `P_j` sends `m` and `alpha = r_j + m` to `P_i`
//! - `P_i` accepts iff `beta - alpha == r_i`
//!
//! Each run costs six private messages plus one for the final decision.

use num_bigint::BigInt;
use rand::Rng;

use crate::util::random_below;

/// Private messages of one SendWithCheck run.
pub const SWC_MESSAGES: usize = 6;

/// Messages charged for one checked private send, final decision included.
pub const CHECKED_SEND_COST: usize = SWC_MESSAGES + 1;

/// How a participant transmits its private messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmissionPolicy {
    /// Plain assignment over the assumed-private channel.
    Direct,
    /// Every private send wrapped in SendWithCheck.
    CheckedRelay,
}

impl TransmissionPolicy {
    /// Messages charged for one private send.
    pub fn cost(&self) -> usize {
        match self {
            TransmissionPolicy::Direct => 1,
            TransmissionPolicy::CheckedRelay => CHECKED_SEND_COST,
        }
    }
}

impl Default for TransmissionPolicy {
    fn default() -> Self {
        TransmissionPolicy::Direct
    }
}

/// What a participant does with messages it relays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayBehavior {
    Honest,
    /// Forwards `m + offset` instead of `m`.
    Tamper(BigInt),
}

impl Default for RelayBehavior {
    fn default() -> Self {
        RelayBehavior::Honest
    }
}

/// State held while acting as the dealer of a SendWithCheck run.
#[derive(Debug, Clone, Default)]
pub struct DealerSlot {
    pub m: BigInt,
    pub r_i: BigInt,
    pub r_j: BigInt,
}

/// State held while acting as the relay `P_j`.
#[derive(Debug, Clone, Default)]
pub struct RelaySlot {
    pub r_j: BigInt,
    pub behavior: RelayBehavior,
}

impl RelaySlot {
    fn forward(&self, m: &BigInt) -> BigInt {
        match &self.behavior {
            RelayBehavior::Honest => m.clone(),
            RelayBehavior::Tamper(offset) => m + offset,
        }
    }
}

/// State held while acting as the recipient `P_i`.
#[derive(Debug, Clone, Default)]
pub struct RecipientSlot {
    pub r_i: BigInt,
    pub beta: BigInt,
    pub m: BigInt,
    pub alpha: BigInt,
}

impl RecipientSlot {
    pub fn is_message_acceptable(&self) -> bool {
        &self.beta - &self.alpha == self.r_i
    }
}

/// Per-participant SendWithCheck bookkeeping, one slot per role so that a
/// participant can be dealer and relay (or dealer and recipient) of the same
/// run.
#[derive(Debug, Clone, Default)]
pub struct SwcState {
    pub dealer: DealerSlot,
    pub relay: RelaySlot,
    pub recipient: RecipientSlot,
    /// Ids of peers whose relayed message failed the check.
    pub rejected: Vec<usize>,
}

/// Runs one SendWithCheck exchange for `m` and returns whether the
/// recipient accepts what the relay forwarded.
pub fn send_with_check<R: Rng + ?Sized>(
    rng: &mut R,
    pad_bound: &BigInt,
    m: &BigInt,
    dealer: &mut DealerSlot,
    recipient: &mut RecipientSlot,
    relay: &mut RelaySlot,
) -> bool {
    // P_j hands m to D
    dealer.m = m.clone();

    dealer.r_i = random_below(rng, pad_bound);
    dealer.r_j = random_below(rng, pad_bound);

    relay.r_j = dealer.r_j.clone();

    recipient.r_i = dealer.r_i.clone();
    recipient.beta = &dealer.r_i + &dealer.r_j + &dealer.m;

    let forwarded = relay.forward(m);
    recipient.alpha = &relay.r_j + &forwarded;
    recipient.m = forwarded;

    recipient.is_message_acceptable()
}
