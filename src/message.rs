// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Messages exchanged during `ICSetup` / `ICValidate`.
//!
//! Channels are simulated in process: a private send is a call to
//! `Participant::deliver` on the addressed peer. A broadcast is appended to
//! the dealer's `decisions` and to `observed_broadcasts` of the other two
//! parties of the round.

use num_bigint::{BigInt, Sign};
use sha2::{Digest, Sha256};

use crate::util::hash_update;

/// Identifies one IC exchange by the ids of its three parties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoundId {
    pub dealer: usize,
    pub intermediary: usize,
    pub receiver: usize,
}

/// What the intermediary receives in `ICSetup`: both witness triples.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntermediarySetup {
    pub s: BigInt,
    pub s_pr: BigInt,
    pub y: BigInt,
    pub y_pr: BigInt,
    pub z: BigInt,
    pub z_pr: BigInt,
}

/// What the receiver receives in `ICSetup`: only the tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiverSetup {
    pub alpha: BigInt,
    pub z: BigInt,
    pub z_pr: BigInt,
}

/// `(d, s' + d*s, y' + d*y)`, as computed by whoever holds the triples.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidateView {
    pub d: BigInt,
    pub s_pr_plus_ds: BigInt,
    pub y_pr_plus_dy: BigInt,
}

impl ValidateView {
    pub fn compute(
        d: &BigInt,
        s: &BigInt,
        s_pr: &BigInt,
        y: &BigInt,
        y_pr: &BigInt,
    ) -> Self {
        ValidateView {
            d: d.clone(),
            s_pr_plus_ds: s_pr + s * d,
            y_pr_plus_dy: y_pr + y * d,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrivateMessage {
    /// Dealer to intermediary.
    IntermediarySetup(IntermediarySetup),
    /// Dealer to receiver.
    ReceiverSetup(ReceiverSetup),
    /// Intermediary's challenge `d` to the dealer.
    Challenge(BigInt),
    /// Dealer's view to the receiver.
    Validate(ValidateView),
}

impl PrivateMessage {
    /// The value protected by SendWithCheck: every component of the message
    /// hashed in order, read as an integer.
    pub fn digest(&self) -> BigInt {
        let mut hasher = Sha256::new();
        match self {
            PrivateMessage::IntermediarySetup(setup) => {
                hasher.update(b"setup-intermediary");
                for value in [
                    &setup.s,
                    &setup.s_pr,
                    &setup.y,
                    &setup.y_pr,
                    &setup.z,
                    &setup.z_pr,
                ] {
                    hash_update(&mut hasher, value);
                }
            }
            PrivateMessage::ReceiverSetup(setup) => {
                hasher.update(b"setup-receiver");
                for value in [&setup.alpha, &setup.z, &setup.z_pr] {
                    hash_update(&mut hasher, value);
                }
            }
            PrivateMessage::Challenge(d) => {
                hasher.update(b"challenge");
                hash_update(&mut hasher, d);
            }
            PrivateMessage::Validate(view) => {
                hasher.update(b"validate");
                for value in [&view.d, &view.s_pr_plus_ds, &view.y_pr_plus_dy] {
                    hash_update(&mut hasher, value);
                }
            }
        }
        BigInt::from_bytes_be(Sign::Plus, &hasher.finalize()[..])
    }
}

/// What the dealer publishes on the broadcast channel to close a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BroadcastDecision {
    /// No conflict, both parties keep the dealer's triple.
    Accept,
    /// The intermediary's view disagreed: `(x, y)` are revealed and the
    /// receiver recomputes `z`.
    RevealShare { x: BigInt, y: BigInt },
    /// Only the receiver disagreed: `(z, alpha)` are revealed and the
    /// intermediary recomputes `y`.
    RevealTag { z: BigInt, alpha: BigInt },
}
