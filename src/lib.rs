// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Weak verifiable secret sharing with Information Checking and
//! SendWithCheck relay integrity, plus publicly verifiable distribution of
//! shares under Feldman commitments.

pub mod distribution;
pub mod dleq;
pub mod errors;
pub mod group;
pub mod ic;
pub mod message;
pub mod participant;
pub mod polynomial;
pub mod sharebox;
pub mod swc;
pub mod util;
pub mod verifier;
pub mod witness;

pub use errors::{Result, WssError};
pub use group::GroupParameters;
pub use message::{BroadcastDecision, RoundId};
pub use participant::Participant;
pub use polynomial::Polynomial;
pub use sharebox::{DistributionSharesBox, ShareBox};
pub use swc::{RelayBehavior, TransmissionPolicy};
pub use util::{string_from_secret, string_to_secret};
pub use witness::AlphaConsistent;
