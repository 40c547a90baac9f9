// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

use num_bigint::BigInt;
use std::collections::BTreeMap;
use std::vec::Vec;

/// A decrypted share together with the proof that it was decrypted with the
/// private key behind `publickey`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareBox {
    pub publickey: BigInt,
    pub share: BigInt,
    pub challenge: BigInt,
    pub response: BigInt,
}

impl ShareBox {
    pub fn new(
        publickey: BigInt,
        share: BigInt,
        challenge: BigInt,
        response: BigInt,
    ) -> Self {
        ShareBox {
            publickey,
            share,
            challenge,
            response,
        }
    }
}

/// The dealer's public commitment to every share of one distribution.
///
/// All maps are keyed by the participant's public key, `publickeys` fixes
/// the order in which the challenge hash was computed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistributionSharesBox {
    pub commitments: Vec<BigInt>,
    pub positions: BTreeMap<BigInt, i64>,
    pub shares: BTreeMap<BigInt, BigInt>,
    pub publickeys: Vec<BigInt>,
    pub challenge: BigInt,
    pub responses: BTreeMap<BigInt, BigInt>,
}
