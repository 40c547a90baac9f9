// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Publicly verifiable distribution of a secret.
//!
//! The dealer commits to the polynomial coefficients `C_j = g^(a_j)`,
//! encrypts share `p(i)` under participant `i`'s public key as
//! `Y_i = y_i^p(i)` and proves with `DLEQ(g, X_i, y_i, Y_i)` that every
//! `Y_i` carries the share committed to by `X_i = prod_j C_j^(i^j)`.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::identities::One;
use rand::Rng;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use crate::dleq::DLEQ;
use crate::errors::{Result, WssError};
use crate::group::GroupParameters;
use crate::polynomial::Polynomial;
use crate::sharebox::{DistributionSharesBox, ShareBox};
use crate::util::{challenge_from_hasher, random_below, Util};

/// `X_i = C_0^(i^0) * C_1^(i^1) * ... * C_{t-1}^(i^(t-1))`, the commitment to
/// the share at `position`.
pub(crate) fn commitment_for_position(
    group: &GroupParameters,
    commitments: &[BigInt],
    position: &BigInt,
) -> BigInt {
    let order = group.order();
    let mut x = BigInt::one();
    let mut exponent = BigInt::one();
    for commitment in commitments {
        x = (x * commitment.modpow(&exponent, &group.q)) % &group.q;
        exponent = (exponent * position).mod_floor(&order);
    }
    x
}

fn distribute(
    group: &Arc<GroupParameters>,
    publickeys: &[BigInt],
    polynomial: &Polynomial,
    w: &BigInt,
) -> DistributionSharesBox {
    let order = group.order();

    // C_j = g^(a_j)
    let commitments: Vec<BigInt> = polynomial
        .coefficients
        .iter()
        .map(|coefficient| group.g.modpow(coefficient, &group.q))
        .collect();

    let mut positions: BTreeMap<BigInt, i64> = BTreeMap::new();
    let mut shares: BTreeMap<BigInt, BigInt> = BTreeMap::new();
    let mut proofs: Vec<(BigInt, DLEQ)> = Vec::with_capacity(publickeys.len());
    let mut challenge_hasher = Sha256::new();

    for (index, pubkey) in publickeys.iter().enumerate() {
        let position = index as i64 + 1;
        positions.insert(pubkey.clone(), position);

        let position = BigInt::from(position);
        let secret_share = polynomial.get_value(&position).mod_floor(&order);
        let x = commitment_for_position(group, &commitments, &position);

        // Y_i = y_i^p(i)
        let encrypted_secret_share = pubkey.modpow(&secret_share, &group.q);
        shares.insert(pubkey.clone(), encrypted_secret_share.clone());

        // log_g(X_i) == log_{y_i}(Y_i)
        let dleq = DLEQ::new(
            group.clone(),
            group.g.clone(),
            x,
            pubkey.clone(),
            encrypted_secret_share,
            secret_share,
            w.clone(),
        );
        dleq.update_hash(&mut challenge_hasher);
        proofs.push((pubkey.clone(), dleq));
    }

    // the common challenge c
    let challenge = challenge_from_hasher(challenge_hasher, &order);

    let mut responses: BTreeMap<BigInt, BigInt> = BTreeMap::new();
    for (pubkey, mut dleq) in proofs {
        dleq.c = Some(challenge.clone());
        if let Some(response) = dleq.get_r() {
            responses.insert(pubkey, response);
        }
    }

    DistributionSharesBox {
        commitments,
        positions,
        shares,
        publickeys: publickeys.to_vec(),
        challenge,
        responses,
    }
}

pub(crate) fn distribute_secret<R: Rng + ?Sized>(
    group: &Arc<GroupParameters>,
    rng: &mut R,
    secret: &BigInt,
    publickeys: &[BigInt],
    threshold: usize,
) -> Result<DistributionSharesBox> {
    if threshold > publickeys.len() {
        return Err(WssError::ThresholdExceedsPlayers {
            threshold,
            players: publickeys.len(),
        });
    }
    // t shares reconstruct, so the polynomial has degree t-1
    let polynomial = match threshold {
        0 => {
            return Err(WssError::InvalidParameters(
                "threshold must be at least 1".to_string(),
            ))
        }
        1 => Polynomial::new(vec![secret.clone()]),
        _ => Polynomial::random(rng, threshold - 1, secret, &group.q)?,
    };
    let w = random_below(rng, &group.q);
    let shares_box = distribute(group, publickeys, &polynomial, &w);
    debug!(
        participants = publickeys.len(),
        threshold, "distribution shares box created"
    );
    Ok(shares_box)
}

fn extract_share(
    group: &Arc<GroupParameters>,
    shares_box: &DistributionSharesBox,
    private_key: &BigInt,
    w: &BigInt,
) -> Option<ShareBox> {
    let order = group.order();
    let public_key = group.generate_public_key(private_key);
    let encrypted_secret_share = shares_box.shares.get(&public_key)?;

    // S_i = Y_i^(1/x_i)
    let privkey_inverse = Util::mod_inverse(private_key, &order)?;
    let decrypted_share =
        encrypted_secret_share.modpow(&privkey_inverse, &group.q);

    // DLEQ(G, y_i, S_i, Y_i)
    let mut dleq = DLEQ::new(
        group.clone(),
        group.G.clone(),
        public_key.clone(),
        decrypted_share.clone(),
        encrypted_secret_share.clone(),
        private_key.clone(),
        w.clone(),
    );

    let mut challenge_hasher = Sha256::new();
    dleq.update_hash(&mut challenge_hasher);
    let challenge = challenge_from_hasher(challenge_hasher, &order);
    dleq.c = Some(challenge.clone());

    Some(ShareBox::new(
        public_key,
        decrypted_share,
        challenge,
        dleq.get_r()?,
    ))
}

pub(crate) fn extract_secret_share<R: Rng + ?Sized>(
    group: &Arc<GroupParameters>,
    rng: &mut R,
    shares_box: &DistributionSharesBox,
    private_key: &BigInt,
) -> Option<ShareBox> {
    let w = random_below(rng, &group.q);
    extract_share(group, shares_box, private_key, &w)
}
