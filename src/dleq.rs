// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! DLEQ (Discrete Logarithm Equality) proof over the MODP group.
//!
//! To prove that log_g1(h1) = log_g2(h2), the prover knowing α with
//! h1 = g1^α and h2 = g2^α:
//!
//! - sends a1 = g1^w and a2 = g2^w, with w random
//! - receives the challenge c (here a Fiat–Shamir hash)
//! - responds with r = w - αc (mod q-1)
//!
//! The verifier recomputes a1 = g1^r * h1^c and a2 = g2^r * h2^c.

use num_bigint::BigInt;
use num_integer::Integer;
use sha2::Sha256;
use std::sync::Arc;

use crate::group::GroupParameters;
use crate::util::hash_update;

#[derive(Debug, Clone)]
pub struct DLEQ {
    pub g1: BigInt,
    pub h1: BigInt,
    pub g2: BigInt,
    pub h2: BigInt,
    pub w: BigInt,
    pub alpha: BigInt,
    pub c: Option<BigInt>,
    group: Arc<GroupParameters>,
}

impl DLEQ {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        group: Arc<GroupParameters>,
        g1: BigInt,
        h1: BigInt,
        g2: BigInt,
        h2: BigInt,
        alpha: BigInt,
        w: BigInt,
    ) -> Self {
        DLEQ {
            g1,
            h1,
            g2,
            h2,
            w,
            alpha,
            c: None,
            group,
        }
    }

    /// a1 = g1^w
    pub fn get_a1(&self) -> BigInt {
        self.g1.modpow(&self.w, &self.group.q)
    }

    /// a2 = g2^w
    pub fn get_a2(&self) -> BigInt {
        self.g2.modpow(&self.w, &self.group.q)
    }

    /// r = w - alpha*c (mod q-1), once the challenge is known.
    pub fn get_r(&self) -> Option<BigInt> {
        self.c.as_ref().map(|c| {
            (&self.w - &self.alpha * c).mod_floor(&self.group.order())
        })
    }

    /// Feeds `h1, h2, a1, a2` into the challenge hash.
    pub fn update_hash(&self, hasher: &mut Sha256) {
        hash_update(hasher, &self.h1);
        hash_update(hasher, &self.h2);
        hash_update(hasher, &self.get_a1());
        hash_update(hasher, &self.get_a2());
    }

    /// Verifier side: `(g1^r * h1^c, g2^r * h2^c)`, which equal `(a1, a2)` for
    /// an honest proof.
    pub fn recompute_commitments(
        group: &GroupParameters,
        g1: &BigInt,
        h1: &BigInt,
        g2: &BigInt,
        h2: &BigInt,
        response: &BigInt,
        c: &BigInt,
    ) -> (BigInt, BigInt) {
        let q = &group.q;
        let a1 = (g1.modpow(response, q) * h1.modpow(c, q)) % q;
        let a2 = (g2.modpow(response, q) * h2.modpow(c, q)) % q;
        (a1, a2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::{challenge_from_hasher, random_below};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use sha2::Digest;

    #[test]
    fn test_dleq_commitments() {
        let group = GroupParameters::new();
        let g1 = BigInt::from(8443);
        let g2 = BigInt::from(1299721);
        let w = BigInt::from(81647);
        let dleq = DLEQ::new(
            group.clone(),
            g1.clone(),
            BigInt::from(531216),
            g2.clone(),
            BigInt::from(14767239),
            BigInt::from(163027),
            w.clone(),
        );
        assert_eq!(dleq.get_a1(), g1.modpow(&w, &group.q));
        assert_eq!(dleq.get_a2(), g2.modpow(&w, &group.q));
        assert_eq!(dleq.get_r(), None);
    }

    #[test]
    fn test_dleq_get_r() {
        let group = GroupParameters::new();
        let mut dleq = DLEQ::new(
            group.clone(),
            BigInt::from(8443),
            BigInt::from(531216),
            BigInt::from(1299721),
            BigInt::from(14767239),
            BigInt::from(163027),
            BigInt::from(81647),
        );
        dleq.c = Some(BigInt::from(127997));
        let expected = (BigInt::from(81647)
            - BigInt::from(163027) * BigInt::from(127997))
        .mod_floor(&group.order());
        assert_eq!(dleq.get_r(), Some(expected));
    }

    #[test]
    fn test_dleq_roundtrip() {
        let group = GroupParameters::new();
        let mut rng = StdRng::from_seed([51u8; 32]);
        let alpha = random_below(&mut rng, &group.q);
        let w = random_below(&mut rng, &group.q);
        let g1 = BigInt::from(8443);
        let g2 = BigInt::from(1299721);
        let h1 = g1.modpow(&alpha, &group.q);
        let h2 = g2.modpow(&alpha, &group.q);

        let mut dleq = DLEQ::new(
            group.clone(),
            g1.clone(),
            h1.clone(),
            g2.clone(),
            h2.clone(),
            alpha,
            w,
        );
        let mut hasher = Sha256::new();
        dleq.update_hash(&mut hasher);
        let c = challenge_from_hasher(hasher, &group.order());
        dleq.c = Some(c.clone());
        let r = dleq.get_r().unwrap();

        let (a1, a2) =
            DLEQ::recompute_commitments(&group, &g1, &h1, &g2, &h2, &r, &c);
        assert_eq!(a1, dleq.get_a1());
        assert_eq!(a2, dleq.get_a2());
    }
}
