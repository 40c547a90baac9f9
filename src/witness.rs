// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Alpha-consistency witnesses for Information Checking.
//!
//! A triple `(x, y, z)` is alpha-consistent when
//!
//! ```text
//! z ≡ x + alpha * y (mod q)
//! ```
//!
//! `y` is a uniformly random tag, so `z` alone reveals nothing about `x`.
//! The relation is linear: for consistent `(x, y, z)` and `(x', y', z')`
//! the combination `(x' + d*x, y' + d*y, z' + d*z)` is consistent for any
//! integer `d`, which is what a receiver checks during `ICValidate`.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::identities::One;
use rand::Rng;

use crate::group::GroupParameters;
use crate::util::random_below;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlphaConsistent {
    pub x: BigInt,
    pub y: BigInt,
    pub z: BigInt,
}

impl AlphaConsistent {
    /// Fresh triple with all of `x`, `y`, `z` randomized.
    pub fn new<R: Rng + ?Sized>(rng: &mut R, group: &GroupParameters) -> Self {
        let x = random_below(rng, &group.q);
        Self::with_x(rng, group, x)
    }

    /// Triple carrying the fixed value `x`.
    pub fn with_x<R: Rng + ?Sized>(
        rng: &mut R,
        group: &GroupParameters,
        x: BigInt,
    ) -> Self {
        let y = random_below(rng, &group.q);
        let z = Self::compute_z(group, &x, &y);
        AlphaConsistent { x, y, z }
    }

    pub fn is_consistent(&self, group: &GroupParameters) -> bool {
        Self::is_alpha_consistent(group, &self.x, &self.y, &self.z)
    }

    pub fn is_alpha_consistent(
        group: &GroupParameters,
        x: &BigInt,
        y: &BigInt,
        z: &BigInt,
    ) -> bool {
        (x + &group.alpha * y - z).mod_floor(&group.q) == BigInt::default()
    }

    /// Tag `z` for a publicly revealed `(x, y)`.
    pub fn compute_z(group: &GroupParameters, x: &BigInt, y: &BigInt) -> BigInt {
        (x + &group.alpha * y).mod_floor(&group.q)
    }

    /// Tag `y` for a publicly revealed `(x, z)`.
    pub fn compute_y(group: &GroupParameters, x: &BigInt, z: &BigInt) -> BigInt {
        // q is prime, alpha^(q-2) is the inverse of alpha
        let exponent = &group.q - BigInt::one() - BigInt::one();
        let alpha_inverse = group.alpha.modpow(&exponent, &group.q);
        ((z - x) * alpha_inverse).mod_floor(&group.q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_group() -> GroupParameters {
        let mut group = (*GroupParameters::new()).clone();
        group.q = BigInt::from(179426549);
        group
    }

    #[test]
    fn test_fresh_triples_are_consistent() {
        let mut rng = StdRng::from_seed([9u8; 32]);
        let group = GroupParameters::new();
        for _ in 0..10 {
            assert!(AlphaConsistent::new(&mut rng, &group).is_consistent(&group));
        }
    }

    #[test]
    fn test_with_x_keeps_x() {
        let mut rng = StdRng::from_seed([9u8; 32]);
        let group = small_group();
        // shares are not reduced, x may exceed q
        let x = BigInt::from(987654321987654321_i64);
        let triple = AlphaConsistent::with_x(&mut rng, &group, x.clone());
        assert_eq!(triple.x, x);
        assert!(triple.is_consistent(&group));
    }

    #[test]
    fn test_tampered_triple_is_inconsistent() {
        let mut rng = StdRng::from_seed([10u8; 32]);
        let group = small_group();
        let mut triple = AlphaConsistent::new(&mut rng, &group);
        triple.y += BigInt::one();
        assert!(!triple.is_consistent(&group));
    }

    #[test]
    fn test_linear_combination_is_consistent() {
        let mut rng = StdRng::from_seed([11u8; 32]);
        let group = small_group();
        let first = AlphaConsistent::with_x(&mut rng, &group, BigInt::from(31337));
        let prime = AlphaConsistent::new(&mut rng, &group);
        let d = BigInt::from(1999);
        assert!(AlphaConsistent::is_alpha_consistent(
            &group,
            &(&prime.x + &first.x * &d),
            &(&prime.y + &first.y * &d),
            &(&prime.z + &first.z * &d),
        ));
    }

    #[test]
    fn test_repairs_recover_tags() {
        let mut rng = StdRng::from_seed([12u8; 32]);
        let group = small_group();
        let triple = AlphaConsistent::new(&mut rng, &group);
        assert_eq!(
            AlphaConsistent::compute_z(&group, &triple.x, &triple.y),
            triple.z
        );
        assert_eq!(
            AlphaConsistent::compute_y(&group, &triple.x, &triple.z),
            triple.y
        );
    }
}
