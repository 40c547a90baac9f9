// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

use num_bigint::{BigInt, RandBigInt, Sign};
use num_integer::Integer;
use num_traits::identities::{One, Zero};
use rand::Rng;
use sha2::{Digest, Sha256};

pub struct Util {}

impl Util {
    /// Finds the greatest common denominator of two integers *a* and *b*, and two
    /// integers *x* and *y* such that *ax* + *by* is the greatest common
    /// denominator of *a* and *b* (Bézout coefficients).
    ///
    /// This function is an implementation of the [extended Euclidean
    /// algorithm](https://en.wikipedia.org/wiki/Extended_Euclidean_algorithm).
    pub fn extend_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
        if a.is_zero() {
            (b.clone(), BigInt::zero(), BigInt::one())
        } else {
            let (g, x, y) = Util::extend_gcd(&(b % a), a);
            let q = b / a;
            (g, y - q * &x, x)
        }
    }

    /// Calculates the [modular multiplicative
    /// inverse](https://en.wikipedia.org/wiki/Modular_multiplicative_inverse) *x*
    /// of an integer *a* such that *ax* ≡ 1 (mod *m*).
    ///
    /// Such an integer may not exist. If so, this function will return `None`.
    pub fn mod_inverse(a: &BigInt, modular: &BigInt) -> Option<BigInt> {
        let (g, x, _) = Util::extend_gcd(a, modular);
        if g != BigInt::one() {
            None
        } else {
            Some(x.mod_floor(modular))
        }
    }
}

/// Uniform value in `[0, bound)`. `bound` must be positive.
pub fn random_below<R: Rng + ?Sized>(rng: &mut R, bound: &BigInt) -> BigInt {
    rng.gen_bigint_range(&BigInt::zero(), bound)
}

/// Feeds the decimal representation of `value` into the challenge hash.
pub fn hash_update(hasher: &mut Sha256, value: &BigInt) {
    hasher.update(value.to_str_radix(10).as_bytes());
}

/// Finalizes the digest and reads it as a big-endian integer reduced mod `modulus`.
pub fn challenge_from_hasher(hasher: Sha256, modulus: &BigInt) -> BigInt {
    let digest = hasher.finalize();
    BigInt::from_bytes_be(Sign::Plus, &digest[..]).mod_floor(modulus)
}

/// Interprets the UTF-8 bytes of `message` as a big-endian integer secret.
pub fn string_to_secret(message: &str) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, message.as_bytes())
}

pub fn string_from_secret(secret: &BigInt) -> String {
    let (_, bytes) = secret.to_bytes_be();
    String::from_utf8_lossy(&bytes).into_owned()
}
