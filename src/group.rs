// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

#![allow(non_snake_case)]

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_primes::{Generator, Verification};
use num_traits::identities::{One, Zero};
use num_traits::ToPrimitive;
use rand::Rng;
use std::sync::Arc;

use crate::errors::{Result, WssError};
use crate::util::random_below;

/// Security parameter used by every deployment so far.
pub const DEFAULT_ALPHA: u64 = 1024;

/// Exclusive bound for IC challenges and SendWithCheck pads.
pub const DEFAULT_CHALLENGE_BOUND: u64 = 2048;

/// 2048-bit MODP Group
/// New Modular Exponential (MODP) Diffie-Hellman groups
///
/// This group is assigned id 14.
///
/// This prime is: 2^2048 - 2^1984 - 1 + 2^64 * { [2^1918 pi] + 124476 }
const RFC3526_MODP_2048: &[u8] = b"ffffffffffffffffc90fdaa22168c234c4c6628b80dc1cd1\
29024e088a67cc74020bbea63b139b22514a08798e3404ddef9519b3cd3a431b302b0a6df25f1437\
4fe1356d6d51c245e485b576625e7ec6f44c42e9a637ed6b0bff5cb6f406b7edee386bfb5a899fa5\
ae9f24117c4b1fe649286651ece45b3dc2007cb8a163bf0598da48361c55d39a69163fa8fd24cf5f\
83655d23dca3ad961c62f356208552bb9ed529077096966d670c354e4abc9804f1746c08ca18217c\
32905e462e36ce3be39e772c180e86039b2783a2ec07a28fb5c55df06f4c52c9de2bcbf695581718\
3995497cea956ae515d2261898fa051015728e5a8aacaa68ffffffffffffffff";

/// Scheme-wide constants of one WSS deployment, shared read-only by every
/// participant.
///
/// - `q`: safe prime modulus
/// - `g`: sophie germain prime `(q-1)/2`, generator of the commitment subgroup
/// - `G`: generator `2`, used for key pairs
/// - `alpha`: security parameter of the alpha-consistency witnesses
/// - `challenge_bound`: IC challenges and SendWithCheck pads are drawn below it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupParameters {
    pub q: BigInt,
    pub g: BigInt,
    pub G: BigInt,
    pub alpha: BigInt,
    pub challenge_bound: BigInt,

    pub length: u32,
}

impl GroupParameters {
    /// `q` is a safe prime of length 2048 bit RFC3526 https://tools.ietf.org/html/rfc3526.
    /// `2` and the corresponding sophie germain prime are generators.
    pub fn new() -> Arc<Self> {
        let q = BigInt::parse_bytes(RFC3526_MODP_2048, 16)
            .expect("RFC 3526 group 14 prime is valid hex");
        Arc::new(Self::from_safe_prime(q, 2048))
    }

    /// Initializes the parameters by generating a safe prime of `length` bit length.
    ///
    /// - Parameter length: Number of bits used for choosing numbers and doing calculations.
    pub fn init(length: u32) -> Arc<Self> {
        let q = Generator::safe_prime(length as usize);
        Arc::new(Self::from_safe_prime(
            BigInt::from_biguint(Sign::Plus, q),
            length,
        ))
    }

    /// Explicit parameters, e.g. to interoperate with an existing deployment.
    /// Fails unless `q` is a safe prime and `alpha` is invertible modulo `q`.
    pub fn with_parameters(
        length: u32,
        q: BigInt,
        g: BigInt,
        G: BigInt,
        alpha: BigInt,
    ) -> Result<Arc<Self>> {
        let params = GroupParameters {
            q,
            g,
            G,
            alpha,
            challenge_bound: BigInt::from(DEFAULT_CHALLENGE_BOUND),
            length,
        };
        params.validate()?;
        Ok(Arc::new(params))
    }

    fn from_safe_prime(q: BigInt, length: u32) -> Self {
        let g = (&q - BigInt::one()) / BigInt::from(2_u64);
        GroupParameters {
            q,
            g,
            G: BigInt::from(2_u64),
            alpha: BigInt::from(DEFAULT_ALPHA),
            challenge_bound: BigInt::from(DEFAULT_CHALLENGE_BOUND),
            length,
        }
    }

    /// Checks the safe-prime form of `q` and that the witness relation is usable.
    pub fn validate(&self) -> Result<()> {
        let q = self.q.to_biguint().ok_or_else(|| {
            WssError::InvalidParameters("modulus is negative".to_string())
        })?;
        if !is_safe_prime(&q) {
            return Err(WssError::InvalidParameters(format!(
                "modulus {} is not a safe prime",
                self.q
            )));
        }
        if self.alpha.mod_floor(&self.q).is_zero() {
            return Err(WssError::InvalidParameters(
                "alpha must not be a multiple of the modulus".to_string(),
            ));
        }
        if self.challenge_bound <= BigInt::zero() {
            return Err(WssError::InvalidParameters(
                "challenge bound must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Order of the multiplicative group, `q - 1`.
    pub fn order(&self) -> BigInt {
        &self.q - BigInt::one()
    }

    pub fn generate_private_key<R: Rng + ?Sized>(&self, rng: &mut R) -> BigInt {
        let order = self.order();
        let mut privkey = random_below(rng, &self.q);
        // We need the private key and q-1 to be coprime so that we can calculate 1/key mod (q-1) during share extraction.
        while privkey.gcd(&order) != BigInt::one() {
            privkey = random_below(rng, &self.q);
        }
        privkey
    }

    /// generate public key from private key
    /// P = G^k over the Group of the order q
    pub fn generate_public_key(&self, privkey: &BigInt) -> BigInt {
        self.G.modpow(privkey, &self.q)
    }
}

/// `Verification::is_prime` sieves with its own table of primes below 17864
/// and so rejects those primes themselves. Values below 2^32 are decided by
/// trial division instead.
fn is_prime(n: &BigUint) -> bool {
    match n.to_u64() {
        Some(small) if small < 1 << 32 => {
            small >= 2
                && (2_u64..)
                    .take_while(|d| d * d <= small)
                    .all(|d| small % d != 0)
        }
        _ => Verification::is_prime(n),
    }
}

/// `q` and `(q-1)/2` are both prime.
pub(crate) fn is_safe_prime(q: &BigUint) -> bool {
    if !is_prime(q) {
        return false;
    }
    let p = (q - BigUint::one()) / BigUint::from(2_u32);
    is_prime(&p)
}
