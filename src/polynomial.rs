// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

use num_bigint::BigInt;
use num_traits::identities::{One, Zero};
use rand::Rng;
use std::vec::Vec;

use crate::errors::{Result, WssError};
use crate::util::random_below;

/// Secret Shares on Polynomial
/// P(x) = a_0*x^0 + a_1*x^1 + a_2*x^2 + ... + a_t*x^t
/// s = P(0) = a_0
/// s_i = P(i)
///
/// Values are computed over the integers, no reduction is applied here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
    pub coefficients: Vec<BigInt>,
}

impl Polynomial {
    /// Polynomial with the given coefficients, index 0 being the secret.
    pub fn new(coefficients: Vec<BigInt>) -> Self {
        Polynomial { coefficients }
    }

    /// Random polynomial of `degree` whose constant term is `secret` and whose
    /// other coefficients are uniform in `[0, random_threshold)`. The bound
    /// must be positive.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        degree: usize,
        secret: &BigInt,
        random_threshold: &BigInt,
    ) -> Result<Self> {
        if degree < 1 {
            return Err(WssError::DegreeTooSmall(degree));
        }
        if random_threshold <= &BigInt::zero() {
            return Err(WssError::InvalidParameters(format!(
                "coefficient bound {} must be positive",
                random_threshold
            )));
        }
        let mut coefficients = Vec::with_capacity(degree + 1);
        coefficients.push(secret.clone());
        // [1,degree] not [1,degree)
        for _ in 1..=degree {
            coefficients.push(random_below(rng, random_threshold));
        }
        Ok(Polynomial::new(coefficients))
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Get P(x) = value
    pub fn get_value(&self, x: &BigInt) -> BigInt {
        let mut coefficients = self.coefficients.iter();
        let mut result = match coefficients.next() {
            Some(secret) => secret.clone(),
            None => return BigInt::default(),
        };
        let mut temp = BigInt::one();
        for coefficient in coefficients {
            temp = temp * x;
            result = result + coefficient * &temp;
        }
        result
    }
}
