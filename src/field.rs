//! Prime field arithmetic over an arbitrary-precision modulus.
//!
//! The modulus is on the order of 2^256, so every operation goes through
//! `BigInt`; fixed-width arithmetic would silently overflow. A [`Field`] is
//! an explicit value handed to each engine rather than module-level state,
//! so engines over different moduli can coexist.

use core::mem;

use num_bigint::{BigInt, RandBigInt};
use num_traits::{One, Signed, Zero};
use rand::{CryptoRng, Rng};

use crate::error::FieldError;

/// A prime field defined by its modulus. Immutable after construction.
///
/// `Field::new` checks the size of the modulus but not its primality; as
/// with the choice of a safe prime elsewhere in the ecosystem, picking an
/// actual prime is the caller's responsibility. Over a composite modulus
/// [`Field::mod_inverse`] can fail with [`FieldError::NoInverse`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Field {
    prime: BigInt,
}

impl Field {
    /// Creates a field over the given modulus.
    ///
    /// Fails with [`FieldError::ModulusTooSmall`] unless the modulus exceeds
    /// 255, since every secret byte must be a field element.
    pub fn new(prime: BigInt) -> Result<Self, FieldError> {
        if prime <= BigInt::from(u8::MAX) {
            return Err(FieldError::ModulusTooSmall);
        }
        Ok(Self { prime })
    }

    /// The secp256k1 base field prime, `2^256 - 2^32 - 977`.
    pub fn secp256k1() -> Self {
        let prime = (BigInt::one() << 256u32) - (BigInt::one() << 32u32) - 977;
        Self { prime }
    }

    /// The field modulus.
    pub fn prime(&self) -> &BigInt {
        &self.prime
    }

    /// Reduces a value into the canonical range `[0, p)`.
    pub(crate) fn normalize(&self, value: BigInt) -> BigInt {
        let reduced = value % &self.prime;
        if reduced.is_negative() {
            reduced + &self.prime
        } else {
            reduced
        }
    }

    /// Returns the unique `x` in `[0, p)` with `a * x = 1 (mod p)`.
    ///
    /// Negative inputs are normalized first. Fails with
    /// [`FieldError::NoInverse`] when `gcd(a, p) != 1`, i.e. `a` reduces to
    /// zero or the modulus is composite.
    pub fn mod_inverse(&self, a: &BigInt) -> Result<BigInt, FieldError> {
        let a = self.normalize(a.clone());
        let (g, x, _) = extended_gcd(a, self.prime.clone());
        if !g.is_one() {
            return Err(FieldError::NoInverse);
        }
        Ok(self.normalize(x))
    }

    /// Evaluates a polynomial at `x` with Horner's method under the modulus.
    ///
    /// `coeffs[0]` is the constant term. The result is in `[0, p)` and costs
    /// one modular multiplication per coefficient.
    pub fn evaluate_polynomial(&self, coeffs: &[BigInt], x: &BigInt) -> BigInt {
        let acc = coeffs
            .iter()
            .rev()
            .fold(BigInt::zero(), |acc, coeff| (acc * x + coeff) % &self.prime);
        self.normalize(acc)
    }

    /// Draws a uniform field element in `[0, p)`.
    pub fn random_element<R: Rng + CryptoRng + ?Sized>(&self, rng: &mut R) -> BigInt {
        rng.gen_bigint_range(&BigInt::zero(), &self.prime)
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::secp256k1()
    }
}

// Iterative extended Euclid: returns (g, x, y) with a*x + b*y = g.
// Iterative rather than recursive so adversarially large moduli cannot
// exhaust the stack.
fn extended_gcd(a: BigInt, b: BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut s, mut s_last) = (BigInt::zero(), BigInt::one());
    let (mut t, mut t_last) = (BigInt::one(), BigInt::zero());
    let (mut r, mut r_last) = (b, a);

    while !r.is_zero() {
        let quotient = &r_last / &r;
        r_last -= &quotient * &r;
        s_last -= &quotient * &s;
        t_last -= &quotient * &t;
        mem::swap(&mut r, &mut r_last);
        mem::swap(&mut s, &mut s_last);
        mem::swap(&mut t, &mut t_last);
    }
    (r_last, s_last, t_last)
}

#[cfg(test)]
mod tests {
    use super::{extended_gcd, Field, FieldError};
    use num_bigint::BigInt;
    use num_traits::One;
    use rand_chacha::{rand_core::SeedableRng, ChaCha20Rng};

    fn small_field() -> Field {
        Field::new(BigInt::from(1613)).unwrap()
    }

    #[test]
    fn modulus_must_exceed_byte_range() {
        assert_eq!(Field::new(BigInt::from(251)), Err(FieldError::ModulusTooSmall));
        assert_eq!(Field::new(BigInt::from(255)), Err(FieldError::ModulusTooSmall));
        assert!(Field::new(BigInt::from(257)).is_ok());
    }

    #[test]
    fn secp256k1_prime_matches_reference_constant() {
        let expected = BigInt::parse_bytes(
            b"fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
            16,
        )
        .unwrap();
        assert_eq!(*Field::secp256k1().prime(), expected);
    }

    #[test]
    fn extended_gcd_bezout_identity() {
        let (g, x, y) = extended_gcd(BigInt::from(240), BigInt::from(46));
        assert_eq!(g, BigInt::from(2));
        assert_eq!(BigInt::from(240) * x + BigInt::from(46) * y, BigInt::from(2));
    }

    #[test]
    fn mod_inverse_works() {
        let field = Field::new(BigInt::from(7919)).unwrap();
        let inverse = field.mod_inverse(&BigInt::from(3)).unwrap();
        assert_eq!(field.normalize(inverse * 3), BigInt::one());
    }

    #[test]
    fn mod_inverse_normalizes_negative_input() {
        let field = Field::new(BigInt::from(7919)).unwrap();
        let from_negative = field.mod_inverse(&BigInt::from(-3)).unwrap();
        let from_reduced = field.mod_inverse(&BigInt::from(7916)).unwrap();
        assert_eq!(from_negative, from_reduced);
    }

    #[test]
    fn mod_inverse_of_zero_fails() {
        let field = small_field();
        assert_eq!(field.mod_inverse(&BigInt::from(0)), Err(FieldError::NoInverse));
        assert_eq!(
            field.mod_inverse(&BigInt::from(1613)),
            Err(FieldError::NoInverse)
        );
    }

    #[test]
    fn mod_inverse_fails_over_composite_modulus() {
        // 1616 = 2^4 * 101, so even elements share a factor with the modulus.
        let field = Field::new(BigInt::from(1616)).unwrap();
        assert_eq!(field.mod_inverse(&BigInt::from(4)), Err(FieldError::NoInverse));
    }

    #[test]
    fn horner_evaluation() {
        let field = small_field();
        // 3 + 2x + 5x^2 at x = 2.
        let coeffs = vec![BigInt::from(3), BigInt::from(2), BigInt::from(5)];
        assert_eq!(
            field.evaluate_polynomial(&coeffs, &BigInt::from(2)),
            BigInt::from(27)
        );
    }

    #[test]
    fn horner_reduces_under_modulus() {
        let field = small_field();
        let coeffs = vec![BigInt::from(1612), BigInt::from(1612)];
        // 1612 + 1612 * 2 = 4836 = 3 * 1612, and 4836 mod 1613 = 1610.
        assert_eq!(
            field.evaluate_polynomial(&coeffs, &BigInt::from(2)),
            BigInt::from(1610)
        );
    }

    #[test]
    fn random_elements_stay_in_range() {
        let field = small_field();
        let mut rng = ChaCha20Rng::from_seed([0x90; 32]);
        for _ in 0..100 {
            let element = field.random_element(&mut rng);
            assert!(element >= BigInt::from(0) && element < *field.prime());
        }
    }
}
