// Splitting and reconstruction kernels shared by the plain and hashed schemes.
//
// Everything here works on field elements; byte conversion and structural
// validation live with the engines in lib.rs.

use num_bigint::BigInt;
use num_traits::{One, Zero};
use rand::{CryptoRng, Rng};

use crate::error::FieldError;
use crate::field::Field;
use crate::share::Share;

// Builds the degree-(t-1) polynomial hiding one value: `coeffs[0]` is the
// value itself, the remaining t-1 coefficients are uniform in `[0, p)`.
pub(crate) fn random_polynomial<R: Rng + CryptoRng>(
    constant: BigInt,
    threshold: usize,
    field: &Field,
    rng: &mut R,
) -> Vec<BigInt> {
    let mut coeffs = Vec::with_capacity(threshold);
    coeffs.push(constant);
    for _ in 1..threshold {
        coeffs.push(field.random_element(rng));
    }
    coeffs
}

// Splits a vector of field elements into `n` shares with threshold `t`.
// Share `j` evaluates every per-position polynomial at the fixed abscissa
// `j + 1`; the abscissas 1..=n are shared across all positions of one call
// so a share stays internally consistent.
pub(crate) fn split_elements<R: Rng + CryptoRng>(
    values: &[BigInt],
    n: usize,
    t: usize,
    field: &Field,
    rng: &mut R,
) -> Vec<Share> {
    let polys: Vec<Vec<BigInt>> = values
        .iter()
        .map(|value| random_polynomial(value.clone(), t, field, rng))
        .collect();

    (1..=n)
        .map(|j| {
            let x = BigInt::from(j);
            let y = polys
                .iter()
                .map(|poly| field.evaluate_polynomial(poly, &x))
                .collect();
            Share { x, y }
        })
        .collect()
}

// Lagrange basis evaluated at x = 0 for the given abscissas:
// `c_j = prod_{i != j} (0 - x_i) / (x_j - x_i) (mod p)`.
// The coefficients only depend on the abscissas, so one pass serves every
// position of the secret.
pub(crate) fn lagrange_coefficients(
    xs: &[BigInt],
    field: &Field,
) -> Result<Vec<BigInt>, FieldError> {
    let mut coefficients = Vec::with_capacity(xs.len());
    for (j, xj) in xs.iter().enumerate() {
        let mut numerator = BigInt::one();
        let mut denominator = BigInt::one();
        for (i, xi) in xs.iter().enumerate() {
            if i == j {
                continue;
            }
            numerator = field.normalize(numerator * (-xi));
            denominator = field.normalize(denominator * (xj - xi));
        }
        let inverse = field.mod_inverse(&denominator)?;
        coefficients.push(field.normalize(numerator * inverse));
    }
    Ok(coefficients)
}

// Recovers the constant term of every per-position polynomial from a share
// subset, returning one field element per position. The caller has already
// validated the subset (non-empty, equal widths, distinct abscissas).
pub(crate) fn interpolate_at_zero(
    shares: &[Share],
    field: &Field,
) -> Result<Vec<BigInt>, FieldError> {
    let xs: Vec<BigInt> = shares.iter().map(|share| share.x.clone()).collect();
    let coefficients = lagrange_coefficients(&xs, field)?;
    let width = shares.first().map(|share| share.y.len()).unwrap_or(0);

    let mut values = Vec::with_capacity(width);
    for position in 0..width {
        let mut acc = BigInt::zero();
        for (share, coefficient) in shares.iter().zip(&coefficients) {
            acc = field.normalize(acc + &share.y[position] * coefficient);
        }
        values.push(acc);
    }
    Ok(values)
}
