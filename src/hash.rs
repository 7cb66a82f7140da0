//! Universal hash compaction.
//!
//! Instead of hiding the secret bytes directly, the compacted scheme splits
//! a pre-image `x*` of the secret under a public random linear hash
//! `H: F_p^k -> F_p^l` (an l-by-k matrix of uniform field elements, `l` the
//! secret length, `k = max(t, security floor)`). Shares then carry `k`
//! pre-image coordinates instead of `l` secret positions, and the hash
//! function carries the rest of the structure. The hash artifact is drawn
//! fresh per split and is not re-derivable from the shares, so it must
//! travel with them.

use num_bigint::BigInt;
use num_traits::Zero;
use rand::{CryptoRng, Rng};

use crate::error::{DimensionMismatch, FieldError, HashedSplitError};
use crate::field::Field;

/// A random `F_p`-linear hash function, represented as an l-by-k matrix.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HashFunction {
    matrix: Vec<Vec<BigInt>>,
    rows: usize,
    cols: usize,
    prime: BigInt,
}

impl HashFunction {
    /// Samples an l-by-k matrix of independent uniform field elements.
    pub(crate) fn random<R: Rng + CryptoRng>(
        rows: usize,
        cols: usize,
        field: &Field,
        rng: &mut R,
    ) -> Self {
        let matrix = (0..rows)
            .map(|_| (0..cols).map(|_| field.random_element(rng)).collect())
            .collect();
        Self {
            matrix,
            rows,
            cols,
            prime: field.prime().clone(),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_matrix(matrix: Vec<Vec<BigInt>>, rows: usize, cols: usize, field: &Field) -> Self {
        Self {
            matrix,
            rows,
            cols,
            prime: field.prime().clone(),
        }
    }

    /// Output dimension `l` (the secret length the hash was built for).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Input dimension `k` (the pre-image length carried by each share).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Computes `matrix * input (mod p)` in O(k * l) multiplications.
    ///
    /// Fails when the input does not have exactly `k` coordinates.
    pub fn hash(&self, input: &[BigInt]) -> Result<Vec<BigInt>, DimensionMismatch> {
        if input.len() != self.cols {
            return Err(DimensionMismatch {
                expected: self.cols,
                actual: input.len(),
            });
        }
        Ok(self.apply(input))
    }

    // Dimension-checked by the caller.
    fn apply(&self, input: &[BigInt]) -> Vec<BigInt> {
        self.matrix
            .iter()
            .map(|row| {
                row.iter()
                    .zip(input)
                    .fold(BigInt::zero(), |acc, (m, x)| (acc + m * x) % &self.prime)
            })
            .collect()
    }
}

// Finds some `x*` with `H(x*) = target`: sample a uniform candidate `x`,
// compute the residual `delta = target - H(x)`, solve `M * adj = delta`, and
// return `x + adj`. The uniform candidate carries the randomness; the
// adjustment is deterministic given the candidate and the matrix.
pub(crate) fn find_preimage<R: Rng + CryptoRng>(
    target: &[BigInt],
    hash: &HashFunction,
    field: &Field,
    rng: &mut R,
) -> Result<Vec<BigInt>, HashedSplitError> {
    let candidate: Vec<BigInt> = (0..hash.cols()).map(|_| field.random_element(rng)).collect();
    let image = hash.apply(&candidate);

    let residual: Vec<BigInt> = target
        .iter()
        .zip(&image)
        .map(|(t, h)| field.normalize(t - h))
        .collect();

    let adjustment =
        solve(&hash.matrix, &residual, hash.cols(), field)?.ok_or(HashedSplitError::PreimageSolve)?;

    Ok(candidate
        .iter()
        .zip(&adjustment)
        .map(|(x, adj)| field.normalize(x + adj))
        .collect())
}

// Gauss-Jordan elimination over F_p. Returns `Ok(None)` when the system is
// inconsistent; free variables are set to zero. In a prime field every
// non-zero pivot is invertible, so `FieldError` only surfaces for composite
// moduli.
fn solve(
    matrix: &[Vec<BigInt>],
    rhs: &[BigInt],
    cols: usize,
    field: &Field,
) -> Result<Option<Vec<BigInt>>, FieldError> {
    let rows = matrix.len();

    let mut a: Vec<Vec<BigInt>> = matrix
        .iter()
        .map(|row| row.iter().map(|v| field.normalize(v.clone())).collect())
        .collect();
    let mut b: Vec<BigInt> = rhs.iter().map(|v| field.normalize(v.clone())).collect();

    let mut pivot_cols = Vec::new();
    let mut pivot_row = 0;

    for col in 0..cols {
        if pivot_row == rows {
            break;
        }
        let found = match (pivot_row..rows).find(|&row| !a[row][col].is_zero()) {
            Some(row) => row,
            None => continue,
        };
        a.swap(pivot_row, found);
        b.swap(pivot_row, found);

        let inverse = field.mod_inverse(&a[pivot_row][col])?;
        for c in col..cols {
            let scaled = field.normalize(&a[pivot_row][c] * &inverse);
            a[pivot_row][c] = scaled;
        }
        let scaled = field.normalize(&b[pivot_row] * &inverse);
        b[pivot_row] = scaled;

        for row in 0..rows {
            if row == pivot_row || a[row][col].is_zero() {
                continue;
            }
            let factor = a[row][col].clone();
            for c in col..cols {
                let delta = &factor * &a[pivot_row][c];
                let updated = field.normalize(&a[row][c] - delta);
                a[row][c] = updated;
            }
            let delta = &factor * &b[pivot_row];
            let updated = field.normalize(&b[row] - delta);
            b[row] = updated;
        }

        pivot_cols.push(col);
        pivot_row += 1;
    }

    // Rows eliminated to zero must have a zero right-hand side.
    for row in pivot_row..rows {
        if !b[row].is_zero() {
            return Ok(None);
        }
    }

    let mut solution = vec![BigInt::zero(); cols];
    for (row, &col) in pivot_cols.iter().enumerate() {
        solution[col] = b[row].clone();
    }
    Ok(Some(solution))
}

#[cfg(test)]
mod tests {
    use super::{find_preimage, solve, HashFunction};
    use crate::error::{DimensionMismatch, HashedSplitError};
    use crate::field::Field;
    use num_bigint::BigInt;
    use rand_chacha::{rand_core::SeedableRng, ChaCha20Rng};

    fn small_field() -> Field {
        Field::new(BigInt::from(1613)).unwrap()
    }

    fn rows(values: &[&[i64]]) -> Vec<Vec<BigInt>> {
        values
            .iter()
            .map(|row| row.iter().map(|&v| BigInt::from(v)).collect())
            .collect()
    }

    #[test]
    fn hash_is_matrix_vector_product() {
        let field = small_field();
        let hash = HashFunction::from_matrix(rows(&[&[1, 2], &[3, 4]]), 2, 2, &field);
        let out = hash.hash(&[BigInt::from(5), BigInt::from(6)]).unwrap();
        assert_eq!(out, vec![BigInt::from(17), BigInt::from(39)]);
    }

    #[test]
    fn hash_rejects_wrong_input_dimension() {
        let field = small_field();
        let hash = HashFunction::from_matrix(rows(&[&[1, 2], &[3, 4]]), 2, 2, &field);
        assert_eq!(
            hash.hash(&[BigInt::from(5)]),
            Err(DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn solve_square_system() {
        let field = small_field();
        let solution = solve(
            &rows(&[&[1, 1], &[0, 1]]),
            &[BigInt::from(5), BigInt::from(3)],
            2,
            &field,
        )
        .unwrap()
        .unwrap();
        assert_eq!(solution, vec![BigInt::from(2), BigInt::from(3)]);
    }

    #[test]
    fn solve_underdetermined_system_zeroes_free_variables() {
        let field = small_field();
        let matrix = rows(&[&[2, 0, 1], &[0, 1, 7]]);
        let rhs = [BigInt::from(10), BigInt::from(4)];
        let solution = solve(&matrix, &rhs, 3, &field).unwrap().unwrap();
        assert_eq!(
            solution,
            vec![BigInt::from(5), BigInt::from(4), BigInt::from(0)]
        );
    }

    #[test]
    fn solve_detects_inconsistency() {
        let field = small_field();
        let matrix = rows(&[&[1, 0], &[0, 1], &[1, 1]]);
        let rhs = [BigInt::from(1), BigInt::from(2), BigInt::from(5)];
        assert_eq!(solve(&matrix, &rhs, 2, &field).unwrap(), None);
    }

    #[test]
    fn preimage_hits_the_target() {
        let field = Field::secp256k1();
        let mut rng = ChaCha20Rng::from_seed([0x07; 32]);
        let hash = HashFunction::random(2, 4, &field, &mut rng);
        let target = vec![BigInt::from(65), BigInt::from(200)];

        let preimage = find_preimage(&target, &hash, &field, &mut rng).unwrap();
        assert_eq!(preimage.len(), 4);
        assert_eq!(hash.hash(&preimage).unwrap(), target);
    }

    #[test]
    fn preimage_fails_on_unreachable_target() {
        // Rows are dependent: row3 = row1 + row2, but the target breaks the
        // same relation, so no pre-image exists for any candidate.
        let field = small_field();
        let hash = HashFunction::from_matrix(rows(&[&[1, 0], &[0, 1], &[1, 1]]), 3, 2, &field);
        let target = vec![BigInt::from(0), BigInt::from(0), BigInt::from(1)];

        let mut rng = ChaCha20Rng::from_seed([0x07; 32]);
        let result = find_preimage(&target, &hash, &field, &mut rng);
        assert!(matches!(result, Err(HashedSplitError::PreimageSolve)));
    }
}
