//! Crate errors.
//!
//! The taxonomy mirrors the failure surfaces of the scheme: parameter errors
//! are rejected before any randomness is consumed, structural errors are
//! detected before any interpolation arithmetic runs, and a reconstruction
//! either succeeds for every byte position or fails as a whole.

use thiserror::Error;

/// Field construction or arithmetic failure.
#[derive(Error, Debug, Eq, PartialEq)]
pub enum FieldError {
    /// The modulus cannot represent every byte value.
    #[error("modulus must exceed 255")]
    ModulusTooSmall,

    /// The element has no modular inverse (gcd with the modulus is not 1).
    ///
    /// Unreachable for a non-zero element under a prime modulus; surfaces
    /// only when the field was built over a composite number.
    #[error("modular inverse does not exist")]
    NoInverse,
}

/// Secret splitting failure.
#[derive(Error, Debug, Eq, PartialEq)]
pub enum SplitError {
    /// The threshold is outside `2 <= t <= n`.
    #[error("invalid threshold: require 2 <= t <= n, got t={t}, n={n}")]
    InvalidThreshold {
        /// Requested number of shares.
        n: usize,
        /// Requested threshold.
        t: usize,
    },

    /// A secret byte is not representable in the field.
    ///
    /// Cannot happen for a modulus above 255; kept as a guard for small
    /// custom moduli.
    #[error("secret byte {value} at position {position} is not a field element")]
    ByteOutOfRange {
        /// Byte offset within the secret.
        position: usize,
        /// The offending byte value.
        value: u8,
    },
}

/// Secret recovery failure.
#[derive(Error, Debug, Eq, PartialEq)]
pub enum ReconstructError {
    /// No shares were supplied.
    #[error("no shares provided")]
    EmptyShares,

    /// The supplied shares do not all have the same length.
    #[error("all shares must have the same length")]
    MismatchedShares,

    /// Two shares carry the same x-coordinate, which would make the
    /// Lagrange denominator zero.
    #[error("two shares carry the same x-coordinate")]
    DuplicateXCoordinate,

    /// Field arithmetic failed. Only reachable over a composite modulus;
    /// the duplicate x-coordinate case is caught before any arithmetic runs.
    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Hash artifact and share dimensions disagree.
#[derive(Error, Debug, Eq, PartialEq)]
#[error("dimension mismatch: hash function expects {expected} coordinates, got {actual}")]
pub struct DimensionMismatch {
    /// Dimension the hash function was built for.
    pub expected: usize,
    /// Dimension actually supplied.
    pub actual: usize,
}

/// Compacted splitting failure.
#[derive(Error, Debug, Eq, PartialEq)]
pub enum HashedSplitError {
    /// The underlying splitting step failed.
    #[error(transparent)]
    Split(#[from] SplitError),

    /// Field arithmetic failed during the linear solve.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// No pre-image of the secret exists under the sampled hash function.
    ///
    /// The residual system has rank below the secret length; in particular
    /// this is guaranteed whenever the secret is longer than the pre-image
    /// dimension.
    #[error("no pre-image found for the hash target")]
    PreimageSolve,
}

/// Compacted recovery failure.
#[derive(Error, Debug, Eq, PartialEq)]
pub enum HashedReconstructError {
    /// The underlying recovery step failed.
    #[error(transparent)]
    Reconstruct(#[from] ReconstructError),

    /// The hash artifact does not belong to these shares.
    #[error("hash artifact does not match shares: {0}")]
    HashMismatch(#[from] DimensionMismatch),
}

/// Share serialization or deserialization failure.
#[derive(Error, Debug, Eq, PartialEq)]
pub enum ShareFormatError {
    /// The byte string is not a whole number of coordinate words, or is too
    /// short to hold an x-coordinate and at least one y value.
    #[error("share bytes must be a multiple of {word} bytes and at least {min} bytes long, got {length}")]
    BadLength {
        /// Size of one serialized coordinate.
        word: usize,
        /// Minimum serialized share size.
        min: usize,
        /// Length actually supplied.
        length: usize,
    },

    /// A coordinate does not fit the fixed 256-bit serialization word.
    ///
    /// Reachable only for shares built over a field beyond 256 bits or
    /// constructed by hand; truncation would parse back into a different
    /// share, so serialization refuses instead.
    #[error("coordinate of {bits} bits does not fit the 256-bit wire word")]
    CoordinateTooWide {
        /// Width of the offending coordinate.
        bits: u64,
    },
}
