//! Threshold secret sharing over a large prime field, with an optional
//! universal-hash compaction extension.
//!
//! A secret byte string is split into `n` shares such that any `t` of them
//! reconstruct it exactly, via one random degree-(t-1) polynomial per byte
//! and Lagrange interpolation at zero. All arithmetic is arbitrary-precision
//! over a ~2^256 prime (the secp256k1 base field by default), and all
//! randomness comes from a cryptographically secure generator.
//!
//! # Usage
//!
//! ```
//! use rampshare::SecretSharing;
//!
//! let sss = SecretSharing::default();
//! // Split into 7 shares, any 4 of which recover the secret.
//! let shares = sss.split(b"QuesoManchego", 7, 4).unwrap();
//! let secret = sss.reconstruct(&shares[..4]).unwrap();
//! assert_eq!(secret, b"QuesoManchego");
//! ```
//!
//! With an explicit (seeded) generator:
//!
//! ```
//! use rampshare::SecretSharing;
//! use rand_chacha::{rand_core::SeedableRng, ChaCha20Rng};
//!
//! let sss = SecretSharing::default();
//! let mut rng = ChaCha20Rng::from_seed([0x90; 32]);
//! let shares = sss.split_rng(&[1, 2, 3, 4], 5, 3, &mut rng).unwrap();
//! let secret = sss.reconstruct(&shares[2..5]).unwrap();
//! assert_eq!(secret, vec![1, 2, 3, 4]);
//! ```
//!
//! # Compacted shares
//!
//! [`HashedSecretSharing`] splits a pre-image of the secret under a public
//! random linear hash instead of the secret itself. The hash artifact
//! returned by `split` must travel with the shares and be supplied unchanged
//! at reconstruction:
//!
//! ```
//! use rampshare::HashedSecretSharing;
//!
//! let sss = HashedSecretSharing::default();
//! let (shares, hash) = sss.split(&[1, 2, 3, 4, 5], 7, 4).unwrap();
//! let secret = sss.reconstruct(&shares[..4], &hash).unwrap();
//! assert_eq!(secret, vec![1, 2, 3, 4, 5]);
//! ```
//!
//! # Quorum is the caller's responsibility
//!
//! `reconstruct` interpolates whatever subset it is given: supplied fewer
//! than `t` shares it still succeeds and returns an arithmetically valid but
//! meaningless byte string, because under-threshold input is not detectable
//! from the shares alone. Callers own supplying at least `t` shares.

mod error;
mod field;
mod hash;
mod math;
mod share;

pub use error::{
    DimensionMismatch, FieldError, HashedReconstructError, HashedSplitError, ReconstructError,
    ShareFormatError, SplitError,
};
pub use field::Field;
pub use hash::HashFunction;
pub use share::{Point, Share, COORDINATE_BYTES};

use hashbrown::HashSet;
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use rand::{CryptoRng, Rng};

/// Common capability surface of the two scheme variants.
///
/// Harnesses that drive either variant (benchmarks, sweeps) go through this
/// interface instead of inspecting which scheme they hold. The artifact is
/// whatever must accompany the shares besides the shares themselves: nothing
/// for the plain scheme, the hash function for the compacted one.
pub trait ThresholdScheme {
    /// Extra public state produced at split time and required at
    /// reconstruction time.
    type Artifact;
    /// Splitting failure.
    type SplitError: std::error::Error;
    /// Reconstruction failure.
    type ReconstructError: std::error::Error;

    /// Splits `secret` into `n` shares with threshold `t`.
    fn split_secret(
        &self,
        secret: &[u8],
        n: usize,
        t: usize,
    ) -> Result<(Vec<Share>, Self::Artifact), Self::SplitError>;

    /// Recovers the secret from a share subset and the matching artifact.
    fn reconstruct_secret(
        &self,
        shares: &[Share],
        artifact: &Self::Artifact,
    ) -> Result<Vec<u8>, Self::ReconstructError>;
}

/// The plain byte-wise scheme.
///
/// Holds only the field; `n` and `t` are per-call parameters. Splitting the
/// same secret twice produces unrelated share sets.
#[derive(Clone, Debug)]
pub struct SecretSharing {
    field: Field,
}

impl SecretSharing {
    /// Creates an engine over the given field.
    pub fn new(field: Field) -> Self {
        Self { field }
    }

    /// The field this engine operates in.
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Splits `secret` into `n` shares, any `t` of which reconstruct it.
    ///
    /// Uses the thread-local CSPRNG; see [`SecretSharing::split_rng`] to
    /// supply a generator. Fails with [`SplitError::InvalidThreshold`] when
    /// `t < 2` or `t > n`; parameters are checked before any randomness is
    /// drawn.
    pub fn split(&self, secret: &[u8], n: usize, t: usize) -> Result<Vec<Share>, SplitError> {
        let mut rng = rand::thread_rng();
        self.split_rng(secret, n, t, &mut rng)
    }

    /// Splits `secret` using the provided cryptographically secure generator.
    pub fn split_rng<R: Rng + CryptoRng>(
        &self,
        secret: &[u8],
        n: usize,
        t: usize,
        rng: &mut R,
    ) -> Result<Vec<Share>, SplitError> {
        validate_threshold(n, t)?;
        let values = byte_elements(&self.field, secret)?;
        Ok(math::split_elements(&values, n, t, &self.field, rng))
    }

    /// Recovers the secret from a subset of shares.
    ///
    /// The subset is validated as a whole before any interpolation runs:
    /// an empty subset, shares of unequal length, or two shares with the
    /// same x-coordinate fail the entire call without producing partial
    /// output. The caller must supply at least `t` shares; fewer still
    /// reconstruct "successfully" into garbage (see the crate docs).
    pub fn reconstruct(&self, shares: &[Share]) -> Result<Vec<u8>, ReconstructError> {
        validate_subset(shares, &self.field)?;
        let values = math::interpolate_at_zero(shares, &self.field)?;
        Ok(values.iter().map(fold_to_byte).collect())
    }
}

impl Default for SecretSharing {
    fn default() -> Self {
        Self::new(Field::secp256k1())
    }
}

impl ThresholdScheme for SecretSharing {
    type Artifact = ();
    type SplitError = SplitError;
    type ReconstructError = ReconstructError;

    fn split_secret(
        &self,
        secret: &[u8],
        n: usize,
        t: usize,
    ) -> Result<(Vec<Share>, ()), SplitError> {
        Ok((self.split(secret, n, t)?, ()))
    }

    fn reconstruct_secret(
        &self,
        shares: &[Share],
        _artifact: &(),
    ) -> Result<Vec<u8>, ReconstructError> {
        self.reconstruct(shares)
    }
}

/// The compacted scheme: splits a pre-image of the secret under a public
/// random linear hash.
///
/// `split` returns the shares together with the [`HashFunction`] artifact;
/// reconstruction needs both. Shares carry `k = max(t, security_floor)`
/// pre-image coordinates instead of one value per secret byte, so their size
/// depends on the parameters rather than the secret length. The flip side is
/// that a pre-image only exists when the secret is at most `k` bytes long;
/// longer secrets fail with [`HashedSplitError::PreimageSolve`].
#[derive(Clone, Debug)]
pub struct HashedSecretSharing {
    field: Field,
    security_floor: usize,
}

impl HashedSecretSharing {
    /// Default lower bound on the pre-image dimension.
    pub const SECURITY_FLOOR: usize = 8;

    /// Creates an engine over the given field with the default floor.
    pub fn new(field: Field) -> Self {
        Self::with_security_floor(field, Self::SECURITY_FLOOR)
    }

    /// Creates an engine with an explicit pre-image dimension floor.
    ///
    /// The floor keeps the pre-image system under-determined for an
    /// adversary holding fewer than `t` shares even when `t` is small.
    pub fn with_security_floor(field: Field, security_floor: usize) -> Self {
        Self {
            field,
            security_floor,
        }
    }

    /// The field this engine operates in.
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Splits `secret` into `n` compacted shares plus the hash artifact.
    ///
    /// Uses the thread-local CSPRNG; see
    /// [`HashedSecretSharing::split_rng`] to supply a generator.
    pub fn split(
        &self,
        secret: &[u8],
        n: usize,
        t: usize,
    ) -> Result<(Vec<Share>, HashFunction), HashedSplitError> {
        let mut rng = rand::thread_rng();
        self.split_rng(secret, n, t, &mut rng)
    }

    /// Splits `secret` using the provided cryptographically secure generator.
    ///
    /// Draws a fresh l-by-k hash matrix, finds a pre-image of the secret
    /// under it via a residual linear solve, and splits the pre-image
    /// coordinates with the plain polynomial scheme.
    pub fn split_rng<R: Rng + CryptoRng>(
        &self,
        secret: &[u8],
        n: usize,
        t: usize,
        rng: &mut R,
    ) -> Result<(Vec<Share>, HashFunction), HashedSplitError> {
        validate_threshold(n, t)?;
        let target = byte_elements(&self.field, secret)?;

        let k = t.max(self.security_floor);
        let hash = HashFunction::random(secret.len(), k, &self.field, rng);
        let preimage = hash::find_preimage(&target, &hash, &self.field, rng)?;
        let shares = math::split_elements(&preimage, n, t, &self.field, rng);
        Ok((shares, hash))
    }

    /// Recovers the secret from a share subset and its hash artifact.
    ///
    /// Fails with [`HashedReconstructError::HashMismatch`] when the
    /// artifact's input dimension does not match the shares. The same
    /// quorum contract as [`SecretSharing::reconstruct`] applies: fewer
    /// than `t` shares interpolate into a garbage pre-image.
    pub fn reconstruct(
        &self,
        shares: &[Share],
        hash: &HashFunction,
    ) -> Result<Vec<u8>, HashedReconstructError> {
        validate_subset(shares, &self.field).map_err(HashedReconstructError::Reconstruct)?;
        let width = shares.first().map(|share| share.y.len()).unwrap_or(0);
        if width != hash.cols() {
            return Err(DimensionMismatch {
                expected: hash.cols(),
                actual: width,
            }
            .into());
        }

        let preimage = math::interpolate_at_zero(shares, &self.field)
            .map_err(ReconstructError::from)
            .map_err(HashedReconstructError::Reconstruct)?;
        let values = hash.hash(&preimage)?;
        Ok(values.iter().map(fold_to_byte).collect())
    }
}

impl Default for HashedSecretSharing {
    fn default() -> Self {
        Self::new(Field::secp256k1())
    }
}

impl ThresholdScheme for HashedSecretSharing {
    type Artifact = HashFunction;
    type SplitError = HashedSplitError;
    type ReconstructError = HashedReconstructError;

    fn split_secret(
        &self,
        secret: &[u8],
        n: usize,
        t: usize,
    ) -> Result<(Vec<Share>, HashFunction), HashedSplitError> {
        self.split(secret, n, t)
    }

    fn reconstruct_secret(
        &self,
        shares: &[Share],
        artifact: &HashFunction,
    ) -> Result<Vec<u8>, HashedReconstructError> {
        self.reconstruct(shares, artifact)
    }
}

fn validate_threshold(n: usize, t: usize) -> Result<(), SplitError> {
    if t < 2 || t > n {
        return Err(SplitError::InvalidThreshold { n, t });
    }
    Ok(())
}

// Lifts secret bytes into field elements. The range check is dead weight for
// any modulus above 255 but guards small custom moduli.
fn byte_elements(field: &Field, secret: &[u8]) -> Result<Vec<BigInt>, SplitError> {
    secret
        .iter()
        .enumerate()
        .map(|(position, &value)| {
            let element = BigInt::from(value);
            if element >= *field.prime() {
                return Err(SplitError::ByteOutOfRange { position, value });
            }
            Ok(element)
        })
        .collect()
}

// Structural validation of a share subset, in whole, before any arithmetic.
// X-coordinates are compared modulo p: congruent abscissas collide in the
// field even when they differ as integers.
fn validate_subset(shares: &[Share], field: &Field) -> Result<(), ReconstructError> {
    if shares.is_empty() {
        return Err(ReconstructError::EmptyShares);
    }
    let width = shares[0].y.len();
    let mut seen: HashSet<BigInt> = HashSet::with_capacity(shares.len());
    for share in shares {
        if share.y.len() != width {
            return Err(ReconstructError::MismatchedShares);
        }
        if !seen.insert(field.normalize(share.x.clone())) {
            return Err(ReconstructError::DuplicateXCoordinate);
        }
    }
    Ok(())
}

// Interpreted as a byte after the final modular reduction. Reachable values
// already sit in [0, 255] when the shares are consistent; the fold mirrors
// the defensive reduction of the scheme definition.
fn fold_to_byte(value: &BigInt) -> u8 {
    (value % 256u16).to_u8().unwrap_or(0)
}
