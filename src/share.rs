use num_bigint::{BigInt, Sign};

use crate::error::ShareFormatError;

/// Serialized size of one field coordinate: a 256-bit big-endian word.
///
/// The wire format therefore covers moduli up to 256 bits, which includes
/// the default field.
pub const COORDINATE_BYTES: usize = 32;

/// A single polynomial evaluation `(x, y)` for one position of the secret.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Point {
    /// The evaluation abscissa identifying the share holder.
    pub x: BigInt,
    /// The polynomial value at `x`.
    pub y: BigInt,
}

/// One share of a split secret.
///
/// A share holds one y value per secret position, all evaluated at the same
/// x-coordinate; the x is carried explicitly so any subset of shares can be
/// interpolated regardless of ordering. A share is meaningless in isolation
/// and must stay associated with the `(n, t, p)` parameters it was produced
/// under.
///
/// Usage example:
/// ```
/// use rampshare::{SecretSharing, Share};
/// use core::convert::TryFrom;
/// # fn send_to_printer(_: Vec<u8>) {}
///
/// let sss = SecretSharing::default();
/// let shares = sss.split(&[1, 2, 3], 5, 3).unwrap();
///
/// // Print paper keys.
/// for s in &shares {
///     send_to_printer(Vec::try_from(s).unwrap());
/// }
///
/// // Later: parse the paper keys back and recover.
/// let bytes: Vec<Vec<u8>> = shares
///     .iter()
///     .map(|s| Vec::try_from(s).unwrap())
///     .collect();
/// let parsed: Vec<Share> = bytes
///     .iter()
///     .map(|b| Share::try_from(b.as_slice()).unwrap())
///     .collect();
/// let secret = sss.reconstruct(&parsed[..3]).unwrap();
/// assert_eq!(secret, vec![1, 2, 3]);
/// ```
///
/// # Serialization format
/// `x` followed by each `y`, every coordinate as a 32-byte big-endian word.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Share {
    /// The x-coordinate shared by every point of this share.
    pub x: BigInt,
    /// The y coordinates, one per secret position.
    pub y: Vec<BigInt>,
}

impl Share {
    /// Number of secret positions this share covers.
    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// Whether the share carries no y values (split of an empty secret).
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Views the share as its point sequence, one point per secret position.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.y.iter().map(move |y| Point {
            x: self.x.clone(),
            y: y.clone(),
        })
    }
}

fn push_coordinate(bytes: &mut Vec<u8>, value: &BigInt) -> Result<(), ShareFormatError> {
    let (_, raw) = value.to_bytes_be();
    if raw.len() > COORDINATE_BYTES {
        return Err(ShareFormatError::CoordinateTooWide { bits: value.bits() });
    }
    let mut word = [0u8; COORDINATE_BYTES];
    word[COORDINATE_BYTES - raw.len()..].copy_from_slice(&raw);
    bytes.extend_from_slice(&word);
    Ok(())
}

/// Converts a share to bytes: the x word followed by the y words.
///
/// Fails with [`ShareFormatError::CoordinateTooWide`] when a coordinate does
/// not fit the fixed word, i.e. the share came from a field beyond 256 bits
/// or was built by hand. Truncating such a coordinate would parse back into
/// a different share, so the conversion refuses instead.
impl core::convert::TryFrom<&Share> for Vec<u8> {
    type Error = ShareFormatError;

    fn try_from(share: &Share) -> Result<Vec<u8>, Self::Error> {
        let mut bytes = Vec::with_capacity((share.y.len() + 1) * COORDINATE_BYTES);
        push_coordinate(&mut bytes, &share.x)?;
        for y in &share.y {
            push_coordinate(&mut bytes, y)?;
        }
        Ok(bytes)
    }
}

impl core::convert::TryFrom<&[u8]> for Share {
    type Error = ShareFormatError;

    fn try_from(bytes: &[u8]) -> Result<Share, Self::Error> {
        if bytes.len() < 2 * COORDINATE_BYTES || bytes.len() % COORDINATE_BYTES != 0 {
            return Err(ShareFormatError::BadLength {
                word: COORDINATE_BYTES,
                min: 2 * COORDINATE_BYTES,
                length: bytes.len(),
            });
        }
        let mut coordinates: Vec<BigInt> = bytes
            .chunks_exact(COORDINATE_BYTES)
            .map(|word| BigInt::from_bytes_be(Sign::Plus, word))
            .collect();
        let x = coordinates.remove(0);
        Ok(Share { x, y: coordinates })
    }
}
