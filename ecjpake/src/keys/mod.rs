//! Typed key material and its octet string encoding.
//!
//! ```text
//! public_key     := 0x04 || X (big-endian, L bytes) || Y (big-endian, L bytes)
//! private_scalar := big-endian integer, L bytes
//! ```

pub mod store;

use crate::curve::{field_from_bytes_be, field_to_bytes_be, Curve, VettedCurve};
use crate::error::JpakeError;

use ark_ec::short_weierstrass::Affine;
use ark_ff::PrimeField;
use ark_std::rand::{CryptoRng, RngCore};
use ark_std::Zero;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Octet string format tag of an uncompressed point.
pub const UNCOMPRESSED_TAG: u8 = 0x04;

/// Upper bound on rejection sampling rounds before the source is declared broken.
const MAX_SAMPLING_ATTEMPTS: usize = 128;

/// A private scalar in `[1, n - 1]`. Zeroized when dropped.
pub struct PrivateScalar<P: VettedCurve>(P::ScalarField);

impl<P: VettedCurve> PrivateScalar<P> {
    /// Draws a scalar uniformly from `[1, n - 1]` by rejection sampling.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self, JpakeError> {
        let length = scalar_byte_length::<P>();
        let excess_bits = length * 8 - P::ScalarField::MODULUS_BIT_SIZE as usize;
        let mut buffer = Zeroizing::new(vec![0u8; length]);

        for _ in 0..MAX_SAMPLING_ATTEMPTS {
            rng.try_fill_bytes(&mut buffer[..])
                .map_err(|e| JpakeError::RandomnessFailure(e.to_string()))?;
            buffer[0] &= 0xff >> excess_bits;

            if let Some(candidate) = field_from_bytes_be::<P::ScalarField>(&buffer[..]) {
                if !candidate.is_zero() {
                    return Ok(Self(candidate));
                }
            }
        }

        Err(JpakeError::RandomnessFailure(format!(
            "no scalar in range after {} attempts",
            MAX_SAMPLING_ATTEMPTS
        )))
    }

    /// Decodes an `L` byte big-endian private key.
    pub fn from_octets(curve: &Curve<P>, bytes: &[u8]) -> Result<Self, JpakeError> {
        if bytes.len() != curve.length() {
            return Err(JpakeError::InvalidLength {
                expected: curve.length(),
                actual: bytes.len(),
            });
        }

        field_from_bytes_be::<P::ScalarField>(bytes)
            .ok_or(JpakeError::InvalidPrivateKey)
            .and_then(Self::from_field)
    }

    /// Same as [`Self::from_octets`], reporting range failures as a bad `v`.
    pub fn v_from_octets(curve: &Curve<P>, bytes: &[u8]) -> Result<Self, JpakeError> {
        Self::from_octets(curve, bytes).map_err(|e| match e {
            JpakeError::InvalidPrivateKey => JpakeError::InvalidPrivateV,
            other => other,
        })
    }

    pub(crate) fn from_field(scalar: P::ScalarField) -> Result<Self, JpakeError> {
        if scalar.is_zero() {
            return Err(JpakeError::InvalidPrivateKey);
        }

        Ok(Self(scalar))
    }

    pub fn to_octets(&self, curve: &Curve<P>) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(field_to_bytes_be(&self.0, curve.length()))
    }

    pub(crate) fn expose(&self) -> &P::ScalarField {
        &self.0
    }
}

impl<P: VettedCurve> Zeroize for PrivateScalar<P> {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<P: VettedCurve> Drop for PrivateScalar<P> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<P: VettedCurve> ZeroizeOnDrop for PrivateScalar<P> {}

impl<P: VettedCurve> ark_std::fmt::Debug for PrivateScalar<P> {
    fn fmt(&self, f: &mut ark_std::fmt::Formatter<'_>) -> ark_std::fmt::Result {
        f.write_str("PrivateScalar(<redacted>)")
    }
}

/// Password-derived scalar shared out of band. Zeroized when dropped.
///
/// It is allowed to be zero here; a zero secret is caught when the combined
/// private key is formed in round two.
pub struct PreSharedSecret<P: VettedCurve>(P::ScalarField);

impl<P: VettedCurve> PreSharedSecret<P> {
    /// Interprets up to `L` bytes of keying material as a big-endian integer
    /// reduced modulo `n`.
    pub fn from_octets(curve: &Curve<P>, bytes: &[u8]) -> Result<Self, JpakeError> {
        if bytes.len() > curve.length() {
            return Err(JpakeError::InvalidLength {
                expected: curve.length(),
                actual: bytes.len(),
            });
        }

        Ok(Self(P::ScalarField::from_be_bytes_mod_order(bytes)))
    }

    pub(crate) fn expose(&self) -> &P::ScalarField {
        &self.0
    }
}

impl<P: VettedCurve> Zeroize for PreSharedSecret<P> {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<P: VettedCurve> Drop for PreSharedSecret<P> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<P: VettedCurve> ZeroizeOnDrop for PreSharedSecret<P> {}

impl<P: VettedCurve> ark_std::fmt::Debug for PreSharedSecret<P> {
    fn fmt(&self, f: &mut ark_std::fmt::Formatter<'_>) -> ark_std::fmt::Result {
        f.write_str("PreSharedSecret(<redacted>)")
    }
}

/// An affine curve point as exchanged with the peer.
///
/// Points decoded with [`PublicPoint::from_octets`] are fully validated. Points
/// built with `From<Affine<P>>` are not; every operation that consumes a peer
/// point validates it again before use.
pub struct PublicPoint<P: VettedCurve>(pub(crate) Affine<P>);

impl<P: VettedCurve> PublicPoint<P> {
    pub fn from_octets(curve: &Curve<P>, bytes: &[u8]) -> Result<Self, JpakeError> {
        if bytes.len() != curve.public_key_length() {
            return Err(JpakeError::InvalidLength {
                expected: curve.public_key_length(),
                actual: bytes.len(),
            });
        }

        if bytes[0] != UNCOMPRESSED_TAG {
            return Err(JpakeError::InvalidPublicKey(format!(
                "unsupported format tag {:#04x}",
                bytes[0]
            )));
        }

        let (x_bytes, y_bytes) = bytes[1..].split_at(curve.length());

        if x_bytes.iter().chain(y_bytes).all(|b| *b == 0) {
            return Err(JpakeError::PointAtInfinity);
        }

        let x = P::coordinate_from_bytes(x_bytes).ok_or(JpakeError::PublicKeyLargerThanPrime)?;
        let y = P::coordinate_from_bytes(y_bytes).ok_or(JpakeError::PublicKeyLargerThanPrime)?;

        let point = Affine::new_unchecked(x, y);
        curve.validate_point(&point)?;

        Ok(Self(point))
    }

    /// `0x04 || X || Y`. The point at infinity is written with zeroed coordinates.
    pub fn to_octets(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(2 * P::LENGTH + 1);
        out.push(UNCOMPRESSED_TAG);

        if self.0.infinity {
            out.resize(2 * P::LENGTH + 1, 0);
        } else {
            out.extend(P::coordinate_to_bytes(&self.0.x));
            out.extend(P::coordinate_to_bytes(&self.0.y));
        }

        out
    }

    pub fn as_affine(&self) -> &Affine<P> {
        &self.0
    }
}

impl<P: VettedCurve> From<Affine<P>> for PublicPoint<P> {
    fn from(point: Affine<P>) -> Self {
        Self(point)
    }
}

impl<P: VettedCurve> Clone for PublicPoint<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: VettedCurve> Copy for PublicPoint<P> {}

impl<P: VettedCurve> PartialEq for PublicPoint<P> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<P: VettedCurve> Eq for PublicPoint<P> {}

impl<P: VettedCurve> ark_std::fmt::Debug for PublicPoint<P> {
    fn fmt(&self, f: &mut ark_std::fmt::Formatter<'_>) -> ark_std::fmt::Result {
        f.write_str("PublicPoint(")?;
        for byte in self.to_octets() {
            write!(f, "{:02x}", byte)?;
        }
        f.write_str(")")
    }
}

/// Number of bytes needed to hold a value below the group order.
fn scalar_byte_length<P: VettedCurve>() -> usize {
    (P::ScalarField::MODULUS_BIT_SIZE as usize + 7) / 8
}
