use crate::curve::{field_from_bytes_be, field_to_bytes_be, Curve, VettedCurve};
use crate::error::JpakeError;
use crate::keys::PublicPoint;

use ark_ff::PrimeField;

pub mod schnorr;
pub mod transcript;

/// The Fiat-Shamir hash `h`, reduced modulo the group order.
///
/// How the hash input is laid out is agreed between the peers out of band;
/// see [`transcript`] for two ready-made layouts.
pub struct Challenge<P: VettedCurve>(pub(crate) P::ScalarField);

impl<P: VettedCurve> Challenge<P> {
    /// Big-endian digest output of any length.
    pub fn from_digest(bytes: &[u8]) -> Self {
        Self(P::ScalarField::from_be_bytes_mod_order(bytes))
    }
}

impl<P: VettedCurve> Clone for Challenge<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: VettedCurve> Copy for Challenge<P> {}

impl<P: VettedCurve> PartialEq for Challenge<P> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<P: VettedCurve> Eq for Challenge<P> {}

impl<P: VettedCurve> ark_std::fmt::Debug for Challenge<P> {
    fn fmt(&self, f: &mut ark_std::fmt::Formatter<'_>) -> ark_std::fmt::Result {
        write!(f, "Challenge({})", self.0)
    }
}

/// The `r` half of a ZKP signature, `r = (v - h * x) mod n`.
pub struct Response<P: VettedCurve>(pub(crate) P::ScalarField);

impl<P: VettedCurve> Response<P> {
    pub fn to_octets(&self, curve: &Curve<P>) -> Vec<u8> {
        field_to_bytes_be(&self.0, curve.length())
    }

    /// Rejects encodings that are not exactly `L` bytes or not below `n`.
    pub fn from_octets(curve: &Curve<P>, bytes: &[u8]) -> Result<Self, JpakeError> {
        if bytes.len() != curve.length() {
            return Err(JpakeError::InvalidLength {
                expected: curve.length(),
                actual: bytes.len(),
            });
        }

        field_from_bytes_be::<P::ScalarField>(bytes)
            .map(Self)
            .ok_or_else(|| {
                JpakeError::ProofVerificationError(String::from(
                    schnorr::SchnorrIdentification::<P>::PROTOCOL_NAME,
                ))
            })
    }
}

impl<P: VettedCurve> Clone for Response<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: VettedCurve> Copy for Response<P> {}

impl<P: VettedCurve> PartialEq for Response<P> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<P: VettedCurve> Eq for Response<P> {}

impl<P: VettedCurve> ark_std::fmt::Debug for Response<P> {
    fn fmt(&self, f: &mut ark_std::fmt::Formatter<'_>) -> ark_std::fmt::Result {
        write!(f, "Response({})", self.0)
    }
}

/// A non-interactive Schnorr proof `(V, r)`.
pub struct ZkpSignature<P: VettedCurve> {
    pub commitment: PublicPoint<P>,
    pub response: Response<P>,
}

impl<P: VettedCurve> ZkpSignature<P> {
    pub fn new(commitment: PublicPoint<P>, response: Response<P>) -> Self {
        Self {
            commitment,
            response,
        }
    }
}

impl<P: VettedCurve> Clone for ZkpSignature<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: VettedCurve> Copy for ZkpSignature<P> {}

impl<P: VettedCurve> PartialEq for ZkpSignature<P> {
    fn eq(&self, other: &Self) -> bool {
        self.commitment == other.commitment && self.response == other.response
    }
}

impl<P: VettedCurve> Eq for ZkpSignature<P> {}

impl<P: VettedCurve> ark_std::fmt::Debug for ZkpSignature<P> {
    fn fmt(&self, f: &mut ark_std::fmt::Formatter<'_>) -> ark_std::fmt::Result {
        f.debug_struct("ZkpSignature")
            .field("commitment", &self.commitment)
            .field("response", &self.response)
            .finish()
    }
}
