//! Thin adapter over the arkworks short Weierstrass arithmetic.
//!
//! Only curves implementing [`VettedCurve`] can be used. The trait pins the
//! byte length of field elements and gives access to the base field as a
//! prime field, which is all the octet string encoding needs.


use crate::error::JpakeError;
use crate::keys::{PrivateScalar, PublicPoint};

use ark_ec::short_weierstrass::{Affine, SWCurveConfig};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{BigInteger, PrimeField};
use ark_std::marker::PhantomData;

/// A pre-vetted curve whose domain parameters are fixed by a standard.
pub trait VettedCurve: SWCurveConfig {
    /// Name used in logs.
    const NAME: &'static str;

    /// Byte length `L` of a field element, and of an encoded private scalar.
    const LENGTH: usize;

    /// Big-endian, `LENGTH` bytes.
    fn coordinate_to_bytes(coordinate: &Self::BaseField) -> Vec<u8>;

    /// Returns `None` if the value is not strictly below the prime.
    fn coordinate_from_bytes(bytes: &[u8]) -> Option<Self::BaseField>;

    /// The prime modulus of the base field, big-endian.
    fn prime() -> Vec<u8>;
}

impl VettedCurve for ark_secp256r1::Config {
    const NAME: &'static str = "NIST P-256";
    const LENGTH: usize = 32;

    fn coordinate_to_bytes(coordinate: &ark_secp256r1::Fq) -> Vec<u8> {
        field_to_bytes_be(coordinate, Self::LENGTH)
    }

    fn coordinate_from_bytes(bytes: &[u8]) -> Option<ark_secp256r1::Fq> {
        field_from_bytes_be(bytes)
    }

    fn prime() -> Vec<u8> {
        field_modulus_be::<ark_secp256r1::Fq>(Self::LENGTH)
    }
}

/// Curve descriptor handed to every operation.
///
/// It carries no data at runtime; the domain parameters live in `P`.
pub struct Curve<P: VettedCurve> {
    _config: PhantomData<P>,
}

pub type NistP256 = Curve<ark_secp256r1::Config>;

impl<P: VettedCurve> Clone for Curve<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: VettedCurve> Copy for Curve<P> {}

impl<P: VettedCurve> Default for Curve<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: VettedCurve> ark_std::fmt::Debug for Curve<P> {
    fn fmt(&self, f: &mut ark_std::fmt::Formatter<'_>) -> ark_std::fmt::Result {
        f.debug_struct("Curve").field("name", &P::NAME).finish()
    }
}

impl<P: VettedCurve> Curve<P> {
    pub fn new() -> Self {
        Self {
            _config: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        P::NAME
    }

    /// Curve parameter length `L` in bytes.
    pub fn length(&self) -> usize {
        P::LENGTH
    }

    /// Length of an uncompressed octet string point, `2L + 1`.
    pub fn public_key_length(&self) -> usize {
        2 * P::LENGTH + 1
    }

    pub fn prime(&self) -> Vec<u8> {
        P::prime()
    }

    pub fn order(&self) -> Vec<u8> {
        field_modulus_be::<P::ScalarField>(P::LENGTH)
    }

    /// Coefficients `(a, b)` of `y^2 = x^3 + ax + b`, big-endian.
    pub fn coefficients(&self) -> (Vec<u8>, Vec<u8>) {
        (
            P::coordinate_to_bytes(&P::COEFF_A),
            P::coordinate_to_bytes(&P::COEFF_B),
        )
    }

    /// The default generator used in round one.
    pub fn generator(&self) -> PublicPoint<P> {
        PublicPoint::from(P::GENERATOR)
    }

    pub fn scalar_mult(&self, scalar: &P::ScalarField, point: &Affine<P>) -> Affine<P> {
        point.mul_bigint(scalar.into_bigint()).into_affine()
    }

    pub fn base_mult(&self, scalar: &PrivateScalar<P>) -> Affine<P> {
        self.scalar_mult(scalar.expose(), &P::GENERATOR)
    }

    pub fn point_add(&self, a: &Affine<P>, b: &Affine<P>) -> Affine<P> {
        (a.into_group() + b.into_group()).into_affine()
    }

    pub fn point_sub(&self, a: &Affine<P>, b: &Affine<P>) -> Affine<P> {
        (a.into_group() - b.into_group()).into_affine()
    }

    /// Rejects the point at infinity, points off the curve and points outside
    /// the prime order subgroup.
    ///
    /// Coordinates are held as reduced field elements, so the `< p` bound is
    /// enforced when a point is decoded, see [`PublicPoint::from_octets`].
    pub fn validate_point(&self, point: &Affine<P>) -> Result<(), JpakeError> {
        if point.infinity {
            return Err(JpakeError::PointAtInfinity);
        }

        if !point.is_on_curve() {
            return Err(JpakeError::PublicKeyNotOnCurve);
        }

        if !point.is_in_correct_subgroup_assuming_on_curve() {
            return Err(JpakeError::InvalidPublicKey(String::from(
                "point is not in the prime order subgroup",
            )));
        }

        Ok(())
    }
}

/// Big-endian encoding left padded (or trimmed of leading zeros) to `length` bytes.
pub(crate) fn field_to_bytes_be<F: PrimeField>(element: &F, length: usize) -> Vec<u8> {
    let raw = element.into_bigint().to_bytes_be();
    pad_be(&raw, length)
}

/// Parses a big-endian integer, refusing values that are not below the modulus.
pub(crate) fn field_from_bytes_be<F: PrimeField>(bytes: &[u8]) -> Option<F> {
    let modulus = F::MODULUS.to_bytes_be();
    let width = modulus.len().max(bytes.len());

    if pad_be(bytes, width) < pad_be(&modulus, width) {
        Some(F::from_be_bytes_mod_order(bytes))
    } else {
        None
    }
}

pub(crate) fn field_modulus_be<F: PrimeField>(length: usize) -> Vec<u8> {
    pad_be(&F::MODULUS.to_bytes_be(), length)
}

fn pad_be(bytes: &[u8], length: usize) -> Vec<u8> {
    if bytes.len() >= length {
        bytes[bytes.len() - length..].to_vec()
    } else {
        let mut out = vec![0u8; length - bytes.len()];
        out.extend_from_slice(bytes);
        out
    }
}
