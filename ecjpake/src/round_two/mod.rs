mod test;

use crate::curve::{Curve, VettedCurve};
use crate::error::JpakeError;
use crate::keys::{PreSharedSecret, PrivateScalar, PublicPoint};

use ark_std::rand::{CryptoRng, RngCore};

/// Everything round two needs from round one, borrowed from the caller.
pub struct RoundTwoInputs<'a, P: VettedCurve> {
    /// `x2`
    pub my_private_key2: &'a PrivateScalar<P>,
    /// `X1`
    pub my_public_key1: &'a PublicPoint<P>,
    /// `X2`
    pub my_public_key2: &'a PublicPoint<P>,
    /// `X3`, already verified through its round one proof.
    pub their_public_key1: &'a PublicPoint<P>,
    /// `X4`, already verified through its round one proof.
    pub their_public_key2: &'a PublicPoint<P>,
    pub pre_shared_secret: &'a PreSharedSecret<P>,
}

pub struct RoundTwoKeys<P: VettedCurve> {
    /// `G' = X1 + X3 + X4`, the generator of our round two proof.
    pub my_generator: PublicPoint<P>,
    /// `G_peer = X1 + X2 + X3`, the generator the peer proves against.
    pub their_generator: PublicPoint<P>,
    /// `x2s = x2 * s mod n`
    pub combined_private_key: PrivateScalar<P>,
    /// `X2s = x2s * G'`
    pub combined_public_key: PublicPoint<P>,
    /// One-time `v3` for the round two proof.
    pub private_v: PrivateScalar<P>,
    /// `V3 = v3 * G'`
    pub public_v: PublicPoint<P>,
}

impl<P: VettedCurve> RoundTwoKeys<P> {
    pub fn generate<R: RngCore + CryptoRng>(
        curve: &Curve<P>,
        inputs: &RoundTwoInputs<'_, P>,
        rng: &mut R,
    ) -> Result<Self, JpakeError> {
        let private_v = PrivateScalar::random(rng)?;
        Self::generate_with_v(curve, inputs, private_v)
    }

    /// Same as [`Self::generate`] with a caller supplied one-time `v3`.
    pub fn generate_with_v(
        curve: &Curve<P>,
        inputs: &RoundTwoInputs<'_, P>,
        private_v: PrivateScalar<P>,
    ) -> Result<Self, JpakeError> {
        for point in [
            inputs.my_public_key1,
            inputs.my_public_key2,
            inputs.their_public_key1,
            inputs.their_public_key2,
        ] {
            curve.validate_point(point.as_affine())?;
        }

        let x1 = inputs.my_public_key1.as_affine();
        let x2 = inputs.my_public_key2.as_affine();
        let x3 = inputs.their_public_key1.as_affine();
        let x4 = inputs.their_public_key2.as_affine();

        let my_generator = curve.point_add(&curve.point_add(x1, x3), x4);
        curve.validate_point(&my_generator)?;

        let their_generator = curve.point_add(&curve.point_add(x1, x2), x3);
        curve.validate_point(&their_generator)?;

        let combined_private_key = PrivateScalar::from_field(
            *inputs.my_private_key2.expose() * inputs.pre_shared_secret.expose(),
        )?;
        let combined_public_key = curve.scalar_mult(combined_private_key.expose(), &my_generator);
        let public_v = curve.scalar_mult(private_v.expose(), &my_generator);

        Ok(Self {
            my_generator: my_generator.into(),
            their_generator: their_generator.into(),
            combined_private_key,
            combined_public_key: combined_public_key.into(),
            private_v,
            public_v: public_v.into(),
        })
    }
}
