
use crate::curve::{Curve, VettedCurve};
use crate::error::JpakeError;
use crate::keys::{PrivateScalar, PublicPoint};

use ark_std::rand::{CryptoRng, RngCore};

/// Round one key material of one peer: two key pairs and two blinding pairs,
/// all over the default generator.
pub struct RoundOneKeys<P: VettedCurve> {
    pub private_key1: PrivateScalar<P>,
    pub private_key2: PrivateScalar<P>,
    pub private_v1: PrivateScalar<P>,
    pub private_v2: PrivateScalar<P>,
    pub public_key1: PublicPoint<P>,
    pub public_key2: PublicPoint<P>,
    pub public_v1: PublicPoint<P>,
    pub public_v2: PublicPoint<P>,
}

impl<P: VettedCurve> RoundOneKeys<P> {
    /// Draws `x1, x2, v1, v2` from `rng` and derives `X1, X2, V1, V2`.
    pub fn generate<R: RngCore + CryptoRng>(
        curve: &Curve<P>,
        rng: &mut R,
    ) -> Result<Self, JpakeError> {
        let private_key1 = PrivateScalar::random(rng)?;
        let private_key2 = PrivateScalar::random(rng)?;
        let private_v1 = PrivateScalar::random(rng)?;
        let private_v2 = PrivateScalar::random(rng)?;

        Ok(Self::from_scalars(
            curve,
            private_key1,
            private_key2,
            private_v1,
            private_v2,
        ))
    }

    /// Builds round one keys from caller supplied octet string scalars.
    ///
    /// Each key must be `L` bytes and lie in `[1, n - 1]`; a bad `x` is
    /// reported as [`JpakeError::InvalidPrivateKey`] and a bad `v` as
    /// [`JpakeError::InvalidPrivateV`].
    pub fn from_octets(
        curve: &Curve<P>,
        private_key1: &[u8],
        private_key2: &[u8],
        private_v1: &[u8],
        private_v2: &[u8],
    ) -> Result<Self, JpakeError> {
        Ok(Self::from_scalars(
            curve,
            PrivateScalar::from_octets(curve, private_key1)?,
            PrivateScalar::from_octets(curve, private_key2)?,
            PrivateScalar::v_from_octets(curve, private_v1)?,
            PrivateScalar::v_from_octets(curve, private_v2)?,
        ))
    }

    fn from_scalars(
        curve: &Curve<P>,
        private_key1: PrivateScalar<P>,
        private_key2: PrivateScalar<P>,
        private_v1: PrivateScalar<P>,
        private_v2: PrivateScalar<P>,
    ) -> Self {
        Self {
            public_key1: curve.base_mult(&private_key1).into(),
            public_key2: curve.base_mult(&private_key2).into(),
            public_v1: curve.base_mult(&private_v1).into(),
            public_v2: curve.base_mult(&private_v2).into(),
            private_key1,
            private_key2,
            private_v1,
            private_v2,
        }
    }
}
