
use crate::curve::{Curve, VettedCurve};
use crate::error::JpakeError;
use crate::keys::{PrivateScalar, PublicPoint};

use zeroize::{Zeroize, ZeroizeOnDrop};

/// The raw shared point `K`. Feed it to a KDF and drop it.
pub struct SharedSecret<P: VettedCurve>(PublicPoint<P>);

impl<P: VettedCurve> SharedSecret<P> {
    /// `K = x2 * (X6 - x2s * X4)`
    ///
    /// `their_combined_public_key` is the peer's round two key `X6`, already
    /// checked against `G_peer`, and `their_public_key2` is the peer's round
    /// one key `X4` whose scalar the peer bound to the password.
    pub fn compute(
        curve: &Curve<P>,
        my_combined_private_key: &PrivateScalar<P>,
        my_private_key2: &PrivateScalar<P>,
        their_combined_public_key: &PublicPoint<P>,
        their_public_key2: &PublicPoint<P>,
    ) -> Result<Self, JpakeError> {
        curve.validate_point(their_combined_public_key.as_affine())?;
        curve.validate_point(their_public_key2.as_affine())?;

        let blinding = curve.scalar_mult(
            my_combined_private_key.expose(),
            their_public_key2.as_affine(),
        );
        let unblinded = curve.point_sub(their_combined_public_key.as_affine(), &blinding);
        let shared = curve.scalar_mult(my_private_key2.expose(), &unblinded);

        if shared.infinity {
            return Err(JpakeError::SharedSecretAtInfinity);
        }

        Ok(Self(shared.into()))
    }

    /// The 65 byte (for `L = 32`) uncompressed encoding.
    pub fn to_octets(&self) -> Vec<u8> {
        self.0.to_octets()
    }

    pub fn as_point(&self) -> &PublicPoint<P> {
        &self.0
    }
}

impl<P: VettedCurve> Zeroize for SharedSecret<P> {
    fn zeroize(&mut self) {
        self.0 .0.x.zeroize();
        self.0 .0.y.zeroize();
    }
}

impl<P: VettedCurve> Drop for SharedSecret<P> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<P: VettedCurve> ZeroizeOnDrop for SharedSecret<P> {}

impl<P: VettedCurve> PartialEq for SharedSecret<P> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<P: VettedCurve> Eq for SharedSecret<P> {}

impl<P: VettedCurve> ark_std::fmt::Debug for SharedSecret<P> {
    fn fmt(&self, f: &mut ark_std::fmt::Formatter<'_>) -> ark_std::fmt::Result {
        f.write_str("SharedSecret(<redacted>)")
    }
}
