use super::{Parameters, SchnorrIdentification, Statement};
use crate::curve::{Curve, VettedCurve};
use crate::error::JpakeError;
use crate::zkp::{Challenge, ZkpSignature};

impl<P: VettedCurve> ZkpSignature<P> {
    /// Accepts iff `V == r * G + h * X`.
    ///
    /// `X` and `V` are validated first so that a malformed peer is reported
    /// with a point error rather than a failed proof.
    pub fn verify(
        &self,
        curve: &Curve<P>,
        pp: &Parameters<P>,
        statement: &Statement<P>,
        challenge: &Challenge<P>,
    ) -> Result<(), JpakeError> {
        curve.validate_point(statement.as_affine())?;
        curve.validate_point(self.commitment.as_affine())?;
        curve.validate_point(pp.as_affine())?;

        let r_g = curve.scalar_mult(&self.response.0, pp.as_affine());
        let h_x = curve.scalar_mult(&challenge.0, statement.as_affine());

        if curve.point_add(&r_g, &h_x) != *self.commitment.as_affine() {
            return Err(JpakeError::ProofVerificationError(String::from(
                SchnorrIdentification::<P>::PROTOCOL_NAME,
            )));
        }

        Ok(())
    }
}
