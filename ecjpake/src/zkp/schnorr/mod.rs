pub mod proof;
pub mod prover;

use super::{Challenge, Response, ZkpSignature};
use crate::curve::{Curve, VettedCurve};
use crate::error::JpakeError;
use crate::keys::{PrivateScalar, PublicPoint};

use ark_std::marker::PhantomData;

/// Schnorr proof of knowledge of `x` such that `X = x * G`, for a caller
/// chosen generator `G`.
pub struct SchnorrIdentification<P: VettedCurve> {
    _group: PhantomData<P>,
}

/// The generator the proof is made against.
pub type Parameters<P> = PublicPoint<P>;

pub type Statement<P> = PublicPoint<P>;

pub type Witness<P> = PrivateScalar<P>;

impl<P: VettedCurve> SchnorrIdentification<P> {
    pub const PROTOCOL_NAME: &'static str = "Schnorr Identification";

    /// Computes `r` for a commitment `V = v * G` the caller already published.
    pub fn prove(
        witness: &Witness<P>,
        nonce: PrivateScalar<P>,
        challenge: &Challenge<P>,
    ) -> Response<P> {
        prover::Prover::create_response(witness, nonce, challenge)
    }

    pub fn verify(
        curve: &Curve<P>,
        parameters: &Parameters<P>,
        statement: &Statement<P>,
        proof: &ZkpSignature<P>,
        challenge: &Challenge<P>,
    ) -> Result<(), JpakeError> {
        proof.verify(curve, parameters, statement, challenge)
    }
}
