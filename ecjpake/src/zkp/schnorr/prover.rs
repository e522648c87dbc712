use super::Witness;
use crate::curve::VettedCurve;
use crate::keys::PrivateScalar;
use crate::zkp::{Challenge, Response};

use std::marker::PhantomData;

pub struct Prover<P>
where
    P: VettedCurve,
{
    phantom: PhantomData<P>,
}

impl<P> Prover<P>
where
    P: VettedCurve,
{
    /// `r = (v - h * x) mod n`. The one-time `v` is consumed and zeroized here.
    pub fn create_response(
        witness: &Witness<P>,
        nonce: PrivateScalar<P>,
        challenge: &Challenge<P>,
    ) -> Response<P> {
        let opening = *nonce.expose() - challenge.0 * witness.expose();

        Response(opening)
    }
}
