//! The five EC-JPAKE operations behind one handle.
//!
//! The handle carries no protocol state. It only owns the curve descriptor,
//! the return behaviour with its optional wait timeout, and a lock serialising
//! access to the arithmetic resource, which can be shared between handles.


use crate::config::ReturnBehavior;
use crate::curve::{Curve, VettedCurve};
use crate::error::JpakeError;
use crate::keys::{PrivateScalar, PublicPoint};
use crate::round_one::RoundOneKeys;
use crate::round_two::{RoundTwoInputs, RoundTwoKeys};
use crate::shared_secret::SharedSecret;
use crate::zkp::schnorr::SchnorrIdentification;
use crate::zkp::{Challenge, Response, ZkpSignature};

use ark_std::rand::{CryptoRng, RngCore};
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// Mutual exclusion over the curve arithmetic resource.
///
/// Clones share the same underlying lock.
#[derive(Clone, Default, Debug)]
pub struct AccessLock(Arc<Mutex<()>>);

impl AccessLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-blocking callers never wait. Blocking callers wait at most
    /// `timeout`, or indefinitely when it is `None`.
    pub fn acquire(
        &self,
        behavior: ReturnBehavior,
        timeout: Option<Duration>,
    ) -> Result<MutexGuard<'_, ()>, JpakeError> {
        let guard = match (behavior, timeout) {
            (ReturnBehavior::NonBlocking, _) => self.0.try_lock(),
            (ReturnBehavior::Blocking, Some(timeout)) => self.0.try_lock_for(timeout),
            (ReturnBehavior::Blocking, None) => Some(self.0.lock()),
        };

        guard.ok_or(JpakeError::ResourceUnavailable)
    }
}

pub struct EcJpake<P: VettedCurve> {
    curve: Curve<P>,
    behavior: ReturnBehavior,
    timeout: Option<Duration>,
    lock: AccessLock,
}

impl<P: VettedCurve> EcJpake<P> {
    pub fn new(curve: Curve<P>, behavior: ReturnBehavior) -> Self {
        Self::with_lock(curve, behavior, AccessLock::new())
    }

    pub fn with_lock(curve: Curve<P>, behavior: ReturnBehavior, lock: AccessLock) -> Self {
        Self {
            curve,
            behavior,
            timeout: None,
            lock,
        }
    }

    /// Bounds how long a blocking call waits for the arithmetic resource
    /// before failing with [`JpakeError::ResourceUnavailable`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn curve(&self) -> &Curve<P> {
        &self.curve
    }

    pub fn return_behavior(&self) -> ReturnBehavior {
        self.behavior
    }

    pub fn access_lock(&self) -> &AccessLock {
        &self.lock
    }

    #[instrument(level = "debug", skip_all, fields(curve = P::NAME), err)]
    pub fn round_one_generate_keys<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
    ) -> Result<RoundOneKeys<P>, JpakeError> {
        let _guard = self.lock.acquire(self.behavior, self.timeout)?;
        let keys = RoundOneKeys::generate(&self.curve, rng)?;

        debug!("generated round one keys");

        Ok(keys)
    }

    /// Consumes the one-time `private_v`.
    #[instrument(level = "debug", skip_all, fields(curve = P::NAME), err)]
    pub fn generate_zkp(
        &self,
        private_key: &PrivateScalar<P>,
        private_v: PrivateScalar<P>,
        challenge: &Challenge<P>,
    ) -> Result<Response<P>, JpakeError> {
        let _guard = self.lock.acquire(self.behavior, self.timeout)?;

        Ok(SchnorrIdentification::prove(
            private_key,
            private_v,
            challenge,
        ))
    }

    /// Verifies a peer proof. `their_generator` is `None` in round one, where
    /// the default generator is used, and `G_peer` in round two.
    #[instrument(level = "debug", skip_all, fields(curve = P::NAME), err)]
    pub fn verify_zkp(
        &self,
        their_generator: Option<&PublicPoint<P>>,
        their_public_key: &PublicPoint<P>,
        proof: &ZkpSignature<P>,
        challenge: &Challenge<P>,
    ) -> Result<(), JpakeError> {
        let _guard = self.lock.acquire(self.behavior, self.timeout)?;
        let generator = their_generator
            .copied()
            .unwrap_or_else(|| self.curve.generator());

        SchnorrIdentification::verify(&self.curve, &generator, their_public_key, proof, challenge)?;

        debug!("peer proof verified");

        Ok(())
    }

    #[instrument(level = "debug", skip_all, fields(curve = P::NAME), err)]
    pub fn round_two_generate_keys<R: RngCore + CryptoRng>(
        &self,
        inputs: &RoundTwoInputs<'_, P>,
        rng: &mut R,
    ) -> Result<RoundTwoKeys<P>, JpakeError> {
        let _guard = self.lock.acquire(self.behavior, self.timeout)?;
        let keys = RoundTwoKeys::generate(&self.curve, inputs, rng)?;

        debug!("generated round two keys");

        Ok(keys)
    }

    #[instrument(level = "debug", skip_all, fields(curve = P::NAME), err)]
    pub fn compute_shared_secret(
        &self,
        my_combined_private_key: &PrivateScalar<P>,
        my_private_key2: &PrivateScalar<P>,
        their_combined_public_key: &PublicPoint<P>,
        their_public_key2: &PublicPoint<P>,
    ) -> Result<SharedSecret<P>, JpakeError> {
        let _guard = self.lock.acquire(self.behavior, self.timeout)?;

        SharedSecret::compute(
            &self.curve,
            my_combined_private_key,
            my_private_key2,
            their_combined_public_key,
            their_public_key2,
        )
    }
}
