//! Caller-held protocol state.
//!
//! The engine is a set of pure operations; this module strings them together
//! in the right order for one peer, keeping the long-lived scalars in a
//! [`ScalarStore`]. Message transport stays with the caller.

mod test;

use crate::config::SessionConfig;
use crate::curve::VettedCurve;
use crate::engine::EcJpake;
use crate::error::JpakeError;
use crate::keys::store::{KeySlot, PlaintextStore, ScalarStore};
use crate::keys::{PreSharedSecret, PublicPoint};
use crate::round_two::RoundTwoInputs;
use crate::shared_secret::SharedSecret;
use crate::zkp::transcript::ChallengeHasher;
use crate::zkp::ZkpSignature;

use ark_std::rand::{CryptoRng, RngCore};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingRoundOne,
    AwaitingRoundOneVerify,
    AwaitingRoundTwo,
    AwaitingRoundTwoVerify,
    Complete,
    /// A fatal error occurred; all private scalars have been erased.
    Aborted,
}

/// What a peer sends after round one: `X1, X2` and their proofs `(V1, r1)`, `(V2, r2)`.
pub struct RoundOneMessage<P: VettedCurve> {
    pub public_key1: PublicPoint<P>,
    pub public_key2: PublicPoint<P>,
    pub proof1: ZkpSignature<P>,
    pub proof2: ZkpSignature<P>,
}

/// What a peer sends after round two: the combined key and its proof over `G'`.
pub struct RoundTwoMessage<P: VettedCurve> {
    pub combined_public_key: PublicPoint<P>,
    pub proof: ZkpSignature<P>,
}

/// Where a session stands, together with the public material the next step
/// needs.
enum Progress<P: VettedCurve> {
    AwaitingRoundOne,
    AwaitingRoundOneVerify {
        my_public_keys: [PublicPoint<P>; 2],
    },
    AwaitingRoundTwo {
        my_public_keys: [PublicPoint<P>; 2],
        their_public_keys: [PublicPoint<P>; 2],
    },
    AwaitingRoundTwoVerify {
        their_public_key2: PublicPoint<P>,
        their_generator: PublicPoint<P>,
    },
    Complete,
    Aborted,
}

impl<P: VettedCurve> Progress<P> {
    fn state(&self) -> SessionState {
        match self {
            Self::AwaitingRoundOne => SessionState::AwaitingRoundOne,
            Self::AwaitingRoundOneVerify { .. } => SessionState::AwaitingRoundOneVerify,
            Self::AwaitingRoundTwo { .. } => SessionState::AwaitingRoundTwo,
            Self::AwaitingRoundTwoVerify { .. } => SessionState::AwaitingRoundTwoVerify,
            Self::Complete => SessionState::Complete,
            Self::Aborted => SessionState::Aborted,
        }
    }
}

pub struct Session<P, H, S = PlaintextStore<P>>
where
    P: VettedCurve,
    H: ChallengeHasher<P>,
    S: ScalarStore<P>,
{
    engine: EcJpake<P>,
    config: SessionConfig,
    hasher: H,
    store: S,
    progress: Progress<P>,
}

impl<P, H> Session<P, H>
where
    P: VettedCurve,
    H: ChallengeHasher<P>,
{
    pub fn new(engine: EcJpake<P>, config: SessionConfig, hasher: H) -> Self {
        Self::with_store(engine, config, hasher, PlaintextStore::new())
    }
}

impl<P, H, S> Session<P, H, S>
where
    P: VettedCurve,
    H: ChallengeHasher<P>,
    S: ScalarStore<P>,
{
    pub fn with_store(engine: EcJpake<P>, config: SessionConfig, hasher: H, store: S) -> Self {
        Self {
            engine,
            config,
            hasher,
            store,
            progress: Progress::AwaitingRoundOne,
        }
    }

    pub fn state(&self) -> SessionState {
        self.progress.state()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Generates our round one keys and proofs.
    pub fn round_one<R: RngCore + CryptoRng>(
        &mut self,
        rng: &mut R,
    ) -> Result<RoundOneMessage<P>, JpakeError> {
        if !matches!(self.progress, Progress::AwaitingRoundOne) {
            return Err(self.out_of_order(SessionState::AwaitingRoundOne));
        }

        let result = self.try_round_one(rng);
        self.settle(result)
    }

    /// Checks both of the peer's round one proofs against the default generator.
    pub fn verify_round_one(&mut self, message: &RoundOneMessage<P>) -> Result<(), JpakeError> {
        let my_public_keys = match self.progress {
            Progress::AwaitingRoundOneVerify { my_public_keys } => my_public_keys,
            _ => return Err(self.out_of_order(SessionState::AwaitingRoundOneVerify)),
        };

        let result = self.try_verify_round_one(message).map(|their_public_keys| {
            let next = Progress::AwaitingRoundTwo {
                my_public_keys,
                their_public_keys,
            };
            ((), next)
        });
        self.settle(result)
    }

    /// Binds `x2` to the password and proves knowledge of the combined key.
    pub fn round_two<R: RngCore + CryptoRng>(
        &mut self,
        pre_shared_secret: &PreSharedSecret<P>,
        rng: &mut R,
    ) -> Result<RoundTwoMessage<P>, JpakeError> {
        let (my_public_keys, their_public_keys) = match self.progress {
            Progress::AwaitingRoundTwo {
                my_public_keys,
                their_public_keys,
            } => (my_public_keys, their_public_keys),
            _ => return Err(self.out_of_order(SessionState::AwaitingRoundTwo)),
        };

        let result = self.try_round_two(
            pre_shared_secret,
            rng,
            &my_public_keys,
            &their_public_keys,
        );
        self.settle(result)
    }

    /// Verifies the peer's round two proof against `G_peer` and derives `K`.
    ///
    /// `x2` and the combined private key are erased once `K` is computed.
    pub fn finish(&mut self, message: &RoundTwoMessage<P>) -> Result<SharedSecret<P>, JpakeError> {
        let (their_public_key2, their_generator) = match self.progress {
            Progress::AwaitingRoundTwoVerify {
                their_public_key2,
                their_generator,
            } => (their_public_key2, their_generator),
            _ => return Err(self.out_of_order(SessionState::AwaitingRoundTwoVerify)),
        };

        let result = self
            .try_finish(message, &their_generator, &their_public_key2)
            .map(|shared| (shared, Progress::Complete));
        let shared = self.settle(result)?;

        self.store.erase(KeySlot::PrivateKey2);
        self.store.erase(KeySlot::CombinedPrivateKey);

        Ok(shared)
    }

    /// Erases every private scalar and refuses further steps.
    pub fn abort(&mut self) {
        for slot in [
            KeySlot::PrivateKey1,
            KeySlot::PrivateKey2,
            KeySlot::CombinedPrivateKey,
        ] {
            self.store.erase(slot);
        }

        self.progress = Progress::Aborted;
    }

    fn try_round_one<R: RngCore + CryptoRng>(
        &mut self,
        rng: &mut R,
    ) -> Result<(RoundOneMessage<P>, Progress<P>), JpakeError> {
        let keys = self.engine.round_one_generate_keys(rng)?;
        let generator = self.engine.curve().generator();
        let identity = self.config.local_identity();

        let hash1 = self
            .hasher
            .challenge(&generator, &keys.public_v1, &keys.public_key1, identity)?;
        let hash2 = self
            .hasher
            .challenge(&generator, &keys.public_v2, &keys.public_key2, identity)?;

        let response1 = self
            .engine
            .generate_zkp(&keys.private_key1, keys.private_v1, &hash1)?;
        let response2 = self
            .engine
            .generate_zkp(&keys.private_key2, keys.private_v2, &hash2)?;

        let message = RoundOneMessage {
            public_key1: keys.public_key1,
            public_key2: keys.public_key2,
            proof1: ZkpSignature::new(keys.public_v1, response1),
            proof2: ZkpSignature::new(keys.public_v2, response2),
        };

        // x1 is not needed past its proof and is dropped with `keys`.
        self.store.insert(KeySlot::PrivateKey2, keys.private_key2)?;

        debug!("round one message ready");

        let next = Progress::AwaitingRoundOneVerify {
            my_public_keys: [keys.public_key1, keys.public_key2],
        };

        Ok((message, next))
    }

    fn try_verify_round_one(
        &self,
        message: &RoundOneMessage<P>,
    ) -> Result<[PublicPoint<P>; 2], JpakeError> {
        let generator = self.engine.curve().generator();
        let identity = self.config.peer_identity();

        let hash1 = self.hasher.challenge(
            &generator,
            &message.proof1.commitment,
            &message.public_key1,
            identity,
        )?;
        self.engine
            .verify_zkp(None, &message.public_key1, &message.proof1, &hash1)?;

        let hash2 = self.hasher.challenge(
            &generator,
            &message.proof2.commitment,
            &message.public_key2,
            identity,
        )?;
        self.engine
            .verify_zkp(None, &message.public_key2, &message.proof2, &hash2)?;

        debug!("peer round one proofs verified");

        Ok([message.public_key1, message.public_key2])
    }

    fn try_round_two<R: RngCore + CryptoRng>(
        &mut self,
        pre_shared_secret: &PreSharedSecret<P>,
        rng: &mut R,
        my_public_keys: &[PublicPoint<P>; 2],
        their_public_keys: &[PublicPoint<P>; 2],
    ) -> Result<(RoundTwoMessage<P>, Progress<P>), JpakeError> {
        let engine = &self.engine;
        let keys = self.store.with_scalar(KeySlot::PrivateKey2, |private_key2| {
            let inputs = RoundTwoInputs {
                my_private_key2: private_key2,
                my_public_key1: &my_public_keys[0],
                my_public_key2: &my_public_keys[1],
                their_public_key1: &their_public_keys[0],
                their_public_key2: &their_public_keys[1],
                pre_shared_secret,
            };
            engine.round_two_generate_keys(&inputs, rng)
        })?;

        let hash = self.hasher.challenge(
            &keys.my_generator,
            &keys.public_v,
            &keys.combined_public_key,
            self.config.local_identity(),
        )?;
        let response = self
            .engine
            .generate_zkp(&keys.combined_private_key, keys.private_v, &hash)?;

        let message = RoundTwoMessage {
            combined_public_key: keys.combined_public_key,
            proof: ZkpSignature::new(keys.public_v, response),
        };

        self.store
            .insert(KeySlot::CombinedPrivateKey, keys.combined_private_key)?;

        debug!("round two message ready");

        let next = Progress::AwaitingRoundTwoVerify {
            their_public_key2: their_public_keys[1],
            their_generator: keys.their_generator,
        };

        Ok((message, next))
    }

    fn try_finish(
        &self,
        message: &RoundTwoMessage<P>,
        their_generator: &PublicPoint<P>,
        their_public_key2: &PublicPoint<P>,
    ) -> Result<SharedSecret<P>, JpakeError> {
        let hash = self.hasher.challenge(
            their_generator,
            &message.proof.commitment,
            &message.combined_public_key,
            self.config.peer_identity(),
        )?;
        self.engine.verify_zkp(
            Some(their_generator),
            &message.combined_public_key,
            &message.proof,
            &hash,
        )?;

        let shared = self
            .store
            .with_scalar(KeySlot::CombinedPrivateKey, |combined_private_key| {
                self.store.with_scalar(KeySlot::PrivateKey2, |private_key2| {
                    self.engine.compute_shared_secret(
                        combined_private_key,
                        private_key2,
                        &message.combined_public_key,
                        their_public_key2,
                    )
                })
            })?;

        debug!("shared secret computed");

        Ok(shared)
    }

    fn out_of_order(&self, expected: SessionState) -> JpakeError {
        JpakeError::InvalidSessionState {
            expected,
            actual: self.state(),
        }
    }

    /// Advances on success. A busy resource leaves the state untouched so the
    /// step can be retried; any other failure aborts the session.
    fn settle<T>(
        &mut self,
        result: Result<(T, Progress<P>), JpakeError>,
    ) -> Result<T, JpakeError> {
        match result {
            Ok((value, next)) => {
                self.progress = next;
                Ok(value)
            }
            Err(err) if err.is_retryable() => Err(err),
            Err(err) => {
                warn!(error = %err, state = ?self.state(), "aborting EC-JPAKE session");
                self.abort();
                Err(err)
            }
        }
    }
}
