//! Challenge hash layouts.
//!
//! Both peers must hash the generator, the commitment `V`, the public key `X`
//! and the prover's identity in exactly the same way. The engine itself only
//! consumes the resulting [`Challenge`]; these helpers are for callers that do
//! not have a layout imposed on them.

use super::Challenge;
use crate::curve::VettedCurve;
use crate::error::JpakeError;
use crate::keys::PublicPoint;

use ark_std::marker::PhantomData;
use blake2::Blake2s256;
use digest::Digest;
use merlin::Transcript;
use sha2::Sha256;

pub trait ChallengeHasher<P: VettedCurve> {
    fn challenge(
        &self,
        generator: &PublicPoint<P>,
        commitment: &PublicPoint<P>,
        public_key: &PublicPoint<P>,
        identity: &[u8],
    ) -> Result<Challenge<P>, JpakeError>;
}

/// `H(len(G) || G || len(V) || V || len(X) || X || len(id) || id)` with 4 byte
/// big-endian lengths and uncompressed points.
pub struct LengthPrefixed<D: Digest> {
    _digest: PhantomData<D>,
}

/// The layout used by Thread commissioning.
pub type ThreadChallenge = LengthPrefixed<Sha256>;

pub type Blake2Challenge = LengthPrefixed<Blake2s256>;

impl<D: Digest> LengthPrefixed<D> {
    pub fn new() -> Self {
        Self {
            _digest: PhantomData,
        }
    }
}

impl<D: Digest> Default for LengthPrefixed<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Digest> Clone for LengthPrefixed<D> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

fn absorb<D: Digest>(hasher: &mut D, data: &[u8]) -> Result<(), JpakeError> {
    let length = u32::try_from(data.len()).map_err(|_| JpakeError::InvalidLength {
        expected: u32::MAX as usize,
        actual: data.len(),
    })?;

    hasher.update(length.to_be_bytes());
    hasher.update(data);

    Ok(())
}

impl<P: VettedCurve, D: Digest> ChallengeHasher<P> for LengthPrefixed<D> {
    fn challenge(
        &self,
        generator: &PublicPoint<P>,
        commitment: &PublicPoint<P>,
        public_key: &PublicPoint<P>,
        identity: &[u8],
    ) -> Result<Challenge<P>, JpakeError> {
        let mut hasher = D::new();

        absorb(&mut hasher, &generator.to_octets())?;
        absorb(&mut hasher, &commitment.to_octets())?;
        absorb(&mut hasher, &public_key.to_octets())?;
        absorb(&mut hasher, identity)?;

        Ok(Challenge::from_digest(&hasher.finalize()))
    }
}

/// Labelled merlin transcript, domain separated by `label`.
#[derive(Clone)]
pub struct MerlinChallenge {
    label: &'static [u8],
}

impl MerlinChallenge {
    pub const DEFAULT_LABEL: &'static [u8] = b"EC-JPAKE Schnorr";

    pub fn new(label: &'static [u8]) -> Self {
        Self { label }
    }
}

impl Default for MerlinChallenge {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LABEL)
    }
}

impl<P: VettedCurve> ChallengeHasher<P> for MerlinChallenge {
    fn challenge(
        &self,
        generator: &PublicPoint<P>,
        commitment: &PublicPoint<P>,
        public_key: &PublicPoint<P>,
        identity: &[u8],
    ) -> Result<Challenge<P>, JpakeError> {
        let mut transcript = Transcript::new(self.label);

        transcript.append_message(b"generator", &generator.to_octets());
        transcript.append_message(b"commitment", &commitment.to_octets());
        transcript.append_message(b"public_key", &public_key.to_octets());
        transcript.append_message(b"identity", identity);

        // Reduced modulo n by `from_digest`.
        let mut buf = [0u8; 64];
        transcript.challenge_bytes(b"challenge", &mut buf);

        Ok(Challenge::from_digest(&buf))
    }
}
