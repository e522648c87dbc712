//! Elliptic Curve J-PAKE, the password-authenticated key exchange used by
//! Thread commissioning.
//!
//! Two peers sharing a low entropy secret run two rounds of key generation
//! and Schnorr proofs and end up with the same curve point `K`, without the
//! secret ever being exposed to an eavesdropper or an active attacker beyond
//! one online guess per run.
//!
//! [`engine::EcJpake`] exposes the five protocol operations over a vetted
//! curve. [`session::Session`] drives them in order for a single peer.
//!
//! ```no_run
//! use ecjpake::{EcJpake, NistP256, ReturnBehavior, Session, SessionConfig, ThreadChallenge};
//!
//! let curve = NistP256::new();
//! let engine = EcJpake::new(curve, ReturnBehavior::Blocking);
//! let mut session = Session::new(engine, SessionConfig::default(), ThreadChallenge::new());
//!
//! let mut rng = rand::thread_rng();
//! let round_one = session.round_one(&mut rng)?;
//! // send `round_one`, receive the peer's message, then:
//! // session.verify_round_one(&peer_round_one)?;
//! # Ok::<(), ecjpake::JpakeError>(())
//! ```

pub mod config;
pub mod curve;
pub mod engine;
pub mod error;
pub mod keys;
pub mod round_one;
pub mod round_two;
pub mod session;
pub mod shared_secret;
pub mod zkp;

pub use config::{ReturnBehavior, SessionConfig};
pub use curve::{Curve, NistP256, VettedCurve};
pub use engine::{AccessLock, EcJpake};
pub use error::JpakeError;
pub use keys::store::{KeySlot, PlaintextStore, ScalarStore};
pub use keys::{PreSharedSecret, PrivateScalar, PublicPoint};
pub use round_one::RoundOneKeys;
pub use round_two::{RoundTwoInputs, RoundTwoKeys};
pub use session::{RoundOneMessage, RoundTwoMessage, Session, SessionState};
pub use shared_secret::SharedSecret;
pub use zkp::transcript::{
    Blake2Challenge, ChallengeHasher, LengthPrefixed, MerlinChallenge, ThreadChallenge,
};
pub use zkp::{Challenge, Response, ZkpSignature};
