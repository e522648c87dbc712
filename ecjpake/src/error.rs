use thiserror::Error;

/// This is an error that could occur while running one of the EC-JPAKE operations.
///
/// Every variant is fatal to the session except [`JpakeError::ResourceUnavailable`].
#[derive(Error, Debug, PartialEq, Clone, Eq)]
pub enum JpakeError {
    #[error("Random number generation failed: {0}")]
    RandomnessFailure(String),

    #[error("Private key is not in [1, n - 1]")]
    InvalidPrivateKey,

    #[error("Private v is not in [1, n - 1]")]
    InvalidPrivateV,

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Public key does not lie on the curve")]
    PublicKeyNotOnCurve,

    #[error("Public key coordinate is larger than the curve prime")]
    PublicKeyLargerThanPrime,

    #[error("Point at infinity is not a valid public key")]
    PointAtInfinity,

    #[error("Failed to verify {0} proof")]
    ProofVerificationError(String),

    #[error("Shared secret is the point at infinity")]
    SharedSecretAtInfinity,

    #[error("Curve arithmetic resource is busy")]
    ResourceUnavailable,

    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Session is in state {actual:?}, expected {expected:?}")]
    InvalidSessionState {
        expected: crate::session::SessionState,
        actual: crate::session::SessionState,
    },

    #[error("No private scalar stored in slot {0:?}")]
    MissingKey(crate::keys::store::KeySlot),
}

impl JpakeError {
    /// Only a busy arithmetic resource may be retried, and only after a delay.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ResourceUnavailable)
    }

    /// True for the family of errors raised when a received point fails validation.
    ///
    /// Callers use this to tell a malformed peer apart from a password mismatch.
    pub fn is_invalid_public_key(&self) -> bool {
        matches!(
            self,
            Self::InvalidPublicKey(_)
                | Self::PublicKeyNotOnCurve
                | Self::PublicKeyLargerThanPrime
                | Self::PointAtInfinity
        )
    }
}
