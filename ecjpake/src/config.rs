/// How an engine call behaves when the arithmetic resource is held by another
/// engine sharing the same [`AccessLock`](crate::engine::AccessLock).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnBehavior {
    /// Wait until the resource is free.
    #[default]
    Blocking,
    /// Fail with [`ResourceUnavailable`](crate::JpakeError::ResourceUnavailable)
    /// instead of waiting.
    NonBlocking,
}

/// Identities bound into every challenge hash of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    local_identity: Vec<u8>,
    peer_identity: Vec<u8>,
}

impl SessionConfig {
    pub fn new(local_identity: impl Into<Vec<u8>>, peer_identity: impl Into<Vec<u8>>) -> Self {
        Self {
            local_identity: local_identity.into(),
            peer_identity: peer_identity.into(),
        }
    }

    pub fn with_local_identity(mut self, identity: impl Into<Vec<u8>>) -> Self {
        self.local_identity = identity.into();
        self
    }

    pub fn with_peer_identity(mut self, identity: impl Into<Vec<u8>>) -> Self {
        self.peer_identity = identity.into();
        self
    }

    pub fn local_identity(&self) -> &[u8] {
        &self.local_identity
    }

    pub fn peer_identity(&self) -> &[u8] {
        &self.peer_identity
    }
}

impl Default for SessionConfig {
    /// The client and server identities used by Thread commissioning.
    fn default() -> Self {
        Self::new(b"client".to_vec(), b"server".to_vec())
    }
}
