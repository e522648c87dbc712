use super::PrivateScalar;
use crate::curve::VettedCurve;
use crate::error::JpakeError;

use std::collections::HashMap;

/// Long-lived private scalars a session keeps between rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySlot {
    /// `x1`, needed only for the first round one proof.
    PrivateKey1,
    /// `x2`, needed until the shared secret is computed.
    PrivateKey2,
    /// `x2 * s`, produced in round two.
    CombinedPrivateKey,
}

/// Capability to hold private scalars on behalf of a session.
///
/// A hardware-backed store never hands out the scalar itself; it runs the
/// closure against its own copy. [`PlaintextStore`] keeps them in memory.
pub trait ScalarStore<P: VettedCurve> {
    fn insert(&mut self, slot: KeySlot, scalar: PrivateScalar<P>) -> Result<(), JpakeError>;

    fn with_scalar<T, F>(&self, slot: KeySlot, f: F) -> Result<T, JpakeError>
    where
        F: FnOnce(&PrivateScalar<P>) -> Result<T, JpakeError>;

    /// Removes and zeroizes the scalar in `slot`, if any.
    fn erase(&mut self, slot: KeySlot);

    fn contains(&self, slot: KeySlot) -> bool;
}

pub struct PlaintextStore<P: VettedCurve> {
    scalars: HashMap<KeySlot, PrivateScalar<P>>,
}

impl<P: VettedCurve> PlaintextStore<P> {
    pub fn new() -> Self {
        Self {
            scalars: HashMap::new(),
        }
    }
}

impl<P: VettedCurve> Default for PlaintextStore<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: VettedCurve> ScalarStore<P> for PlaintextStore<P> {
    fn insert(&mut self, slot: KeySlot, scalar: PrivateScalar<P>) -> Result<(), JpakeError> {
        // The replaced scalar, if any, zeroizes itself on drop.
        self.scalars.insert(slot, scalar);
        Ok(())
    }

    fn with_scalar<T, F>(&self, slot: KeySlot, f: F) -> Result<T, JpakeError>
    where
        F: FnOnce(&PrivateScalar<P>) -> Result<T, JpakeError>,
    {
        let scalar = self.scalars.get(&slot).ok_or(JpakeError::MissingKey(slot))?;
        f(scalar)
    }

    fn erase(&mut self, slot: KeySlot) {
        self.scalars.remove(&slot);
    }

    fn contains(&self, slot: KeySlot) -> bool {
        self.scalars.contains_key(&slot)
    }
}
