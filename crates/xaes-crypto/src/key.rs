//! Master key material

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{constants::KEY_SIZE, error::XaesError};

/// A 32-byte XAES-256-GCM master key.
///
/// Zeroized on drop. `Debug` output never shows the key bytes.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MasterKey([u8; KEY_SIZE]);

impl MasterKey {
    /// Validate and copy a key from a byte slice.
    ///
    /// # Errors
    ///
    /// - `InvalidKeyLength`: If `bytes` is not exactly 32 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, XaesError> {
        if bytes.len() != KEY_SIZE {
            return Err(XaesError::InvalidKeyLength { expected: KEY_SIZE, actual: bytes.len() });
        }

        let mut key = [0u8; KEY_SIZE];
        key.copy_from_slice(bytes);
        Ok(Self(key))
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl From<[u8; KEY_SIZE]> for MasterKey {
    fn from(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterKey([REDACTED])")
    }
}
