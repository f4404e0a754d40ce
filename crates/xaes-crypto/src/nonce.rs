//! 192-bit nonce and its split into KDF context and AES-GCM nonce
//!
//! The halves are distinct types so the prefix can only reach subkey
//! derivation and the suffix can only reach AES-GCM.

use crate::{
    constants::{NONCE_PREFIX_SIZE, NONCE_SIZE, NONCE_SUFFIX_SIZE},
    error::XaesError,
};

/// A 24-byte XAES-256-GCM nonce.
///
/// Must never repeat under the same master key for different plaintexts.
/// Random generation is safe at this size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XNonce([u8; NONCE_SIZE]);

/// First 12 bytes of an [`XNonce`], used as subkey derivation context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoncePrefix([u8; NONCE_PREFIX_SIZE]);

/// Last 12 bytes of an [`XNonce`], used as the AES-GCM nonce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonceSuffix([u8; NONCE_SUFFIX_SIZE]);

impl XNonce {
    /// Validate and copy a nonce from a byte slice.
    ///
    /// # Errors
    ///
    /// - `InvalidNonceLength`: If `bytes` is not exactly 24 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, XaesError> {
        let nonce: [u8; NONCE_SIZE] = bytes.try_into().map_err(|_| {
            XaesError::InvalidNonceLength { expected: NONCE_SIZE, actual: bytes.len() }
        })?;
        Ok(Self(nonce))
    }

    /// Raw nonce bytes.
    pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.0
    }

    /// Split into `(nonce[0..12], nonce[12..24])`.
    pub fn split(&self) -> (NoncePrefix, NonceSuffix) {
        let mut prefix = [0u8; NONCE_PREFIX_SIZE];
        let mut suffix = [0u8; NONCE_SUFFIX_SIZE];

        prefix.copy_from_slice(&self.0[..NONCE_PREFIX_SIZE]);
        suffix.copy_from_slice(&self.0[NONCE_PREFIX_SIZE..]);

        (NoncePrefix(prefix), NonceSuffix(suffix))
    }
}

impl From<[u8; NONCE_SIZE]> for XNonce {
    fn from(bytes: [u8; NONCE_SIZE]) -> Self {
        Self(bytes)
    }
}

impl NoncePrefix {
    /// Raw prefix bytes.
    pub fn as_bytes(&self) -> &[u8; NONCE_PREFIX_SIZE] {
        &self.0
    }
}

impl NonceSuffix {
    /// Raw suffix bytes.
    pub fn as_bytes(&self) -> &[u8; NONCE_SUFFIX_SIZE] {
        &self.0
    }
}
