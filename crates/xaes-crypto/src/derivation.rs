//! Per-nonce subkey derivation using AES-256-CMAC
//!
//! NIST SP 800-108 counter mode with a 16-bit counter, label `X`, no length
//! field, and the nonce prefix as context. Every CMAC input is exactly one
//! AES block:
//!
//! ```text
//! K_d = CMAC(K, 0x00 0x01 'X' 0x00 || N[0..12])
//!    || CMAC(K, 0x00 0x02 'X' 0x00 || N[0..12])
//! ```
//!
//! # Security Properties
//!
//! - Prefix Binding: Distinct prefixes give independent-looking subkeys
//! - Determinism: Same (key, prefix) always produces the same subkey
//! - Erasure: Subkeys are zeroized when dropped

use aes::Aes256;
use cmac::{
    Cmac, Mac,
    digest::{FixedOutput, generic_array::GenericArray},
};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
    constants::{KDF_COUNTERS, KDF_LABEL, KDF_SEPARATOR, KEY_SIZE, MAC_OUTPUT_SIZE},
    error::XaesError,
    key::MasterKey,
    nonce::NoncePrefix,
};

type CmacAes256 = Cmac<Aes256>;

/// An AES-256-GCM key derived for one nonce prefix.
///
/// Exists for the duration of one seal or open. Not `Clone`, so the bytes
/// are wiped exactly once when the owning call returns.
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct DerivedKey([u8; KEY_SIZE]);

impl DerivedKey {
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

/// AES-256-CMAC keyed with the master key.
///
/// The key schedule is expanded once and cloned per CMAC evaluation.
#[derive(Clone)]
pub(crate) struct SubkeyDeriver {
    mac: CmacAes256,
}

impl SubkeyDeriver {
    /// Key the CMAC with the master key.
    ///
    /// # Errors
    ///
    /// - `DerivationFailure`: If CMAC rejects the key material
    pub(crate) fn new(master_key: &MasterKey) -> Result<Self, XaesError> {
        let mac = CmacAes256::new_from_slice(master_key.as_bytes())
            .map_err(|_| XaesError::DerivationFailure)?;
        Ok(Self { mac })
    }

    /// Derive the 32-byte subkey for a nonce prefix.
    pub(crate) fn derive(&self, prefix: &NoncePrefix) -> DerivedKey {
        let mut derived = DerivedKey([0u8; KEY_SIZE]);

        for (block, counter) in derived.0.chunks_exact_mut(MAC_OUTPUT_SIZE).zip(KDF_COUNTERS) {
            let mut mac = self.mac.clone();
            mac.update(&counter);
            mac.update(&[KDF_LABEL, KDF_SEPARATOR]);
            mac.update(prefix.as_bytes());
            mac.finalize_into(GenericArray::from_mut_slice(block));
        }

        derived
    }
}
