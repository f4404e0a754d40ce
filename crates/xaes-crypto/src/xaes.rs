//! Seal and open with XAES-256-GCM
//!
//! Each call validates its inputs, splits the nonce, derives the subkey for
//! the nonce prefix, and runs AES-256-GCM with the nonce suffix. The subkey
//! is dropped (and zeroized) before the call returns, on success and on
//! every error path.

use std::fmt;

use crate::{
    aead::{open_aead, seal_aead},
    constants::{MAX_PLAINTEXT_SIZE, TAG_SIZE},
    derivation::SubkeyDeriver,
    error::XaesError,
    key::MasterKey,
    nonce::XNonce,
};

/// XAES-256-GCM keyed with a master key.
///
/// Holds only the expanded CMAC key schedule. Immutable, so one instance can
/// be shared across threads.
#[derive(Clone)]
pub struct XAes256Gcm {
    deriver: SubkeyDeriver,
}

impl XAes256Gcm {
    /// Key a new instance.
    ///
    /// # Errors
    ///
    /// - `DerivationFailure`: If CMAC rejects the key material
    pub fn new(key: &MasterKey) -> Result<Self, XaesError> {
        Ok(Self { deriver: SubkeyDeriver::new(key)? })
    }

    /// Key a new instance from raw key bytes.
    ///
    /// # Errors
    ///
    /// - `InvalidKeyLength`: If `key` is not exactly 32 bytes
    /// - `DerivationFailure`: If CMAC rejects the key material
    pub fn from_slice(key: &[u8]) -> Result<Self, XaesError> {
        Self::new(&MasterKey::from_slice(key)?)
    }

    /// Encrypt and authenticate `plaintext`, authenticating `aad` alongside.
    ///
    /// Returns `ciphertext || tag`, exactly `plaintext.len() + 16` bytes.
    /// Deterministic: never seal two different plaintexts under one nonce.
    ///
    /// # Errors
    ///
    /// - `MessageTooLarge`: If `plaintext` exceeds the AES-GCM limit
    /// - `AllocationFailure`: If the output buffer cannot be reserved
    pub fn seal(&self, nonce: &XNonce, plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>, XaesError> {
        check_plaintext_len(plaintext.len())?;

        tracing::trace!(plaintext_len = plaintext.len(), aad_len = aad.len(), "XAES-256-GCM seal");

        let (prefix, suffix) = nonce.split();
        let derived_key = self.deriver.derive(&prefix);
        let result = seal_aead(&derived_key, &suffix, plaintext, aad);
        drop(derived_key);

        result
    }

    /// Verify and decrypt `ciphertext || tag`.
    ///
    /// # Errors
    ///
    /// - `InvalidCiphertextLength`: If `sealed` is shorter than the tag
    /// - `MessageTooLarge`: If `sealed` exceeds the AES-GCM limit
    /// - `AuthenticationFailure`: If the key, nonce, AAD or message is wrong
    pub fn open(&self, nonce: &XNonce, sealed: &[u8], aad: &[u8]) -> Result<Vec<u8>, XaesError> {
        let Some(plaintext_len) = sealed.len().checked_sub(TAG_SIZE) else {
            return Err(XaesError::InvalidCiphertextLength {
                minimum: TAG_SIZE,
                actual: sealed.len(),
            });
        };
        check_plaintext_len(plaintext_len)?;

        tracing::trace!(sealed_len = sealed.len(), aad_len = aad.len(), "XAES-256-GCM open");

        let (prefix, suffix) = nonce.split();
        let derived_key = self.deriver.derive(&prefix);
        let result = open_aead(&derived_key, &suffix, sealed, aad);
        drop(derived_key);

        if matches!(result, Err(XaesError::AuthenticationFailure)) {
            tracing::debug!(sealed_len = sealed.len(), "XAES-256-GCM authentication failed");
        }
        result
    }
}

impl fmt::Debug for XAes256Gcm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XAes256Gcm").finish_non_exhaustive()
    }
}

/// Seal `plaintext` under a 32-byte key and 24-byte nonce.
///
/// Returns `ciphertext || tag`, exactly `plaintext.len() + 16` bytes. The
/// nonce is not included; carry it alongside the sealed message.
///
/// # Errors
///
/// - `InvalidKeyLength`: If `key` is not 32 bytes
/// - `InvalidNonceLength`: If `nonce` is not 24 bytes
/// - `MessageTooLarge`: If `plaintext` exceeds the AES-GCM limit
/// - `DerivationFailure` / `AllocationFailure`: Fatal environment failures
pub fn seal(key: &[u8], nonce: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, XaesError> {
    seal_with_aad(key, nonce, plaintext, &[])
}

/// Open a message produced by [`seal`].
///
/// # Errors
///
/// - `InvalidKeyLength`: If `key` is not 32 bytes
/// - `InvalidNonceLength`: If `nonce` is not 24 bytes
/// - `InvalidCiphertextLength`: If `ciphertext` is shorter than 16 bytes
/// - `AuthenticationFailure`: If verification fails; no plaintext is released
pub fn open(key: &[u8], nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, XaesError> {
    open_with_aad(key, nonce, ciphertext, &[])
}

/// [`seal`] with associated data passed through to AES-GCM.
///
/// # Errors
///
/// Same as [`seal`].
pub fn seal_with_aad(
    key: &[u8],
    nonce: &[u8],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, XaesError> {
    let key = MasterKey::from_slice(key)?;
    let nonce = XNonce::from_slice(nonce)?;
    XAes256Gcm::new(&key)?.seal(&nonce, plaintext, aad)
}

/// [`open`] with associated data passed through to AES-GCM.
///
/// # Errors
///
/// Same as [`open`].
pub fn open_with_aad(
    key: &[u8],
    nonce: &[u8],
    ciphertext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, XaesError> {
    let key = MasterKey::from_slice(key)?;
    let nonce = XNonce::from_slice(nonce)?;
    XAes256Gcm::new(&key)?.open(&nonce, ciphertext, aad)
}

fn check_plaintext_len(len: usize) -> Result<(), XaesError> {
    let len = len as u64;
    if len > MAX_PLAINTEXT_SIZE {
        return Err(XaesError::MessageTooLarge { max: MAX_PLAINTEXT_SIZE, actual: len });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{KEY_SIZE, NONCE_SIZE};

    const KEY: [u8; KEY_SIZE] = [0x01; KEY_SIZE];
    const NONCE: [u8; NONCE_SIZE] = [0x42; NONCE_SIZE];

    #[test]
    fn seal_open_roundtrip() {
        let sealed = seal(&KEY, &NONCE, b"Hello, World!").unwrap();
        let opened = open(&KEY, &NONCE, &sealed).unwrap();

        assert_eq!(opened, b"Hello, World!");
    }

    #[test]
    fn seal_is_deterministic() {
        let first = seal(&KEY, &NONCE, b"same input").unwrap();
        let second = seal(&KEY, &NONCE, b"same input").unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn free_functions_match_keyed_instance() {
        let cipher = XAes256Gcm::from_slice(&KEY).unwrap();
        let nonce = XNonce::from(NONCE);

        let via_instance = cipher.seal(&nonce, b"payload", b"aad").unwrap();
        let via_function = seal_with_aad(&KEY, &NONCE, b"payload", b"aad").unwrap();

        assert_eq!(via_instance, via_function);
    }

    #[test]
    fn empty_plaintext_roundtrip() {
        let sealed = seal(&KEY, &NONCE, b"").unwrap();
        assert_eq!(sealed.len(), TAG_SIZE);

        let opened = open(&KEY, &NONCE, &sealed).unwrap();
        assert!(opened.is_empty());
    }

    #[test]
    fn large_plaintext_roundtrip() {
        let plaintext = vec![0x42u8; 64 * 1024]; // 64KB

        let sealed = seal(&KEY, &NONCE, &plaintext).unwrap();
        let opened = open(&KEY, &NONCE, &sealed).unwrap();

        assert_eq!(sealed.len(), plaintext.len() + TAG_SIZE);
        assert_eq!(opened, plaintext);
    }

    #[test]
    fn seal_rejects_bad_key_length() {
        assert_eq!(
            seal(&[0u8; 16], &NONCE, b"x"),
            Err(XaesError::InvalidKeyLength { expected: 32, actual: 16 })
        );
    }

    #[test]
    fn seal_rejects_bad_nonce_length() {
        assert_eq!(
            seal(&KEY, &[0u8; 12], b"x"),
            Err(XaesError::InvalidNonceLength { expected: 24, actual: 12 })
        );
    }

    #[test]
    fn key_is_validated_before_nonce() {
        assert!(matches!(seal(&[0u8; 31], &[0u8; 23], b"x"), Err(XaesError::InvalidKeyLength { .. })));
        assert!(matches!(open(&[0u8; 33], &[0u8; 25], &[0u8; 3]), Err(XaesError::InvalidKeyLength { .. })));
    }

    #[test]
    fn open_rejects_short_ciphertext() {
        for len in 0..TAG_SIZE {
            assert_eq!(
                open(&KEY, &NONCE, &vec![0u8; len]),
                Err(XaesError::InvalidCiphertextLength { minimum: TAG_SIZE, actual: len })
            );
        }
    }

    #[test]
    fn open_with_wrong_nonce_fails() {
        let sealed = seal(&KEY, &NONCE, b"secret").unwrap();

        let mut wrong_prefix = NONCE;
        wrong_prefix[0] ^= 0x01;
        let mut wrong_suffix = NONCE;
        wrong_suffix[23] ^= 0x01;

        assert_eq!(open(&KEY, &wrong_prefix, &sealed), Err(XaesError::AuthenticationFailure));
        assert_eq!(open(&KEY, &wrong_suffix, &sealed), Err(XaesError::AuthenticationFailure));
    }

    #[test]
    fn open_with_wrong_key_fails() {
        let sealed = seal(&KEY, &NONCE, b"secret").unwrap();
        let wrong_key = [0x02; KEY_SIZE];

        assert_eq!(open(&wrong_key, &NONCE, &sealed), Err(XaesError::AuthenticationFailure));
    }

    #[test]
    fn aad_must_match() {
        let sealed = seal_with_aad(&KEY, &NONCE, b"body", b"header").unwrap();

        assert_eq!(open_with_aad(&KEY, &NONCE, &sealed, b"header").unwrap(), b"body");
        assert_eq!(open(&KEY, &NONCE, &sealed), Err(XaesError::AuthenticationFailure));
        assert_eq!(
            open_with_aad(&KEY, &NONCE, &sealed, b"Header"),
            Err(XaesError::AuthenticationFailure)
        );
    }

    #[test]
    fn empty_aad_equals_no_aad() {
        assert_eq!(seal(&KEY, &NONCE, b"m").unwrap(), seal_with_aad(&KEY, &NONCE, b"m", b"").unwrap());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn plaintext_limit_is_enforced() {
        assert_eq!(check_plaintext_len(0), Ok(()));
        assert_eq!(check_plaintext_len(MAX_PLAINTEXT_SIZE as usize), Ok(()));
        assert_eq!(
            check_plaintext_len(MAX_PLAINTEXT_SIZE as usize + 1),
            Err(XaesError::MessageTooLarge {
                max: MAX_PLAINTEXT_SIZE,
                actual: MAX_PLAINTEXT_SIZE + 1
            })
        );
    }

    #[test]
    fn debug_does_not_leak_key() {
        let cipher = XAes256Gcm::from_slice(&[0xAB; KEY_SIZE]).unwrap();
        assert_eq!(format!("{cipher:?}"), "XAes256Gcm { .. }");
    }

    #[test]
    fn keyed_instance_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<XAes256Gcm>();
    }
}
