//! AES-256-GCM adapter
//!
//! Sealed layout is `ciphertext || tag(16)`. Buffers that hold plaintext are
//! wrapped in `Zeroizing` until they are handed to the caller, so a failure
//! on either path wipes them before the error is returned.

use std::mem;

use aes_gcm::{
    Aes256Gcm, Nonce, Tag,
    aead::{AeadInPlace, KeyInit},
};
use zeroize::Zeroizing;

use crate::{constants::TAG_SIZE, derivation::DerivedKey, error::XaesError, nonce::NonceSuffix};

/// Encrypt `plaintext` and append the authentication tag.
pub(crate) fn seal_aead(
    key: &DerivedKey,
    nonce: &NonceSuffix,
    plaintext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, XaesError> {
    let sealed_len = plaintext
        .len()
        .checked_add(TAG_SIZE)
        .ok_or(XaesError::AllocationFailure { requested: usize::MAX })?;

    let mut buffer = Zeroizing::new(reserve(sealed_len)?);
    buffer.extend_from_slice(plaintext);

    let cipher = Aes256Gcm::new(key.as_bytes().into());
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(nonce.as_bytes()), aad, &mut buffer)
        .map_err(|_| XaesError::InternalInvariantViolation {
            reason: "AES-GCM rejected a validated message",
        })?;

    // CTR mode has no padding: in-place output must be exactly as long as the input
    if buffer.len() != plaintext.len() {
        return Err(XaesError::InternalInvariantViolation {
            reason: "AES-GCM left residual ciphertext bytes",
        });
    }

    buffer.extend_from_slice(&tag);
    Ok(mem::take(&mut *buffer))
}

/// Verify the trailing tag and decrypt.
///
/// No plaintext is returned unless the tag verifies.
pub(crate) fn open_aead(
    key: &DerivedKey,
    nonce: &NonceSuffix,
    sealed: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, XaesError> {
    let Some(plaintext_len) = sealed.len().checked_sub(TAG_SIZE) else {
        return Err(XaesError::InvalidCiphertextLength { minimum: TAG_SIZE, actual: sealed.len() });
    };
    let (ciphertext, tag) = sealed.split_at(plaintext_len);

    let mut buffer = Zeroizing::new(reserve(plaintext_len)?);
    buffer.extend_from_slice(ciphertext);

    let cipher = Aes256Gcm::new(key.as_bytes().into());
    cipher
        .decrypt_in_place_detached(
            Nonce::from_slice(nonce.as_bytes()),
            aad,
            &mut buffer,
            Tag::from_slice(tag),
        )
        .map_err(|_| XaesError::AuthenticationFailure)?;

    if buffer.len() != plaintext_len {
        return Err(XaesError::InternalInvariantViolation {
            reason: "AES-GCM left residual plaintext bytes",
        });
    }

    Ok(mem::take(&mut *buffer))
}

/// Reserve exactly `len` bytes without aborting on allocation failure.
fn reserve(len: usize) -> Result<Vec<u8>, XaesError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| XaesError::AllocationFailure { requested: len })?;
    Ok(buffer)
}
