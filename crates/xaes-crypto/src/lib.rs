//! XAES-256-GCM
//!
//! AES-256-GCM with a 192-bit nonce. Random 96-bit nonces collide after
//! roughly 2^32 messages under one key; XAES-256-GCM derives a fresh AES-256
//! key from the first half of a 24-byte nonce, so random nonces are safe for
//! an effectively unlimited number of messages under a long-lived key.
//!
//! Pure functions with deterministic outputs. Callers supply the nonce, which
//! may be drawn at random.
//!
//! # Construction
//!
//! ```text
//! Nonce (24 bytes)
//!        │
//!        ├── prefix [0..12] ──► AES-256-CMAC counter KDF (master key)
//!        │                              │
//!        │                              ▼
//!        │                      Derived Key (32 bytes)
//!        │                              │
//!        └── suffix [12..24] ──► AES-256-GCM Seal/Open
//!                                       │
//!                                       ▼
//!                          Ciphertext || Tag (16 bytes)
//! ```
//!
//! # Security
//!
//! Key Handling:
//! - The master key is never passed to AES-GCM directly
//! - Derived keys live for one call and are zeroized on every exit path
//! - Plaintext scratch buffers are zeroized when an operation fails
//!
//! Authenticity:
//! - A failed authentication tag releases no plaintext
//! - Associated data is passed through to AES-GCM unchanged
//!
//! Nonce Reuse:
//! - Sealing is deterministic; a (key, nonce) pair must never seal two
//!   different plaintexts
//!
//! # Example
//!
//! ```
//! let key = [0x01; xaes_crypto::KEY_SIZE];
//! let nonce = [0x42; xaes_crypto::NONCE_SIZE];
//!
//! let sealed = xaes_crypto::seal(&key, &nonce, b"hello").unwrap();
//! assert_eq!(sealed.len(), 5 + xaes_crypto::TAG_SIZE);
//!
//! let opened = xaes_crypto::open(&key, &nonce, &sealed).unwrap();
//! assert_eq!(opened, b"hello");
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod aead;
pub mod constants;
mod derivation;
pub mod error;
pub mod key;
pub mod nonce;
pub mod xaes;

pub use constants::{
    KEY_SIZE, MAX_PLAINTEXT_SIZE, NONCE_PREFIX_SIZE, NONCE_SIZE, NONCE_SUFFIX_SIZE, OVERHEAD,
    TAG_SIZE,
};
pub use error::XaesError;
pub use key::MasterKey;
pub use nonce::{NoncePrefix, NonceSuffix, XNonce};
pub use xaes::{XAes256Gcm, open, open_with_aad, seal, seal_with_aad};
