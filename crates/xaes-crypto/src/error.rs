//! Error types for XAES-256-GCM operations

use thiserror::Error;

/// Errors from seal and open
///
/// Messages never include key, nonce or message bytes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum XaesError {
    /// Master key is not 32 bytes
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length
        expected: usize,
        /// Actual key length
        actual: usize,
    },

    /// Nonce is not 24 bytes
    #[error("invalid nonce length: expected {expected}, got {actual}")]
    InvalidNonceLength {
        /// Expected nonce length
        expected: usize,
        /// Actual nonce length
        actual: usize,
    },

    /// Sealed message is shorter than the authentication tag
    #[error("invalid ciphertext length: need at least {minimum}, got {actual}")]
    InvalidCiphertextLength {
        /// Minimum sealed message length
        minimum: usize,
        /// Actual sealed message length
        actual: usize,
    },

    /// Message exceeds the AES-GCM length limit
    #[error("message too large: limit is {max} bytes, got {actual}")]
    MessageTooLarge {
        /// Largest accepted plaintext length
        max: u64,
        /// Actual plaintext length
        actual: u64,
    },

    /// CMAC key setup failed during subkey derivation
    #[error("subkey derivation failed")]
    DerivationFailure,

    /// Output buffer could not be reserved
    #[error("allocation of {requested} bytes failed")]
    AllocationFailure {
        /// Requested buffer size
        requested: usize,
    },

    /// Authentication tag did not verify (wrong key, nonce, AAD or tampering)
    #[error("message authentication failed")]
    AuthenticationFailure,

    /// AES-GCM broke its contract (unexpected output length or failure)
    #[error("internal invariant violated: {reason}")]
    InternalInvariantViolation {
        /// What went wrong
        reason: &'static str,
    },
}

impl XaesError {
    /// Returns true if this error is fatal (unrecoverable)
    ///
    /// Fatal errors point at the environment or the underlying primitives,
    /// not at the caller's input. None of these are retried at this layer.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::DerivationFailure => true,
            Self::AllocationFailure { .. } => true,
            Self::InternalInvariantViolation { .. } => true,

            // Caller input or tampered message
            Self::InvalidKeyLength { .. } => false,
            Self::InvalidNonceLength { .. } => false,
            Self::InvalidCiphertextLength { .. } => false,
            Self::MessageTooLarge { .. } => false,
            Self::AuthenticationFailure => false,
        }
    }
}
