//! Construction constants for XAES-256-GCM
//!
//! These values define the construction. They are not configuration.

/// Master key size (AES-256)
pub const KEY_SIZE: usize = 32;

/// Extended nonce size (192 bits)
pub const NONCE_SIZE: usize = 24;

/// Nonce bytes consumed by subkey derivation
pub const NONCE_PREFIX_SIZE: usize = 12;

/// Nonce bytes passed to AES-256-GCM
pub const NONCE_SUFFIX_SIZE: usize = NONCE_SIZE - NONCE_PREFIX_SIZE;

/// GCM authentication tag size (16 bytes)
pub const TAG_SIZE: usize = 16;

/// Bytes added to every sealed message.
pub const OVERHEAD: usize = TAG_SIZE;

/// Largest plaintext AES-GCM accepts under one key/nonce (2^39 - 256 bits).
pub const MAX_PLAINTEXT_SIZE: u64 = (1 << 36) - 32;

/// AES-CMAC output size
pub(crate) const MAC_OUTPUT_SIZE: usize = 16;

/// 16-bit big-endian KDF counters, one per CMAC block of derived key
pub(crate) const KDF_COUNTERS: [[u8; 2]; KEY_SIZE / MAC_OUTPUT_SIZE] = [[0x00, 0x01], [0x00, 0x02]];

/// KDF label
pub(crate) const KDF_LABEL: u8 = b'X';

/// Separator between label and context (the nonce prefix)
pub(crate) const KDF_SEPARATOR: u8 = 0x00;
