//! Fuzz target for XAES-256-GCM seal/open
//!
//! Seals arbitrary messages under arbitrary keys and nonces, then mutates the
//! sealed output, key, nonce or AAD before opening.
//!
//! # Invariants
//!
//! - Sealing valid-length inputs never fails
//! - Sealed length is plaintext length + 16
//! - Sealing is deterministic
//! - Unmodified messages open to the original plaintext
//! - Any modification fails with `AuthenticationFailure` and releases nothing

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use xaes_crypto::{open_with_aad, seal_with_aad, XaesError, TAG_SIZE};

#[derive(Debug, Clone, Arbitrary)]
struct SealScenario {
    key: [u8; 32],
    nonce: [u8; 24],
    plaintext: Vec<u8>,
    aad: Vec<u8>,
    mutation: Mutation,
}

#[derive(Debug, Clone, Arbitrary)]
enum Mutation {
    /// Open the message unchanged
    None,
    /// Flip one bit of the sealed message
    FlipBit { bit: u16 },
    /// Flip one bit of the key
    FlipKey { bit: u8 },
    /// Flip one bit of the nonce
    FlipNonce { bit: u8 },
    /// Append a byte to the AAD
    ExtendAad { byte: u8 },
    /// Drop trailing bytes from the sealed message
    Truncate { count: u8 },
}

fuzz_target!(|scenario: SealScenario| {
    let SealScenario { mut key, mut nonce, plaintext, mut aad, mutation } = scenario;

    // INVARIANT 1: Valid-length inputs always seal
    let sealed = seal_with_aad(&key, &nonce, &plaintext, &aad).expect("seal must succeed");

    // INVARIANT 2: Length law
    assert_eq!(sealed.len(), plaintext.len() + TAG_SIZE, "sealed length");

    // INVARIANT 3: Determinism
    let again = seal_with_aad(&key, &nonce, &plaintext, &aad).expect("seal must succeed");
    assert_eq!(sealed, again, "seal must be deterministic");

    let mut tampered = sealed.clone();
    match mutation {
        Mutation::None => {
            // INVARIANT 4: Round trip
            let opened = open_with_aad(&key, &nonce, &sealed, &aad).expect("open must succeed");
            assert_eq!(opened, plaintext, "round trip");
            return;
        },
        Mutation::FlipBit { bit } => {
            let bit = usize::from(bit) % (tampered.len() * 8);
            tampered[bit / 8] ^= 1 << (bit % 8);
        },
        Mutation::FlipKey { bit } => key[usize::from(bit) / 8] ^= 1 << (bit % 8),
        Mutation::FlipNonce { bit } => {
            let bit = usize::from(bit) % (nonce.len() * 8);
            nonce[bit / 8] ^= 1 << (bit % 8);
        },
        Mutation::ExtendAad { byte } => aad.push(byte),
        Mutation::Truncate { count } => {
            let count = usize::from(count).max(1).min(tampered.len());
            tampered.truncate(tampered.len() - count);
        },
    }

    // INVARIANT 5: Any modification is rejected
    match open_with_aad(&key, &nonce, &tampered, &aad) {
        Err(XaesError::AuthenticationFailure) => {},
        Err(XaesError::InvalidCiphertextLength { .. }) => assert!(tampered.len() < TAG_SIZE),
        other => panic!("modified message must not open: {other:?}"),
    }
});
