//! Fuzz target for opening attacker-controlled input
//!
//! # Invariants
//!
//! - Open never panics
//! - Random bytes never authenticate
//! - Length errors are reported only for inputs shorter than the tag

#![no_main]

use libfuzzer_sys::fuzz_target;
use xaes_crypto::{open, XaesError, KEY_SIZE, NONCE_SIZE, TAG_SIZE};

fuzz_target!(|data: &[u8]| {
    if data.len() < KEY_SIZE + NONCE_SIZE {
        return;
    }
    let (key, rest) = data.split_at(KEY_SIZE);
    let (nonce, sealed) = rest.split_at(NONCE_SIZE);

    match open(key, nonce, sealed) {
        Err(XaesError::InvalidCiphertextLength { actual, .. }) => {
            assert!(actual < TAG_SIZE, "length error for {actual}-byte input");
        },
        Err(XaesError::AuthenticationFailure) => {},
        Err(err) => panic!("unexpected error: {err}"),
        // 2^-128 per input
        Ok(_) => panic!("forged message authenticated"),
    }
});
