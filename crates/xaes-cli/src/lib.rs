//! XAES-256-GCM command-line operations.
//!
//! The `xaes` binary is a thin argument parser over these functions. Keys,
//! nonces, AAD and sealed messages travel as hex strings; plaintexts are
//! UTF-8 arguments.
//!
//! # Commands
//!
//! - [`seal_command`]: Seal a plaintext, drawing a random nonce if none given
//! - [`open_command`]: Verify and decrypt a sealed message
//! - [`demo`]: Fixed-input demonstration with a known output
//!
//! The `write_*` functions render each command's result as lines of text.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use std::io::{self, Write};

use thiserror::Error;
use xaes_crypto::{KEY_SIZE, MasterKey, NONCE_SIZE, XAes256Gcm, XNonce, XaesError};
use zeroize::Zeroizing;

/// Demonstration key: 32 bytes of `0x01`
pub const DEMO_KEY: [u8; KEY_SIZE] = [0x01; KEY_SIZE];

/// Demonstration nonce: 24 bytes of `0x42`
pub const DEMO_NONCE: [u8; NONCE_SIZE] = [0x42; NONCE_SIZE];

/// Demonstration plaintext
pub const DEMO_PLAINTEXT: &str = "Hello, XAES-256-GCM!";

/// Errors from command-line operations
#[derive(Debug, Error)]
pub enum CliError {
    /// An argument was not valid hex
    #[error("invalid hex in {field}: {source}")]
    Hex {
        /// Argument name
        field: &'static str,
        /// Decoder error
        source: hex::FromHexError,
    },

    /// Seal or open failed
    #[error(transparent)]
    Crypto(#[from] XaesError),

    /// The OS could not supply a random nonce
    #[error("OS randomness unavailable: {0}")]
    Randomness(getrandom::Error),

    /// Writing the result failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result of sealing: the nonce must travel with the sealed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealOutput {
    /// Nonce used (caller-supplied or random)
    pub nonce: XNonce,
    /// `ciphertext || tag`
    pub sealed: Vec<u8>,
}

/// Result of the demonstration routine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoOutput {
    /// Sealed demonstration plaintext
    pub sealed: Vec<u8>,
    /// Plaintext recovered by opening `sealed`
    pub opened: Vec<u8>,
}

/// Decode a hex argument, naming the argument on failure.
pub fn decode_hex(field: &'static str, value: &str) -> Result<Vec<u8>, CliError> {
    hex::decode(value.trim()).map_err(|source| CliError::Hex { field, source })
}

/// Draw a 24-byte nonce from the OS RNG.
pub fn random_nonce() -> Result<XNonce, CliError> {
    let mut nonce = [0u8; NONCE_SIZE];
    getrandom::fill(&mut nonce).map_err(CliError::Randomness)?;
    Ok(XNonce::from(nonce))
}

/// Seal `plaintext` under a hex key.
///
/// Without `nonce_hex` a random nonce is drawn, which is safe at 192 bits.
pub fn seal_command(
    key_hex: &str,
    nonce_hex: Option<&str>,
    aad_hex: Option<&str>,
    plaintext: &str,
) -> Result<SealOutput, CliError> {
    let cipher = keyed_cipher(key_hex)?;
    let nonce = match nonce_hex {
        Some(value) => XNonce::from_slice(&decode_hex("nonce", value)?)?,
        None => {
            tracing::debug!("no nonce given, drawing one from the OS RNG");
            random_nonce()?
        },
    };
    let aad = decode_aad(aad_hex)?;

    let sealed = cipher.seal(&nonce, plaintext.as_bytes(), &aad)?;
    tracing::info!(plaintext_len = plaintext.len(), sealed_len = sealed.len(), "sealed message");

    Ok(SealOutput { nonce, sealed })
}

/// Open a hex-encoded sealed message.
pub fn open_command(
    key_hex: &str,
    nonce_hex: &str,
    aad_hex: Option<&str>,
    sealed_hex: &str,
) -> Result<Zeroizing<Vec<u8>>, CliError> {
    let cipher = keyed_cipher(key_hex)?;
    let nonce = XNonce::from_slice(&decode_hex("nonce", nonce_hex)?)?;
    let aad = decode_aad(aad_hex)?;
    let sealed = decode_hex("ciphertext", sealed_hex)?;

    let opened = cipher.open(&nonce, &sealed, &aad).inspect_err(|err| {
        tracing::warn!(error = %err, "open failed");
    })?;
    tracing::info!(plaintext_len = opened.len(), "opened message");

    Ok(Zeroizing::new(opened))
}

/// Seal and reopen [`DEMO_PLAINTEXT`] under [`DEMO_KEY`] and [`DEMO_NONCE`].
pub fn demo() -> Result<DemoOutput, CliError> {
    let cipher = XAes256Gcm::new(&MasterKey::from(DEMO_KEY))?;
    let nonce = XNonce::from(DEMO_NONCE);

    let sealed = cipher.seal(&nonce, DEMO_PLAINTEXT.as_bytes(), &[])?;
    let opened = cipher.open(&nonce, &sealed, &[])?;

    Ok(DemoOutput { sealed, opened })
}

/// Render plaintext as UTF-8 when possible, otherwise as `hex:`-prefixed hex.
pub fn render_plaintext(plaintext: &[u8]) -> String {
    match std::str::from_utf8(plaintext) {
        Ok(text) => text.to_string(),
        Err(_) => format!("hex:{}", hex::encode(plaintext)),
    }
}

/// Write the nonce and sealed message as `nonce:` and `ciphertext:` lines.
pub fn write_sealed(out: &mut impl Write, output: &SealOutput) -> Result<(), CliError> {
    writeln!(out, "nonce: {}", hex::encode(output.nonce.as_bytes()))?;
    writeln!(out, "ciphertext: {}", hex::encode(&output.sealed))?;
    Ok(())
}

/// Write an opened plaintext on one line.
pub fn write_opened(out: &mut impl Write, plaintext: &[u8]) -> Result<(), CliError> {
    writeln!(out, "{}", render_plaintext(plaintext))?;
    Ok(())
}

/// Write the demonstration's sealed hex, then its recovered plaintext.
pub fn write_demo(out: &mut impl Write, output: &DemoOutput) -> Result<(), CliError> {
    writeln!(out, "{}", hex::encode(&output.sealed))?;
    write_opened(out, &output.opened)
}

fn keyed_cipher(key_hex: &str) -> Result<XAes256Gcm, CliError> {
    let key_bytes = Zeroizing::new(decode_hex("key", key_hex)?);
    let key = MasterKey::from_slice(&key_bytes)?;
    Ok(XAes256Gcm::new(&key)?)
}

fn decode_aad(aad_hex: Option<&str>) -> Result<Vec<u8>, CliError> {
    aad_hex.map_or_else(|| Ok(Vec::new()), |value| decode_hex("aad", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_HEX: &str = "0101010101010101010101010101010101010101010101010101010101010101";
    const NONCE_HEX: &str = "4142434445464748494a4b4c4d4e4f505152535455565758";

    #[test]
    fn demo_matches_known_output() {
        let output = demo().unwrap();

        assert_eq!(
            hex::encode(&output.sealed),
            "01e5f78bc99de880bd2eeff2870d361f0eab5b2fc55268f34b14045878fe3668db980319"
        );
        assert_eq!(output.opened, DEMO_PLAINTEXT.as_bytes());
    }

    #[test]
    fn seal_with_given_nonce_matches_c2sp_vector() {
        let output = seal_command(KEY_HEX, Some(NONCE_HEX), None, "XAES-256-GCM").unwrap();

        assert_eq!(output.nonce.as_bytes(), b"ABCDEFGHIJKLMNOPQRSTUVWX");
        assert_eq!(
            hex::encode(&output.sealed),
            "ce546ef63c9cc60765923609b33a9a1974e96e52daf2fcf7075e2271"
        );
    }

    #[test]
    fn seal_then_open_roundtrip() {
        let aad = Some("c0ffee");
        let output = seal_command(KEY_HEX, Some(NONCE_HEX), aad, "attack at dawn").unwrap();

        let nonce_hex = hex::encode(output.nonce.as_bytes());
        let sealed_hex = hex::encode(&output.sealed);
        let opened = open_command(KEY_HEX, &nonce_hex, aad, &sealed_hex).unwrap();

        assert_eq!(opened.as_slice(), b"attack at dawn");
    }

    #[test]
    fn random_nonces_differ() {
        let a = seal_command(KEY_HEX, None, None, "same").unwrap();
        let b = seal_command(KEY_HEX, None, None, "same").unwrap();

        assert_ne!(a.nonce, b.nonce);
        assert_ne!(a.sealed, b.sealed);
    }

    #[test]
    fn bad_hex_names_the_argument() {
        let err = seal_command("zz", None, None, "x").unwrap_err();
        assert!(matches!(err, CliError::Hex { field: "key", .. }));

        let err = open_command(KEY_HEX, NONCE_HEX, None, "not hex").unwrap_err();
        assert!(matches!(err, CliError::Hex { field: "ciphertext", .. }));
    }

    #[test]
    fn short_key_is_rejected() {
        let err = seal_command("0101", None, None, "x").unwrap_err();
        assert!(matches!(
            err,
            CliError::Crypto(XaesError::InvalidKeyLength { expected: 32, actual: 2 })
        ));
    }

    #[test]
    fn tampered_message_fails_to_open() {
        let output = seal_command(KEY_HEX, Some(NONCE_HEX), None, "hello").unwrap();
        let mut sealed = output.sealed;
        sealed[0] ^= 0x01;

        let err = open_command(KEY_HEX, NONCE_HEX, None, &hex::encode(&sealed)).unwrap_err();
        assert!(matches!(err, CliError::Crypto(XaesError::AuthenticationFailure)));
    }

    #[test]
    fn render_plaintext_falls_back_to_hex() {
        assert_eq!(render_plaintext(b"plain text"), "plain text");
        assert_eq!(render_plaintext(&[0xff, 0x00]), "hex:ff00");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_sealed_emits_labelled_hex() {
        let output = seal_command(KEY_HEX, Some(NONCE_HEX), None, "XAES-256-GCM").unwrap();
        let mut out = Vec::new();

        write_sealed(&mut out, &output).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!(
                "nonce: {NONCE_HEX}\nciphertext: ce546ef63c9cc60765923609b33a9a1974e96e52daf2fcf7075e2271\n"
            )
        );
    }

    #[test]
    fn write_demo_emits_sealed_then_plaintext() {
        let mut out = Vec::new();

        write_demo(&mut out, &demo().unwrap()).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "01e5f78bc99de880bd2eeff2870d361f0eab5b2fc55268f34b14045878fe3668db980319\nHello, XAES-256-GCM!\n"
        );
    }

    #[test]
    fn write_failure_is_an_io_error() {
        let err = write_opened(&mut BrokenPipe, b"hello").unwrap_err();
        assert!(matches!(&err, CliError::Io(source) if source.kind() == io::ErrorKind::BrokenPipe));

        let err = write_demo(&mut BrokenPipe, &demo().unwrap()).unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }

    #[test]
    fn decode_hex_trims_whitespace() {
        assert_eq!(decode_hex("aad", " 0a0b \n").unwrap(), vec![0x0a, 0x0b]);
    }
}
