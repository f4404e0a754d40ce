//! XAES-256-GCM command-line tool.
//!
//! # Usage
//!
//! ```bash
//! # Seal with a random nonce
//! xaes seal --key <64 hex chars> "attack at dawn"
//!
//! # Open
//! xaes open --key <64 hex chars> --nonce <48 hex chars> <ciphertext hex>
//!
//! # Fixed-input demonstration
//! xaes demo
//! ```

use std::io;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use xaes_cli::{
    CliError, demo, open_command, seal_command, write_demo, write_opened, write_sealed,
};

/// XAES-256-GCM: AES-256-GCM with 192-bit nonces
#[derive(Parser, Debug)]
#[command(name = "xaes")]
#[command(about = "Seal and open messages with XAES-256-GCM")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Seal a UTF-8 plaintext
    Seal {
        /// 32-byte master key (hex)
        #[arg(short, long)]
        key: String,

        /// 24-byte nonce (hex); drawn from the OS RNG if omitted
        #[arg(short, long)]
        nonce: Option<String>,

        /// Associated data (hex)
        #[arg(short, long)]
        aad: Option<String>,

        /// Message to seal
        plaintext: String,
    },

    /// Verify and decrypt a sealed message
    Open {
        /// 32-byte master key (hex)
        #[arg(short, long)]
        key: String,

        /// 24-byte nonce (hex)
        #[arg(short, long)]
        nonce: String,

        /// Associated data (hex)
        #[arg(short, long)]
        aad: Option<String>,

        /// Sealed message, ciphertext || tag (hex)
        ciphertext: String,
    },

    /// Seal and reopen a fixed message under a fixed key and nonce
    Demo,
}

fn main() -> Result<(), CliError> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    let mut out = io::stdout().lock();

    match args.command {
        Command::Seal { key, nonce, aad, plaintext } => {
            let output = seal_command(&key, nonce.as_deref(), aad.as_deref(), &plaintext)?;
            write_sealed(&mut out, &output)?;
        },
        Command::Open { key, nonce, aad, ciphertext } => {
            let plaintext = open_command(&key, &nonce, aad.as_deref(), &ciphertext)?;
            write_opened(&mut out, &plaintext)?;
        },
        Command::Demo => {
            write_demo(&mut out, &demo()?)?;
        },
    }

    Ok(())
}
