//! Vellum command-line tool.
//!
//! # Usage
//!
//! ```bash
//! # Generate a key
//! export VELLUM_KEY=$(vellum keygen)
//!
//! # Issue a token bound to a context
//! vellum encrypt --footer '{"kid":"k1"}' --implicit 'user:42' '{"sub":"alice"}'
//!
//! # Open it again
//! vellum decrypt --implicit 'user:42' v4.local.AAAA...
//! ```
//!
//! Content and tokens are read from stdin when not given as arguments.

mod commands;
mod config;
mod error;

use std::io::{self, Read, Write};

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use vellum_crypto::SystemEntropy;

use crate::config::{Args, Command};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    let mut stdout = io::stdout().lock();

    match args.command {
        Command::Keygen => {
            writeln!(stdout, "{}", commands::keygen(&SystemEntropy))?;
        },
        Command::Encrypt(encrypt) => {
            let key = encrypt.key.load()?;
            let content = match &encrypt.content {
                Some(content) => content.as_bytes().to_vec(),
                None => read_stdin()?,
            };

            let token = commands::encrypt(&encrypt, &key, content, &SystemEntropy)?;
            writeln!(stdout, "{token}")?;
        },
        Command::Decrypt(decrypt) => {
            let key = decrypt.key.load()?;
            let token = match &decrypt.token {
                Some(token) => token.clone(),
                None => String::from_utf8(read_stdin()?).map_err(|_| error::CliError::NonUtf8Token)?,
            };

            let packet = commands::decrypt(&decrypt, &key, token.trim())?;
            stdout.write_all(&packet.content)?;

            if decrypt.show_footer {
                let mut stderr = io::stderr().lock();
                stderr.write_all(b"footer: ")?;
                stderr.write_all(&packet.footer)?;
                writeln!(stderr)?;
            }
        },
    }

    stdout.flush()?;
    Ok(())
}

fn read_stdin() -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    io::stdin().lock().read_to_end(&mut buf)?;
    Ok(buf)
}
