// src/bin/dictocrypt.rs
//! dictocrypt CLI — encrypt a secret to a key/bundle file pair, or decrypt one

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dictocrypt::{
    decrypt_from_files, encrypt_to_files, generate_key, load_config, NamingPolicy, Payload,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dictocrypt", version, about = "Encrypt small secrets to disk")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Encrypt a secret under a fresh key, writing the key and bundle files
    Encrypt(EncryptArgs),
    /// Decrypt a bundle file with its key file
    Decrypt(DecryptArgs),
    /// Print a freshly generated key
    Keygen,
}

#[derive(Debug, Args)]
struct EncryptArgs {
    #[command(flatten)]
    source: Source,

    /// Directory to write into (defaults to config, then the working directory)
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Base name for the two files
    #[arg(long)]
    description: Option<String>,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct Source {
    /// Plain text secret
    #[arg(long)]
    text: Option<String>,

    /// JSON document, stored structured
    #[arg(long)]
    json: Option<String>,

    /// Read the secret text from a file
    #[arg(long)]
    input: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct DecryptArgs {
    #[arg(long)]
    key: PathBuf,

    #[arg(long)]
    bundle: PathBuf,

    /// Reject bundles older than this many seconds
    #[arg(long)]
    ttl: Option<u64>,

    /// Pretty-print structured payloads
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config().context("Failed to load configuration")?;

    match cli.command {
        Command::Encrypt(args) => {
            let payload = read_payload(args.source)?;
            let naming = match args.description {
                Some(description) => NamingPolicy {
                    description,
                    ..config.naming_policy()
                },
                None => config.naming_policy(),
            };
            let dir = args.dir.or_else(|| config.storage.save_dir.clone());

            let files = encrypt_to_files(&payload, dir.as_deref(), &naming, &config.fs_storage())
                .context("Encryption failed")?;

            info!(kind = payload.kind(), "secret stored");
            println!("{}", files.key_path.display());
            println!("{}", files.bundle_path.display());
        }
        Command::Decrypt(args) => {
            let ttl = args.ttl.map(Duration::from_secs).or_else(|| config.ttl());
            let payload = decrypt_from_files(&args.key, &args.bundle, ttl, &config.fs_storage())
                .with_context(|| format!("Failed to decrypt {}", args.bundle.display()))?;

            match (&payload, args.pretty) {
                (Payload::Structured(value), true) => {
                    println!("{}", serde_json::to_string_pretty(value)?)
                }
                _ => println!("{payload}"),
            }
        }
        Command::Keygen => {
            println!("{}", generate_key().encode());
        }
    }

    Ok(())
}

fn read_payload(source: Source) -> Result<Payload> {
    if let Some(text) = source.text {
        return Ok(Payload::Text(text));
    }
    if let Some(json) = source.json {
        let value: serde_json::Value =
            serde_json::from_str(&json).context("--json is not valid JSON")?;
        return Ok(Payload::Structured(value));
    }
    let path = source
        .input
        .context("one of --text, --json or --input is required")?;
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(Payload::Text(text))
}
