//! bipkey CLI
//!
//! Generates and restores deterministic RSA/ECC private keys from 24-word
//! BIP-39 mnemonics, for secure key backup and recovery in offline
//! certificate authorities. The operator keeps the mnemonic and the salt;
//! this tool rebuilds the identical key from them on demand.

use anyhow::{bail, Context, Result};
use bipkey_keys::{
    generate, restore, supported_ecc, supported_rsa, CancelToken, EccCurve, Key, KeyKind, Mnemonic, RsaSize,
    MNEMONIC_WORDS,
};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Number of mnemonic words shown per display row.
const DISPLAY_COLS: usize = 6;

#[derive(Parser)]
#[command(name = "bipkey")]
#[command(version)]
#[command(about = "Generate and restore RSA/ECC private keys from BIP-39 mnemonics")]
#[command(
    long_about = "bipkey generates and restores deterministic RSA/ECC private keys from \
                  BIP-39 mnemonics. Used for secure key backup and recovery for offline \
                  Certificate Authorities."
)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// ECC curve to use (256, 384, 521, ed25519, ...)
    #[arg(long, global = true, value_name = "CURVE")]
    ecc: Option<String>,

    /// RSA key size to use (2048, 3072, 4096, 8192)
    #[arg(long, global = true, value_name = "BITS")]
    rsa: Option<String>,

    /// Salt value mixed into the key derivation
    #[arg(long, global = true, default_value = "")]
    salt: String,

    /// Output file for the PEM-encoded key
    #[arg(long, short, global = true, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Encrypt the output key (prompts when given no value)
    #[arg(long, global = true, value_name = "PASSWORD", num_args = 0..=1, default_missing_value = "")]
    password: Option<String>,

    /// Enable verbose logging output
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new private key and mnemonic
    Generate,
    /// Restore a private key from an existing mnemonic
    Restore {
        /// Existing 24-word mnemonic (first 4 letters of each word suffice)
        #[arg(long, short)]
        mnemonic: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let kind = resolve_kind(&cli)?;
    if cli.salt.is_empty() {
        tracing::warn!("no salt value provided; a salt is recommended for better security");
    } else if cli.salt.len() < 12 {
        tracing::warn!("salt values of at least 12 characters are recommended for better security");
    }

    let cancel = CancelToken::new();
    let mut key = match &cli.command {
        Commands::Generate => generate(kind, &cli.salt, &cancel)?,
        Commands::Restore { mnemonic } => {
            let phrase = match mnemonic {
                Some(phrase) => phrase.clone(),
                None => prompt_mnemonic()?,
            };
            let mnemonic = Mnemonic::parse(&phrase)?;
            restore(kind, &cli.salt, mnemonic, &cancel)?
        }
    };

    if let Some(password) = resolve_password(&cli)? {
        key.encrypt(&password)?;
    }

    display(&key)?;

    if let Some(path) = &cli.out {
        fs::write(path, key.pem()?.as_bytes())
            .with_context(|| format!("failed to write key to {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote PEM-encoded key");
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).with_writer(io::stderr).init();
}

/// Resolve exactly one key kind from the --ecc / --rsa flags.
fn resolve_kind(cli: &Cli) -> Result<KeyKind> {
    let curve = EccCurve::parse(cli.ecc.as_deref().unwrap_or("")).map_err(|err| {
        eprintln!("{}", supported_ecc());
        err
    })?;
    let size = RsaSize::parse(cli.rsa.as_deref().unwrap_or("")).map_err(|err| {
        eprintln!("{}", supported_rsa());
        err
    })?;

    match (curve, size) {
        (Some(curve), None) => Ok(KeyKind::Ecc(curve)),
        (None, Some(size)) => Ok(KeyKind::Rsa(size)),
        (None, None) => bail!("at least one of --ecc or --rsa must be specified"),
        (Some(_), Some(_)) => bail!("only one of --ecc or --rsa may be specified"),
    }
}

/// Resolve the encryption password, prompting when the flag carried no value.
fn resolve_password(cli: &Cli) -> Result<Option<String>> {
    match cli.password.as_deref() {
        None => Ok(None),
        Some("") => {
            let password = rpassword::prompt_password("Password for the encrypted key: ")
                .context("failed to read password")?;
            if password.is_empty() {
                bail!("password must not be empty");
            }
            Ok(Some(password))
        }
        Some(password) => Ok(Some(password.to_string())),
    }
}

/// Prompt for the 24-word mnemonic on stdin.
fn prompt_mnemonic() -> Result<String> {
    if io::stdin().is_terminal() {
        println!("Please enter your {MNEMONIC_WORDS}-word mnemonic recovery key in order (separated by spaces):");
        io::stdout().flush().ok();
    }

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).context("failed to read mnemonic input")?;
    println!();
    Ok(line.trim().to_string())
}

/// Print the key details: kind, salt, mnemonic words and the PEM body.
fn display(key: &Key) -> Result<()> {
    println!("Key Type: {}", key.kind().family());
    println!("Key Size: {}", key.kind().bits());
    if key.salt().is_empty() {
        println!("Key Salt: (none)");
    } else {
        println!("Key Salt: \"{}\"", key.salt());
    }

    let words = key.mnemonic().words();
    let width = words.iter().map(|word| word.len()).max().unwrap_or(0) + 1;

    println!();
    println!("Mnemonic Words:");
    for (i, word) in words.iter().enumerate() {
        print!("{:02}: {:<width$}", i + 1, word);
        if i % DISPLAY_COLS == DISPLAY_COLS - 1 {
            println!();
        }
    }
    println!();
    println!("{}", key.mnemonic());

    println!();
    println!("Private Key (PEM):");
    println!();

    let fingerprint = key.fingerprint()?;
    tracing::debug!(%fingerprint, "generated key fingerprint");
    println!("{}", key.pem()?.as_str());

    Ok(())
}
