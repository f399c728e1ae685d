//! Command-line interface for `rijncode`.

#![forbid(unsafe_code)]

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use basen_stream::{alphabet, BaseNDecoder, Grouper, GrouperOptions, Sink};
use clap::{Parser, Subcommand, ValueEnum};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rijndael_core::{BlockFlags, Direction, Rijndael, BLOCK_SIZE};

/// Rijndael + base-N codec CLI.
#[derive(Parser)]
#[command(
    name = "rijncode",
    version,
    author,
    about = "Rijndael block processing and base-N encoding"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Codec {
    Base64,
    Base64url,
    Base32,
    Hex,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file of 16-byte blocks with a raw key.
    Encrypt {
        /// Key as 32, 48, or 64 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Input file (must be a multiple of 16 bytes).
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output ciphertext path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Decrypt a file of 16-byte blocks with a raw key.
    Decrypt {
        /// Key as 32, 48, or 64 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Input file (must be a multiple of 16 bytes).
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output plaintext path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Generate keystream blocks from a counter.
    Keystream {
        /// Key as 32, 48, or 64 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Initial 16-byte counter as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        counter_hex: String,
        /// Number of bytes to emit (rounded down to whole blocks).
        #[arg(long, default_value_t = 64)]
        length: usize,
        /// Output path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Encode a file with one of the preset transforms.
    Encode {
        /// Transform to apply.
        #[arg(long, value_enum, default_value_t = Codec::Base64)]
        codec: Codec,
        /// Insert a separator every N output characters.
        #[arg(long, default_value_t = 0)]
        group: usize,
        /// Separator between groups.
        #[arg(long, default_value = " ")]
        separator: String,
        /// Input file.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output file.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Decode a file with one of the preset transforms.
    Decode {
        /// Transform to reverse.
        #[arg(long, value_enum, default_value_t = Codec::Base64)]
        codec: Codec,
        /// Input file.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output file.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Run a local demo: encrypt, decrypt, and base64-print a random block.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Encrypt {
            key_hex,
            input,
            output,
        } => cmd_process(&key_hex, Direction::Encryption, &input, &output),
        Commands::Decrypt {
            key_hex,
            input,
            output,
        } => cmd_process(&key_hex, Direction::Decryption, &input, &output),
        Commands::Keystream {
            key_hex,
            counter_hex,
            length,
            output,
        } => cmd_keystream(&key_hex, &counter_hex, length, &output),
        Commands::Encode {
            codec,
            group,
            separator,
            input,
            output,
        } => cmd_encode(codec, group, &separator, &input, &output),
        Commands::Decode {
            codec,
            input,
            output,
        } => cmd_decode(codec, &input, &output),
        Commands::Demo { seed } => cmd_demo(seed),
    }
}

fn cmd_process(
    key_hex: &str,
    direction: Direction,
    input_path: &PathBuf,
    output_path: &PathBuf,
) -> Result<()> {
    let cipher = parse_cipher(key_hex, direction)?;
    let data = fs::read(input_path).with_context(|| format!("read {}", input_path.display()))?;
    if data.len() % BLOCK_SIZE != 0 {
        bail!("input length must be a multiple of 16 bytes");
    }
    let mut out = vec![0u8; data.len()];
    let left = cipher.advanced_process_blocks(&data, None, &mut out, data.len(), BlockFlags::empty());
    debug_assert_eq!(left, 0);
    fs::write(output_path, out).with_context(|| format!("write {}", output_path.display()))?;
    Ok(())
}

fn cmd_keystream(
    key_hex: &str,
    counter_hex: &str,
    length: usize,
    output_path: &PathBuf,
) -> Result<()> {
    let cipher = parse_cipher(key_hex, Direction::Encryption)?;
    let counter = hex::decode(counter_hex.trim()).context("decode counter hex")?;
    if counter.len() != BLOCK_SIZE {
        bail!("counter must be 16 bytes (32 hex characters)");
    }
    let whole = length - length % BLOCK_SIZE;
    let mut out = vec![0u8; whole];
    cipher.advanced_process_blocks(
        &counter,
        None,
        &mut out,
        whole,
        BlockFlags::IN_BLOCK_IS_COUNTER,
    );
    fs::write(output_path, out).with_context(|| format!("write {}", output_path.display()))?;
    Ok(())
}

fn cmd_encode(
    codec: Codec,
    group: usize,
    separator: &str,
    input_path: &PathBuf,
    output_path: &PathBuf,
) -> Result<()> {
    let data = fs::read(input_path).with_context(|| format!("read {}", input_path.display()))?;
    let grouper = Grouper::new(
        GrouperOptions {
            group_size: group,
            separator: Some(separator.as_bytes()),
            terminator: b"\n",
        },
        Vec::new(),
    )?;
    let grouper = run_encoder(codec, grouper, &data)?;
    fs::write(output_path, grouper.into_inner())
        .with_context(|| format!("write {}", output_path.display()))?;
    Ok(())
}

fn run_encoder<S: Sink>(codec: Codec, sink: S, data: &[u8]) -> Result<S> {
    let mut encoder = match codec {
        Codec::Base64 => alphabet::base64_encoder(sink),
        Codec::Base64url => alphabet::base64_url_encoder(sink),
        Codec::Base32 => alphabet::base32_encoder(sink),
        Codec::Hex => alphabet::hex_encoder(sink),
    }?;
    let left = encoder.put(data, true);
    debug_assert_eq!(left, 0);
    Ok(encoder.into_inner())
}

fn cmd_decode(codec: Codec, input_path: &PathBuf, output_path: &PathBuf) -> Result<()> {
    let data = fs::read(input_path).with_context(|| format!("read {}", input_path.display()))?;
    let mut decoder: BaseNDecoder<Vec<u8>> = match codec {
        Codec::Base64 => alphabet::base64_decoder(Vec::new()),
        Codec::Base64url => alphabet::base64_url_decoder(Vec::new()),
        Codec::Base32 => alphabet::base32_decoder(Vec::new()),
        Codec::Hex => alphabet::hex_decoder(Vec::new()),
    }?;
    let left = decoder.put(&data, true);
    debug_assert_eq!(left, 0);
    fs::write(output_path, decoder.into_inner())
        .with_context(|| format!("write {}", output_path.display()))?;
    Ok(())
}

fn cmd_demo(seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let mut key = [0u8; 32];
    rng.fill_bytes(&mut key);
    let mut block = [0u8; BLOCK_SIZE];
    rng.fill_bytes(&mut block);

    let enc = Rijndael::new(&key, Direction::Encryption).context("key encryption instance")?;
    let dec = Rijndael::new(&key, Direction::Decryption).context("key decryption instance")?;

    let mut cipher_text = [0u8; BLOCK_SIZE];
    enc.process_and_xor_block(&block, None, &mut cipher_text);
    let mut decrypted = [0u8; BLOCK_SIZE];
    dec.process_and_xor_block(&cipher_text, None, &mut decrypted);

    let mut encoder = alphabet::base64_encoder(Vec::new())?;
    encoder.put(&cipher_text, true);
    let encoded = encoder.into_inner();

    println!("demo key: {}", hex::encode(key));
    println!("plaintext: {}", hex::encode(block));
    println!("ciphertext: {}", hex::encode(cipher_text));
    println!("ciphertext (base64): {}", String::from_utf8_lossy(&encoded));
    println!("decrypted: {}", hex::encode(decrypted));
    if decrypted != block {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn parse_cipher(key_hex: &str, direction: Direction) -> Result<Rijndael> {
    let key = hex::decode(key_hex.trim()).context("decode key hex")?;
    if !matches!(key.len(), 16 | 24 | 32) {
        bail!("key must be 16, 24, or 32 bytes (32, 48, or 64 hex characters)");
    }
    Rijndael::new(&key, direction).context("key cipher instance")
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
