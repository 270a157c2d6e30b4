use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "chainx-extrinsic")]
pub struct Opt {
    #[arg(long = "config", global = true, help = "TOML settings file")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

/// Fields shared by every command that assembles a transfer
#[derive(Args, Debug, Clone)]
pub struct TransferArgs {
    #[arg(long, help = "Recipient public key (0x-hex)")]
    pub to: String,
    #[arg(long, default_value = "PCX", help = "Token symbol")]
    pub token: String,
    #[arg(long, help = "Amount in the token's smallest unit")]
    pub amount: u64,
    #[arg(long, help = "Sender account nonce")]
    pub nonce: u32,
    #[arg(long, default_value = "", help = "Transfer memo")]
    pub memo: String,
    #[arg(long = "block-hash", help = "32-byte block hash the signature is bound to")]
    pub block_hash: String,
    #[arg(long, help = "Fee acceleration, overrides the configured value")]
    pub acceleration: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(name = "decode", about = "Parse a raw extrinsic and print it as JSON")]
    Decode {
        #[arg(help = "Extrinsic bytes as hex, with or without 0x")]
        hex: String,
    },
    #[command(name = "digest", about = "Extract timestamp and transfers from a block's extrinsics")]
    Digest {
        #[arg(required = true, help = "Extrinsics of one block, in order")]
        extrinsics: Vec<String>,
        #[arg(long = "skip-malformed", help = "Log and skip extrinsics that fail to parse")]
        skip_malformed: bool,
    },
    #[command(name = "pubkey", about = "Derive the public key of a seed")]
    Pubkey {
        #[arg(long, help = "32-byte ed25519 seed as hex")]
        seed: String,
    },
    #[command(name = "payload", about = "Build the signature payload of a transfer")]
    Payload {
        #[arg(long, help = "Sender public key (0x-hex)")]
        from: String,
        #[command(flatten)]
        transfer: TransferArgs,
    },
    #[command(name = "sign", about = "Sign a payload with a seed")]
    Sign {
        #[arg(long, help = "32-byte ed25519 seed as hex")]
        seed: String,
        #[arg(help = "Signature payload as hex")]
        payload: String,
    },
    #[command(name = "combine", about = "Attach a detached signature to a transfer")]
    Combine {
        #[arg(long, help = "Sender public key (0x-hex)")]
        from: String,
        #[arg(long, help = "64-byte signature as hex")]
        signature: String,
        #[command(flatten)]
        transfer: TransferArgs,
    },
    #[command(name = "transfer", about = "Build, sign and combine a transfer")]
    Transfer {
        #[arg(long, help = "32-byte ed25519 seed of the sender")]
        seed: String,
        #[command(flatten)]
        transfer: TransferArgs,
    },
}
