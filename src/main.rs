// This is my main entry point for the extrinsic CLI
// Every command prints JSON (or plain hex) on stdout so it can be piped into other tools
use chainx_extrinsic::cli::TransferArgs;
use chainx_extrinsic::{
    extrinsic_hash, hex_decode, hex_encode_prefixed, sign, BlockDigest, Command, Extrinsic,
    HexAddressCodec, Opt, Signer, SkipPolicy, Transaction, TransferParams, GLOBAL_CONFIG,
};
use clap::Parser;
use log::{error, info, LevelFilter};
use serde_json::json;
use std::process;

fn main() {
    let opt = Opt::parse();

    // I load the settings file before the logger so the file can pick the log level,
    // but I only report a failure once the logger is up
    let loaded = match &opt.config {
        Some(path) => GLOBAL_CONFIG.load_toml_file(path),
        None => Ok(()),
    };
    let level = GLOBAL_CONFIG.get_log_level().unwrap_or(LevelFilter::Info);
    env_logger::builder().filter_level(level).init();

    if let Err(e) = loaded {
        error!("Error: {e}");
        process::exit(1);
    }

    // If something goes wrong, I log the error and exit with code 1
    if let Err(e) = run_command(opt.command) {
        error!("Error: {e}");
        process::exit(1);
    }
}

// I turn the shared transfer flags into a Transaction, falling back to the
// configured acceleration and call index when the flags leave them out
fn build_transaction(from: String, args: TransferArgs) -> Result<Transaction, Box<dyn std::error::Error>> {
    let params = TransferParams {
        from,
        to: args.to,
        token: args.token,
        amount: args.amount,
        nonce: args.nonce,
        memo: args.memo,
    };
    let acceleration = match args.acceleration {
        Some(acceleration) => acceleration,
        None => GLOBAL_CONFIG.get_acceleration()?,
    };
    let tx = Transaction::from_params(&params, &HexAddressCodec)?
        .with_acceleration(acceleration)
        .with_call_index(GLOBAL_CONFIG.get_transfer_call_index()?);
    Ok(tx)
}

fn print_json(value: &impl serde::Serialize) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_command(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        // Parse one extrinsic and show it next to its txid
        Command::Decode { hex } => {
            let raw = hex_decode(&hex)?;
            let extrinsic = Extrinsic::decode(&raw)?;
            print_json(&json!({
                "txid": hex_encode_prefixed(&extrinsic_hash(&raw)),
                "extrinsic": extrinsic,
            }))?;
        }
        Command::Digest {
            extrinsics,
            skip_malformed,
        } => {
            let policy = if skip_malformed {
                SkipPolicy::SkipMalformed
            } else {
                SkipPolicy::Abort
            };
            let digest = BlockDigest::from_extrinsics(&extrinsics, policy)?;
            print_json(&digest)?;
        }
        Command::Pubkey { seed } => {
            let signer = Signer::from_seed_hex(&seed)?;
            println!("{}", hex_encode_prefixed(&signer.public_key()));
        }
        // This is the payload an offline signer has to sign
        Command::Payload { from, transfer } => {
            let block_hash = transfer.block_hash.clone();
            let tx = build_transaction(from, transfer)?;
            let payload = tx.signature_payload(&block_hash)?;
            println!("{}", payload.to_hex());
        }
        Command::Sign { seed, payload } => {
            let payload = hex_decode(&payload)?;
            let signature = sign(&seed, &payload)?;
            println!("{}", hex_encode_prefixed(&signature));
        }
        Command::Combine {
            from,
            signature,
            transfer,
        } => {
            let tx = build_transaction(from, transfer)?;
            let signed = tx.combine(&signature)?;
            print_json(&json!({ "txid": signed.txid(), "extrinsic": signed.to_hex() }))?;
        }
        // I derive the sender from the seed so the key and the sender always agree
        Command::Transfer { seed, transfer } => {
            let signer = Signer::from_seed_hex(&seed)?;
            let from = hex_encode_prefixed(&signer.public_key());
            let block_hash = transfer.block_hash.clone();
            let tx = build_transaction(from, transfer)?;
            let signed = tx.sign_and_combine(&signer, &block_hash)?;
            info!("Signed transfer of {} {} with nonce {}", tx.amount, tx.token, tx.nonce);
            print_json(&json!({ "txid": signed.txid(), "extrinsic": signed.to_hex() }))?;
        }
    }
    Ok(())
}
