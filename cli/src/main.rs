// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # algotx
//!
//! Entry point for the `algotx` binary. Parses CLI arguments, initializes
//! logging, and dispatches to the library.
//!
//! - `pay`          build a payment
//! - `keyreg`       build a key registration
//! - `asset-create` build an asset creation
//! - `group`        bind a JSON array of transactions into an atomic group
//! - `account`      generate a throwaway account
//! - `version`      print build version information

mod cli;
mod logging;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use clap::Parser;
use std::path::Path;

use algotx_protocol::crypto::Keypair;
use algotx_protocol::transaction::{
    assign_group_id, make_asset_create_txn, make_asset_create_txn_with_flat_fee,
    make_key_reg_txn, make_key_reg_txn_with_flat_fee, make_payment_txn,
    make_payment_txn_with_flat_fee, Transaction,
};

use cli::{AlgotxCli, Commands, NetworkArgs};
use logging::LogFormat;

fn main() -> Result<()> {
    let cli = AlgotxCli::parse();
    logging::init_logging(
        "algotx=info,algotx_protocol=info",
        LogFormat::from_str_lossy(&cli.log_format),
    );

    match cli.command {
        Commands::Pay(args) => run_pay(args),
        Commands::Keyreg(args) => run_keyreg(args),
        Commands::AssetCreate(args) => run_asset_create(args),
        Commands::Group(args) => run_group(args),
        Commands::Account => {
            run_account();
            Ok(())
        }
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

fn note_bytes(network: &NetworkArgs) -> Option<&[u8]> {
    network.note.as_deref().map(str::as_bytes)
}

fn run_pay(args: cli::PayArgs) -> Result<()> {
    let net = &args.network;
    let genesis_hash = STANDARD
        .decode(&net.genesis_hash)
        .context("--genesis-hash is not valid base64")?;
    let build = if net.flat_fee {
        make_payment_txn_with_flat_fee
    } else {
        make_payment_txn
    };
    let tx = build(
        &args.from,
        &args.to,
        net.fee,
        args.amount,
        net.first_round,
        net.last_round,
        note_bytes(net),
        &args.close_to,
        &net.genesis_id,
        &genesis_hash,
    )
    .context("failed to build payment")?;

    tracing::info!(fee = tx.header.fee, "payment built");
    emit(&[tx], net.msgpack)
}

fn run_keyreg(args: cli::KeyRegArgs) -> Result<()> {
    let net = &args.network;
    let build = if net.flat_fee {
        make_key_reg_txn_with_flat_fee
    } else {
        make_key_reg_txn
    };
    let tx = build(
        &args.account,
        net.fee,
        net.first_round,
        net.last_round,
        note_bytes(net),
        &net.genesis_id,
        &net.genesis_hash,
        &args.vote_key,
        &args.selection_key,
        args.vote_first,
        args.vote_last,
        args.vote_key_dilution,
    )
    .context("failed to build key registration")?;

    tracing::info!(fee = tx.header.fee, "key registration built");
    emit(&[tx], net.msgpack)
}

fn run_asset_create(args: cli::AssetCreateArgs) -> Result<()> {
    let net = &args.network;
    let build = if net.flat_fee {
        make_asset_create_txn_with_flat_fee
    } else {
        make_asset_create_txn
    };
    let tx = build(
        &args.creator,
        net.fee,
        net.first_round,
        net.last_round,
        note_bytes(net),
        &net.genesis_id,
        &net.genesis_hash,
        args.total,
        args.default_frozen,
        &args.manager,
        &args.reserve,
        &args.freeze,
        &args.clawback,
        &args.unit_name,
        &args.asset_name,
    )
    .context("failed to build asset creation")?;

    tracing::info!(fee = tx.header.fee, "asset creation built");
    emit(&[tx], net.msgpack)
}

fn run_group(args: cli::GroupArgs) -> Result<()> {
    let txns = load_transactions(&args.file)?;
    let grouped = assign_group_id(&txns, &args.sender).context("failed to assign group id")?;
    if let Some(first) = grouped.first() {
        tracing::info!(
            group = %first.header.group,
            members = txns.len(),
            selected = grouped.len(),
            "group assigned"
        );
    }
    emit(&grouped, args.msgpack)
}

/// Read a JSON array of transactions.
fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of transactions", path.display()))
}

/// Print transactions: one pretty JSON document (single object or array),
/// or one base64 canonical encoding per line.
fn emit(txns: &[Transaction], msgpack: bool) -> Result<()> {
    if msgpack {
        for tx in txns {
            let bytes = tx.encode().context("failed to encode transaction")?;
            println!("{}", STANDARD.encode(bytes));
        }
        return Ok(());
    }

    let json = match txns {
        [single] => serde_json::to_string_pretty(single)?,
        many => serde_json::to_string_pretty(many)?,
    };
    println!("{}", json);
    Ok(())
}

fn run_account() {
    let keypair = Keypair::generate();
    tracing::info!("throwaway account generated");
    println!("Address    : {}", keypair.address());
    println!("Public key : {}", keypair.public_key_hex());
}

fn print_version() {
    println!("algotx {}", env!("CARGO_PKG_VERSION"));
    println!("  library : algotx-protocol");
    println!("  signing : Ed25519");
    println!("  hashing : SHA-512/256");
    println!("  encoding: canonical msgpack");
}
