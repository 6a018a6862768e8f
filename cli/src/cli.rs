//! # CLI Interface
//!
//! Defines the command-line argument structure for `algotx` using `clap`
//! derive. Network parameters can come from the environment so a shell
//! session only has to export them once.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Build, group and inspect ledger transactions.
///
/// Transactions are printed to stdout as JSON, or as base64 canonical
/// msgpack with `--msgpack`. Logs go to stderr.
#[derive(Parser, Debug)]
#[command(
    name = "algotx",
    about = "Build, group and inspect ledger transactions",
    version,
    propagate_version = true
)]
pub struct AlgotxCli {
    /// Log output format: pretty or json.
    #[arg(long, global = true, env = "ALGOTX_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a payment.
    Pay(PayArgs),
    /// Build a participation key registration.
    Keyreg(KeyRegArgs),
    /// Build an asset creation.
    AssetCreate(AssetCreateArgs),
    /// Assign a group id to a JSON array of transactions.
    Group(GroupArgs),
    /// Generate a throwaway account and print its address.
    Account,
    /// Print version information and exit.
    Version,
}

/// Header parameters shared by every build subcommand.
#[derive(Args, Debug, Clone)]
pub struct NetworkArgs {
    /// Fee per encoded byte, or the total fee with `--flat-fee`.
    #[arg(long, default_value_t = 0)]
    pub fee: u64,

    /// Treat `--fee` as a flat total.
    #[arg(long)]
    pub flat_fee: bool,

    /// First round the transaction is valid.
    #[arg(long)]
    pub first_round: u64,

    /// Last round the transaction is valid.
    #[arg(long)]
    pub last_round: u64,

    /// Network identifier, e.g. `testnet-v1.0`.
    #[arg(long, env = "ALGOTX_GENESIS_ID", default_value = "")]
    pub genesis_id: String,

    /// Base64 genesis hash of the network.
    #[arg(long, env = "ALGOTX_GENESIS_HASH")]
    pub genesis_hash: String,

    /// UTF-8 note to attach.
    #[arg(long)]
    pub note: Option<String>,

    /// Print base64 canonical msgpack instead of JSON.
    #[arg(long)]
    pub msgpack: bool,
}

/// Arguments for the `pay` subcommand.
#[derive(Parser, Debug)]
pub struct PayArgs {
    /// Sender address.
    #[arg(long)]
    pub from: String,

    /// Receiver address.
    #[arg(long)]
    pub to: String,

    /// Amount in microunits.
    #[arg(long)]
    pub amount: u64,

    /// Close the sender account to this address.
    #[arg(long, default_value = "")]
    pub close_to: String,

    #[command(flatten)]
    pub network: NetworkArgs,
}

/// Arguments for the `keyreg` subcommand.
#[derive(Parser, Debug)]
pub struct KeyRegArgs {
    /// Account registering the key.
    #[arg(long)]
    pub account: String,

    /// Base64 root participation key. Omit both keys to go offline.
    #[arg(long, default_value = "")]
    pub vote_key: String,

    /// Base64 VRF selection key.
    #[arg(long, default_value = "")]
    pub selection_key: String,

    /// First round the participation key is valid.
    #[arg(long, default_value_t = 0)]
    pub vote_first: u64,

    /// Last round the participation key is valid.
    #[arg(long, default_value_t = 0)]
    pub vote_last: u64,

    /// Key dilution.
    #[arg(long, default_value_t = 0)]
    pub vote_key_dilution: u64,

    #[command(flatten)]
    pub network: NetworkArgs,
}

/// Arguments for the `asset-create` subcommand.
#[derive(Parser, Debug)]
pub struct AssetCreateArgs {
    /// Creator address.
    #[arg(long)]
    pub creator: String,

    /// Total base units.
    #[arg(long)]
    pub total: u64,

    /// New holdings start frozen.
    #[arg(long)]
    pub default_frozen: bool,

    /// Manager address.
    #[arg(long, default_value = "")]
    pub manager: String,

    /// Reserve address.
    #[arg(long, default_value = "")]
    pub reserve: String,

    /// Freeze address.
    #[arg(long, default_value = "")]
    pub freeze: String,

    /// Clawback address.
    #[arg(long, default_value = "")]
    pub clawback: String,

    /// Ticker (at most 8 bytes).
    #[arg(long, default_value = "")]
    pub unit_name: String,

    /// Asset name (at most 32 bytes).
    #[arg(long, default_value = "")]
    pub asset_name: String,

    #[command(flatten)]
    pub network: NetworkArgs,
}

/// Arguments for the `group` subcommand.
#[derive(Parser, Debug)]
pub struct GroupArgs {
    /// JSON file holding an array of transactions.
    pub file: PathBuf,

    /// Only print the members sent by this address.
    #[arg(long, default_value = "")]
    pub sender: String,

    /// Print base64 canonical msgpack instead of JSON.
    #[arg(long)]
    pub msgpack: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        AlgotxCli::command().debug_assert();
    }

    #[test]
    fn parses_pay() {
        let cli = AlgotxCli::try_parse_from([
            "algotx",
            "pay",
            "--from",
            "A",
            "--to",
            "B",
            "--amount",
            "5",
            "--first-round",
            "1",
            "--last-round",
            "2",
            "--genesis-hash",
            "AAAA",
            "--flat-fee",
            "--fee",
            "2000",
        ])
        .unwrap();
        match cli.command {
            Commands::Pay(args) => {
                assert_eq!(args.amount, 5);
                assert!(args.network.flat_fee);
                assert_eq!(args.network.fee, 2_000);
                assert!(args.close_to.is_empty());
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
