//! Walkthrough of the transaction library.
//!
//! Creates two throwaway accounts, builds a payment and an asset opt-in,
//! shows how the fee was settled, binds both into an atomic group and signs
//! each side. Uses ANSI escape codes for colored terminal output.
//!
//! Run with:
//!   cargo run -p algotx-protocol --example demo

use std::time::Instant;

use algotx_protocol::config::MIN_TXN_FEE;
use algotx_protocol::crypto::Keypair;
use algotx_protocol::transaction::{
    assign_group_id, estimate_size, sign_transaction, AssetCreateBuilder, AssetTransferBuilder,
    PaymentBuilder, SuggestedParams, Transaction,
};

// ---------------------------------------------------------------------------
// ANSI color constants
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const MAGENTA: &str = "\x1b[35m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

const BG_BLUE: &str = "\x1b[44m";

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

fn banner() {
    println!();
    println!(
        "{BG_BLUE}{BOLD}{WHITE}                                                                    {RESET}"
    );
    println!(
        "{BG_BLUE}{BOLD}{WHITE}    algotx  --  Transaction Construction Demo                       {RESET}"
    );
    println!(
        "{BG_BLUE}{BOLD}{WHITE}    Ed25519 + SHA-512/256 + canonical msgpack                       {RESET}"
    );
    println!(
        "{BG_BLUE}{BOLD}{WHITE}                                                                    {RESET}"
    );
    println!();
}

fn section(num: u32, title: &str) {
    println!();
    println!(
        "{BOLD}{CYAN}===[{YELLOW} Step {num} {CYAN}]=============================================================={RESET}"
    );
    println!("{BOLD}{WHITE}  {title}{RESET}");
    println!(
        "{CYAN}------------------------------------------------------------------------{RESET}"
    );
}

fn success(text: &str) {
    println!("{GREEN}  [OK] {text}{RESET}");
}

fn info(label: &str, value: &str) {
    println!("{WHITE}  {BOLD}{label}:{RESET} {YELLOW}{value}{RESET}");
}

fn timing(label: &str, elapsed: std::time::Duration) {
    let ms = elapsed.as_secs_f64() * 1000.0;
    println!("{DIM}{MAGENTA}  [{label}: {ms:.2} ms]{RESET}");
}

fn address_display(name: &str, addr: &str) {
    let prefix = &addr[..6];
    let suffix = &addr[addr.len().saturating_sub(6)..];
    println!("  {CYAN}{BOLD}{name:<8}{RESET}  {DIM}{prefix}...{suffix}{RESET}");
}

fn fee_breakdown(tx: &Transaction, rate: u64) -> Result<(), Box<dyn std::error::Error>> {
    let mut at_rate = tx.clone();
    at_rate.header.fee = rate;
    let size = estimate_size(&at_rate)?;
    info("signed size", &format!("{} bytes", size));
    info(
        "size x rate",
        &format!("{} x {} = {}", size, rate, size.saturating_mul(rate)),
    );
    info(
        "fee",
        &format!("{} (floor {})", tx.header.fee, MIN_TXN_FEE),
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<(), Box<dyn std::error::Error>> {
    banner();

    section(1, "Create throwaway accounts");
    let alice = Keypair::generate();
    let bob = Keypair::generate();
    let alice_addr = alice.address().to_string();
    let bob_addr = bob.address().to_string();
    address_display("alice", &alice_addr);
    address_display("bob", &bob_addr);

    let params = SuggestedParams::new(1, 30_000_000, 30_001_000, "testnet-v1.0", [0x48u8; 32]);

    section(2, "Build a payment at 1 microunit per byte");
    let started = Instant::now();
    let payment = PaymentBuilder::new(&alice_addr, &bob_addr, 2_500_000, params.clone())
        .note(b"lunch".to_vec())
        .build()?;
    timing("build", started.elapsed());
    fee_breakdown(&payment, 1)?;
    success("fee clamped to the protocol floor");

    section(3, "Create an asset at 40 microunits per byte");
    let rich = SuggestedParams {
        fee: 40,
        ..params.clone()
    };
    let started = Instant::now();
    let create = AssetCreateBuilder::new(&bob_addr, 21_000_000, rich)
        .decimals(6)
        .unit_name("DEMO")
        .asset_name("Demo Token")
        .manager(&bob_addr)
        .build()?;
    timing("build", started.elapsed());
    fee_breakdown(&create, 40)?;
    success("size-based fee above the floor");

    section(4, "Bind a payment and an opt-in into an atomic group");
    let opt_in = AssetTransferBuilder::opt_in(&alice_addr, 1_234, params).build()?;
    let members = [payment, opt_in];
    let grouped = assign_group_id(&members, "")?;
    info("group id", &grouped[0].header.group.to_base64());
    for tx in &grouped {
        info(&format!("  {}", tx.tx_type()), &tx.id()?.to_string());
    }
    success("every member carries the same group id");

    section(5, "Sign");
    for tx in &grouped {
        let signed = sign_transaction(&alice, tx)?;
        let bytes = signed.encode()?;
        info(
            &format!("  {}", tx.tx_type()),
            &format!("{} bytes, verifies: {}", bytes.len(), signed.verify()?),
        );
    }
    success("ready to submit");
    println!();
    Ok(())
}
