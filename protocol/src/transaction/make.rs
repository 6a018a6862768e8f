//! Positional constructors for the three most common kinds.
//!
//! These are thin wrappers over the builders for callers that already have
//! every parameter in hand, e.g. straight from a node's suggested-params
//! response. The key registration and asset creation forms take the
//! genesis hash as base64, the way nodes report it; it is decoded with the
//! rest of the validation, after the addresses.

use super::asset::AssetCreateBuilder;
use super::builder::{KeyRegBuilder, PaymentBuilder, SuggestedParams, Transaction};
use super::error::TxnError;

/// Params whose genesis hash arrives later via `genesis_hash_base64`.
fn base64_params(fee: u64, first_round: u64, last_round: u64, genesis_id: &str) -> SuggestedParams {
    SuggestedParams::new(fee, first_round, last_round, genesis_id, Vec::new())
}

fn note_bytes(note: Option<&[u8]>) -> Vec<u8> {
    note.map(<[u8]>::to_vec).unwrap_or_default()
}

/// A payment with its fee computed at `fee_per_byte`.
///
/// An empty `close_remainder_to` leaves the sender's account open.
#[allow(clippy::too_many_arguments)]
pub fn make_payment_txn(
    from: &str,
    to: &str,
    fee_per_byte: u64,
    amount: u64,
    first_round: u64,
    last_round: u64,
    note: Option<&[u8]>,
    close_remainder_to: &str,
    genesis_id: &str,
    genesis_hash: &[u8],
) -> Result<Transaction, TxnError> {
    let params = SuggestedParams::new(
        fee_per_byte,
        first_round,
        last_round,
        genesis_id,
        genesis_hash,
    );
    PaymentBuilder::new(from, to, amount, params)
        .note(note_bytes(note))
        .close_remainder_to(close_remainder_to)
        .build()
}

/// [`make_payment_txn`] with `fee` as the total, floored at the minimum.
#[allow(clippy::too_many_arguments)]
pub fn make_payment_txn_with_flat_fee(
    from: &str,
    to: &str,
    fee: u64,
    amount: u64,
    first_round: u64,
    last_round: u64,
    note: Option<&[u8]>,
    close_remainder_to: &str,
    genesis_id: &str,
    genesis_hash: &[u8],
) -> Result<Transaction, TxnError> {
    let params = SuggestedParams::new(fee, first_round, last_round, genesis_id, genesis_hash)
        .with_flat_fee(fee);
    PaymentBuilder::new(from, to, amount, params)
        .note(note_bytes(note))
        .close_remainder_to(close_remainder_to)
        .build()
}

/// A key registration with its fee computed at `fee_per_byte`.
///
/// `vote_key` and `selection_key` are base64; both empty registers the
/// account offline.
#[allow(clippy::too_many_arguments)]
pub fn make_key_reg_txn(
    account: &str,
    fee_per_byte: u64,
    first_round: u64,
    last_round: u64,
    note: Option<&[u8]>,
    genesis_id: &str,
    genesis_hash: &str,
    vote_key: &str,
    selection_key: &str,
    vote_first: u64,
    vote_last: u64,
    vote_key_dilution: u64,
) -> Result<Transaction, TxnError> {
    let params = base64_params(fee_per_byte, first_round, last_round, genesis_id);
    key_reg(
        account,
        params,
        genesis_hash,
        note,
        vote_key,
        selection_key,
        vote_first,
        vote_last,
        vote_key_dilution,
    )
}

/// [`make_key_reg_txn`] with `fee` as the total, floored at the minimum.
#[allow(clippy::too_many_arguments)]
pub fn make_key_reg_txn_with_flat_fee(
    account: &str,
    fee: u64,
    first_round: u64,
    last_round: u64,
    note: Option<&[u8]>,
    genesis_id: &str,
    genesis_hash: &str,
    vote_key: &str,
    selection_key: &str,
    vote_first: u64,
    vote_last: u64,
    vote_key_dilution: u64,
) -> Result<Transaction, TxnError> {
    let params = base64_params(fee, first_round, last_round, genesis_id).with_flat_fee(fee);
    key_reg(
        account,
        params,
        genesis_hash,
        note,
        vote_key,
        selection_key,
        vote_first,
        vote_last,
        vote_key_dilution,
    )
}

#[allow(clippy::too_many_arguments)]
fn key_reg(
    account: &str,
    params: SuggestedParams,
    genesis_hash: &str,
    note: Option<&[u8]>,
    vote_key: &str,
    selection_key: &str,
    vote_first: u64,
    vote_last: u64,
    vote_key_dilution: u64,
) -> Result<Transaction, TxnError> {
    KeyRegBuilder::new(account, params)
        .genesis_hash_base64(genesis_hash)
        .note(note_bytes(note))
        .vote_key(vote_key)
        .selection_key(selection_key)
        .vote_rounds(vote_first, vote_last)
        .vote_key_dilution(vote_key_dilution)
        .build()
}

/// An asset creation with its fee computed at `fee_per_byte`.
///
/// Empty role addresses leave the role unset.
#[allow(clippy::too_many_arguments)]
pub fn make_asset_create_txn(
    account: &str,
    fee_per_byte: u64,
    first_round: u64,
    last_round: u64,
    note: Option<&[u8]>,
    genesis_id: &str,
    genesis_hash: &str,
    total: u64,
    default_frozen: bool,
    manager: &str,
    reserve: &str,
    freeze: &str,
    clawback: &str,
    unit_name: &str,
    asset_name: &str,
) -> Result<Transaction, TxnError> {
    let params = base64_params(fee_per_byte, first_round, last_round, genesis_id);
    asset_create(
        account,
        params,
        genesis_hash,
        note,
        total,
        default_frozen,
        [manager, reserve, freeze, clawback],
        unit_name,
        asset_name,
    )
}

/// [`make_asset_create_txn`] with `fee` as the total, floored at the
/// minimum.
#[allow(clippy::too_many_arguments)]
pub fn make_asset_create_txn_with_flat_fee(
    account: &str,
    fee: u64,
    first_round: u64,
    last_round: u64,
    note: Option<&[u8]>,
    genesis_id: &str,
    genesis_hash: &str,
    total: u64,
    default_frozen: bool,
    manager: &str,
    reserve: &str,
    freeze: &str,
    clawback: &str,
    unit_name: &str,
    asset_name: &str,
) -> Result<Transaction, TxnError> {
    let params = base64_params(fee, first_round, last_round, genesis_id).with_flat_fee(fee);
    asset_create(
        account,
        params,
        genesis_hash,
        note,
        total,
        default_frozen,
        [manager, reserve, freeze, clawback],
        unit_name,
        asset_name,
    )
}

/// `roles` is manager, reserve, freeze, clawback.
#[allow(clippy::too_many_arguments)]
fn asset_create(
    account: &str,
    params: SuggestedParams,
    genesis_hash: &str,
    note: Option<&[u8]>,
    total: u64,
    default_frozen: bool,
    roles: [&str; 4],
    unit_name: &str,
    asset_name: &str,
) -> Result<Transaction, TxnError> {
    let [manager, reserve, freeze, clawback] = roles;
    AssetCreateBuilder::new(account, total, params)
        .genesis_hash_base64(genesis_hash)
        .note(note_bytes(note))
        .default_frozen(default_frozen)
        .manager(manager)
        .reserve(reserve)
        .freeze(freeze)
        .clawback(clawback)
        .unit_name(unit_name)
        .asset_name(asset_name)
        .build()
}
