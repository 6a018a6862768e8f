//! Size estimation and fee normalization.
//!
//! The network charges per byte of the *signed* encoding, which does not
//! exist until the transaction is final. The estimator closes that loop by
//! signing a copy with a disposable key and measuring the envelope. The key
//! comes from the OS CSPRNG, is used once, and is dropped (and zeroized by
//! `ed25519-dalek`) before the function returns.
//!
//! Every fee path ends in [`normalize_fee`], so no constructed transaction
//! ever carries a fee below the protocol floor.

use tracing::{debug, trace};

use super::builder::Transaction;
use super::error::TxnError;
use super::signing::sign_transaction;
use crate::config::MIN_TXN_FEE;
use crate::crypto::keys::Keypair;

/// Byte length of `txn` once signed and encoded.
///
/// During construction the `fee` field still holds the per-byte rate, so
/// the measured size reflects a fee of that magnitude. The final fee is
/// never more than a few bytes wider in practice.
pub fn estimate_size(txn: &Transaction) -> Result<u64, TxnError> {
    let throwaway = Keypair::generate();
    let signed = sign_transaction(&throwaway, txn)?;
    let size = signed.encode()?.len() as u64;
    trace!(size, tx_type = %txn.tx_type(), "estimated signed size");
    Ok(size)
}

/// Clamp `fee` up to `floor`.
pub fn normalize_fee(fee: u64, floor: u64) -> u64 {
    fee.max(floor)
}

/// `size * rate`, saturating, clamped to `floor`.
pub fn per_byte_fee(size: u64, rate: u64, floor: u64) -> u64 {
    normalize_fee(size.saturating_mul(rate), floor)
}

/// Total fee for `txn` at `rate` per byte, using the protocol minimum.
pub fn suggested_fee(txn: &Transaction, rate: u64) -> Result<u64, TxnError> {
    Ok(per_byte_fee(estimate_size(txn)?, rate, MIN_TXN_FEE))
}

/// Fill in `txn.header.fee`.
///
/// `fee` is the caller's value: a per-byte rate, or the total when `flat`
/// is set. Both paths measure the transaction first, so an encoding failure
/// surfaces the same way whichever fee mode is chosen.
pub(crate) fn apply_fee(
    txn: &mut Transaction,
    fee: u64,
    flat: bool,
    floor: u64,
) -> Result<(), TxnError> {
    txn.header.fee = fee;
    let size = estimate_size(txn)?;
    txn.header.fee = if flat {
        normalize_fee(fee, floor)
    } else {
        per_byte_fee(size, fee, floor)
    };
    debug!(size, rate = fee, flat, fee = txn.header.fee, "fee computed");
    Ok(())
}
