//! Atomic group binding.
//!
//! A group id commits to an ordered list of transaction ids:
//!
//! ```text
//! gid = SHA-512/256("TG" || msgpack({"txlist": [txid_1, ..., txid_n]}))
//! ```
//!
//! Every member carries the same `gid` in its `grp` field, and the ledger
//! either applies all of them or none. Reordering the list changes the id.

use thiserror::Error;
use tracing::debug;

use super::builder::Transaction;
use super::error::TxnError;
use super::types::Digest;
use crate::config::{ProtocolParams, TX_GROUP_DOMAIN};
use crate::crypto::hash::domain_separated_hash;
use crate::encoding::msgpack::{CanonicalMap, EncodeError, Value};
use crate::identity::Address;

/// Errors from computing a group id.
#[derive(Debug, Error)]
pub enum GroupError {
    /// Nothing to group.
    #[error("cannot compute a group id over zero transactions")]
    Empty,

    /// The list is longer than the protocol allows.
    #[error("group of {count} transactions exceeds the limit of {limit}")]
    TooLarge {
        /// Transactions supplied.
        count: usize,
        /// Protocol maximum.
        limit: usize,
    },

    /// A member already carries a group id.
    #[error("transaction at index {index} already belongs to a group")]
    AlreadyGrouped {
        /// Position in the input.
        index: usize,
    },

    /// A member could not be encoded.
    #[error("failed to encode group member: {0}")]
    Encode(#[from] EncodeError),
}

/// Group id over `txns`, in order, with the default protocol limits.
pub fn compute_group_id(txns: &[Transaction]) -> Result<Digest, GroupError> {
    compute_group_id_with(txns, &ProtocolParams::default())
}

/// Group id over `txns`, in order, against explicit protocol limits.
pub fn compute_group_id_with(
    txns: &[Transaction],
    params: &ProtocolParams,
) -> Result<Digest, GroupError> {
    if txns.is_empty() {
        return Err(GroupError::Empty);
    }
    if txns.len() > params.max_tx_group_size {
        return Err(GroupError::TooLarge {
            count: txns.len(),
            limit: params.max_tx_group_size,
        });
    }

    let mut ids = Vec::with_capacity(txns.len());
    for (index, txn) in txns.iter().enumerate() {
        if !txn.header.group.is_zero() {
            return Err(GroupError::AlreadyGrouped { index });
        }
        ids.push(Value::Bin(txn.id()?.as_bytes().to_vec()));
    }

    let mut map = CanonicalMap::new();
    map.array("txlist", ids);
    let gid = Digest(domain_separated_hash(TX_GROUP_DOMAIN, &map.encode()?));
    debug!(members = txns.len(), group = %gid, "group id computed");
    Ok(gid)
}

/// Compute the group id over all of `txns` and return the members whose
/// sender is `sender_filter`, each stamped with it.
///
/// An empty filter returns every member. The id always covers the whole
/// input, so filtered subsets from different signers agree on it. The
/// filter is decoded only after the id has been computed.
pub fn assign_group_id(
    txns: &[Transaction],
    sender_filter: &str,
) -> Result<Vec<Transaction>, TxnError> {
    let gid = compute_group_id(txns)?;

    let filter = if sender_filter.is_empty() {
        None
    } else {
        Some(
            Address::decode(sender_filter)
                .map_err(|e| TxnError::address("sender_filter", e))?,
        )
    };

    let tagged: Vec<Transaction> = txns
        .iter()
        .filter(|txn| filter.map_or(true, |addr| txn.header.sender == addr))
        .map(|txn| {
            let mut txn = txn.clone();
            txn.header.group = gid;
            txn
        })
        .collect();

    debug!(selected = tagged.len(), total = txns.len(), "group id assigned");
    Ok(tagged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_TX_GROUP_SIZE;
    use crate::crypto::keys::Keypair;
    use crate::transaction::builder::{PaymentBuilder, SuggestedParams};

    fn addr(seed: u8) -> String {
        Keypair::from_seed(&[seed; 32]).address().to_string()
    }

    fn pay(from: u8, amount: u64) -> Transaction {
        PaymentBuilder::new(
            &addr(from),
            &addr(200),
            amount,
            SuggestedParams::new(1, 10, 1_000, "testnet-v1.0", [6u8; 32]),
        )
        .build()
        .unwrap()
    }

    #[test]
    fn empty_group_is_rejected() {
        assert!(matches!(compute_group_id(&[]), Err(GroupError::Empty)));
    }

    #[test]
    fn oversized_group_is_rejected() {
        let txns: Vec<_> = (0..=MAX_TX_GROUP_SIZE as u64).map(|i| pay(1, i + 1)).collect();
        assert!(matches!(
            compute_group_id(&txns),
            Err(GroupError::TooLarge { count: 17, limit: 16 })
        ));
    }

    #[test]
    fn full_group_is_accepted() {
        let txns: Vec<_> = (0..MAX_TX_GROUP_SIZE as u64).map(|i| pay(1, i + 1)).collect();
        assert!(compute_group_id(&txns).is_ok());
    }

    #[test]
    fn regrouping_is_rejected() {
        let txns = vec![pay(1, 1), pay(2, 2)];
        let grouped = assign_group_id(&txns, "").unwrap();
        assert!(matches!(
            compute_group_id(&grouped),
            Err(GroupError::AlreadyGrouped { index: 0 })
        ));
    }

    #[test]
    fn id_is_deterministic_and_order_sensitive() {
        let a = pay(1, 1);
        let b = pay(2, 2);
        let ab = compute_group_id(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(ab, compute_group_id(&[a.clone(), b.clone()]).unwrap());
        assert_ne!(ab, compute_group_id(&[b, a]).unwrap());
    }

    #[test]
    fn id_matches_manual_derivation() {
        let a = pay(1, 1);
        let b = pay(2, 2);
        let mut buf = vec![0x81, 0xa6];
        buf.extend_from_slice(b"txlist");
        buf.push(0x92);
        for txn in [&a, &b] {
            buf.extend_from_slice(&[0xc4, 0x20]);
            buf.extend_from_slice(txn.id().unwrap().as_bytes());
        }
        let expected = domain_separated_hash(b"TG", &buf);
        assert_eq!(compute_group_id(&[a, b]).unwrap().0, expected);
    }

    #[test]
    fn filter_selects_sender_in_order() {
        let txns = vec![pay(1, 1), pay(1, 2), pay(2, 3)];
        let all = assign_group_id(&txns, "").unwrap();
        let mine = assign_group_id(&txns, &addr(1)).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0], all[0]);
        assert_eq!(mine[1], all[1]);
        assert!(all.iter().all(|t| t.header.group == all[0].header.group));
    }

    #[test]
    fn unknown_filter_yields_nothing() {
        let txns = vec![pay(1, 1)];
        assert!(assign_group_id(&txns, &addr(9)).unwrap().is_empty());
    }

    #[test]
    fn bad_filter_is_an_address_error() {
        let txns = vec![pay(1, 1)];
        assert!(matches!(
            assign_group_id(&txns, "NOT-AN-ADDRESS"),
            Err(TxnError::AddressDecode {
                field: "sender_filter",
                ..
            })
        ));
    }

    #[test]
    fn empty_input_fails_before_filter_decode() {
        assert!(matches!(
            assign_group_id(&[], "NOT-AN-ADDRESS"),
            Err(TxnError::Group(GroupError::Empty))
        ));
    }
}
