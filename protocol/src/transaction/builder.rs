//! Transaction construction via the builder pattern.
//!
//! Each transaction kind has a consuming builder: required inputs go to
//! `new`, optional ones are chained setters, and `.build()` validates
//! everything and returns a finished, fee-bearing [`Transaction`] or the
//! first error found. Nothing half-built escapes.
//!
//! Validation always runs in the same order:
//!
//! 1. decode every address field (sender first),
//! 2. check the genesis hash is present and exactly 32 bytes (a base64
//!    genesis hash is decoded here too, not before the addresses),
//! 3. check `first_round <= last_round`,
//! 4. check string budgets and protocol list limits.
//!
//! Only then is the fee computed, which requires a throwaway signature.
//! Builders for the asset and application kinds live in
//! [`super::asset`] and [`super::application`].

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use data_encoding::BASE32_NOPAD;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::error::TxnError;
use super::fee;
use super::types::{
    canonical_map, serde_b64, Digest, Header, KeyRegFields, PaymentFields, TxType, TxnFields,
    VotePk, VrfPk,
};
use crate::config::{ProtocolParams, HASH_LENGTH, TX_DOMAIN};
use crate::crypto::hash::domain_separated_hash;
use crate::encoding::fixed::{fixed_from_base64, fixed_from_slice};
use crate::encoding::msgpack::{CanonicalMap, EncodeError};
use crate::identity::Address;

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A ledger transaction: a common header plus one kind's fields.
///
/// Built once by a builder. Afterwards only two fields are expected to
/// change: `header.fee` (while the fee is being settled) and `header.group`
/// (by [`super::group::assign_group_id`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Fields shared by every kind.
    pub header: Header,
    /// Kind-specific fields.
    pub fields: TxnFields,
}

impl Transaction {
    /// The kind of this transaction.
    pub fn tx_type(&self) -> TxType {
        self.fields.tx_type()
    }

    /// The canonical map used for encoding, hashing and signing.
    pub fn to_canonical_map(&self) -> CanonicalMap {
        canonical_map(&self.header, &self.fields)
    }

    /// Canonical MessagePack bytes.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        self.to_canonical_map().encode()
    }

    /// `SHA-512/256("TX" || encode())`.
    pub fn id(&self) -> Result<TxId, EncodeError> {
        Ok(TxId(domain_separated_hash(TX_DOMAIN, &self.encode()?)))
    }

    /// Returns `true` once a group id has been assigned.
    pub fn is_grouped(&self) -> bool {
        !self.header.group.is_zero()
    }
}

/// A transaction id. Displays as unpadded base32, the form block explorers
/// and node APIs use.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxId(pub [u8; HASH_LENGTH]);

impl TxId {
    /// The raw digest.
    pub fn as_bytes(&self) -> &[u8; HASH_LENGTH] {
        &self.0
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&BASE32_NOPAD.encode(&self.0))
    }
}

impl fmt::Debug for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxId({})", self)
    }
}

// ---------------------------------------------------------------------------
// SuggestedParams
// ---------------------------------------------------------------------------

/// Network parameters shared by every builder, as a node's
/// "suggested params" endpoint reports them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedParams {
    /// Per-byte fee rate, or the total fee when `flat_fee` is set.
    pub fee: u64,
    /// Treat `fee` as a flat total rather than a per-byte rate.
    #[serde(default)]
    pub flat_fee: bool,
    /// First valid round.
    pub first_round: u64,
    /// Last valid round.
    pub last_round: u64,
    /// Network identifier, e.g. `mainnet-v1.0`.
    #[serde(default)]
    pub genesis_id: String,
    /// Genesis block hash. Must be exactly 32 bytes.
    #[serde(with = "serde_b64")]
    pub genesis_hash: Vec<u8>,
}

impl SuggestedParams {
    /// Per-byte params.
    pub fn new(
        fee_per_byte: u64,
        first_round: u64,
        last_round: u64,
        genesis_id: impl Into<String>,
        genesis_hash: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            fee: fee_per_byte,
            flat_fee: false,
            first_round,
            last_round,
            genesis_id: genesis_id.into(),
            genesis_hash: genesis_hash.into(),
        }
    }

    /// Switch to a flat total fee.
    pub fn with_flat_fee(mut self, fee: u64) -> Self {
        self.fee = fee;
        self.flat_fee = true;
        self
    }
}

// ---------------------------------------------------------------------------
// Shared builder state and validation
// ---------------------------------------------------------------------------

/// Inputs every builder carries regardless of kind.
#[derive(Debug, Clone)]
pub(crate) struct Common {
    pub(crate) sender: String,
    pub(crate) params: SuggestedParams,
    pub(crate) note: Vec<u8>,
    pub(crate) lease: Digest,
    pub(crate) rules: ProtocolParams,
    /// Overrides `params.genesis_hash` when set.
    pub(crate) genesis_base64: Option<String>,
}

impl Common {
    pub(crate) fn new(sender: &str, params: SuggestedParams) -> Self {
        Self {
            sender: sender.to_string(),
            params,
            note: Vec::new(),
            lease: Digest::zero(),
            rules: ProtocolParams::default(),
            genesis_base64: None,
        }
    }

    pub(crate) fn rules(&self) -> &ProtocolParams {
        &self.rules
    }

    /// Step 1 for the sender.
    pub(crate) fn sender(&self) -> Result<Address, TxnError> {
        decode_required("sender", &self.sender)
    }

    /// Steps 2 and 3, plus the note limit. The fee is left at zero.
    pub(crate) fn header(&self, sender: Address) -> Result<Header, TxnError> {
        let genesis_hash = match &self.genesis_base64 {
            Some(encoded) => {
                let bytes = STANDARD
                    .decode(encoded)
                    .map_err(|source| TxnError::Base64 {
                        field: "genesis_hash",
                        source,
                    })?;
                genesis_digest(&bytes)?
            }
            None => genesis_digest(&self.params.genesis_hash)?,
        };
        check_rounds(self.params.first_round, self.params.last_round)?;
        check_count("note", self.note.len(), self.rules.max_note_length)?;
        Ok(Header {
            sender,
            fee: 0,
            first_valid: self.params.first_round,
            last_valid: self.params.last_round,
            note: self.note.clone(),
            genesis_id: self.params.genesis_id.clone(),
            genesis_hash,
            group: Digest::zero(),
            lease: self.lease,
        })
    }

    /// Assemble the transaction and settle its fee.
    pub(crate) fn finish(&self, header: Header, fields: TxnFields) -> Result<Transaction, TxnError> {
        let mut txn = Transaction { header, fields };
        fee::apply_fee(
            &mut txn,
            self.params.fee,
            self.params.flat_fee,
            self.rules.min_txn_fee,
        )?;
        debug!(
            tx_type = %txn.tx_type(),
            sender = %txn.header.sender,
            fee = txn.header.fee,
            "transaction built"
        );
        Ok(txn)
    }
}

/// Setters shared by every builder. Each builder has a `common: Common`.
macro_rules! common_setters {
    () => {
        /// Attach a note (at most 1024 bytes).
        pub fn note(mut self, note: impl Into<Vec<u8>>) -> Self {
            self.common.note = note.into();
            self
        }

        /// Set a lease, making the transaction mutually exclusive with any
        /// other from the same sender carrying the same lease while both
        /// are valid.
        pub fn lease(mut self, lease: crate::transaction::types::Digest) -> Self {
            self.common.lease = lease;
            self
        }

        /// Charge `fee` as a flat total instead of a per-byte rate. The
        /// protocol minimum still applies.
        pub fn flat_fee(mut self, fee: u64) -> Self {
            self.common.params = self.common.params.with_flat_fee(fee);
            self
        }

        /// Take the genesis hash as base64, the way nodes report it, in place
        /// of `SuggestedParams::genesis_hash`. Decoded by `build` after the
        /// address fields.
        pub fn genesis_hash_base64(mut self, genesis_hash: &str) -> Self {
            self.common.genesis_base64 = Some(genesis_hash.to_string());
            self
        }

        /// Validate against non-default protocol limits.
        pub fn protocol_params(mut self, rules: crate::config::ProtocolParams) -> Self {
            self.common.rules = rules;
            self
        }
    };
}
pub(crate) use common_setters;

/// Decode an address that must be present. Empty input is reported as
/// missing rather than as a decode failure.
pub(crate) fn decode_required(field: &'static str, s: &str) -> Result<Address, TxnError> {
    if s.is_empty() {
        return Err(TxnError::MissingRequiredField { field });
    }
    Address::decode(s).map_err(|e| TxnError::address(field, e))
}

/// Decode an optional address; empty means the zero address.
pub(crate) fn decode_optional(field: &'static str, s: &str) -> Result<Address, TxnError> {
    if s.is_empty() {
        return Ok(Address::zero());
    }
    Address::decode(s).map_err(|e| TxnError::address(field, e))
}

/// Decode an optional base64 32-byte field; empty means zero.
pub(crate) fn decode_optional_b64(field: &'static str, s: &str) -> Result<[u8; 32], TxnError> {
    if s.is_empty() {
        return Ok([0u8; 32]);
    }
    fixed_from_base64::<32>(s).map_err(|e| TxnError::fixed(field, s, e))
}

fn genesis_digest(bytes: &[u8]) -> Result<Digest, TxnError> {
    if bytes.is_empty() {
        return Err(TxnError::MissingRequiredField {
            field: "genesis_hash",
        });
    }
    fixed_from_slice::<HASH_LENGTH>(bytes)
        .map(Digest)
        .map_err(|_| TxnError::FieldLength {
            field: "genesis_hash",
            value: crate::encoding::fixed::to_base64(bytes),
            limit: HASH_LENGTH,
        })
}

pub(crate) fn check_rounds(first: u64, last: u64) -> Result<(), TxnError> {
    if first > last {
        return Err(TxnError::InvalidRoundRange { first, last });
    }
    Ok(())
}

/// Reject a string longer than `limit` bytes.
pub(crate) fn check_len(field: &'static str, value: &str, limit: usize) -> Result<(), TxnError> {
    if value.len() > limit {
        return Err(TxnError::FieldLength {
            field,
            value: value.to_string(),
            limit,
        });
    }
    Ok(())
}

/// Reject a list (or byte string) with more than `limit` entries.
pub(crate) fn check_count(field: &'static str, count: usize, limit: usize) -> Result<(), TxnError> {
    if count > limit {
        return Err(TxnError::LimitExceeded {
            field,
            count,
            limit,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// PaymentBuilder
// ---------------------------------------------------------------------------

/// Builds a payment.
///
/// ```rust,no_run
/// use algotx_protocol::transaction::{PaymentBuilder, SuggestedParams};
///
/// # let (from, to) = ("", "");
/// let params = SuggestedParams::new(10, 1_000, 2_000, "testnet-v1.0", [0u8; 32]);
/// let tx = PaymentBuilder::new(from, to, 5_000_000, params)
///     .note(b"rent".to_vec())
///     .build()?;
/// # Ok::<(), algotx_protocol::transaction::TxnError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PaymentBuilder {
    common: Common,
    receiver: String,
    amount: u64,
    close_remainder_to: String,
}

impl PaymentBuilder {
    /// A payment of `amount` microunits from `sender` to `receiver`.
    pub fn new(sender: &str, receiver: &str, amount: u64, params: SuggestedParams) -> Self {
        Self {
            common: Common::new(sender, params),
            receiver: receiver.to_string(),
            amount,
            close_remainder_to: String::new(),
        }
    }

    common_setters!();

    /// Close the sender's account, sending the remainder to `address`.
    /// Empty leaves the account open.
    pub fn close_remainder_to(mut self, address: &str) -> Self {
        self.close_remainder_to = address.to_string();
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<Transaction, TxnError> {
        let sender = self.common.sender()?;
        let receiver = decode_required("receiver", &self.receiver)?;
        let close_remainder_to = decode_optional("close_remainder_to", &self.close_remainder_to)?;
        let header = self.common.header(sender)?;

        let fields = TxnFields::Payment(PaymentFields {
            receiver,
            amount: self.amount,
            close_remainder_to,
        });
        self.common.finish(header, fields)
    }
}

// ---------------------------------------------------------------------------
// KeyRegBuilder
// ---------------------------------------------------------------------------

/// Builds a key registration.
///
/// Participation keys are given as standard base64, the form the node's
/// participation-key tooling prints. Leaving both keys empty builds an
/// offline (deregistration) transaction; setting only one of them is an
/// error.
#[derive(Debug, Clone)]
pub struct KeyRegBuilder {
    common: Common,
    vote_key: String,
    selection_key: String,
    vote_first: u64,
    vote_last: u64,
    vote_key_dilution: u64,
}

impl KeyRegBuilder {
    /// A key registration for `account`.
    pub fn new(account: &str, params: SuggestedParams) -> Self {
        Self {
            common: Common::new(account, params),
            vote_key: String::new(),
            selection_key: String::new(),
            vote_first: 0,
            vote_last: 0,
            vote_key_dilution: 0,
        }
    }

    common_setters!();

    /// Root participation public key, base64.
    pub fn vote_key(mut self, key: &str) -> Self {
        self.vote_key = key.to_string();
        self
    }

    /// VRF selection public key, base64.
    pub fn selection_key(mut self, key: &str) -> Self {
        self.selection_key = key.to_string();
        self
    }

    /// Rounds during which the participation key may vote.
    pub fn vote_rounds(mut self, first: u64, last: u64) -> Self {
        self.vote_first = first;
        self.vote_last = last;
        self
    }

    /// Dilution of the two-level participation key.
    pub fn vote_key_dilution(mut self, dilution: u64) -> Self {
        self.vote_key_dilution = dilution;
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<Transaction, TxnError> {
        let sender = self.common.sender()?;
        let header = self.common.header(sender)?;
        let vote_pk = VotePk(decode_optional_b64("vote_key", &self.vote_key)?);
        let selection_pk = VrfPk(decode_optional_b64("selection_key", &self.selection_key)?);
        match (vote_pk.is_zero(), selection_pk.is_zero()) {
            (false, true) => {
                return Err(TxnError::MissingRequiredField {
                    field: "selection_key",
                })
            }
            (true, false) => return Err(TxnError::MissingRequiredField { field: "vote_key" }),
            _ => {}
        }
        if !vote_pk.is_zero() {
            check_rounds(self.vote_first, self.vote_last)?;
        }

        let fields = TxnFields::KeyRegistration(KeyRegFields {
            vote_pk,
            selection_pk,
            vote_first: self.vote_first,
            vote_last: self.vote_last,
            vote_key_dilution: self.vote_key_dilution,
        });
        self.common.finish(header, fields)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MIN_TXN_FEE;
    use crate::crypto::keys::Keypair;
    use crate::encoding::fixed::to_base64;

    fn addr(seed: u8) -> String {
        Keypair::from_seed(&[seed; 32]).address().to_string()
    }

    fn params() -> SuggestedParams {
        SuggestedParams::new(10, 1_000, 2_000, "testnet-v1.0", [8u8; 32])
    }

    #[test]
    fn payment_round_trips_addresses() {
        let tx = PaymentBuilder::new(&addr(1), &addr(2), 5_000_000, params())
            .build()
            .unwrap();
        assert_eq!(tx.header.sender.to_string(), addr(1));
        match &tx.fields {
            TxnFields::Payment(f) => {
                assert_eq!(f.receiver.to_string(), addr(2));
                assert_eq!(f.amount, 5_000_000);
                assert!(f.close_remainder_to.is_zero());
            }
            other => panic!("expected payment, got {:?}", other),
        }
    }

    #[test]
    fn payment_fee_is_rate_times_size() {
        let tx = PaymentBuilder::new(&addr(1), &addr(2), 5_000_000, params())
            .build()
            .unwrap();
        let mut at_rate = tx.clone();
        at_rate.header.fee = 10;
        let size = fee::estimate_size(&at_rate).unwrap();
        assert_eq!(tx.header.fee, (size * 10).max(MIN_TXN_FEE));
    }

    #[test]
    fn sender_is_decoded_before_receiver() {
        let err = PaymentBuilder::new("bogus", "also-bogus", 1, params())
            .build()
            .unwrap_err();
        assert!(matches!(err, TxnError::AddressDecode { field: "sender", .. }));
    }

    #[test]
    fn empty_receiver_is_missing() {
        let err = PaymentBuilder::new(&addr(1), "", 1, params())
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TxnError::MissingRequiredField { field: "receiver" }
        ));
    }

    #[test]
    fn addresses_are_checked_before_genesis_hash() {
        let bad = SuggestedParams::new(10, 1, 2, "x", vec![1u8; 5]);
        let err = PaymentBuilder::new(&addr(1), &addr(2), 1, bad)
            .close_remainder_to("nope")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TxnError::AddressDecode {
                field: "close_remainder_to",
                ..
            }
        ));
    }

    #[test]
    fn short_genesis_hash_is_rejected() {
        let bad = SuggestedParams::new(10, 1, 2, "x", vec![1u8; 31]);
        let err = PaymentBuilder::new(&addr(1), &addr(2), 1, bad)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TxnError::FieldLength {
                field: "genesis_hash",
                limit: 32,
                ..
            }
        ));
    }

    #[test]
    fn empty_genesis_hash_is_missing() {
        let bad = SuggestedParams::new(10, 1, 2, "x", Vec::new());
        let err = PaymentBuilder::new(&addr(1), &addr(2), 1, bad)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TxnError::MissingRequiredField {
                field: "genesis_hash"
            }
        ));
    }

    #[test]
    fn base64_genesis_hash_replaces_raw_bytes() {
        let tx = PaymentBuilder::new(&addr(1), &addr(2), 1, params())
            .genesis_hash_base64(&to_base64(&[4u8; 32]))
            .build()
            .unwrap();
        assert_eq!(tx.header.genesis_hash, Digest([4u8; 32]));
    }

    #[test]
    fn base64_genesis_hash_is_decoded_after_addresses() {
        let err = PaymentBuilder::new(&addr(1), "nope", 1, params())
            .genesis_hash_base64("%%%")
            .build()
            .unwrap_err();
        assert!(matches!(err, TxnError::AddressDecode { field: "receiver", .. }));

        let err = PaymentBuilder::new(&addr(1), &addr(2), 1, params())
            .genesis_hash_base64("%%%")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TxnError::Base64 {
                field: "genesis_hash",
                ..
            }
        ));
    }

    #[test]
    fn inverted_rounds_are_rejected() {
        let bad = SuggestedParams::new(10, 2_000, 1_000, "x", [1u8; 32]);
        let err = PaymentBuilder::new(&addr(1), &addr(2), 1, bad)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TxnError::InvalidRoundRange {
                first: 2_000,
                last: 1_000
            }
        ));
    }

    #[test]
    fn oversized_note_is_rejected() {
        let err = PaymentBuilder::new(&addr(1), &addr(2), 1, params())
            .note(vec![0u8; 1025])
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TxnError::LimitExceeded {
                field: "note",
                count: 1025,
                limit: 1024
            }
        ));
    }

    #[test]
    fn flat_fee_setter_overrides_rate() {
        let tx = PaymentBuilder::new(&addr(1), &addr(2), 1, params())
            .flat_fee(2_500)
            .build()
            .unwrap();
        assert_eq!(tx.header.fee, 2_500);
    }

    #[test]
    fn lease_is_encoded() {
        let tx = PaymentBuilder::new(&addr(1), &addr(2), 1, params())
            .lease(Digest([5u8; 32]))
            .build()
            .unwrap();
        assert_eq!(tx.header.lease, Digest([5u8; 32]));
        assert!(tx.to_canonical_map().get("lx").is_some());
    }

    #[test]
    fn keyreg_decodes_keys() {
        let tx = KeyRegBuilder::new(&addr(1), params())
            .vote_key(&to_base64(&[1u8; 32]))
            .selection_key(&to_base64(&[2u8; 32]))
            .vote_rounds(1_000, 100_000)
            .vote_key_dilution(10_000)
            .build()
            .unwrap();
        assert_eq!(tx.tx_type(), TxType::KeyRegistration);
        match &tx.fields {
            TxnFields::KeyRegistration(f) => {
                assert_eq!(f.vote_pk, VotePk([1u8; 32]));
                assert_eq!(f.selection_pk, VrfPk([2u8; 32]));
                assert_eq!(f.vote_key_dilution, 10_000);
            }
            other => panic!("expected keyreg, got {:?}", other),
        }
    }

    #[test]
    fn keyreg_without_keys_goes_offline() {
        let tx = KeyRegBuilder::new(&addr(1), params()).build().unwrap();
        let map = tx.to_canonical_map();
        assert!(map.get("votekey").is_none());
        assert!(map.get("selkey").is_none());
    }

    #[test]
    fn keyreg_keys_come_in_pairs() {
        let err = KeyRegBuilder::new(&addr(1), params())
            .selection_key(&to_base64(&[2u8; 32]))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TxnError::MissingRequiredField { field: "vote_key" }
        ));

        let err = KeyRegBuilder::new(&addr(1), params())
            .vote_key(&to_base64(&[1u8; 32]))
            .vote_rounds(1, 10)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TxnError::MissingRequiredField {
                field: "selection_key"
            }
        ));
    }

    #[test]
    fn keyreg_rejects_short_vote_key() {
        let short = to_base64(&[1u8; 16]);
        let err = KeyRegBuilder::new(&addr(1), params())
            .vote_key(&short)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TxnError::FieldLength {
                field: "vote_key",
                limit: 32,
                ..
            }
        ));
    }

    #[test]
    fn keyreg_rejects_inverted_vote_rounds() {
        let err = KeyRegBuilder::new(&addr(1), params())
            .vote_key(&to_base64(&[1u8; 32]))
            .selection_key(&to_base64(&[2u8; 32]))
            .vote_rounds(10, 5)
            .build()
            .unwrap_err();
        assert!(matches!(err, TxnError::InvalidRoundRange { first: 10, last: 5 }));
    }

    #[test]
    fn txid_displays_as_base32() {
        let tx = PaymentBuilder::new(&addr(1), &addr(2), 1, params())
            .build()
            .unwrap();
        let id = tx.id().unwrap().to_string();
        assert_eq!(id.len(), 52);
        assert!(id.chars().all(|c| c.is_ascii_uppercase() || ('2'..='7').contains(&c)));
    }

    #[test]
    fn transaction_json_roundtrip() {
        let tx = PaymentBuilder::new(&addr(1), &addr(2), 7, params())
            .note(b"hello".to_vec())
            .build()
            .unwrap();
        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tx);
    }
}
