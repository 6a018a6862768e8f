//! Core type definitions for ledger transactions.
//!
//! A transaction is a common [`Header`] plus exactly one kind-specific
//! field set, carried by the [`TxnFields`] tagged union. A payment cannot
//! carry asset parameters and a key registration cannot carry a receiver:
//! the type system rules it out rather than a validator.
//!
//! Every type here knows how to write itself into a [`CanonicalMap`] using
//! the protocol's short wire keys (`snd`, `fv`, `apar`, ...). Zero values
//! are dropped by the map, which is what lets an unset close-to address or
//! an empty note vanish from the encoding.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::encoding::fixed::{fixed_from_base64, to_base64, FixedFieldError};
use crate::encoding::msgpack::{CanonicalMap, Value};
use crate::identity::Address;

// ---------------------------------------------------------------------------
// Fixed-width values
// ---------------------------------------------------------------------------

macro_rules! fixed_bytes {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name(pub [u8; 32]);

        impl $name {
            /// The all-zero value, meaning "unset".
            pub const fn zero() -> Self {
                Self([0u8; 32])
            }

            /// Returns `true` if every byte is zero.
            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; 32]
            }

            /// The raw bytes.
            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            /// Decode from standard base64; exactly 32 bytes are required.
            pub fn from_base64(input: &str) -> Result<Self, FixedFieldError> {
                fixed_from_base64::<32>(input).map(Self)
            }

            /// Standard base64 text form.
            pub fn to_base64(&self) -> String {
                to_base64(&self.0)
            }
        }

        impl From<[u8; 32]> for $name {
            fn from(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_base64())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_base64())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_base64())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::from_base64(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

fixed_bytes!(
    /// A 32-byte SHA-512/256 digest: genesis hash, group id, lease, metadata hash.
    Digest
);

fixed_bytes!(
    /// Root participation (voting) public key.
    VotePk
);

fixed_bytes!(
    /// VRF public key used for committee selection.
    VrfPk
);

/// Serde adapters that carry byte strings as base64 in JSON.
pub(crate) mod serde_b64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(s).map_err(serde::de::Error::custom)
    }

    pub mod list {
        use super::*;
        use serde::ser::SerializeSeq;

        pub fn serialize<S: Serializer>(items: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(items.len()))?;
            for item in items {
                seq.serialize_element(&STANDARD.encode(item))?;
            }
            seq.end()
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Vec<Vec<u8>>, D::Error> {
            let items = Vec::<String>::deserialize(deserializer)?;
            items
                .into_iter()
                .map(|s| STANDARD.decode(s).map_err(serde::de::Error::custom))
                .collect()
        }
    }
}

// ---------------------------------------------------------------------------
// TxType
// ---------------------------------------------------------------------------

/// Discriminant for the kind of a transaction, as written in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxType {
    /// Native currency transfer.
    Payment,
    /// Participation key registration (or deregistration).
    KeyRegistration,
    /// Asset creation, reconfiguration or destruction.
    AssetConfig,
    /// Asset transfer, opt-in or clawback.
    AssetTransfer,
    /// Asset freeze or unfreeze of one holding.
    AssetFreeze,
    /// Application creation, update or call.
    ApplicationCall,
}

impl TxType {
    /// The wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payment => "pay",
            Self::KeyRegistration => "keyreg",
            Self::AssetConfig => "acfg",
            Self::AssetTransfer => "axfer",
            Self::AssetFreeze => "afrz",
            Self::ApplicationCall => "appl",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Fields shared by every transaction kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Account paying the fee and authorizing the transaction.
    pub sender: Address,
    /// Total fee in microunits.
    pub fee: u64,
    /// First round in which the transaction may be confirmed.
    pub first_valid: u64,
    /// Last round in which the transaction may be confirmed.
    pub last_valid: u64,
    /// Free-form note bytes. Empty means no note.
    #[serde(default, with = "serde_b64", skip_serializing_if = "Vec::is_empty")]
    pub note: Vec<u8>,
    /// Human-readable network identifier, e.g. `testnet-v1.0`.
    #[serde(default)]
    pub genesis_id: String,
    /// Hash of the network's genesis block.
    pub genesis_hash: Digest,
    /// Atomic group id. Zero when the transaction is not grouped.
    #[serde(default, skip_serializing_if = "Digest::is_zero")]
    pub group: Digest,
    /// Mutual-exclusion lease. Zero when unused.
    #[serde(default, skip_serializing_if = "Digest::is_zero")]
    pub lease: Digest,
}

impl Header {
    fn write_into(&self, map: &mut CanonicalMap) {
        map.fixed("snd", self.sender.as_bytes())
            .uint("fee", self.fee)
            .uint("fv", self.first_valid)
            .uint("lv", self.last_valid)
            .bin("note", &self.note)
            .str("gen", &self.genesis_id)
            .fixed("gh", self.genesis_hash.as_bytes())
            .fixed("grp", self.group.as_bytes())
            .fixed("lx", self.lease.as_bytes());
    }
}

// ---------------------------------------------------------------------------
// Kind-specific field sets
// ---------------------------------------------------------------------------

/// Payment fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentFields {
    /// Account receiving `amount`.
    pub receiver: Address,
    /// Amount in microunits.
    pub amount: u64,
    /// When non-zero, the sender's remaining balance is sent here and the
    /// sender account is closed.
    #[serde(default, skip_serializing_if = "Address::is_zero")]
    pub close_remainder_to: Address,
}

/// Key registration fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRegFields {
    /// Root participation public key.
    pub vote_pk: VotePk,
    /// VRF selection public key.
    pub selection_pk: VrfPk,
    /// First round the participation key is valid.
    pub vote_first: u64,
    /// Last round the participation key is valid.
    pub vote_last: u64,
    /// Dilution for the two-level participation key.
    pub vote_key_dilution: u64,
}

/// Asset parameters, written under `apar`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetParams {
    /// Total number of base units ever in existence.
    pub total: u64,
    /// Number of digits after the decimal point for display.
    pub decimals: u32,
    /// Whether new holdings start frozen.
    pub default_frozen: bool,
    /// Short ticker, at most 8 bytes.
    pub unit_name: String,
    /// Full name, at most 32 bytes.
    pub asset_name: String,
    /// URL with more information, at most 32 bytes.
    pub url: String,
    /// Commitment to off-chain metadata.
    pub metadata_hash: Digest,
    /// Account allowed to reconfigure or destroy the asset.
    pub manager: Address,
    /// Account holding non-minted units.
    pub reserve: Address,
    /// Account allowed to freeze holdings.
    pub freeze: Address,
    /// Account allowed to revoke holdings.
    pub clawback: Address,
}

impl AssetParams {
    fn to_canonical_map(&self) -> CanonicalMap {
        let mut map = CanonicalMap::new();
        map.uint("t", self.total)
            .uint("dc", u64::from(self.decimals))
            .flag("df", self.default_frozen)
            .str("un", &self.unit_name)
            .str("an", &self.asset_name)
            .str("au", &self.url)
            .fixed("am", self.metadata_hash.as_bytes())
            .fixed("m", self.manager.as_bytes())
            .fixed("r", self.reserve.as_bytes())
            .fixed("f", self.freeze.as_bytes())
            .fixed("c", self.clawback.as_bytes());
        map
    }
}

/// Asset configuration fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetConfigFields {
    /// Asset being reconfigured or destroyed; zero when creating.
    #[serde(default)]
    pub config_asset: u64,
    /// New parameters. All-zero params on an existing asset destroy it.
    #[serde(default)]
    pub params: AssetParams,
}

/// Asset transfer fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetTransferFields {
    /// Asset being moved.
    pub xfer_asset: u64,
    /// Amount in base units. Zero with sender == receiver is an opt-in.
    #[serde(default)]
    pub amount: u64,
    /// Account being clawed back from; zero for ordinary transfers.
    #[serde(default, skip_serializing_if = "Address::is_zero")]
    pub asset_sender: Address,
    /// Account receiving the units.
    pub asset_receiver: Address,
    /// When non-zero, the sender's remaining holding goes here and the
    /// holding is closed.
    #[serde(default, skip_serializing_if = "Address::is_zero")]
    pub close_to: Address,
}

/// Asset freeze fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetFreezeFields {
    /// Account whose holding is (un)frozen.
    pub freeze_account: Address,
    /// Asset whose holding is (un)frozen.
    pub freeze_asset: u64,
    /// New frozen state.
    pub frozen: bool,
}

/// What an application call does to the caller's relationship with the app.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnCompletion {
    /// Just call the app.
    #[default]
    NoOp,
    /// Allocate local state for the caller.
    OptIn,
    /// Release local state, subject to approval.
    CloseOut,
    /// Release local state unconditionally.
    ClearState,
    /// Replace the app's programs.
    UpdateApplication,
    /// Delete the app.
    DeleteApplication,
}

impl OnCompletion {
    /// The integer written on the wire.
    pub fn as_u64(&self) -> u64 {
        match self {
            Self::NoOp => 0,
            Self::OptIn => 1,
            Self::CloseOut => 2,
            Self::ClearState => 3,
            Self::UpdateApplication => 4,
            Self::DeleteApplication => 5,
        }
    }
}

/// Storage limits for an application's global or per-account state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateSchema {
    /// Number of integer slots.
    pub num_uint: u64,
    /// Number of byte-slice slots.
    pub num_byte_slice: u64,
}

impl StateSchema {
    fn to_canonical_map(self) -> CanonicalMap {
        let mut map = CanonicalMap::new();
        map.uint("nui", self.num_uint)
            .uint("nbs", self.num_byte_slice);
        map
    }
}

/// Application call fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationCallFields {
    /// Application being called; zero when creating.
    pub application_id: u64,
    /// Side effect on completion.
    pub on_completion: OnCompletion,
    /// Arguments visible to the application logic.
    #[serde(with = "serde_b64::list", skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Vec<u8>>,
    /// Extra accounts the logic may read.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub accounts: Vec<Address>,
    /// Extra applications whose global state the logic may read.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub foreign_apps: Vec<u64>,
    /// Extra assets the logic may read.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub foreign_assets: Vec<u64>,
    /// Approval program bytecode.
    #[serde(with = "serde_b64", skip_serializing_if = "Vec::is_empty")]
    pub approval_program: Vec<u8>,
    /// Clear-state program bytecode.
    #[serde(with = "serde_b64", skip_serializing_if = "Vec::is_empty")]
    pub clear_program: Vec<u8>,
    /// Per-account state limits (fixed at creation).
    pub local_schema: StateSchema,
    /// Global state limits (fixed at creation).
    pub global_schema: StateSchema,
}

// ---------------------------------------------------------------------------
// TxnFields
// ---------------------------------------------------------------------------

/// The kind-specific half of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TxnFields {
    /// See [`PaymentFields`].
    Payment(PaymentFields),
    /// See [`KeyRegFields`].
    KeyRegistration(KeyRegFields),
    /// See [`AssetConfigFields`].
    AssetConfig(AssetConfigFields),
    /// See [`AssetTransferFields`].
    AssetTransfer(AssetTransferFields),
    /// See [`AssetFreezeFields`].
    AssetFreeze(AssetFreezeFields),
    /// See [`ApplicationCallFields`].
    ApplicationCall(ApplicationCallFields),
}

impl TxnFields {
    /// The discriminant of this field set.
    pub fn tx_type(&self) -> TxType {
        match self {
            Self::Payment(_) => TxType::Payment,
            Self::KeyRegistration(_) => TxType::KeyRegistration,
            Self::AssetConfig(_) => TxType::AssetConfig,
            Self::AssetTransfer(_) => TxType::AssetTransfer,
            Self::AssetFreeze(_) => TxType::AssetFreeze,
            Self::ApplicationCall(_) => TxType::ApplicationCall,
        }
    }

    fn write_into(&self, map: &mut CanonicalMap) {
        match self {
            Self::Payment(f) => {
                map.fixed("rcv", f.receiver.as_bytes())
                    .uint("amt", f.amount)
                    .fixed("close", f.close_remainder_to.as_bytes());
            }
            Self::KeyRegistration(f) => {
                map.fixed("votekey", f.vote_pk.as_bytes())
                    .fixed("selkey", f.selection_pk.as_bytes())
                    .uint("votefst", f.vote_first)
                    .uint("votelst", f.vote_last)
                    .uint("votekd", f.vote_key_dilution);
            }
            Self::AssetConfig(f) => {
                map.uint("caid", f.config_asset)
                    .map("apar", f.params.to_canonical_map());
            }
            Self::AssetTransfer(f) => {
                map.uint("xaid", f.xfer_asset)
                    .uint("aamt", f.amount)
                    .fixed("asnd", f.asset_sender.as_bytes())
                    .fixed("arcv", f.asset_receiver.as_bytes())
                    .fixed("aclose", f.close_to.as_bytes());
            }
            Self::AssetFreeze(f) => {
                map.fixed("fadd", f.freeze_account.as_bytes())
                    .uint("faid", f.freeze_asset)
                    .flag("afrz", f.frozen);
            }
            Self::ApplicationCall(f) => {
                map.uint("apid", f.application_id)
                    .uint("apan", f.on_completion.as_u64())
                    .array(
                        "apaa",
                        f.args.iter().map(|a| Value::Bin(a.clone())).collect(),
                    )
                    .array(
                        "apat",
                        f.accounts
                            .iter()
                            .map(|a| Value::Bin(a.as_bytes().to_vec()))
                            .collect(),
                    )
                    .array(
                        "apfa",
                        f.foreign_apps.iter().map(|id| Value::Uint(*id)).collect(),
                    )
                    .array(
                        "apas",
                        f.foreign_assets.iter().map(|id| Value::Uint(*id)).collect(),
                    )
                    .bin("apap", &f.approval_program)
                    .bin("apsu", &f.clear_program)
                    .map("apls", f.local_schema.to_canonical_map())
                    .map("apgs", f.global_schema.to_canonical_map());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Canonical map assembly
// ---------------------------------------------------------------------------

/// Assemble the full canonical map for a header plus field set.
pub(crate) fn canonical_map(header: &Header, fields: &TxnFields) -> CanonicalMap {
    let mut map = CanonicalMap::new();
    map.str("type", fields.tx_type().as_str());
    header.write_into(&mut map);
    fields.write_into(&mut map);
    map
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
