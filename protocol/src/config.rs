//! # Protocol Configuration & Constants
//!
//! Every consensus number the transaction builders depend on lives here.
//! If you're hardcoding a fee floor or a field budget somewhere else, move
//! it here first.
//!
//! The constants mirror the consensus parameters of the live network. The
//! [`ProtocolParams`] struct groups the tunable ones so callers targeting a
//! private network with different limits can pass their own values instead
//! of patching globals.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Fee Parameters
// ---------------------------------------------------------------------------

/// Minimum transaction fee in microunits. Every fee computation path ends
/// with a clamp to this value, flat fees included.
pub const MIN_TXN_FEE: u64 = 1_000;

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Ed25519 public keys double as account addresses.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 signature length. Fixed, which is what makes the signed size of
/// a transaction predictable.
pub const SIGNATURE_LENGTH: usize = 64;

/// SHA-512/256 digest length. Genesis hashes, group ids, lease values and
/// participation keys all share this width.
pub const HASH_LENGTH: usize = 32;

/// Number of trailing digest bytes appended to a public key to form the
/// checksummed address payload.
pub const ADDRESS_CHECKSUM_LENGTH: usize = 4;

/// Length of a checksummed address string: base32 of 36 bytes, unpadded.
pub const ADDRESS_STRING_LENGTH: usize = 58;

// ---------------------------------------------------------------------------
// Domain Separation
// ---------------------------------------------------------------------------

/// Prefix hashed (and signed) in front of an encoded transaction.
pub const TX_DOMAIN: &[u8] = b"TX";

/// Prefix hashed in front of an encoded transaction group.
pub const TX_GROUP_DOMAIN: &[u8] = b"TG";

// ---------------------------------------------------------------------------
// Transaction Limits
// ---------------------------------------------------------------------------

/// Maximum number of transactions bound into one atomic group.
pub const MAX_TX_GROUP_SIZE: usize = 16;

/// Maximum note length in bytes.
pub const MAX_NOTE_LENGTH: usize = 1024;

/// Maximum asset unit name length in bytes.
pub const MAX_UNIT_NAME_LENGTH: usize = 8;

/// Maximum asset name length in bytes.
pub const MAX_ASSET_NAME_LENGTH: usize = 32;

/// Maximum asset URL length in bytes.
pub const MAX_ASSET_URL_LENGTH: usize = 32;

/// Maximum number of decimal places an asset may declare.
pub const MAX_ASSET_DECIMALS: u32 = 19;

/// Maximum number of application call arguments.
pub const MAX_APP_ARGS: usize = 16;

/// Maximum number of extra accounts an application call may reference.
pub const MAX_APP_TXN_ACCOUNTS: usize = 4;

/// Maximum number of foreign applications an application call may reference.
pub const MAX_APP_TXN_FOREIGN_APPS: usize = 2;

/// Maximum number of foreign assets an application call may reference.
pub const MAX_APP_TXN_FOREIGN_ASSETS: usize = 8;

// ---------------------------------------------------------------------------
// ProtocolParams
// ---------------------------------------------------------------------------

/// The consensus parameters the builders validate against.
///
/// `Default` yields the constants above. Deserializable so the CLI can load
/// an override file for private networks; missing fields fall back to the
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolParams {
    /// Fee floor applied after every fee computation.
    pub min_txn_fee: u64,
    /// Maximum note length in bytes.
    pub max_note_length: usize,
    /// Maximum asset unit name length in bytes.
    pub max_unit_name_length: usize,
    /// Maximum asset name length in bytes.
    pub max_asset_name_length: usize,
    /// Maximum asset URL length in bytes.
    pub max_asset_url_length: usize,
    /// Maximum asset decimals.
    pub max_asset_decimals: u32,
    /// Maximum application call arguments.
    pub max_app_args: usize,
    /// Maximum application call accounts.
    pub max_app_accounts: usize,
    /// Maximum application call foreign apps.
    pub max_app_foreign_apps: usize,
    /// Maximum application call foreign assets.
    pub max_app_foreign_assets: usize,
    /// Maximum atomic group size.
    pub max_tx_group_size: usize,
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            min_txn_fee: MIN_TXN_FEE,
            max_note_length: MAX_NOTE_LENGTH,
            max_unit_name_length: MAX_UNIT_NAME_LENGTH,
            max_asset_name_length: MAX_ASSET_NAME_LENGTH,
            max_asset_url_length: MAX_ASSET_URL_LENGTH,
            max_asset_decimals: MAX_ASSET_DECIMALS,
            max_app_args: MAX_APP_ARGS,
            max_app_accounts: MAX_APP_TXN_ACCOUNTS,
            max_app_foreign_apps: MAX_APP_TXN_FOREIGN_APPS,
            max_app_foreign_assets: MAX_APP_TXN_FOREIGN_ASSETS,
            max_tx_group_size: MAX_TX_GROUP_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_match_constants() {
        let params = ProtocolParams::default();
        assert_eq!(params.min_txn_fee, MIN_TXN_FEE);
        assert_eq!(params.max_unit_name_length, MAX_UNIT_NAME_LENGTH);
        assert_eq!(params.max_asset_name_length, MAX_ASSET_NAME_LENGTH);
        assert_eq!(params.max_tx_group_size, MAX_TX_GROUP_SIZE);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let params: ProtocolParams = serde_json::from_str(r#"{"min_txn_fee": 10}"#).unwrap();
        assert_eq!(params.min_txn_fee, 10);
        assert_eq!(params.max_asset_name_length, MAX_ASSET_NAME_LENGTH);
    }

    #[test]
    fn test_address_string_length_matches_payload() {
        // 36 bytes -> ceil(36 * 8 / 5) = 58 base32 characters.
        let payload_bits = (PUBLIC_KEY_LENGTH + ADDRESS_CHECKSUM_LENGTH) * 8;
        assert_eq!((payload_bits + 4) / 5, ADDRESS_STRING_LENGTH);
    }

    #[test]
    fn test_domain_prefixes_are_distinct() {
        assert_ne!(TX_DOMAIN, TX_GROUP_DOMAIN);
    }
}
