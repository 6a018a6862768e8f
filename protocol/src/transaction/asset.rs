//! Builders for the asset transaction kinds: create, reconfigure, destroy,
//! transfer (including opt-in and clawback) and freeze.
//!
//! Role addresses (manager, reserve, freeze, clawback) follow the usual
//! convention: an empty string leaves the role unset.

use super::builder::{
    check_count, check_len, common_setters, decode_optional, decode_required, Common,
    SuggestedParams, Transaction,
};
use super::error::TxnError;
use super::types::{
    AssetConfigFields, AssetFreezeFields, AssetParams, AssetTransferFields, Digest, TxnFields,
};

/// The four role addresses as the caller supplied them.
#[derive(Debug, Clone, Default)]
struct Roles {
    manager: String,
    reserve: String,
    freeze: String,
    clawback: String,
}

impl Roles {
    fn decode(&self, params: &mut AssetParams) -> Result<(), TxnError> {
        params.manager = decode_optional("manager", &self.manager)?;
        params.reserve = decode_optional("reserve", &self.reserve)?;
        params.freeze = decode_optional("freeze", &self.freeze)?;
        params.clawback = decode_optional("clawback", &self.clawback)?;
        Ok(())
    }
}

macro_rules! role_setters {
    () => {
        /// Account allowed to reconfigure or destroy the asset.
        pub fn manager(mut self, address: &str) -> Self {
            self.roles.manager = address.to_string();
            self
        }

        /// Account holding non-minted units.
        pub fn reserve(mut self, address: &str) -> Self {
            self.roles.reserve = address.to_string();
            self
        }

        /// Account allowed to freeze and unfreeze holdings.
        pub fn freeze(mut self, address: &str) -> Self {
            self.roles.freeze = address.to_string();
            self
        }

        /// Account allowed to revoke holdings.
        pub fn clawback(mut self, address: &str) -> Self {
            self.roles.clawback = address.to_string();
            self
        }
    };
}

// ---------------------------------------------------------------------------
// AssetCreateBuilder
// ---------------------------------------------------------------------------

/// Builds an asset creation.
#[derive(Debug, Clone)]
pub struct AssetCreateBuilder {
    common: Common,
    roles: Roles,
    total: u64,
    decimals: u32,
    default_frozen: bool,
    unit_name: String,
    asset_name: String,
    url: String,
    metadata_hash: Digest,
}

impl AssetCreateBuilder {
    /// A new asset with `total` base units, created by `creator`.
    pub fn new(creator: &str, total: u64, params: SuggestedParams) -> Self {
        Self {
            common: Common::new(creator, params),
            roles: Roles::default(),
            total,
            decimals: 0,
            default_frozen: false,
            unit_name: String::new(),
            asset_name: String::new(),
            url: String::new(),
            metadata_hash: Digest::zero(),
        }
    }

    common_setters!();
    role_setters!();

    /// Display decimals (at most 19).
    pub fn decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    /// Whether new holdings start frozen.
    pub fn default_frozen(mut self, frozen: bool) -> Self {
        self.default_frozen = frozen;
        self
    }

    /// Ticker, at most 8 bytes.
    pub fn unit_name(mut self, name: &str) -> Self {
        self.unit_name = name.to_string();
        self
    }

    /// Full name, at most 32 bytes.
    pub fn asset_name(mut self, name: &str) -> Self {
        self.asset_name = name.to_string();
        self
    }

    /// Information URL, at most 32 bytes.
    pub fn url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    /// Commitment to off-chain metadata.
    pub fn metadata_hash(mut self, hash: Digest) -> Self {
        self.metadata_hash = hash;
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<Transaction, TxnError> {
        let sender = self.common.sender()?;
        let mut params = AssetParams::default();
        self.roles.decode(&mut params)?;
        let header = self.common.header(sender)?;

        let rules = self.common.rules();
        check_len("unit_name", &self.unit_name, rules.max_unit_name_length)?;
        check_len("asset_name", &self.asset_name, rules.max_asset_name_length)?;
        check_len("url", &self.url, rules.max_asset_url_length)?;
        check_count(
            "decimals",
            self.decimals as usize,
            rules.max_asset_decimals as usize,
        )?;

        params.total = self.total;
        params.decimals = self.decimals;
        params.default_frozen = self.default_frozen;
        params.unit_name = self.unit_name;
        params.asset_name = self.asset_name;
        params.url = self.url;
        params.metadata_hash = self.metadata_hash;

        let fields = TxnFields::AssetConfig(AssetConfigFields {
            config_asset: 0,
            params,
        });
        self.common.finish(header, fields)
    }
}

// ---------------------------------------------------------------------------
// AssetConfigBuilder
// ---------------------------------------------------------------------------

/// Reconfigures or destroys an existing asset. Must be sent by its manager.
///
/// Only the role addresses are mutable after creation. A reconfiguration
/// that leaves a role empty clears it for good.
#[derive(Debug, Clone)]
pub struct AssetConfigBuilder {
    common: Common,
    roles: Roles,
    asset_id: u64,
}

impl AssetConfigBuilder {
    /// Reconfigure `asset_id`.
    pub fn new(manager: &str, asset_id: u64, params: SuggestedParams) -> Self {
        Self {
            common: Common::new(manager, params),
            roles: Roles::default(),
            asset_id,
        }
    }

    /// Destroy `asset_id`. All units must be back with the creator.
    pub fn destroy(manager: &str, asset_id: u64, params: SuggestedParams) -> Self {
        Self::new(manager, asset_id, params)
    }

    common_setters!();
    role_setters!();

    /// Validate and build.
    pub fn build(self) -> Result<Transaction, TxnError> {
        let sender = self.common.sender()?;
        let mut params = AssetParams::default();
        self.roles.decode(&mut params)?;
        let header = self.common.header(sender)?;
        if self.asset_id == 0 {
            return Err(TxnError::MissingRequiredField { field: "asset_id" });
        }

        let fields = TxnFields::AssetConfig(AssetConfigFields {
            config_asset: self.asset_id,
            params,
        });
        self.common.finish(header, fields)
    }
}

// ---------------------------------------------------------------------------
// AssetTransferBuilder
// ---------------------------------------------------------------------------

/// Moves units of an asset.
#[derive(Debug, Clone)]
pub struct AssetTransferBuilder {
    common: Common,
    receiver: String,
    asset_id: u64,
    amount: u64,
    close_to: String,
    revocation_target: String,
}

impl AssetTransferBuilder {
    /// Send `amount` base units of `asset_id` from `sender` to `receiver`.
    pub fn new(
        sender: &str,
        receiver: &str,
        asset_id: u64,
        amount: u64,
        params: SuggestedParams,
    ) -> Self {
        Self {
            common: Common::new(sender, params),
            receiver: receiver.to_string(),
            asset_id,
            amount,
            close_to: String::new(),
            revocation_target: String::new(),
        }
    }

    /// Opt `account` in to `asset_id`: a zero-amount transfer to itself.
    pub fn opt_in(account: &str, asset_id: u64, params: SuggestedParams) -> Self {
        Self::new(account, account, asset_id, 0, params)
    }

    common_setters!();

    /// Close the sender's holding, sending the remainder to `address`.
    pub fn close_to(mut self, address: &str) -> Self {
        self.close_to = address.to_string();
        self
    }

    /// Claw units back from `address`. The sender must be the clawback
    /// account.
    pub fn revocation_target(mut self, address: &str) -> Self {
        self.revocation_target = address.to_string();
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<Transaction, TxnError> {
        let sender = self.common.sender()?;
        let asset_receiver = decode_required("receiver", &self.receiver)?;
        let close_to = decode_optional("close_to", &self.close_to)?;
        let asset_sender = decode_optional("revocation_target", &self.revocation_target)?;
        let header = self.common.header(sender)?;
        if self.asset_id == 0 {
            return Err(TxnError::MissingRequiredField { field: "asset_id" });
        }

        let fields = TxnFields::AssetTransfer(AssetTransferFields {
            xfer_asset: self.asset_id,
            amount: self.amount,
            asset_sender,
            asset_receiver,
            close_to,
        });
        self.common.finish(header, fields)
    }
}

// ---------------------------------------------------------------------------
// AssetFreezeBuilder
// ---------------------------------------------------------------------------

/// Freezes or unfreezes one account's holding. Must be sent by the asset's
/// freeze account.
#[derive(Debug, Clone)]
pub struct AssetFreezeBuilder {
    common: Common,
    target: String,
    asset_id: u64,
    frozen: bool,
}

impl AssetFreezeBuilder {
    /// Set the frozen state of `target`'s `asset_id` holding.
    pub fn new(
        sender: &str,
        target: &str,
        asset_id: u64,
        frozen: bool,
        params: SuggestedParams,
    ) -> Self {
        Self {
            common: Common::new(sender, params),
            target: target.to_string(),
            asset_id,
            frozen,
        }
    }

    common_setters!();

    /// Validate and build.
    pub fn build(self) -> Result<Transaction, TxnError> {
        let sender = self.common.sender()?;
        let freeze_account = decode_required("freeze_target", &self.target)?;
        let header = self.common.header(sender)?;
        if self.asset_id == 0 {
            return Err(TxnError::MissingRequiredField { field: "asset_id" });
        }

        let fields = TxnFields::AssetFreeze(AssetFreezeFields {
            freeze_account,
            freeze_asset: self.asset_id,
            frozen: self.frozen,
        });
        self.common.finish(header, fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::Keypair;
    use crate::encoding::msgpack::Value;
    use crate::transaction::types::TxType;

    fn addr(seed: u8) -> String {
        Keypair::from_seed(&[seed; 32]).address().to_string()
    }

    fn params() -> SuggestedParams {
        SuggestedParams::new(1, 500, 1_500, "testnet-v1.0", [1u8; 32])
    }

    #[test]
    fn create_sets_params() {
        let tx = AssetCreateBuilder::new(&addr(1), 1_000_000, params())
            .decimals(2)
            .unit_name("GLD")
            .asset_name("Gold")
            .url("https://gold.example")
            .manager(&addr(2))
            .build()
            .unwrap();
        assert_eq!(tx.tx_type(), TxType::AssetConfig);
        match &tx.fields {
            TxnFields::AssetConfig(f) => {
                assert_eq!(f.config_asset, 0);
                assert_eq!(f.params.total, 1_000_000);
                assert_eq!(f.params.decimals, 2);
                assert_eq!(f.params.manager.to_string(), addr(2));
                assert!(f.params.reserve.is_zero());
            }
            other => panic!("expected asset config, got {:?}", other),
        }
    }

    #[test]
    fn unit_name_over_budget_is_rejected() {
        let err = AssetCreateBuilder::new(&addr(1), 1, params())
            .unit_name("TOOLONGNAME")
            .build()
            .unwrap_err();
        match err {
            TxnError::FieldLength {
                field,
                value,
                limit,
            } => {
                assert_eq!(field, "unit_name");
                assert_eq!(value, "TOOLONGNAME");
                assert_eq!(limit, 8);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn names_at_budget_are_accepted() {
        assert!(AssetCreateBuilder::new(&addr(1), 1, params())
            .unit_name("ABCDEFGH")
            .asset_name(&"n".repeat(32))
            .url(&"u".repeat(32))
            .build()
            .is_ok());
    }

    #[test]
    fn url_over_budget_is_rejected() {
        let err = AssetCreateBuilder::new(&addr(1), 1, params())
            .url(&"u".repeat(33))
            .build()
            .unwrap_err();
        assert!(matches!(err, TxnError::FieldLength { field: "url", .. }));
    }

    #[test]
    fn decimals_over_limit_are_rejected() {
        let err = AssetCreateBuilder::new(&addr(1), 1, params())
            .decimals(20)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TxnError::LimitExceeded {
                field: "decimals",
                count: 20,
                limit: 19
            }
        ));
    }

    #[test]
    fn bad_role_address_names_the_role() {
        let err = AssetCreateBuilder::new(&addr(1), 1, params())
            .clawback("not-an-address")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TxnError::AddressDecode {
                field: "clawback",
                ..
            }
        ));
    }

    #[test]
    fn destroy_has_no_params() {
        let tx = AssetConfigBuilder::destroy(&addr(1), 77, params())
            .build()
            .unwrap();
        let map = tx.to_canonical_map();
        assert_eq!(map.get("caid"), Some(&Value::Uint(77)));
        assert!(map.get("apar").is_none());
    }

    #[test]
    fn reconfigure_requires_asset_id() {
        let err = AssetConfigBuilder::new(&addr(1), 0, params())
            .manager(&addr(2))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TxnError::MissingRequiredField { field: "asset_id" }
        ));
    }

    #[test]
    fn opt_in_is_self_transfer_of_zero() {
        let tx = AssetTransferBuilder::opt_in(&addr(3), 10, params())
            .build()
            .unwrap();
        match &tx.fields {
            TxnFields::AssetTransfer(f) => {
                assert_eq!(f.asset_receiver, tx.header.sender);
                assert_eq!(f.amount, 0);
                assert!(f.asset_sender.is_zero());
            }
            other => panic!("expected asset transfer, got {:?}", other),
        }
        assert!(tx.to_canonical_map().get("aamt").is_none());
    }

    #[test]
    fn clawback_sets_asset_sender() {
        let tx = AssetTransferBuilder::new(&addr(1), &addr(2), 10, 5, params())
            .revocation_target(&addr(3))
            .build()
            .unwrap();
        match &tx.fields {
            TxnFields::AssetTransfer(f) => assert_eq!(f.asset_sender.to_string(), addr(3)),
            other => panic!("expected asset transfer, got {:?}", other),
        }
    }

    #[test]
    fn freeze_encodes_flag() {
        let tx = AssetFreezeBuilder::new(&addr(1), &addr(2), 10, true, params())
            .build()
            .unwrap();
        let map = tx.to_canonical_map();
        assert_eq!(map.get("afrz"), Some(&Value::Bool(true)));
        assert_eq!(map.get("faid"), Some(&Value::Uint(10)));
        assert_eq!(map.get("type"), Some(&Value::Str("afrz".to_string())));
    }
}
