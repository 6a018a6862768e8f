//! # Transaction Module
//!
//! Construction, fee settlement, signing and atomic grouping of ledger
//! transactions.
//!
//! ## Architecture
//!
//! ```text
//! types.rs        Header, per-kind field sets, fixed-width digests
//! builder.rs      Transaction, SuggestedParams, payment and keyreg builders
//! asset.rs        Asset create / config / transfer / freeze builders
//! application.rs  Application call builder
//! make.rs         Positional make_* constructors
//! fee.rs          Throwaway-key size estimator and fee floor
//! signing.rs      Ed25519 signing and the signed envelope
//! group.rs        Group id computation and assignment
//! error.rs        TxnError
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Build**: a builder decodes and validates the inputs, then settles
//!    the fee by measuring a throwaway-signed copy.
//! 2. **Group** (optional): [`assign_group_id`] stamps a shared group id
//!    onto every member of an atomic set.
//! 3. **Sign**: [`sign_transaction`] with the sender's keypair, then
//!    [`SignedTransaction::encode`] for submission.

pub mod application;
pub mod asset;
pub mod builder;
pub mod error;
pub mod fee;
pub mod group;
pub mod make;
pub mod signing;
pub mod types;

pub use application::ApplicationCallBuilder;
pub use asset::{AssetConfigBuilder, AssetCreateBuilder, AssetFreezeBuilder, AssetTransferBuilder};
pub use builder::{KeyRegBuilder, PaymentBuilder, SuggestedParams, Transaction, TxId};
pub use error::TxnError;
pub use fee::{estimate_size, normalize_fee, per_byte_fee, suggested_fee};
pub use group::{assign_group_id, compute_group_id, compute_group_id_with, GroupError};
pub use make::{
    make_asset_create_txn, make_asset_create_txn_with_flat_fee, make_key_reg_txn,
    make_key_reg_txn_with_flat_fee, make_payment_txn, make_payment_txn_with_flat_fee,
};
pub use signing::{bytes_to_sign, sign_transaction, SignedTransaction};
pub use types::{
    ApplicationCallFields, AssetConfigFields, AssetFreezeFields, AssetParams,
    AssetTransferFields, Digest, Header, KeyRegFields, OnCompletion, PaymentFields, StateSchema,
    TxType, TxnFields, VotePk, VrfPk,
};
