// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # algotx protocol: transaction construction library
//!
//! Builds Algorand-style ledger transactions from human-facing inputs:
//! checksummed address strings, base64 keys, round windows and amounts.
//! The output is a canonical record with its fee already settled, ready to
//! sign and submit, optionally bound into an atomic group.
//!
//! ## Architecture
//!
//! - **config**: protocol constants and the tunable [`config::ProtocolParams`].
//! - **crypto**: SHA-512/256 and Ed25519 keys. Nothing hand-rolled.
//! - **identity**: the checksummed base32 address codec.
//! - **encoding**: canonical MessagePack and the fixed-width base64 codec.
//! - **transaction**: builders, fee estimation, signing and group binding.
//!
//! ## Ground rules
//!
//! 1. Whatever is hashed or signed goes through the canonical encoder.
//! 2. Every fee path ends at the protocol floor or above.
//! 3. Inputs are validated eagerly; a builder returns a finished
//!    transaction or an error, never something in between.

pub mod config;
pub mod crypto;
pub mod encoding;
pub mod identity;
pub mod transaction;
