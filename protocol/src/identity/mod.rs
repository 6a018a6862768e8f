//! # Identity Module
//!
//! Accounts are Ed25519 keypairs; their public keys are their addresses.
//! This module owns the address codec: the checksummed base32 string form
//! that users paste into payment fields, and its 32-byte binary form that
//! goes on the wire.

pub mod address;

pub use address::{decode_address, Address, AddressError};
