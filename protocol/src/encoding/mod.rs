//! # Encoding
//!
//! The two byte-level codecs the transaction layer sits on:
//!
//! - [`msgpack`]: canonical MessagePack, the one encoding that is hashed,
//!   signed and measured for fees.
//! - [`fixed`]: base64 into exact-width byte arrays, for keys and hashes
//!   supplied as text.

pub mod fixed;
pub mod msgpack;

pub use fixed::{byte32_from_base64, fixed_from_base64, fixed_from_slice, to_base64, FixedFieldError};
pub use msgpack::{CanonicalMap, EncodeError, Value};
