//! Fixed-width field codec.
//!
//! Participation keys, genesis hashes and metadata hashes arrive from
//! users and node APIs as standard (padded) base64 and must land in exact
//! 32-byte slots. Anything else is an error; nothing is truncated or
//! zero-filled.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;

/// Errors from decoding a fixed-width base64 field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FixedFieldError {
    /// The input is not valid base64.
    #[error("malformed base64: {0}")]
    Malformed(#[from] base64::DecodeError),

    /// The decoded payload has the wrong number of bytes.
    #[error("expected {expected} bytes, got {got}")]
    WrongLength {
        /// Required width.
        expected: usize,
        /// Decoded width.
        got: usize,
    },
}

/// Decode `input` as base64 into exactly `N` bytes.
pub fn fixed_from_base64<const N: usize>(input: &str) -> Result<[u8; N], FixedFieldError> {
    let decoded = STANDARD.decode(input)?;
    fixed_from_slice(&decoded)
}

/// Copy `bytes` into an `N`-byte array, rejecting any other length.
pub fn fixed_from_slice<const N: usize>(bytes: &[u8]) -> Result<[u8; N], FixedFieldError> {
    <[u8; N]>::try_from(bytes).map_err(|_| FixedFieldError::WrongLength {
        expected: N,
        got: bytes.len(),
    })
}

/// Decode a 32-byte base64 field.
pub fn byte32_from_base64(input: &str) -> Result<[u8; 32], FixedFieldError> {
    fixed_from_base64::<32>(input)
}

/// Standard base64 of arbitrary bytes; the inverse used by the JSON views.
pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
