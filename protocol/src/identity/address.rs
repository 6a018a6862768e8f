//! # Account Addresses
//!
//! An address is the 32-byte Ed25519 public key of an account. Humans see
//! it as a 58-character checksummed string:
//!
//! ```text
//! public_key (32 bytes)
//!     -> checksum = SHA-512/256(public_key)[28..32]
//!     -> base32(public_key || checksum), no padding
//!     -> "7ZUECA7HFLZTXENRV24SHLU4AVPUTMTTDUFUBNBD64C73F3UHRTHAIOF6Q"
//! ```
//!
//! The checksum catches typos before a payment goes to a key nobody holds.
//! The all-zero address is legal and is how optional address fields say
//! "unset" on the wire.

use data_encoding::BASE32_NOPAD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::{ADDRESS_CHECKSUM_LENGTH, ADDRESS_STRING_LENGTH, PUBLIC_KEY_LENGTH};
use crate::crypto::hash::sha512_256;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors produced while decoding an address string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    /// The string is not valid unpadded base32.
    #[error("address is not valid base32: {0}")]
    InvalidBase32(String),

    /// The decoded payload does not hold a key plus checksum.
    #[error("invalid address length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Expected payload length.
        expected: usize,
        /// Actual payload length.
        got: usize,
    },

    /// The trailing checksum does not match the key.
    #[error("address checksum mismatch")]
    ChecksumMismatch,
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A 32-byte account address.
///
/// # Examples
///
/// ```
/// use algotx_protocol::crypto::Keypair;
/// use algotx_protocol::identity::Address;
///
/// let kp = Keypair::generate();
/// let text = kp.address().to_string();
/// assert_eq!(text.len(), 58);
///
/// let parsed: Address = text.parse().unwrap();
/// assert_eq!(parsed, kp.address());
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; PUBLIC_KEY_LENGTH]);

impl Address {
    /// Wrap raw public key bytes.
    pub const fn new(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// The all-zero address, used for absent optional address fields.
    pub const fn zero() -> Self {
        Self([0u8; PUBLIC_KEY_LENGTH])
    }

    /// Returns `true` for the all-zero address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; PUBLIC_KEY_LENGTH]
    }

    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    /// Decode a checksummed address string.
    pub fn decode(s: &str) -> Result<Self, AddressError> {
        let raw = BASE32_NOPAD
            .decode(s.as_bytes())
            .map_err(|e| AddressError::InvalidBase32(e.to_string()))?;

        let expected = PUBLIC_KEY_LENGTH + ADDRESS_CHECKSUM_LENGTH;
        if raw.len() != expected {
            return Err(AddressError::InvalidLength {
                expected,
                got: raw.len(),
            });
        }

        let (key, checksum) = raw.split_at(PUBLIC_KEY_LENGTH);
        let mut bytes = [0u8; PUBLIC_KEY_LENGTH];
        bytes.copy_from_slice(key);

        let address = Self(bytes);
        if address.checksum() != checksum {
            return Err(AddressError::ChecksumMismatch);
        }
        Ok(address)
    }

    /// Encode as the checksummed, human-facing string.
    pub fn encode(&self) -> String {
        let mut payload = Vec::with_capacity(PUBLIC_KEY_LENGTH + ADDRESS_CHECKSUM_LENGTH);
        payload.extend_from_slice(&self.0);
        payload.extend_from_slice(&self.checksum());
        let encoded = BASE32_NOPAD.encode(&payload);
        debug_assert_eq!(encoded.len(), ADDRESS_STRING_LENGTH);
        encoded
    }

    fn checksum(&self) -> [u8; ADDRESS_CHECKSUM_LENGTH] {
        let digest = sha512_256(&self.0);
        let mut out = [0u8; ADDRESS_CHECKSUM_LENGTH];
        out.copy_from_slice(&digest[digest.len() - ADDRESS_CHECKSUM_LENGTH..]);
        out
    }
}

/// Free-function form of [`Address::decode`], the entry point the
/// transaction builders use for every address field.
pub fn decode_address(s: &str) -> Result<Address, AddressError> {
    Address::decode(s)
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.encode())
    }
}

impl From<[u8; PUBLIC_KEY_LENGTH]> for Address {
    fn from(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::decode(&s).map_err(serde::de::Error::custom)
    }
}
