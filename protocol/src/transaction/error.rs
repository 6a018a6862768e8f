//! Construction errors.
//!
//! Every failure is detected before any fee computation or signing attempt,
//! and every variant names the field that caused it so a caller can point
//! at the bad input.

use thiserror::Error;

use super::group::GroupError;
use crate::encoding::fixed::FixedFieldError;
use crate::encoding::msgpack::EncodeError;
use crate::identity::AddressError;

/// Errors returned by the transaction builders and the group binder.
#[derive(Debug, Error)]
pub enum TxnError {
    /// An address string failed to decode.
    #[error("invalid address in `{field}`: {source}")]
    AddressDecode {
        /// Input field the address came from.
        field: &'static str,
        /// Underlying codec error.
        #[source]
        source: AddressError,
    },

    /// A string or fixed-width value does not fit its slot.
    #[error("`{field}` value {value:?} is too long or the wrong size (limit {limit} bytes)")]
    FieldLength {
        /// Offending field.
        field: &'static str,
        /// Offending value, as given (base64 text for fixed-width fields).
        value: String,
        /// Byte budget or exact width.
        limit: usize,
    },

    /// A base64 field is malformed.
    #[error("`{field}` is not valid base64: {source}")]
    Base64 {
        /// Offending field.
        field: &'static str,
        /// Underlying decode error.
        #[source]
        source: base64::DecodeError,
    },

    /// A field the transaction kind cannot do without was never set.
    #[error("missing required field `{field}`")]
    MissingRequiredField {
        /// The missing field.
        field: &'static str,
    },

    /// The validity window is inverted.
    #[error("first valid round {first} is after last valid round {last}")]
    InvalidRoundRange {
        /// First valid round.
        first: u64,
        /// Last valid round.
        last: u64,
    },

    /// A list or numeric field exceeds a protocol limit.
    #[error("`{field}` has {count} entries/units, limit is {limit}")]
    LimitExceeded {
        /// Offending field.
        field: &'static str,
        /// Observed count or value.
        count: usize,
        /// Protocol limit.
        limit: usize,
    },

    /// Encoding or signing the candidate transaction failed.
    #[error("failed to encode transaction: {0}")]
    Signing(#[from] EncodeError),

    /// Group id computation failed.
    #[error(transparent)]
    Group(#[from] GroupError),
}

impl TxnError {
    /// Wrap an address codec error for `field`.
    pub fn address(field: &'static str, source: AddressError) -> Self {
        Self::AddressDecode { field, source }
    }

    /// Map a fixed-width decode failure on `field` (with input `value`).
    pub fn fixed(field: &'static str, value: &str, err: FixedFieldError) -> Self {
        match err {
            FixedFieldError::Malformed(source) => Self::Base64 { field, source },
            FixedFieldError::WrongLength { expected, .. } => Self::FieldLength {
                field,
                value: value.to_string(),
                limit: expected,
            },
        }
    }
}
