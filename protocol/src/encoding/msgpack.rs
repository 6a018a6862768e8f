//! Canonical MessagePack encoding.
//!
//! Transactions are hashed and signed over their canonical encoding, so two
//! implementations must produce byte-identical output for the same record.
//! Canonical here means:
//!
//! 1. Map keys are sorted lexicographically by their UTF-8 bytes.
//! 2. Zero values (0, `false`, empty strings/bytes/arrays/maps, all-zero
//!    fixed arrays) are omitted entirely, never written as explicit zeros.
//! 3. Every integer, length and string header uses its shortest form.
//!
//! Rule 3 is exactly what the `rmp` primitive writers do. Rules 1 and 2 are
//! enforced by [`CanonicalMap`], which is the only way to build a map here.

use std::collections::BTreeMap;

use rmp::encode::{self, ValueWriteError};
use thiserror::Error;

/// Errors raised while writing MessagePack bytes.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// A primitive writer failed.
    #[error("msgpack value write failed: {0}")]
    Value(#[from] ValueWriteError),

    /// The underlying buffer failed.
    #[error("msgpack write failed: {0}")]
    Io(#[from] std::io::Error),

    /// A collection or byte string exceeds the 32-bit msgpack length limit.
    #[error("{kind} of length {len} exceeds the msgpack length limit")]
    TooLong {
        /// What overflowed ("array", "map", ...).
        kind: &'static str,
        /// Its length.
        len: usize,
    },
}

/// A value that can appear in a canonical map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Unsigned integer.
    Uint(u64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Str(String),
    /// Raw bytes.
    Bin(Vec<u8>),
    /// Array; elements are written even when zero-valued.
    Array(Vec<Value>),
    /// Nested canonical map.
    Map(CanonicalMap),
}

impl Value {
    fn write(&self, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
        match self {
            Self::Uint(v) => {
                encode::write_uint(buf, *v)?;
            }
            Self::Bool(v) => encode::write_bool(buf, *v)?,
            Self::Str(s) => {
                check_len("string", s.len())?;
                encode::write_str(buf, s)?;
            }
            Self::Bin(b) => {
                check_len("binary", b.len())?;
                encode::write_bin(buf, b)?;
            }
            Self::Array(items) => {
                encode::write_array_len(buf, check_len("array", items.len())?)?;
                for item in items {
                    item.write(buf)?;
                }
            }
            Self::Map(map) => map.write(buf)?,
        }
        Ok(())
    }
}

fn check_len(kind: &'static str, len: usize) -> Result<u32, EncodeError> {
    u32::try_from(len).map_err(|_| EncodeError::TooLong { kind, len })
}

/// A map with sorted keys that silently drops zero-valued entries.
///
/// The insert helpers return `&mut Self` so a record can be described in
/// one chained expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalMap {
    entries: BTreeMap<&'static str, Value>,
}

impl CanonicalMap {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of (non-zero) entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if every inserted value was zero.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up an entry, mostly for tests.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Insert an unsigned integer; zero is omitted.
    pub fn uint(&mut self, key: &'static str, value: u64) -> &mut Self {
        if value != 0 {
            self.entries.insert(key, Value::Uint(value));
        }
        self
    }

    /// Insert a boolean; `false` is omitted.
    pub fn flag(&mut self, key: &'static str, value: bool) -> &mut Self {
        if value {
            self.entries.insert(key, Value::Bool(true));
        }
        self
    }

    /// Insert a string; empty is omitted.
    pub fn str(&mut self, key: &'static str, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.entries.insert(key, Value::Str(value.to_string()));
        }
        self
    }

    /// Insert a byte string; empty is omitted.
    pub fn bin(&mut self, key: &'static str, value: &[u8]) -> &mut Self {
        if !value.is_empty() {
            self.entries.insert(key, Value::Bin(value.to_vec()));
        }
        self
    }

    /// Insert a fixed-width byte array; all-zero is omitted.
    pub fn fixed<const N: usize>(&mut self, key: &'static str, value: &[u8; N]) -> &mut Self {
        if value.iter().any(|b| *b != 0) {
            self.entries.insert(key, Value::Bin(value.to_vec()));
        }
        self
    }

    /// Insert an array; empty is omitted.
    pub fn array(&mut self, key: &'static str, items: Vec<Value>) -> &mut Self {
        if !items.is_empty() {
            self.entries.insert(key, Value::Array(items));
        }
        self
    }

    /// Insert a nested map; an empty map is omitted.
    pub fn map(&mut self, key: &'static str, map: CanonicalMap) -> &mut Self {
        if !map.is_empty() {
            self.entries.insert(key, Value::Map(map));
        }
        self
    }

    /// Append the canonical encoding of this map to `buf`.
    pub fn write(&self, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
        encode::write_map_len(buf, check_len("map", self.entries.len())?)?;
        for (key, value) in &self.entries {
            encode::write_str(buf, key)?;
            value.write(buf)?;
        }
        Ok(())
    }

    /// The canonical encoding of this map.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut buf = Vec::with_capacity(256);
        self.write(&mut buf)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_sorted() {
        let mut map = CanonicalMap::new();
        map.uint("snd", 1).uint("amt", 2).uint("fee", 3);
        let bytes = map.encode().unwrap();
        assert_eq!(
            bytes,
            vec![
                0x83, // fixmap(3)
                0xa3, b'a', b'm', b't', 0x02, //
                0xa3, b'f', b'e', b'e', 0x03, //
                0xa3, b's', b'n', b'd', 0x01,
            ]
        );
    }

    #[test]
    fn zero_values_are_omitted() {
        let mut map = CanonicalMap::new();
        map.uint("amt", 0)
            .flag("df", false)
            .str("gen", "")
            .bin("note", &[])
            .fixed("grp", &[0u8; 32])
            .array("apaa", Vec::new())
            .map("apar", CanonicalMap::new());
        assert!(map.is_empty());
        assert_eq!(map.encode().unwrap(), vec![0x80]);
    }

    #[test]
    fn integers_use_shortest_form() {
        let cases: [(u64, &[u8]); 5] = [
            (1, &[0x01]),
            (127, &[0x7f]),
            (200, &[0xcc, 0xc8]),
            (1_000, &[0xcd, 0x03, 0xe8]),
            (5_000_000, &[0xce, 0x00, 0x4c, 0x4b, 0x40]),
        ];
        for (value, expected) in cases {
            let mut buf = Vec::new();
            Value::Uint(value).write(&mut buf).unwrap();
            assert_eq!(buf, expected, "encoding of {}", value);
        }
    }

    #[test]
    fn fixed_arrays_become_bin8() {
        let mut map = CanonicalMap::new();
        map.fixed("gh", &[0xAA; 32]);
        let bytes = map.encode().unwrap();
        assert_eq!(&bytes[..6], &[0x81, 0xa2, b'g', b'h', 0xc4, 0x20]);
        assert_eq!(bytes.len(), 6 + 32);
    }

    #[test]
    fn long_strings_use_str8() {
        let mut buf = Vec::new();
        Value::Str("x".repeat(40)).write(&mut buf).unwrap();
        assert_eq!(&buf[..2], &[0xd9, 40]);
    }

    #[test]
    fn arrays_keep_zero_elements() {
        let mut map = CanonicalMap::new();
        map.array("apaa", vec![Value::Bin(Vec::new()), Value::Uint(0)]);
        let bytes = map.encode().unwrap();
        assert_eq!(
            bytes,
            vec![0x81, 0xa4, b'a', b'p', b'a', b'a', 0x92, 0xc4, 0x00, 0x00]
        );
    }

    #[test]
    fn nested_maps_are_canonical() {
        let mut inner = CanonicalMap::new();
        inner.uint("t", 10).flag("df", true);
        let mut outer = CanonicalMap::new();
        outer.map("apar", inner);
        let bytes = outer.encode().unwrap();
        assert_eq!(
            bytes,
            vec![0x81, 0xa4, b'a', b'p', b'a', b'r', 0x82, 0xa2, b'd', b'f', 0xc3, 0xa1, b't', 0x0a]
        );
    }
}
