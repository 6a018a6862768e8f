//! # Cryptographic Primitives
//!
//! Two primitives carry the whole protocol:
//!
//! - **Ed25519** for signatures: fixed 64-byte output, deterministic,
//!   and the public key doubles as the account address.
//! - **SHA-512/256** for every digest: transaction ids, group ids and
//!   address checksums.
//!
//! Both are thin wrappers around audited crates (`ed25519-dalek`, `sha2`).

pub mod hash;
pub mod keys;

pub use hash::{domain_separated_hash, sha512_256};
pub use keys::{verify, Keypair};
