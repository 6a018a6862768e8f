//! # Hashing Utilities
//!
//! Every digest in the protocol is SHA-512/256: the SHA-512 compression
//! function truncated to 256 bits with its own IV. It is faster than
//! SHA-256 on 64-bit hardware and, unlike plain truncated SHA-512, not
//! subject to length extension.
//!
//! Hashes over protocol objects are domain separated by prepending a short
//! ASCII tag (`"TX"`, `"TG"`) to the encoded bytes, so a transaction can
//! never be confused with a group even if their encodings happened to
//! collide.

use sha2::{Digest as _, Sha512_256};

/// Compute the SHA-512/256 hash of the input data.
///
/// # Example
///
/// ```
/// use algotx_protocol::crypto::sha512_256;
///
/// let hash = sha512_256(b"algotx");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha512_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha512_256::new();
    hasher.update(data);
    let mut output = [0u8; 32];
    output.copy_from_slice(&hasher.finalize());
    output
}

/// Hash `domain || data` without building the concatenated buffer.
pub fn domain_separated_hash(domain: &[u8], data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha512_256::new();
    hasher.update(domain);
    hasher.update(data);
    let mut output = [0u8; 32];
    output.copy_from_slice(&hasher.finalize());
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha512_256_empty_vector() {
        // FIPS 180-4 test vector for the empty message.
        assert_eq!(
            hex::encode(sha512_256(b"")),
            "c672b8d1ef56ed28ab87c3622c5114069bdd3ad7b8f9737498d0c01ecef0967a"
        );
    }

    #[test]
    fn test_sha512_256_abc_vector() {
        assert_eq!(
            hex::encode(sha512_256(b"abc")),
            "53048e2681941ef99b2e29b76b4c7dabe4c2d0c634fc6d46e0e2f13107e7af23"
        );
    }

    #[test]
    fn test_domain_separation_matches_concatenation() {
        let concatenated = [b"TX".as_slice(), b"payload".as_slice()].concat();
        assert_eq!(
            domain_separated_hash(b"TX", b"payload"),
            sha512_256(&concatenated)
        );
    }

    #[test]
    fn test_different_domains_differ() {
        assert_ne!(
            domain_separated_hash(b"TX", b"payload"),
            domain_separated_hash(b"TG", b"payload")
        );
    }
}
