//! # Key Management
//!
//! Ed25519 keypairs for ledger accounts. An account's address *is* its
//! public key (plus a checksum, see [`crate::identity::address`]), so a
//! keypair is all it takes to own an account.
//!
//! ## Security considerations
//!
//! - Secret keys are zeroized on drop (ed25519-dalek does this for us).
//! - Generation uses the OS CSPRNG (`OsRng`).
//! - Key bytes are never logged. The `Debug` impl prints the address only.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use std::fmt;

use crate::config::SIGNATURE_LENGTH;
use crate::identity::Address;

/// An Ed25519 signing keypair.
///
/// Not `Serialize` or `Clone`. Secret material leaves only through
/// [`Keypair::secret_key_bytes`], and the disposable keys used for size
/// estimation never outlive the function that created them.
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a fresh keypair from the OS cryptographic RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Build a keypair deterministically from a 32-byte seed.
    ///
    /// In Ed25519 the 32-byte secret key is the seed, so this round-trips
    /// with [`secret_key_bytes`](Self::secret_key_bytes).
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// The raw 32-byte public key.
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// The account address controlled by this keypair.
    pub fn address(&self) -> Address {
        Address::new(self.public_key_bytes())
    }

    /// Sign a message. Deterministic for a given (key, message) pair.
    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_LENGTH] {
        self.signing_key.sign(message).to_bytes()
    }

    /// Exports the raw 32-byte secret key. Handle with care.
    pub fn secret_key_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }

    /// Hex-encoded public key, for display.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key_bytes())
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair(address={})", self.address())
    }
}

/// Verify an Ed25519 signature made by the owner of `address`.
///
/// Returns `false` for any failure, including an address whose bytes are
/// not a valid curve point.
pub fn verify(address: &Address, message: &[u8], signature: &[u8; SIGNATURE_LENGTH]) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(address.as_bytes()) else {
        return false;
    };
    verifying_key
        .verify(message, &Signature::from_bytes(signature))
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify() {
        let kp = Keypair::generate();
        let sig = kp.sign(b"pay 5 algos");
        assert!(verify(&kp.address(), b"pay 5 algos", &sig));
        assert!(!verify(&kp.address(), b"pay 6 algos", &sig));
    }

    #[test]
    fn test_wrong_key_fails() {
        let kp1 = Keypair::generate();
        let kp2 = Keypair::generate();
        let sig = kp1.sign(b"message");
        assert!(!verify(&kp2.address(), b"message", &sig));
    }

    #[test]
    fn test_signatures_are_deterministic() {
        let kp = Keypair::from_seed(&[7u8; 32]);
        assert_eq!(kp.sign(b"same"), kp.sign(b"same"));
    }

    #[test]
    fn test_seed_roundtrip() {
        let kp = Keypair::generate();
        let restored = Keypair::from_seed(&kp.secret_key_bytes());
        assert_eq!(kp.public_key_bytes(), restored.public_key_bytes());
    }

    #[test]
    fn test_generated_keys_differ() {
        assert_ne!(
            Keypair::generate().public_key_bytes(),
            Keypair::generate().public_key_bytes()
        );
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let kp = Keypair::from_seed(&[0xAB; 32]);
        let dbg = format!("{:?}", kp);
        assert!(!dbg.contains(&hex::encode(kp.secret_key_bytes())));
        assert!(dbg.contains(&kp.address().to_string()));
    }
}
