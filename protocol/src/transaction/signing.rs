//! Transaction signing with Ed25519 keypairs.
//!
//! The signed message is `"TX" || canonical_encoding(txn)`. The domain
//! prefix keeps a transaction signature from ever being valid for any other
//! kind of signed payload (group lists use `"TG"`).
//!
//! Signing does not touch the transaction. It produces a separate
//! [`SignedTransaction`] envelope whose encoding is what goes on the wire,
//! and whose length is what the fee is charged on.

use super::builder::Transaction;
use crate::config::{SIGNATURE_LENGTH, TX_DOMAIN};
use crate::crypto::keys::{self, Keypair};
use crate::encoding::msgpack::{CanonicalMap, EncodeError};

/// A transaction together with its sender's signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    /// The signed transaction.
    pub txn: Transaction,
    /// Ed25519 signature over [`bytes_to_sign`] of `txn`.
    pub sig: [u8; SIGNATURE_LENGTH],
}

impl SignedTransaction {
    /// Canonical encoding of `{"sig": <bin 64>, "txn": <map>}`.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut map = CanonicalMap::new();
        map.fixed("sig", &self.sig)
            .map("txn", self.txn.to_canonical_map());
        map.encode()
    }

    /// Check the signature against the transaction's sender.
    pub fn verify(&self) -> Result<bool, EncodeError> {
        let message = bytes_to_sign(&self.txn)?;
        Ok(keys::verify(&self.txn.header.sender, &message, &self.sig))
    }
}

/// The domain-separated message a transaction signature covers.
pub fn bytes_to_sign(txn: &Transaction) -> Result<Vec<u8>, EncodeError> {
    let encoded = txn.encode()?;
    let mut message = Vec::with_capacity(TX_DOMAIN.len() + encoded.len());
    message.extend_from_slice(TX_DOMAIN);
    message.extend_from_slice(&encoded);
    Ok(message)
}

/// Signs `txn` with `keypair`.
///
/// The keypair does not have to belong to the sender. The size estimator
/// relies on this: it signs with a throwaway key purely to measure the
/// envelope. A mismatched key simply yields a signature that fails
/// [`SignedTransaction::verify`].
///
/// # Example
///
/// ```rust,no_run
/// use algotx_protocol::crypto::Keypair;
/// use algotx_protocol::transaction::{sign_transaction, PaymentBuilder, SuggestedParams};
///
/// let keypair = Keypair::generate();
/// let sender = keypair.address().to_string();
/// let params = SuggestedParams::new(1, 100, 1_000, "testnet-v1.0", [7u8; 32]);
/// let tx = PaymentBuilder::new(&sender, &sender, 0, params).build().unwrap();
///
/// let stx = sign_transaction(&keypair, &tx).unwrap();
/// assert!(stx.verify().unwrap());
/// ```
pub fn sign_transaction(
    keypair: &Keypair,
    txn: &Transaction,
) -> Result<SignedTransaction, EncodeError> {
    let message = bytes_to_sign(txn)?;
    let sig = keypair.sign(&message);
    Ok(SignedTransaction {
        txn: txn.clone(),
        sig,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
