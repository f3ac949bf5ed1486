use std::fmt;

use alloy_primitives::{Address, B256};
use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;
use sha3::{Digest, Keccak256};
use zeroize::Zeroize;

use crate::error::SignerError;

/// A secp256k1 signing key.
pub struct PrivateKey {
    signing_key: SigningKey,
}

impl PrivateKey {
    /// Creates a key from raw bytes. The temporary copy is zeroized before
    /// returning.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, SignerError> {
        let mut key_bytes = *bytes;
        let signing_key = SigningKey::from_bytes((&key_bytes).into())
            .map_err(|e| SignerError::InvalidPrivateKey(e.to_string()))?;
        key_bytes.zeroize();
        Ok(Self { signing_key })
    }

    /// Generates a fresh random key.
    pub fn random() -> Self {
        Self { signing_key: SigningKey::random(&mut OsRng) }
    }

    /// The address of this key: Keccak-256 of the uncompressed public key
    /// (without the 0x04 prefix), last 20 bytes.
    pub fn address(&self) -> Address {
        address_from_pubkey(self.signing_key.verifying_key())
    }

    /// Signs a 32-byte prehash, returning the signature and recovery id.
    pub(crate) fn sign_prehash(
        &self,
        hash: &B256,
    ) -> Result<(Signature, RecoveryId), SignerError> {
        self.signing_key
            .sign_prehash(hash.as_slice())
            .map_err(|e| SignerError::SigningFailed(e.to_string()))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never leak key material through Debug output.
        f.write_str("PrivateKey(..)")
    }
}

pub(crate) fn address_from_pubkey(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = Keccak256::digest(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}
