use alloy_primitives::{Address, B256};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use rlp_arena::{Arena, ArenaPool, RlpError};
use sha3::{Digest, Keccak256};

use crate::chains::EvmChain;
use crate::error::SignerError;
use crate::key::{address_from_pubkey, PrivateKey};
use crate::transaction::{Transaction, TxSignature};

/// Signing capability over transactions.
///
/// [`Eip155Signer`] is the one implementation; other signing schemes slot
/// in as further implementations of this trait.
pub trait Signer {
    /// Recovers the sender address of a signed transaction.
    fn recover_sender(&self, tx: &Transaction) -> Result<Address, SignerError>;

    /// Signs `tx` in place, populating its signature fields.
    fn sign_tx(&self, tx: &mut Transaction, key: &PrivateKey) -> Result<(), SignerError>;
}

/// Replay-protected signer binding signatures to one chain id.
///
/// Chain id 0 selects the legacy form: a six-field pre-image and
/// `v = recid + 27`. Any other chain id appends `[chainID, 0, 0]` to the
/// pre-image and uses `v = recid + 35 + 2·chainID`. Signing and recovery
/// must use the same chain id; recovering with a different one yields
/// either an error or the wrong sender, never the right one.
pub struct Eip155Signer {
    chain_id: u64,
    pool: ArenaPool,
}

impl Eip155Signer {
    /// Creates a signer with its own arena pool.
    pub fn new(chain_id: u64) -> Self {
        Self { chain_id, pool: ArenaPool::new() }
    }

    pub fn for_chain(chain: &EvmChain) -> Self {
        Self::new(chain.chain_id)
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Keccak-256 of the RLP signing pre-image.
    pub fn signing_hash(&self, tx: &Transaction) -> Result<B256, SignerError> {
        let mut arena = self.pool.get();
        let result = build_preimage(&mut arena, tx, self.chain_id);
        self.pool.put(arena);
        Ok(B256::from_slice(&Keccak256::digest(result?)))
    }
}

fn build_preimage(
    arena: &mut Arena,
    tx: &Transaction,
    chain_id: u64,
) -> Result<Vec<u8>, RlpError> {
    let list = arena.new_array();
    tx.marshal_fields(arena, list)?;
    if chain_id != 0 {
        let id = arena.new_uint(chain_id);
        arena.push(list, id)?;
        let zero = arena.new_uint(0);
        arena.push(list, zero)?;
        let zero = arena.new_uint(0);
        arena.push(list, zero)?;
    }
    arena.marshal(list)
}

impl Signer for Eip155Signer {
    fn sign_tx(&self, tx: &mut Transaction, key: &PrivateKey) -> Result<(), SignerError> {
        let hash = self.signing_hash(tx)?;
        let (signature, recovery_id) = key.sign_prehash(&hash)?;
        let v = encode_v(recovery_id.to_byte(), self.chain_id)?;
        tx.signature = Some(TxSignature {
            v,
            r: B256::from_slice(&signature.r().to_bytes()),
            s: B256::from_slice(&signature.s().to_bytes()),
        });
        Ok(())
    }

    fn recover_sender(&self, tx: &Transaction) -> Result<Address, SignerError> {
        let sig = tx.signature.ok_or(SignerError::UnsignedTransaction)?;
        let recovery_id = RecoveryId::from_byte(decode_v(sig.v, self.chain_id)?)
            .ok_or_else(|| SignerError::InvalidSignature("recovery id out of range".into()))?;
        let signature = Signature::from_scalars(sig.r.0, sig.s.0)
            .map_err(|e| SignerError::InvalidSignature(e.to_string()))?;

        let hash = self.signing_hash(tx)?;
        let verifying_key =
            VerifyingKey::recover_from_prehash(hash.as_slice(), &signature, recovery_id)
                .map_err(|e| SignerError::InvalidSignature(e.to_string()))?;
        Ok(address_from_pubkey(&verifying_key))
    }
}

/// `v = recid + 35 + 2·chainID` for the protected form, `recid + 27` for
/// the legacy form. Checked arithmetic: a chain id wide enough to wrap is
/// reported instead of silently producing a colliding `v`.
fn encode_v(recovery_id: u8, chain_id: u64) -> Result<u64, SignerError> {
    let recid = u64::from(recovery_id);
    if chain_id == 0 {
        return Ok(recid + 27);
    }
    chain_id
        .checked_mul(2)
        .and_then(|doubled| doubled.checked_add(35))
        .and_then(|offset| offset.checked_add(recid))
        .ok_or_else(|| {
            SignerError::UnsupportedChainConfiguration(format!(
                "chain id {chain_id} overflows the v computation"
            ))
        })
}

/// Inverts [`encode_v`]; the result must be the recovery id 0 or 1.
fn decode_v(v: u64, chain_id: u64) -> Result<u8, SignerError> {
    let recid = if chain_id == 0 {
        v.checked_sub(27)
    } else {
        chain_id
            .checked_mul(2)
            .and_then(|doubled| doubled.checked_add(35))
            .and_then(|offset| v.checked_sub(offset))
    };
    match recid {
        Some(recid @ 0..=1) => Ok(recid as u8),
        _ => Err(SignerError::InvalidSignature(format!(
            "v {v} does not match chain id {chain_id}"
        ))),
    }
}
