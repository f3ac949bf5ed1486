use alloy_primitives::{Address, Bytes, B256, U256};
use rlp_arena::{Arena, ArenaPool, RlpError, ValueRef};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

use crate::error::SignerError;

/// A legacy transaction.
///
/// `to` is absent for contract creation. The signature fields start out
/// empty and are populated in place by [`crate::Signer::sign_tx`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub nonce: u64,
    pub gas_price: u64,
    pub gas: u64,
    pub to: Option<Address>,
    pub value: U256,
    pub input: Bytes,
    pub signature: Option<TxSignature>,
}

/// The three signature fields of a signed transaction. `v` carries the
/// replay-protected recovery value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxSignature {
    pub v: u64,
    pub r: B256,
    pub s: B256,
}

impl Transaction {
    /// Appends the six unsigned fields to `list` in consensus order:
    /// `[nonce, gasPrice, gas, to, value, input]`. Shared by the signing
    /// pre-image and the raw encoding.
    pub(crate) fn marshal_fields(
        &self,
        arena: &mut Arena,
        list: ValueRef,
    ) -> Result<(), RlpError> {
        let nonce = arena.new_uint(self.nonce);
        arena.push(list, nonce)?;
        let gas_price = arena.new_uint(self.gas_price);
        arena.push(list, gas_price)?;
        let gas = arena.new_uint(self.gas);
        arena.push(list, gas)?;
        let to = match &self.to {
            Some(addr) => arena.new_bytes(addr.as_slice()),
            None => arena.new_null(),
        };
        arena.push(list, to)?;
        let value = arena.new_biguint(&self.value);
        arena.push(list, value)?;
        let input = arena.new_bytes(&self.input);
        arena.push(list, input)?;
        Ok(())
    }

    /// RLP encoding of the signed transaction,
    /// `[nonce, gasPrice, gas, to, value, input, v, r, s]`, ready for
    /// broadcast.
    pub fn raw(&self, pool: &ArenaPool) -> Result<Vec<u8>, SignerError> {
        let sig = self.signature.ok_or(SignerError::UnsignedTransaction)?;
        let mut arena = pool.get();
        let result = self.marshal_raw(&mut arena, &sig);
        pool.put(arena);
        Ok(result?)
    }

    fn marshal_raw(&self, arena: &mut Arena, sig: &TxSignature) -> Result<Vec<u8>, RlpError> {
        let list = arena.new_array();
        self.marshal_fields(arena, list)?;
        let v = arena.new_uint(sig.v);
        arena.push(list, v)?;
        let r = arena.new_biguint(&U256::from_be_bytes(sig.r.0));
        arena.push(list, r)?;
        let s = arena.new_biguint(&U256::from_be_bytes(sig.s.0));
        arena.push(list, s)?;
        arena.marshal(list)
    }

    /// Transaction hash: Keccak-256 of the raw encoding.
    pub fn hash(&self, pool: &ArenaPool) -> Result<B256, SignerError> {
        let raw = self.raw(pool)?;
        Ok(B256::from_slice(&Keccak256::digest(&raw)))
    }
}
