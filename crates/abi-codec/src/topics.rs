use alloy_primitives::B256;
use sha3::{Digest, Keccak256};

use crate::decode::decode;
use crate::encode::{encode, encode_value};
use crate::error::AbiError;
use crate::types::Type;
use crate::value::Value;

/// Encodes one indexed event parameter into its 32-byte topic slot.
///
/// Value types (`bool`, `intN`/`uintN`, `address`, `bytesN`) pad into the
/// word exactly as in head encoding. Everything else is stored as the
/// Keccak-256 hash of its canonical encoding: the raw contents for
/// `bytes`/`string`, the head/tail encoding for arrays and tuples.
pub fn encode_topic(ty: &Type, value: &Value) -> Result<B256, AbiError> {
    match ty {
        Type::Bool | Type::Uint(_) | Type::Int(_) | Type::Address | Type::FixedBytes(_) => {
            let word = encode(std::slice::from_ref(ty), std::slice::from_ref(value))?;
            Ok(B256::from_slice(&word))
        }
        Type::Bytes => match value {
            Value::Bytes(data) => Ok(keccak(data)),
            other => Err(AbiError::mismatch(ty.to_string(), other.kind_name())),
        },
        Type::String => match value {
            Value::String(s) => Ok(keccak(s.as_bytes())),
            other => Err(AbiError::mismatch(ty.to_string(), other.kind_name())),
        },
        Type::FixedArray(..) | Type::Array(_) | Type::Tuple(_) => {
            Ok(keccak(&encode_value(ty, value)?))
        }
    }
}

/// Decodes a topic slot back into a value.
///
/// Only value types are invertible; for every hashed kind the original
/// value is unrecoverable and this fails with
/// [`AbiError::NonInvertibleTopic`] instead of handing back the hash.
pub fn decode_topic(ty: &Type, topic: &B256) -> Result<Value, AbiError> {
    match ty {
        Type::Bool | Type::Uint(_) | Type::Int(_) | Type::Address | Type::FixedBytes(_) => {
            let mut values = decode(std::slice::from_ref(ty), topic.as_slice())?;
            Ok(values.remove(0))
        }
        _ => Err(AbiError::NonInvertibleTopic(ty.to_string())),
    }
}

fn keccak(data: &[u8]) -> B256 {
    B256::from_slice(&Keccak256::digest(data))
}
