use alloy_primitives::B256;
use sha3::{Digest, Keccak256};

use crate::encode::encode;
use crate::error::AbiError;
use crate::types::Type;
use crate::value::Value;

/// Canonical signature string, e.g. `transfer(address,uint256)`.
pub fn signature(name: &str, inputs: &[Type]) -> String {
    let types: Vec<String> = inputs.iter().map(Type::canonical).collect();
    format!("{name}({})", types.join(","))
}

/// First four bytes of the Keccak-256 hash of the canonical signature.
pub fn function_selector(name: &str, inputs: &[Type]) -> [u8; 4] {
    let hash = Keccak256::digest(signature(name, inputs).as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash[..4]);
    selector
}

/// Topic 0 of an event log: the full Keccak-256 hash of the canonical
/// signature.
pub fn event_id(name: &str, inputs: &[Type]) -> B256 {
    B256::from_slice(&Keccak256::digest(signature(name, inputs).as_bytes()))
}

/// Complete calldata for a function call: selector followed by the
/// head/tail encoding of the arguments.
pub fn encode_function_call(
    name: &str,
    types: &[Type],
    values: &[Value],
) -> Result<Vec<u8>, AbiError> {
    let mut data = function_selector(name, types).to_vec();
    data.extend_from_slice(&encode(types, values)?);
    Ok(data)
}
