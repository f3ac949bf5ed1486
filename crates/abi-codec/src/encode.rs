use alloy_primitives::U256;

use crate::error::AbiError;
use crate::types::Type;
use crate::value::Value;

/// Encodes an ordered argument list with the head/tail algorithm.
///
/// Static elements encode directly into their head slots; dynamic elements
/// leave a 32-byte offset in the head and append their own encoding to the
/// tail. The output is `head ‖ tail`.
pub fn encode(types: &[Type], values: &[Value]) -> Result<Vec<u8>, AbiError> {
    if types.len() != values.len() {
        return Err(AbiError::mismatch(
            format!("{} values", types.len()),
            format!("{} values", values.len()),
        ));
    }
    let items: Vec<(&Type, &Value)> = types.iter().zip(values.iter()).collect();
    encode_items(&items)
}

fn encode_items(items: &[(&Type, &Value)]) -> Result<Vec<u8>, AbiError> {
    let head_len: usize = items.iter().map(|(ty, _)| ty.head_size()).sum();
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for (ty, value) in items {
        if ty.is_dynamic() {
            let offset = head_len + tail.len();
            head.extend_from_slice(&U256::from(offset).to_be_bytes::<32>());
            tail.extend_from_slice(&encode_value(ty, value)?);
        } else {
            head.extend_from_slice(&encode_value(ty, value)?);
        }
    }

    head.extend_from_slice(&tail);
    Ok(head)
}

/// Encodes one value of type `ty` on its own: a single word for scalars,
/// the full head/tail layout for composites.
pub(crate) fn encode_value(ty: &Type, value: &Value) -> Result<Vec<u8>, AbiError> {
    match (ty, value) {
        (Type::Bool, Value::Bool(b)) => {
            let mut word = [0u8; 32];
            word[31] = *b as u8;
            Ok(word.to_vec())
        }
        (Type::Uint(bits), Value::Uint(n)) => {
            if n.bit_len() > *bits {
                return Err(AbiError::mismatch(
                    ty.to_string(),
                    format!("uint needing {} bits", n.bit_len()),
                ));
            }
            Ok(n.to_be_bytes::<32>().to_vec())
        }
        (Type::Int(bits), Value::Int(n)) => {
            let word = n.into_raw().to_be_bytes::<32>();
            if !int_width_fits(&word, *bits) {
                return Err(AbiError::mismatch(
                    ty.to_string(),
                    format!("int out of range for {bits} bits"),
                ));
            }
            Ok(word.to_vec())
        }
        (Type::Address, Value::Address(addr)) => {
            let mut word = [0u8; 32];
            word[12..].copy_from_slice(addr.as_slice());
            Ok(word.to_vec())
        }
        (Type::FixedBytes(len), Value::FixedBytes(data)) => {
            if data.len() != *len {
                return Err(AbiError::mismatch(
                    ty.to_string(),
                    format!("{} bytes", data.len()),
                ));
            }
            let mut word = [0u8; 32];
            word[..data.len()].copy_from_slice(data);
            Ok(word.to_vec())
        }
        (Type::Bytes, Value::Bytes(data)) => Ok(encode_len_prefixed(data)),
        (Type::String, Value::String(s)) => Ok(encode_len_prefixed(s.as_bytes())),
        (Type::FixedArray(elem, len), Value::Array(elements)) => {
            if elements.len() != *len {
                return Err(AbiError::mismatch(
                    ty.to_string(),
                    format!("array of {}", elements.len()),
                ));
            }
            let items: Vec<(&Type, &Value)> =
                elements.iter().map(|v| (elem.as_ref(), v)).collect();
            encode_items(&items)
        }
        (Type::Array(elem), Value::Array(elements)) => {
            let mut out = U256::from(elements.len()).to_be_bytes::<32>().to_vec();
            let items: Vec<(&Type, &Value)> =
                elements.iter().map(|v| (elem.as_ref(), v)).collect();
            out.extend_from_slice(&encode_items(&items)?);
            Ok(out)
        }
        (Type::Tuple(params), Value::Tuple(fields)) => {
            if fields.len() != params.len() {
                return Err(AbiError::mismatch(
                    ty.to_string(),
                    format!("tuple of {}", fields.len()),
                ));
            }
            let items: Vec<(&Type, &Value)> = params
                .iter()
                .zip(fields.iter())
                .map(|(p, (_, v))| (&p.ty, v))
                .collect();
            encode_items(&items)
        }
        (ty, value) => Err(AbiError::mismatch(ty.to_string(), value.kind_name())),
    }
}

/// Length word followed by the data, zero-padded to a 32-byte boundary.
fn encode_len_prefixed(data: &[u8]) -> Vec<u8> {
    let padded = data.len().div_ceil(32) * 32;
    let mut out = Vec::with_capacity(32 + padded);
    out.extend_from_slice(&U256::from(data.len()).to_be_bytes::<32>());
    out.extend_from_slice(data);
    out.resize(32 + padded, 0);
    out
}

/// Whether a 32-byte two's complement word is a valid sign extension for a
/// `bits`-wide signed integer.
pub(crate) fn int_width_fits(word: &[u8; 32], bits: usize) -> bool {
    let pad = 32 - bits / 8;
    if pad == 0 {
        return true;
    }
    let fill = if word[pad] & 0x80 != 0 { 0xff } else { 0x00 };
    word[..pad].iter().all(|&b| b == fill)
}
