use alloy_primitives::{Address, I256, U256};

use crate::encode::int_width_fits;
use crate::error::AbiError;
use crate::types::Type;
use crate::value::Value;

/// Decodes return data or calldata arguments against an ordered type list.
///
/// Every read is bounds-checked against `data`; truncated or corrupt input
/// fails with [`AbiError::BufferTooShort`] or [`AbiError::OffsetOutOfRange`],
/// never a panic or an out-of-bounds read. Words with non-canonical padding
/// fail with [`AbiError::TypeMismatch`].
pub fn decode(types: &[Type], data: &[u8]) -> Result<Vec<Value>, AbiError> {
    let refs: Vec<&Type> = types.iter().collect();
    decode_components(&refs, data, 0)
}

/// Decodes one head region: `base` is the absolute start of the enclosing
/// encoding, which dynamic offsets are relative to.
fn decode_components(types: &[&Type], data: &[u8], base: usize) -> Result<Vec<Value>, AbiError> {
    let mut cursor = base;
    let mut out = Vec::with_capacity(types.len());
    for ty in types {
        if ty.is_dynamic() {
            let relative = read_usize(data, cursor)?;
            let target = base
                .checked_add(relative)
                .filter(|&t| t <= data.len())
                .ok_or(AbiError::OffsetOutOfRange { offset: relative, length: data.len() })?;
            out.push(decode_value(ty, data, target)?);
            cursor += 32;
        } else {
            out.push(decode_value(ty, data, cursor)?);
            cursor += ty.head_size();
        }
    }
    Ok(out)
}

fn decode_value(ty: &Type, data: &[u8], offset: usize) -> Result<Value, AbiError> {
    match ty {
        Type::Bool => {
            let word = read_word(data, offset)?;
            if word[..31].iter().any(|&b| b != 0) || word[31] > 1 {
                return Err(AbiError::mismatch("bool", "word that is not 0 or 1"));
            }
            Ok(Value::Bool(word[31] == 1))
        }
        Type::Uint(bits) => {
            let word = read_word(data, offset)?;
            let pad = 32 - bits / 8;
            if word[..pad].iter().any(|&b| b != 0) {
                return Err(AbiError::mismatch(
                    ty.to_string(),
                    "word with nonzero high-order padding",
                ));
            }
            Ok(Value::Uint(U256::from_be_bytes(word)))
        }
        Type::Int(bits) => {
            let word = read_word(data, offset)?;
            if !int_width_fits(&word, *bits) {
                return Err(AbiError::mismatch(
                    ty.to_string(),
                    "word that is not a valid sign extension",
                ));
            }
            Ok(Value::Int(I256::from_raw(U256::from_be_bytes(word))))
        }
        Type::Address => {
            let word = read_word(data, offset)?;
            if word[..12].iter().any(|&b| b != 0) {
                return Err(AbiError::mismatch(
                    "address",
                    "word with nonzero high-order padding",
                ));
            }
            Ok(Value::Address(Address::from_slice(&word[12..])))
        }
        Type::FixedBytes(len) => {
            let word = read_word(data, offset)?;
            if word[*len..].iter().any(|&b| b != 0) {
                return Err(AbiError::mismatch(
                    ty.to_string(),
                    "word with nonzero tail padding",
                ));
            }
            Ok(Value::FixedBytes(word[..*len].to_vec()))
        }
        Type::Bytes => Ok(Value::Bytes(read_len_prefixed(data, offset)?.to_vec())),
        Type::String => {
            let raw = read_len_prefixed(data, offset)?;
            let s = std::str::from_utf8(raw)
                .map_err(|_| AbiError::mismatch("string", "invalid UTF-8"))?;
            Ok(Value::String(s.to_string()))
        }
        Type::FixedArray(elem, len) => {
            let types: Vec<&Type> = std::iter::repeat(elem.as_ref()).take(*len).collect();
            Ok(Value::Array(decode_components(&types, data, offset)?))
        }
        Type::Array(elem) => {
            let count = read_usize(data, offset)?;
            let base = offset + 32;
            let head_needed = count.saturating_mul(elem.head_size());
            if base.saturating_add(head_needed) > data.len() {
                return Err(AbiError::BufferTooShort {
                    offset: base,
                    needed: head_needed,
                    available: data.len().saturating_sub(base),
                });
            }
            let types: Vec<&Type> = std::iter::repeat(elem.as_ref()).take(count).collect();
            Ok(Value::Array(decode_components(&types, data, base)?))
        }
        Type::Tuple(params) => {
            let types: Vec<&Type> = params.iter().map(|p| &p.ty).collect();
            let values = decode_components(&types, data, offset)?;
            Ok(Value::Tuple(
                params
                    .iter()
                    .map(|p| p.name.clone())
                    .zip(values)
                    .collect(),
            ))
        }
    }
}

fn read_word(data: &[u8], offset: usize) -> Result<[u8; 32], AbiError> {
    let end = offset.checked_add(32).ok_or(AbiError::OffsetOutOfRange {
        offset,
        length: data.len(),
    })?;
    if end > data.len() {
        return Err(AbiError::BufferTooShort {
            offset,
            needed: 32,
            available: data.len().saturating_sub(offset),
        });
    }
    let mut word = [0u8; 32];
    word.copy_from_slice(&data[offset..end]);
    Ok(word)
}

/// Reads a word that must fit a buffer-relative quantity (offset or count).
fn read_usize(data: &[u8], offset: usize) -> Result<usize, AbiError> {
    let word = read_word(data, offset)?;
    // Anything wider than the buffer itself can never resolve.
    if word[..24].iter().any(|&b| b != 0) {
        return Err(AbiError::OffsetOutOfRange { offset, length: data.len() });
    }
    let mut low = [0u8; 8];
    low.copy_from_slice(&word[24..]);
    usize::try_from(u64::from_be_bytes(low))
        .map_err(|_| AbiError::OffsetOutOfRange { offset, length: data.len() })
}

fn read_len_prefixed(data: &[u8], offset: usize) -> Result<&[u8], AbiError> {
    let len = read_usize(data, offset)?;
    let start = offset + 32;
    let end = start.checked_add(len).ok_or(AbiError::OffsetOutOfRange {
        offset: start,
        length: data.len(),
    })?;
    if end > data.len() {
        return Err(AbiError::BufferTooShort {
            offset: start,
            needed: len,
            available: data.len().saturating_sub(start),
        });
    }
    Ok(&data[start..end])
}
