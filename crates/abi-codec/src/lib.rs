//! Contract ABI type system and codec.
//!
//! This crate provides:
//! - parsing of human-readable type signatures (`uint256`, `bytes32[4]`,
//!   `tuple(uint256 a, address b)[]`) into a [`Type`] tree
//! - head/tail encoding and strict, bounds-checked decoding of argument
//!   lists against the standard contract ABI byte layout
//! - 32-byte topic encoding for indexed event parameters (value types
//!   inline, dynamic types hashed)
//! - canonical signature hashing (function selectors, event ids)

pub mod decode;
pub mod encode;
pub mod error;
pub mod selector;
pub mod topics;
pub mod types;
pub mod value;

pub use decode::decode;
pub use encode::encode;
pub use error::AbiError;
pub use selector::{encode_function_call, event_id, function_selector, signature};
pub use topics::{decode_topic, encode_topic};
pub use types::{Param, Type};
pub use value::Value;
