//! Arena-backed RLP (Recursive Length Prefix) value model and marshaler.
//!
//! RLP is the canonical binary serialization for Ethereum transactions and
//! other consensus-facing structures. This crate provides:
//! - a bump [`Arena`] that owns trees of typed values (null, byte-string,
//!   integer, list) and can be reset in O(1) for reuse
//! - a marshaler producing the canonical byte encoding (append semantics
//!   for buffer reuse)
//! - a strict parser turning untrusted bytes back into arena-owned values
//! - a thread-safe [`ArenaPool`] with check-out/check-in semantics

pub mod arena;
pub mod error;
mod marshal;
mod parse;
pub mod pool;

pub use arena::{Arena, Kind, ValueRef};
pub use error::RlpError;
pub use pool::ArenaPool;
