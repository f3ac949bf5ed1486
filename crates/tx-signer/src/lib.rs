//! EIP-155 transaction signing and sender recovery.
//!
//! This crate provides:
//! - a flat legacy [`Transaction`] record with raw RLP marshaling
//! - the [`Signer`] capability trait and its replay-protected
//!   [`Eip155Signer`] implementation (chain id 0 selects the legacy,
//!   unprotected form)
//! - secp256k1 [`PrivateKey`] handling with Keccak address derivation
//! - a static registry of EVM network definitions
//!
//! The signing pre-image is built through the signer's own arena pool from
//! [`rlp_arena`]; no global state is involved.

pub mod chains;
pub mod error;
pub mod key;
pub mod signer;
pub mod transaction;

pub use chains::{get_chain, supported_chains, EvmChain};
pub use error::SignerError;
pub use key::PrivateKey;
pub use signer::{Eip155Signer, Signer};
pub use transaction::{Transaction, TxSignature};
