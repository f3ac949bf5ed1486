use rlp_arena::RlpError;
use thiserror::Error;

/// Transaction signing and recovery errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignerError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("signing error: {0}")]
    SigningFailed(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("transaction is not signed")]
    UnsignedTransaction,

    #[error("unsupported chain configuration: {0}")]
    UnsupportedChainConfiguration(String),

    #[error("rlp encoding error: {0}")]
    Rlp(#[from] RlpError),
}
