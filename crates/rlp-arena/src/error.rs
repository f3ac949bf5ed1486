use thiserror::Error;

/// RLP arena and wire-format errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RlpError {
    #[error("stale value handle: the arena was reset after the handle was created")]
    StaleValue,

    #[error("value is not an array")]
    NotAnArray,

    #[error("value is not a byte-string")]
    NotBytes,

    #[error("integer payload of {len} bytes is too wide")]
    IntegerOverflow { len: usize },

    #[error("unexpected end of input: need {needed} more bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("{0} trailing bytes after a complete item")]
    TrailingBytes(usize),

    #[error("non-canonical encoding: {0}")]
    NonCanonical(&'static str),

    #[error("declared payload length does not fit in usize")]
    LengthOverflow,

    #[error("list nesting is too deep")]
    NestingTooDeep,
}
