//! # Token Codec Errors

use thiserror::Error;

/// Errors raised while encoding or decoding advertisement tokens.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenCodecError {
    /// A push opcode announced more bytes than the script holds
    #[error("Script truncated at offset {offset}")]
    Truncated { offset: usize },

    /// The script is not a PushDrop lock in either field order
    #[error("Not a PushDrop script: {0}")]
    NotPushDrop(String),

    /// Drop opcodes do not remove exactly the pushed fields
    #[error("Drop count mismatch: {pushed} fields pushed, {dropped} dropped")]
    DropMismatch { pushed: usize, dropped: usize },

    /// The script carries no data fields
    #[error("Script carries no fields")]
    NoFields,

    /// The lock is not a valid public key
    #[error("Invalid locking public key")]
    InvalidLockingKey,

    /// A field exceeds the largest push the script format allows
    #[error("Field too large: {0} bytes")]
    FieldTooLarge(usize),

    /// Fewer fields than an advertisement needs
    #[error("Insufficient fields: found {found}, need at least {required}")]
    InsufficientFields { found: usize, required: usize },

    /// First field is neither SHIP nor SLAP
    #[error("Unknown protocol tag: {0}")]
    UnknownProtocol(String),

    /// A text field is not UTF-8
    #[error("Field {0} is not valid UTF-8")]
    InvalidUtf8(&'static str),
}
