//! Dispatch errors.

use thiserror::Error;

/// Errors produced while building or driving a dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No user handler exists for the revealed signature; the fallback fired.
    #[error("`{method}` is not implemented for {signature}")]
    Unimplemented { method: String, signature: String },

    /// An argument was fed after all positions were filled.
    #[error("all {arity} argument positions are already filled")]
    ArityExceeded { arity: usize },

    /// Finalize was requested before every position was fed.
    #[error("expected {expected} arguments before finalizing, found {found}")]
    Incomplete { expected: usize, found: usize },

    /// The requested arity is outside `1..=max`.
    #[error("arity {arity} is not supported (supported: 1..={max})")]
    UnsupportedArity { arity: usize, max: usize },

    /// A handle called its visitor zero or several times.
    #[error("handle at position {position} revealed {calls} values, expected exactly one")]
    RevealContract { position: usize, calls: usize },

    /// Two handlers were registered for one signature.
    #[error("`{method}` already has a handler for {signature}")]
    DuplicateHandler { method: String, signature: String },

    /// A handler received an argument of a type it was not registered for.
    #[error("argument {position} should be {expected}, found {found}")]
    ArgMismatch {
        position: usize,
        expected: String,
        found: String,
    },

    /// The driver was left unusable by an earlier failure.
    #[error("dispatch driver was poisoned by an earlier failure")]
    Poisoned,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DispatchError {
    /// Returns true if this error came from the fallback handler.
    pub fn is_unimplemented(&self) -> bool {
        matches!(self, DispatchError::Unimplemented { .. })
    }
}

/// Dispatch result type.
pub type DispatchResult<T> = Result<T, DispatchError>;
