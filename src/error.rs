//! Crate-wide error type.
//!
//! Failure taxonomy follows the invocation boundaries:
//! - `Eval` is recovered at the command handler (printed, not propagated).
//! - `UnknownCommand` and `Usage`-class conditions never reach this type;
//!   the handler prints its usage hint and returns `Ok`.
//! - Everything else is a field-access defect while walking inspected
//!   memory and propagates to the caller unhandled. The inspector is
//!   stateless, so an aborted invocation leaves nothing to clean up.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A structured value lacks a field the `ck_rhs` layout requires.
    #[error("no field `{name}` on value `{on}`")]
    MissingField { name: &'static str, on: String },

    /// Indexed past what the underlying value can address.
    #[error("index {index} out of bounds for value `{on}`")]
    IndexOutOfBounds { index: u64, on: String },

    /// A value could not be coerced to the integer shape the layout expects.
    #[error("value `{on}` is not an integer")]
    NotAnInteger { on: String },

    /// A pointer could not be dereferenced as NUL-terminated text.
    #[error("value `{on}` is not a readable C string")]
    BadStringDeref { on: String },

    /// The host failed to evaluate an operator-supplied expression.
    #[error("{0}")]
    Eval(String),

    /// Dispatch named a command the registry has never seen.
    #[error("undefined command: {0}")]
    UnknownCommand(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap a host evaluation failure.
    pub fn eval(msg: impl Into<String>) -> Self {
        Error::Eval(msg.into())
    }
}
