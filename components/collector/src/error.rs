//! Error types for collector operations.

use thiserror::Error;

use crate::Handle;

/// Errors reported by collector operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GcError {
    /// The handle is not present in the handle table.
    ///
    /// Raised by host-facing lookups such as `dereference`. The mark phase
    /// deliberately does not raise this: dangling handles encountered while
    /// marking are skipped so that partially constructed graphs still
    /// collect correctly.
    #[error("invalid handle {0}: not present in the handle table")]
    InvalidHandle(Handle),

    /// The handle exists but its object was allocated as a different
    /// concrete type than the one requested.
    #[error("type mismatch for handle {0}: object was allocated as a different type")]
    TypeMismatch(Handle),

    /// The operation is not valid in the collector's current state,
    /// e.g. `collect` without a preceding `set_root_set`.
    #[error("invalid collector state: {0}")]
    InvalidState(&'static str),
}

/// Result type for collector operations.
pub type GcResult<T> = Result<T, GcError>;
