//! Typed errors for the public API

/// Errors surfaced by [`Console`](crate::Console) operations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// `get_command` was called with nothing queued. Callers are
    /// expected to check `has_command` first.
    #[error("get_command called on an empty command queue")]
    EmptyQueue,
}
