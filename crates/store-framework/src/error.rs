//! # Framework Errors
//!
//! Errors raised by the store plumbing itself, plus [`OpError`], the wrapper a
//! tracked operation returns when its remote call was rejected.

/// Errors that can occur within the store framework itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameworkError {
    #[error("Store closed")]
    StoreClosed,
    #[error("Store dropped response channel")]
    StoreDropped,
}

/// Outcome of a failed tracked operation.
///
/// `Remote` carries the collaborator's own error; its `Display` text is exactly
/// the message recorded in the store's `error` field.
#[derive(Debug, thiserror::Error)]
pub enum OpError<E> {
    #[error(transparent)]
    Remote(E),
    #[error(transparent)]
    Store(#[from] FrameworkError),
}

impl<E> OpError<E> {
    /// Returns the remote error, if the call itself was rejected.
    pub fn remote(&self) -> Option<&E> {
        match self {
            OpError::Remote(e) => Some(e),
            OpError::Store(_) => None,
        }
    }
}
