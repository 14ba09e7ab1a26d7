use crate::service::ServiceError;
use store_framework::{FrameworkError, OpError};
use thiserror::Error;

/// Errors returned by store operations.
///
/// A `Remote` failure has already been recorded as the store's error message
/// by the time it is returned; callers may ignore it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A bill-of-materials operation was issued with no product selected.
    #[error("no product is selected")]
    NoSelection,

    #[error(transparent)]
    Remote(#[from] ServiceError),

    #[error(transparent)]
    Store(#[from] FrameworkError),
}

impl From<OpError<ServiceError>> for StoreError {
    fn from(e: OpError<ServiceError>) -> Self {
        match e {
            OpError::Remote(e) => StoreError::Remote(e),
            OpError::Store(e) => StoreError::Store(e),
        }
    }
}
