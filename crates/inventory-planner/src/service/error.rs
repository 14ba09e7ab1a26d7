use thiserror::Error;

/// Why a call to the inventory service did not succeed.
///
/// Every variant renders as one human-readable message, which is what a
/// store records when the call is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The call never completed.
    #[error("network failure: {0}")]
    Network(String),

    /// The service rejected the input.
    #[error("{0}")]
    Validation(String),

    /// A referenced id does not exist on the service.
    #[error("{0}")]
    NotFound(String),

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}
