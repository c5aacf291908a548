//! Error types for `pf-publish`.

use thiserror::Error;

/// Errors a [`crate::sink::Sink`] implementation can raise.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to connect to broker: {0}")]
    Connect(String),

    #[error("failed to publish: {0}")]
    Publish(String),
}

/// Errors returned from `pf-publish`'s own constructors (not the background
/// worker thread, which logs and drops rather than propagating).
#[derive(Debug, Error)]
pub enum PfPublishError {
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Alias for `Result<T, PfPublishError>`.
pub type PfPublishResult<T> = Result<T, PfPublishError>;
