//! Framework error type.
//!
//! Sub-crates define their own error enums and convert them into
//! `PfCoreError` via `From` impls, or keep them separate and wrap
//! `PfCoreError` as one variant.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `pf-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum PfCoreError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `pf-*` crates.
pub type PfResult<T> = Result<T, PfCoreError>;
