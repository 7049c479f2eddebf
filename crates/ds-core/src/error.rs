//! Framework error type.
//!
//! Sub-crates may define their own error enums and convert `DsError` into
//! them via `From` impls (see `ds_sim::SimError`).

use thiserror::Error;

/// The top-level error type for `ds-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum DsError {
    /// A caller passed a value outside the operation's domain
    /// (e.g. deploying zero probes).  Never silently clamped.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An internal invariant could not be upheld (e.g. tick counter overflow).
    #[error("logic error: {0}")]
    Logic(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `ds-*` crates.
pub type DsResult<T> = Result<T, DsError>;
