//! Error types for the cache
//!
//! Absent keys are not errors: lookups and deletions report them through
//! `Option` / no-op semantics. What remains is configuration failures and a
//! ready-made stop signal for `Cache::iterate` visitors.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A visitor passed to `Cache::iterate` asked to stop early
    #[error("Iteration aborted: {0}")]
    VisitorAborted(String),

    /// An environment variable held a value that could not be used
    #[error("Invalid configuration: {var}={value:?}")]
    InvalidConfig { var: String, value: String },
}

// == Result Type Alias ==
/// Convenience Result type for the cache crate.
pub type Result<T> = std::result::Result<T, CacheError>;
