//! Error types.
//!
//! Numeric operations never fail: degenerate inputs are handled by operation-local fallbacks (see
//! the crate documentation). The only recoverable errors come from parsing enumerated arguments.

use thiserror::Error;

/// Errors returned by `gpumath`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// A rotation order string did not name one of the six axis orders.
    #[error("unknown rotation order: '{0}' (expected one of xyz, xzy, yxz, yzx, zxy, zyx)")]
    UnknownRotationOrder(String),

    /// A storage kind string did not name a supported storage policy.
    #[error("unknown storage kind: '{0}' (expected one of f32, f64, array)")]
    UnknownStorageKind(String),
}

/// Convenience alias for `Result<T, gpumath::Error>`.
pub type Result<T> = std::result::Result<T, Error>;
