use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the simulation core.
///
/// The engine validates very little on purpose: only parameters that would make the
/// collision math undefined (non-positive mass, a degenerate arena) are rejected.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// A strict lookup found nothing.
    #[error("not found: {0}")]
    NotFound(String),
}
