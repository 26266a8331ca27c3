//! Top-level client error type.

use super::{BuildError, ConfigError, DecodeError, TransportError};
use thiserror::Error;

/// Top-level error type for all client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use sift::SiftError;
///
/// match client.indices().create("logs", []).await {
///     Ok(response) if response.is_error() => eprintln!("engine said {}", response.status()),
///     Ok(response) => response.close(),
///     Err(SiftError::Build(e)) => eprintln!("fix your input: {e}"),
///     Err(SiftError::Transport(e)) => eprintln!("exchange failed: {e}"),
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum SiftError {
    /// The request could not be constructed from the supplied parameters.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// The exchange with the engine did not complete.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Client configuration errors.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A response body could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl SiftError {
    /// Returns `true` if the exchange itself failed.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns `true` if the request was rejected before any I/O.
    pub fn is_build(&self) -> bool {
        matches!(self, Self::Build(_))
    }
}
