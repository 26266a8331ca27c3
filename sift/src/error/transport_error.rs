//! Transport-level errors.

use thiserror::Error;

/// The exchange with the engine could not be completed.
///
/// A transport error never carries a response: either a full response
/// reached the caller, or one of these did.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The call's cancellation token fired before the exchange completed.
    #[error("request cancelled")]
    Cancelled,

    /// The call's deadline passed before the exchange completed.
    #[error("request timed out after {duration_ms}ms")]
    Timeout {
        /// The time budget the call had, in milliseconds.
        duration_ms: u64,
    },

    /// Failed to establish a connection to the node.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The HTTP exchange failed (protocol error, body read failure, ...).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A request body could not be serialized locally.
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

impl TransportError {
    /// Returns `true` if resending the same request may succeed.
    ///
    /// Cancellation and local encoding failures are never retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Connection(_) => true,
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            Self::Cancelled | Self::Encode(_) => false,
        }
    }
}
