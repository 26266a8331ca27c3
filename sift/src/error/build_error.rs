//! Request construction errors.

use thiserror::Error;

/// Errors raised while turning an endpoint's configuration into a request.
///
/// All of these happen synchronously, before the transport is touched, and
/// are fixed by changing the caller's input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// A required positional parameter was empty or blank.
    #[error("{endpoint}: missing required parameter `{param}`")]
    MissingParameter {
        /// Endpoint identifier, e.g. `indices.create`.
        endpoint: &'static str,
        /// Name of the parameter.
        param: &'static str,
    },

    /// The endpoint requires a body and none was supplied.
    #[error("{endpoint}: a request body is required")]
    MissingBody {
        /// Endpoint identifier.
        endpoint: &'static str,
    },

    /// The endpoint does not accept a body but one was supplied.
    #[error("{endpoint}: this operation does not accept a request body")]
    UnexpectedBody {
        /// Endpoint identifier.
        endpoint: &'static str,
    },

    /// A per-call header had an invalid name or value.
    #[error("{endpoint}: invalid header `{name}`: {reason}")]
    InvalidHeader {
        /// Endpoint identifier.
        endpoint: &'static str,
        /// Header name as supplied.
        name: String,
        /// Parser message.
        reason: String,
    },

    /// A path value was `.` or `..`, which URL normalization would turn
    /// into a different path.
    #[error("{endpoint}: `{value}` is not allowed as path parameter `{param}`")]
    DotSegment {
        /// Endpoint identifier.
        endpoint: &'static str,
        /// Name of the parameter.
        param: &'static str,
        /// The rejected value.
        value: String,
    },

    /// None of the endpoint's path templates could be filled.
    #[error("{endpoint}: no path template matches the supplied parameters")]
    NoMatchingPath {
        /// Endpoint identifier.
        endpoint: &'static str,
    },
}

impl BuildError {
    /// Returns the identifier of the endpoint that rejected the input.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::MissingParameter { endpoint, .. }
            | Self::MissingBody { endpoint }
            | Self::UnexpectedBody { endpoint }
            | Self::InvalidHeader { endpoint, .. }
            | Self::DotSegment { endpoint, .. }
            | Self::NoMatchingPath { endpoint } => endpoint,
        }
    }
}
