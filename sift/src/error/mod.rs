//! Layered error types for the client.
//!
//! - [`SiftError`] - Top-level error returned by every client call
//! - [`BuildError`] - Invalid or missing request parameters, raised before any I/O
//! - [`TransportError`] - The exchange could not complete at all
//! - [`ConfigError`] - Client construction problems
//! - [`DecodeError`] - Convenience body decoding failures
//!
//! An error *status* returned by the engine (404, 409, ...) is not an error
//! here. It arrives as an ordinary [`Response`](crate::Response).

mod build_error;
mod config_error;
mod decode_error;
mod sift_error;
mod transport_error;

pub use build_error::BuildError;
pub use config_error::ConfigError;
pub use decode_error::DecodeError;
pub use sift_error::SiftError;
pub use transport_error::TransportError;
