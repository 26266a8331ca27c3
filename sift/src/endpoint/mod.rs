//! The capability every generated endpoint builder implements.
//!
//! Each remote operation is one struct (see [`crate::api`]) holding its
//! required parameters, typed optional parameters, an optional [`Body`] and
//! the [`CommonParams`]. The struct is produced mechanically by the
//! `endpoint!` macro from a short description, and implements [`Endpoint`].
//! Turning it into a request goes through one shared path:
//! [`Endpoint::into_request`].

mod common;
pub mod path;

pub use common::CommonParams;

use crate::body::Body;
use crate::context::CallContext;
use crate::descriptor::RequestDescriptor;
use crate::error::BuildError;
use crate::method::RestMethod;
use crate::query::QueryParams;

/// Whether an endpoint takes a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyRule {
    /// The call fails with [`BuildError::MissingBody`] without one.
    Required,
    /// Sent when present.
    Optional,
    /// The call fails with [`BuildError::UnexpectedBody`] if one is set.
    Forbidden,
}

/// A buildable remote operation.
///
/// Implementors are plain configuration values: building a request from
/// one is synchronous and never touches the network.
pub trait Endpoint: Sized + Send + 'static {
    /// Operation identifier, e.g. `indices.create`.
    const ID: &'static str;
    /// HTTP method. Fixed per endpoint.
    const METHOD: RestMethod;
    /// Path templates, richest first. The first one whose placeholders can
    /// all be filled is used.
    const PATHS: &'static [&'static str];
    /// Body requirement.
    const BODY: BodyRule;
    /// `Content-Type` sent with a body unless the caller overrides it.
    const CONTENT_TYPE: &'static str = "application/json";

    /// Shared parameters.
    fn common(&self) -> &CommonParams;

    /// Shared parameters, mutably. Options write through this.
    fn common_mut(&mut self) -> &mut CommonParams;

    /// Required positional parameters by name.
    fn required_params(&self) -> Vec<(&'static str, &str)>;

    /// All path parameters that currently have a value.
    fn path_params(&self) -> Vec<(&'static str, String)>;

    /// Writes the endpoint-specific query parameters.
    fn write_query(&self, query: &mut QueryParams);

    /// The body, if set.
    fn body(&self) -> Option<&Body>;

    /// Removes and returns the body.
    fn take_body(&mut self) -> Option<Body>;

    /// Validates the configuration and freezes it into a descriptor plus
    /// the call's context.
    ///
    /// ## Errors
    ///
    /// Returns a [`BuildError`] for blank required parameters, `.` or `..`
    /// path values, a missing or unexpected body, an invalid header, or an
    /// unfillable path.
    fn into_request(mut self) -> Result<(RequestDescriptor, CallContext), BuildError> {
        for (param, value) in self.required_params() {
            if value.trim().is_empty() {
                return Err(BuildError::MissingParameter {
                    endpoint: Self::ID,
                    param,
                });
            }
        }

        let path_params = self.path_params();
        for (param, value) in &path_params {
            if let Some(segment) = value.split(',').find(|item| path::is_dot_segment(item)) {
                return Err(BuildError::DotSegment {
                    endpoint: Self::ID,
                    param: *param,
                    value: segment.to_string(),
                });
            }
        }

        let body = self.take_body();
        match (Self::BODY, &body) {
            (BodyRule::Required, None) => {
                return Err(BuildError::MissingBody { endpoint: Self::ID });
            }
            (BodyRule::Forbidden, Some(_)) => {
                return Err(BuildError::UnexpectedBody { endpoint: Self::ID });
            }
            _ => {}
        }

        let path = path::resolve(Self::PATHS, &path_params)
            .ok_or(BuildError::NoMatchingPath { endpoint: Self::ID })?;

        let mut query = QueryParams::new();
        self.write_query(&mut query);
        let common = std::mem::take(self.common_mut());
        common.write_query(&mut query);

        let content_type = body.as_ref().map(|_| Self::CONTENT_TYPE);
        let headers = common.header_map(Self::ID, content_type)?;

        let descriptor = RequestDescriptor::new(
            Self::ID,
            Self::METHOD,
            path,
            query,
            headers,
            body.map(Body::into_bytes),
        );
        Ok((descriptor, common.context))
    }
}
