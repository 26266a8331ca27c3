//! Functional options over an endpoint's request configuration.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::endpoint::Endpoint;
use crate::param::List;

/// A composable mutator applied to one endpoint's configuration.
///
/// Options run in the order the caller supplies them, after required
/// parameters are set and before validation. Two options writing the same
/// field leave the value of the later one. Options are plain data: they
/// never perform I/O, and applying a clone twice has the same effect as
/// applying it once.
///
/// ## Examples
///
/// ```rust
/// use std::time::Duration;
/// use sift::api::IndicesCreate;
/// use sift::RequestOption;
///
/// let options: Vec<RequestOption<IndicesCreate>> = vec![
///     IndicesCreate::with_timeout(Duration::from_secs(1)),
///     IndicesCreate::with_pretty(),
///     IndicesCreate::with_timeout(Duration::from_secs(5)),
/// ];
///
/// let mut request = IndicesCreate::new("logs");
/// sift::option::apply_all(&mut request, options);
/// assert_eq!(request.timeout, Some(Duration::from_secs(5)));
/// ```
pub struct RequestOption<E> {
    apply: Arc<dyn Fn(&mut E) + Send + Sync>,
}

impl<E> RequestOption<E> {
    /// Wraps a mutator.
    pub fn new(apply: impl Fn(&mut E) + Send + Sync + 'static) -> Self {
        Self {
            apply: Arc::new(apply),
        }
    }

    /// Applies the option to `target`.
    pub fn apply(&self, target: &mut E) {
        (self.apply)(target)
    }
}

impl<E> Clone for RequestOption<E> {
    fn clone(&self) -> Self {
        Self {
            apply: Arc::clone(&self.apply),
        }
    }
}

impl<E> fmt::Debug for RequestOption<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestOption").finish_non_exhaustive()
    }
}

/// Applies `options` to `target` in iteration order.
pub fn apply_all<E>(target: &mut E, options: impl IntoIterator<Item = RequestOption<E>>) {
    for option in options {
        option.apply(target);
    }
}

// Options every endpoint understands. Generated builders re-expose these
// as `with_*` associated functions.
impl<E: Endpoint> RequestOption<E> {
    /// Sets a per-call header, replacing any earlier value for the name.
    pub fn header(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        Self::new(move |e: &mut E| e.common_mut().set_header(&name, &value))
    }

    /// Asks the engine to pretty-print the response.
    pub fn pretty() -> Self {
        Self::new(|e: &mut E| e.common_mut().pretty = true)
    }

    /// Asks for human-readable units in the response.
    pub fn human() -> Self {
        Self::new(|e: &mut E| e.common_mut().human = true)
    }

    /// Includes stack traces in error responses.
    pub fn error_trace() -> Self {
        Self::new(|e: &mut E| e.common_mut().error_trace = true)
    }

    /// Filters the response down to the given paths.
    pub fn filter_path(paths: impl Into<List>) -> Self {
        let paths = paths.into();
        Self::new(move |e: &mut E| e.common_mut().filter_path = Some(paths.clone()))
    }

    /// Tags the request with an `X-Opaque-Id` for tracing on the engine side.
    pub fn opaque_id(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::new(move |e: &mut E| e.common_mut().opaque_id = Some(id.clone()))
    }

    /// Bounds the exchange to `timeout`, measured from when it starts.
    pub fn request_timeout(timeout: Duration) -> Self {
        Self::new(move |e: &mut E| {
            let context = &mut e.common_mut().context;
            *context = context.clone().with_timeout(timeout);
        })
    }

    /// Bounds the exchange to an absolute deadline.
    pub fn deadline(deadline: Instant) -> Self {
        Self::new(move |e: &mut E| {
            let context = &mut e.common_mut().context;
            *context = context.clone().with_deadline(deadline);
        })
    }

    /// Cancels the exchange when `token` fires.
    pub fn cancellation(token: CancellationToken) -> Self {
        Self::new(move |e: &mut E| {
            let context = &mut e.common_mut().context;
            *context = context.clone().with_cancellation(token.clone());
        })
    }
}
