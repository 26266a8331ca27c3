//! Per-call cancellation and deadlines.

use std::future::Future;
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;

use crate::error::TransportError;
use crate::response::{Response, ResponseBody};

/// Cancellation token plus optional time budget for a single call.
///
/// A context belongs to one call. Cancelling it, or letting its deadline
/// pass, aborts that call only.
///
/// ## Examples
///
/// ```rust
/// use std::time::Duration;
/// use sift::{CallContext, CancellationToken};
///
/// let token = CancellationToken::new();
/// let ctx = CallContext::new()
///     .with_cancellation(token.clone())
///     .with_timeout(Duration::from_secs(2));
///
/// token.cancel();
/// assert!(ctx.is_cancelled());
/// ```
#[derive(Debug, Clone)]
pub struct CallContext {
    token: CancellationToken,
    timeout: Option<Duration>,
    deadline: Option<Instant>,
}

impl Default for CallContext {
    fn default() -> Self {
        Self {
            token: CancellationToken::new(),
            timeout: None,
            deadline: None,
        }
    }
}

impl CallContext {
    /// Creates a context that is never cancelled and has no deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `token` to cancel the call.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Bounds the exchange to `timeout`, measured from when it starts.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Bounds the exchange to an absolute point in time.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Returns the cancellation token.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.token
    }

    /// Returns the relative timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the absolute deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` once the token has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// The earlier of the absolute deadline and `start + timeout`.
    fn effective_deadline(&self, start: Instant) -> Option<Instant> {
        let relative = self.timeout.map(|timeout| start + timeout);
        match (self.deadline, relative) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Drives `exchange` under this context.
    ///
    /// Fails without polling `exchange` when the context is already
    /// cancelled or expired. Otherwise the exchange is dropped as soon as the
    /// token fires or the deadline passes, which releases anything it held.
    ///
    /// ## Errors
    ///
    /// [`TransportError::Cancelled`], [`TransportError::Timeout`], or the
    /// exchange's own error.
    pub async fn run<T, F>(&self, exchange: F) -> Result<T, TransportError>
    where
        F: Future<Output = Result<T, TransportError>>,
    {
        let start = Instant::now();
        self.run_until(start, self.effective_deadline(start), exchange)
            .await
    }

    /// Like [`run`](Self::run) for an exchange producing a [`Response`].
    ///
    /// The context keeps governing the response body: once the token fires
    /// or the deadline passes, the next read from the body fails with the
    /// same error the exchange would have.
    ///
    /// ## Errors
    ///
    /// As for [`run`](Self::run).
    pub async fn run_response<F>(&self, exchange: F) -> Result<Response, TransportError>
    where
        F: Future<Output = Result<Response, TransportError>>,
    {
        let start = Instant::now();
        let deadline = self.effective_deadline(start);
        let response = self.run_until(start, deadline, exchange).await?;
        let budget_ms = budget_ms(start, deadline);
        Ok(response.map_body(|body| self.bound_body(body, deadline, budget_ms)))
    }

    async fn run_until<T, F>(
        &self,
        start: Instant,
        deadline: Option<Instant>,
        exchange: F,
    ) -> Result<T, TransportError>
    where
        F: Future<Output = Result<T, TransportError>>,
    {
        if self.token.is_cancelled() {
            return Err(TransportError::Cancelled);
        }

        let budget_ms = budget_ms(start, deadline);
        if deadline.is_some_and(|d| d <= start) {
            return Err(TransportError::Timeout {
                duration_ms: budget_ms,
            });
        }

        let bounded = async {
            match deadline {
                Some(deadline) => {
                    match tokio::time::timeout_at(deadline.into(), exchange).await {
                        Ok(result) => result,
                        Err(_) => Err(TransportError::Timeout {
                            duration_ms: budget_ms,
                        }),
                    }
                }
                None => exchange.await,
            }
        };

        tokio::select! {
            biased;
            () = self.token.cancelled() => Err(TransportError::Cancelled),
            result = bounded => result,
        }
    }

    /// Ends `body` with an error once the token fires or `deadline` passes.
    fn bound_body(
        &self,
        body: ResponseBody,
        deadline: Option<Instant>,
        budget_ms: u64,
    ) -> ResponseBody {
        let token = self.token.clone();
        let stop = Box::pin(async move {
            match deadline {
                Some(deadline) => tokio::select! {
                    biased;
                    () = token.cancelled_owned() => TransportError::Cancelled,
                    () = tokio::time::sleep_until(deadline.into()) => TransportError::Timeout {
                        duration_ms: budget_ms,
                    },
                },
                None => {
                    token.cancelled_owned().await;
                    TransportError::Cancelled
                }
            }
        });

        let chunks = stream::unfold(Some((body.into_stream(), stop)), |state| async move {
            let Some((mut chunks, mut stop)) = state else {
                return None;
            };
            tokio::select! {
                biased;
                error = &mut stop => Some((Err(error), None)),
                chunk = chunks.next() => chunk.map(|chunk| (chunk, Some((chunks, stop)))),
            }
        });
        ResponseBody::from_stream(chunks)
    }
}

fn budget_ms(start: Instant, deadline: Option<Instant>) -> u64 {
    deadline
        .map(|d| d.saturating_duration_since(start).as_millis() as u64)
        .unwrap_or_default()
}
