//! Typed REST client core for a distributed search and analytics engine.
//!
//! Every remote operation is a builder type in [`api`] with its required
//! parameters taken positionally and everything else supplied as a list of
//! [`RequestOption`]s. A call validates and freezes the configuration into a
//! [`RequestDescriptor`] without any I/O, executes it through a pluggable
//! [`Transport`], and hands back a [`Response`] whose body the caller reads
//! or closes.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use sift::api::{IndicesCreate, Search};
//! use sift::Client;
//!
//! let client = Client::new()?;
//!
//! let response = client
//!     .indices()
//!     .create("logs", [
//!         IndicesCreate::with_body(r#"{"settings":{"number_of_shards":1}}"#),
//!         IndicesCreate::with_timeout(Duration::from_secs(5)),
//!     ])
//!     .await?;
//! println!("{}", response.status());
//! response.close();
//!
//! let hits = client
//!     .search([Search::with_index("logs"), Search::with_size(10)])
//!     .await?
//!     .json::<serde_json::Value>()
//!     .await?;
//! ```
//!
//! ## Cancellation
//!
//! Each call can carry its own cancellation token and time budget through
//! `with_cancellation`, `with_request_timeout` and `with_deadline`. A call
//! whose context is already cancelled or expired never reaches the
//! transport.

#[macro_use]
mod macros;

pub mod api;
pub mod body;
pub mod client;
pub mod context;
pub mod descriptor;
pub mod endpoint;
pub mod error;
pub mod method;
pub mod option;
pub mod param;
pub mod query;
pub mod response;
pub mod testing;
pub mod transport;

pub use body::Body;
pub use client::{Client, ClientBuilder, ClientConfig, Credentials};
pub use context::CallContext;
pub use descriptor::RequestDescriptor;
pub use endpoint::{BodyRule, CommonParams, Endpoint};
pub use error::{BuildError, ConfigError, DecodeError, SiftError, TransportError};
pub use method::RestMethod;
pub use option::RequestOption;
pub use param::{List, ParamValue};
pub use query::QueryParams;
pub use response::{Response, ResponseBody};
pub use transport::{HttpTransport, Transport};

pub use reqwest::header::HeaderMap;
pub use reqwest::StatusCode;
pub use tokio_util::sync::CancellationToken;
