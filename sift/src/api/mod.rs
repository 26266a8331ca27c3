//! Endpoint builders and namespaces for the engine's REST API.
//!
//! One builder per operation, grouped the way the engine's API groups them:
//!
//! | Namespace | Access | Operations |
//! |-----------|--------|------------|
//! | root | [`Client`](crate::Client) | info, ping, search, count, index, get, exists, delete, update, bulk |
//! | indices | [`Client::indices`](crate::Client::indices) | create, delete, exists, get, refresh, put/get mapping, put/get settings, put alias |
//! | cluster | [`Client::cluster`](crate::Client::cluster) | health, stats |
//! | cat | [`Client::cat`](crate::Client::cat) | indices, health |

mod cat;
mod cluster;
mod document;
mod indices;

pub use cat::{Cat, CatHealth, CatIndices};
pub use cluster::{Cluster, ClusterHealth, ClusterStats};
pub use document::{Bulk, Count, Delete, Exists, Get, Index, Info, Ping, Search, Update};
pub use indices::{
    Indices, IndicesCreate, IndicesDelete, IndicesExists, IndicesGet, IndicesGetMapping,
    IndicesGetSettings, IndicesPutAlias, IndicesPutMapping, IndicesPutSettings, IndicesRefresh,
};
