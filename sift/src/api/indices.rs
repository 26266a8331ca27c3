//! Index administration APIs.

use std::time::Duration;

use crate::client::Client;
use crate::param::List;

endpoint! {
    /// Creates an index, optionally with settings and mappings in the body.
    IndicesCreate {
        id: "indices.create",
        method: Put,
        paths: ["/{index}"],
        required: [index],
        path_params: {},
        query: {
            timeout: Duration => with_timeout,
            master_timeout: Duration => with_master_timeout,
            wait_for_active_shards: String => with_wait_for_active_shards,
        },
        body: Optional,
    }
}

endpoint! {
    /// Deletes one or more indices.
    IndicesDelete {
        id: "indices.delete",
        method: Delete,
        paths: ["/{index}"],
        required: [index],
        path_params: {},
        query: {
            timeout: Duration => with_timeout,
            master_timeout: Duration => with_master_timeout,
            allow_no_indices: bool => with_allow_no_indices,
            ignore_unavailable: bool => with_ignore_unavailable,
            expand_wildcards: List => with_expand_wildcards,
        },
        body: Forbidden,
    }
}

endpoint! {
    /// Checks whether indices exist (200 or 404).
    IndicesExists {
        id: "indices.exists",
        method: Head,
        paths: ["/{index}"],
        required: [index],
        path_params: {},
        query: {
            allow_no_indices: bool => with_allow_no_indices,
            ignore_unavailable: bool => with_ignore_unavailable,
            expand_wildcards: List => with_expand_wildcards,
            local: bool => with_local,
        },
        body: Forbidden,
    }
}

endpoint! {
    /// Returns settings, mappings and aliases of indices.
    IndicesGet {
        id: "indices.get",
        method: Get,
        paths: ["/{index}"],
        required: [index],
        path_params: {},
        query: {
            flat_settings: bool => with_flat_settings,
            include_defaults: bool => with_include_defaults,
            ignore_unavailable: bool => with_ignore_unavailable,
            master_timeout: Duration => with_master_timeout,
        },
        body: Forbidden,
    }
}

endpoint! {
    /// Makes recent writes visible to search.
    IndicesRefresh {
        id: "indices.refresh",
        method: Post,
        paths: ["/{index}/_refresh", "/_refresh"],
        required: [],
        path_params: {
            index: List => with_index,
        },
        query: {
            allow_no_indices: bool => with_allow_no_indices,
            ignore_unavailable: bool => with_ignore_unavailable,
            expand_wildcards: List => with_expand_wildcards,
        },
        body: Forbidden,
    }
}

endpoint! {
    /// Adds fields to an index mapping.
    IndicesPutMapping {
        id: "indices.put_mapping",
        method: Put,
        paths: ["/{index}/_mapping"],
        required: [index],
        path_params: {},
        query: {
            timeout: Duration => with_timeout,
            master_timeout: Duration => with_master_timeout,
            write_index_only: bool => with_write_index_only,
            allow_no_indices: bool => with_allow_no_indices,
            ignore_unavailable: bool => with_ignore_unavailable,
        },
        body: Required,
    }
}

endpoint! {
    /// Returns index mappings.
    IndicesGetMapping {
        id: "indices.get_mapping",
        method: Get,
        paths: ["/{index}/_mapping", "/_mapping"],
        required: [],
        path_params: {
            index: List => with_index,
        },
        query: {
            ignore_unavailable: bool => with_ignore_unavailable,
            allow_no_indices: bool => with_allow_no_indices,
            local: bool => with_local,
            master_timeout: Duration => with_master_timeout,
        },
        body: Forbidden,
    }
}

endpoint! {
    /// Updates dynamic index settings.
    IndicesPutSettings {
        id: "indices.put_settings",
        method: Put,
        paths: ["/{index}/_settings", "/_settings"],
        required: [],
        path_params: {
            index: List => with_index,
        },
        query: {
            timeout: Duration => with_timeout,
            master_timeout: Duration => with_master_timeout,
            preserve_existing: bool => with_preserve_existing,
            flat_settings: bool => with_flat_settings,
        },
        body: Required,
    }
}

endpoint! {
    /// Returns index settings, optionally narrowed to setting names.
    IndicesGetSettings {
        id: "indices.get_settings",
        method: Get,
        paths: [
            "/{index}/_settings/{name}",
            "/{index}/_settings",
            "/_settings/{name}",
            "/_settings",
        ],
        required: [],
        path_params: {
            index: List => with_index,
            name: List => with_name,
        },
        query: {
            flat_settings: bool => with_flat_settings,
            include_defaults: bool => with_include_defaults,
            local: bool => with_local,
        },
        body: Forbidden,
    }
}

endpoint! {
    /// Points an alias at an index.
    IndicesPutAlias {
        id: "indices.put_alias",
        method: Put,
        paths: ["/{index}/_alias/{name}"],
        required: [index, name],
        path_params: {},
        query: {
            timeout: Duration => with_timeout,
            master_timeout: Duration => with_master_timeout,
        },
        body: Optional,
    }
}

/// The index administration namespace.
///
/// ## Examples
///
/// ```rust,ignore
/// use sift::api::IndicesCreate;
///
/// let response = client
///     .indices()
///     .create("logs", [IndicesCreate::with_body(r#"{"settings":{"number_of_shards":1}}"#)])
///     .await?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Indices<'a> {
    client: &'a Client,
}

impl<'a> Indices<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn client(&self) -> &Client {
        self.client
    }

    operations! {
        /// Creates index `index`.
        create => IndicesCreate(index);
        /// Deletes `index` (comma-separated names and wildcards allowed).
        delete => IndicesDelete(index);
        /// Checks whether `index` exists.
        exists => IndicesExists(index);
        /// Returns information about `index`.
        get => IndicesGet(index);
        /// Refreshes indices, all of them unless narrowed with [`IndicesRefresh::with_index`].
        refresh => IndicesRefresh();
        /// Updates the mapping of `index`.
        put_mapping => IndicesPutMapping(index);
        /// Returns mappings.
        get_mapping => IndicesGetMapping();
        /// Updates settings.
        put_settings => IndicesPutSettings();
        /// Returns settings.
        get_settings => IndicesGetSettings();
        /// Points alias `name` at `index`.
        put_alias => IndicesPutAlias(index, name);
    }
}

impl Client {
    /// Index administration APIs.
    pub fn indices(&self) -> Indices<'_> {
        Indices::new(self)
    }
}
