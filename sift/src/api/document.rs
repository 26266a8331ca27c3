//! Root operations: cluster info, search and single-document APIs.

use std::time::Duration;

use crate::client::Client;
use crate::param::List;

endpoint! {
    /// Returns basic information about the cluster.
    Info {
        id: "info",
        method: Get,
        paths: ["/"],
        required: [],
        path_params: {},
        query: {},
        body: Forbidden,
    }
}

endpoint! {
    /// Checks that the cluster is reachable.
    Ping {
        id: "ping",
        method: Head,
        paths: ["/"],
        required: [],
        path_params: {},
        query: {},
        body: Forbidden,
    }
}

endpoint! {
    /// Runs a search across one or more indices.
    Search {
        id: "search",
        method: Post,
        paths: ["/{index}/_search", "/_search"],
        required: [],
        path_params: {
            index: List => with_index,
        },
        query: {
            q: String => with_q,
            from: i64 => with_from,
            size: i64 => with_size,
            sort: List => with_sort,
            routing: String => with_routing,
            preference: String => with_preference,
            search_type: String => with_search_type,
            scroll: Duration => with_scroll,
            timeout: Duration => with_timeout,
            track_total_hits: bool => with_track_total_hits,
            allow_no_indices: bool => with_allow_no_indices,
            ignore_unavailable: bool => with_ignore_unavailable,
            expand_wildcards: List => with_expand_wildcards,
        },
        body: Optional,
    }
}

endpoint! {
    /// Counts documents matching a query.
    Count {
        id: "count",
        method: Post,
        paths: ["/{index}/_count", "/_count"],
        required: [],
        path_params: {
            index: List => with_index,
        },
        query: {
            q: String => with_q,
            routing: String => with_routing,
            preference: String => with_preference,
            ignore_unavailable: bool => with_ignore_unavailable,
            allow_no_indices: bool => with_allow_no_indices,
        },
        body: Optional,
    }
}

endpoint! {
    /// Stores a document, generating an id unless one is supplied.
    Index {
        id: "index",
        method: Post,
        paths: ["/{index}/_doc/{id}", "/{index}/_doc"],
        required: [index],
        path_params: {
            id: String => with_document_id,
        },
        query: {
            refresh: String => with_refresh,
            routing: String => with_routing,
            op_type: String => with_op_type,
            pipeline: String => with_pipeline,
            timeout: Duration => with_timeout,
            version: i64 => with_version,
            version_type: String => with_version_type,
            if_seq_no: i64 => with_if_seq_no,
            if_primary_term: i64 => with_if_primary_term,
            require_alias: bool => with_require_alias,
            wait_for_active_shards: String => with_wait_for_active_shards,
        },
        body: Required,
    }
}

endpoint! {
    /// Fetches a document by id.
    Get {
        id: "get",
        method: Get,
        paths: ["/{index}/_doc/{id}"],
        required: [index, id],
        path_params: {},
        query: {
            preference: String => with_preference,
            realtime: bool => with_realtime,
            refresh: bool => with_refresh,
            routing: String => with_routing,
            stored_fields: List => with_stored_fields,
            version: i64 => with_version,
        },
        body: Forbidden,
    }
}

endpoint! {
    /// Checks whether a document exists.
    Exists {
        id: "exists",
        method: Head,
        paths: ["/{index}/_doc/{id}"],
        required: [index, id],
        path_params: {},
        query: {
            preference: String => with_preference,
            realtime: bool => with_realtime,
            refresh: bool => with_refresh,
            routing: String => with_routing,
        },
        body: Forbidden,
    }
}

endpoint! {
    /// Removes a document by id.
    Delete {
        id: "delete",
        method: Delete,
        paths: ["/{index}/_doc/{id}"],
        required: [index, id],
        path_params: {},
        query: {
            refresh: String => with_refresh,
            routing: String => with_routing,
            timeout: Duration => with_timeout,
            if_seq_no: i64 => with_if_seq_no,
            if_primary_term: i64 => with_if_primary_term,
            wait_for_active_shards: String => with_wait_for_active_shards,
        },
        body: Forbidden,
    }
}

endpoint! {
    /// Partially updates a document.
    Update {
        id: "update",
        method: Post,
        paths: ["/{index}/_update/{id}"],
        required: [index, id],
        path_params: {},
        query: {
            refresh: String => with_refresh,
            retry_on_conflict: i64 => with_retry_on_conflict,
            routing: String => with_routing,
            timeout: Duration => with_timeout,
            if_seq_no: i64 => with_if_seq_no,
            if_primary_term: i64 => with_if_primary_term,
            require_alias: bool => with_require_alias,
        },
        body: Required,
    }
}

endpoint! {
    /// Executes many index/create/update/delete actions in one request.
    ///
    /// The body is newline-delimited JSON; see [`Body::ndjson`](crate::Body::ndjson).
    Bulk {
        id: "bulk",
        method: Post,
        paths: ["/{index}/_bulk", "/_bulk"],
        required: [],
        path_params: {
            index: String => with_index,
        },
        query: {
            pipeline: String => with_pipeline,
            refresh: String => with_refresh,
            routing: String => with_routing,
            timeout: Duration => with_timeout,
            require_alias: bool => with_require_alias,
            wait_for_active_shards: String => with_wait_for_active_shards,
        },
        body: Required,
        content_type: "application/x-ndjson",
    }
}

impl Client {
    fn client(&self) -> &Client {
        self
    }

    operations! {
        /// Returns basic information about the cluster.
        info => Info();
        /// Checks that the cluster is reachable. Inspect the status: 200 means up.
        ping => Ping();
        /// Runs a search. Target indices are set with [`Search::with_index`].
        search => Search();
        /// Counts matching documents.
        count => Count();
        /// Stores a document in `index`. Supply the body with [`Index::with_body`].
        index => Index(index);
        /// Fetches document `id` from `index`.
        get => Get(index, id);
        /// Checks whether document `id` exists in `index` (200 or 404).
        exists => Exists(index, id);
        /// Removes document `id` from `index`.
        delete => Delete(index, id);
        /// Partially updates document `id` in `index`.
        update => Update(index, id);
        /// Sends a bulk request.
        bulk => Bulk();
    }
}
