//! Cluster-level APIs.

use std::time::Duration;

use crate::client::Client;
use crate::param::List;

endpoint! {
    /// Returns the cluster's health status, optionally scoped to indices.
    ClusterHealth {
        id: "cluster.health",
        method: Get,
        paths: ["/_cluster/health/{index}", "/_cluster/health"],
        required: [],
        path_params: {
            index: List => with_index,
        },
        query: {
            level: String => with_level,
            local: bool => with_local,
            timeout: Duration => with_timeout,
            master_timeout: Duration => with_master_timeout,
            wait_for_status: String => with_wait_for_status,
            wait_for_nodes: String => with_wait_for_nodes,
            wait_for_active_shards: String => with_wait_for_active_shards,
            wait_for_no_relocating_shards: bool => with_wait_for_no_relocating_shards,
            expand_wildcards: List => with_expand_wildcards,
        },
        body: Forbidden,
    }
}

endpoint! {
    /// Returns cluster-wide statistics, optionally filtered by node.
    ClusterStats {
        id: "cluster.stats",
        method: Get,
        paths: ["/_cluster/stats/nodes/{node_id}", "/_cluster/stats"],
        required: [],
        path_params: {
            node_id: List => with_node_id,
        },
        query: {
            flat_settings: bool => with_flat_settings,
            timeout: Duration => with_timeout,
        },
        body: Forbidden,
    }
}

/// The cluster namespace.
#[derive(Debug, Clone, Copy)]
pub struct Cluster<'a> {
    client: &'a Client,
}

impl<'a> Cluster<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn client(&self) -> &Client {
        self.client
    }

    operations! {
        /// Returns cluster health.
        health => ClusterHealth();
        /// Returns cluster statistics.
        stats => ClusterStats();
    }
}

impl Client {
    /// Cluster-level APIs.
    pub fn cluster(&self) -> Cluster<'_> {
        Cluster::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::apply_all;
    use crate::Endpoint;

    #[test]
    fn test_health_wait_for_status() {
        let mut request = ClusterHealth::new();
        apply_all(
            &mut request,
            [
                ClusterHealth::with_wait_for_status("yellow"),
                ClusterHealth::with_timeout(Duration::from_secs(30)),
            ],
        );
        let (request, _) = request.into_request().unwrap();
        assert_eq!(request.path(), "/_cluster/health");
        assert_eq!(
            request.query_string(),
            "timeout=30000ms&wait_for_status=yellow"
        );
    }

    #[test]
    fn test_health_scoped_to_index() {
        let mut request = ClusterHealth::new();
        apply_all(&mut request, [ClusterHealth::with_index("logs-*")]);
        let (request, _) = request.into_request().unwrap();
        assert_eq!(request.path(), "/_cluster/health/logs-*");
    }

    #[test]
    fn test_stats_node_filter() {
        let mut request = ClusterStats::new();
        apply_all(&mut request, [ClusterStats::with_node_id(["node-1", "node-2"])]);
        let (request, _) = request.into_request().unwrap();
        assert_eq!(request.path(), "/_cluster/stats/nodes/node-1,node-2");
    }
}
