//! Caching layer for route searches.
//!
//! The deal graph never changes once loaded, so a search outcome depends only
//! on (start, end, metric). Outcomes, including "no route", are cached under
//! that key with a TTL to bound memory.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{Location, Metric};
use crate::graph::GraphModel;
use crate::planner::{RouteOutcome, find_route};

/// Cache key for route outcomes.
type RouteKey = (Location, Location, Metric);

/// Configuration for the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 1000,
        }
    }
}

/// Route search with cached outcomes.
pub struct RouteCache {
    graph: Arc<GraphModel>,
    routes: MokaCache<RouteKey, Arc<RouteOutcome>>,
}

impl RouteCache {
    /// Create a cache over `graph` with the given configuration.
    pub fn new(graph: Arc<GraphModel>, config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { graph, routes }
    }

    /// The graph searches run over.
    pub fn graph(&self) -> &Arc<GraphModel> {
        &self.graph
    }

    /// Find the route from `start` to `end` for `metric`, searching only on
    /// a cache miss.
    pub async fn route(
        &self,
        start: &Location,
        end: &Location,
        metric: Metric,
    ) -> Arc<RouteOutcome> {
        let key = (start.clone(), end.clone(), metric);

        if let Some(cached) = self.routes.get(&key).await {
            trace!(%start, %end, %metric, "Route cache hit");
            return cached;
        }

        trace!(%start, %end, %metric, "Route cache miss");
        let outcome = Arc::new(find_route(&self.graph, start, end, metric));
        self.routes.insert(key, outcome.clone()).await;
        outcome
    }

    /// Number of cached outcomes (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.routes.entry_count()
    }

    /// Drop every cached outcome.
    pub fn invalidate_all(&self) {
        self.routes.invalidate_all();
    }
}
