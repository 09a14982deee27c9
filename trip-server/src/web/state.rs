//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::RouteCache;
use crate::graph::GraphModel;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Cached route search over the deal graph
    pub routes: Arc<RouteCache>,

    /// Currency all deal prices are in
    pub currency: Arc<str>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(routes: RouteCache, currency: impl Into<Arc<str>>) -> Self {
        Self {
            routes: Arc::new(routes),
            currency: currency.into(),
        }
    }

    /// The deal graph.
    pub fn graph(&self) -> &GraphModel {
        self.routes.graph()
    }
}
