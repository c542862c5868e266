use axum::{
    http::Method,
    routing::{get, post, MethodRouter},
    Router,
};
use std::sync::Arc;

use crate::{handlers, optimizer::WorkflowOptimizer};

/// Base path used when none is configured
pub const DEFAULT_BASE_PATH: &str = "/api/optimizer";

/// One route: HTTP method, full path and a handler bound to the optimizer
pub struct RouteDescriptor {
    pub method: Method,
    pub path: String,
    pub handler: MethodRouter,
}

/// Ordered list of the optimizer routes under one base path
pub struct RouteTable {
    base_path: String,
    routes: Vec<RouteDescriptor>,
}

/// Build the four optimizer routes under `base_path`
pub fn build_routes<O: WorkflowOptimizer>(optimizer: Arc<O>, base_path: &str) -> RouteTable {
    let base_path = base_path.trim_end_matches('/').to_string();

    let route = |method: Method, suffix: &str, handler: MethodRouter| RouteDescriptor {
        method,
        path: format!("{}{}", base_path, suffix),
        handler,
    };

    let routes = vec![
        route(
            Method::POST,
            "/analyze",
            post(handlers::analyze::<O>).with_state(Arc::clone(&optimizer)),
        ),
        route(
            Method::POST,
            "/optimize",
            post(handlers::optimize::<O>).with_state(Arc::clone(&optimizer)),
        ),
        route(
            Method::GET,
            "/metrics",
            get(handlers::metrics::<O>).with_state(Arc::clone(&optimizer)),
        ),
        route(
            Method::GET,
            "/critical-path/:executionId",
            get(handlers::critical_path::<O>).with_state(optimizer),
        ),
    ];

    RouteTable { base_path, routes }
}

impl RouteTable {
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter()
    }

    /// Look up a route by method and full path
    pub fn get(&self, method: &Method, path: &str) -> Option<&RouteDescriptor> {
        self.routes
            .iter()
            .find(|route| route.method == *method && route.path == path)
    }

    /// Register every route on a new router
    pub fn into_router(self) -> Router {
        tracing::debug!(
            base_path = %self.base_path,
            routes = self.routes.len(),
            "Registering optimizer routes"
        );

        self.routes
            .into_iter()
            .fold(Router::new(), |router, route| router.route(&route.path, route.handler))
    }
}

impl IntoIterator for RouteTable {
    type Item = RouteDescriptor;
    type IntoIter = std::vec::IntoIter<RouteDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.into_iter()
    }
}
