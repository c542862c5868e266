use axum::Router;
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    middleware::OptimizerMiddleware,
    optimizer::{OptimizerOptions, WorkflowOptimizer},
    routes::{build_routes, RouteTable, DEFAULT_BASE_PATH},
};

/// Configuration for the full app bundle
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Defaults to true for the full app
    pub auto_optimize: Option<bool>,

    /// Full path of the analyze route, e.g. `/v2/optimizer/analyze`
    pub analyze_path: Option<String>,
}

/// Optimizer handle, middleware and routes, ready for the caller to wire up
pub struct OptimizerApp<O> {
    pub optimizer: Arc<O>,
    pub middleware: OptimizerMiddleware<O>,
    pub routes: RouteTable,
}

/// Compose the optimizer bundle. Nothing is registered on a server.
pub fn create_app<O: WorkflowOptimizer>(config: AppConfig) -> OptimizerApp<O> {
    let options = OptimizerOptions {
        auto_optimize: config.auto_optimize.unwrap_or(true),
    };
    let base_path = resolve_base_path(config.analyze_path.as_deref());

    tracing::info!(
        base_path = %base_path,
        auto_optimize = options.auto_optimize,
        "Creating optimizer app"
    );

    let optimizer = Arc::new(O::create(options));
    let middleware = OptimizerMiddleware::with_optimizer(Arc::clone(&optimizer));
    let routes = build_routes(Arc::clone(&optimizer), &base_path);

    OptimizerApp {
        optimizer,
        middleware,
        routes,
    }
}

/// Derive the base path from an analyze path override
pub fn resolve_base_path(analyze_path: Option<&str>) -> String {
    match analyze_path {
        Some(path) => {
            let base = path.strip_suffix("/analyze").unwrap_or(path);
            if base.is_empty() {
                DEFAULT_BASE_PATH.to_string()
            } else {
                base.to_string()
            }
        }
        None => DEFAULT_BASE_PATH.to_string(),
    }
}

impl<O: WorkflowOptimizer> OptimizerApp<O> {
    pub fn base_path(&self) -> &str {
        self.routes.base_path()
    }

    /// Routes with the middleware layered on top
    pub fn into_router(self) -> Router {
        self.middleware.apply(self.routes.into_router())
    }
}
