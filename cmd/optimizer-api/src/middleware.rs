use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::optimizer::{OptimizerOptions, WorkflowOptimizer};

/// Configuration for the standalone middleware
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiddlewareConfig {
    /// Defaults to false when the middleware is built on its own
    pub auto_optimize: Option<bool>,
}

/// Request extension carrying the shared optimizer handle
pub struct OptimizerContext<O>(pub Arc<O>);

impl<O> Clone for OptimizerContext<O> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

/// Response extension holding the analysis returned by `POST /analyze`
#[derive(Debug, Clone)]
pub struct WorkflowAnalysis<T>(pub T);

/// Response extension holding the result of `GET /critical-path/:executionId`
#[derive(Debug, Clone)]
pub struct CriticalPathAnalysis<T>(pub T);

/// Attaches one optimizer handle to every request passing through it
pub struct OptimizerMiddleware<O> {
    optimizer: Arc<O>,
}

impl<O> Clone for OptimizerMiddleware<O> {
    fn clone(&self) -> Self {
        Self {
            optimizer: Arc::clone(&self.optimizer),
        }
    }
}

impl<O: WorkflowOptimizer> OptimizerMiddleware<O> {
    /// Build the middleware around a freshly constructed optimizer
    pub fn new(config: MiddlewareConfig) -> Self {
        let options = OptimizerOptions {
            auto_optimize: config.auto_optimize.unwrap_or(false),
        };

        tracing::debug!(
            auto_optimize = options.auto_optimize,
            "Creating optimizer for middleware"
        );

        Self::with_optimizer(Arc::new(O::create(options)))
    }

    /// Build the middleware around an existing handle
    pub fn with_optimizer(optimizer: Arc<O>) -> Self {
        Self { optimizer }
    }

    pub fn optimizer(&self) -> &Arc<O> {
        &self.optimizer
    }

    /// Layer the middleware onto `router`
    pub fn apply<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router.layer(middleware::from_fn_with_state(
            Arc::clone(&self.optimizer),
            attach_optimizer::<O>,
        ))
    }
}

/// Insert the handle into the request extensions and pass the request on
pub async fn attach_optimizer<O: WorkflowOptimizer>(
    State(optimizer): State<Arc<O>>,
    mut req: Request,
    next: Next,
) -> Response {
    req.extensions_mut().insert(OptimizerContext(optimizer));
    next.run(req).await
}
