//! Optimizer API
//!
//! Exposes a workflow optimizer library over HTTP. The optimizer is plugged in
//! through [`WorkflowOptimizer`]; this crate only validates requests, forwards
//! them and writes the results back as JSON.
//!
//! | Method | Path                          |
//! |--------|-------------------------------|
//! | POST   | `/analyze`                    |
//! | POST   | `/optimize`                   |
//! | GET    | `/metrics`                    |
//! | GET    | `/critical-path/:executionId` |
//!
//! # Example
//! ```ignore
//! let config = ServerConfig::from_env()?;
//! init_tracing(&config.log_level)?;
//!
//! let app = create_app::<MyOptimizer>(config.to_app_config());
//! serve(&config, app).await?;
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod optimizer;
pub mod routes;
pub mod server;

pub use app::{create_app, resolve_base_path, AppConfig, OptimizerApp};
pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ErrorBody};
pub use middleware::{
    CriticalPathAnalysis, MiddlewareConfig, OptimizerContext, OptimizerMiddleware,
    WorkflowAnalysis,
};
pub use optimizer::{
    Execution, ExecutionRecord, Metrics, OptimizerOptions, TelemetryCollector, WorkflowOptimizer,
};
pub use routes::{build_routes, RouteDescriptor, RouteTable, DEFAULT_BASE_PATH};
pub use server::{init_tracing, router, serve};
