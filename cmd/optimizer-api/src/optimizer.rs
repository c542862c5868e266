//! Collaborator interface for the workflow optimizer library
//!
//! The adapter never looks inside these values. Analysis, critical-path
//! computation and telemetry aggregation all live behind the traits below.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Options passed to the optimizer constructor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizerOptions {
    /// Let the optimizer apply safe optimizations on its own
    pub auto_optimize: bool,
}

/// A past workflow execution known to the telemetry collector
pub trait ExecutionRecord {
    /// Execution identifier matched against the `executionId` path parameter
    fn id(&self) -> &str;
}

/// Telemetry side of the optimizer
#[async_trait]
pub trait TelemetryCollector: Send + Sync {
    /// Aggregated telemetry summary
    type Metrics: Serialize + Send;

    /// Recorded execution
    type Execution: ExecutionRecord + Send + Sync;

    async fn get_aggregated_metrics(&self) -> anyhow::Result<Self::Metrics>;

    /// All recorded executions, in the collector's own order
    async fn get_workflow_executions(&self) -> anyhow::Result<Vec<Self::Execution>>;
}

/// Execution type exposed by an optimizer's telemetry collector
pub type Execution<O> = <<O as WorkflowOptimizer>::Telemetry as TelemetryCollector>::Execution;

/// Metrics type exposed by an optimizer's telemetry collector
pub type Metrics<O> = <<O as WorkflowOptimizer>::Telemetry as TelemetryCollector>::Metrics;

/// The optimizer handle shared by every request
///
/// One instance is created per app (or per standalone middleware) and lives
/// for the rest of the process. Implementations must tolerate concurrent calls.
#[async_trait]
pub trait WorkflowOptimizer: Send + Sync + Sized + 'static {
    /// Workflow definition accepted by `optimize_workflow`
    type Workflow: DeserializeOwned + Send;

    /// Result of analyzing a workflow by identifier
    type Analysis: Serialize + Clone + Send + Sync + 'static;

    /// Result of optimizing a workflow definition
    type Optimization: Serialize + Send;

    /// Result of critical-path analysis over one execution
    type CriticalPath: Serialize + Clone + Send + Sync + 'static;

    type Telemetry: TelemetryCollector;

    /// Construct a new handle
    fn create(options: OptimizerOptions) -> Self;

    async fn analyze_workflow(&self, workflow_id: &str) -> anyhow::Result<Self::Analysis>;

    async fn optimize_workflow(
        &self,
        workflow: Self::Workflow,
    ) -> anyhow::Result<Self::Optimization>;

    fn telemetry_collector(&self) -> &Self::Telemetry;

    async fn analyze_execution_critical_path(
        &self,
        execution: &Execution<Self>,
    ) -> anyhow::Result<Self::CriticalPath>;
}
