//! Recording optimizer shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response};
use optimizer_api::{ExecutionRecord, OptimizerOptions, TelemetryCollector, WorkflowOptimizer};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MockExecution {
    pub id: String,
    pub workflow_id: String,
    pub duration_ms: u64,
}

impl MockExecution {
    pub fn new(id: &str, workflow_id: &str, duration_ms: u64) -> Self {
        Self {
            id: id.to_string(),
            workflow_id: workflow_id.to_string(),
            duration_ms,
        }
    }
}

impl ExecutionRecord for MockExecution {
    fn id(&self) -> &str {
        &self.id
    }
}

pub struct MockTelemetry {
    executions: Vec<MockExecution>,
    fail: bool,
}

#[async_trait]
impl TelemetryCollector for MockTelemetry {
    type Metrics = Value;
    type Execution = MockExecution;

    async fn get_aggregated_metrics(&self) -> anyhow::Result<Value> {
        if self.fail {
            anyhow::bail!("telemetry store unavailable");
        }
        Ok(json!({
            "totalExecutions": self.executions.len(),
            "averageDurationMs": 125.5,
            "bottlenecks": ["fetch-data"],
        }))
    }

    async fn get_workflow_executions(&self) -> anyhow::Result<Vec<MockExecution>> {
        if self.fail {
            anyhow::bail!("telemetry store unavailable");
        }
        Ok(self.executions.clone())
    }
}

/// Records every call so tests can assert on what reached the optimizer
pub struct MockOptimizer {
    pub options: OptimizerOptions,
    telemetry: MockTelemetry,
    pub analyzed: Mutex<Vec<String>>,
    pub optimized: Mutex<Vec<Value>>,
    pub critical_paths: Mutex<Vec<MockExecution>>,
}

impl MockOptimizer {
    pub fn with_executions(executions: Vec<MockExecution>) -> Self {
        Self {
            options: OptimizerOptions::default(),
            telemetry: MockTelemetry {
                executions,
                fail: false,
            },
            analyzed: Mutex::new(Vec::new()),
            optimized: Mutex::new(Vec::new()),
            critical_paths: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        let mut optimizer = Self::with_executions(Vec::new());
        optimizer.telemetry.fail = true;
        optimizer
    }

    pub fn analyzed(&self) -> Vec<String> {
        self.analyzed.lock().unwrap().clone()
    }

    pub fn optimized(&self) -> Vec<Value> {
        self.optimized.lock().unwrap().clone()
    }

    pub fn critical_paths(&self) -> Vec<MockExecution> {
        self.critical_paths.lock().unwrap().clone()
    }
}

pub fn analysis_for(workflow_id: &str) -> Value {
    json!({
        "workflowId": workflow_id,
        "score": 0.82,
        "suggestions": [{"id": "parallelize", "nodes": ["a", "b"]}],
    })
}

#[async_trait]
impl WorkflowOptimizer for MockOptimizer {
    type Workflow = Value;
    type Analysis = Value;
    type Optimization = Value;
    type CriticalPath = Value;
    type Telemetry = MockTelemetry;

    fn create(options: OptimizerOptions) -> Self {
        let mut optimizer = Self::with_executions(vec![
            MockExecution::new("exec-1", "wf-1", 300),
            MockExecution::new("exec-2", "wf-2", 120),
        ]);
        optimizer.options = options;
        optimizer
    }

    async fn analyze_workflow(&self, workflow_id: &str) -> anyhow::Result<Value> {
        if self.telemetry.fail {
            anyhow::bail!("analysis backend unavailable");
        }
        self.analyzed.lock().unwrap().push(workflow_id.to_string());
        Ok(analysis_for(workflow_id))
    }

    async fn optimize_workflow(&self, workflow: Value) -> anyhow::Result<Value> {
        self.optimized.lock().unwrap().push(workflow.clone());
        Ok(json!({
            "original": workflow,
            "estimatedSpeedup": 1.4,
        }))
    }

    fn telemetry_collector(&self) -> &MockTelemetry {
        &self.telemetry
    }

    async fn analyze_execution_critical_path(
        &self,
        execution: &MockExecution,
    ) -> anyhow::Result<Value> {
        self.critical_paths.lock().unwrap().push(execution.clone());
        Ok(json!({
            "executionId": execution.id,
            "path": ["start", "fetch-data", "end"],
            "totalDurationMs": execution.duration_ms,
        }))
    }
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(res: Response) -> Value {
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
