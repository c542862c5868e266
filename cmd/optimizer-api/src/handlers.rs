//! Route handlers
//!
//! Each handler validates its input, makes one call on the shared optimizer
//! and writes the result back as JSON.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{de::DeserializeOwned, Deserialize};
use std::sync::Arc;

use crate::{
    error::{ApiError, Result},
    middleware::{CriticalPathAnalysis, WorkflowAnalysis},
    optimizer::{ExecutionRecord, TelemetryCollector, WorkflowOptimizer},
};

/// Body of `POST /analyze`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub workflow_id: Option<String>,
}

/// Body of `POST /optimize`
#[derive(Debug, Default, Deserialize)]
pub struct OptimizeRequest {
    /// Left undecoded until presence is checked
    pub workflow: Option<serde_json::Value>,
}

pub async fn analyze<O: WorkflowOptimizer>(
    State(optimizer): State<Arc<O>>,
    body: Bytes,
) -> Result<Response> {
    let request: AnalyzeRequest = decode_body(&body)?;

    let workflow_id = request
        .workflow_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            tracing::warn!("Analyze request without workflowId");
            ApiError::bad_request("workflowId is required")
        })?;

    tracing::debug!(workflow_id = %workflow_id, "Analyzing workflow");

    let analysis = optimizer.analyze_workflow(&workflow_id).await?;

    Ok((
        StatusCode::OK,
        Extension(WorkflowAnalysis(analysis.clone())),
        Json(analysis),
    )
        .into_response())
}

pub async fn optimize<O: WorkflowOptimizer>(
    State(optimizer): State<Arc<O>>,
    body: Bytes,
) -> Result<Response> {
    let request: OptimizeRequest = decode_body(&body)?;

    let workflow = request
        .workflow
        .filter(|workflow| workflow.as_str() != Some(""))
        .ok_or_else(|| {
            tracing::warn!("Optimize request without workflow");
            ApiError::bad_request("workflow is required")
        })?;

    let workflow: O::Workflow = serde_json::from_value(workflow)
        .map_err(|e| ApiError::bad_request(format!("Invalid workflow: {}", e)))?;

    tracing::debug!("Optimizing workflow definition");

    let result = optimizer.optimize_workflow(workflow).await?;

    Ok((StatusCode::OK, Json(result)).into_response())
}

pub async fn metrics<O: WorkflowOptimizer>(State(optimizer): State<Arc<O>>) -> Result<Response> {
    let metrics = optimizer
        .telemetry_collector()
        .get_aggregated_metrics()
        .await?;

    Ok((StatusCode::OK, Json(metrics)).into_response())
}

pub async fn critical_path<O: WorkflowOptimizer>(
    State(optimizer): State<Arc<O>>,
    Path(execution_id): Path<String>,
) -> Result<Response> {
    if execution_id.is_empty() {
        tracing::warn!("Critical path request without executionId");
        return Err(ApiError::bad_request("executionId is required"));
    }

    let execution = optimizer
        .telemetry_collector()
        .get_workflow_executions()
        .await?
        .into_iter()
        .find(|execution| execution.id() == execution_id)
        .ok_or_else(|| {
            tracing::warn!(execution_id = %execution_id, "Execution not found");
            ApiError::not_found("Execution not found")
        })?;

    tracing::debug!(execution_id = %execution_id, "Analyzing execution critical path");

    let critical_path = optimizer.analyze_execution_critical_path(&execution).await?;

    Ok((
        StatusCode::OK,
        Extension(CriticalPathAnalysis(critical_path.clone())),
        Json(critical_path),
    )
        .into_response())
}

/// An empty body reads as `{}`
fn decode_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {}", e)))
}
