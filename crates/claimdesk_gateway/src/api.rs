//! Upstream payload shapes.
//!
//! # Responsibility
//! - Document the HTTP contract exchanged with the analysis backend.
//!
//! # Invariants
//! - These shapes are pass-through only: handlers relay bodies verbatim
//!   and never validate or transform them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One extracted technical feature of a patent claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub feature_id: String,
    pub claim: String,
    pub feature_seq: String,
    pub feature_content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_paragraph: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_process: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_result: Option<String>,
    pub status: String,
}

/// Response of the claim-text parse endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureBatch {
    pub features: Vec<FeatureRecord>,
    pub total: u64,
    pub message: String,
}

/// Lifecycle state of an analysis task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

/// Task descriptor returned by the analyze start/poll endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisProgress {
    pub task_id: String,
    pub status: AnalysisStatus,
    pub progress: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}
