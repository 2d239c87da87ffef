//! Client-facing response shapes.
//!
//! What the delivery layer serializes back to the web client: a success
//! flag, the payload, and a human-readable message.

use insights::GlobalTermReport;
use scoring::{ScoredExplanation, ScoredItem};
use serde::Serialize;

/// Response for the explained recommendation endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    pub success: bool,
    pub recommendations: Vec<ScoredExplanation>,
    pub message: String,
}

/// Response for the baseline (no attribution) recommendation endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct BasicRecommendationResponse {
    pub success: bool,
    pub recommendations: Vec<ScoredItem>,
    pub message: String,
}

/// Response for the global term-importance endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct TermReportResponse {
    pub success: bool,
    #[serde(flatten)]
    pub report: GlobalTermReport,
}
