//! # Grading Report
//!
//! Serializable wrappers a request-handling layer can return directly.
//!
//! - [`GradingReport`]: one graded submission with its timestamp.
//! - [`GradingReportResponse`]: the `{ success, message, data }` envelope.
//!
//! ## JSON Output Example
//!
//! ```json
//! {
//!   "success": true,
//!   "message": "Grading complete.",
//!   "data": {
//!     "submission_id": "...",
//!     "graded_at": "2025-05-01T10:00:00+00:00",
//!     "outcome": { "bugs_found": 2, "score": 80.0, "...": "..." }
//!   }
//! }
//! ```
//!
//! Engine errors never reach the candidate verbatim: [`GradingReportResponse::from_error`]
//! logs the detail and returns a generic retry message.

use crate::error::GraderError;
use crate::types::GradingOutcome;
use chrono::Utc;
use serde::Serialize;
use tracing::error;

pub const SUCCESS_MESSAGE: &str = "Grading complete.";
pub const RETRY_MESSAGE: &str =
    "We could not grade this submission right now. Please try again later.";

#[derive(Debug, Clone, Serialize)]
pub struct GradingReport {
    pub submission_id: String,
    /// RFC 3339 timestamp of when grading finished.
    pub graded_at: String,
    pub outcome: GradingOutcome,
}

impl GradingReport {
    /// Stamp `outcome` with the current UTC time.
    pub fn new(submission_id: impl Into<String>, outcome: GradingOutcome) -> Self {
        Self {
            submission_id: submission_id.into(),
            graded_at: Utc::now().to_rfc3339(),
            outcome,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GradingReportResponse {
    pub success: bool,
    pub message: String,
    pub data: Option<GradingReport>,
}

impl From<GradingReport> for GradingReportResponse {
    fn from(report: GradingReport) -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            data: Some(report),
        }
    }
}

impl GradingReportResponse {
    pub fn from_error(submission_id: &str, err: &GraderError) -> Self {
        error!(submission_id, error = %err, "grading failed");
        Self {
            success: false,
            message: RETRY_MESSAGE.to_string(),
            data: None,
        }
    }
}
