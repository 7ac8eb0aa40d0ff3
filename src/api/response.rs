use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::access::AccessError;
use crate::domain::{AuditRecord, Classification, Resource, ResourceId, SubjectId, Verdict};

/// Response from an access check.
#[derive(Debug, Serialize)]
pub struct AccessCheckResponse {
    /// The verdict, with its structured reason
    #[serde(flatten)]
    pub verdict: Verdict,

    /// Human-readable reason for a denial or override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// The audit entry written for this attempt
    pub audit: AuditRecord,
}

impl AccessCheckResponse {
    pub fn new(verdict: Verdict, audit: AuditRecord) -> Self {
        AccessCheckResponse {
            message: verdict.reason_text(),
            verdict,
            audit,
        }
    }
}

/// A document listed for a subject.
#[derive(Debug, Serialize)]
pub struct DocumentSummary {
    pub id: ResourceId,
    pub title: String,
    pub classification: Classification,
}

impl From<&Resource> for DocumentSummary {
    fn from(resource: &Resource) -> Self {
        DocumentSummary {
            id: resource.id.clone(),
            title: resource.title.clone(),
            classification: resource.classification,
        }
    }
}

/// Documents a subject may open.
#[derive(Debug, Serialize)]
pub struct DocumentsResponse {
    pub subject_id: SubjectId,
    pub documents: Vec<DocumentSummary>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub subjects: usize,
    pub resources: usize,
    pub uptime_secs: u64,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        ErrorResponse {
            error: error.into(),
            code: code.into(),
        }
    }
}

impl IntoResponse for AccessError {
    fn into_response(self) -> Response {
        let code = match self {
            AccessError::UnknownSubject(_) => "UNKNOWN_SUBJECT",
            AccessError::UnknownResource(_) => "UNKNOWN_RESOURCE",
        };

        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(self.to_string(), code)),
        )
            .into_response()
    }
}
