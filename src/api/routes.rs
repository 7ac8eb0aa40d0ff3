use axum::{
    extract::{ConnectInfo, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::access::{AccessError, AccessService};
use crate::audit::{Clock, MemoryAuditLog, SystemClock};
use crate::domain::SubjectId;

use super::request::{AccessCheckRequest, AuditQuery, EventRequest};
use super::response::{AccessCheckResponse, DocumentSummary, DocumentsResponse, HealthResponse};

/// Shared application state.
pub struct AppState<C: Clock = SystemClock> {
    /// Access decisions and auditing
    pub service: AccessService<C>,

    /// In-memory audit trail served by `/v1/audit`
    pub audit_log: Arc<MemoryAuditLog>,

    /// Application start time
    pub start_time: Instant,

    /// Application version
    pub version: String,
}

/// Create the application router.
pub fn create_router<C: Clock + 'static>(state: Arc<AppState<C>>) -> Router {
    Router::new()
        .route("/v1/access/check", post(handle_access_check::<C>))
        .route("/v1/events", post(handle_event::<C>))
        .route("/v1/subjects/:id/documents", get(handle_documents::<C>))
        .route("/v1/audit", get(handle_audit::<C>))
        .route("/health", get(handle_health::<C>))
        .route("/metrics", get(handle_metrics::<C>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle document open requests, evaluated at the server's time.
async fn handle_access_check<C: Clock>(
    State(state): State<Arc<AppState<C>>>,
    peer: Option<ConnectInfo<SocketAddr>>,
    Json(req): Json<AccessCheckRequest>,
) -> Response {
    let origin = peer.map(|ConnectInfo(addr)| addr.ip());

    match state
        .service
        .open_document(&req.subject_id, &req.resource_id, origin)
    {
        Ok((verdict, audit)) => (
            StatusCode::OK,
            Json(AccessCheckResponse::new(verdict, audit)),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Audit a session event.
async fn handle_event<C: Clock>(
    State(state): State<Arc<AppState<C>>>,
    Json(req): Json<EventRequest>,
) -> Response {
    match state
        .service
        .record_event(&req.subject_id, &req.action, req.result)
    {
        Ok(record) => {
            info!(
                subject_id = %record.subject_id(),
                action = record.action(),
                result = %record.result(),
                "Event recorded"
            );
            (StatusCode::CREATED, Json(record)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// List the documents a subject may open right now.
async fn handle_documents<C: Clock>(
    State(state): State<Arc<AppState<C>>>,
    Path(subject_id): Path<String>,
) -> Response {
    match state.service.authorized_documents(&subject_id) {
        Ok(docs) => Json(DocumentsResponse {
            subject_id: SubjectId::new(subject_id),
            documents: docs.into_iter().map(DocumentSummary::from).collect(),
        })
        .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Audit trail as seen by `viewer_id`, newest first.
///
/// Security and system administrators see every record; everyone else
/// sees only their own.
async fn handle_audit<C: Clock>(
    State(state): State<Arc<AppState<C>>>,
    Query(query): Query<AuditQuery>,
) -> Response {
    let Some(viewer) = state.service.catalog().subject(&query.viewer_id) else {
        return AccessError::UnknownSubject(query.viewer_id).into_response();
    };

    let mut records = if viewer.role.can_view_full_audit() {
        state.audit_log.snapshot()
    } else {
        state.audit_log.for_subject(&viewer.id)
    };
    records.reverse();

    Json(records).into_response()
}

/// Health check endpoint.
async fn handle_health<C: Clock>(State(state): State<Arc<AppState<C>>>) -> impl IntoResponse {
    let catalog = state.service.catalog();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        subjects: catalog.subjects().len(),
        resources: catalog.resources().len(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// Metrics endpoint (Prometheus format).
async fn handle_metrics<C: Clock>(State(state): State<Arc<AppState<C>>>) -> impl IntoResponse {
    let metrics = format!(
        r#"# HELP sems_uptime_seconds Application uptime in seconds
# TYPE sems_uptime_seconds counter
sems_uptime_seconds {}

# HELP sems_audit_trail_records Records held by the in-memory audit trail
# TYPE sems_audit_trail_records gauge
sems_audit_trail_records {}

# HELP sems_audit_trail_capacity Records the in-memory audit trail holds before evicting
# TYPE sems_audit_trail_capacity gauge
sems_audit_trail_capacity {}

{}"#,
        state.start_time.elapsed().as_secs(),
        state.audit_log.len(),
        state.audit_log.capacity(),
        state.service.metrics().to_prometheus(),
    );

    (
        StatusCode::OK,
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; charset=utf-8",
        )],
        metrics,
    )
}
