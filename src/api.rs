//! HTTP API handlers.
//!
//! - `POST /search-number` — look up a hashed phone number
//! - `GET  /` and `GET /health` — liveness
//! - `GET  /stats` — store counters for monitoring
//!
//! Errors are returned as `{"detail": "..."}`.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{Error, ErrorCategory};
use crate::identity::LookupRequest;
use crate::server::AppState;

/// Constant liveness status.
pub const LIVENESS_STATUS: &str = "TrustCaller API is Live";

/// Detail returned for infrastructure failures. The underlying cause is
/// logged, not sent to the caller.
pub const UNAVAILABLE_DETAIL: &str = "Identity store unavailable";

// ── Response Types ───────────────────────────────────────────────────────────

/// Error payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub records: u64,
    pub verified_records: u64,
    pub timestamp: i64,
}

fn status_for(error: &Error) -> StatusCode {
    match error.category() {
        ErrorCategory::BadRequest => StatusCode::BAD_REQUEST,
        ErrorCategory::NotFound => StatusCode::NOT_FOUND,
        ErrorCategory::Conflict => StatusCode::CONFLICT,
        ErrorCategory::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCategory::Infrastructure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Render an error as `(status, {"detail": ...})`.
pub fn error_response(error: &Error) -> Response {
    let detail = if error.is_infrastructure() {
        tracing::error!(error = %error, "Request failed on infrastructure error");
        UNAVAILABLE_DETAIL.to_string()
    } else {
        error.to_string()
    };

    (status_for(error), Json(ErrorBody { detail })).into_response()
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// Look up a hashed phone number.
///
/// POST /search-number
/// Body: { "hashed_phone": "<sha256 hex>" }
///
/// The SQLite query runs on the blocking pool; the connection guard is
/// released inside that closure whatever the outcome.
pub async fn search_number(
    State(state): State<AppState>,
    payload: Result<Json<LookupRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return error_response(&Error::MalformedRequest(rejection.body_text()));
        }
    };

    let service = state.lookup.clone();
    let outcome = tokio::task::spawn_blocking(move || service.lookup(&request))
        .await
        .unwrap_or_else(|e| Err(Error::DatabaseError(format!("Lookup task failed: {}", e))));

    match outcome {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": LIVENESS_STATUS,
        "service": "trustcaller",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Store statistics (for monitoring).
///
/// GET /stats
pub async fn stats(State(state): State<AppState>) -> Response {
    let store = state.lookup.store().clone();
    let counts = tokio::task::spawn_blocking(move || -> crate::Result<(u64, u64)> {
        Ok((store.count()?, store.verified_count()?))
    })
    .await
    .unwrap_or_else(|e| Err(Error::DatabaseError(format!("Stats task failed: {}", e))));

    match counts {
        Ok((records, verified_records)) => Json(StatsResponse {
            records,
            verified_records,
            timestamp: Utc::now().timestamp_millis(),
        })
        .into_response(),
        Err(e) => error_response(&e),
    }
}
