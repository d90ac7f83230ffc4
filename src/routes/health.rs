//! `GET /health`: liveness plus how much data the session holds.
//!
//! A UI collaborator polls this before it starts issuing sample operations.
//! A poisoned session lock reports `degraded` with a 503 so a supervisor can
//! restart the process.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use super::SharedSession;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    rows: Option<usize>,
}

async fn health(State(session): State<SharedSession>) -> (StatusCode, Json<HealthResponse>) {
    // ---
    match session.lock() {
        Ok(s) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                rows: Some(s.raw().len()),
            }),
        ),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "degraded",
                rows: None,
            }),
        ),
    }
}

pub fn router() -> Router<SharedSession> {
    Router::new().route("/health", get(health))
}
