use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error, info};

use super::SharedSession;
use crate::{SampleField, SampleSession};

// ---

pub fn router() -> Router<SharedSession> {
    // ---
    Router::new()
        .route("/samples", get(get_view))
        .route("/samples/summary", get(get_summary))
        .route("/samples/upload", post(upload))
        .route("/samples/mock", post(load_mock))
        .route("/samples/filter", put(set_filter))
        .route("/samples/auto-recalc", put(set_auto_recalc))
        .route("/samples/recalculate", post(recalculate))
        .route("/samples/{id}", patch(edit_sample))
}

/// Body of `POST /samples/upload`. A missing `content` means no file was selected.
#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    file_name: Option<String>,
    content: Option<String>,
}

/// Body of `PATCH /samples/{id}`. `value` may be a JSON string or number.
#[derive(Debug, Deserialize)]
pub struct EditRequest {
    field: SampleField,
    value: Value,
}

#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    query: String,
}

#[derive(Debug, Deserialize)]
pub struct AutoRecalcRequest {
    enabled: bool,
}

// ---

async fn get_view(State(session): State<SharedSession>) -> Response {
    // ---
    debug!("GET /samples");
    view_after(&session, |_| ())
}

async fn get_summary(State(session): State<SharedSession>) -> Response {
    // ---
    debug!("GET /samples/summary");
    match with_session(&session, |s| s.summary()) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(response) => response,
    }
}

async fn upload(State(session): State<SharedSession>, Json(body): Json<UploadRequest>) -> Response {
    // ---
    info!("POST /samples/upload - file: {:?}", body.file_name);

    let Some(content) = body.content else {
        debug!("No file content supplied, session unchanged");
        return view_after(&session, |_| ());
    };
    view_after(&session, |s| s.load_text(body.file_name.as_deref(), &content))
}

async fn load_mock(State(session): State<SharedSession>) -> Response {
    // ---
    info!("POST /samples/mock");
    view_after(&session, SampleSession::load_mock)
}

async fn edit_sample(
    Path(id): Path<String>,
    State(session): State<SharedSession>,
    Json(body): Json<EditRequest>,
) -> Response {
    // ---
    debug!("PATCH /samples/{} - {}", id, body.field);

    let value = value_text(&body.value);
    let result = with_session(&session, |s| {
        let found = s.set_field(&id, body.field, &value);
        (found, s.view())
    });

    match result {
        Ok((true, view)) => (StatusCode::OK, Json(view)).into_response(),
        Ok((false, view)) => (StatusCode::NOT_FOUND, Json(view)).into_response(),
        Err(response) => response,
    }
}

async fn set_filter(
    State(session): State<SharedSession>,
    Json(body): Json<FilterRequest>,
) -> Response {
    // ---
    debug!("PUT /samples/filter - {:?}", body.query);
    view_after(&session, |s| s.set_filter(&body.query))
}

async fn set_auto_recalc(
    State(session): State<SharedSession>,
    Json(body): Json<AutoRecalcRequest>,
) -> Response {
    // ---
    info!("PUT /samples/auto-recalc - enabled: {}", body.enabled);
    view_after(&session, |s| s.set_auto_recalc(body.enabled))
}

async fn recalculate(State(session): State<SharedSession>) -> Response {
    // ---
    info!("POST /samples/recalculate");
    view_after(&session, SampleSession::recalculate_now)
}

// ---

/// Run `op` under the session lock, mapping a poisoned lock to a 500 response.
fn with_session<T>(
    session: &SharedSession,
    op: impl FnOnce(&mut SampleSession) -> T,
) -> Result<T, Response> {
    // ---
    let mut guard = session.lock().map_err(|e| {
        error!("Session lock poisoned: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "session unavailable" })),
        )
            .into_response()
    })?;
    Ok(op(&mut *guard))
}

/// Run `op`, then respond with the resulting session view.
fn view_after(session: &SharedSession, op: impl FnOnce(&mut SampleSession)) -> Response {
    // ---
    match with_session(session, |s| {
        op(s);
        s.view()
    }) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(response) => response,
    }
}

fn value_text(value: &Value) -> String {
    // ---
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_value_text() {
        // ---
        assert_eq!(value_text(&json!("12.5")), "12.5");
        assert_eq!(value_text(&json!(7)), "7");
        assert_eq!(value_text(&json!(1.25)), "1.25");
        assert_eq!(value_text(&json!(null)), "");
        assert_eq!(value_text(&json!([1])), "");
    }

    #[test]
    fn test_edit_request_rejects_unknown_field() {
        // ---
        let ok: Result<EditRequest, _> =
            serde_json::from_value(json!({ "field": "porosity", "value": 20 }));
        assert!(ok.is_ok());

        let bad: Result<EditRequest, _> =
            serde_json::from_value(json!({ "field": "colour", "value": "red" }));
        assert!(bad.is_err());
    }
}
