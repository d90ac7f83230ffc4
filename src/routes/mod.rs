use std::sync::{Arc, Mutex};

use axum::Router;

use crate::SampleSession;

mod health;
mod samples;

// ---

/// Session state shared by all handlers. Each handler holds the lock for a
/// single engine operation.
pub type SharedSession = Arc<Mutex<SampleSession>>;

pub fn router(session: SharedSession) -> Router {
    // ---
    Router::new()
        .merge(samples::router())
        .merge(health::router())
        .with_state(session)
}
