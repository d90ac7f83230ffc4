//! Application entry point for the `geolab-samples` service.
//!
//! This binary orchestrates the startup sequence for the local samples API:
//! - Loading configuration from environment variables or `.env`
//! - Initializing structured logging/tracing
//! - Creating the in-memory sample session, optionally preloaded from a CSV
//!   file or the built-in mock data
//! - Mounting all API routes via the `routes` gateway (EMBP pattern)
//! - Binding the Axum HTTP server and serving requests
//!
//! # Environment Variables
//! - `SAMPLES_BIND_ADDR` (optional) – listen address (default: 127.0.0.1:8080)
//! - `SAMPLES_AUTO_RECALC` (optional) – initial auto recalculate mode (default: true)
//! - `SAMPLES_PRELOAD_FILE` / `SAMPLES_PRELOAD_MOCK` (optional) – startup data
//! - `AXUM_LOG_LEVEL` (optional) – log verbosity (default: `debug`)
//! - `AXUM_SPAN_EVENTS` (optional) – span event mode for tracing
use std::{
    env,
    sync::{Arc, Mutex},
};

use anyhow::Result;
use axum::Router;
use dotenvy::dotenv;
use is_terminal::IsTerminal;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use geolab_samples::{config, routes, Config, SampleSession};

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    dotenv().ok();
    init_tracing();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    let session = build_session(&cfg)?;
    tracing::info!("{}", session.header_text());

    // Build app from routes gateway (EMBP)
    let app: Router = routes::router(Arc::new(Mutex::new(session)));

    tracing::info!("Listening on {}", cfg.bind_addr);

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind '{}': {}", cfg.bind_addr, e))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the session and apply any configured preload.
fn build_session(cfg: &Config) -> Result<SampleSession> {
    // ---
    let mut session = SampleSession::new(cfg.auto_recalc);

    if let Some(path) = &cfg.preload_file {
        session.load_file(path)?;
    } else if cfg.preload_mock {
        session.load_mock();
    }

    Ok(session)
}

// ---

/// Install the global tracing subscriber. Call once, before any logging.
///
/// Reads `AXUM_SPAN_EVENTS`, `FORCE_COLOR`, `RUST_LOG` and `AXUM_LOG_LEVEL`;
/// see the helpers below for accepted values.
fn init_tracing() {
    // ---
    let span_events = span_events(env::var("AXUM_SPAN_EVENTS").ok().as_deref());
    let use_color = force_color(env::var("FORCE_COLOR").ok().as_deref())
        .unwrap_or_else(|| std::io::stdout().is_terminal());

    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(filter_directive(env::var("AXUM_LOG_LEVEL").ok().as_deref()))
    };

    tracing_subscriber::fmt()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}

/// `full` logs span enter/exit/close, `enter_exit` skips close, anything else
/// logs close only.
fn span_events(mode: Option<&str>) -> FmtSpan {
    match mode {
        Some("full") => FmtSpan::FULL,
        Some("enter_exit") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::CLOSE,
    }
}

/// Explicit color choice, or `None` to follow TTY detection.
fn force_color(value: Option<&str>) -> Option<bool> {
    match value {
        Some("1" | "true" | "yes") => Some(true),
        Some("0" | "false" | "no") => Some(false),
        _ => None,
    }
}

/// Filter directive for the given level name; unknown or unset means `debug`.
/// Server internals stay at `warn` so request logs read as engine activity.
fn filter_directive(level: Option<&str>) -> String {
    // ---
    let level = match level {
        Some(l @ ("trace" | "debug" | "info" | "warn" | "error")) => l,
        _ => "debug",
    };
    format!("{level},hyper=warn")
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_span_events() {
        // ---
        assert_eq!(span_events(Some("full")), FmtSpan::FULL);
        assert_eq!(span_events(Some("enter_exit")), FmtSpan::ENTER | FmtSpan::EXIT);
        assert_eq!(span_events(None), FmtSpan::CLOSE);
        assert_eq!(span_events(Some("loud")), FmtSpan::CLOSE);
    }

    #[test]
    fn test_force_color() {
        // ---
        assert_eq!(force_color(Some("yes")), Some(true));
        assert_eq!(force_color(Some("0")), Some(false));
        assert_eq!(force_color(Some("auto")), None);
        assert_eq!(force_color(None), None);
    }

    #[test]
    fn test_filter_directive() {
        // ---
        assert_eq!(filter_directive(Some("info")), "info,hyper=warn");
        assert_eq!(filter_directive(Some("verbose")), "debug,hyper=warn");
        assert_eq!(filter_directive(None), "debug,hyper=warn");
    }

    #[test]
    fn test_build_session_preloads_mock() {
        // ---
        let cfg = Config {
            preload_mock: true,
            auto_recalc: false,
            ..Config::default()
        };
        let session = build_session(&cfg).unwrap();

        assert_eq!(session.raw().len(), 5);
        assert!(!session.auto_recalc());
    }
}
