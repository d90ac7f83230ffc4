//! Soil sample data engine for the GeoLab samples page.
//!
//! The engine parses comma-separated sample readings into typed records,
//! derives adjusted moisture and density per record, filters by sample id,
//! aggregates summaries, and decides when the computed snapshot follows the
//! edited raw data. [`SampleSession`] bundles that state for a UI
//! collaborator, and [`routes::router`] exposes it over a local JSON API.
//!
//! Modules follow the Explicit Module Boundary Pattern (EMBP): siblings import
//! through this gateway rather than reaching into each other's internals.

pub mod config;
pub mod derivation;
pub mod filter;
pub mod ingest;
pub mod models;
pub mod mutation;
pub mod recalc;
pub mod routes;
pub mod session;

pub use config::Config;
pub use derivation::{summarize, Summary};
pub use filter::filter;
pub use ingest::{generate_sample, parse};
pub use models::{AdjustedValues, Dataset, SampleField, SampleRecord};
pub use mutation::set_field;
pub use recalc::{RecalcPolicy, Snapshots};
pub use session::{SampleRow, SampleSession, SessionView};
