//! Continuous live-stream capture core.
//!
//! Four cooperating pieces: the raw stream tap (the `rawtap` engine crate),
//! the transcoder command planner ([`mux`]), the recording status resolver
//! ([`domain`]), and the notification gate ([`notification`]). The scheduler,
//! the process launcher, and the per-channel delivery transports are external
//! collaborators.

pub mod capture;
pub mod config;
pub mod domain;
pub mod error;
pub mod mux;
pub mod notification;

pub use error::{Error, Result};

/// Install the default tracing subscriber (env-filtered, fmt output).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init();
}
