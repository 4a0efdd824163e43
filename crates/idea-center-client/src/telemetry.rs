// crates/idea-center-client/src/telemetry.rs
// ============================================================================
// Module: Telemetry
// Description: Structured logging setup for Idea Center tooling.
// Purpose: Install a stderr tracing subscriber with env-driven filtering.
// Dependencies: thiserror, tracing-subscriber
// ============================================================================

//! ## Overview
//! Client and runner code emit `tracing` events; binaries call
//! [`init_logging`] once at startup. `RUST_LOG` overrides the default filter.
//! Output goes to stderr so stdout stays reserved for the run summary.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Default filter directive when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable text lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Logging setup failure.
#[derive(Debug, Error)]
#[error("logging init failed: {0}")]
pub struct TelemetryError(String);

// ============================================================================
// SECTION: Setup
// ============================================================================

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns [`TelemetryError`] when a global subscriber is already installed.
pub fn init_logging(format: LogFormat) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Text => registry.with(fmt::layer().with_writer(std::io::stderr)).try_init(),
        LogFormat::Json => {
            registry.with(fmt::layer().json().with_writer(std::io::stderr)).try_init()
        }
    };
    result.map_err(|err| TelemetryError(err.to_string()))
}
