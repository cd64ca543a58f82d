//! Telemetry initialization and fixture span helpers.

use std::time::Instant;

use anyhow::Result;
use tracing::{info, info_span, warn, Span};
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize `tracing` and format developer logs.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Span helper to record start and finish of a fixture verification.
pub struct FixtureSpan {
    span: Span,
    started_at: Instant,
    identity: String,
}

impl FixtureSpan {
    /// Start a fixture span.
    pub fn start(identity: &str, task_file: &str) -> Self {
        let span = info_span!(
            target: "taskfile_check::suite",
            "fixture",
            identity,
            task_file
        );
        Self {
            span,
            started_at: Instant::now(),
            identity: identity.to_string(),
        }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Close the span while recording status and, on failure, the error kind.
    pub fn finish(self, status: &'static str, error_kind: Option<&'static str>) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        if let Some(kind) = error_kind {
            warn!(
                target: "taskfile_check::suite",
                identity = %self.identity,
                status = status,
                error_kind = kind,
                elapsed_ms = elapsed_ms,
                "Fixture verification failed"
            );
        } else {
            info!(
                target: "taskfile_check::suite",
                identity = %self.identity,
                status = status,
                elapsed_ms = elapsed_ms,
                "Completed fixture verification"
            );
        }
    }
}
