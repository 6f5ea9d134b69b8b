// Llmedit - an LLM-powered text file editor
// Sends a file's content plus an embedded instruction to a chat model and
// writes the rewritten result back, with backup and restore on failure.

pub mod config;
pub mod error;
pub mod file;
pub mod llm;
pub mod logging;
pub mod prompt;

use tracing_subscriber::EnvFilter;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Initialize tracing output.
///
/// Diagnostics go to stderr so stdout stays reserved for the one-line
/// success or failure report. Filtering follows `RUST_LOG`, defaulting to
/// warnings only.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // try_init so a second call (e.g. from tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
