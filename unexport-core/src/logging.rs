//! Structured logging using **tracing**.
//!
//! Library code emits events with the `tracing` macros; the binary installs
//! the subscriber. Logs go to stderr so stdout carries only the per-symbol
//! status lines and the final report.

/// Initializes the global tracing collector (subscriber).
///
/// Call once, at the start of the binary. Output is JSON on stderr.
///
/// # Environment Variables
/// - `RUST_LOG`: Controls log filtering (e.g., `RUST_LOG=unexport_core=debug`)
pub fn init_structured_logging() {
    tracing_subscriber::fmt()
        .json()
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .with_current_span(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
