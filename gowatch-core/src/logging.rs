//! Structured logging using **tracing**.
//!
//! Logs go to stderr as JSON so stdout stays reserved for the result.

/// Initializes the global tracing subscriber.
///
/// Call once at startup.
///
/// # Environment Variables
/// - `RUST_LOG`: Controls log filtering (e.g., `RUST_LOG=gowatch_core=debug`).
///   Without it only errors are logged.
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
