//! # Logging
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered
//! by `RUST_LOG`. Call it once, at the top of `main`.
//!
//! ```bash
//! # Which source served each request
//! RUST_LOG=info wrapweft list
//!
//! # Full payloads and store requests
//! RUST_LOG=debug wrapweft show raw-denim
//!
//! # Only the resolver
//! RUST_LOG=wrapweft::catalog=debug wrapweft featured
//! ```
//!
//! With `RUST_LOG=info` and an unreachable remote store, a listing reads:
//!
//! ```text
//! WARN list_all: Remote store failed, using offline data operation="list_all" error=Transport error: connection refused
//! INFO list_all: Resolved source=Fallback count=6
//! ```
//!
//! Fallback caused by a failure is always logged at `warn`; fallback because
//! the remote is not configured only at `debug`.

/// Installs the global subscriber. Panics if one is already installed.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
