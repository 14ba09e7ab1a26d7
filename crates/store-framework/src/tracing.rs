//! # Observability & Tracing
//!
//! Structured logging setup for processes built on the store framework.
//!
//! ## What Gets Traced
//!
//! - **Store Lifecycle**: startup, shutdown and final size
//! - **Operations**: every `Begin`, `Settled` and `Applied` transition, with
//!   `store`, `op`, `lane` and `phase` fields
//! - **Failures**: the rejected operation and its `error` message
//!
//! ## Usage Examples
//!
//! ```bash
//! # Settlements only
//! RUST_LOG=info cargo run
//!
//! # Pending transitions and local applies as well
//! RUST_LOG=debug cargo run
//!
//! # One crate only
//! RUST_LOG=store_framework=debug cargo run
//! ```
//!
//! A rejected fetch followed by a successful retry looks like this:
//!
//! ```text
//! DEBUG Begin store="RawMaterialState" op="list" lane=() phase=pending
//!  WARN Settled store="RawMaterialState" op="list" lane=() phase=rejected error=network failure: connection refused
//! DEBUG Begin store="RawMaterialState" op="list" lane=() phase=pending
//!  INFO Settled store="RawMaterialState" op="list" lane=() phase=fulfilled size=2
//! ```

use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber: compact output filtered by `RUST_LOG`
/// (defaults to `info`).
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // the `store` field already names the source
        .compact()
        .init();
}

/// Subscriber for tests. Safe to call from every test; later calls are no-ops.
pub fn setup_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
