//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the compact `tracing-subscriber` formatter used by every
//! binary built on this crate. The filter comes from `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run     # state changes only (Created, Replaced, Deleted)
//! RUST_LOG=debug cargo run    # plus reads and full payloads
//! ```
//!
//! Actors log with an `entity_type` field, so module paths are hidden
//! (`with_target(false)`).

/// Installs the global subscriber. Calling it a second time is a no-op.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
