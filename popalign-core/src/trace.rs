//! Tracing setup.
//!
//! The engine emits structured records through `tracing` but never installs
//! a subscriber itself; embedders either install their own or call `init`.

/// Install an env-filtered fmt subscriber. Safe to call more than once;
/// subsequent calls are no-ops if a global subscriber is already set.
///
/// Filter defaults to `info` when `RUST_LOG` is unset.
pub fn init() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
