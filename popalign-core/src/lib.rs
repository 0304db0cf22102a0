//! popalign-core: shared foundation for the popalign alignment engine
//!
//! This crate provides the non-algorithmic components shared across the
//! workspace:
//! - Errors: one enum per subsystem, aggregated into `AlignError`
//! - Config: layered run configuration (overrides > env > file > defaults)
//! - Traits: the collaborator contract an agent model implements
//! - Trace: opt-in tracing subscriber setup

pub mod config;
pub mod errors;
pub mod trace;
pub mod traits;

// Re-exports for convenience
pub use config::{AlignConfig, AlignOverrides};
pub use errors::{
    AlignError, AlignErrorCode, ConfigError, ExtractionError, NumericError, ValidationError,
};
pub use traits::AlignmentClosure;
