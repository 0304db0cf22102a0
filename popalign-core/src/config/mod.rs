//! Configuration system for popalign.
//! TOML-based, 3-layer resolution: caller overrides > env > project > defaults.

pub mod align_config;

pub use align_config::{AlignConfig, AlignOverrides};
