//! Schema module - Configuration types for algorithm visualizer runs.

mod config;

pub use config::*;
