//! Substitch Common Utilities
//!
//! Shared infrastructure for all Substitch crates:
//! - Error types and result aliases
//! - Tracing/logging initialization
//! - Configuration loading and the subtitle language selector

pub mod config;
pub mod error;
pub mod logging;

pub use config::*;
pub use error::*;
