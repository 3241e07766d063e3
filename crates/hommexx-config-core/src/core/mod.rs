//! Core types and errors for target configuration.

pub mod error;
pub mod types;

// Re-export commonly used items
pub use error::{ConfigError, Result};
pub use types::{
    Backend, BackendIndicators, BuildConfiguration, CompilerId, ConstQualifier,
    ResolvedConfiguration, TargetProfile,
};
