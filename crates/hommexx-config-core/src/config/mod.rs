//! Configuration sources for the build-time resolver.

pub mod file;
pub mod flags;

// Re-export key items
pub use file::ConfigFile;
pub use flags::{
    cargo_feature_var, parse_bool, parse_int, BuildFlags, BuildFlagsBuilder, TRACKED_ENV_VARS,
};
