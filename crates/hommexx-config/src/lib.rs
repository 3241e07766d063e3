//! Target configuration baked in at build time.
//!
//! The build script of this crate resolves the execution backend, vector
//! width, warp bounds and compiler workaround once, and exposes them as
//! constants. Kernels depend on this crate instead of reading flags.
//!
//! # Inputs
//!
//! - Cargo features `cuda`, `openmp`, `threads`, `serial`, `hip`, `sycl`,
//!   and the matching `HOMMEXX_<NAME>_SPACE` environment variables
//! - `HOMMEXX_EXEC_SPACE` to pick a backend explicitly
//! - `HOMMEXX_VECTOR_SIZE`, `HOMMEXX_CUDA_MIN_WARP_PER_TEAM`,
//!   `HOMMEXX_CUDA_MAX_WARP_PER_TEAM` for numeric overrides
//! - `HOMMEXX_MPI_ON_DEVICE`, `HOMMEXX_COMPILER`
//! - `HOMMEXX_CONFIG_FILE` naming a generated JSON configuration
//!
//! Enabling two backend features at once fails the build unless
//! `HOMMEXX_EXEC_SPACE` settles the choice.
//!
//! # Example
//! ```
//! let lanes = hommexx_config::VECTOR_SIZE;
//! let buffer = [0.0_f64; hommexx_config::VECTOR_SIZE];
//! assert_eq!(buffer.len(), lanes);
//! assert_eq!(hommexx_config::config().resolved.vector_size, lanes);
//! ```
//!
//! C++ translation units can include `Hommexx_config.h` from
//! [`INCLUDE_DIR`]; build scripts of dependent crates find the same
//! directory in `DEP_HOMMEXX_CONFIG_INCLUDE`.

pub use hommexx_config_core::{
    Backend, BuildConfiguration, CompilerId, ConstQualifier, ResolvedConfiguration,
    TargetProfile,
};

include!(concat!(env!("OUT_DIR"), "/hommexx_config.rs"));

/// Directory containing the generated `Hommexx_config.h`.
pub const INCLUDE_DIR: &str = concat!(env!("OUT_DIR"), "/include");

/// The configuration this build was resolved to.
pub fn config() -> &'static BuildConfiguration {
    &CONFIG
}

/// Whether this build targets an accelerator backend.
pub const fn is_gpu_build() -> bool {
    EXEC_SPACE.is_accelerator()
}
