//! Build-time target configuration for the HOMMEXX kernels.
//!
//! This crate resolves, while a build is being configured, which parallel
//! execution backend is active, how many data lanes are packed per vector
//! operation, and how many warps an accelerator schedules per team. The
//! result is a fixed record that downstream kernels consume as constants;
//! nothing here changes after the build.
//!
//! # Key Concepts
//!
//! - **Backend selection**: an explicit backend beats backend indicators; a
//!   single indicator is taken as-is; none means `Default`; two or more is a
//!   conflict that fails the build
//! - **Parameter resolution**: overrides are used verbatim when valid,
//!   otherwise accelerator and host backends get their own defaults
//! - **Compiler workaround**: GNU gets an empty token in place of `const`
//!
//! # Modules
//!
//! - [`core`]: data model and error types
//! - [`config`]: raw flags from the environment and a generated JSON file
//! - [`resolve`]: backend selection and parameter resolution
//! - [`codegen`]: Rust constants, C++ header and cargo directives
//!
//! # Example
//! ```
//! use hommexx_config_core::prelude::*;
//!
//! let flags = BuildFlags::builder()
//!     .indicator(Backend::Cuda)
//!     .compiler(CompilerId::Clang)
//!     .build();
//! let config = resolve_build(&flags)?;
//!
//! assert_eq!(config.resolved.vector_size, 1);
//! assert_eq!(config.resolved.warp_bounds(), (8, 16));
//! # Ok::<(), hommexx_config_core::ConfigError>(())
//! ```

pub mod codegen;
pub mod config;
pub mod core;
pub mod resolve;

// Re-export commonly used items at the crate root
pub use crate::core::{
    error::{ConfigError, Result},
    types::{
        Backend, BackendIndicators, BuildConfiguration, CompilerId, ConstQualifier,
        ResolvedConfiguration, TargetProfile,
    },
};
pub use config::flags::{BuildFlags, BuildFlagsBuilder};
pub use resolve::{resolve_build, BackendSelector, ParameterResolver, WarpBoundsOverride};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use hommexx_config_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::codegen::{cargo_directives, render_c_header, render_rust_constants};
    pub use crate::config::{BuildFlags, BuildFlagsBuilder, ConfigFile};
    pub use crate::core::{
        Backend, BackendIndicators, BuildConfiguration, CompilerId, ConfigError,
        ConstQualifier, ResolvedConfiguration, Result, TargetProfile,
    };
    pub use crate::resolve::{
        compiler_workaround, resolve_build, BackendSelector, ParameterResolver,
        WarpBoundsOverride,
    };
}
