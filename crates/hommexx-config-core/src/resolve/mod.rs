//! Configuration resolution.
//!
//! [`BackendSelector`] runs first; its profile feeds [`ParameterResolver`].
//! [`resolve_build`] chains the two over a set of [`BuildFlags`].

pub mod backend;
pub mod parameters;

pub use backend::BackendSelector;
pub use parameters::{
    compiler_workaround, ParameterResolver, WarpBoundsOverride, CPU_VECTOR_SIZE,
    GPU_VECTOR_SIZE, GPU_WARP_BOUNDS, HOST_WARP_BOUNDS,
};

use crate::config::flags::BuildFlags;
use crate::core::{
    error::Result,
    types::{BuildConfiguration, CompilerId},
};

/// Resolves the complete build configuration from raw flags.
///
/// The backend is settled before any numeric override is looked at, so an
/// explicit backend masks indicator conflicts and a conflict is reported
/// ahead of a bad vector size. A missing compiler identity resolves the
/// same way as an unrecognized one.
pub fn resolve_build(flags: &BuildFlags) -> Result<BuildConfiguration> {
    let profile = BackendSelector::resolve(flags.explicit_backend, &flags.indicators)?;
    let warp_bounds = flags.warp_bounds.complete(profile.backend);
    let compiler = flags.compiler.unwrap_or(CompilerId::Unknown);
    if compiler == CompilerId::Unknown {
        log::warn!("Unrecognized compiler; keeping `const` in ConstExceptGnu declarations");
    }
    let resolved = ParameterResolver::resolve(profile, flags.vector_size, warp_bounds, compiler)?;

    Ok(BuildConfiguration {
        profile,
        resolved,
        compiler,
        mpi_on_device: flags.mpi_on_device_or_default(),
    })
}
