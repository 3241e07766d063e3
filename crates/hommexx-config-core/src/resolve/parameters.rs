//! Vector width, warp bounds and compiler workaround resolution.
//!
//! Accelerator backends get thread-level parallelism and a single lane per
//! vector; host backends pack eight lanes to approximate SIMD width. Warp
//! bounds only mean something on accelerators but are always defined so
//! kernels can use them unconditionally.

use crate::core::{
    error::{ConfigError, Result},
    types::{Backend, CompilerId, ConstQualifier, ResolvedConfiguration, TargetProfile},
};
use serde::Serialize;

/// Vector size used on accelerator backends.
pub const GPU_VECTOR_SIZE: usize = 1;

/// Vector size used on host backends.
pub const CPU_VECTOR_SIZE: usize = 8;

/// Default `(min, max)` warps per team on accelerator backends.
pub const GPU_WARP_BOUNDS: (u32, u32) = (8, 16);

/// Fixed `(min, max)` warps per team on host backends.
pub const HOST_WARP_BOUNDS: (u32, u32) = (1, 1);

/// Independently supplied warp bound overrides.
///
/// The minimum and maximum arrive as separate flags; a missing side is
/// filled from the backend default before validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct WarpBoundsOverride {
    /// Minimum warps per team
    pub min: Option<i64>,
    /// Maximum warps per team
    pub max: Option<i64>,
}

impl WarpBoundsOverride {
    /// Whether neither bound was supplied.
    pub const fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Completes a partial override against the backend defaults.
    ///
    /// Returns `None` when neither side was supplied.
    pub fn complete(&self, backend: Backend) -> Option<(i64, i64)> {
        if self.is_empty() {
            return None;
        }
        let (default_min, default_max) = ParameterResolver::default_warp_bounds(backend);
        Some((
            self.min.unwrap_or_else(|| i64::from(default_min)),
            self.max.unwrap_or_else(|| i64::from(default_max)),
        ))
    }
}

/// Computes the numerical parameters for a selected backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterResolver;

impl ParameterResolver {
    /// Resolves the vector size, warp bounds and compiler workaround token.
    pub fn resolve(
        profile: TargetProfile,
        vector_size_override: Option<i64>,
        warp_bounds_override: Option<(i64, i64)>,
        compiler: CompilerId,
    ) -> Result<ResolvedConfiguration> {
        let vector_size = Self::vector_size(profile.backend, vector_size_override)?;
        let (min_warps_per_team, max_warps_per_team) =
            Self::warp_bounds(profile.backend, warp_bounds_override)?;
        let compiler_workaround = compiler_workaround(compiler);

        log::debug!(
            "Resolved {}: vector size {}, warps per team {}..={}, ConstExceptGnu `{}`",
            profile.backend,
            vector_size,
            min_warps_per_team,
            max_warps_per_team,
            compiler_workaround.as_str()
        );

        Ok(ResolvedConfiguration {
            vector_size,
            min_warps_per_team,
            max_warps_per_team,
            compiler_workaround,
        })
    }

    /// Vector size a backend gets when no override is supplied.
    pub const fn default_vector_size(backend: Backend) -> usize {
        if backend.is_accelerator() {
            GPU_VECTOR_SIZE
        } else {
            CPU_VECTOR_SIZE
        }
    }

    /// Warp bounds a backend gets when no override is supplied.
    pub const fn default_warp_bounds(backend: Backend) -> (u32, u32) {
        if backend.is_accelerator() {
            GPU_WARP_BOUNDS
        } else {
            HOST_WARP_BOUNDS
        }
    }

    fn vector_size(backend: Backend, requested: Option<i64>) -> Result<usize> {
        let Some(value) = requested else {
            return Ok(Self::default_vector_size(backend));
        };

        if value <= 0 {
            return Err(ConfigError::invalid_parameter(
                "vector size",
                value,
                "must be a positive integer",
            ));
        }
        usize::try_from(value).map_err(|_| {
            ConfigError::invalid_parameter("vector size", value, "does not fit the target's usize")
        })
    }

    fn warp_bounds(backend: Backend, requested: Option<(i64, i64)>) -> Result<(u32, u32)> {
        let Some((min, max)) = requested else {
            return Ok(Self::default_warp_bounds(backend));
        };

        if min <= 0 {
            return Err(ConfigError::invalid_parameter(
                "minimum warps per team",
                min,
                "must be a positive integer",
            ));
        }
        if min > max {
            return Err(ConfigError::invalid_parameter(
                "warp bounds",
                format!("({min}, {max})"),
                "minimum exceeds maximum",
            ));
        }

        let to_u32 = |name: &str, value: i64| {
            u32::try_from(value)
                .map_err(|_| ConfigError::invalid_parameter(name, value, "does not fit in 32 bits"))
        };
        let bounds = (
            to_u32("minimum warps per team", min)?,
            to_u32("maximum warps per team", max)?,
        );

        if !backend.is_accelerator() {
            log::debug!(
                "Warp bounds {bounds:?} supplied for host backend {backend}; kept as given"
            );
        }
        Ok(bounds)
    }
}

/// Maps a compiler identity to the token that stands in for `const`.
///
/// GNU mis-elaborates some `const`-qualified declarations (see
/// kokkos/kokkos-kernels#129), so the qualifier is dropped for it only.
pub fn compiler_workaround(compiler: CompilerId) -> ConstQualifier {
    match compiler {
        CompilerId::Gnu => ConstQualifier::Omitted,
        _ => ConstQualifier::Const,
    }
}
