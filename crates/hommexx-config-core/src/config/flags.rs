//! Raw build flags and their environment sources.
//!
//! Flags arrive as strings from the environment of the build script. They
//! are parsed here into a sparse [`BuildFlags`] record; interpretation of
//! the values (defaults, ranges, precedence between backends) belongs to
//! the resolvers.

use crate::config::file::ConfigFile;
use crate::core::{
    error::{ConfigError, Result},
    types::{Backend, BackendIndicators, CompilerId},
};
use crate::resolve::parameters::WarpBoundsOverride;
use std::path::Path;

/// Explicit backend selection, taking precedence over indicators.
pub const EXEC_SPACE_VAR: &str = "HOMMEXX_EXEC_SPACE";
/// Vector size override.
pub const VECTOR_SIZE_VAR: &str = "HOMMEXX_VECTOR_SIZE";
/// Minimum warps per team override.
pub const MIN_WARP_VAR: &str = "HOMMEXX_CUDA_MIN_WARP_PER_TEAM";
/// Maximum warps per team override.
pub const MAX_WARP_VAR: &str = "HOMMEXX_CUDA_MAX_WARP_PER_TEAM";
/// On-device message passing switch.
pub const MPI_ON_DEVICE_VAR: &str = "HOMMEXX_MPI_ON_DEVICE";
/// Compiler identity reported by toolchain detection.
pub const COMPILER_VAR: &str = "HOMMEXX_COMPILER";
/// Path of a generated JSON configuration file.
pub const CONFIG_FILE_VAR: &str = "HOMMEXX_CONFIG_FILE";

/// Every environment variable that can influence resolution.
pub const TRACKED_ENV_VARS: [&str; 13] = [
    EXEC_SPACE_VAR,
    "HOMMEXX_CUDA_SPACE",
    "HOMMEXX_OPENMP_SPACE",
    "HOMMEXX_THREADS_SPACE",
    "HOMMEXX_SERIAL_SPACE",
    "HOMMEXX_HIP_SPACE",
    "HOMMEXX_SYCL_SPACE",
    VECTOR_SIZE_VAR,
    MIN_WARP_VAR,
    MAX_WARP_VAR,
    MPI_ON_DEVICE_VAR,
    COMPILER_VAR,
    CONFIG_FILE_VAR,
];

/// Default for on-device message passing when no source sets it.
pub const DEFAULT_MPI_ON_DEVICE: bool = true;

/// Sparse set of build-configuration inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildFlags {
    /// Backend chosen explicitly by the build invoker or generated config
    pub explicit_backend: Option<Backend>,
    /// Backend indicators that were set
    pub indicators: BackendIndicators,
    /// Vector size override
    pub vector_size: Option<i64>,
    /// Warp bound overrides
    pub warp_bounds: WarpBoundsOverride,
    /// Compiler identity, if known
    pub compiler: Option<CompilerId>,
    /// On-device message passing, passed through uninterpreted
    pub mpi_on_device: Option<bool>,
}

impl BuildFlags {
    /// Create a builder starting from empty flags.
    pub fn builder() -> BuildFlagsBuilder {
        BuildFlagsBuilder::new()
    }

    /// Reads flags from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads flags through a variable lookup function.
    ///
    /// Only the environment variables are read; see [`BuildFlags::collect`]
    /// for the configuration file layer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // A blank value clears the variable; only indicators treat it as set.
        let value_of = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut flags = Self::default();

        if let Some(name) = value_of(EXEC_SPACE_VAR) {
            flags.explicit_backend = Some(name.parse()?);
        }

        for backend in Backend::INDICATORS {
            let Some(flag) = backend.indicator_flag() else {
                continue;
            };
            if let Some(value) = lookup(flag) {
                if parse_bool(flag, &value)? {
                    flags.indicators.insert(backend);
                }
            }
        }

        flags.vector_size = value_of(VECTOR_SIZE_VAR)
            .map(|value| parse_int(VECTOR_SIZE_VAR, &value))
            .transpose()?;
        flags.warp_bounds = WarpBoundsOverride {
            min: value_of(MIN_WARP_VAR)
                .map(|value| parse_int(MIN_WARP_VAR, &value))
                .transpose()?,
            max: value_of(MAX_WARP_VAR)
                .map(|value| parse_int(MAX_WARP_VAR, &value))
                .transpose()?,
        };
        flags.mpi_on_device = lookup(MPI_ON_DEVICE_VAR)
            .map(|value| parse_bool(MPI_ON_DEVICE_VAR, &value))
            .transpose()?;
        flags.compiler = value_of(COMPILER_VAR).map(|value| parse_compiler(&value));

        Ok(flags)
    }

    /// Reads the configuration file named by `HOMMEXX_CONFIG_FILE`, if any,
    /// and overlays the environment flags on top of it.
    pub fn collect<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_file = match lookup(CONFIG_FILE_VAR) {
            Some(path) if !path.trim().is_empty() => {
                ConfigFile::from_path(Path::new(path.trim()))?.into_flags()?
            }
            _ => Self::default(),
        };
        let from_env = Self::from_lookup(lookup)?;
        Ok(from_file.overlay(&from_env))
    }

    /// Adds an indicator for every backend whose cargo feature is enabled.
    ///
    /// Cargo exposes enabled features to build scripts as
    /// `CARGO_FEATURE_<NAME>`; see [`cargo_feature_var`].
    pub fn with_cargo_features<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        for backend in Backend::INDICATORS {
            if lookup(&cargo_feature_var(backend)).is_some() {
                log::debug!("Cargo feature `{}` indicates {}", backend.config_name(), backend);
                self.indicators.insert(backend);
            }
        }
        self
    }

    /// Overlays a higher-precedence set of flags onto this one.
    ///
    /// Scalar fields set in `higher` replace ours; indicators are unioned.
    pub fn overlay(&self, higher: &Self) -> Self {
        Self {
            explicit_backend: higher.explicit_backend.or(self.explicit_backend),
            indicators: self.indicators.union(&higher.indicators),
            vector_size: higher.vector_size.or(self.vector_size),
            warp_bounds: WarpBoundsOverride {
                min: higher.warp_bounds.min.or(self.warp_bounds.min),
                max: higher.warp_bounds.max.or(self.warp_bounds.max),
            },
            compiler: higher.compiler.or(self.compiler),
            mpi_on_device: higher.mpi_on_device.or(self.mpi_on_device),
        }
    }

    /// Effective on-device message passing setting.
    pub fn mpi_on_device_or_default(&self) -> bool {
        self.mpi_on_device.unwrap_or(DEFAULT_MPI_ON_DEVICE)
    }
}

/// Builder for assembling flags programmatically.
#[derive(Debug, Default)]
pub struct BuildFlagsBuilder {
    flags: BuildFlags,
}

impl BuildFlagsBuilder {
    /// Create a new builder with no flags set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the explicit backend.
    pub fn explicit_backend(mut self, backend: Backend) -> Self {
        self.flags.explicit_backend = Some(backend);
        self
    }

    /// Add a backend indicator.
    pub fn indicator(mut self, backend: Backend) -> Self {
        self.flags.indicators.insert(backend);
        self
    }

    /// Set the vector size override.
    pub fn vector_size(mut self, size: i64) -> Self {
        self.flags.vector_size = Some(size);
        self
    }

    /// Set the minimum warps per team override.
    pub fn min_warps_per_team(mut self, min: i64) -> Self {
        self.flags.warp_bounds.min = Some(min);
        self
    }

    /// Set the maximum warps per team override.
    pub fn max_warps_per_team(mut self, max: i64) -> Self {
        self.flags.warp_bounds.max = Some(max);
        self
    }

    /// Set the compiler identity.
    pub fn compiler(mut self, compiler: CompilerId) -> Self {
        self.flags.compiler = Some(compiler);
        self
    }

    /// Set on-device message passing.
    pub fn mpi_on_device(mut self, enabled: bool) -> Self {
        self.flags.mpi_on_device = Some(enabled);
        self
    }

    /// Build the flags.
    pub fn build(self) -> BuildFlags {
        self.flags
    }
}

/// Build-script variable cargo sets when a backend's feature is enabled.
pub fn cargo_feature_var(backend: Backend) -> String {
    format!("CARGO_FEATURE_{}", backend.config_name().to_ascii_uppercase())
}

/// Parses a boolean flag.
///
/// An empty value counts as set, the way `-DNAME` defines a symbol.
pub fn parse_bool(flag: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(ConfigError::malformed_flag(flag, value, "a boolean (1/0, true/false, on/off)")),
    }
}

/// Parses an integer flag. Range checks are left to the resolver.
pub fn parse_int(flag: &str, value: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::malformed_flag(flag, value, "an integer"))
}

/// Parses a compiler identity; unrecognized names are kept as `Unknown`.
pub fn parse_compiler(value: &str) -> CompilerId {
    match value.parse::<CompilerId>() {
        Ok(id) => id,
        Err(never) => match never {},
    }
}
