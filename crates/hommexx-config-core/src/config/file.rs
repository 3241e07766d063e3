//! Generated configuration file.
//!
//! A build system can write its decisions to a JSON file and point
//! `HOMMEXX_CONFIG_FILE` at it. Values from the file sit below the
//! environment in precedence; an `exec_space` in the file counts as an
//! explicit backend.
//!
//! ```json
//! {
//!   "exec_space": "cuda",
//!   "vector_size": 1,
//!   "min_warp_per_team": 8,
//!   "max_warp_per_team": 16,
//!   "mpi_on_device": true,
//!   "compiler": "gnu"
//! }
//! ```

use crate::config::flags::{parse_compiler, BuildFlags};
use crate::core::error::{ConfigError, Result};
use crate::core::types::Backend;
use crate::resolve::parameters::WarpBoundsOverride;
use serde::Deserialize;
use std::path::Path;

/// Contents of a generated configuration file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Explicit execution backend name
    pub exec_space: Option<String>,
    /// Vector size override
    pub vector_size: Option<i64>,
    /// Minimum warps per team override
    pub min_warp_per_team: Option<i64>,
    /// Maximum warps per team override
    pub max_warp_per_team: Option<i64>,
    /// On-device message passing
    pub mpi_on_device: Option<bool>,
    /// Compiler identity
    pub compiler: Option<String>,
}

impl ConfigFile {
    /// Loads a configuration file from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|err| ConfigError::config_file(path.display(), err))?;
        Self::from_json_str(&text).map_err(|err| match err {
            ConfigError::ConfigFile { reason, .. } => {
                ConfigError::config_file(path.display(), reason)
            }
            other => other,
        })
    }

    /// Parses configuration file contents.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|err| ConfigError::config_file("<inline>", err))
    }

    /// Converts the file contents into build flags.
    pub fn into_flags(self) -> Result<BuildFlags> {
        let explicit_backend = self
            .exec_space
            .as_deref()
            .map(str::parse::<Backend>)
            .transpose()?;

        Ok(BuildFlags {
            explicit_backend,
            indicators: Default::default(),
            vector_size: self.vector_size,
            warp_bounds: WarpBoundsOverride {
                min: self.min_warp_per_team,
                max: self.max_warp_per_team,
            },
            compiler: self.compiler.as_deref().map(parse_compiler),
            mpi_on_device: self.mpi_on_device,
        })
    }
}
