//! Code generation for compile-time exposure of a resolved configuration.
//!
//! All renderers are deterministic: the same configuration always yields
//! byte-identical output, so cargo does not rebuild dependents needlessly.

pub mod cargo;
pub mod header;
pub mod rust;

pub use cargo::{cargo_directives, cfg_directives, check_cfg_directives, rerun_directives};
pub use header::{render_c_header, HEADER_FILE};
pub use rust::{render_rust_constants, RUST_CONSTANTS_FILE};

use crate::core::{
    error::{ConfigError, Result},
    types::BuildConfiguration,
};

/// File name of the JSON dump of the configuration.
pub const JSON_FILE: &str = "hommexx_config.json";

/// Renders the configuration as pretty-printed JSON.
pub fn render_json(config: &BuildConfiguration) -> Result<String> {
    serde_json::to_string_pretty(config)
        .map_err(|err| ConfigError::config_file(JSON_FILE, err))
}
