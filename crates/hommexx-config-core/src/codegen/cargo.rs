//! Cargo build-script directives.

use crate::config::flags::TRACKED_ENV_VARS;
use crate::core::types::{Backend, BuildConfiguration};

/// cfg carrying the backend name, e.g. `hommexx_exec_space = "cuda"`.
pub const EXEC_SPACE_CFG: &str = "hommexx_exec_space";
/// cfg set for accelerator backends.
pub const GPU_CFG: &str = "hommexx_gpu";
/// cfg set when message passing runs on device buffers.
pub const MPI_ON_DEVICE_CFG: &str = "hommexx_mpi_on_device";

/// `rustc-check-cfg` declarations for every cfg this crate can emit.
pub fn check_cfg_directives() -> Vec<String> {
    let values = Backend::INDICATORS
        .iter()
        .chain(std::iter::once(&Backend::Default))
        .map(|backend| format!("\"{}\"", backend.config_name()))
        .collect::<Vec<_>>()
        .join(", ");

    vec![
        format!("cargo:rustc-check-cfg=cfg({EXEC_SPACE_CFG}, values({values}))"),
        format!("cargo:rustc-check-cfg=cfg({GPU_CFG})"),
        format!("cargo:rustc-check-cfg=cfg({MPI_ON_DEVICE_CFG})"),
    ]
}

/// `rustc-cfg` lines describing the resolved configuration.
pub fn cfg_directives(config: &BuildConfiguration) -> Vec<String> {
    let mut lines = vec![format!(
        "cargo:rustc-cfg={EXEC_SPACE_CFG}=\"{}\"",
        config.backend().config_name()
    )];
    if config.backend().is_accelerator() {
        lines.push(format!("cargo:rustc-cfg={GPU_CFG}"));
    }
    if config.mpi_on_device {
        lines.push(format!("cargo:rustc-cfg={MPI_ON_DEVICE_CFG}"));
    }
    lines
}

/// `rerun-if-env-changed` lines for every tracked variable.
pub fn rerun_directives() -> Vec<String> {
    TRACKED_ENV_VARS
        .iter()
        .map(|var| format!("cargo:rerun-if-env-changed={var}"))
        .collect()
}

/// Every directive a build script should print for this configuration.
pub fn cargo_directives(config: &BuildConfiguration) -> Vec<String> {
    let mut lines = rerun_directives();
    lines.extend(check_cfg_directives());
    lines.extend(cfg_directives(config));
    lines
}
