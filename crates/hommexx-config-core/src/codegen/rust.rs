//! Rust constants for the facade crate.

use crate::core::types::BuildConfiguration;

/// File name the facade's build script writes the constants to.
pub const RUST_CONSTANTS_FILE: &str = "hommexx_config.rs";

/// Renders the configuration as Rust items for `include!`.
///
/// `core_path` is the path under which the including crate sees this
/// crate, e.g. `::hommexx_config_core`.
pub fn render_rust_constants(config: &BuildConfiguration, core_path: &str) -> String {
    let resolved = &config.resolved;
    let lines = [
        "// @generated by hommexx-config-core; edits are overwritten on rebuild.".to_string(),
        String::new(),
        "/// Active execution backend.".to_string(),
        format!(
            "pub const EXEC_SPACE: {core_path}::Backend = {core_path}::Backend::{};",
            config.backend().variant_name()
        ),
        "/// Data lanes packed per vector operation.".to_string(),
        format!("pub const VECTOR_SIZE: usize = {};", resolved.vector_size),
        "/// Lower bound on warps scheduled per team.".to_string(),
        format!(
            "pub const MIN_WARPS_PER_TEAM: u32 = {};",
            resolved.min_warps_per_team
        ),
        "/// Upper bound on warps scheduled per team.".to_string(),
        format!(
            "pub const MAX_WARPS_PER_TEAM: u32 = {};",
            resolved.max_warps_per_team
        ),
        "/// Token standing in for `const` in compiler-sensitive declarations.".to_string(),
        format!(
            "pub const CONST_EXCEPT_GNU: &str = {:?};",
            resolved.compiler_workaround.as_str()
        ),
        "/// Whether message passing works on device buffers directly.".to_string(),
        format!("pub const MPI_ON_DEVICE: bool = {};", config.mpi_on_device),
        "/// Compiler the kernels are built with.".to_string(),
        format!(
            "pub const COMPILER: {core_path}::CompilerId = {core_path}::CompilerId::{};",
            config.compiler.variant_name()
        ),
        String::new(),
        "/// The complete configuration baked into this build.".to_string(),
        format!(
            "pub static CONFIG: {core_path}::BuildConfiguration = \
             {core_path}::BuildConfiguration {{"
        ),
        format!("    profile: {core_path}::TargetProfile {{ backend: EXEC_SPACE }},"),
        format!("    resolved: {core_path}::ResolvedConfiguration {{"),
        "        vector_size: VECTOR_SIZE,".to_string(),
        "        min_warps_per_team: MIN_WARPS_PER_TEAM,".to_string(),
        "        max_warps_per_team: MAX_WARPS_PER_TEAM,".to_string(),
        format!(
            "        compiler_workaround: {core_path}::ConstQualifier::{},",
            resolved.compiler_workaround.variant_name()
        ),
        "    },".to_string(),
        "    compiler: COMPILER,".to_string(),
        "    mpi_on_device: MPI_ON_DEVICE,".to_string(),
        "};".to_string(),
    ];

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
