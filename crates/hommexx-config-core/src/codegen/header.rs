//! C++ header for kernel translation units.
//!
//! Mirrors the symbols the kernels test with `#ifdef`, so a C++ build sees
//! exactly the configuration the Rust side resolved.

use crate::core::types::BuildConfiguration;

/// File name of the generated header.
pub const HEADER_FILE: &str = "Hommexx_config.h";

const INCLUDE_GUARD: &str = "HOMMEXX_CONFIG_H";

/// Renders the configuration as a C/C++ header.
pub fn render_c_header(config: &BuildConfiguration) -> String {
    let backend = config.backend();
    let resolved = &config.resolved;

    let mut lines = vec![
        "/* Generated by hommexx-config-core; edits are overwritten on rebuild. */".to_string(),
        format!("#ifndef {INCLUDE_GUARD}"),
        format!("#define {INCLUDE_GUARD}"),
        String::new(),
        format!("/* Execution backend: {backend} */"),
        format!("#define {}", backend.space_symbol()),
    ];
    if backend.is_accelerator() {
        lines.push("#define HOMMEXX_ENABLE_GPU".to_string());
    }

    lines.extend([
        String::new(),
        format!("#define HOMMEXX_VECTOR_SIZE {}", resolved.vector_size),
        format!(
            "#define HOMMEXX_CUDA_MIN_WARP_PER_TEAM {}",
            resolved.min_warps_per_team
        ),
        format!(
            "#define HOMMEXX_CUDA_MAX_WARP_PER_TEAM {}",
            resolved.max_warps_per_team
        ),
        format!(
            "#define HOMMEXX_MPI_ON_DEVICE {}",
            u8::from(config.mpi_on_device)
        ),
        String::new(),
        format!("/* Compiler: {} (see kokkos/kokkos-kernels#129) */", config.compiler),
        format!("#define ConstExceptGnu {}", resolved.compiler_workaround.as_str())
            .trim_end()
            .to_string(),
        String::new(),
        format!("#endif /* {INCLUDE_GUARD} */"),
    ]);

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
