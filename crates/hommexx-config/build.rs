//! Resolves the target configuration and bakes it into the crate.
//!
//! Any resolution error fails the build; an inconsistent configuration
//! never reaches the kernels.

use hommexx_config_core::codegen::{
    cargo_directives, render_c_header, render_json, render_rust_constants, HEADER_FILE,
    JSON_FILE, RUST_CONSTANTS_FILE,
};
use hommexx_config_core::config::flags::CONFIG_FILE_VAR;
use hommexx_config_core::{resolve_build, BuildFlags, CompilerId};
use std::env;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    if let Err(err) = run() {
        panic!("hommexx-config: {err}");
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=build.rs");
    if let Ok(path) = env::var(CONFIG_FILE_VAR) {
        if !path.trim().is_empty() {
            println!("cargo:rerun-if-changed={}", path.trim());
        }
    }

    let mut flags = BuildFlags::collect(|name| env::var(name).ok())?
        .with_cargo_features(|name| env::var(name).ok());
    if flags.compiler.is_none() {
        flags.compiler = Some(detect_compiler());
    }

    let config = resolve_build(&flags)?;
    if config.compiler == CompilerId::Unknown {
        println!(
            "cargo:warning=hommexx-config: compiler not recognized; \
             ConstExceptGnu keeps `const` (set HOMMEXX_COMPILER to override)"
        );
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let include_dir = out_dir.join("include");
    fs::create_dir_all(&include_dir)?;

    write_if_changed(
        &out_dir.join(RUST_CONSTANTS_FILE),
        &render_rust_constants(&config, "::hommexx_config_core"),
    )?;
    write_if_changed(&include_dir.join(HEADER_FILE), &render_c_header(&config))?;
    write_if_changed(&out_dir.join(JSON_FILE), &render_json(&config)?)?;

    for directive in cargo_directives(&config) {
        println!("{directive}");
    }
    // Exposed to dependents' build scripts as DEP_HOMMEXX_CONFIG_INCLUDE.
    println!("cargo:include={}", include_dir.display());

    Ok(())
}

/// Identifies the C++ compiler cargo would hand to `cc`.
fn detect_compiler() -> CompilerId {
    let tool = match cc::Build::new()
        .cpp(true)
        .cargo_metadata(false)
        .try_get_compiler()
    {
        Ok(tool) => tool,
        Err(err) => {
            println!("cargo:warning=hommexx-config: no C++ compiler found ({err})");
            return CompilerId::Unknown;
        }
    };

    let family = if tool.is_like_clang() {
        Some(CompilerId::Clang)
    } else if tool.is_like_gnu() {
        Some(CompilerId::Gnu)
    } else if tool.is_like_msvc() {
        Some(CompilerId::Msvc)
    } else {
        None
    };
    CompilerId::from_detected(&tool.path().to_string_lossy(), family)
}

fn write_if_changed(path: &Path, contents: &str) -> std::io::Result<()> {
    if fs::read_to_string(path).is_ok_and(|existing| existing == contents) {
        return Ok(());
    }
    fs::write(path, contents)
}
