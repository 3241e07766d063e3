//! Data model shared by the resolvers, the flag sources and the generators.

use crate::core::error::{ConfigError, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Parallel execution backends a build can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// NVIDIA CUDA
    Cuda,
    /// OpenMP host threads
    OpenMp,
    /// C++ threads host pool
    Threads,
    /// Single-threaded host execution
    Serial,
    /// AMD HIP
    Hip,
    /// SYCL devices
    Sycl,
    /// Whatever the parallel framework picks when nothing is requested
    Default,
}

impl Backend {
    /// Backends that can be requested through an indicator flag, in a fixed order.
    pub const INDICATORS: [Self; 6] = [
        Self::Cuda,
        Self::OpenMp,
        Self::Threads,
        Self::Serial,
        Self::Hip,
        Self::Sycl,
    ];

    /// Whether this backend runs on an accelerator device.
    pub const fn is_accelerator(self) -> bool {
        matches!(self, Self::Cuda | Self::Hip | Self::Sycl)
    }

    /// Lowercase name used in flags, config files and cfg values.
    pub const fn config_name(self) -> &'static str {
        match self {
            Self::Cuda => "cuda",
            Self::OpenMp => "openmp",
            Self::Threads => "threads",
            Self::Serial => "serial",
            Self::Hip => "hip",
            Self::Sycl => "sycl",
            Self::Default => "default",
        }
    }

    /// Name of the Rust enum variant, used by code generation.
    pub const fn variant_name(self) -> &'static str {
        match self {
            Self::Cuda => "Cuda",
            Self::OpenMp => "OpenMp",
            Self::Threads => "Threads",
            Self::Serial => "Serial",
            Self::Hip => "Hip",
            Self::Sycl => "Sycl",
            Self::Default => "Default",
        }
    }

    /// Preprocessor-style symbol naming this backend's execution space.
    pub const fn space_symbol(self) -> &'static str {
        match self {
            Self::Cuda => "HOMMEXX_CUDA_SPACE",
            Self::OpenMp => "HOMMEXX_OPENMP_SPACE",
            Self::Threads => "HOMMEXX_THREADS_SPACE",
            Self::Serial => "HOMMEXX_SERIAL_SPACE",
            Self::Hip => "HOMMEXX_HIP_SPACE",
            Self::Sycl => "HOMMEXX_SYCL_SPACE",
            Self::Default => "HOMMEXX_DEFAULT_SPACE",
        }
    }

    /// Environment flag that indicates this backend, if it has one.
    pub const fn indicator_flag(self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            other => Some(other.space_symbol()),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cuda => write!(f, "CUDA"),
            Self::OpenMp => write!(f, "OpenMP"),
            Self::Threads => write!(f, "Threads"),
            Self::Serial => write!(f, "Serial"),
            Self::Hip => write!(f, "HIP"),
            Self::Sycl => write!(f, "SYCL"),
            Self::Default => write!(f, "Default"),
        }
    }
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let lowered = trimmed.to_ascii_lowercase();
        let name = lowered.strip_prefix("kokkos::").unwrap_or(lowered.as_str());

        match name {
            "cuda" => Ok(Self::Cuda),
            "openmp" => Ok(Self::OpenMp),
            "threads" => Ok(Self::Threads),
            "serial" => Ok(Self::Serial),
            "hip" => Ok(Self::Hip),
            "sycl" => Ok(Self::Sycl),
            "default" => Ok(Self::Default),
            _ => Err(ConfigError::unknown_backend(trimmed)),
        }
    }
}

/// Set of backend indicators supplied to a build.
///
/// `Default` is the absence of any indicator and is never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BackendIndicators {
    set: BTreeSet<Backend>,
}

impl BackendIndicators {
    /// Create an empty indicator set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a backend as indicated. Returns false for `Default` or a repeat.
    pub fn insert(&mut self, backend: Backend) -> bool {
        if backend == Backend::Default {
            return false;
        }
        self.set.insert(backend)
    }

    /// Whether a backend is indicated.
    pub fn contains(&self, backend: Backend) -> bool {
        self.set.contains(&backend)
    }

    /// Number of indicated backends.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Whether no backend is indicated.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Indicated backends in indicator order.
    pub fn iter(&self) -> impl Iterator<Item = Backend> + '_ {
        self.set.iter().copied()
    }

    /// Union of two indicator sets.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            set: self.set.union(&other.set).copied().collect(),
        }
    }
}

impl FromIterator<Backend> for BackendIndicators {
    fn from_iter<I: IntoIterator<Item = Backend>>(iter: I) -> Self {
        let mut indicators = Self::new();
        for backend in iter {
            indicators.insert(backend);
        }
        indicators
    }
}

/// The backend selected for a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TargetProfile {
    /// Active execution backend
    pub backend: Backend,
}

/// Compilers the toolchain detection can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompilerId {
    /// GNU g++
    Gnu,
    /// LLVM clang++
    Clang,
    /// Apple's clang build
    AppleClang,
    /// Classic Intel icpc
    Intel,
    /// Intel oneAPI icpx
    IntelLlvm,
    /// NVIDIA nvcc
    Nvcc,
    /// NVIDIA HPC SDK nvc++
    NvHpc,
    /// Microsoft cl.exe
    Msvc,
    /// Cray CC
    Cray,
    /// IBM XL xlC
    IbmXl,
    /// Anything not recognized
    Unknown,
}

impl CompilerId {
    /// Name of the Rust enum variant, used by code generation.
    pub const fn variant_name(self) -> &'static str {
        match self {
            Self::Gnu => "Gnu",
            Self::Clang => "Clang",
            Self::AppleClang => "AppleClang",
            Self::Intel => "Intel",
            Self::IntelLlvm => "IntelLlvm",
            Self::Nvcc => "Nvcc",
            Self::NvHpc => "NvHpc",
            Self::Msvc => "Msvc",
            Self::Cray => "Cray",
            Self::IbmXl => "IbmXl",
            Self::Unknown => "Unknown",
        }
    }

    /// Classify a compiler executable by its file name.
    ///
    /// Version suffixes (`g++-12`, `clang++-17`) and extensions (`cl.exe`)
    /// are ignored. Generic driver names like `c++` or `cc` could be any
    /// compiler and map to `Unknown`.
    pub fn from_command(command: &str) -> Self {
        let file_name = Path::new(command.trim())
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let stem = file_name.strip_suffix(".exe").unwrap_or(file_name.as_str());
        let base = strip_version_suffix(stem);

        match base {
            "g++" | "gcc" => Self::Gnu,
            "clang++" | "clang" => Self::Clang,
            "icpc" | "icc" => Self::Intel,
            "icpx" | "icx" | "dpcpp" => Self::IntelLlvm,
            "nvcc" | "nvcc_wrapper" => Self::Nvcc,
            "nvc++" | "nvc" | "pgc++" => Self::NvHpc,
            "cl" => Self::Msvc,
            "crayc++" | "craycc" => Self::Cray,
            "xlc++" | "xlc" | "xlc_r" | "xlclang++" => Self::IbmXl,
            _ => {
                // Cross toolchains prefix the triple: x86_64-linux-gnu-g++
                if base.ends_with("-g++") || base.ends_with("-gcc") {
                    Self::Gnu
                } else if base.ends_with("-clang++") || base.ends_with("-clang") {
                    Self::Clang
                } else {
                    Self::Unknown
                }
            }
        }
    }

    /// Classify a detected compiler, falling back to the family the
    /// toolchain probe reports when the executable name is not conclusive.
    pub fn from_detected(command: &str, family: Option<Self>) -> Self {
        match (Self::from_command(command), family) {
            (Self::Unknown, Some(family)) => family,
            (by_name, _) => by_name,
        }
    }
}

fn strip_version_suffix(name: &str) -> &str {
    match name.rfind('-') {
        Some(pos)
            if pos > 0
                && name[pos + 1..]
                    .chars()
                    .all(|c| c.is_ascii_digit() || c == '.')
                && pos + 1 < name.len() =>
        {
            &name[..pos]
        }
        _ => name,
    }
}

impl fmt::Display for CompilerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gnu => write!(f, "GNU"),
            Self::Clang => write!(f, "Clang"),
            Self::AppleClang => write!(f, "AppleClang"),
            Self::Intel => write!(f, "Intel"),
            Self::IntelLlvm => write!(f, "IntelLLVM"),
            Self::Nvcc => write!(f, "NVCC"),
            Self::NvHpc => write!(f, "NVHPC"),
            Self::Msvc => write!(f, "MSVC"),
            Self::Cray => write!(f, "Cray"),
            Self::IbmXl => write!(f, "XL"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for CompilerId {
    type Err = std::convert::Infallible;

    /// Parse a compiler identity. Unrecognized names become `Unknown`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let id = match s.trim().to_ascii_lowercase().as_str() {
            "gnu" | "gcc" | "g++" => Self::Gnu,
            "clang" | "llvm" => Self::Clang,
            "appleclang" | "apple-clang" => Self::AppleClang,
            "intel" | "icc" | "icpc" => Self::Intel,
            "intelllvm" | "intel-llvm" | "icx" | "icpx" => Self::IntelLlvm,
            "nvcc" | "nvidia" => Self::Nvcc,
            "nvhpc" | "nvc++" | "pgi" => Self::NvHpc,
            "msvc" => Self::Msvc,
            "cray" => Self::Cray,
            "xl" | "ibm" | "ibmxl" => Self::IbmXl,
            _ => Self::Unknown,
        };
        Ok(id)
    }
}

/// Token substituted for the `const` qualifier in declarations that one
/// compiler mis-elaborates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstQualifier {
    /// Keep the qualifier
    Const,
    /// Drop the qualifier
    Omitted,
}

impl ConstQualifier {
    /// The token as it appears in source.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Const => "const",
            Self::Omitted => "",
        }
    }

    /// Name of the Rust enum variant, used by code generation.
    pub const fn variant_name(self) -> &'static str {
        match self {
            Self::Const => "Const",
            Self::Omitted => "Omitted",
        }
    }
}

/// Numerical parameters derived from the selected backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedConfiguration {
    /// Data lanes packed per vector operation
    pub vector_size: usize,
    /// Lower bound on warps scheduled per team (1 on host backends)
    pub min_warps_per_team: u32,
    /// Upper bound on warps scheduled per team (1 on host backends)
    pub max_warps_per_team: u32,
    /// Replacement for `const` in compiler-sensitive declarations
    pub compiler_workaround: ConstQualifier,
}

impl ResolvedConfiguration {
    /// Warp bounds as a `(min, max)` pair.
    pub const fn warp_bounds(&self) -> (u32, u32) {
        (self.min_warps_per_team, self.max_warps_per_team)
    }
}

/// Everything baked into a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BuildConfiguration {
    /// Selected backend
    pub profile: TargetProfile,
    /// Derived numerical parameters
    pub resolved: ResolvedConfiguration,
    /// Compiler the kernels are built with
    pub compiler: CompilerId,
    /// Whether message passing works on device buffers directly
    pub mpi_on_device: bool,
}

impl BuildConfiguration {
    /// Shorthand for the selected backend.
    pub const fn backend(&self) -> Backend {
        self.profile.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_display() {
        assert_eq!(format!("{}", Backend::Cuda), "CUDA");
        assert_eq!(format!("{}", Backend::OpenMp), "OpenMP");
        assert_eq!(format!("{}", Backend::Default), "Default");
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("cuda".parse::<Backend>().unwrap(), Backend::Cuda);
        assert_eq!("OpenMP".parse::<Backend>().unwrap(), Backend::OpenMp);
        assert_eq!("Kokkos::Serial".parse::<Backend>().unwrap(), Backend::Serial);
        assert_eq!(" sycl ".parse::<Backend>().unwrap(), Backend::Sycl);
        assert!(matches!(
            "opencl".parse::<Backend>(),
            Err(ConfigError::UnknownBackend { .. })
        ));
    }

    #[test]
    fn test_accelerator_classification() {
        let accelerators: Vec<_> = Backend::INDICATORS
            .iter()
            .filter(|b| b.is_accelerator())
            .copied()
            .collect();
        assert_eq!(accelerators, vec![Backend::Cuda, Backend::Hip, Backend::Sycl]);
        assert!(!Backend::Default.is_accelerator());
    }

    #[test]
    fn test_indicator_flags() {
        assert_eq!(Backend::Cuda.indicator_flag(), Some("HOMMEXX_CUDA_SPACE"));
        assert_eq!(Backend::Default.indicator_flag(), None);
        assert_eq!(Backend::Default.space_symbol(), "HOMMEXX_DEFAULT_SPACE");
    }

    #[test]
    fn test_indicators_ignore_default() {
        let mut indicators = BackendIndicators::new();
        assert!(!indicators.insert(Backend::Default));
        assert!(indicators.insert(Backend::Hip));
        assert!(!indicators.insert(Backend::Hip));
        assert_eq!(indicators.len(), 1);
    }

    #[test]
    fn test_indicators_iterate_in_fixed_order() {
        let indicators: BackendIndicators =
            [Backend::Sycl, Backend::Cuda, Backend::Serial].into_iter().collect();
        let order: Vec<_> = indicators.iter().collect();
        assert_eq!(order, vec![Backend::Cuda, Backend::Serial, Backend::Sycl]);
    }

    #[test]
    fn test_compiler_from_command() {
        assert_eq!(CompilerId::from_command("/usr/bin/g++"), CompilerId::Gnu);
        assert_eq!(CompilerId::from_command("g++-12"), CompilerId::Gnu);
        assert_eq!(
            CompilerId::from_command("x86_64-linux-gnu-g++-11"),
            CompilerId::Gnu
        );
        assert_eq!(CompilerId::from_command("clang++-17"), CompilerId::Clang);
        assert_eq!(CompilerId::from_command("/opt/cuda/bin/nvcc"), CompilerId::Nvcc);
        assert_eq!(CompilerId::from_command("icpx"), CompilerId::IntelLlvm);
        assert_eq!(CompilerId::from_command("cl.exe"), CompilerId::Msvc);
        assert_eq!(CompilerId::from_command("c++"), CompilerId::Unknown);
        assert_eq!(CompilerId::from_command(""), CompilerId::Unknown);
    }

    #[test]
    fn test_compiler_from_detected_falls_back_to_family() {
        assert_eq!(
            CompilerId::from_detected("/usr/bin/c++", Some(CompilerId::Gnu)),
            CompilerId::Gnu
        );
        assert_eq!(
            CompilerId::from_detected("c++", Some(CompilerId::Clang)),
            CompilerId::Clang
        );
        assert_eq!(
            CompilerId::from_detected("nvcc_wrapper", Some(CompilerId::Gnu)),
            CompilerId::Nvcc
        );
        assert_eq!(CompilerId::from_detected("c++", None), CompilerId::Unknown);
    }

    #[test]
    fn test_compiler_from_str_never_fails() {
        assert_eq!("GNU".parse::<CompilerId>().unwrap(), CompilerId::Gnu);
        assert_eq!("nvhpc".parse::<CompilerId>().unwrap(), CompilerId::NvHpc);
        assert_eq!("watcom".parse::<CompilerId>().unwrap(), CompilerId::Unknown);
    }

    #[test]
    fn test_const_qualifier_tokens() {
        assert_eq!(ConstQualifier::Const.as_str(), "const");
        assert_eq!(ConstQualifier::Omitted.as_str(), "");
    }
}
