//! Integration tests for parameter resolution and the full pipeline.

use hommexx_config_core::resolve::compiler_workaround;
use hommexx_config_core::{
    resolve_build, Backend, BuildFlags, CompilerId, ConfigError, ConstQualifier,
    ParameterResolver, ResolvedConfiguration, TargetProfile,
};
use proptest::prelude::*;

fn resolve(backend: Backend) -> ResolvedConfiguration {
    ParameterResolver::resolve(TargetProfile { backend }, None, None, CompilerId::Clang).unwrap()
}

#[test]
fn test_accelerator_defaults() {
    for backend in [Backend::Cuda, Backend::Hip, Backend::Sycl] {
        let resolved = resolve(backend);
        assert_eq!(resolved.vector_size, 1, "{backend}");
        assert_eq!(resolved.warp_bounds(), (8, 16), "{backend}");
    }
}

#[test]
fn test_host_defaults() {
    for backend in [
        Backend::OpenMp,
        Backend::Threads,
        Backend::Serial,
        Backend::Default,
    ] {
        let resolved = resolve(backend);
        assert_eq!(resolved.vector_size, 8, "{backend}");
        assert_eq!(resolved.warp_bounds(), (1, 1), "{backend}");
    }
}

#[test]
fn test_openmp_vector_override() {
    let resolved = ParameterResolver::resolve(
        TargetProfile {
            backend: Backend::OpenMp,
        },
        Some(4),
        None,
        CompilerId::Intel,
    )
    .unwrap();
    assert_eq!(resolved.vector_size, 4);
}

#[test]
fn test_inverted_warp_override_fails() {
    let err = ParameterResolver::resolve(
        TargetProfile {
            backend: Backend::Cuda,
        },
        None,
        Some((2, 1)),
        CompilerId::Nvcc,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidParameter { .. }));
}

#[test]
fn test_pipeline_from_environment_flags() {
    let vars = [
        ("HOMMEXX_HIP_SPACE", "1"),
        ("HOMMEXX_VECTOR_SIZE", "2"),
        ("HOMMEXX_CUDA_MIN_WARP_PER_TEAM", "4"),
        ("HOMMEXX_COMPILER", "gnu"),
        ("HOMMEXX_MPI_ON_DEVICE", "off"),
    ];
    let flags = BuildFlags::from_lookup(|name| {
        vars.iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| (*value).to_string())
    })
    .unwrap();

    let config = resolve_build(&flags).unwrap();
    assert_eq!(config.backend(), Backend::Hip);
    assert_eq!(config.resolved.vector_size, 2);
    assert_eq!(config.resolved.warp_bounds(), (4, 16));
    assert_eq!(config.resolved.compiler_workaround, ConstQualifier::Omitted);
    assert!(!config.mpi_on_device);
}

fn any_compiler() -> impl Strategy<Value = CompilerId> {
    prop_oneof![
        Just(CompilerId::Gnu),
        Just(CompilerId::Clang),
        Just(CompilerId::AppleClang),
        Just(CompilerId::Intel),
        Just(CompilerId::IntelLlvm),
        Just(CompilerId::Nvcc),
        Just(CompilerId::NvHpc),
        Just(CompilerId::Msvc),
        Just(CompilerId::Cray),
        Just(CompilerId::IbmXl),
        Just(CompilerId::Unknown),
    ]
}

fn any_backend() -> impl Strategy<Value = Backend> {
    proptest::sample::select(vec![
        Backend::Cuda,
        Backend::OpenMp,
        Backend::Threads,
        Backend::Serial,
        Backend::Hip,
        Backend::Sycl,
        Backend::Default,
    ])
}

proptest! {
    #[test]
    fn positive_vector_override_is_verbatim(
        backend in any_backend(),
        size in 1i64..=4096,
    ) {
        let resolved = ParameterResolver::resolve(
            TargetProfile { backend }, Some(size), None, CompilerId::Clang,
        ).unwrap();
        prop_assert_eq!(resolved.vector_size as i64, size);
    }

    #[test]
    fn non_positive_vector_override_fails(
        backend in any_backend(),
        size in i64::MIN..=0,
    ) {
        let result = ParameterResolver::resolve(
            TargetProfile { backend }, Some(size), None, CompilerId::Clang,
        );
        let is_invalid = matches!(result, Err(ConfigError::InvalidParameter { .. }));
        prop_assert!(is_invalid);
    }

    #[test]
    fn warp_override_validity(
        backend in any_backend(),
        min in -4i64..64,
        max in -4i64..64,
    ) {
        let result = ParameterResolver::resolve(
            TargetProfile { backend }, None, Some((min, max)), CompilerId::Clang,
        );
        if 0 < min && min <= max {
            prop_assert_eq!(result.unwrap().warp_bounds(), (min as u32, max as u32));
        } else {
            let is_invalid = matches!(result, Err(ConfigError::InvalidParameter { .. }));
            prop_assert!(is_invalid);
        }
    }

    #[test]
    fn workaround_is_two_valued(compiler in any_compiler()) {
        let token = compiler_workaround(compiler);
        if compiler == CompilerId::Gnu {
            prop_assert_eq!(token.as_str(), "");
        } else {
            prop_assert_eq!(token.as_str(), "const");
        }
    }

    #[test]
    fn pipeline_is_idempotent(
        backend in proptest::option::of(any_backend()),
        size in proptest::option::of(-2i64..32),
        min in proptest::option::of(-2i64..32),
        max in proptest::option::of(-2i64..32),
        compiler in any_compiler(),
        mpi in proptest::option::of(any::<bool>()),
    ) {
        let mut builder = BuildFlags::builder().compiler(compiler);
        if let Some(backend) = backend {
            builder = builder.indicator(backend);
        }
        if let Some(size) = size {
            builder = builder.vector_size(size);
        }
        if let Some(min) = min {
            builder = builder.min_warps_per_team(min);
        }
        if let Some(max) = max {
            builder = builder.max_warps_per_team(max);
        }
        if let Some(mpi) = mpi {
            builder = builder.mpi_on_device(mpi);
        }
        let flags = builder.build();

        prop_assert_eq!(resolve_build(&flags), resolve_build(&flags));
    }
}
