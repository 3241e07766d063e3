//! Property tests for backend selection.
//!
//! Checks the selection rules over every subset of indicators, with and
//! without an explicit backend.

use hommexx_config_core::{Backend, BackendIndicators, BackendSelector, ConfigError};
use proptest::prelude::*;

fn indicator_subset(
    sizes: std::ops::RangeInclusive<usize>,
) -> impl Strategy<Value = Vec<Backend>> {
    proptest::sample::subsequence(Backend::INDICATORS.to_vec(), sizes)
}

fn any_indicator_subset() -> impl Strategy<Value = Vec<Backend>> {
    indicator_subset(0..=Backend::INDICATORS.len())
}

fn any_backend() -> impl Strategy<Value = Backend> {
    prop_oneof![
        Just(Backend::Cuda),
        Just(Backend::OpenMp),
        Just(Backend::Threads),
        Just(Backend::Serial),
        Just(Backend::Hip),
        Just(Backend::Sycl),
        Just(Backend::Default),
    ]
}

proptest! {
    #[test]
    fn at_most_one_indicator_selects_it(subset in indicator_subset(0..=1)) {
        let indicators: BackendIndicators = subset.iter().copied().collect();

        let profile = BackendSelector::resolve(None, &indicators).unwrap();
        let expected = subset.first().copied().unwrap_or(Backend::Default);
        prop_assert_eq!(profile.backend, expected);
    }

    #[test]
    fn two_or_more_indicators_conflict(subset in indicator_subset(2..=Backend::INDICATORS.len())) {
        let indicators: BackendIndicators = subset.iter().copied().collect();

        match BackendSelector::resolve(None, &indicators) {
            Err(ConfigError::ConflictingBackends { indicators: reported }) => {
                prop_assert_eq!(reported, subset);
            }
            other => prop_assert!(false, "expected conflict, got {:?}", other),
        }
    }

    #[test]
    fn explicit_backend_always_wins(
        explicit in any_backend(),
        subset in any_indicator_subset(),
    ) {
        let indicators: BackendIndicators = subset.into_iter().collect();
        let profile = BackendSelector::resolve(Some(explicit), &indicators).unwrap();
        prop_assert_eq!(profile.backend, explicit);
    }

    #[test]
    fn selection_is_idempotent(
        explicit in proptest::option::of(any_backend()),
        subset in any_indicator_subset(),
    ) {
        let indicators: BackendIndicators = subset.into_iter().collect();
        let first = BackendSelector::resolve(explicit, &indicators);
        let second = BackendSelector::resolve(explicit, &indicators);
        prop_assert_eq!(first, second);
    }
}

#[test]
fn test_conflict_message_names_backends() {
    let indicators: BackendIndicators = [Backend::Threads, Backend::Cuda].into_iter().collect();
    let err = BackendSelector::resolve(None, &indicators).unwrap_err();
    let message = err.to_string();

    assert!(message.contains("CUDA"));
    assert!(message.contains("Threads"));
    assert!(message.contains("HOMMEXX_EXEC_SPACE"));
}
