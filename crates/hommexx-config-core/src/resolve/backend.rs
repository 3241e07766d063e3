//! Execution backend selection.
//!
//! Turns the sparse backend inputs of a build into exactly one active
//! backend. Precedence, highest first:
//!
//! 1. an explicit backend supplied by the build invoker or generated config
//! 2. a single backend indicator
//! 3. `Default` when no indicator is set
//!
//! Two or more indicators without an explicit backend are a conflict.

use crate::core::{
    error::{ConfigError, Result},
    types::{Backend, BackendIndicators, TargetProfile},
};

/// Selects the active execution backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackendSelector;

impl BackendSelector {
    /// Resolves the target profile from an optional explicit backend and the
    /// set of backend indicators.
    ///
    /// When `explicit` is present the indicators are not inspected at all.
    pub fn resolve(
        explicit: Option<Backend>,
        indicators: &BackendIndicators,
    ) -> Result<TargetProfile> {
        if let Some(backend) = explicit {
            log::debug!(
                "Using explicit backend {} (ignoring {} indicator(s))",
                backend,
                indicators.len()
            );
            return Ok(TargetProfile { backend });
        }

        let mut set = indicators.iter();
        let backend = match (set.next(), set.next()) {
            (None, _) => Backend::Default,
            (Some(only), None) => only,
            (Some(_), Some(_)) => {
                return Err(ConfigError::conflicting_backends(indicators.iter()));
            }
        };

        log::debug!("Selected backend {backend}");
        Ok(TargetProfile { backend })
    }
}
