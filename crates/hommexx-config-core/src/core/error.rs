//! Error types for build-time configuration resolution.
//!
//! Every error here is raised while the build is being configured. None of
//! them is recoverable: the build script reports the message and stops.

use crate::core::types::Backend;
use thiserror::Error;

/// Errors that can occur while resolving the target configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Two or more backend indicators were set and no explicit backend was given.
    ///
    /// The resolver never picks a winner here: the vector width and warp
    /// bounds differ between accelerator and host backends.
    #[error(
        "Conflicting backend indicators: {} (set HOMMEXX_EXEC_SPACE to choose one)",
        list_backends(.indicators)
    )]
    ConflictingBackends {
        /// Indicator backends that were set, in indicator order
        indicators: Vec<Backend>,
    },

    /// A numeric parameter is out of its valid range.
    #[error("Invalid value `{value}` for {parameter}: {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: String,
        /// Value that was rejected
        value: String,
        /// Description of the constraint that was violated
        reason: String,
    },

    /// A raw flag could not be parsed into the expected kind of value.
    #[error("Malformed flag {flag}=`{value}`: expected {expected}")]
    MalformedFlag {
        /// Flag name
        flag: String,
        /// Raw value
        value: String,
        /// What the flag should contain
        expected: &'static str,
    },

    /// An explicit backend name did not match any known backend.
    #[error("Unknown execution backend `{name}`")]
    UnknownBackend {
        /// Name as supplied
        name: String,
    },

    /// The generated configuration file could not be read or parsed.
    #[error("Failed to load configuration file {path}: {reason}")]
    ConfigFile {
        /// Path of the configuration file
        path: String,
        /// Underlying I/O or parse error
        reason: String,
    },
}

fn list_backends(backends: &[Backend]) -> String {
    backends
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ConfigError {
    /// Create a ConflictingBackends error from the set indicators.
    pub fn conflicting_backends<I>(indicators: I) -> Self
    where
        I: IntoIterator<Item = Backend>,
    {
        Self::ConflictingBackends {
            indicators: indicators.into_iter().collect(),
        }
    }

    /// Create an InvalidParameter error.
    pub fn invalid_parameter<S1, V, S2>(parameter: S1, value: V, reason: S2) -> Self
    where
        S1: Into<String>,
        V: std::fmt::Display,
        S2: Into<String>,
    {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a MalformedFlag error.
    pub fn malformed_flag<S1, S2>(flag: S1, value: S2, expected: &'static str) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self::MalformedFlag {
            flag: flag.into(),
            value: value.into(),
            expected,
        }
    }

    /// Create an UnknownBackend error.
    pub fn unknown_backend<S: Into<String>>(name: S) -> Self {
        Self::UnknownBackend { name: name.into() }
    }

    /// Create a ConfigFile error.
    pub fn config_file<P, E>(path: P, reason: E) -> Self
    where
        P: std::fmt::Display,
        E: std::fmt::Display,
    {
        Self::ConfigFile {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for configuration resolution.
pub type Result<T> = std::result::Result<T, ConfigError>;
