//! Error types for the runner binary.
//!
//! [`RunnerError`] wraps every failure mode of startup and episode
//! execution so that `main` can propagate with `?`.

/// Top-level error for the runner binary.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The YAML run configuration could not be read.
    #[error("failed to read run config: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The YAML run configuration is malformed.
    #[error("failed to parse run config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        #[from]
        source: serde_yml::Error,
    },

    /// A run configuration value is out of range.
    #[error("invalid run config: {reason}")]
    InvalidRunConfig {
        /// What was wrong.
        reason: String,
    },

    /// The rules file could not be created or loaded.
    #[error("rules config error: {source}")]
    Rules {
        /// The underlying configuration error.
        #[from]
        source: smartlife_core::ConfigError,
    },

    /// The engine rejected an operation.
    #[error("engine error: {source}")]
    Engine {
        /// The underlying engine error.
        #[from]
        source: smartlife_core::EngineError,
    },
}
