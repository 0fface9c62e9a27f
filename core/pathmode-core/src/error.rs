//! Error types for pathmode-core operations.
//!
//! Nothing here escapes the public mode/conversion API: detectors surface
//! these to the registry, which logs them and moves on. Configuration loading
//! is the one place callers can observe an error (`PathModeConfig::try_load_from`).

use std::path::PathBuf;

/// All errors that can occur inside pathmode-core.
#[derive(Debug, thiserror::Error)]
pub enum PathModeError {
    // ─────────────────────────────────────────────────────────────────────
    // Mode Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Invalid path mode '{0}' (expected docker, local or auto)")]
    InvalidMode(String),

    // ─────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Configuration file malformed: {path}: {details}")]
    ConfigMalformed { path: PathBuf, details: String },

    // ─────────────────────────────────────────────────────────────────────
    // Probe Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Detection strategy '{strategy}' failed: {details}")]
    Probe {
        strategy: &'static str,
        details: String,
    },
}

/// Convenience type alias for Results using PathModeError.
pub type Result<T> = std::result::Result<T, PathModeError>;

impl PathModeError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        PathModeError::Io {
            context: context.into(),
            source,
        }
    }
}
