//! Core types shared by the detector, the converter and the CLI.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::PathModeError;

// ═══════════════════════════════════════════════════════════════════════════════
// Mode
// ═══════════════════════════════════════════════════════════════════════════════

/// Execution context governing whether paths are rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Paths are rewritten under the canonical container root.
    Docker,
    /// Paths are passed through unchanged.
    #[default]
    Local,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Docker => "docker",
            Mode::Local => "local",
        }
    }

    pub fn is_docker(&self) -> bool {
        matches!(self, Mode::Docker)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Mode {
    type Err = PathModeError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "docker" => Ok(Mode::Docker),
            "local" => Ok(Mode::Local),
            _ => Err(PathModeError::InvalidMode(value.trim().to_string())),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Platform
// ═══════════════════════════════════════════════════════════════════════════════

/// Host operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Windows,
    Linux,
    Macos,
    Other,
}

impl OsFamily {
    /// Family of the target this binary was compiled for.
    pub fn current() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    pub fn from_os_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "windows" => OsFamily::Windows,
            "linux" => OsFamily::Linux,
            "macos" | "darwin" => OsFamily::Macos,
            _ => OsFamily::Other,
        }
    }

    pub fn path_separator(&self) -> char {
        match self {
            OsFamily::Windows => '\\',
            _ => '/',
        }
    }
}

impl std::fmt::Display for OsFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OsFamily::Windows => write!(f, "windows"),
            OsFamily::Linux => write!(f, "linux"),
            OsFamily::Macos => write!(f, "macos"),
            OsFamily::Other => write!(f, "other"),
        }
    }
}

/// Snapshot of the host platform, computed once per detector.
///
/// Handed out by value; the detector keeps its own copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformInfo {
    pub os: OsFamily,
    pub is_wsl: bool,
    pub path_separator: char,
    pub project_indicators: Vec<String>,
}

impl PlatformInfo {
    pub fn is_windows(&self) -> bool {
        self.os == OsFamily::Windows
    }

    pub fn is_linux(&self) -> bool {
        self.os == OsFamily::Linux
    }

    pub fn is_macos(&self) -> bool {
        self.os == OsFamily::Macos
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Detection
// ═══════════════════════════════════════════════════════════════════════════════

/// One strategy's opinion, kept for logging and `diagnose()` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectionResult {
    pub strategy: &'static str,
    /// `None` when the strategy abstained.
    pub verdict: Option<Mode>,
    /// Set when the strategy failed; a failure counts as abstaining.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DetectionResult {
    pub fn abstained(&self) -> bool {
        self.verdict.is_none()
    }
}

impl std::fmt::Display for DetectionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.verdict, &self.error) {
            (Some(mode), _) => write!(f, "{}: {}", self.strategy, mode),
            (None, Some(err)) => write!(f, "{}: failed ({})", self.strategy, err),
            (None, None) => write!(f, "{}: no opinion", self.strategy),
        }
    }
}
