//! Configuration for mode detection and path conversion.
//!
//! Every constant the detector and converter rely on lives here so tests
//! and deployments can swap them without touching the algorithms:
//! - `ConversionConfig`: canonical container root, known project names
//! - `DetectionConfig`: environment variable names and well-known probe paths
//!
//! Missing config files fall back to defaults. Malformed ones are reported by
//! `try_load_from` and logged-then-ignored by `load_from`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PathModeError, Result};

/// Environment variable pointing at an optional JSON config file.
pub const CONFIG_PATH_ENV: &str = "MCP_PATH_MODE_CONFIG";

/// Environment variable selecting the mode explicitly.
pub const MODE_OVERRIDE_ENV: &str = "MCP_FILE_PATH_MODE";

/// Environment variable enabling verbose detection/conversion logging.
pub const DEBUG_ENV: &str = "MCP_DEBUG_PATH_DETECTION";

// ═══════════════════════════════════════════════════════════════════════════════
// Conversion
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Root every docker-mode path is expressed under.
    pub canonical_root: String,
    /// Prefixes marking a path as already converted.
    pub canonical_prefixes: Vec<String>,
    /// Folder names that identify the managed project itself.
    pub project_names: Vec<String>,
    /// Tokens reported in `PlatformInfo::project_indicators`.
    pub project_indicators: Vec<String>,
    /// Parent segments that never count as meaningful when deciding whether
    /// to keep a project-name segment.
    pub system_dirs: Vec<String>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            canonical_root: "/app/project".to_string(),
            canonical_prefixes: vec!["/app/project/".to_string(), "/workspace/".to_string()],
            project_names: vec!["zen-mcp-server".to_string(), "mcp-server".to_string()],
            project_indicators: vec![
                "zen-mcp-server".to_string(),
                "mcp-server".to_string(),
                "project".to_string(),
            ],
            system_dirs: ["opt", "usr", "var", "etc", "bin", "sbin", "lib"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Detection
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub override_env: String,
    pub debug_env: String,

    /// Marker file created by the Docker runtime.
    pub docker_marker_file: String,
    /// Control-group file of process 1.
    pub cgroup_file: String,
    /// Substrings in the cgroup file that indicate a container.
    pub cgroup_markers: Vec<String>,
    /// Variables whose mere presence indicates a container.
    pub docker_env_vars: Vec<String>,
    /// Variable holding the hostname; a 12-char hex value looks like a container ID.
    pub hostname_env: String,
    /// Kernel version file inspected for WSL markers.
    pub kernel_version_file: String,
    pub wsl_markers: Vec<String>,

    /// Working directories under this root are treated as in-container.
    pub container_cwd_root: String,
    /// Executables installed under these prefixes are treated as in-container.
    pub executable_prefixes: Vec<String>,
    /// Directories a minimal container image still has.
    pub minimal_fs_present: Vec<String>,
    /// Directories a minimal container image lacks.
    pub minimal_fs_absent: Vec<String>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            override_env: MODE_OVERRIDE_ENV.to_string(),
            debug_env: DEBUG_ENV.to_string(),
            docker_marker_file: "/.dockerenv".to_string(),
            cgroup_file: "/proc/1/cgroup".to_string(),
            cgroup_markers: vec!["docker".to_string(), "containerd".to_string()],
            docker_env_vars: vec![
                "DOCKER_CONTAINER".to_string(),
                "IN_DOCKER".to_string(),
                "container".to_string(),
            ],
            hostname_env: "HOSTNAME".to_string(),
            kernel_version_file: "/proc/version".to_string(),
            wsl_markers: vec!["microsoft".to_string(), "wsl".to_string()],
            container_cwd_root: "/app".to_string(),
            executable_prefixes: vec!["/usr/local/bin/".to_string(), "/opt/venv/".to_string()],
            minimal_fs_present: vec!["/bin".to_string(), "/usr".to_string(), "/etc".to_string()],
            minimal_fs_absent: vec!["/home".to_string(), "/var/log".to_string()],
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Combined
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathModeConfig {
    pub conversion: ConversionConfig,
    pub detection: DetectionConfig,
}

impl PathModeConfig {
    /// Loads from `$MCP_PATH_MODE_CONFIG` when set, defaults otherwise.
    pub fn load() -> Self {
        let path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        Self::load_from(path.as_deref())
    }

    /// Lenient load: any problem is logged and defaults are returned.
    pub fn load_from(path: Option<&Path>) -> Self {
        match Self::try_load_from(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "Ignoring path-mode config; using defaults");
                Self::default()
            }
        }
    }

    /// Strict load. A missing file is not an error; unreadable or malformed files are.
    pub fn try_load_from(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    path = %path.display(),
                    "Path-mode config not found; using defaults"
                );
                return Ok(Self::default());
            }
            Err(err) => return Err(PathModeError::io("reading path-mode config", err)),
        };

        serde_json::from_str(&content).map_err(|e| PathModeError::ConfigMalformed {
            path: path.to_path_buf(),
            details: e.to_string(),
        })
    }
}
