//! Snapshot of the host signals the detectors consult.
//!
//! Detectors never read `std::env` or absolute paths directly; they go through
//! a `HostContext`. Production code uses `HostContext::current()`, which
//! captures the real process environment and probes the real filesystem.
//! Tests use `HostContext::with_root(temp_dir)` plus the `with_*` builders so
//! nothing depends on (or mutates) the machine running the tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{PathModeError, Result};
use crate::types::OsFamily;

#[derive(Debug, Clone)]
pub struct HostContext {
    /// Well-known probe paths are resolved beneath this directory (default: `/`).
    root: PathBuf,
    vars: HashMap<String, String>,
    cwd: Option<PathBuf>,
    executable: Option<PathBuf>,
    os: OsFamily,
}

impl HostContext {
    /// Captures the running process: environment, cwd, executable and OS family.
    pub fn current() -> Self {
        // vars() panics on non-UTF-8 entries; skip those instead.
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();

        Self {
            root: PathBuf::from("/"),
            vars,
            cwd: std::env::current_dir().ok(),
            executable: std::env::current_exe().ok(),
            os: OsFamily::current(),
        }
    }

    /// Creates an empty context whose probe paths resolve under `root`.
    /// Used for testing with temp directories.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            vars: HashMap::new(),
            cwd: None,
            executable: None,
            os: OsFamily::current(),
        }
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn without_var(mut self, name: &str) -> Self {
        self.vars.remove(name);
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = Some(executable.into());
        self
    }

    pub fn with_os(mut self, os: OsFamily) -> Self {
        self.os = os;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn has_var(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    pub fn executable(&self) -> Option<&Path> {
        self.executable.as_deref()
    }

    pub fn os(&self) -> OsFamily {
        self.os
    }

    /// True when `name` is set to `true` (case-insensitive).
    pub fn flag_enabled(&self, name: &str) -> bool {
        self.var(name)
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Filesystem probes
    // ─────────────────────────────────────────────────────────────────────────────

    /// Maps an absolute well-known path (e.g. `/proc/1/cgroup`) under the root.
    pub fn resolve(&self, well_known: &str) -> PathBuf {
        self.root.join(well_known.trim_start_matches('/'))
    }

    pub fn exists(&self, well_known: &str) -> bool {
        self.resolve(well_known).exists()
    }

    pub fn is_dir(&self, well_known: &str) -> bool {
        self.resolve(well_known).is_dir()
    }

    pub fn read_to_string(&self, well_known: &str) -> Result<String> {
        fs_err::read_to_string(self.resolve(well_known))
            .map_err(|e| PathModeError::io(format!("reading {}", well_known), e))
    }
}

impl Default for HostContext {
    fn default() -> Self {
        Self::current()
    }
}
