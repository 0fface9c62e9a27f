//! Fallback heuristics over the runtime layout.
//!
//! Always returns an opinion: docker when the process looks like it runs from
//! a container image, local otherwise.

use std::path::Path;

use super::ModeDetector;
use crate::config::DetectionConfig;
use crate::error::Result;
use crate::host::HostContext;
use crate::types::Mode;

pub struct RuntimeHeuristicDetector {
    config: DetectionConfig,
}

impl RuntimeHeuristicDetector {
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    /// Working directory under the container root (component-wise: `/application` is not `/app`).
    fn cwd_in_container_root(&self, host: &HostContext) -> bool {
        host.cwd()
            .is_some_and(|cwd| cwd.starts_with(Path::new(&self.config.container_cwd_root)))
    }

    fn executable_in_system_prefix(&self, host: &HostContext) -> bool {
        let Some(executable) = host.executable() else {
            return false;
        };
        let executable = executable.to_string_lossy();
        self.config
            .executable_prefixes
            .iter()
            .any(|prefix| executable.starts_with(prefix.as_str()))
    }

    /// System directories present, user/log directories missing.
    fn filesystem_is_minimal(&self, host: &HostContext) -> bool {
        !self.config.minimal_fs_present.is_empty()
            && self.config.minimal_fs_present.iter().all(|dir| host.is_dir(dir))
            && self.config.minimal_fs_absent.iter().all(|dir| !host.exists(dir))
    }
}

impl Default for RuntimeHeuristicDetector {
    fn default() -> Self {
        Self::new(DetectionConfig::default())
    }
}

impl ModeDetector for RuntimeHeuristicDetector {
    fn id(&self) -> &'static str {
        "runtime_heuristics"
    }

    fn attempt(&self, host: &HostContext) -> Result<Option<Mode>> {
        let reason = if self.cwd_in_container_root(host) {
            Some("working_directory")
        } else if self.executable_in_system_prefix(host) {
            Some("executable_prefix")
        } else if self.filesystem_is_minimal(host) {
            Some("minimal_filesystem")
        } else {
            None
        };

        Ok(Some(match reason {
            Some(reason) => {
                if host.flag_enabled(&self.config.debug_env) {
                    tracing::debug!(reason, "Runtime layout looks containerized");
                }
                Mode::Docker
            }
            None => Mode::Local,
        }))
    }
}
