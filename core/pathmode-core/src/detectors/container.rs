//! Docker environment indicators.
//!
//! Any one indicator is enough:
//! - `/.dockerenv` exists
//! - `/proc/1/cgroup` mentions docker/containerd
//! - `HOSTNAME` has the shape of a short container ID
//! - a Docker-specific variable is set
//!
//! No indicator means abstain, not "local": the runtime heuristics still get a say.

use super::ModeDetector;
use crate::config::DetectionConfig;
use crate::error::Result;
use crate::host::HostContext;
use crate::patterns::RE_CONTAINER_HOSTNAME;
use crate::types::Mode;

pub struct DockerIndicatorDetector {
    config: DetectionConfig,
}

impl DockerIndicatorDetector {
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    /// First indicator found, if any.
    pub fn find_indicator(&self, host: &HostContext) -> Option<&'static str> {
        if self.has_marker_file(host) {
            return Some("marker_file");
        }
        if self.cgroup_mentions_container(host) {
            return Some("cgroup");
        }
        if self.hostname_looks_like_container_id(host) {
            return Some("hostname");
        }
        if self.has_docker_env_var(host) {
            return Some("env_var");
        }
        None
    }

    fn has_marker_file(&self, host: &HostContext) -> bool {
        host.exists(&self.config.docker_marker_file)
    }

    fn cgroup_mentions_container(&self, host: &HostContext) -> bool {
        match host.read_to_string(&self.config.cgroup_file) {
            Ok(contents) => self
                .config
                .cgroup_markers
                .iter()
                .any(|marker| contents.contains(marker.as_str())),
            Err(err) => {
                tracing::trace!(error = %err, "cgroup probe unavailable");
                false
            }
        }
    }

    fn hostname_looks_like_container_id(&self, host: &HostContext) -> bool {
        host.var(&self.config.hostname_env)
            .is_some_and(|hostname| RE_CONTAINER_HOSTNAME.is_match(hostname))
    }

    fn has_docker_env_var(&self, host: &HostContext) -> bool {
        self.config
            .docker_env_vars
            .iter()
            .any(|name| host.has_var(name))
    }
}

impl Default for DockerIndicatorDetector {
    fn default() -> Self {
        Self::new(DetectionConfig::default())
    }
}

impl ModeDetector for DockerIndicatorDetector {
    fn id(&self) -> &'static str {
        "docker_indicators"
    }

    fn attempt(&self, host: &HostContext) -> Result<Option<Mode>> {
        Ok(self.find_indicator(host).map(|indicator| {
            if host.flag_enabled(&self.config.debug_env) {
                tracing::debug!(indicator, "Docker indicator found");
            }
            Mode::Docker
        }))
    }
}
