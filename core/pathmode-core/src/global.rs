//! Process-wide convenience accessors.
//!
//! Prefer constructing a `PathModeDetector` and passing it to consumers. These
//! wrappers exist for call sites that have nowhere to thread one through; they
//! share a single lazily-built detector for the process.

use once_cell::sync::Lazy;

use crate::detector::PathModeDetector;
use crate::types::PlatformInfo;

static DETECTOR: Lazy<PathModeDetector> = Lazy::new(PathModeDetector::new);

/// The shared detector, created on first access.
pub fn path_detector() -> &'static PathModeDetector {
    &DETECTOR
}

/// Converts `path` under the currently resolved mode.
pub fn convert_path_for_current_mode(path: &str) -> String {
    path_detector().convert_path(path, None)
}

pub fn is_running_in_docker() -> bool {
    path_detector().is_docker_mode()
}

pub fn platform_info() -> PlatformInfo {
    path_detector().platform_info()
}
