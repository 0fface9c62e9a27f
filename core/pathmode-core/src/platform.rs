//! Host platform detection.
//!
//! The OS family comes from the compile target; WSL2 is only distinguishable
//! at runtime, by vendor markers in the kernel version string.

use crate::config::{ConversionConfig, DetectionConfig};
use crate::host::HostContext;
use crate::types::{OsFamily, PlatformInfo};

pub fn detect_platform(
    host: &HostContext,
    detection: &DetectionConfig,
    conversion: &ConversionConfig,
) -> PlatformInfo {
    let os = host.os();
    let is_wsl = os == OsFamily::Linux && kernel_reports_wsl(host, detection);

    PlatformInfo {
        os,
        is_wsl,
        path_separator: os.path_separator(),
        project_indicators: conversion.project_indicators.clone(),
    }
}

fn kernel_reports_wsl(host: &HostContext, detection: &DetectionConfig) -> bool {
    match host.read_to_string(&detection.kernel_version_file) {
        Ok(version) => {
            let version = version.to_lowercase();
            detection
                .wsl_markers
                .iter()
                .any(|marker| version.contains(marker.as_str()))
        }
        Err(err) => {
            tracing::trace!(error = %err, "Kernel version unreadable; assuming not WSL");
            false
        }
    }
}
