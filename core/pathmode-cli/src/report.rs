//! Rendering of command results for stdout.

use pathmode_core::{DetectionResult, Mode, PlatformInfo};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
pub struct ModeReport {
    pub mode: Mode,
    pub debug: bool,
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub strategies: Vec<DetectionResult>,
    pub mode: Mode,
}

pub fn render_mode(report: &ModeReport, json: bool) -> Result<String, ReportError> {
    if json {
        Ok(serde_json::to_string(report)?)
    } else {
        Ok(report.mode.to_string())
    }
}

pub fn render_check(report: &CheckReport, json: bool) -> Result<String, ReportError> {
    if json {
        return Ok(serde_json::to_string_pretty(report)?);
    }

    let mut lines: Vec<String> = report
        .strategies
        .iter()
        .enumerate()
        .map(|(i, result)| format!("{}. {}", i + 1, result))
        .collect();
    lines.push(format!("mode: {}", report.mode));
    Ok(lines.join("\n"))
}

pub fn render_platform(info: &PlatformInfo) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(info)?)
}
