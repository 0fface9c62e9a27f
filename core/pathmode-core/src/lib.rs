//! # pathmode-core
//!
//! Decides whether file paths handed to a tool should stay as-is (`local`) or
//! be rewritten for a container (`docker`), and performs that rewrite for
//! Windows, POSIX and WSL host paths.
//!
//! ## Design Principles
//!
//! - **Synchronous**: No async runtime dependency.
//! - **Resolve once**: The mode and platform snapshot are cached for the
//!   detector's lifetime; `reset()` exists for tests.
//! - **Graceful degradation**: Unreadable probes, malformed overrides and
//!   failing strategies are logged and skipped. Conversion never fails.
//! - **Injectable**: `HostContext` and `PathModeConfig` carry every signal and
//!   constant, so detectors run against fake roots in tests.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pathmode_core::{Mode, PathModeDetector};
//!
//! let detector = PathModeDetector::new();
//! let mode = detector.get_mode();
//! let path = detector.convert_path(r"C:\Users\dev\zen-mcp-server\main.py", Some(Mode::Docker));
//! assert_eq!(path, "/app/project/zen-mcp-server/main.py");
//! ```

pub mod classify;
pub mod config;
pub mod convert;
pub mod detector;
pub mod detectors;
pub mod error;
pub mod global;
pub mod host;
pub mod patterns;
pub mod platform;
pub mod types;

#[cfg(test)]
mod test_logging;

pub use classify::{classify, is_unix_path, is_windows_path, is_wsl_path, PathFormat};
pub use config::{ConversionConfig, DetectionConfig, PathModeConfig};
pub use convert::PathConverter;
pub use detector::PathModeDetector;
pub use detectors::ModeDetector;
pub use error::{PathModeError, Result};
pub use global::{
    convert_path_for_current_mode, is_running_in_docker, path_detector, platform_info,
};
pub use host::HostContext;
pub use platform::detect_platform;
pub use types::{DetectionResult, Mode, OsFamily, PlatformInfo};
