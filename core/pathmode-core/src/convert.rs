//! Host path → canonical container path rewriting.
//!
//! Paths arrive from Windows hosts, POSIX hosts and WSL mounts with
//! unpredictable parent directories. The container only cares about the part
//! below the project root, so conversion is a search for a project anchor:
//!
//! ```text
//! 1. Generic container  ("Projects", "my-project")   → drop container
//!      followed by a known project name:
//!        one trailing segment  → keep the name   (root/name/file)
//!        several               → drop the name   (root/sub/.../file)
//!        none                  → root
//! 2. Known project name ("zen-mcp-server")           → keep if it has
//!      meaningful parents, drop otherwise
//! 3. Bare "project"                                   → drop it
//! 4. Nothing found                                    → root/basename
//! ```
//!
//! Conversion never fails; the worst case is the lossy basename fallback.

use crate::classify::{classify, PathFormat};
use crate::config::ConversionConfig;
use crate::patterns::RE_DRIVE_TOKEN;
use crate::types::Mode;

const GENERIC_PROJECT_TOKEN: &str = "project";

#[derive(Debug, Clone)]
pub struct PathConverter {
    config: ConversionConfig,
    debug: bool,
}

impl Default for PathConverter {
    fn default() -> Self {
        Self::new(ConversionConfig::default())
    }
}

impl PathConverter {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            config,
            debug: false,
        }
    }

    /// Enables per-conversion debug records.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Converts `path` for `mode`. Local mode is the identity.
    pub fn convert(&self, path: &str, mode: Mode) -> String {
        match mode {
            Mode::Local => path.to_string(),
            Mode::Docker => self.to_docker(path),
        }
    }

    /// Rewrites any host path under the canonical root.
    pub fn to_docker(&self, host_path: &str) -> String {
        if host_path.is_empty() {
            return String::new();
        }

        if self.is_canonical(host_path) {
            return host_path.to_string();
        }

        match classify(host_path) {
            PathFormat::Windows => self.convert_windows(host_path),
            PathFormat::Wsl => self.convert_wsl(host_path),
            PathFormat::Unix => self.convert_unix(host_path),
            PathFormat::Relative => self.convert_relative(host_path),
        }
    }

    /// True when `path` already starts with a canonical container prefix.
    pub fn is_canonical(&self, path: &str) -> bool {
        self.config
            .canonical_prefixes
            .iter()
            .any(|prefix| !prefix.is_empty() && path.starts_with(prefix.as_str()))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Format-specific segmenting
    // ─────────────────────────────────────────────────────────────────────────────

    fn convert_windows(&self, original: &str) -> String {
        let normalized = original.replace('\\', "/");
        let segments = split_segments(&normalized);
        self.find_project_root(&segments, original)
    }

    fn convert_wsl(&self, original: &str) -> String {
        // ["mnt", "<drive>", rest...]
        let segments = split_segments(original);
        if segments.len() > 2 {
            self.find_project_root(&segments[2..], original)
        } else {
            self.basename_fallback(original)
        }
    }

    fn convert_unix(&self, original: &str) -> String {
        let segments = split_segments(original);
        self.find_project_root(&segments, original)
    }

    fn convert_relative(&self, original: &str) -> String {
        let normalized = original.replace('\\', "/");

        // Drive-less rooted paths ("\tools\x.py") are absolute after all.
        if normalized.starts_with('/') {
            let segments = split_segments(&normalized);
            return self.find_project_root(&segments, original);
        }

        let relative = normalized.trim_start_matches("./");
        let converted = self.join_under_root(&split_segments(relative));
        self.trace("relative", original, &converted);
        converted
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Project-root search
    // ─────────────────────────────────────────────────────────────────────────────

    fn find_project_root(&self, segments: &[&str], original: &str) -> String {
        if let Some(converted) = self.match_generic_container(segments, original) {
            return converted;
        }
        if let Some(converted) = self.match_project_name(segments, original) {
            return converted;
        }
        if let Some(converted) = self.match_bare_project(segments, original) {
            return converted;
        }
        self.basename_fallback(original)
    }

    /// Rule 1: a folder such as `Projects` that holds several projects.
    fn match_generic_container(&self, segments: &[&str], original: &str) -> Option<String> {
        for (i, segment) in segments.iter().enumerate() {
            let lower = segment.to_lowercase();
            if !lower.contains(GENERIC_PROJECT_TOKEN) || lower == GENERIC_PROJECT_TOKEN {
                continue;
            }

            // A container with nothing below it is not an anchor; keep scanning.
            let Some(next) = segments.get(i + 1) else {
                continue;
            };

            if !self.is_project_name(next) {
                return Some(self.finish(&segments[i + 1..], original, "skipped project container"));
            }

            let after_name = &segments[i + 2..];
            let converted = match after_name.len() {
                0 => self.finish(&[], original, "project root only"),
                1 => self.finish(
                    &segments[i + 1..],
                    original,
                    "kept project name for direct file",
                ),
                _ => self.finish(after_name, original, "dropped project name for subdirectories"),
            };
            return Some(converted);
        }
        None
    }

    /// Rule 2: an exact known project name, checked in configured order.
    fn match_project_name(&self, segments: &[&str], original: &str) -> Option<String> {
        for name in &self.config.project_names {
            let Some(i) = segments
                .iter()
                .position(|segment| segment.eq_ignore_ascii_case(name))
            else {
                continue;
            };

            let has_meaningful_parent = segments[..i]
                .iter()
                .any(|parent| self.is_meaningful_parent(parent));

            return Some(if has_meaningful_parent {
                self.finish(&segments[i..], original, "kept project name with parents")
            } else {
                self.finish(&segments[i + 1..], original, "dropped root project name")
            });
        }
        None
    }

    /// Rule 3: a folder literally named `project`.
    fn match_bare_project(&self, segments: &[&str], original: &str) -> Option<String> {
        segments
            .iter()
            .position(|segment| segment.eq_ignore_ascii_case(GENERIC_PROJECT_TOKEN))
            .map(|i| self.finish(&segments[i + 1..], original, "found generic project"))
    }

    /// Rule 4: no anchor. Directory structure is discarded.
    fn basename_fallback(&self, original: &str) -> String {
        let converted = match basename(original) {
            Some(name) => self.join_under_root(&[name]),
            None => self.root().to_string(),
        };
        self.trace("basename fallback", original, &converted);
        converted
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────────────

    fn is_project_name(&self, segment: &str) -> bool {
        self.config
            .project_names
            .iter()
            .any(|name| segment.eq_ignore_ascii_case(name))
    }

    fn is_meaningful_parent(&self, segment: &str) -> bool {
        !segment.is_empty()
            && !RE_DRIVE_TOKEN.is_match(segment)
            && !self
                .config
                .system_dirs
                .iter()
                .any(|dir| segment == dir)
    }

    fn root(&self) -> &str {
        let trimmed = self.config.canonical_root.trim_end_matches('/');
        if trimmed.is_empty() {
            "/"
        } else {
            trimmed
        }
    }

    fn join_under_root(&self, segments: &[&str]) -> String {
        let root = self.root();
        if segments.is_empty() {
            return root.to_string();
        }
        let joined = segments.join("/");
        if root == "/" {
            format!("/{}", joined)
        } else {
            format!("{}/{}", root, joined)
        }
    }

    fn finish(&self, segments: &[&str], original: &str, strategy: &'static str) -> String {
        let converted = self.join_under_root(segments);
        self.trace(strategy, original, &converted);
        converted
    }

    fn trace(&self, strategy: &'static str, original: &str, converted: &str) {
        if self.debug {
            tracing::debug!(strategy, original, converted, "Converted path");
        }
    }
}

/// Splits on `/`, dropping empty segments from doubled or trailing separators.
fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Last non-empty component, splitting on both separator styles.
fn basename(path: &str) -> Option<&str> {
    path.split(['/', '\\']).filter(|s| !s.is_empty()).last()
}
