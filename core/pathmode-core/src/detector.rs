//! Resolves the path mode, caches it, and converts paths accordingly.
//!
//! Construct one `PathModeDetector` at startup and hand it (or an `Arc` of it)
//! to whatever needs path conversion. The mode and platform snapshot are
//! computed on first use and never expire; `reset()` clears both for tests.

use std::sync::{Arc, RwLock};

use crate::config::PathModeConfig;
use crate::convert::PathConverter;
use crate::detectors::{default_detectors, ModeDetector};
use crate::host::HostContext;
use crate::platform::detect_platform;
use crate::types::{DetectionResult, Mode, PlatformInfo};

pub struct PathModeDetector {
    config: PathModeConfig,
    host: HostContext,
    detectors: Vec<Arc<dyn ModeDetector>>,
    converter: PathConverter,
    debug: bool,
    mode_cache: RwLock<Option<Mode>>,
    platform_cache: RwLock<Option<PlatformInfo>>,
}

impl PathModeDetector {
    /// Detector for the running process: config from `$MCP_PATH_MODE_CONFIG`,
    /// signals from the real environment and filesystem.
    pub fn new() -> Self {
        Self::with_config(PathModeConfig::load(), HostContext::current())
    }

    pub fn with_config(config: PathModeConfig, host: HostContext) -> Self {
        let detectors = default_detectors(&config.detection);
        Self::with_detectors(config, host, detectors)
    }

    /// Uses `detectors` (highest priority first) instead of the built-in chain.
    pub fn with_detectors(
        config: PathModeConfig,
        host: HostContext,
        detectors: Vec<Arc<dyn ModeDetector>>,
    ) -> Self {
        let debug = host.flag_enabled(&config.detection.debug_env);
        let converter = PathConverter::new(config.conversion.clone()).with_debug(debug);

        Self {
            config,
            host,
            detectors,
            converter,
            debug,
            mode_cache: RwLock::new(None),
            platform_cache: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &PathModeConfig {
        &self.config
    }

    pub fn host(&self) -> &HostContext {
        &self.host
    }

    pub fn converter(&self) -> &PathConverter {
        &self.converter
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Mode
    // ─────────────────────────────────────────────────────────────────────────────

    /// Resolved mode. Strategies run once; later calls hit the cache.
    pub fn get_mode(&self) -> Mode {
        // Recover from poisoning - the cached value is a plain Copy enum
        if let Some(mode) = *self
            .mode_cache
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
        {
            return mode;
        }

        let mut cache = self
            .mode_cache
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Another thread may have resolved it while we waited for the write lock
        if let Some(mode) = *cache {
            return mode;
        }

        let mode = self.resolve_mode();
        *cache = Some(mode);
        mode
    }

    pub fn is_docker_mode(&self) -> bool {
        self.get_mode().is_docker()
    }

    /// Runs every strategy without touching the cache.
    pub fn diagnose(&self) -> Vec<DetectionResult> {
        self.detectors
            .iter()
            .map(|detector| match detector.attempt(&self.host) {
                Ok(verdict) => DetectionResult {
                    strategy: detector.id(),
                    verdict,
                    error: None,
                },
                Err(err) => DetectionResult {
                    strategy: detector.id(),
                    verdict: None,
                    error: Some(err.to_string()),
                },
            })
            .collect()
    }

    fn resolve_mode(&self) -> Mode {
        for detector in &self.detectors {
            match detector.attempt(&self.host) {
                Ok(Some(mode)) => {
                    tracing::info!(strategy = detector.id(), mode = %mode, "Path mode resolved");
                    return mode;
                }
                Ok(None) => {
                    if self.debug {
                        tracing::debug!(strategy = detector.id(), "Detection strategy abstained");
                    }
                }
                Err(err) => {
                    tracing::warn!(
                        strategy = detector.id(),
                        error = %err,
                        "Detection strategy failed; trying next"
                    );
                }
            }
        }

        let mode = Mode::default();
        tracing::info!(mode = %mode, "All detection strategies exhausted; using default");
        mode
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Platform
    // ─────────────────────────────────────────────────────────────────────────────

    /// Copy of the cached platform snapshot.
    pub fn platform_info(&self) -> PlatformInfo {
        if let Some(info) = self
            .platform_cache
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
        {
            return info.clone();
        }

        let mut cache = self
            .platform_cache
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        cache
            .get_or_insert_with(|| {
                let info = detect_platform(
                    &self.host,
                    &self.config.detection,
                    &self.config.conversion,
                );
                if self.debug {
                    tracing::debug!(
                        os = %info.os,
                        is_wsl = info.is_wsl,
                        "Platform detected"
                    );
                }
                info
            })
            .clone()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    /// Converts `path` for `target_mode`, or for the resolved mode when `None`.
    pub fn convert_path(&self, path: &str, target_mode: Option<Mode>) -> String {
        if path.is_empty() {
            return String::new();
        }
        let mode = target_mode.unwrap_or_else(|| self.get_mode());
        self.converter.convert(path, mode)
    }

    pub fn convert_many<I, S>(&self, paths: I, target_mode: Option<Mode>) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        paths
            .into_iter()
            .map(|path| self.convert_path(path.as_ref(), target_mode))
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Reset
    // ─────────────────────────────────────────────────────────────────────────────

    /// Clears the cached mode and platform snapshot; the next access recomputes both.
    pub fn reset(&self) {
        // Recover from poisoning - reset overwrites the value anyway
        *self
            .mode_cache
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        *self
            .platform_cache
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }
}

impl Default for PathModeDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::test_utils::{CountingDetector, FailingDetector};
    use crate::types::OsFamily;
    use std::fs;
    use tempfile::tempdir;

    fn chain(detectors: Vec<Arc<dyn ModeDetector>>) -> PathModeDetector {
        PathModeDetector::with_detectors(
            PathModeConfig::default(),
            HostContext::with_root("/nonexistent"),
            detectors,
        )
    }

    #[test]
    fn first_opinion_wins() {
        let first = Arc::new(CountingDetector::new("first", None));
        let second = Arc::new(CountingDetector::new("second", Some(Mode::Docker)));
        let third = Arc::new(CountingDetector::new("third", Some(Mode::Local)));
        let detector = chain(vec![first.clone(), second.clone(), third.clone()]);

        assert_eq!(detector.get_mode(), Mode::Docker);
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
        assert_eq!(third.calls(), 0);
    }

    #[test]
    fn mode_is_resolved_once() {
        let explicit = Arc::new(CountingDetector::new("explicit", None));
        let winner = Arc::new(CountingDetector::new("winner", Some(Mode::Docker)));
        let detector = chain(vec![explicit.clone(), winner.clone()]);

        for _ in 0..100 {
            assert_eq!(detector.get_mode(), Mode::Docker);
        }
        assert_eq!(explicit.calls(), 1);
        assert_eq!(winner.calls(), 1);
    }

    #[test]
    fn all_abstaining_defaults_to_local() {
        let detector = chain(vec![
            Arc::new(CountingDetector::new("a", None)),
            Arc::new(CountingDetector::new("b", None)),
        ]);
        assert_eq!(detector.get_mode(), Mode::Local);
        assert!(!detector.is_docker_mode());
    }

    #[test]
    fn empty_chain_defaults_to_local() {
        assert_eq!(chain(vec![]).get_mode(), Mode::Local);
    }

    #[test]
    fn failing_strategy_is_skipped() {
        let failing = Arc::new(FailingDetector::new("broken"));
        let next = Arc::new(CountingDetector::new("next", Some(Mode::Docker)));
        let detector = chain(vec![failing.clone(), next.clone()]);

        assert_eq!(detector.get_mode(), Mode::Docker);
        assert_eq!(failing.calls(), 1);
        assert_eq!(next.calls(), 1);
    }

    #[test]
    fn reset_forces_reevaluation() {
        let winner = Arc::new(CountingDetector::new("winner", Some(Mode::Docker)));
        let detector = chain(vec![winner.clone()]);

        detector.get_mode();
        detector.reset();
        detector.get_mode();
        assert_eq!(winner.calls(), 2);
    }

    #[test]
    fn diagnose_reports_every_strategy_and_keeps_cache_cold() {
        let failing = Arc::new(FailingDetector::new("broken"));
        let abstain = Arc::new(CountingDetector::new("quiet", None));
        let winner = Arc::new(CountingDetector::new("winner", Some(Mode::Local)));
        let detector = chain(vec![failing, abstain, winner.clone()]);

        let results = detector.diagnose();
        assert_eq!(results.len(), 3);
        assert!(results[0].error.is_some());
        assert!(results[1].abstained());
        assert_eq!(results[2].verdict, Some(Mode::Local));

        detector.get_mode();
        assert_eq!(winner.calls(), 2);
    }

    #[test]
    fn explicit_target_overrides_resolved_mode() {
        let detector = chain(vec![Arc::new(CountingDetector::new("w", Some(Mode::Local)))]);
        assert_eq!(
            detector.convert_path("src/main.py", Some(Mode::Docker)),
            "/app/project/src/main.py"
        );
        assert_eq!(detector.convert_path("src/main.py", None), "src/main.py");
    }

    #[test]
    fn empty_path_skips_mode_resolution() {
        let winner = Arc::new(CountingDetector::new("winner", Some(Mode::Docker)));
        let detector = chain(vec![winner.clone()]);

        assert_eq!(detector.convert_path("", None), "");
        assert_eq!(winner.calls(), 0);
    }

    #[test]
    fn convert_many_uses_one_mode() {
        let detector = chain(vec![Arc::new(CountingDetector::new("w", Some(Mode::Docker)))]);
        let converted = detector.convert_many(["a.py", "", "/app/project/b.py"], None);
        assert_eq!(
            converted,
            vec!["/app/project/a.py", "", "/app/project/b.py"]
        );
    }

    #[test]
    fn platform_info_is_cached_until_reset() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("proc")).unwrap();
        fs::write(temp.path().join("proc/version"), "Linux version 6.8 generic").unwrap();

        let host = HostContext::with_root(temp.path()).with_os(OsFamily::Linux);
        let detector = PathModeDetector::with_config(PathModeConfig::default(), host);
        assert!(!detector.platform_info().is_wsl);

        fs::write(temp.path().join("proc/version"), "Linux 5.15-microsoft-standard-WSL2").unwrap();
        assert!(!detector.platform_info().is_wsl);

        detector.reset();
        assert!(detector.platform_info().is_wsl);
    }

    #[test]
    fn debug_flag_comes_from_host() {
        let host =
            HostContext::with_root("/nonexistent").with_var("MCP_DEBUG_PATH_DETECTION", "TRUE");
        let detector = PathModeDetector::with_config(PathModeConfig::default(), host);
        assert!(detector.debug_enabled());

        let quiet = PathModeDetector::with_config(
            PathModeConfig::default(),
            HostContext::with_root("/nonexistent"),
        );
        assert!(!quiet.debug_enabled());
    }

    #[test]
    fn concurrent_first_access_resolves_once() {
        let winner = Arc::new(CountingDetector::new("winner", Some(Mode::Docker)));
        let detector = Arc::new(chain(vec![winner.clone()]));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let detector = Arc::clone(&detector);
                std::thread::spawn(move || detector.get_mode())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Mode::Docker);
        }
        assert_eq!(winner.calls(), 1);
    }
}
