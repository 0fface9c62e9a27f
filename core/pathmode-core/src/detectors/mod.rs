//! Mode detection strategies.
//! Add new strategies in `default_detectors()` so the detector picks them up;
//! position in that list is priority.

mod container;
mod explicit;
mod runtime;

pub use container::DockerIndicatorDetector;
pub use explicit::ExplicitOverrideDetector;
pub use runtime::RuntimeHeuristicDetector;

use std::sync::Arc;

use crate::config::DetectionConfig;
use crate::error::Result;
use crate::host::HostContext;
use crate::types::Mode;

/// One self-contained attempt at deciding the mode from one class of signal.
///
/// Implementors should:
/// - Return `Ok(None)` to abstain; the next strategy gets a turn
/// - Treat missing/unreadable probe files as a negative signal, not an error
/// - Return `Err` only for unexpected failures; the caller logs and abstains
pub trait ModeDetector: Send + Sync {
    /// Stable identifier used in logs (e.g., "explicit_override")
    fn id(&self) -> &'static str;

    fn attempt(&self, host: &HostContext) -> Result<Option<Mode>>;
}

/// Strategies in priority order, highest first.
pub fn default_detectors(config: &DetectionConfig) -> Vec<Arc<dyn ModeDetector>> {
    vec![
        Arc::new(ExplicitOverrideDetector::new(config.clone())),
        Arc::new(DockerIndicatorDetector::new(config.clone())),
        Arc::new(RuntimeHeuristicDetector::new(config.clone())),
    ]
}

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils {
    use super::*;
    use crate::error::PathModeError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a fixed verdict and counts how often it was asked.
    pub struct CountingDetector {
        pub id: &'static str,
        pub verdict: Option<Mode>,
        calls: AtomicUsize,
    }

    impl CountingDetector {
        pub fn new(id: &'static str, verdict: Option<Mode>) -> Self {
            Self {
                id,
                verdict,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ModeDetector for CountingDetector {
        fn id(&self) -> &'static str {
            self.id
        }

        fn attempt(&self, _host: &HostContext) -> Result<Option<Mode>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.verdict)
        }
    }

    /// Always fails; the chain must carry on past it.
    pub struct FailingDetector {
        pub id: &'static str,
        calls: AtomicUsize,
    }

    impl FailingDetector {
        pub fn new(id: &'static str) -> Self {
            Self {
                id,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ModeDetector for FailingDetector {
        fn id(&self) -> &'static str {
            self.id
        }

        fn attempt(&self, _host: &HostContext) -> Result<Option<Mode>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(PathModeError::Probe {
                strategy: self.id,
                details: "simulated failure".to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_order_is_explicit_then_indicators_then_runtime() {
        let ids: Vec<_> = default_detectors(&DetectionConfig::default())
            .iter()
            .map(|d| d.id())
            .collect();
        assert_eq!(
            ids,
            vec!["explicit_override", "docker_indicators", "runtime_heuristics"]
        );
    }
}
