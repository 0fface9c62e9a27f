//! Explicit override via `MCP_FILE_PATH_MODE`.

use super::ModeDetector;
use crate::config::DetectionConfig;
use crate::error::Result;
use crate::host::HostContext;
use crate::types::Mode;

pub struct ExplicitOverrideDetector {
    config: DetectionConfig,
}

impl ExplicitOverrideDetector {
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }
}

impl Default for ExplicitOverrideDetector {
    fn default() -> Self {
        Self::new(DetectionConfig::default())
    }
}

impl ModeDetector for ExplicitOverrideDetector {
    fn id(&self) -> &'static str {
        "explicit_override"
    }

    fn attempt(&self, host: &HostContext) -> Result<Option<Mode>> {
        let Some(raw) = host.var(&self.config.override_env) else {
            return Ok(None);
        };

        let value = raw.trim().to_lowercase();
        if value.is_empty() || value == "auto" {
            return Ok(None);
        }

        match value.parse::<Mode>() {
            Ok(mode) => Ok(Some(mode)),
            Err(err) => {
                // Malformed input is never fatal; lower-priority strategies decide.
                tracing::warn!(
                    variable = %self.config.override_env,
                    error = %err,
                    "Ignoring unrecognized path mode override"
                );
                Ok(None)
            }
        }
    }
}
