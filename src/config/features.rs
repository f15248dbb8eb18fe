//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Emit logs as JSON lines instead of human-readable text
    #[serde(default)]
    pub json_logs: bool,

    /// Post finished diagnostics to the log sink
    #[serde(default = "default_log_completions")]
    pub log_completions: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            json_logs: false,
            log_completions: default_log_completions(),
        }
    }
}

fn default_log_completions() -> bool {
    true
}
