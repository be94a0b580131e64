//! Run configuration type definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Which family of tasks a run produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Fast catalog first, universal catalog only when the fast query failed.
    #[default]
    Standard,
    /// Fast catalog only, plus the administrative introspection tasks.
    Assessment,
}

impl RunMode {
    /// Get the mode as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Standard => "standard",
            RunMode::Assessment => "assessment",
        }
    }
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root configuration for one planning run.
///
/// Every field has a default, so an empty YAML document is a valid
/// standard-mode configuration without overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Run mode (default: standard).
    #[serde(default)]
    pub mode: RunMode,

    /// Point fallback tasks at a namespace that does not exist, so the
    /// fallback path itself can be exercised against a live instance.
    #[serde(default)]
    pub inject_information_schema_fault: bool,

    /// Operator-supplied query overrides keyed by property name,
    /// e.g. `snowflake.metadata.tables.where`.
    #[serde(default)]
    pub overrides: BTreeMap<String, String>,
}

impl RunConfig {
    /// Create a standard-mode configuration without overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the run mode.
    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable or disable the fallback fault-injection switch.
    pub fn with_fault_injection(mut self, enabled: bool) -> Self {
        self.inject_information_schema_fault = enabled;
        self
    }

    /// Add a `key=value` style definition, replacing any earlier value.
    pub fn with_definition(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    /// True when running in assessment mode.
    pub fn is_assessment(&self) -> bool {
        self.mode == RunMode::Assessment
    }

    /// Look up an override by property name. Absent keys are `None`, never "".
    pub fn definition(&self, key: &str) -> Option<&str> {
        self.overrides.get(key).map(String::as_str)
    }
}
