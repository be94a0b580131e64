//! Run configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::error::Result;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Fields that shape the extracted data. The fault-injection switch is a
/// test aid and stays out of the recorded hash.
#[derive(Serialize)]
struct Fingerprint<'a> {
    mode: RunMode,
    overrides: &'a BTreeMap<String, String>,
}

impl RunConfig {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading run configuration from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: RunConfig = if yaml.trim().is_empty() {
            RunConfig::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }

    /// Compute a SHA256 hash of the mode and overrides, recorded in the dump stamp.
    pub fn hash(&self) -> String {
        let fingerprint = Fingerprint {
            mode: self.mode,
            overrides: &self.overrides,
        };
        let yaml = serde_yaml::to_string(&fingerprint).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(yaml.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
