//! Run configuration validation.
//!
//! Override text itself is never parsed. Only the property names and the
//! presence of some text are checked, so that a typo cannot silently drop an
//! override and an empty value cannot turn into an empty query.

use super::RunConfig;
use crate::error::{DumperError, Result};
use crate::plan::entity::OverrideKeys;

/// Validate the configuration.
pub fn validate(config: &RunConfig) -> Result<()> {
    for (key, value) in &config.overrides {
        if OverrideKeys::find(key).is_none() {
            let known: Vec<&str> = OverrideKeys::all()
                .iter()
                .flat_map(|keys| [keys.query, keys.where_clause])
                .collect();
            return Err(DumperError::Config(format!(
                "unknown override property '{}' (known: {})",
                key,
                known.join(", ")
            )));
        }

        if value.trim().is_empty() {
            return Err(DumperError::Config(format!(
                "override property '{}' is set but empty",
                key
            )));
        }
    }

    Ok(())
}
