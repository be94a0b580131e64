//! Operator query overrides.
//!
//! Override text is trusted input: it is spliced into the query as-is and
//! never parsed. A malformed override only surfaces when the executor runs it.

use tracing::{debug, info};

use crate::config::RunConfig;
use crate::error::{DumperError, Result};

use super::entity::MetadataEntity;

/// Resolves the effective query template for an entity.
#[derive(Debug, Clone, Copy)]
pub struct OverrideResolver<'a> {
    config: &'a RunConfig,
}

impl<'a> OverrideResolver<'a> {
    /// Create a resolver over a run configuration.
    pub fn new(config: &'a RunConfig) -> Self {
        Self { config }
    }

    /// Produce the effective template for `entity`.
    ///
    /// 1. A full-query override is returned verbatim.
    /// 2. Otherwise a where override is appended as `" WHERE <clause>"`.
    /// 3. Otherwise the template is returned unchanged.
    ///
    /// An override that is present but blank is a configuration error.
    pub fn resolve(&self, entity: MetadataEntity, template: &str) -> Result<String> {
        let Some(keys) = entity.override_keys() else {
            return Ok(template.to_string());
        };

        if let Some(query) = self.lookup(keys.query)? {
            info!("Using query override {} for {}", keys.query, entity);
            return Ok(query.to_string());
        }

        if let Some(clause) = self.lookup(keys.where_clause)? {
            debug!("Appending {} to {} query", keys.where_clause, entity);
            return Ok(format!("{} WHERE {}", template, clause));
        }

        Ok(template.to_string())
    }

    fn lookup(&self, key: &str) -> Result<Option<&'a str>> {
        match self.config.definition(key) {
            Some(value) if value.trim().is_empty() => Err(DumperError::Config(format!(
                "override property '{}' is set but empty",
                key
            ))),
            other => Ok(other),
        }
    }
}
