//! Task composers: turn an entity template into executor tasks.
//!
//! ACCOUNT_USAGE is much faster than INFORMATION_SCHEMA and has none of its
//! size limits, but it needs imported privileges on the `SNOWFLAKE` database.
//! The fallback composer therefore always tries the fast variant first and
//! declares the standard variant as "run only if the fast one failed".

use tracing::debug;

use crate::config::RunMode;
use crate::error::Result;

use super::entity::MetadataEntity;
use super::header::{HeaderSpec, NamingConvention};
use super::overrides::OverrideResolver;
use super::task::{SelectTask, Task};
use super::variant::TaskVariant;

/// Build the fast task and, in standard mode, its conditional fallback.
///
/// Returns `[fast]` in assessment mode and `[fast, fallback]` otherwise; the
/// fallback depends on the fast task failing.
pub fn compose_with_fallback(
    resolver: &OverrideResolver<'_>,
    entity: MetadataEntity,
    header: HeaderSpec,
    template: &str,
    fast: &TaskVariant,
    fallback: &TaskVariant,
    mode: RunMode,
) -> Result<Vec<Task>> {
    let template = resolver.resolve(entity, template)?;

    let fast_task = SelectTask::new(&fast.destination, fast.format(&template), header);

    if mode == RunMode::Assessment {
        debug!("{}: {} only", entity, fast.namespace);
        return Ok(vec![fast_task.into()]);
    }

    let fallback_task = SelectTask::new(&fallback.destination, fallback.format(&template), header)
        .only_if_failed(&fast_task);
    debug!(
        "{}: {} with fallback to {}",
        entity, fast.namespace, fallback.namespace
    );

    Ok(vec![fast_task.into(), fallback_task.into()])
}

/// Build exactly one task whose header is derived from the result columns.
pub fn compose_single(
    resolver: &OverrideResolver<'_>,
    entity: MetadataEntity,
    template: &str,
    variant: &TaskVariant,
    convention: NamingConvention,
) -> Result<Task> {
    let template = resolver.resolve(entity, template)?;
    debug!("{}: single task on {}", entity, variant.namespace);

    Ok(SelectTask::new(
        &variant.destination,
        variant.format(&template),
        HeaderSpec::Derived(convention),
    )
    .into())
}
