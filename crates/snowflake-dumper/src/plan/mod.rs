//! Metadata extraction planning.
//!
//! This module turns a run configuration into an ordered list of tasks:
//!
//! - [`entity`]: Query template registry and archive layout per entity
//! - [`overrides`]: Operator query/where overrides
//! - [`variant`]: One namespace/filter combination for a template
//! - [`compose`]: Fallback and single-shot task composers
//! - [`header`]: Header naming policy for derived headers
//! - [`task`]: Task and plan value types consumed by the executor
//!
//! # Design Patterns
//!
//! - **Command**: tasks are inert values; execution, retries and scheduling
//!   belong to the executor that consumes the [`Plan`].
//! - **Registry**: entity behaviour is static data keyed by [`MetadataEntity`].

pub mod compose;
pub mod entity;
pub mod header;
pub mod overrides;
pub mod task;
pub mod variant;

pub use compose::{compose_single, compose_with_fallback};
pub use entity::{EntityLayout, MetadataEntity, OverrideKeys};
pub use header::{rename, HeaderSpec, NamingConvention, ResultSetMetadata};
pub use overrides::OverrideResolver;
pub use task::{DumpMetadataTask, FormatTask, Plan, SelectTask, Task, TaskCondition};
pub use variant::TaskVariant;
