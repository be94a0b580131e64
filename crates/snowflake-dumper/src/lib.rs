//! # snowflake-dumper
//!
//! Metadata extraction planner for Snowflake migration assessments.
//!
//! Given a run configuration, this library decides which catalog queries to
//! run, in what order and with what fallback policy, and returns them as a
//! declarative [`Plan`] for a separate executor:
//!
//! - **Fast path first**: every entity is read from `SNOWFLAKE.ACCOUNT_USAGE`
//! - **Fallback**: in standard mode an `INFORMATION_SCHEMA` task runs only if
//!   the fast task failed
//! - **Overrides**: operators can replace a query or append a filter per entity
//! - **Assessment mode**: fast path only, plus administrative `SHOW` commands
//!   with headers derived from the result columns
//!
//! The planner performs no I/O and never executes SQL.
//!
//! ## Example
//!
//! ```rust,no_run
//! use snowflake_dumper::{MetadataConnector, RunConfig, SnowflakeMetadataConnector};
//!
//! fn main() -> snowflake_dumper::Result<()> {
//!     let config = RunConfig::load("dumper.yaml")?;
//!     let plan = SnowflakeMetadataConnector::new().build_plan(&config)?;
//!     println!("{}", plan.to_json()?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod connector;
pub mod error;
pub mod plan;

// Re-exports for convenient access
pub use config::{RunConfig, RunMode};
pub use connector::{ConnectorProperty, MetadataConnector, SnowflakeMetadataConnector};
pub use error::{DumperError, Result};
pub use plan::{
    HeaderSpec, MetadataEntity, NamingConvention, Plan, ResultSetMetadata, SelectTask, Task,
    TaskCondition,
};
