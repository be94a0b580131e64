//! Snowflake metadata connector: builds the complete plan for one run.

use serde::Serialize;
use tracing::{info, warn};

use crate::config::{RunConfig, RunMode};
use crate::error::Result;
use crate::plan::entity::{
    ACCOUNT_USAGE, ACCOUNT_USAGE_WHERE, FORMAT_NAME, INFORMATION_SCHEMA, NONEXISTENT_SCHEMA,
};
use crate::plan::{
    compose_single, compose_with_fallback, DumpMetadataTask, EntityLayout, FormatTask, HeaderSpec,
    MetadataEntity, OverrideKeys, OverrideResolver, Plan, Task, TaskVariant,
};

/// A configuration property a connector understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectorProperty {
    pub name: &'static str,
    pub description: String,
}

/// A connector that plans metadata extraction for one kind of database.
pub trait MetadataConnector {
    /// Short connector name.
    fn name(&self) -> &'static str;

    /// One-line description.
    fn description(&self) -> &'static str;

    /// Override properties accepted in [`RunConfig::overrides`].
    fn properties(&self) -> Vec<ConnectorProperty>;

    /// Build the ordered task list for one run.
    fn build_plan(&self, config: &RunConfig) -> Result<Plan>;
}

/// Plans metadata extraction from Snowflake.
///
/// The plan is, in order:
///
/// 1. the metadata stamp and format tasks
/// 2. databases, schemata, tables, columns, views and functions, each as an
///    ACCOUNT_USAGE task plus (standard mode) an INFORMATION_SCHEMA fallback
/// 3. in assessment mode only: table storage metrics, warehouses, external
///    tables and function info
#[derive(Debug, Clone, Copy, Default)]
pub struct SnowflakeMetadataConnector;

impl SnowflakeMetadataConnector {
    pub fn new() -> Self {
        Self
    }

    /// Fault injection only matters where fallback tasks exist.
    fn fault_injection_active(config: &RunConfig) -> bool {
        config.inject_information_schema_fault && config.mode == RunMode::Standard
    }

    fn information_schema(config: &RunConfig) -> &'static str {
        if Self::fault_injection_active(config) {
            warn!(
                "Fault injection enabled: fallback tasks read {} instead of {}",
                NONEXISTENT_SCHEMA, INFORMATION_SCHEMA
            );
            NONEXISTENT_SCHEMA
        } else {
            INFORMATION_SCHEMA
        }
    }

    fn entity_tasks(
        resolver: &OverrideResolver<'_>,
        entity: MetadataEntity,
        information_schema: &str,
        mode: RunMode,
    ) -> Result<Vec<Task>> {
        match entity.layout() {
            EntityLayout::WithFallback {
                account_usage_entry,
                information_schema_entry,
                header,
            } => compose_with_fallback(
                resolver,
                entity,
                HeaderSpec::Fixed(header),
                entity.template(),
                &TaskVariant::new(account_usage_entry, ACCOUNT_USAGE)
                    .with_where(ACCOUNT_USAGE_WHERE),
                &TaskVariant::new(information_schema_entry, information_schema),
                mode,
            ),
            EntityLayout::SingleShot { .. } if mode == RunMode::Standard => Ok(Vec::new()),
            EntityLayout::SingleShot {
                account_usage_entry,
                convention,
            } => Ok(vec![compose_single(
                resolver,
                entity,
                entity.template(),
                &TaskVariant::new(account_usage_entry, ACCOUNT_USAGE),
                convention,
            )?]),
        }
    }
}

impl MetadataConnector for SnowflakeMetadataConnector {
    fn name(&self) -> &'static str {
        "snowflake"
    }

    fn description(&self) -> &'static str {
        "Dumps metadata from Snowflake."
    }

    fn properties(&self) -> Vec<ConnectorProperty> {
        OverrideKeys::all()
            .iter()
            .flat_map(|keys| {
                [
                    ConnectorProperty {
                        name: keys.query,
                        description: keys.query_description(),
                    },
                    ConnectorProperty {
                        name: keys.where_clause,
                        description: keys.where_description(),
                    },
                ]
            })
            .collect()
    }

    fn build_plan(&self, config: &RunConfig) -> Result<Plan> {
        config.validate()?;
        info!("Planning Snowflake metadata dump ({} mode)", config.mode);

        let resolver = OverrideResolver::new(config);
        let information_schema = Self::information_schema(config);

        let bookkeeping = [
            Task::DumpMetadata(DumpMetadataTask::new(
                FORMAT_NAME,
                self.name(),
                config.mode,
                config.hash(),
            )),
            Task::Format(FormatTask::new(FORMAT_NAME)),
        ];

        let groups = MetadataEntity::ALL
            .iter()
            .map(|&entity| Self::entity_tasks(&resolver, entity, information_schema, config.mode))
            .collect::<Result<Vec<_>>>()?;

        let plan = Plan::new(
            bookkeeping
                .into_iter()
                .chain(groups.into_iter().flatten())
                .collect(),
        );
        plan.validate()?;

        info!(
            "Planned {} tasks ({} queries)",
            plan.len(),
            plan.select_tasks().count()
        );
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{NamingConvention, TaskCondition};

    fn destinations(plan: &Plan) -> Vec<&str> {
        plan.tasks().iter().map(Task::destination).collect()
    }

    #[test]
    fn test_connector_identity() {
        let connector = SnowflakeMetadataConnector::new();
        assert_eq!(connector.name(), "snowflake");
        assert_eq!(connector.description(), "Dumps metadata from Snowflake.");
    }

    #[test]
    fn test_properties_cover_all_overrides() {
        let properties = SnowflakeMetadataConnector::new().properties();
        assert_eq!(properties.len(), 14);
        assert_eq!(properties[0].name, "snowflake.metadata.databases.query");
        assert_eq!(properties[1].name, "snowflake.metadata.databases.where");
        assert_eq!(
            properties[13].description,
            "Custom where condition to append to query for metadata table_storage_metrics dump."
        );
    }

    #[test]
    fn test_standard_plan_order() {
        let plan = SnowflakeMetadataConnector::new()
            .build_plan(&RunConfig::new())
            .unwrap();

        assert_eq!(
            destinations(&plan),
            vec![
                "compilerworks-metadata.yaml",
                "compilerworks-format.txt",
                "databases-au.csv",
                "databases.csv",
                "schemata-au.csv",
                "schemata.csv",
                "tables-au.csv",
                "tables.csv",
                "columns-au.csv",
                "columns.csv",
                "views-au.csv",
                "views.csv",
                "functions-au.csv",
                "functions.csv",
            ]
        );
    }

    #[test]
    fn test_assessment_plan_order() {
        let config = RunConfig::new().with_mode(RunMode::Assessment);
        let plan = SnowflakeMetadataConnector::new().build_plan(&config).unwrap();

        assert_eq!(
            destinations(&plan),
            vec![
                "compilerworks-metadata.yaml",
                "compilerworks-format.txt",
                "databases-au.csv",
                "schemata-au.csv",
                "tables-au.csv",
                "columns-au.csv",
                "views-au.csv",
                "functions-au.csv",
                "table_storage_metrics-au.csv",
                "warehouses-au.csv",
                "external_tables-au.csv",
                "function_info-au.csv",
            ]
        );
        assert!(plan
            .select_tasks()
            .all(|t| t.condition == TaskCondition::Always));
    }

    #[test]
    fn test_assessment_single_shot_tasks() {
        let config = RunConfig::new().with_mode(RunMode::Assessment);
        let plan = SnowflakeMetadataConnector::new().build_plan(&config).unwrap();

        let metrics = plan
            .find("table_storage_metrics-au.csv")
            .and_then(Task::as_select)
            .unwrap();
        assert_eq!(
            metrics.query,
            "SELECT * FROM SNOWFLAKE.ACCOUNT_USAGE.TABLE_STORAGE_METRICS"
        );
        assert_eq!(metrics.header, HeaderSpec::Derived(NamingConvention::UpperSnake));

        let functions = plan
            .find("function_info-au.csv")
            .and_then(Task::as_select)
            .unwrap();
        assert_eq!(functions.query, "SHOW FUNCTIONS");
        assert_eq!(functions.header, HeaderSpec::Derived(NamingConvention::LowerSnake));
    }

    #[test]
    fn test_stamp_records_run() {
        let config = RunConfig::new().with_mode(RunMode::Assessment);
        let plan = SnowflakeMetadataConnector::new().build_plan(&config).unwrap();

        match &plan.tasks()[0] {
            Task::DumpMetadata(stamp) => {
                assert_eq!(stamp.format, FORMAT_NAME);
                assert_eq!(stamp.connector, "snowflake");
                assert_eq!(stamp.mode, RunMode::Assessment);
                assert_eq!(stamp.config_hash, config.hash());
            }
            other => panic!("expected stamp task first, got {:?}", other),
        }
        assert_eq!(plan.tasks()[1], Task::Format(FormatTask::new(FORMAT_NAME)));
    }

    #[test]
    fn test_storage_metrics_where_override() {
        let config = RunConfig::new()
            .with_mode(RunMode::Assessment)
            .with_definition("snowflake.metadata.table_storage_metrics.where", "ACTIVE_BYTES > 0");
        let plan = SnowflakeMetadataConnector::new().build_plan(&config).unwrap();

        let metrics = plan
            .find("table_storage_metrics-au.csv")
            .and_then(Task::as_select)
            .unwrap();
        assert_eq!(
            metrics.query,
            "SELECT * FROM SNOWFLAKE.ACCOUNT_USAGE.TABLE_STORAGE_METRICS WHERE ACTIVE_BYTES > 0"
        );
    }

    #[test]
    fn test_fault_injection_only_active_in_standard_mode() {
        let standard = RunConfig::new().with_fault_injection(true);
        assert!(SnowflakeMetadataConnector::fault_injection_active(&standard));
        assert_eq!(
            SnowflakeMetadataConnector::information_schema(&standard),
            NONEXISTENT_SCHEMA
        );

        let assessment = standard.with_mode(RunMode::Assessment);
        assert!(!SnowflakeMetadataConnector::fault_injection_active(&assessment));
        assert_eq!(
            SnowflakeMetadataConnector::information_schema(&assessment),
            INFORMATION_SCHEMA
        );
        assert!(!SnowflakeMetadataConnector::fault_injection_active(&RunConfig::new()));
    }

    #[test]
    fn test_stamp_hash_ignores_fault_injection() {
        let connector = SnowflakeMetadataConnector::new();
        let normal = connector.build_plan(&RunConfig::new()).unwrap();
        let faulty = connector
            .build_plan(&RunConfig::new().with_fault_injection(true))
            .unwrap();
        assert_eq!(normal.tasks()[0], faulty.tasks()[0]);
    }

    #[test]
    fn test_invalid_config_emits_no_plan() {
        let config = RunConfig::new().with_definition("snowflake.metadata.tables.query", "");
        assert!(SnowflakeMetadataConnector::new().build_plan(&config).is_err());
    }
}
