//! Query template registry for Snowflake metadata entities.
//!
//! Every entity the planner knows about is listed here together with its
//! default query, the override properties an operator may set for it and the
//! archive entries its results land in. Templates carry two placeholders:
//!
//! - `{namespace}`: the catalog to read from (`SNOWFLAKE.ACCOUNT_USAGE` or
//!   `INFORMATION_SCHEMA`)
//! - `{where}`: the variant's own trailing filter, usually empty
//!
//! The registry is plain `const` data matched on the enum, so nothing is
//! derived from variant names at runtime.

use super::header::NamingConvention;

/// Fast catalog. Needs `GRANT IMPORTED PRIVILEGES ON DATABASE snowflake`.
pub const ACCOUNT_USAGE: &str = "SNOWFLAKE.ACCOUNT_USAGE";

/// Universal catalog, always readable but slow and row-limited.
pub const INFORMATION_SCHEMA: &str = "INFORMATION_SCHEMA";

/// Namespace substituted for [`INFORMATION_SCHEMA`] when fault injection is on.
pub const NONEXISTENT_SCHEMA: &str = "__NONEXISTENT__";

/// ACCOUNT_USAGE keeps dropped objects around; this filter hides them.
pub const ACCOUNT_USAGE_WHERE: &str = " WHERE DELETED IS NULL";

/// Archive format name written by the format task.
pub const FORMAT_NAME: &str = "snowflake.dump.zip";

/// Kind of catalog object to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetadataEntity {
    Database,
    Schema,
    Table,
    Column,
    View,
    Function,
    TableStorageMetric,
    Warehouse,
    ExternalTable,
    FunctionInfo,
}

/// Where an entity's results go and how its header is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityLayout {
    /// Fast ACCOUNT_USAGE query with an INFORMATION_SCHEMA fallback.
    WithFallback {
        account_usage_entry: &'static str,
        information_schema_entry: &'static str,
        header: &'static [&'static str],
    },
    /// One ACCOUNT_USAGE/administrative query, header derived from the result.
    SingleShot {
        account_usage_entry: &'static str,
        convention: NamingConvention,
    },
}

impl MetadataEntity {
    /// All entities in plan order.
    pub const ALL: [MetadataEntity; 10] = [
        MetadataEntity::Database,
        MetadataEntity::Schema,
        MetadataEntity::Table,
        MetadataEntity::Column,
        MetadataEntity::View,
        MetadataEntity::Function,
        MetadataEntity::TableStorageMetric,
        MetadataEntity::Warehouse,
        MetadataEntity::ExternalTable,
        MetadataEntity::FunctionInfo,
    ];

    /// Lowercase name used in property keys and log lines.
    pub fn name(&self) -> &'static str {
        match self {
            MetadataEntity::Database => "databases",
            MetadataEntity::Schema => "schemata",
            MetadataEntity::Table => "tables",
            MetadataEntity::Column => "columns",
            MetadataEntity::View => "views",
            MetadataEntity::Function => "functions",
            MetadataEntity::TableStorageMetric => "table_storage_metrics",
            MetadataEntity::Warehouse => "warehouses",
            MetadataEntity::ExternalTable => "external_tables",
            MetadataEntity::FunctionInfo => "function_info",
        }
    }

    /// Default query template.
    pub fn template(&self) -> &'static str {
        match self {
            MetadataEntity::Database => {
                "SELECT database_name, database_owner FROM {namespace}.DATABASES{where}"
            }
            MetadataEntity::Schema => {
                "SELECT catalog_name, schema_name FROM {namespace}.SCHEMATA{where}"
            }
            // Painfully slow on INFORMATION_SCHEMA.
            MetadataEntity::Table => {
                "SELECT table_catalog, table_schema, table_name, table_type, row_count, bytes, \
                 clustering_key FROM {namespace}.TABLES{where}"
            }
            MetadataEntity::Column => {
                "SELECT table_catalog, table_schema, table_name, ordinal_position, column_name, \
                 data_type FROM {namespace}.COLUMNS{where}"
            }
            MetadataEntity::View => {
                "SELECT table_catalog, table_schema, table_name, view_definition \
                 FROM {namespace}.VIEWS{where}"
            }
            MetadataEntity::Function => {
                "SELECT function_schema, function_name, data_type, argument_signature \
                 FROM {namespace}.FUNCTIONS{where}"
            }
            MetadataEntity::TableStorageMetric => {
                "SELECT * FROM {namespace}.TABLE_STORAGE_METRICS{where}"
            }
            MetadataEntity::Warehouse => "SHOW WAREHOUSES",
            MetadataEntity::ExternalTable => "SHOW EXTERNAL TABLES",
            MetadataEntity::FunctionInfo => "SHOW FUNCTIONS",
        }
    }

    /// Archive entries and header policy.
    pub fn layout(&self) -> EntityLayout {
        match self {
            MetadataEntity::Database => EntityLayout::WithFallback {
                account_usage_entry: "databases-au.csv",
                information_schema_entry: "databases.csv",
                header: &["DatabaseName", "DatabaseOwner"],
            },
            MetadataEntity::Schema => EntityLayout::WithFallback {
                account_usage_entry: "schemata-au.csv",
                information_schema_entry: "schemata.csv",
                header: &["CatalogName", "SchemaName"],
            },
            MetadataEntity::Table => EntityLayout::WithFallback {
                account_usage_entry: "tables-au.csv",
                information_schema_entry: "tables.csv",
                header: &[
                    "TableCatalog",
                    "TableSchema",
                    "TableName",
                    "TableType",
                    "RowCount",
                    "Bytes",
                    "ClusteringKey",
                ],
            },
            MetadataEntity::Column => EntityLayout::WithFallback {
                account_usage_entry: "columns-au.csv",
                information_schema_entry: "columns.csv",
                header: &[
                    "TableCatalog",
                    "TableSchema",
                    "TableName",
                    "OrdinalPosition",
                    "ColumnName",
                    "DataType",
                ],
            },
            MetadataEntity::View => EntityLayout::WithFallback {
                account_usage_entry: "views-au.csv",
                information_schema_entry: "views.csv",
                header: &["TableCatalog", "TableSchema", "TableName", "ViewDefinition"],
            },
            MetadataEntity::Function => EntityLayout::WithFallback {
                account_usage_entry: "functions-au.csv",
                information_schema_entry: "functions.csv",
                header: &[
                    "FunctionSchema",
                    "FunctionName",
                    "DataType",
                    "ArgumentSignature",
                ],
            },
            MetadataEntity::TableStorageMetric => EntityLayout::SingleShot {
                account_usage_entry: "table_storage_metrics-au.csv",
                convention: NamingConvention::UpperSnake,
            },
            MetadataEntity::Warehouse => EntityLayout::SingleShot {
                account_usage_entry: "warehouses-au.csv",
                convention: NamingConvention::LowerSnake,
            },
            MetadataEntity::ExternalTable => EntityLayout::SingleShot {
                account_usage_entry: "external_tables-au.csv",
                convention: NamingConvention::LowerSnake,
            },
            MetadataEntity::FunctionInfo => EntityLayout::SingleShot {
                account_usage_entry: "function_info-au.csv",
                convention: NamingConvention::LowerSnake,
            },
        }
    }

    /// Override properties for this entity. `SHOW` commands have none.
    pub fn override_keys(&self) -> Option<&'static OverrideKeys> {
        OverrideKeys::all().iter().find(|keys| keys.entity == *self)
    }

    /// True for entities only extracted in assessment mode.
    pub fn is_assessment_only(&self) -> bool {
        matches!(self.layout(), EntityLayout::SingleShot { .. })
    }
}

impl std::fmt::Display for MetadataEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The pair of override property names for one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverrideKeys {
    pub entity: MetadataEntity,
    /// Replaces the whole query.
    pub query: &'static str,
    /// Appended to the default query as `WHERE <value>`.
    pub where_clause: &'static str,
}

const OVERRIDE_KEYS: [OverrideKeys; 7] = [
    OverrideKeys {
        entity: MetadataEntity::Database,
        query: "snowflake.metadata.databases.query",
        where_clause: "snowflake.metadata.databases.where",
    },
    OverrideKeys {
        entity: MetadataEntity::Schema,
        query: "snowflake.metadata.schemata.query",
        where_clause: "snowflake.metadata.schemata.where",
    },
    OverrideKeys {
        entity: MetadataEntity::Table,
        query: "snowflake.metadata.tables.query",
        where_clause: "snowflake.metadata.tables.where",
    },
    OverrideKeys {
        entity: MetadataEntity::Column,
        query: "snowflake.metadata.columns.query",
        where_clause: "snowflake.metadata.columns.where",
    },
    OverrideKeys {
        entity: MetadataEntity::View,
        query: "snowflake.metadata.views.query",
        where_clause: "snowflake.metadata.views.where",
    },
    OverrideKeys {
        entity: MetadataEntity::Function,
        query: "snowflake.metadata.functions.query",
        where_clause: "snowflake.metadata.functions.where",
    },
    OverrideKeys {
        entity: MetadataEntity::TableStorageMetric,
        query: "snowflake.metadata.table_storage_metrics.query",
        where_clause: "snowflake.metadata.table_storage_metrics.where",
    },
];

impl OverrideKeys {
    /// Every override-capable entity, in plan order.
    pub fn all() -> &'static [OverrideKeys] {
        &OVERRIDE_KEYS
    }

    /// Find the entity owning a property name.
    pub fn find(property: &str) -> Option<&'static OverrideKeys> {
        Self::all()
            .iter()
            .find(|keys| keys.query == property || keys.where_clause == property)
    }

    /// Help text for the full-query property.
    pub fn query_description(&self) -> String {
        format!("Custom query for metadata {} dump.", self.entity.name())
    }

    /// Help text for the where-clause property.
    pub fn where_description(&self) -> String {
        format!(
            "Custom where condition to append to query for metadata {} dump.",
            self.entity.name()
        )
    }
}
