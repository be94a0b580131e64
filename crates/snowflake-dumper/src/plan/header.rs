//! Header naming policy for result sets whose shape is not fixed in advance.
//!
//! `SHOW` commands and `SELECT *` queries return whatever columns Snowflake
//! currently emits, so their headers are derived from the result metadata
//! and converted to the `UpperCamel` names downstream consumers expect.

use serde::Serialize;

use crate::error::{DumperError, Result};

/// Naming convention of the source column labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingConvention {
    /// `TABLE_NAME`, as returned by ACCOUNT_USAGE views.
    UpperSnake,
    /// `warehouse_name`, as returned by `SHOW` commands.
    LowerSnake,
}

impl NamingConvention {
    /// Convert one label to `UpperCamel`.
    ///
    /// Each underscore-separated word keeps its first character upper-cased
    /// and the rest lower-cased. Empty words (`a__b`, `_a`) contribute nothing.
    pub fn to_upper_camel(&self, label: &str) -> String {
        match self {
            NamingConvention::UpperSnake | NamingConvention::LowerSnake => {
                let mut out = String::with_capacity(label.len());
                for word in label.split('_') {
                    let mut chars = word.chars();
                    if let Some(first) = chars.next() {
                        out.extend(first.to_uppercase());
                        out.extend(chars.flat_map(char::to_lowercase));
                    }
                }
                out
            }
        }
    }
}

/// Column metadata of an executed result set.
///
/// This is the only piece of a result the planner ever looks at.
pub trait ResultSetMetadata {
    /// Column labels in result order.
    fn column_labels(&self) -> Vec<String>;
}

impl<S: AsRef<str>> ResultSetMetadata for [S] {
    fn column_labels(&self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_string()).collect()
    }
}

impl<S: AsRef<str>> ResultSetMetadata for Vec<S> {
    fn column_labels(&self) -> Vec<String> {
        self.as_slice().column_labels()
    }
}

/// Rename every column, preserving order and count.
///
/// A result without columns is an error rather than an empty header.
pub fn rename<S: AsRef<str>>(columns: &[S], convention: NamingConvention) -> Result<Vec<String>> {
    if columns.is_empty() {
        return Err(DumperError::header("result set", "source returned zero columns"));
    }

    Ok(columns
        .iter()
        .map(|c| convention.to_upper_camel(c.as_ref()))
        .collect())
}

/// How a task's output header is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum HeaderSpec {
    /// Fixed, ordered canonical column names.
    Fixed(&'static [&'static str]),
    /// Derived from the executed result's column labels.
    Derived(NamingConvention),
}

impl HeaderSpec {
    /// Produce the header for an executed result.
    pub fn resolve(&self, metadata: &dyn ResultSetMetadata) -> Result<Vec<String>> {
        match self {
            HeaderSpec::Fixed(names) => Ok(names.iter().map(|n| n.to_string()).collect()),
            HeaderSpec::Derived(convention) => {
                rename(metadata.column_labels().as_slice(), *convention)
            }
        }
    }

    /// True when the header depends on the executed result.
    pub fn is_derived(&self) -> bool {
        matches!(self, HeaderSpec::Derived(_))
    }
}
