//! Extraction task and plan value types.
//!
//! A [`Plan`] is what the planner hands to the executor. Tasks are plain data
//! (Command pattern): each one carries everything needed to run it later,
//! including the single failure dependency a fallback task may declare.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::RunMode;
use crate::error::{DumperError, Result};

use super::header::{HeaderSpec, ResultSetMetadata};

/// Archive entry written by the metadata stamp task.
pub const METADATA_ENTRY: &str = "compilerworks-metadata.yaml";

/// Archive entry written by the format task.
pub const FORMAT_ENTRY: &str = "compilerworks-format.txt";

/// When the executor should run a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "run", rename_all = "snake_case")]
pub enum TaskCondition {
    /// Run unconditionally.
    Always,
    /// Run only after `predecessor` ran and failed.
    OnlyIfFailed { predecessor: String },
}

impl TaskCondition {
    /// Destination of the task this one depends on, if any.
    pub fn predecessor(&self) -> Option<&str> {
        match self {
            TaskCondition::Always => None,
            TaskCondition::OnlyIfFailed { predecessor } => Some(predecessor.as_str()),
        }
    }

    /// Decide whether to run given the predecessor's outcome.
    pub fn should_run(&self, predecessor_failed: bool) -> bool {
        match self {
            TaskCondition::Always => true,
            TaskCondition::OnlyIfFailed { .. } => predecessor_failed,
        }
    }
}

/// A query whose rows are written under `destination`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectTask {
    pub destination: String,
    pub query: String,
    pub header: HeaderSpec,
    pub condition: TaskCondition,
}

impl SelectTask {
    /// Create an unconditional task.
    pub fn new(destination: impl Into<String>, query: impl Into<String>, header: HeaderSpec) -> Self {
        Self {
            destination: destination.into(),
            query: query.into(),
            header,
            condition: TaskCondition::Always,
        }
    }

    /// Run this task only if `predecessor` failed.
    pub fn only_if_failed(mut self, predecessor: &SelectTask) -> Self {
        self.condition = TaskCondition::OnlyIfFailed {
            predecessor: predecessor.destination.clone(),
        };
        self
    }

    /// Header for an executed result of this task.
    pub fn resolve_header(&self, metadata: &dyn ResultSetMetadata) -> Result<Vec<String>> {
        self.header.resolve(metadata).map_err(|e| match e {
            DumperError::HeaderDerivation { message, .. } => {
                DumperError::header(self.destination.clone(), message)
            }
            other => other,
        })
    }
}

/// Records what produced the dump: format, connector, mode and config hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DumpMetadataTask {
    pub destination: String,
    pub format: String,
    pub connector: String,
    pub mode: RunMode,
    pub config_hash: String,
}

impl DumpMetadataTask {
    pub fn new(
        format: impl Into<String>,
        connector: impl Into<String>,
        mode: RunMode,
        config_hash: impl Into<String>,
    ) -> Self {
        Self {
            destination: METADATA_ENTRY.to_string(),
            format: format.into(),
            connector: connector.into(),
            mode,
            config_hash: config_hash.into(),
        }
    }
}

/// Writes the archive format name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatTask {
    pub destination: String,
    pub format: String,
}

impl FormatTask {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            destination: FORMAT_ENTRY.to_string(),
            format: format.into(),
        }
    }
}

/// One unit of work for the executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Task {
    DumpMetadata(DumpMetadataTask),
    Format(FormatTask),
    Select(SelectTask),
}

impl Task {
    /// Archive entry this task writes.
    pub fn destination(&self) -> &str {
        match self {
            Task::DumpMetadata(t) => &t.destination,
            Task::Format(t) => &t.destination,
            Task::Select(t) => &t.destination,
        }
    }

    /// Run condition. Bookkeeping tasks always run.
    pub fn condition(&self) -> &TaskCondition {
        const ALWAYS: &TaskCondition = &TaskCondition::Always;
        match self {
            Task::Select(t) => &t.condition,
            _ => ALWAYS,
        }
    }

    /// The select task, if this is one.
    pub fn as_select(&self) -> Option<&SelectTask> {
        match self {
            Task::Select(t) => Some(t),
            _ => None,
        }
    }
}

impl From<SelectTask> for Task {
    fn from(task: SelectTask) -> Self {
        Task::Select(task)
    }
}

/// Ordered task list for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Plan {
    tasks: Vec<Task>,
}

impl Plan {
    /// Wrap an ordered task list.
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Tasks in execution order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Select tasks in order, skipping bookkeeping.
    pub fn select_tasks(&self) -> impl Iterator<Item = &SelectTask> {
        self.tasks.iter().filter_map(Task::as_select)
    }

    /// Find a task by destination.
    pub fn find(&self, destination: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.destination() == destination)
    }

    /// Check the dependency rules an executor relies on.
    ///
    /// Destinations must be unique, and every declared predecessor must appear
    /// earlier in the plan, which also rules out cycles.
    pub fn validate(&self) -> Result<()> {
        let mut positions: HashMap<&str, usize> = HashMap::with_capacity(self.tasks.len());

        for (idx, task) in self.tasks.iter().enumerate() {
            if let Some(predecessor) = task.condition().predecessor() {
                if !positions.contains_key(predecessor) {
                    return Err(DumperError::InvalidPlan(format!(
                        "task {} depends on {}, which is not scheduled before it",
                        task.destination(),
                        predecessor
                    )));
                }
            }

            if positions.insert(task.destination(), idx).is_some() {
                return Err(DumperError::InvalidPlan(format!(
                    "destination {} is written by more than one task",
                    task.destination()
                )));
            }
        }

        Ok(())
    }

    /// Serialize the plan as pretty JSON for an executor.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
