//! Factory task registry.
//!
//! Describes downstream build work (blueprints, backend, frontend, automation)
//! that the factory will perform for a drafted idea. The registry is an
//! in-memory value owned by whoever created it; nothing here is persisted.

use serde::{Deserialize, Serialize};

/// Kind of work a [`FactoryTask`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactoryTaskKind {
    /// Turn a linear brief into a build blueprint.
    Blueprint,
    /// Server-side implementation work.
    Backend,
    /// Client-side implementation work.
    Frontend,
    /// Scripting, CI, or other automation.
    Automation,
}

/// Lifecycle status of a [`FactoryTask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactoryTaskStatus {
    /// Registered, not started.
    Pending,
    /// In progress.
    Running,
    /// Completed successfully.
    Done,
    /// Completed unsuccessfully.
    Failed,
}

/// One unit of factory work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryTask {
    /// Caller-assigned identifier.
    pub id: String,
    /// What kind of work this is.
    pub kind: FactoryTaskKind,
    /// Current status.
    pub status: FactoryTaskStatus,
    /// One-line description.
    pub summary: String,
}

/// Ordered list of [`FactoryTask`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factory {
    tasks: Vec<FactoryTask>,
}

impl Factory {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `task`. Duplicate ids are allowed; order is insertion order.
    pub fn add_task(&mut self, task: FactoryTask) {
        tracing::debug!(task_id = %task.id, kind = ?task.kind, "factory task added");
        self.tasks.push(task);
    }

    /// Returns all tasks in insertion order.
    pub fn list_tasks(&self) -> &[FactoryTask] {
        &self.tasks
    }

    /// Number of registered tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if no tasks are registered.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
