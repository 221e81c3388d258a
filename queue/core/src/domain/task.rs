// Copyright (c) 2026 forager.dev
// SPDX-License-Identifier: AGPL-3.0
//! Task record value objects.
//!
//! The task record is owned by the persistence store; this crate only ever
//! borrows it. The serde shape here is the store shape (snake_case), which
//! is also what the query response carries for the task's own fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque task identifier as assigned by the store (e.g. `"task-042"`).
///
/// Never minted by the engine; unresolvable ids are a normal input (a
/// dependency may point at a task outside the visible universe) and are
/// treated as unmet, not as errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub String);

impl TaskId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Lifecycle status of a task. The store owns all transitions; the engine
/// only reads it (readiness checks look for `Completed`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Claimed,
    InProgress,
    Completed,
    Blocked,
    Archived,
}

/// A task record as loaded from the store.
///
/// `category` stays a raw string key rather than a [`super::category::Category`]:
/// the store may hold keys the taxonomy does not know, and those must flow
/// through the engine fail-soft (rank sentinel 999) instead of failing to
/// deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub status: TaskStatus,
    /// Ids of tasks that must be `completed` before this one is claimable.
    /// Order carries no meaning.
    #[serde(default)]
    pub dependencies: Vec<TaskId>,
    /// Explicit research flag set by a human or upstream tool. When present
    /// and true it overrides the keyword heuristic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_research: Option<bool>,
    pub created_at: DateTime<Utc>,
}
