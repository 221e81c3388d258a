// Copyright (c) 2026 forager.dev
// SPDX-License-Identifier: AGPL-3.0
//! Task Store Port
//!
//! Boundary contract for the persistence store that owns task records and
//! status transitions. The scheduling engine never performs I/O itself; it
//! consumes collections a store implementation has already resolved.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer (port)
//! - **Purpose:** Abstract candidate fetch and the atomic claim primitive
//!
//! Claiming must be exactly-once per task. Two agents racing on the same
//! recommendation must see one success and one [`ClaimError::AlreadyClaimed`],
//! which is retriable: the loser re-queries and claims the next candidate.

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::domain::task::{Task, TaskId, TaskStatus};

/// Filter the store applies when assembling the candidate list.
///
/// Specialization matching happens inside the store (it knows agent
/// profiles); the engine only echoes it back in `filterApplied`.
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    /// Restrict to these category keys. `None` = all categories.
    pub categories: Option<Vec<String>>,
    /// Cap the candidate list length. `None` = unbounded.
    pub limit: Option<usize>,
}

/// Claim failure outcomes.
#[derive(Debug, Error)]
pub enum ClaimError {
    /// No task with this id exists.
    #[error("task {0} not found")]
    NotFound(TaskId),

    /// Another agent won the race. Retriable: re-query and claim the next
    /// recommendation.
    #[error("task {0} already claimed by {1}")]
    AlreadyClaimed(TaskId, String),

    /// The task is in a status that cannot transition to claimed.
    #[error("task {0} is not claimable (status {1:?})")]
    NotClaimable(TaskId, TaskStatus),
}

impl ClaimError {
    /// Whether the caller should retry with a fresh recommendation.
    pub fn is_retriable(&self) -> bool {
        matches!(self, ClaimError::AlreadyClaimed(_, _))
    }
}

/// Port implemented by every store backend.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Fetch claimable candidates, pre-filtered per `filter`.
    async fn fetch_candidates(&self, filter: &CandidateFilter) -> Result<Vec<Task>>;

    /// Fetch the full task universe visible to the caller. Needed for
    /// dependency resolution, which must see completed and blocked tasks.
    async fn fetch_all(&self) -> Result<Vec<Task>>;

    /// Atomically claim a task for an agent: compare-and-swap
    /// `pending → claimed`, recording the owner.
    async fn claim(&self, task_id: &TaskId, agent_id: &str) -> Result<Task, ClaimError>;
}
