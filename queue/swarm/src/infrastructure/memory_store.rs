// Copyright (c) 2026 forager.dev
// SPDX-License-Identifier: AGPL-3.0
//! In-Memory Task Store
//!
//! Reference implementation of the `TaskStore` port backing tests and
//! demos. Claiming is a compare-and-swap under a single write lock, which
//! gives the exactly-once guarantee the port requires: of two agents
//! racing on the same recommendation, one gets the task and the other
//! gets a retriable `AlreadyClaimed`.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure Layer
//! - **Purpose:** `TaskStore` adapter over a process-local map

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::RwLock;

use forager_core::domain::store::{CandidateFilter, ClaimError, TaskStore};
use forager_core::domain::task::{Task, TaskId, TaskStatus};

struct StoredTask {
    task: Task,
    claimed_by: Option<String>,
}

/// Process-local task store.
pub struct InMemoryTaskStore {
    inner: RwLock<HashMap<TaskId, StoredTask>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Build a store pre-populated with tasks.
    pub fn seeded(tasks: Vec<Task>) -> Self {
        let store = Self::new();
        {
            let mut guard = store.inner.write();
            for task in tasks {
                guard.insert(
                    task.id.clone(),
                    StoredTask {
                        task,
                        claimed_by: None,
                    },
                );
            }
        }
        store
    }

    /// Insert or replace a task record.
    pub fn upsert(&self, task: Task) {
        self.inner.write().insert(
            task.id.clone(),
            StoredTask {
                task,
                claimed_by: None,
            },
        );
    }
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn fetch_candidates(&self, filter: &CandidateFilter) -> Result<Vec<Task>> {
        let guard = self.inner.read();
        let mut candidates: Vec<Task> = guard
            .values()
            .filter(|stored| stored.task.status == TaskStatus::Pending)
            .filter(|stored| match &filter.categories {
                Some(categories) => categories.iter().any(|c| *c == stored.task.category),
                None => true,
            })
            .map(|stored| stored.task.clone())
            .collect();

        // Map iteration order is arbitrary; make the limit deterministic.
        candidates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = filter.limit {
            candidates.truncate(limit);
        }
        Ok(candidates)
    }

    async fn fetch_all(&self) -> Result<Vec<Task>> {
        Ok(self
            .inner
            .read()
            .values()
            .map(|stored| stored.task.clone())
            .collect())
    }

    async fn claim(&self, task_id: &TaskId, agent_id: &str) -> Result<Task, ClaimError> {
        let mut guard = self.inner.write();
        let stored = guard
            .get_mut(task_id)
            .ok_or_else(|| ClaimError::NotFound(task_id.clone()))?;

        match stored.task.status {
            TaskStatus::Pending => {
                stored.task.status = TaskStatus::Claimed;
                stored.claimed_by = Some(agent_id.to_string());
                Ok(stored.task.clone())
            }
            TaskStatus::Claimed => Err(ClaimError::AlreadyClaimed(
                task_id.clone(),
                stored.claimed_by.clone().unwrap_or_default(),
            )),
            status => Err(ClaimError::NotClaimable(task_id.clone(), status)),
        }
    }
}
