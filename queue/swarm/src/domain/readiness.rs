// Copyright (c) 2026 forager.dev
// SPDX-License-Identifier: AGPL-3.0
//! Dependency Readiness Domain Service
//!
//! Admission logic: a task may be claimed only when every task it depends
//! on has reached `completed`. A dependency id that resolves to nothing in
//! the visible universe counts as unmet — fail-closed, because recommending
//! a task whose prerequisite we cannot see is worse than holding it back.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Readiness filtering and blocked-dependency reporting
//!
//! No cycle detection: a task depending on itself, or two tasks depending
//! on each other, simply resolve independently by status and stay blocked
//! until the store says otherwise. Resolution is a linear scan per
//! dependency, O(|dependencies| × |all_tasks|) — fine at the scales this
//! queue targets.

use forager_core::domain::task::{Task, TaskId, TaskStatus};

/// Whether a single dependency id is satisfied within `all_tasks`.
fn dependency_completed(dep: &TaskId, all_tasks: &[Task]) -> bool {
    all_tasks
        .iter()
        .find(|t| t.id == *dep)
        .is_some_and(|t| t.status == TaskStatus::Completed)
}

/// Whether a task is ready to be claimed: no dependencies, or every
/// dependency resolves to a completed task.
pub fn is_ready(task: &Task, all_tasks: &[Task]) -> bool {
    task.dependencies
        .iter()
        .all(|dep| dependency_completed(dep, all_tasks))
}

/// Keep only the tasks that are ready to claim.
///
/// `include_blocked` short-circuits to the identity — used when the caller
/// explicitly wants the full picture for diagnostics.
pub fn filter_ready(tasks: Vec<Task>, all_tasks: &[Task], include_blocked: bool) -> Vec<Task> {
    if include_blocked {
        return tasks;
    }
    tasks
        .into_iter()
        .filter(|task| is_ready(task, all_tasks))
        .collect()
}

/// Dependency ids currently holding a task back: target missing from the
/// universe, or present but not completed.
///
/// Reporting counterpart of [`is_ready`] — it enumerates rather than
/// gates, so metadata can tell an agent exactly what it is waiting on.
pub fn blocked_dependencies(task: &Task, all_tasks: &[Task]) -> Vec<TaskId> {
    task.dependencies
        .iter()
        .filter(|dep| !dependency_completed(dep, all_tasks))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn task(id: &str, status: TaskStatus, deps: &[&str]) -> Task {
        Task {
            id: TaskId::from(id),
            title: format!("task {id}"),
            description: String::new(),
            category: "feature".to_string(),
            status,
            dependencies: deps.iter().map(|d| TaskId::from(*d)).collect(),
            requires_research: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_filter_ready_empty_input() {
        let all = vec![task("a", TaskStatus::Completed, &[])];
        assert!(filter_ready(Vec::new(), &all, false).is_empty());
    }

    #[test]
    fn test_no_dependencies_is_always_ready() {
        let t = task("a", TaskStatus::Pending, &[]);
        let out = filter_ready(vec![t.clone()], &[], false);
        assert_eq!(out, vec![t]);
    }

    #[test]
    fn test_completed_dependencies_admit() {
        let all = vec![
            task("dep-1", TaskStatus::Completed, &[]),
            task("dep-2", TaskStatus::Completed, &[]),
        ];
        let t = task("a", TaskStatus::Pending, &["dep-1", "dep-2"]);
        assert!(is_ready(&t, &all));
    }

    #[test]
    fn test_incomplete_dependency_blocks() {
        let all = vec![
            task("dep-1", TaskStatus::Completed, &[]),
            task("dep-2", TaskStatus::InProgress, &[]),
        ];
        let t = task("a", TaskStatus::Pending, &["dep-1", "dep-2"]);
        assert!(!is_ready(&t, &all));
        assert_eq!(blocked_dependencies(&t, &all), vec![TaskId::from("dep-2")]);
    }

    #[test]
    fn test_unresolvable_dependency_is_unmet() {
        // "X" exists nowhere in the universe: excluded from admission and
        // reported as blocked.
        let all = vec![task("a", TaskStatus::Pending, &["X"])];
        let t = task("a", TaskStatus::Pending, &["X"]);

        assert!(filter_ready(vec![t.clone()], &all, false).is_empty());
        assert_eq!(blocked_dependencies(&t, &all), vec![TaskId::from("X")]);
    }

    #[test]
    fn test_include_blocked_is_identity() {
        let t = task("a", TaskStatus::Pending, &["missing"]);
        let out = filter_ready(vec![t.clone()], &[], true);
        assert_eq!(out, vec![t]);
    }

    #[test]
    fn test_mutual_dependency_blocks_both_without_error() {
        let all = vec![
            task("a", TaskStatus::Pending, &["b"]),
            task("b", TaskStatus::Pending, &["a"]),
        ];
        let candidates = vec![
            task("a", TaskStatus::Pending, &["b"]),
            task("b", TaskStatus::Pending, &["a"]),
        ];
        assert!(filter_ready(candidates, &all, false).is_empty());
    }
}
