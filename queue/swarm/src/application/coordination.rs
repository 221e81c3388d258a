// Copyright (c) 2026 forager.dev
// SPDX-License-Identifier: AGPL-3.0
//! Coordination Summarizer Application Service
//!
//! Aggregates an ordered, already-enhanced candidate list into swarm-wide
//! guidance: counts, the next recommended task, and human-readable nudges
//! agents echo into their logs.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Swarm-wide summary over the enhanced candidate list
//!
//! The summarizer trusts the input order — the pipeline has already sorted
//! by category rank — and never re-sorts.

use serde::{Deserialize, Serialize};

use crate::domain::metadata::EnhancedTask;

/// Static reminder attached to every guidance block.
pub const WORKFLOW_TIP: &str =
    "Claim tasks in ascending swarmPriority order to avoid collisions with other agents";

/// Candidate counts per tracked category bucket.
///
/// Tracks the four top-level work types only; candidates outside them are
/// counted in the totals but not in the distribution. Consumers rely on
/// exactly these four keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskDistribution {
    pub error: usize,
    pub feature: usize,
    pub subtask: usize,
    pub test: usize,
}

impl TaskDistribution {
    fn tally(tasks: &[EnhancedTask]) -> Self {
        let mut distribution = TaskDistribution::default();
        for enhanced in tasks {
            match enhanced.task.category.as_str() {
                "error" => distribution.error += 1,
                "feature" => distribution.feature += 1,
                "subtask" => distribution.subtask += 1,
                "test" => distribution.test += 1,
                _ => {}
            }
        }
        distribution
    }
}

/// Human-readable nudges for the querying agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentGuidance {
    pub message: String,
    pub next_action: String,
    pub workflow_tip: String,
}

/// Swarm-wide coordination summary for one query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinationSummary {
    pub total_available_tasks: usize,
    pub total_claimed_tasks: usize,
    /// Head of the candidate list, if any. Agents race on this; the store's
    /// atomic claim decides the winner.
    pub next_recommended_task: Option<EnhancedTask>,
    pub task_distribution: TaskDistribution,
    pub agent_guidance: AgentGuidance,
}

/// Summarize an ordered candidate list. `claimed_count` is caller-supplied
/// (the store knows how many tasks are out with agents), not recomputed.
pub fn summarize(enhanced_tasks: &[EnhancedTask], claimed_count: usize) -> CoordinationSummary {
    let agent_guidance = match enhanced_tasks.first() {
        Some(next) => AgentGuidance {
            message: format!(
                "{} task(s) ready for claiming",
                enhanced_tasks.len()
            ),
            next_action: format!("Claim task {}", next.task.id),
            workflow_tip: WORKFLOW_TIP.to_string(),
        },
        None => AgentGuidance {
            message: "No tasks are currently available for claiming".to_string(),
            next_action: "Wait for new tasks or check that the queue has been initialized"
                .to_string(),
            workflow_tip: WORKFLOW_TIP.to_string(),
        },
    };

    CoordinationSummary {
        total_available_tasks: enhanced_tasks.len(),
        total_claimed_tasks: claimed_count,
        next_recommended_task: enhanced_tasks.first().cloned(),
        task_distribution: TaskDistribution::tally(enhanced_tasks),
        agent_guidance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metadata::build_swarm_metadata;
    use chrono::{TimeZone, Utc};
    use forager_core::domain::category::CategoryRegistry;
    use forager_core::domain::task::{Task, TaskId, TaskStatus};

    fn enhanced(id: &str, category: &str, priority: usize) -> EnhancedTask {
        let task = Task {
            id: TaskId::from(id),
            title: format!("task {id}"),
            description: String::new(),
            category: category.to_string(),
            status: TaskStatus::Pending,
            dependencies: Vec::new(),
            requires_research: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap(),
        };
        let registry = CategoryRegistry::new();
        let swarm_metadata =
            build_swarm_metadata(&registry, &task, priority, &[], None, "forager");
        EnhancedTask { task, swarm_metadata }
    }

    #[test]
    fn test_empty_list_yields_idle_guidance() {
        let summary = summarize(&[], 0);
        assert_eq!(summary.total_available_tasks, 0);
        assert!(summary.next_recommended_task.is_none());
        assert!(summary.agent_guidance.message.contains("No tasks"));
        assert!(summary.agent_guidance.next_action.contains("Wait"));
        assert_eq!(summary.agent_guidance.workflow_tip, WORKFLOW_TIP);
    }

    #[test]
    fn test_head_of_list_is_recommended() {
        let tasks = vec![enhanced("t1", "error", 1), enhanced("t2", "feature", 2)];
        let summary = summarize(&tasks, 3);
        let next = summary.next_recommended_task.unwrap();
        assert_eq!(next.task.id, TaskId::from("t1"));
        assert_eq!(summary.total_available_tasks, 2);
        assert_eq!(summary.total_claimed_tasks, 3);
        assert!(summary.agent_guidance.next_action.contains("t1"));
    }

    #[test]
    fn test_distribution_counts_tracked_buckets_only() {
        let tasks = vec![
            enhanced("t1", "error", 1),
            enhanced("t2", "error", 2),
            enhanced("t3", "feature", 3),
            enhanced("t4", "subtask", 4),
            enhanced("t5", "test", 5),
            enhanced("t6", "documentation", 6),
        ];
        let summary = summarize(&tasks, 0);
        assert_eq!(summary.task_distribution.error, 2);
        assert_eq!(summary.task_distribution.feature, 1);
        assert_eq!(summary.task_distribution.subtask, 1);
        assert_eq!(summary.task_distribution.test, 1);
        // documentation is outside the tracked buckets but still in totals.
        assert_eq!(summary.total_available_tasks, 6);
    }

    #[test]
    fn test_summarize_does_not_reorder() {
        // Deliberately "wrong" order: the summarizer must trust it.
        let tasks = vec![enhanced("t-low", "idea", 1), enhanced("t-high", "blocker", 2)];
        let summary = summarize(&tasks, 0);
        assert_eq!(
            summary.next_recommended_task.unwrap().task.id,
            TaskId::from("t-low")
        );
    }
}
