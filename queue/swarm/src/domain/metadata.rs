// Copyright (c) 2026 forager.dev
// SPDX-License-Identifier: AGPL-3.0
//! Swarm Metadata
//!
//! The per-task annotation bundle agents read to decide what to claim.
//! Derived, attached as an overlay on a copy of the task, never persisted.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Compose rank, admission, classification into `SwarmMetadata`
//!
//! Field names are part of the external JSON contract consumed by agent
//! tooling (`swarmPriority`, `categoryPriority`, …) and must not change.

use forager_core::domain::category::CategoryRegistry;
use forager_core::domain::task::{Task, TaskId};
use serde::{Deserialize, Serialize};

use crate::domain::classifier::{self, Complexity};
use crate::domain::readiness;

/// Token substituted into the claim command when the querying agent did
/// not identify itself.
pub const AGENT_ID_PLACEHOLDER: &str = "<agent-id>";

/// Advisory instructions for claiming a task.
///
/// The command is plain text, not an enforcement mechanism: the store's
/// atomic claim primitive is the only arbiter. Callers are advised to wrap
/// the external invocation in a timeout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimingInstructions {
    /// Literal invocation: `"<script> claim <taskId> <agentId>"`.
    pub command: String,
    pub required_parameters: Vec<String>,
    pub optional_parameters: Vec<String>,
}

/// Coordination metadata derived for one task in the candidate list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwarmMetadata {
    /// Dense 1-based position in the admitted candidate list.
    pub swarm_priority: usize,
    /// Category rank from the registry (999 for unknown categories).
    pub category_priority: u32,
    pub is_highest_priority: bool,
    pub estimated_complexity: Complexity,
    pub requires_research: bool,
    /// Dependency ids currently holding this task back.
    pub blocked_dependencies: Vec<TaskId>,
    pub claiming_instructions: ClaimingInstructions,
}

/// A task with its swarm metadata overlay. The original record is copied,
/// never mutated; the store keeps owning the source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedTask {
    #[serde(flatten)]
    pub task: Task,
    #[serde(rename = "swarmMetadata")]
    pub swarm_metadata: SwarmMetadata,
}

/// Build the metadata bundle for one task.
///
/// Every input has a documented fallback — absent `agent_id` becomes a
/// placeholder token, unknown categories rank 999, unresolvable
/// dependencies are listed as blocked — so this never fails.
pub fn build_swarm_metadata(
    registry: &CategoryRegistry,
    task: &Task,
    priority: usize,
    all_tasks: &[Task],
    agent_id: Option<&str>,
    script_path: &str,
) -> SwarmMetadata {
    // An explicit flag on the record wins; the heuristic only ever adds.
    let requires_research =
        task.requires_research.unwrap_or(false) || classifier::needs_research(task);

    let agent = agent_id.unwrap_or(AGENT_ID_PLACEHOLDER);

    SwarmMetadata {
        swarm_priority: priority,
        category_priority: registry.rank(&task.category),
        is_highest_priority: priority == 1,
        estimated_complexity: classifier::estimate_complexity(task),
        requires_research,
        blocked_dependencies: readiness::blocked_dependencies(task, all_tasks),
        claiming_instructions: ClaimingInstructions {
            command: format!("{script_path} claim {} {agent}", task.id),
            required_parameters: vec!["taskId".to_string(), "agentId".to_string()],
            optional_parameters: vec!["priority".to_string()],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use forager_core::domain::task::TaskStatus;

    fn task(id: &str, category: &str) -> Task {
        Task {
            id: TaskId::from(id),
            title: "Adjust spacing".to_string(),
            description: String::new(),
            category: category.to_string(),
            status: TaskStatus::Pending,
            dependencies: Vec::new(),
            requires_research: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_priority_one_is_highest() {
        let registry = CategoryRegistry::new();
        let t = task("t1", "bug");
        let meta = build_swarm_metadata(&registry, &t, 1, &[], Some("agent-7"), "forager");
        assert_eq!(meta.swarm_priority, 1);
        assert!(meta.is_highest_priority);
        assert_eq!(meta.category_priority, 4);

        let meta2 = build_swarm_metadata(&registry, &t, 2, &[], Some("agent-7"), "forager");
        assert!(!meta2.is_highest_priority);
    }

    #[test]
    fn test_claim_command_format() {
        let registry = CategoryRegistry::new();
        let t = task("task-042", "feature");
        let meta = build_swarm_metadata(&registry, &t, 3, &[], Some("agent-7"), "forager");
        assert_eq!(meta.claiming_instructions.command, "forager claim task-042 agent-7");
        assert_eq!(meta.claiming_instructions.required_parameters, ["taskId", "agentId"]);
        assert_eq!(meta.claiming_instructions.optional_parameters, ["priority"]);
    }

    #[test]
    fn test_absent_agent_id_uses_placeholder() {
        let registry = CategoryRegistry::new();
        let t = task("task-042", "feature");
        let meta = build_swarm_metadata(&registry, &t, 1, &[], None, "forager");
        assert_eq!(
            meta.claiming_instructions.command,
            "forager claim task-042 <agent-id>"
        );
    }

    #[test]
    fn test_explicit_research_flag_wins_over_heuristic() {
        let registry = CategoryRegistry::new();
        let mut t = task("t1", "bug");
        // Text alone carries no research signal.
        t.requires_research = Some(true);
        let meta = build_swarm_metadata(&registry, &t, 1, &[], None, "forager");
        assert!(meta.requires_research);
    }

    #[test]
    fn test_unresolvable_dependency_listed_as_blocked() {
        let registry = CategoryRegistry::new();
        let mut t = task("t1", "bug");
        t.dependencies = vec![TaskId::from("ghost")];
        let meta = build_swarm_metadata(&registry, &t, 1, &[], None, "forager");
        assert_eq!(meta.blocked_dependencies, vec![TaskId::from("ghost")]);
    }

    #[test]
    fn test_unknown_category_gets_sentinel_rank() {
        let registry = CategoryRegistry::new();
        let t = task("t1", "mystery");
        let meta = build_swarm_metadata(&registry, &t, 1, &[], None, "forager");
        assert_eq!(meta.category_priority, 999);
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let registry = CategoryRegistry::new();
        let t = task("t1", "bug");
        let meta = build_swarm_metadata(&registry, &t, 1, &[], None, "forager");
        let value = serde_json::to_value(&meta).unwrap();

        assert!(value.get("swarmPriority").is_some());
        assert!(value.get("categoryPriority").is_some());
        assert!(value.get("isHighestPriority").is_some());
        assert!(value.get("estimatedComplexity").is_some());
        assert!(value.get("requiresResearch").is_some());
        assert!(value.get("blockedDependencies").is_some());
        let claiming = value.get("claimingInstructions").unwrap();
        assert!(claiming.get("requiredParameters").is_some());
        assert!(claiming.get("optionalParameters").is_some());
    }
}
