// Copyright (c) 2026 forager.dev
// SPDX-License-Identifier: AGPL-3.0
//! Scheduling Pipeline Application Service
//!
//! Orchestrates the full query: admit ready candidates, sort by category
//! rank, annotate each task with swarm metadata, summarize, and package
//! the response agents consume.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Query orchestration and the uniform error boundary
//! - **Dependencies:** Domain (readiness, classifier, metadata), registry
//!
//! # Query Flow
//!
//! ```text
//! candidates ──filter_ready──▶ admitted ──sort_tasks──▶ ranked
//!     ranked ──build_swarm_metadata──▶ enhanced (swarmPriority = index+1)
//!   enhanced ──summarize──▶ swarmCoordination
//! ```
//!
//! Sorting happens inside the pipeline, not in the caller: an unsorted
//! candidate list still yields correct priority ranking, and a pre-sorted
//! one is untouched (the sort is stable and idempotent).
//!
//! Hard failures (malformed records from the store) never escape as a
//! crash: [`SchedulingPipeline::respond`] converts them into a structurally
//! valid `success: false` response agents can pattern-match on.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use forager_core::domain::category::CategoryRegistry;
use forager_core::domain::task::Task;

use crate::application::coordination::{self, AgentGuidance, CoordinationSummary, WORKFLOW_TIP};
use crate::domain::metadata::{build_swarm_metadata, EnhancedTask};
use crate::domain::readiness;

/// Default entry-point identity used in claim commands when the caller
/// does not say how it was invoked.
pub const DEFAULT_SCRIPT_PATH: &str = "forager";

/// Recognized query options with explicit defaults. Replaces the loose
/// options bag: unknown fields have nowhere to hide.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryOptions {
    /// Identity of the querying agent; substituted into claim commands.
    pub agent_id: Option<String>,
    /// Category filter the store applied (echoed, not re-applied).
    pub categories: Option<Vec<String>>,
    /// Specialization filter the store applied (echoed, not re-applied).
    pub specializations: Option<Vec<String>>,
    /// Candidate cap the store applied (echoed, not re-applied).
    pub limit: Option<usize>,
    /// When true, blocked tasks stay in the list for diagnostics.
    pub include_blocked: bool,
    /// How agents should invoke the claim command.
    pub script_path: String,
    /// How many tasks are currently out with agents (store-supplied).
    pub claimed_tasks_count: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            agent_id: None,
            categories: None,
            specializations: None,
            limit: None,
            include_blocked: false,
            script_path: DEFAULT_SCRIPT_PATH.to_string(),
            claimed_tasks_count: 0,
        }
    }
}

/// Echo of the filters that shaped the candidate list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterApplied {
    pub agent_id: Option<String>,
    pub categories: Option<Vec<String>>,
    pub specializations: Option<Vec<String>>,
    pub limit: Option<usize>,
    pub include_blocked: bool,
}

impl From<&QueryOptions> for FilterApplied {
    fn from(options: &QueryOptions) -> Self {
        Self {
            agent_id: options.agent_id.clone(),
            categories: options.categories.clone(),
            specializations: options.specializations.clone(),
            limit: options.limit,
            include_blocked: options.include_blocked,
        }
    }
}

/// Successful query response. Field names and nesting are the external
/// contract; preserve them bit-for-bit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub success: bool,
    pub tasks: Vec<EnhancedTask>,
    pub swarm_coordination: CoordinationSummary,
    pub filter_applied: FilterApplied,
    pub timestamp: DateTime<Utc>,
}

/// Coordination block of the error response: guidance only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorCoordination {
    pub agent_guidance: AgentGuidance,
}

/// Uniform failure response. Always structurally valid, whatever went
/// wrong, so agents can branch on `success` without a second schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub swarm_coordination: ErrorCoordination,
}

/// Either arm of the query boundary.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum QueryResult {
    Success(Box<QueryResponse>),
    Failure(ErrorResponse),
}

impl QueryResult {
    pub fn succeeded(&self) -> bool {
        matches!(self, QueryResult::Success(_))
    }
}

/// The scheduling pipeline. Pure computation over its arguments and the
/// immutable registry; safe for concurrent use without synchronization.
pub struct SchedulingPipeline {
    registry: CategoryRegistry,
}

impl SchedulingPipeline {
    pub fn new() -> Self {
        Self {
            registry: CategoryRegistry::new(),
        }
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    /// Process a well-formed candidate list into a query response.
    ///
    /// Never fails: soft conditions (unknown categories, unresolvable
    /// dependencies, absent agent id) all have documented defaults.
    pub fn process(
        &self,
        available_tasks: Vec<Task>,
        all_tasks: &[Task],
        options: &QueryOptions,
    ) -> QueryResponse {
        let mut admitted =
            readiness::filter_ready(available_tasks, all_tasks, options.include_blocked);
        self.registry.sort_tasks(&mut admitted);

        let agent_id = options.agent_id.as_deref();
        let enhanced: Vec<EnhancedTask> = admitted
            .into_iter()
            .enumerate()
            .map(|(index, task)| {
                let swarm_metadata = build_swarm_metadata(
                    &self.registry,
                    &task,
                    index + 1,
                    all_tasks,
                    agent_id,
                    &options.script_path,
                );
                EnhancedTask {
                    task,
                    swarm_metadata,
                }
            })
            .collect();

        let summary = coordination::summarize(&enhanced, options.claimed_tasks_count);

        debug!(
            available = enhanced.len(),
            claimed = options.claimed_tasks_count,
            include_blocked = options.include_blocked,
            "scheduling query processed"
        );
        metrics::counter!("forager_swarm_queries_total").increment(1);

        QueryResponse {
            success: true,
            tasks: enhanced,
            swarm_coordination: summary,
            filter_applied: options.into(),
            timestamp: Utc::now(),
        }
    }

    /// Query boundary over raw store output. Deserialization faults — the
    /// one hard failure this core can see — become the uniform error
    /// response instead of propagating.
    pub fn respond(
        &self,
        candidates: Vec<Value>,
        universe: Vec<Value>,
        options: &QueryOptions,
    ) -> QueryResult {
        match self.try_respond(candidates, universe, options) {
            Ok(response) => QueryResult::Success(Box::new(response)),
            Err(error) => {
                warn!(error = %error, "scheduling query failed");
                metrics::counter!("forager_swarm_query_failures_total").increment(1);
                QueryResult::Failure(Self::error_response(&error))
            }
        }
    }

    fn try_respond(
        &self,
        candidates: Vec<Value>,
        universe: Vec<Value>,
        options: &QueryOptions,
    ) -> Result<QueryResponse> {
        let available: Vec<Task> = candidates
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<_, _>>()
            .context("malformed task record in candidate list")?;
        let all_tasks: Vec<Task> = universe
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<_, _>>()
            .context("malformed task record in task universe")?;

        Ok(self.process(available, &all_tasks, options))
    }

    /// Build the uniform failure response.
    pub fn error_response(error: &anyhow::Error) -> ErrorResponse {
        ErrorResponse {
            success: false,
            error: format!("{error:#}"),
            swarm_coordination: ErrorCoordination {
                agent_guidance: AgentGuidance {
                    message: "Task scheduling query failed".to_string(),
                    next_action: "Retry the query; if the failure persists, inspect the task store"
                        .to_string(),
                    workflow_tip: WORKFLOW_TIP.to_string(),
                },
            },
        }
    }
}

impl Default for SchedulingPipeline {
    fn default() -> Self {
        Self::new()
    }
}
