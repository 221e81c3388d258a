// Copyright (c) 2026 forager.dev
// SPDX-License-Identifier: AGPL-3.0
//! Task Text Classifier Domain Service
//!
//! Deterministic keyword-weighted heuristics over a task's free text. Not
//! machine learning: the same input text always produces the same output,
//! across calls and across processes.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Complexity estimation and research-need detection
//!
//! Matching is raw substring counting over the lowercased
//! `title + " " + description`. Occurrences are not deduplicated — a title
//! mentioning "api" twice scores twice. The scoring depends on raw counts,
//! so keep it that way.

use forager_core::domain::task::Task;
use serde::{Deserialize, Serialize};

/// Estimated implementation complexity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

/// Keywords signalling architectural or cross-system work (weight 3).
const HIGH_COMPLEXITY_KEYWORDS: &[&str] = &[
    "architecture",
    "system",
    "platform",
    "migration",
    "integration",
    "oauth",
    "security",
    "database",
    "api",
];

/// Keywords signalling substantial but scoped work (weight 2).
const MEDIUM_COMPLEXITY_KEYWORDS: &[&str] = &[
    "refactor",
    "enhance",
    "optimize",
    "implement",
    "feature",
    "component",
    "service",
];

/// Keywords signalling small, mechanical changes (weight 1).
const LOW_COMPLEXITY_KEYWORDS: &[&str] = &[
    "fix", "update", "add", "change", "modify", "adjust",
];

/// Indicators that a task needs investigation before implementation.
/// `best practice` is handled separately (separator-tolerant).
const RESEARCH_INDICATORS: &[&str] = &[
    "new",
    "unknown",
    "investigate",
    "research",
    "analysis",
    "evaluate",
    "approach",
    "solution",
    "design",
    "architecture",
];

const COMPLEXITY_HIGH_THRESHOLD: usize = 6;
const COMPLEXITY_MEDIUM_THRESHOLD: usize = 3;

/// A single incidental indicator is not sufficient signal.
const RESEARCH_SIGNAL_THRESHOLD: usize = 2;

fn normalized_text(task: &Task) -> String {
    format!("{} {}", task.title, task.description).to_lowercase()
}

fn keyword_count(text: &str, keywords: &[&str]) -> usize {
    keywords
        .iter()
        .map(|keyword| text.matches(keyword).count())
        .sum()
}

/// Occurrences of "best practice" tolerating an inserted separator
/// (space, hyphen or underscore).
fn best_practice_count(text: &str) -> usize {
    [" ", "-", "_"]
        .iter()
        .map(|sep| text.matches(&format!("best{sep}practice")).count())
        .sum()
}

/// Estimate complexity from weighted keyword counts.
///
/// `score = 3×high + 2×medium + 1×low`; score ≥ 6 is high, 3–5 medium,
/// anything less low.
pub fn estimate_complexity(task: &Task) -> Complexity {
    let text = normalized_text(task);
    let score = 3 * keyword_count(&text, HIGH_COMPLEXITY_KEYWORDS)
        + 2 * keyword_count(&text, MEDIUM_COMPLEXITY_KEYWORDS)
        + keyword_count(&text, LOW_COMPLEXITY_KEYWORDS);

    if score >= COMPLEXITY_HIGH_THRESHOLD {
        Complexity::High
    } else if score >= COMPLEXITY_MEDIUM_THRESHOLD {
        Complexity::Medium
    } else {
        Complexity::Low
    }
}

/// Whether the task text signals a need for research: at least two
/// indicator occurrences.
pub fn needs_research(task: &Task) -> bool {
    let text = normalized_text(task);
    let signals = keyword_count(&text, RESEARCH_INDICATORS) + best_practice_count(&text);
    signals >= RESEARCH_SIGNAL_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use forager_core::domain::task::{TaskId, TaskStatus};

    fn task(title: &str, description: &str) -> Task {
        Task {
            id: TaskId::from("t"),
            title: title.to_string(),
            description: description.to_string(),
            category: "feature".to_string(),
            status: TaskStatus::Pending,
            dependencies: Vec::new(),
            requires_research: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_high_complexity_from_architectural_keywords() {
        // oauth + integration + architecture → 3 high matches, score ≥ 9.
        let t = task("Implement OAuth integration architecture", "");
        assert_eq!(estimate_complexity(&t), Complexity::High);
    }

    #[test]
    fn test_low_complexity_for_small_changes() {
        // fix + update → score 2.
        let t = task("fix typo", "update label");
        assert_eq!(estimate_complexity(&t), Complexity::Low);
    }

    #[test]
    fn test_medium_complexity_band() {
        // refactor + fix → 2 + 1 = 3.
        let t = task("refactor parser", "fix edge case handling");
        assert_eq!(estimate_complexity(&t), Complexity::Medium);
    }

    #[test]
    fn test_repeated_keywords_are_not_deduplicated() {
        // "api" twice → 3 + 3 = 6 → high.
        let t = task("api cleanup", "consolidate api error payloads");
        assert_eq!(estimate_complexity(&t), Complexity::High);
    }

    #[test]
    fn test_research_detected_with_two_signals() {
        // research + new + approach.
        let t = task("Research new approach", "");
        assert!(needs_research(&t));
    }

    #[test]
    fn test_single_signal_is_not_research() {
        let t = task("New button", "");
        assert!(!needs_research(&t));
    }

    #[test]
    fn test_best_practice_matches_across_separators() {
        assert!(needs_research(&task("Adopt best practice", "evaluate options")));
        assert!(needs_research(&task("Adopt best-practice logging", "evaluate options")));
        assert!(needs_research(&task("best_practice audit", "evaluate options")));
    }

    #[test]
    fn test_classification_is_deterministic() {
        let t = task("Investigate database migration strategy", "unknown scope");
        for _ in 0..3 {
            assert_eq!(estimate_complexity(&t), estimate_complexity(&t));
            assert_eq!(needs_research(&t), needs_research(&t));
        }
    }
}
