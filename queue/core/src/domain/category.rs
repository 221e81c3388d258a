// Copyright (c) 2026 forager.dev
// SPDX-License-Identifier: AGPL-3.0
//! Category Taxonomy Domain Service
//!
//! The fixed taxonomy of task categories and the registry that answers
//! every urgency question in the system. Built once at startup, shared by
//! reference, never mutated — safe for unlimited concurrent reads.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Rank lookup, sorted enumeration, legacy priority mapping
//!
//! # Invariants
//!
//! - Ranks form a mostly total order: `error` and `bug` intentionally
//!   share rank 4 (the tie is part of the taxonomy, not an accident).
//! - Lower rank = more urgent.
//! - Unknown keys never fail: they resolve to [`UNKNOWN_CATEGORY_RANK`]
//!   so malformed data sorts last instead of crashing an agent query.

use serde::{Deserialize, Serialize};

use crate::domain::task::Task;

/// Rank sentinel for category keys the taxonomy does not know.
///
/// Deliberately fail-soft: existing agent tooling sorts on the raw rank
/// value, so an unrecognized key must yield a large, stable integer rather
/// than an error.
pub const UNKNOWN_CATEGORY_RANK: u32 = 999;

/// Legacy tri-level priority thresholds (rank ≤ critical / high / medium).
const LEGACY_CRITICAL_MAX: u32 = 5;
const LEGACY_HIGH_MAX: u32 = 9;
const LEGACY_MEDIUM_MAX: u32 = 13;

/// Closed enumeration of the task category taxonomy.
///
/// The wire key is the snake_case variant name (`Category::Bug` ⇔ `"bug"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Blocker,
    Security,
    Hotfix,
    Error,
    Bug,
    Regression,
    Performance,
    Feature,
    Enhancement,
    Refactor,
    Integration,
    Subtask,
    Test,
    Documentation,
    Chore,
    Research,
    Idea,
}

impl Category {
    /// All categories in declaration order. Declaration order is the tie
    /// breaker for equal ranks in [`CategoryRegistry::all_sorted`].
    pub const ALL: [Category; 17] = [
        Category::Blocker,
        Category::Security,
        Category::Hotfix,
        Category::Error,
        Category::Bug,
        Category::Regression,
        Category::Performance,
        Category::Feature,
        Category::Enhancement,
        Category::Refactor,
        Category::Integration,
        Category::Subtask,
        Category::Test,
        Category::Documentation,
        Category::Chore,
        Category::Research,
        Category::Idea,
    ];

    /// The string key used in task records and on the wire.
    pub fn key(self) -> &'static str {
        match self {
            Category::Blocker => "blocker",
            Category::Security => "security",
            Category::Hotfix => "hotfix",
            Category::Error => "error",
            Category::Bug => "bug",
            Category::Regression => "regression",
            Category::Performance => "performance",
            Category::Feature => "feature",
            Category::Enhancement => "enhancement",
            Category::Refactor => "refactor",
            Category::Integration => "integration",
            Category::Subtask => "subtask",
            Category::Test => "test",
            Category::Documentation => "documentation",
            Category::Chore => "chore",
            Category::Research => "research",
            Category::Idea => "idea",
        }
    }

    /// Resolve a raw string key. `None` for keys outside the taxonomy.
    pub fn from_key(key: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.key() == key)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Full definition of one taxonomy entry.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryDefinition {
    pub key: Category,
    /// Urgency rank, ≥ 1. Lower is more urgent.
    pub rank: u32,
    pub name: &'static str,
    pub description: &'static str,
    /// Should surface prominently in agent-facing listings.
    pub urgent: bool,
    /// Work of this category blocks the rest of the queue.
    pub blocking: bool,
    /// Display glyph for human-facing output.
    pub glyph: &'static str,
}

/// Legacy tri-level priority used by older agent tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegacyPriority {
    Critical,
    High,
    Medium,
    Low,
}

/// Immutable category registry.
///
/// Construct once ([`CategoryRegistry::new`]) and pass by reference to
/// every consumer; all methods are read-only.
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    definitions: Vec<CategoryDefinition>,
}

impl CategoryRegistry {
    /// Build the registry with the built-in taxonomy.
    pub fn new() -> Self {
        Self {
            definitions: builtin_definitions(),
        }
    }

    /// Look up the definition for a raw string key.
    pub fn get(&self, key: &str) -> Option<&CategoryDefinition> {
        let category = Category::from_key(key)?;
        self.definitions.iter().find(|d| d.key == category)
    }

    /// Urgency rank for a key. Total: unknown keys map to
    /// [`UNKNOWN_CATEGORY_RANK`], never an error.
    pub fn rank(&self, key: &str) -> u32 {
        self.get(key).map_or(UNKNOWN_CATEGORY_RANK, |d| d.rank)
    }

    /// All definitions ascending by rank. Stable: the `error`/`bug` rank
    /// tie keeps declaration order.
    pub fn all_sorted(&self) -> Vec<&CategoryDefinition> {
        let mut defs: Vec<&CategoryDefinition> = self.definitions.iter().collect();
        defs.sort_by_key(|d| d.rank);
        defs
    }

    /// Whether work in this category blocks the queue. `false` for
    /// unknown keys.
    pub fn is_blocking(&self, key: &str) -> bool {
        self.get(key).is_some_and(|d| d.blocking)
    }

    /// Whether this category is urgent. `false` for unknown keys.
    pub fn is_urgent(&self, key: &str) -> bool {
        self.get(key).is_some_and(|d| d.urgent)
    }

    /// Map a category onto the legacy tri-level priority scale via fixed
    /// rank thresholds. Unknown keys land on `Low` (rank 999).
    pub fn legacy_priority(&self, key: &str) -> LegacyPriority {
        let rank = self.rank(key);
        if rank <= LEGACY_CRITICAL_MAX {
            LegacyPriority::Critical
        } else if rank <= LEGACY_HIGH_MAX {
            LegacyPriority::High
        } else if rank <= LEGACY_MEDIUM_MAX {
            LegacyPriority::Medium
        } else {
            LegacyPriority::Low
        }
    }

    /// Sort tasks ascending by category rank; ties break by `created_at`
    /// descending (newest first). Stable for equal (rank, created_at)
    /// pairs, which makes the sort idempotent.
    pub fn sort_tasks(&self, tasks: &mut [Task]) {
        tasks.sort_by(|a, b| {
            self.rank(&a.category)
                .cmp(&self.rank(&b.category))
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn builtin_definitions() -> Vec<CategoryDefinition> {
    vec![
        CategoryDefinition {
            key: Category::Blocker,
            rank: 1,
            name: "Blocker",
            description: "Work that stops the whole queue until resolved",
            urgent: true,
            blocking: true,
            glyph: "🚧",
        },
        CategoryDefinition {
            key: Category::Security,
            rank: 2,
            name: "Security",
            description: "Vulnerabilities and hardening work",
            urgent: true,
            blocking: true,
            glyph: "🔒",
        },
        CategoryDefinition {
            key: Category::Hotfix,
            rank: 3,
            name: "Hotfix",
            description: "Urgent production fix shipped out of band",
            urgent: true,
            blocking: false,
            glyph: "🔥",
        },
        CategoryDefinition {
            key: Category::Error,
            rank: 4,
            name: "Error",
            description: "Runtime errors surfaced by monitoring",
            urgent: true,
            blocking: false,
            glyph: "❌",
        },
        // Intentional rank tie with `error`: both describe broken behavior
        // and compete at the same urgency; declaration order breaks it.
        CategoryDefinition {
            key: Category::Bug,
            rank: 4,
            name: "Bug",
            description: "Reported defects in existing behavior",
            urgent: true,
            blocking: false,
            glyph: "🐛",
        },
        CategoryDefinition {
            key: Category::Regression,
            rank: 5,
            name: "Regression",
            description: "Previously working behavior that broke",
            urgent: true,
            blocking: false,
            glyph: "↩️",
        },
        CategoryDefinition {
            key: Category::Performance,
            rank: 6,
            name: "Performance",
            description: "Latency, throughput and resource usage work",
            urgent: false,
            blocking: false,
            glyph: "⚡",
        },
        CategoryDefinition {
            key: Category::Feature,
            rank: 7,
            name: "Feature",
            description: "New user-facing functionality",
            urgent: false,
            blocking: false,
            glyph: "✨",
        },
        CategoryDefinition {
            key: Category::Enhancement,
            rank: 8,
            name: "Enhancement",
            description: "Improvements to existing functionality",
            urgent: false,
            blocking: false,
            glyph: "📈",
        },
        CategoryDefinition {
            key: Category::Refactor,
            rank: 9,
            name: "Refactor",
            description: "Internal restructuring without behavior change",
            urgent: false,
            blocking: false,
            glyph: "🔧",
        },
        CategoryDefinition {
            key: Category::Integration,
            rank: 10,
            name: "Integration",
            description: "Wiring against external systems and APIs",
            urgent: false,
            blocking: false,
            glyph: "🔗",
        },
        CategoryDefinition {
            key: Category::Subtask,
            rank: 11,
            name: "Subtask",
            description: "Decomposed slice of a larger task",
            urgent: false,
            blocking: false,
            glyph: "📋",
        },
        CategoryDefinition {
            key: Category::Test,
            rank: 12,
            name: "Test",
            description: "Test coverage and test infrastructure",
            urgent: false,
            blocking: false,
            glyph: "🧪",
        },
        CategoryDefinition {
            key: Category::Documentation,
            rank: 13,
            name: "Documentation",
            description: "Docs, guides and inline documentation",
            urgent: false,
            blocking: false,
            glyph: "📝",
        },
        CategoryDefinition {
            key: Category::Chore,
            rank: 14,
            name: "Chore",
            description: "Routine maintenance and housekeeping",
            urgent: false,
            blocking: false,
            glyph: "🧹",
        },
        CategoryDefinition {
            key: Category::Research,
            rank: 15,
            name: "Research",
            description: "Open-ended investigation before committing to work",
            urgent: false,
            blocking: false,
            glyph: "🔬",
        },
        CategoryDefinition {
            key: Category::Idea,
            rank: 16,
            name: "Idea",
            description: "Unvetted proposals parked for triage",
            urgent: false,
            blocking: false,
            glyph: "💡",
        },
    ]
}
