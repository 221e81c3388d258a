// Copyright (c) 2026 forager.dev
// SPDX-License-Identifier: AGPL-3.0
//! # `forager-swarm` — Priority-Ranking and Swarm-Admission Engine
//!
//! Decides, for a pool of autonomous worker agents pulling from a shared
//! queue, "what to do next": which tasks are claimable given their
//! dependencies, in what urgency order, how complex they look, and the
//! coordination metadata that lets agents agree without a central
//! orchestrator.
//!
//! ## Crate Layout
//!
//! | Module | Layer | Contents |
//! |--------|-------|----------|
//! | [`domain::readiness`] | Domain | dependency-closure admission |
//! | [`domain::classifier`] | Domain | complexity / research heuristics |
//! | [`domain::metadata`] | Domain | `SwarmMetadata` bundle and builder |
//! | [`application::coordination`] | Application | swarm-wide summary |
//! | [`application::pipeline`] | Application | `SchedulingPipeline` query boundary |
//! | [`infrastructure::memory_store`] | Infrastructure | in-memory `TaskStore` |
//!
//! ## Key Concepts
//!
//! - **Admission**: a task is claimable only when every dependency is
//!   `completed`. Unresolvable dependency ids count as unmet (fail-closed).
//! - **Swarm priority**: dense 1-based position in the admitted, rank-sorted
//!   candidate list. Position 1 is the recommendation.
//! - **Claim**: the store's atomic `pending → claimed` transition. This
//!   crate only recommends; `claimingInstructions` is advisory text.
//!
//! The whole engine is pure computation over caller-owned inputs: no locks,
//! no I/O, no hidden state. Safe to invoke concurrently from any number of
//! threads.

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;
