// Copyright (c) 2026 forager.dev
// SPDX-License-Identifier: AGPL-3.0
//! # `forager-core` — Task Queue Domain Primitives
//!
//! Shared domain vocabulary for the forager task queue: the task record as
//! the persistence store hands it to us, the immutable category taxonomy
//! that defines urgency, and the port every store backend implements.
//!
//! ## Crate Layout
//!
//! | Module | Layer | Contents |
//! |--------|-------|----------|
//! | [`domain::task`] | Domain | `Task`, `TaskId`, `TaskStatus` value objects |
//! | [`domain::category`] | Domain | `Category` taxonomy and `CategoryRegistry` |
//! | [`domain::store`] | Domain | `TaskStore` port and `ClaimError` |
//!
//! Everything here is pure data plus read-only lookups; the engine that
//! consumes it lives in `forager-swarm`.

pub mod domain;

pub use domain::*;
