// Copyright (c) 2026 forager.dev
// SPDX-License-Identifier: AGPL-3.0
//! Mod
//!
//! Provides mod functionality for the system.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Implements mod

pub mod coordination;
pub mod pipeline;
