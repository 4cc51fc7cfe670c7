//! # fleet-common
//!
//! Shared types, error definitions, and constants used across the entire
//! Fleet workspace.
//!
//! This crate sits at the leaf of the dependency graph: it depends on no
//! other internal crate and holds the primitives everything else builds on.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod constants;
pub mod error;
pub mod types;
