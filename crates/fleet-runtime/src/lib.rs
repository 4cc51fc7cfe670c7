//! # fleet-runtime
//!
//! The environment abstraction layer: one operation vocabulary resolved
//! against three structurally different backends (local processes, a
//! docker-compose group, a Kubernetes cluster).
//!
//! All backend-specific knowledge lives behind the
//! [`backend::ServiceBackend`] trait; mode dispatch happens exactly once,
//! at adapter-selection time, so the engine, registry, and monitor loop
//! stay backend-agnostic.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod backend;
pub mod detect;
pub mod engine;
pub mod exec;
pub mod monitor;
pub mod probe;
