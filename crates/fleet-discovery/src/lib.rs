//! # fleet-discovery
//!
//! Structural service discovery over the filesystem convention: a
//! subdirectory of the services root qualifies as a service iff it
//! contains the application entry marker. Discovery never consults
//! liveness; stopped or broken services are still discovered.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod envfile;
pub mod registry;

pub use registry::discover;
