//! Group scheduler and run orchestrator.
//!
//! Tasks within one assembly run concurrently under a bounded worker pool;
//! assemblies themselves run strictly one after another, so peak concurrency
//! is one pool's worth and a slow assembly only delays itself.

mod group;
mod run;

pub use group::{run_group, GroupReport};
pub use run::{run_catalog, FailureRecord, RunSummary};
