//! Domain logic for the thesis defense backend.
//!
//! Everything in this crate is pure: rule checks, aggregation and report
//! assembly operate on snapshots handed in by the caller, so the same code
//! is shared by the repository layer, the HTTP handlers and unit tests.

pub mod aggregation;
pub mod council;
pub mod error;
pub mod report;
pub mod roles;
pub mod rules;
pub mod scoring;
pub mod search;
pub mod stats;
pub mod thesis;
pub mod types;
