//! Test fixtures and helpers for Galvan development.
//!
//! Scenario plumbing shared by the crates' test suites: worlds with
//! hand-placed cells, pre-armed agents, and client-side frame helpers
//! that speak the wire format without pulling in the scheduler.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::*;
