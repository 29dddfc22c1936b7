//! Agent records, registry, and spawn placement for Galvan.
//!
//! Each attached agent program is represented by an [`Agent`]: its cell
//! in the world, protocol bookkeeping (last timestamp sent, pending
//! acknowledgement), and the two byte queues the scheduler moves wire
//! traffic through. The [`AgentRegistry`] keeps agents in attach order
//! with stable 1-based ids.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod registry;
mod spawn;

pub use registry::{Agent, AgentRegistry};
pub use spawn::SpawnError;
