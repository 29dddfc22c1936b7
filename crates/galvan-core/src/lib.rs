//! Core types for the Galvan arena simulation.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! cell model, strongly-typed identifiers, the four cardinal facings with
//! their rotation matrices, and the single-byte wire codes exchanged with
//! agent programs.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod facing;
pub mod id;
pub mod wire;

pub use cell::{Cell, CellKind, DAMAGE_LIMIT, UNOWNED};
pub use facing::{Facing, Rotation, FACINGS};
pub use id::{AgentId, TickId};
pub use wire::{Ack, Action};
