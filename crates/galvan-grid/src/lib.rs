//! Toroidal grid world and cellular-automaton engine for Galvan.
//!
//! The [`World`] holds a flat, row-major array of cells addressed through
//! a [`Torus`] (all coordinates wrap), evolves one synchronous generation
//! per [`World::step`] using double-buffered updates, and records
//! flag-loss events for the scheduler to drain once per tick.
//!
//! The transition rule is a wire-CA: electrons run along conductors,
//! decay through a one-step tail, and — when fired next to owned flags —
//! condense into photons that claim territory.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod ca;
pub mod error;
pub mod gen;
pub mod torus;
pub mod world;

pub use error::GridError;
pub use torus::Torus;
pub use world::{LossList, World};
