//! Benchmark helpers for the Galvan workspace.
//!
//! The benches themselves live under `benches/`; this library only
//! provides shared setup.

#![forbid(unsafe_code)]
#![allow(missing_docs)]

use galvan_grid::{gen, World};

/// A randomized arena at the default match size.
pub fn standard_world(seed: u64) -> World {
    let mut world = World::new(320, 320).expect("valid dimensions");
    gen::randomize(&mut world, seed);
    world
}
