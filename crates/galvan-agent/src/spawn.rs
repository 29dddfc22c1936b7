//! Spawn placement: rejection sampling and the home layout.

use std::error::Error;
use std::fmt;

use galvan_core::{AgentId, Cell, CellKind, Facing, UNOWNED};
use galvan_grid::World;
use rand::{Rng, RngExt};

use crate::registry::Agent;

/// Attempts per attach before giving up. Generous: each attempt is a
/// single 5×5 scan.
const MAX_ATTEMPTS: u32 = 4096;

/// Errors from [`AgentRegistry::attach`](crate::AgentRegistry::attach).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnError {
    /// No position with a fully unowned 5×5 neighborhood was found.
    NoRoom,
    /// The id space (one byte, 0 reserved) is exhausted.
    TooManyAgents,
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRoom => write!(f, "no unowned 5x5 neighborhood available"),
            Self::TooManyAgents => write!(f, "agent id space exhausted"),
        }
    }
}

impl Error for SpawnError {}

/// Whether the 5×5 neighborhood around `(x, y)` is entirely unowned.
fn area_is_free(world: &World, x: i32, y: i32) -> bool {
    for dy in -2..=2 {
        for dx in -2..=2 {
            if world.cell(x + dx, y + dy).owner != UNOWNED {
                return false;
            }
        }
    }
    true
}

/// Find a spot for a new agent and claim it.
///
/// Rejection sampling: random positions are drawn until one has a fully
/// unowned 5×5 neighborhood (bounded by [`MAX_ATTEMPTS`]). The
/// neighborhood is then wiped to empty and the home layout stamped:
/// the agent cell in the center, bases on the ahead diagonals, flag
/// geysers on the behind diagonals — all owned by `id`.
pub(crate) fn place<R: Rng>(
    world: &mut World,
    id: AgentId,
    rng: &mut R,
) -> Result<Agent, SpawnError> {
    let w = world.width() as i32;
    let h = world.height() as i32;

    let mut found = None;
    for _ in 0..MAX_ATTEMPTS {
        let x = rng.random_range(0..w);
        let y = rng.random_range(0..h);
        if area_is_free(world, x, y) {
            found = Some((x, y));
            break;
        }
    }
    let (x, y) = found.ok_or(SpawnError::NoRoom)?;
    let facing = Facing::from_index(rng.random_range(0..4u8));
    Ok(stamp(world, id, x, y, facing))
}

/// Claim a checked position: wipe the 5×5 neighborhood and stamp the
/// home layout.
pub(crate) fn stamp(world: &mut World, id: AgentId, x: i32, y: i32, facing: Facing) -> Agent {
    for dy in -2..=2 {
        for dx in -2..=2 {
            world.set(x + dx, y + dy, Cell::of(CellKind::Empty));
        }
    }

    let rot = facing.rotation();
    world.set(x, y, Cell::owned(CellKind::Agent, id.owner_byte()));
    for sx in [-1, 1] {
        let (ax, ay) = rot.apply(sx, -1);
        world.set(x + ax, y + ay, Cell::owned(CellKind::Base, id.owner_byte()));
        let (bx, by) = rot.apply(sx, 1);
        world.set(
            x + bx,
            y + by,
            Cell::owned(CellKind::FlagGeyser, id.owner_byte()),
        );
    }

    Agent::new(id, x, y, facing)
}

pub(crate) fn place_at(
    world: &mut World,
    id: AgentId,
    x: i32,
    y: i32,
    facing: Facing,
) -> Result<Agent, SpawnError> {
    if !area_is_free(world, x, y) {
        return Err(SpawnError::NoRoom);
    }
    Ok(stamp(world, id, x, y, facing))
}
