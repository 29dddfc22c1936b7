//! The double-buffered world.

use galvan_core::{AgentId, Cell, TickId};
use smallvec::SmallVec;

use crate::ca;
use crate::error::GridError;
use crate::torus::Torus;

/// Flag owners who lost territory this tick, in discovery order.
///
/// Inline capacity covers simultaneous losses on realistic grids without
/// allocating; larger bursts spill to the heap.
pub type LossList = SmallVec<[AgentId; 8]>;

/// The simulation world: a toroidal cell grid plus its tick counter and
/// the per-tick loss list.
///
/// Two equally-sized buffers alternate the "live" role: [`World::step`]
/// writes every successor cell into the scratch buffer while reading only
/// the live one, then swaps them in O(1). Because the pass writes every
/// scratch cell (terminal kinds copy through unchanged), the buffers
/// never disagree after a swap.
#[derive(Clone, Debug)]
pub struct World {
    torus: Torus,
    cells: Vec<Cell>,
    scratch: Vec<Cell>,
    tick: TickId,
    losses: LossList,
}

impl World {
    /// Allocate an empty world. Fails only on invalid dimensions; this is
    /// the startup-only fatal path.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        let torus = Torus::new(width, height)?;
        let n = torus.cell_count();
        Ok(Self {
            torus,
            cells: vec![Cell::default(); n],
            scratch: vec![Cell::default(); n],
            tick: TickId(0),
            losses: LossList::new(),
        })
    }

    /// The wrapping address space.
    pub fn torus(&self) -> Torus {
        self.torus
    }

    /// Grid width.
    pub fn width(&self) -> u32 {
        self.torus.width()
    }

    /// Grid height.
    pub fn height(&self) -> u32 {
        self.torus.height()
    }

    /// Current world tick.
    pub fn tick(&self) -> TickId {
        self.tick
    }

    /// Read the cell at a (wrapping) coordinate.
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        self.cells[self.torus.index(x, y)]
    }

    /// Write the cell at a (wrapping) coordinate.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        let idx = self.torus.index(x, y);
        self.cells[idx] = cell;
    }

    /// The live buffer, row-major. Intended for renderers and tests.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Mutable access to the cell at a (wrapping) coordinate.
    ///
    /// Used by the protocol codec to apply agent actions between ticks.
    pub fn cell_mut(&mut self, x: i32, y: i32) -> &mut Cell {
        let idx = self.torus.index(x, y);
        &mut self.cells[idx]
    }

    /// Advance the world exactly one synchronous generation.
    ///
    /// Total: never fails on a constructed world. Loss events discovered
    /// during the pass accumulate in the loss list until
    /// [`World::drain_losses`] is called.
    pub fn step(&mut self) {
        let w = self.torus.width() as i32;
        let h = self.torus.height() as i32;

        let mut scratch = std::mem::take(&mut self.scratch);
        let mut i = 0;
        for y in 0..h {
            for x in 0..w {
                scratch[i] = ca::successor(self.torus, &self.cells, x, y, &mut self.losses);
                i += 1;
            }
        }
        self.scratch = scratch;
        std::mem::swap(&mut self.cells, &mut self.scratch);
        self.tick = self.tick.next();
    }

    /// Take the accumulated loss list, leaving it empty.
    pub fn drain_losses(&mut self) -> LossList {
        std::mem::take(&mut self.losses)
    }
}
