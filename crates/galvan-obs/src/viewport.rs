//! Viewport geometry and extraction.

use std::error::Error;
use std::fmt;

use galvan_core::{Cell, Facing};
use galvan_grid::World;

/// Viewport side used by the standard protocol.
pub const DEFAULT_SIDE: u16 = 13;

/// Errors from [`Viewport::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportError {
    /// The side length must be odd so the viewer sits on the center
    /// column.
    EvenSide {
        /// The rejected side length.
        side: u16,
    },
    /// The side length must be at least 1.
    ZeroSide,
}

impl fmt::Display for ViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EvenSide { side } => {
                write!(f, "viewport side must be odd, got {side}")
            }
            Self::ZeroSide => write!(f, "viewport side must be at least 1"),
        }
    }
}

impl Error for ViewportError {}

/// The wire byte for one cell: owned kinds are biased by `owner - 1`,
/// everything else transmits its kind directly.
pub fn wire_byte(cell: Cell) -> u8 {
    let base = cell.kind as u8;
    if cell.kind.is_owned() {
        base.wrapping_add(cell.owner.wrapping_sub(1))
    } else {
        base
    }
}

/// A fixed, odd-sided square window extractor.
///
/// The window is anchored at the viewing position: the viewer sits at
/// the bottom-center cell, rows extend `side - 1` steps ahead, columns
/// `side / 2` steps to each side. One of four fixed rotations
/// ([`Facing::rotation`]) maps window offsets onto grid offsets, and all
/// grid lookups wrap toroidally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    side: u16,
}

impl Viewport {
    /// Build a viewport of the given odd side length.
    pub fn new(side: u16) -> Result<Self, ViewportError> {
        if side == 0 {
            return Err(ViewportError::ZeroSide);
        }
        if side % 2 == 0 {
            return Err(ViewportError::EvenSide { side });
        }
        Ok(Self { side })
    }

    /// The side length.
    pub fn side(&self) -> u16 {
        self.side
    }

    /// Cells in the window (`side²`).
    pub fn area(&self) -> usize {
        self.side as usize * self.side as usize
    }

    /// Extract the window around `(x, y)` facing `facing`, appending
    /// `area()` cell bytes to `cells` and `area()` damage bytes to
    /// `damage`, in window row-major order (far row first, viewer's left
    /// to right).
    pub fn extract(
        &self,
        world: &World,
        x: i32,
        y: i32,
        facing: Facing,
        cells: &mut Vec<u8>,
        damage: &mut Vec<u8>,
    ) {
        let side = self.side as i32;
        let half = side / 2;
        let rot = facing.rotation();

        cells.reserve(self.area());
        damage.reserve(self.area());
        for sy in (1 - side)..=0 {
            for sx in -half..=half {
                let (ox, oy) = rot.apply(sx, sy);
                let cell = world.cell(x + ox, y + oy);
                cells.push(wire_byte(cell));
                damage.push(cell.damage);
            }
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self { side: DEFAULT_SIDE }
    }
}
