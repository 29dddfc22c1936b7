//! Cardinal facings and their viewport rotation matrices.

use std::fmt;

/// A 2×2 integer rotation applied to window-local offsets before grid
/// lookup.
///
/// A window offset `(sx, sy)` — `sx` across the viewer's shoulders, `sy`
/// along its line of sight (0 at the viewer, negative ahead) — maps to
/// the grid offset `(xr*sx + xd*sy, yr*sx + yd*sy)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rotation {
    /// Grid-x step per window column.
    pub xr: i32,
    /// Grid-y step per window column.
    pub yr: i32,
    /// Grid-x step per window row.
    pub xd: i32,
    /// Grid-y step per window row.
    pub yd: i32,
}

impl Rotation {
    /// Apply the rotation to a window-local offset.
    pub fn apply(self, sx: i32, sy: i32) -> (i32, i32) {
        (self.xr * sx + self.xd * sy, self.yr * sx + self.yd * sy)
    }
}

/// The direction an agent faces. Grid y grows downward, so North is -y.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Facing {
    /// Toward -y.
    North = 0,
    /// Toward +x.
    East = 1,
    /// Toward +y.
    South = 2,
    /// Toward -x.
    West = 3,
}

/// All facings in turn-right order.
pub const FACINGS: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

impl Facing {
    /// The facing for a cardinality index 0..4 (wraps).
    pub fn from_index(i: u8) -> Self {
        FACINGS[(i % 4) as usize]
    }

    /// Rotate 90° counter-clockwise.
    pub fn turned_left(self) -> Self {
        Self::from_index((self as u8).wrapping_add(3))
    }

    /// Rotate 90° clockwise.
    pub fn turned_right(self) -> Self {
        Self::from_index((self as u8).wrapping_add(1))
    }

    /// Unit grid offset one step ahead.
    pub fn forward(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// The rotation that maps "window up" onto this facing.
    pub fn rotation(self) -> Rotation {
        match self {
            Self::North => Rotation {
                xr: 1,
                yr: 0,
                xd: 0,
                yd: 1,
            },
            Self::East => Rotation {
                xr: 0,
                yr: 1,
                xd: -1,
                yd: 0,
            },
            Self::South => Rotation {
                xr: -1,
                yr: 0,
                xd: 0,
                yd: -1,
            },
            Self::West => Rotation {
                xr: 0,
                yr: -1,
                xd: 1,
                yd: 0,
            },
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_rights_make_a_full_turn() {
        for &start in &FACINGS {
            let mut f = start;
            for _ in 0..4 {
                f = f.turned_right();
            }
            assert_eq!(f, start);
        }
    }

    #[test]
    fn left_undoes_right() {
        for &start in &FACINGS {
            assert_eq!(start.turned_right().turned_left(), start);
            assert_eq!(start.turned_left().turned_right(), start);
        }
    }

    #[test]
    fn rotation_maps_window_up_to_forward() {
        // One row ahead in window coordinates is (sx=0, sy=-1); the
        // rotated grid offset must equal the facing's forward step.
        for &facing in &FACINGS {
            assert_eq!(facing.rotation().apply(0, -1), facing.forward());
        }
    }

    #[test]
    fn rotation_preserves_handedness() {
        // Window-right (sx=1) must be 90° clockwise of forward on a
        // y-down grid.
        for &facing in &FACINGS {
            let (fx, fy) = facing.forward();
            let right = (-fy, fx);
            assert_eq!(facing.rotation().apply(1, 0), right, "{facing}");
        }
    }
}
