//! Error types for grid construction.

use std::error::Error;
use std::fmt;

/// Largest accepted grid side. Keeps `width * height` comfortably inside
/// `usize` and coordinate arithmetic inside `i32` on every target.
pub const MAX_SIDE: u32 = 1 << 15;

/// Errors from [`World::new`](crate::World::new).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridError {
    /// Width or height is zero.
    EmptyGrid {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// Width or height exceeds [`MAX_SIDE`].
    SideTooLarge {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { width, height } => {
                write!(f, "grid dimensions must be non-zero, got {width}x{height}")
            }
            Self::SideTooLarge { width, height } => {
                write!(
                    f,
                    "grid side exceeds maximum of {MAX_SIDE}, got {width}x{height}"
                )
            }
        }
    }
}

impl Error for GridError {}
