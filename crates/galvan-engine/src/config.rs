//! Engine configuration, validation, and attach errors.

use std::error::Error;
use std::fmt;
use std::time::Duration;

use galvan_agent::SpawnError;
use galvan_grid::{GridError, Torus};
use galvan_obs::{Viewport, ViewportError, DEFAULT_SIDE};

/// Hard ceiling on attached agents.
///
/// Owner ids live in one byte with 0 reserved for "unowned", and the
/// viewport biases owned-cell bytes by `owner - 1` on top of the largest
/// cell-kind discriminant; 247 keeps every biased byte inside `u8`.
pub const MAX_AGENTS: u8 = 247;

/// Errors detected by [`EngineConfig::validate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Grid dimensions are unusable.
    Grid(GridError),
    /// Viewport side is unusable.
    Viewport(ViewportError),
    /// The per-turn timeout is zero.
    ZeroTimeout,
    /// `max_agents` is zero or above [`MAX_AGENTS`].
    AgentCapacity {
        /// The rejected value.
        configured: u8,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::Viewport(e) => write!(f, "viewport: {e}"),
            Self::ZeroTimeout => write!(f, "turn timeout must be non-zero"),
            Self::AgentCapacity { configured } => {
                write!(f, "max_agents must be in 1..={MAX_AGENTS}, got {configured}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Viewport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<ViewportError> for ConfigError {
    fn from(e: ViewportError) -> Self {
        Self::Viewport(e)
    }
}

/// Errors from [`Scheduler::attach_agent`](crate::Scheduler::attach_agent).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttachError {
    /// The configured agent limit is already reached.
    CapacityReached {
        /// The configured limit.
        max: u8,
    },
    /// Placement failed.
    Spawn(SpawnError),
}

impl fmt::Display for AttachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityReached { max } => {
                write!(f, "agent limit of {max} reached")
            }
            Self::Spawn(e) => write!(f, "spawn: {e}"),
        }
    }
}

impl Error for AttachError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Spawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpawnError> for AttachError {
    fn from(e: SpawnError) -> Self {
        Self::Spawn(e)
    }
}

/// Complete configuration for one match.
///
/// The whole surface the core consumes from the outside: arena size,
/// viewport side, turn pacing, seed, and agent capacity. A CLI or config
/// collaborator builds one of these; nothing in here is a process-wide
/// global.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Arena width in cells.
    pub width: u32,
    /// Arena height in cells.
    pub height: u32,
    /// Viewport side length (odd).
    pub viewport_side: u16,
    /// The per-turn deadline.
    pub turn_timeout: Duration,
    /// When set, an elapsed deadline forces the tick even with
    /// unanswered agents; when clear, the world waits for every live
    /// agent however long that takes.
    pub must_timeout: bool,
    /// Seed for world generation and spawn placement.
    pub seed: u64,
    /// Maximum number of attached agents, `1..=`[`MAX_AGENTS`].
    pub max_agents: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 320,
            viewport_side: DEFAULT_SIDE,
            turn_timeout: Duration::from_millis(60),
            must_timeout: true,
            seed: 0,
            max_agents: 10,
        }
    }
}

impl EngineConfig {
    /// Validate every structural invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Torus::new(self.width, self.height)?;
        Viewport::new(self.viewport_side)?;
        if self.turn_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.max_agents == 0 || self.max_agents > MAX_AGENTS {
            return Err(ConfigError::AgentCapacity {
                configured: self.max_agents,
            });
        }
        Ok(())
    }
}
