//! Galvan: a deterministic wire-CA territory arena for external agent
//! programs.
//!
//! This is the top-level facade crate re-exporting the public API of the
//! Galvan sub-crates. For most users, adding `galvan` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use galvan::prelude::*;
//! use std::time::Duration;
//!
//! // A small arena that advances on its own every 5ms.
//! let config = EngineConfig {
//!     width: 64,
//!     height: 64,
//!     viewport_side: 5,
//!     turn_timeout: Duration::from_millis(5),
//!     must_timeout: true,
//!     seed: 42,
//!     max_agents: 4,
//! };
//! let mut sched = Scheduler::new(config).unwrap();
//!
//! // Attach one agent; the far side of the pair would be wired to a
//! // real program's stdio by the process collaborator.
//! let (endpoint, handle) = endpoint_pair();
//! let id = sched.attach_agent(endpoint).unwrap();
//!
//! // The greeting frame tells the agent the timestamp to echo.
//! let greeting = handle.rx.recv().unwrap();
//! let frame = ServerFrame::decode(&greeting, 5).unwrap();
//!
//! // Answer, then run one turn.
//! handle.tx.send(vec![frame.ts, Action::Advance.wire_byte()]).unwrap();
//! let report = sched.poll();
//! assert!(report.ticked);
//! assert_eq!(sched.agents().get(id).unwrap().ack, Ack::NoMessage);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `galvan-core` | Cells, ids, facings, wire codes |
//! | [`grid`] | `galvan-grid` | Toroidal world, CA engine, world generation |
//! | [`obs`] | `galvan-obs` | Oriented viewport extraction |
//! | [`agent`] | `galvan-agent` | Agent records, registry, spawning |
//! | [`proto`] | `galvan-proto` | Wire frames and turn-discipline codec |
//! | [`engine`] | `galvan-engine` | Scheduler, endpoints, configuration |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Cell model, identifiers, facings, and wire codes (`galvan-core`).
pub use galvan_core as types;

/// Toroidal world, CA engine, and world generation (`galvan-grid`).
pub use galvan_grid as grid;

/// Oriented viewport extraction (`galvan-obs`).
pub use galvan_obs as obs;

/// Agent records, registry, and spawn placement (`galvan-agent`).
pub use galvan_agent as agent;

/// Wire frames and the turn-discipline codec (`galvan-proto`).
pub use galvan_proto as proto;

/// The turn scheduler, endpoints, and configuration (`galvan-engine`).
pub use galvan_engine as engine;

/// Common imports for typical Galvan usage.
///
/// ```rust
/// use galvan::prelude::*;
/// ```
pub mod prelude {
    pub use galvan_agent::{Agent, AgentRegistry, SpawnError};
    pub use galvan_core::{
        Ack, Action, AgentId, Cell, CellKind, Facing, TickId, DAMAGE_LIMIT, UNOWNED,
    };
    pub use galvan_engine::{
        endpoint_pair, AgentEndpoint, AgentHandle, AttachError, ConfigError, EngineConfig,
        RoundMetrics, RoundReport, Scheduler,
    };
    pub use galvan_grid::{GridError, LossList, Torus, World};
    pub use galvan_obs::{Viewport, ViewportError};
    pub use galvan_proto::{ClientFrame, FrameError, ServerFrame};
}
