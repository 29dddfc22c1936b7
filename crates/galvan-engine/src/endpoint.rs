//! Channel-backed agent endpoints.
//!
//! Each attached agent program talks to the world through two
//! independent byte-chunk channels. The world side is an
//! [`AgentEndpoint`]; the far side ([`AgentHandle`]) belongs to whatever
//! pumps the real transport — a thread copying a child process's stdio,
//! or a test script.
//!
//! Both channels are unbounded: backpressure on a slow agent shows up as
//! growth of its queued frames, never as the scheduler blocking. A
//! dropped handle is how an agent program's death becomes visible to the
//! scheduler.

use crossbeam_channel::{unbounded, Receiver, Sender};

/// The world side of one agent's transport.
pub struct AgentEndpoint {
    /// Byte chunks arriving from the agent program.
    pub(crate) incoming: Receiver<Vec<u8>>,
    /// Byte chunks queued toward the agent program.
    pub(crate) outgoing: Sender<Vec<u8>>,
}

/// The agent-program side of one agent's transport.
///
/// Held by the external collaborator that owns the process and its
/// pipes. Dropping either half is observed by the scheduler as that
/// direction failing.
pub struct AgentHandle {
    /// Push bytes the agent program wrote.
    pub tx: Sender<Vec<u8>>,
    /// Frames the world produced for the agent program.
    pub rx: Receiver<Vec<u8>>,
}

/// Create a connected endpoint/handle pair.
pub fn endpoint_pair() -> (AgentEndpoint, AgentHandle) {
    let (to_world, from_agent) = unbounded();
    let (to_agent, from_world) = unbounded();
    (
        AgentEndpoint {
            incoming: from_agent,
            outgoing: to_agent,
        },
        AgentHandle {
            tx: to_world,
            rx: from_world,
        },
    )
}
