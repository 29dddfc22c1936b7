//! Worlds, armed agents, and wire-format helpers.

use galvan_agent::AgentRegistry;
use galvan_core::{Action, AgentId, Cell, CellKind, Facing};
use galvan_grid::World;
use galvan_obs::Viewport;
use galvan_proto::{enqueue_server_frame, ServerFrame};

/// A fresh, empty world.
pub fn empty_world(width: u32, height: u32) -> World {
    World::new(width, height).expect("fixture dimensions are valid")
}

/// Place a run of cells of one kind along a row.
pub fn lay_row(world: &mut World, y: i32, x0: i32, x1: i32, kind: CellKind) {
    for x in x0..=x1 {
        world.set(x, y, Cell::of(kind));
    }
}

/// Attach an agent at a fixed pose and arm it: its first server frame is
/// generated (so `sent_ts` matches the world) and discarded.
///
/// Returns the registry holding the single agent plus its id.
pub fn armed_agent(
    world: &mut World,
    x: i32,
    y: i32,
    facing: Facing,
    viewport: &Viewport,
) -> (AgentRegistry, AgentId) {
    let mut agents = AgentRegistry::new();
    let id = agents
        .attach_at(world, x, y, facing)
        .expect("fixture position is free");
    let agent = agents.get_mut(id).expect("just attached");
    enqueue_server_frame(world, agent, viewport);
    agent.wbuf.clear();
    (agents, id)
}

/// The two wire bytes of one client frame.
pub fn client_bytes(ts: u8, action: Action) -> [u8; 2] {
    [ts, action.wire_byte()]
}

/// Split a byte stream of concatenated server frames.
///
/// Panics on a trailing partial frame — tests should never produce one.
pub fn split_server_frames(bytes: &[u8], side: u16) -> Vec<ServerFrame> {
    let len = ServerFrame::encoded_len(side);
    assert!(
        bytes.len() % len == 0,
        "byte stream holds a partial frame: {} % {len} != 0",
        bytes.len()
    );
    bytes
        .chunks(len)
        .map(|chunk| ServerFrame::decode(chunk, side).expect("chunk is frame-sized"))
        .collect()
}
