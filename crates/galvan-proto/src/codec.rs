//! Turn discipline and action application.

use galvan_agent::Agent;
use galvan_core::{Ack, Action, Cell, CellKind, DAMAGE_LIMIT};
use galvan_grid::World;
use galvan_obs::Viewport;

use crate::frame::{ClientFrame, ServerFrame, CLIENT_FRAME_LEN};

/// Counts from one [`drain_incoming`] pass, for scheduler metrics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IncomingSummary {
    /// Frames whose action was applied (ack ok).
    pub accepted: u32,
    /// Frames answered invalid-action or invalid-message.
    pub rejected: u32,
    /// Extra frames in one turn, answered multiple-messages.
    pub duplicates: u32,
    /// Frames echoing a stale timestamp, dropped without acknowledgement.
    pub stale: u32,
}

/// Deframe and process every complete client frame in the agent's input
/// queue. A trailing partial frame stays queued for the next pass.
pub fn drain_incoming(world: &mut World, agent: &mut Agent) -> IncomingSummary {
    let mut summary = IncomingSummary::default();

    let mut consumed = 0;
    while agent.rbuf.len() - consumed >= CLIENT_FRAME_LEN {
        let frame = ClientFrame {
            ts: agent.rbuf[consumed],
            action: agent.rbuf[consumed + 1],
        };
        consumed += CLIENT_FRAME_LEN;
        apply_client_frame(world, agent, frame, &mut summary);
    }
    agent.rbuf.drain(..consumed);

    summary
}

/// Validate one client frame and, if it passes, apply its action.
///
/// Order matters: a stale echo is dropped before the duplicate check, a
/// duplicate is flagged before the action is decoded, and only then does
/// the action run.
fn apply_client_frame(
    world: &mut World,
    agent: &mut Agent,
    frame: ClientFrame,
    summary: &mut IncomingSummary,
) {
    if frame.ts != agent.sent_ts {
        // A delayed or replayed frame from an earlier turn. Not the
        // agent's answer; drop it without touching the acknowledgement.
        summary.stale += 1;
        return;
    }

    if !agent.ack.is_pending() {
        agent.ack = Ack::MultipleMessages;
        summary.duplicates += 1;
        return;
    }

    let ack = match Action::from_wire(frame.action) {
        Some(action) => apply_action(world, agent, action),
        None => Ack::InvalidMessage,
    };
    agent.ack = ack;
    if ack == Ack::Ok {
        summary.accepted += 1;
    } else {
        summary.rejected += 1;
    }
}

/// Apply an accepted action against the world. Returns the
/// acknowledgement to report.
fn apply_action(world: &mut World, agent: &mut Agent, action: Action) -> Ack {
    let (x, y) = (agent.x, agent.y);
    let (tx, ty) = agent.target();

    match action {
        Action::TurnLeft => {
            agent.facing = agent.facing.turned_left();
            Ack::Ok
        }
        Action::TurnRight => {
            agent.facing = agent.facing.turned_right();
            Ack::Ok
        }

        Action::Advance => move_into(world, agent, x, y, tx, ty, CellKind::Empty),
        Action::Build => move_into(world, agent, x, y, tx, ty, CellKind::Conductor),

        Action::Hit => {
            let target = world.cell_mut(tx, ty);
            if !target.kind.is_destructible() {
                return Ack::InvalidAction;
            }
            target.damage += 1;
            if target.damage >= DAMAGE_LIMIT {
                *target = Cell::default();
                agent.inventory = agent.inventory.saturating_add(1);
            }
            Ack::Ok
        }
    }
}

/// Shared advance/build path: step into an empty target, leaving
/// `vacated` behind.
fn move_into(
    world: &mut World,
    agent: &mut Agent,
    x: i32,
    y: i32,
    tx: i32,
    ty: i32,
    vacated: CellKind,
) -> Ack {
    if world.cell(tx, ty).kind != CellKind::Empty {
        return Ack::InvalidAction;
    }
    world.set(
        tx,
        ty,
        Cell::owned(CellKind::Agent, agent.id().owner_byte()),
    );
    world.set(x, y, Cell::of(vacated));
    let wrapped = world.torus().wrap(tx, ty);
    agent.x = wrapped.0;
    agent.y = wrapped.1;
    Ack::Ok
}

/// Build this turn's server frame for one agent and queue its bytes.
///
/// Side effects are part of the protocol: the frame consumes the pending
/// acknowledgement (reset to no-message) and records the masked
/// timestamp the agent must echo back.
pub fn enqueue_server_frame(world: &World, agent: &mut Agent, viewport: &Viewport) {
    let ts = world.tick().wire_byte();
    let mut frame = ServerFrame {
        ack: agent.ack.wire_byte(),
        ts,
        inventory: (agent.inventory & 0xFF) as u8,
        cells: Vec::new(),
        damage: Vec::new(),
    };
    viewport.extract(
        world,
        agent.x,
        agent.y,
        agent.facing,
        &mut frame.cells,
        &mut frame.damage,
    );
    frame.encode_into(&mut agent.wbuf);

    agent.sent_ts = ts;
    agent.ack = Ack::NoMessage;
}
