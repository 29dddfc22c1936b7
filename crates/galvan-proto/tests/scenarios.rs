//! Protocol scenarios over hand-built worlds: full turns of the
//! message → action → generation → frame cycle without a scheduler.

use galvan_core::{Ack, Action, Cell, CellKind, Facing, UNOWNED};
use galvan_obs::Viewport;
use galvan_proto::{drain_incoming, enqueue_server_frame};
use galvan_test_utils::{armed_agent, client_bytes, empty_world, lay_row, split_server_frames};

const SIDE: u16 = 5;

#[test]
fn advance_east_full_turn() {
    let mut world = empty_world(10, 10);
    let vp = Viewport::new(SIDE).unwrap();
    let (mut agents, id) = armed_agent(&mut world, 5, 5, Facing::East, &vp);

    let agent = agents.get_mut(id).unwrap();
    let echo = client_bytes(agent.sent_ts, Action::Advance);
    agent.rbuf.extend_from_slice(&echo);
    drain_incoming(&mut world, agent);

    assert_eq!((agent.x, agent.y), (6, 5));
    assert_eq!(world.cell(6, 5).kind, CellKind::Agent);
    assert_eq!(world.cell(5, 5).kind, CellKind::Empty);

    world.step();
    enqueue_server_frame(&world, agent, &vp);
    let frames = split_server_frames(&agent.wbuf, SIDE);
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].ack, Ack::Ok.wire_byte());
    assert_eq!(frames[0].ts, world.tick().wire_byte());
}

#[test]
fn advance_into_occupied_cell_full_turn() {
    let mut world = empty_world(10, 10);
    let vp = Viewport::new(SIDE).unwrap();
    let (mut agents, id) = armed_agent(&mut world, 5, 5, Facing::East, &vp);
    world.set(6, 5, Cell::owned(CellKind::Agent, 2));

    let agent = agents.get_mut(id).unwrap();
    let echo = client_bytes(agent.sent_ts, Action::Advance);
    agent.rbuf.extend_from_slice(&echo);
    drain_incoming(&mut world, agent);

    assert_eq!((agent.x, agent.y), (5, 5), "position unchanged");

    world.step();
    enqueue_server_frame(&world, agent, &vp);
    let frames = split_server_frames(&agent.wbuf, SIDE);
    assert_eq!(frames[0].ack, Ack::InvalidAction.wire_byte());
}

#[test]
fn four_hit_turns_destroy_and_pay_out() {
    let mut world = empty_world(10, 10);
    let vp = Viewport::new(SIDE).unwrap();
    let (mut agents, id) = armed_agent(&mut world, 5, 5, Facing::East, &vp);
    world.set(6, 5, Cell::of(CellKind::Conductor));

    let agent = agents.get_mut(id).unwrap();
    for _ in 0..4 {
        let echo = client_bytes(agent.sent_ts, Action::Hit);
        agent.rbuf.extend_from_slice(&echo);
        drain_incoming(&mut world, agent);
        world.step();
        enqueue_server_frame(&world, agent, &vp);
    }

    assert_eq!(world.cell(6, 5).kind, CellKind::Empty);
    assert_eq!(world.cell(6, 5).damage, 0);
    assert_eq!(agent.inventory, 1);

    let frames = split_server_frames(&agent.wbuf, SIDE);
    assert_eq!(frames.len(), 4);
    assert!(frames.iter().all(|f| f.ack == Ack::Ok.wire_byte()));
    assert_eq!(frames[2].inventory, 0, "three hits only damage");
    assert_eq!(frames[3].inventory, 1, "fourth hit pays out");
}

#[test]
fn signal_down_a_wire_captures_next_to_a_geyser() {
    // The agent's home layout leaves flag geysers on its behind
    // diagonals; run a charged wire past one and let the CA do the
    // rest: electron → photon → flag.
    let mut world = empty_world(12, 12);
    let vp = Viewport::new(SIDE).unwrap();
    let (agents, id) = armed_agent(&mut world, 5, 5, Facing::East, &vp);
    let owner = agents.get(id).unwrap().id().owner_byte();

    // Facing east, one geyser sits at (4, 4); the wire runs along y=3
    // so its cell (3, 3) touches the geyser diagonally.
    assert_eq!(world.cell(4, 4).kind, CellKind::FlagGeyser);
    lay_row(&mut world, 3, 1, 6, CellKind::Conductor);
    world.set(2, 3, Cell::of(CellKind::Electron));
    world.set(1, 3, Cell::of(CellKind::ElectronTail));

    // Tick 1: the head moves onto (3, 3). Tick 2: sitting between its
    // own tail and the geyser, it condenses into a photon. Tick 3: the
    // photon agrees with the single neighboring owner and captures.
    world.step();
    assert_eq!(world.cell(3, 3).kind, CellKind::Electron);
    world.step();
    assert_eq!(world.cell(3, 3).kind, CellKind::Photon);
    world.step();

    let captured = world.cell(3, 3);
    assert_eq!(captured.kind, CellKind::Flag);
    assert_eq!(captured.owner, owner);
    assert!(world.drain_losses().is_empty());
}

#[test]
fn turn_then_build_walls_in_a_corridor() {
    let mut world = empty_world(10, 10);
    let vp = Viewport::new(SIDE).unwrap();
    let (mut agents, id) = armed_agent(&mut world, 5, 5, Facing::East, &vp);

    let agent = agents.get_mut(id).unwrap();
    for action in [Action::TurnRight, Action::Build, Action::Build] {
        let echo = client_bytes(agent.sent_ts, action);
        agent.rbuf.extend_from_slice(&echo);
        drain_incoming(&mut world, agent);
        world.step();
        enqueue_server_frame(&world, agent, &vp);
    }

    // East turned right is south; two builds leave conductors behind.
    assert_eq!(agent.facing, Facing::South);
    assert_eq!((agent.x, agent.y), (5, 7));
    assert_eq!(world.cell(5, 5).kind, CellKind::Conductor);
    assert_eq!(world.cell(5, 6).kind, CellKind::Conductor);
    assert_eq!(world.cell(5, 6).owner, UNOWNED);
}
