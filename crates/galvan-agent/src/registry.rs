//! The agent record and the attach-ordered registry.

use galvan_core::{Ack, AgentId, Facing};
use galvan_grid::World;
use rand::Rng;

use crate::spawn::{self, SpawnError};

/// One attached agent program's world-side state.
#[derive(Clone, Debug)]
pub struct Agent {
    id: AgentId,
    /// Current cell. Must stay consistent with the grid's Agent cell.
    pub x: i32,
    /// Current cell. Must stay consistent with the grid's Agent cell.
    pub y: i32,
    /// Direction the agent faces; drives the forward target and the
    /// viewport rotation.
    pub facing: Facing,
    /// Cells destroyed by this agent. Saturating.
    pub inventory: u32,
    /// The masked timestamp most recently sent; incoming messages must
    /// echo it.
    pub sent_ts: u8,
    /// Outcome of this turn's message. `NoMessage` means the agent has
    /// not answered yet.
    pub ack: Ack,
    /// Cleared when the agent's endpoint goes away; dead agents stop
    /// participating in turn accounting but their cells remain.
    pub alive: bool,
    /// Bytes received from the agent, awaiting deframing.
    pub rbuf: Vec<u8>,
    /// Bytes queued for delivery to the agent. Unbounded by design: a
    /// slow reader accumulates frames here.
    pub wbuf: Vec<u8>,
    spawn_x: i32,
    spawn_y: i32,
}

impl Agent {
    pub(crate) fn new(id: AgentId, x: i32, y: i32, facing: Facing) -> Self {
        Self {
            id,
            x,
            y,
            facing,
            inventory: 0,
            sent_ts: 0,
            ack: Ack::NoMessage,
            alive: true,
            rbuf: Vec::new(),
            wbuf: Vec::new(),
            spawn_x: x,
            spawn_y: y,
        }
    }

    /// The agent's stable 1-based id.
    pub fn id(&self) -> AgentId {
        self.id
    }

    /// Where the agent entered the world.
    pub fn spawn_point(&self) -> (i32, i32) {
        (self.spawn_x, self.spawn_y)
    }

    /// The coordinate one step ahead of the agent (unwrapped; the grid
    /// wraps on lookup).
    pub fn target(&self) -> (i32, i32) {
        let (fx, fy) = self.facing.forward();
        (self.x + fx, self.y + fy)
    }
}

/// Agents in attach order with stable sequential ids.
///
/// Ids are dense (`n`-th attached agent has id `n`), so the backing
/// store is a plain vector and lookup by id is an index offset. Agents
/// are never removed; a dead one keeps its slot.
#[derive(Clone, Debug, Default)]
pub struct AgentRegistry {
    agents: Vec<Agent>,
}

impl AgentRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attached agents, dead or alive.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether no agent has been attached yet.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Place a new agent in the world and register it.
    ///
    /// Picks a random position whose full 5×5 neighborhood is unowned
    /// (bounded rejection sampling), clears that area, and claims it:
    /// the agent cell in the middle, two bases on its ahead diagonals,
    /// two flag geysers on its behind diagonals, all owned by the new
    /// id.
    pub fn attach<R: Rng>(&mut self, world: &mut World, rng: &mut R) -> Result<AgentId, SpawnError> {
        let id = AgentId(
            u8::try_from(self.agents.len() + 1).map_err(|_| SpawnError::TooManyAgents)?,
        );
        let agent = spawn::place(world, id, rng)?;
        self.agents.push(agent);
        Ok(id)
    }

    /// Place a new agent at an explicit position and facing.
    ///
    /// Same claim semantics as [`attach`](Self::attach) but without the
    /// sampling: fails with [`SpawnError::NoRoom`] if the 5×5
    /// neighborhood around `(x, y)` is not entirely unowned. Intended
    /// for scripted scenarios and tests.
    pub fn attach_at(
        &mut self,
        world: &mut World,
        x: i32,
        y: i32,
        facing: Facing,
    ) -> Result<AgentId, SpawnError> {
        let id = AgentId(
            u8::try_from(self.agents.len() + 1).map_err(|_| SpawnError::TooManyAgents)?,
        );
        let agent = spawn::place_at(world, id, x, y, facing)?;
        self.agents.push(agent);
        Ok(id)
    }

    /// Look up an agent by id. Id 0 never resolves; it is the unowned
    /// marker, not an agent.
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        let slot = (id.0 as usize).checked_sub(1)?;
        self.agents.get(slot)
    }

    /// Look up an agent by id, mutably.
    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        let slot = (id.0 as usize).checked_sub(1)?;
        self.agents.get_mut(slot)
    }

    /// Iterate agents in attach order.
    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    /// Iterate agents in attach order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> {
        self.agents.iter_mut()
    }

    /// Whether every live agent has answered this turn.
    ///
    /// Vacuously true with no live agents; the scheduler pairs this with
    /// the tick deadline so an empty or all-dead arena still advances on
    /// timeout.
    pub fn all_acked(&self) -> bool {
        self.agents
            .iter()
            .filter(|a| a.alive)
            .all(|a| !a.ack.is_pending())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galvan_core::{CellKind, UNOWNED};
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(99)
    }

    #[test]
    fn ids_are_sequential_from_one() {
        let mut world = World::new(64, 64).unwrap();
        let mut reg = AgentRegistry::new();
        let mut rng = rng();
        assert_eq!(reg.attach(&mut world, &mut rng).unwrap(), AgentId(1));
        assert_eq!(reg.attach(&mut world, &mut rng).unwrap(), AgentId(2));
        assert_eq!(reg.attach(&mut world, &mut rng).unwrap(), AgentId(3));
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn lookup_by_id_round_trips() {
        let mut world = World::new(64, 64).unwrap();
        let mut reg = AgentRegistry::new();
        let mut rng = rng();
        let id = reg.attach(&mut world, &mut rng).unwrap();
        assert_eq!(reg.get(id).unwrap().id(), id);
        assert!(reg.get(AgentId(42)).is_none());
        assert!(reg.get(AgentId(0)).is_none(), "0 is the unowned marker");
    }

    #[test]
    fn attach_claims_the_agent_cell() {
        let mut world = World::new(64, 64).unwrap();
        let mut reg = AgentRegistry::new();
        let id = reg.attach(&mut world, &mut rng()).unwrap();
        let agent = reg.get(id).unwrap();
        let cell = world.cell(agent.x, agent.y);
        assert_eq!(cell.kind, CellKind::Agent);
        assert_eq!(cell.owner, id.owner_byte());
    }

    #[test]
    fn attach_lays_out_bases_ahead_and_geysers_behind() {
        let mut world = World::new(64, 64).unwrap();
        let mut reg = AgentRegistry::new();
        let id = reg.attach(&mut world, &mut rng()).unwrap();
        let agent = reg.get(id).unwrap();
        let rot = agent.facing.rotation();

        for sx in [-1, 1] {
            let (bx, by) = rot.apply(sx, -1);
            let ahead = world.cell(agent.x + bx, agent.y + by);
            assert_eq!(ahead.kind, CellKind::Base);
            assert_eq!(ahead.owner, id.owner_byte());

            let (gx, gy) = rot.apply(sx, 1);
            let behind = world.cell(agent.x + gx, agent.y + gy);
            assert_eq!(behind.kind, CellKind::FlagGeyser);
            assert_eq!(behind.owner, id.owner_byte());
        }
    }

    #[test]
    fn spawn_neighborhoods_do_not_overlap() {
        let mut world = World::new(64, 64).unwrap();
        let mut reg = AgentRegistry::new();
        let mut rng = rng();
        for _ in 0..4 {
            reg.attach(&mut world, &mut rng).unwrap();
        }
        // Every owned cell belongs to exactly the five cells each agent
        // placed: 1 agent + 2 bases + 2 geysers.
        let owned = world.cells().iter().filter(|c| c.owner != UNOWNED).count();
        assert_eq!(owned, 4 * 5);
    }

    #[test]
    fn crowded_world_reports_no_room() {
        // A 5x5 world fits one agent's exclusion zone exactly; the
        // second attach cannot find an unowned 5x5 neighborhood.
        let mut world = World::new(5, 5).unwrap();
        let mut reg = AgentRegistry::new();
        let mut rng = rng();
        reg.attach(&mut world, &mut rng).unwrap();
        assert_eq!(reg.attach(&mut world, &mut rng), Err(SpawnError::NoRoom));
    }

    #[test]
    fn attach_at_places_exactly_where_asked() {
        let mut world = World::new(32, 32).unwrap();
        let mut reg = AgentRegistry::new();
        let id = reg.attach_at(&mut world, 10, 10, Facing::East).unwrap();
        let agent = reg.get(id).unwrap();
        assert_eq!((agent.x, agent.y), (10, 10));
        assert_eq!(agent.facing, Facing::East);
        assert_eq!(world.cell(10, 10).kind, CellKind::Agent);
    }

    #[test]
    fn attach_at_rejects_overlapping_claims() {
        let mut world = World::new(32, 32).unwrap();
        let mut reg = AgentRegistry::new();
        reg.attach_at(&mut world, 10, 10, Facing::North).unwrap();
        assert_eq!(
            reg.attach_at(&mut world, 12, 10, Facing::North),
            Err(SpawnError::NoRoom)
        );
        assert!(reg.attach_at(&mut world, 20, 20, Facing::North).is_ok());
    }

    #[test]
    fn all_acked_ignores_dead_agents() {
        let mut world = World::new(64, 64).unwrap();
        let mut reg = AgentRegistry::new();
        let mut rng = rng();
        let a = reg.attach(&mut world, &mut rng).unwrap();
        let b = reg.attach(&mut world, &mut rng).unwrap();
        assert!(!reg.all_acked());

        reg.get_mut(a).unwrap().ack = Ack::Ok;
        assert!(!reg.all_acked(), "b is still pending");

        reg.get_mut(b).unwrap().alive = false;
        assert!(reg.all_acked(), "dead agents do not block the turn");
    }

    #[test]
    fn empty_registry_is_vacuously_acked() {
        assert!(AgentRegistry::new().all_acked());
    }
}
