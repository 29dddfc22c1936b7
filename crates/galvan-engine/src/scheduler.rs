//! The turn scheduler: one readiness-multiplexed I/O pass per iteration.

use std::thread;
use std::time::Instant;

use crossbeam_channel::{Select, TryRecvError};
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use galvan_agent::AgentRegistry;
use galvan_core::{AgentId, TickId};
use galvan_grid::{gen, World};
use galvan_obs::Viewport;
use galvan_proto::{drain_incoming, enqueue_server_frame, ServerFrame};

use crate::config::{AttachError, ConfigError, EngineConfig};
use crate::endpoint::AgentEndpoint;
use crate::metrics::{RoundMetrics, RoundReport};

/// Keeps the placement RNG off the substrate generator's stream for the
/// same seed.
const PLACEMENT_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

/// One agent's transport and its inbound state.
struct Link {
    endpoint: AgentEndpoint,
    /// Cleared when the agent program stops writing; the agent stays
    /// alive (it may still read frames) but can never answer again.
    inbound_open: bool,
}

/// The match event loop.
///
/// Each [`poll`](Scheduler::poll) runs one iteration: wait for inbound
/// readiness bounded by the tick deadline, pump and deframe every ready
/// channel, advance the world if the turn is complete (or the deadline
/// demands it), fan out server frames, and flush. [`run`](Scheduler::run)
/// loops forever; there is no terminal state in normal operation.
pub struct Scheduler {
    config: EngineConfig,
    world: World,
    agents: AgentRegistry,
    links: Vec<Link>,
    viewport: Viewport,
    rng: ChaCha8Rng,
    deadline: Instant,
    metrics: RoundMetrics,
}

impl Scheduler {
    /// Build a world from the configuration and arm the first deadline.
    ///
    /// Startup is the only fatal path: a bad configuration is rejected
    /// here, before any agent attaches.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut world = World::new(config.width, config.height)?;
        gen::randomize(&mut world, config.seed);
        let viewport = Viewport::new(config.viewport_side)?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed ^ PLACEMENT_STREAM);
        let deadline = Instant::now() + config.turn_timeout;
        Ok(Self {
            config,
            world,
            agents: AgentRegistry::new(),
            links: Vec::new(),
            viewport,
            rng,
            deadline,
            metrics: RoundMetrics::default(),
        })
    }

    /// Attach an agent program through its endpoint.
    ///
    /// Places the agent in the world, then builds and immediately
    /// flushes its greeting frame so the program learns the current
    /// timestamp without waiting out a turn.
    pub fn attach_agent(&mut self, endpoint: AgentEndpoint) -> Result<AgentId, AttachError> {
        if self.agents.len() >= self.config.max_agents as usize {
            return Err(AttachError::CapacityReached {
                max: self.config.max_agents,
            });
        }
        let id = self.agents.attach(&mut self.world, &mut self.rng)?;
        self.links.push(Link {
            endpoint,
            inbound_open: true,
        });

        let agent = self.agents.get_mut(id).expect("just attached");
        enqueue_server_frame(&self.world, agent, &self.viewport);
        self.flush_one(id.0 as usize - 1);
        Ok(id)
    }

    /// Run one scheduler iteration and report what happened.
    pub fn poll(&mut self) -> RoundReport {
        self.await_readiness();

        for i in 0..self.links.len() {
            self.pump_inbound(i);
        }

        let now = Instant::now();
        let all_acked = self.agents.all_acked();
        let deadline_elapsed = now >= self.deadline;

        let mut report = RoundReport::default();
        if all_acked || (deadline_elapsed && self.config.must_timeout) {
            let forced = !all_acked;
            self.world.step();
            report.losses = self.world.drain_losses();
            report.ticked = true;
            report.forced = forced;

            self.metrics.ticks += 1;
            if forced {
                self.metrics.forced_ticks += 1;
                debug!(tick = %self.world.tick(), "deadline forced the tick");
            }

            for agent in self.agents.iter_mut().filter(|a| a.alive) {
                enqueue_server_frame(&self.world, agent, &self.viewport);
            }

            // A full turn re-arms from now; a forced tick keeps the
            // original cadence so stalled agents don't stretch it.
            self.deadline = if forced {
                self.deadline + self.config.turn_timeout
            } else {
                now + self.config.turn_timeout
            };
        }

        for i in 0..self.links.len() {
            self.flush_one(i);
        }

        report
    }

    /// Loop [`poll`](Scheduler::poll) for the life of the process.
    pub fn run(&mut self) -> ! {
        loop {
            self.poll();
        }
    }

    /// Block until some live agent has inbound bytes or the tick
    /// deadline arrives.
    fn await_readiness(&self) {
        let mut sel = Select::new();
        let mut any = false;
        for (i, link) in self.links.iter().enumerate() {
            let id = AgentId((i + 1) as u8);
            let alive = self.agents.get(id).map(|a| a.alive).unwrap_or(false);
            if alive && link.inbound_open {
                sel.recv(&link.endpoint.incoming);
                any = true;
            }
        }
        if any {
            let _ = sel.ready_deadline(self.deadline);
        } else {
            let now = Instant::now();
            if self.deadline > now {
                thread::sleep(self.deadline - now);
            }
        }
    }

    /// Drain one agent's inbound channel into its input queue and
    /// process every complete frame.
    fn pump_inbound(&mut self, i: usize) {
        let id = AgentId((i + 1) as u8);
        let link = &mut self.links[i];
        let Some(agent) = self.agents.get_mut(id) else {
            return;
        };
        if !agent.alive {
            return;
        }

        if link.inbound_open {
            loop {
                match link.endpoint.incoming.try_recv() {
                    Ok(chunk) => agent.rbuf.extend_from_slice(&chunk),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        // The program stopped writing; it simply never
                        // answers again. Frames still flow toward it.
                        debug!(agent = %id, "inbound endpoint closed");
                        link.inbound_open = false;
                        break;
                    }
                }
            }
        }

        let summary = drain_incoming(&mut self.world, agent);
        self.metrics.absorb(summary);
    }

    /// Hand one agent's buffered output to its endpoint. A vanished
    /// endpoint costs that agent its frames and its liveness; everyone
    /// else is unaffected.
    fn flush_one(&mut self, i: usize) {
        let id = AgentId((i + 1) as u8);
        let Some(agent) = self.agents.get_mut(id) else {
            return;
        };
        if !agent.alive || agent.wbuf.is_empty() {
            return;
        }

        let bytes = std::mem::take(&mut agent.wbuf);
        let frames = (bytes.len() / ServerFrame::encoded_len(self.viewport.side())) as u64;
        match self.links[i].endpoint.outgoing.send(bytes) {
            Ok(()) => self.metrics.frames_sent += frames,
            Err(_) => {
                warn!(agent = %id, "failed to write to agent; dropping buffered output");
                self.metrics.frames_dropped += frames;
                agent.alive = false;
            }
        }
    }

    /// The world being simulated.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access, for scenario setup and collaborators that
    /// apply scoring consequences.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The attached agents.
    pub fn agents(&self) -> &AgentRegistry {
        &self.agents
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Cumulative counters.
    pub fn metrics(&self) -> &RoundMetrics {
        &self.metrics
    }

    /// The viewport every frame is rendered with.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Current world tick.
    pub fn tick(&self) -> TickId {
        self.world.tick()
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("tick", &self.world.tick())
            .field("agents", &self.agents.len())
            .field("must_timeout", &self.config.must_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::endpoint_pair;
    use std::time::Duration;

    fn quick_config() -> EngineConfig {
        EngineConfig {
            width: 64,
            height: 64,
            viewport_side: 5,
            turn_timeout: Duration::from_millis(5),
            must_timeout: true,
            seed: 42,
            max_agents: 4,
        }
    }

    #[test]
    fn new_starts_at_tick_zero() {
        let sched = Scheduler::new(quick_config()).unwrap();
        assert_eq!(sched.tick(), TickId(0));
        assert_eq!(sched.agents().len(), 0);
    }

    #[test]
    fn invalid_config_is_rejected_at_startup() {
        let cfg = EngineConfig {
            viewport_side: 4,
            ..quick_config()
        };
        assert!(Scheduler::new(cfg).is_err());
    }

    #[test]
    fn attach_sends_a_greeting_frame() {
        let mut sched = Scheduler::new(quick_config()).unwrap();
        let (endpoint, handle) = endpoint_pair();
        let id = sched.attach_agent(endpoint).unwrap();
        assert_eq!(id, AgentId(1));

        let bytes = handle.rx.try_recv().expect("greeting flushed on attach");
        let frame = ServerFrame::decode(&bytes, 5).unwrap();
        assert_eq!(frame.ts, sched.tick().wire_byte());
        assert_eq!(frame.ack, galvan_core::Ack::NoMessage.wire_byte());
    }

    #[test]
    fn capacity_limit_is_enforced() {
        let mut sched = Scheduler::new(EngineConfig {
            max_agents: 1,
            ..quick_config()
        })
        .unwrap();
        let (a, _ha) = endpoint_pair();
        sched.attach_agent(a).unwrap();
        let (b, _hb) = endpoint_pair();
        assert_eq!(
            sched.attach_agent(b),
            Err(AttachError::CapacityReached { max: 1 })
        );
    }

    #[test]
    fn same_seed_builds_identical_worlds() {
        let a = Scheduler::new(quick_config()).unwrap();
        let b = Scheduler::new(quick_config()).unwrap();
        assert_eq!(a.world().cells(), b.world().cells());
    }
}
