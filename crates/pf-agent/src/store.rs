//! Core agent storage: `AgentStore` (SoA data) and `AgentRngs` (per-agent RNG).
//!
//! # Why two structs?
//!
//! Per-tick FSM updates need `&mut AgentRngs` (exclusive access to one
//! agent's RNG) and `&AgentStore` (shared read access to every other live
//! agent's position, for neighbor/steering lookups) at the same time.
//! Rust's borrow checker forbids this if both live inside a single struct.
//! Keeping RNGs in a separate `AgentRngs` indexed the same way resolves the
//! conflict:
//!
//! ```ignore
//! // pf-sim tick loop (simplified):
//! for agent in store.live_ids() {
//!     let rng = rngs.get_mut(agent);   // exclusive
//!     let ctx = &store;                // shared, reads every agent's position
//!     update(agent, ctx, rng);
//! }
//! ```
//!
//! # Dynamic population
//!
//! Unlike a fixed-size simulation, agents spawn and are pruned continuously.
//! `AgentStore` keeps a free list of tombstoned slots so `AgentId`s stay
//! stable for live agents while slot memory is reused rather than growing
//! without bound.

use pf_core::{AgentId, AgentRng, EngineRng, Tick, Vec2};

use crate::state::AgentKind;

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, separated from [`AgentStore`] per the
/// borrow-splitting rationale above.
pub struct AgentRngs {
    inner: Vec<Option<AgentRng>>,
}

impl AgentRngs {
    pub(crate) fn new() -> Self {
        Self { inner: Vec::new() }
    }

    pub(crate) fn ensure_len(&mut self, len: usize) {
        if self.inner.len() < len {
            self.inner.resize_with(len, || None);
        }
    }

    pub(crate) fn set(&mut self, agent: AgentId, rng: AgentRng) {
        self.inner[agent.index()] = Some(rng);
    }

    pub(crate) fn clear(&mut self, agent: AgentId) {
        self.inner[agent.index()] = None;
    }

    /// Mutable reference to one agent's RNG. Panics if the agent is not live
    /// — the SoA arrays and RNG slots are always populated together.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        self.inner[agent.index()]
            .as_mut()
            .expect("agent RNG requested for a dead slot")
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for every live agent's position/velocity and
/// FSM substate.
///
/// Every `Vec` field has the same length; `AgentId` is the index into all of
/// them. Dead slots (pruned agents) are tracked in `free_slots` and reused by
/// the next spawn, so `AgentId` values are not wasted but also are never
/// reassigned while the original agent is still alive.
pub struct AgentStore {
    alive: Vec<bool>,
    pub position: Vec<Vec2>,
    pub velocity: Vec<Vec2>,
    pub kind: Vec<Option<AgentKind>>,

    /// Remaining waypoints of the agent's current path, nearest first.
    pub path_waypoints: Vec<Vec<Vec2>>,
    pub blocked_frames: Vec<u32>,
    pub nearby_count: Vec<u32>,
    pub spawn_tick: Vec<Tick>,

    free_slots: Vec<u32>,
    live_count: usize,
}

impl AgentStore {
    pub(crate) fn new() -> Self {
        Self {
            alive: Vec::new(),
            position: Vec::new(),
            velocity: Vec::new(),
            kind: Vec::new(),
            path_waypoints: Vec::new(),
            blocked_frames: Vec::new(),
            nearby_count: Vec::new(),
            spawn_tick: Vec::new(),
            free_slots: Vec::new(),
            live_count: 0,
        }
    }

    /// Number of currently live agents.
    #[inline]
    pub fn len(&self) -> usize {
        self.live_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    #[inline]
    pub fn is_alive(&self, agent: AgentId) -> bool {
        self.alive.get(agent.index()).copied().unwrap_or(false)
    }

    /// Iterator over all live `AgentId`s in ascending index order — the
    /// stable emission order records are published in.
    pub fn live_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|(_, &a)| a)
            .map(|(i, _)| AgentId(i as u32))
    }

    /// Allocate a new agent slot, reusing a tombstoned one if available.
    /// Seeds the agent's RNG from `engine_rng` (see `pf-core::rng`).
    pub fn spawn(
        &mut self,
        kind: AgentKind,
        position: Vec2,
        spawn_tick: Tick,
        rngs: &mut AgentRngs,
        engine_rng: &mut EngineRng,
    ) -> AgentId {
        let id = if let Some(slot) = self.free_slots.pop() {
            AgentId(slot)
        } else {
            let id = AgentId(self.alive.len() as u32);
            self.alive.push(false);
            self.position.push(Vec2::ZERO);
            self.velocity.push(Vec2::ZERO);
            self.kind.push(None);
            self.path_waypoints.push(Vec::new());
            self.blocked_frames.push(0);
            self.nearby_count.push(0);
            self.spawn_tick.push(Tick::ZERO);
            id
        };

        let idx = id.index();
        self.alive[idx] = true;
        self.position[idx] = position;
        self.velocity[idx] = Vec2::ZERO;
        self.kind[idx] = Some(kind);
        self.path_waypoints[idx].clear();
        self.blocked_frames[idx] = 0;
        self.nearby_count[idx] = 0;
        self.spawn_tick[idx] = spawn_tick;

        rngs.ensure_len(self.alive.len());
        rngs.set(id, engine_rng.spawn_agent_rng(id));

        self.live_count += 1;
        id
    }

    /// Tombstone an agent's slot so it can be reused by a future spawn.
    pub fn despawn(&mut self, agent: AgentId, rngs: &mut AgentRngs) {
        if !self.is_alive(agent) {
            return;
        }
        self.alive[agent.index()] = false;
        self.kind[agent.index()] = None;
        self.path_waypoints[agent.index()].clear();
        rngs.clear(agent);
        self.free_slots.push(agent.0);
        self.live_count -= 1;
    }

    /// All agents currently marked terminal (`Done` / `OffShift`), ready for
    /// pruning at the end of a tick.
    pub fn terminal_ids(&self) -> Vec<AgentId> {
        self.live_ids()
            .filter(|&id| {
                self.kind[id.index()]
                    .as_ref()
                    .map(AgentKind::is_terminal)
                    .unwrap_or(false)
            })
            .collect()
    }
}

impl Default for AgentStore {
    fn default() -> Self {
        Self::new()
    }
}
