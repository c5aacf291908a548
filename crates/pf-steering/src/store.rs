//! Parallel, `AgentId`-indexed store of [`SteeringState`], kept alongside
//! `pf_agent::AgentStore` rather than folded into it — steering is an
//! optional movement layer, not core agent identity.

use pf_core::AgentId;

use crate::state::SteeringState;

pub struct SteeringStore {
    phases: Vec<SteeringState>,
}

impl SteeringStore {
    pub fn new() -> Self {
        Self { phases: Vec::new() }
    }

    /// Grow the backing array to at least `len` slots, filling new ones with
    /// `SteeringState::default()`. Called after `AgentStore::spawn` so index
    /// `agent.index()` is always valid.
    pub fn ensure_len(&mut self, len: usize) {
        if self.phases.len() < len {
            self.phases.resize(len, SteeringState::default());
        }
    }

    /// Reset a slot's wobble phase, called after `AgentStore::despawn` so a
    /// reused slot doesn't inherit a stale phase.
    pub fn reset(&mut self, agent: AgentId) {
        if let Some(slot) = self.phases.get_mut(agent.index()) {
            *slot = SteeringState::default();
        }
    }

    #[inline]
    pub fn get(&self, agent: AgentId) -> SteeringState {
        self.phases[agent.index()]
    }

    #[inline]
    pub fn advance_phase(&mut self, agent: AgentId, dt_secs: f32) {
        self.phases[agent.index()].wobble_phase_secs += dt_secs;
    }
}

impl Default for SteeringStore {
    fn default() -> Self {
        Self::new()
    }
}
