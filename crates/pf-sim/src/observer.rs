//! Simulation observer trait: hooks the tick loop calls so a host
//! application (typically `pf-publish`) can turn live state into output
//! without `pf-sim` depending on any transport or serialization crate.

use pf_agent::AgentStore;
use pf_behavior::LaneState;
use pf_core::{EngineConfig, SimClock, Tick};
use pf_scene::Scene;

/// One lane's operating summary for a tick, handed to observers and to
/// `ControlMessage::GetStatus` replies.
#[derive(Debug, Clone, Copy)]
pub struct LaneSummary {
    pub lane: pf_core::LaneId,
    pub state: LaneState,
    pub queue_length: u32,
    pub pressure: f32,
}

/// Per-tick counters recorded after pruning, independent of any publish
/// format.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    pub tick: Tick,
    pub agent_count: usize,
    pub overlap_count: u32,
    pub stuck_count: u32,
    pub pruned_count: usize,
}

/// Callbacks invoked by [`crate::Sim::run`] at key points in the tick loop.
///
/// Every method has a no-op default so implementors only override what they
/// need. `on_publish` is called once per tick, after movement and lane
/// control settle and before pruning — the moment a `TrackRecord` per live
/// agent should be emitted.
pub trait SimObserver {
    fn on_tick_start(&mut self, _tick: Tick) {}

    fn on_publish(
        &mut self,
        _tick: Tick,
        _clock: &SimClock,
        _config: &EngineConfig,
        _agents: &AgentStore,
        _scene: &Scene,
    ) {
    }

    fn on_lane_states(&mut self, _tick: Tick, _lanes: &[LaneSummary]) {}

    fn on_tick_end(&mut self, _tick: Tick, _diagnostics: &Diagnostics) {}

    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing. Use when calling `run` without
/// needing any callbacks (e.g. headless benchmarking).
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
