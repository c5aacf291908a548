//! Read-only simulation state passed to every FSM callback.

use pf_agent::AgentStore;
use pf_core::{LaneId, Tick};
use pf_scene::{NavGrid, Scene};

use crate::lanestate::LaneState;

/// A read-only snapshot of simulation state shared by every agent's FSM
/// update during a tick's intent phase.
///
/// Built once per tick by pf-sim and reused across every agent's `update`
/// call; no per-agent allocation happens while walking the agent list.
pub struct SimContext<'a> {
    pub tick: Tick,
    pub tick_duration_secs: f32,

    pub agents: &'a AgentStore,
    pub scene: &'a Scene,
    pub navgrid: &'a NavGrid,

    /// Current state of every checkout lane, indexed by `LaneId`.
    pub lane_states: &'a [LaneState],
    /// Number of shoppers currently queued at each lane.
    pub lane_queue_lengths: &'a [u32],
    /// Whether a cashier is actively working (and free to take the next
    /// customer) at each lane.
    pub lane_cashier_ready: &'a [bool],

    /// `true` for an agent whose last destination request failed to find a
    /// path (set by pf-sim after an A* attempt comes back `NoPath`).
    pub path_failed: &'a [bool],

    /// Lane a currently-`Inactive` cashier has been assigned to, if the
    /// staffing pass (run by pf-sim before the intent phase) gave them one.
    pub cashier_assigned_lane: &'a [Option<LaneId>],

    pub checkout_prob_multiplier: f32,
    pub browsing_speed_multiplier: f32,
    pub cashier_break_prob_per_hour: f32,
    pub enable_cashiers: bool,
}

impl<'a> SimContext<'a> {
    pub fn lane_state(&self, lane: LaneId) -> LaneState {
        self.lane_states[lane.index()]
    }

    pub fn lane_queue_length(&self, lane: LaneId) -> u32 {
        self.lane_queue_lengths[lane.index()]
    }

    pub fn lane_cashier_ready(&self, lane: LaneId) -> bool {
        self.lane_cashier_ready[lane.index()]
    }
}
