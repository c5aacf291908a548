//! Checkout lane-state controller: the hysteresis cycle a lane moves
//! through as it opens, operates, and winds down.

use pf_core::Tick;

/// A checkout lane's current operating state.
///
/// The cycle is `Closed -> Confirming -> Open -> Draining -> Closed`.
/// `Confirming` and `Draining` are hysteresis windows that prevent a lane
/// from flapping open/closed on a single noisy tick of queue pressure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LaneState {
    /// Not staffed, not accepting new queue joins.
    Closed,
    /// Open requested; waiting out `open_confirm_window_sec` with a cashier
    /// present before accepting customers.
    Confirming { since: Tick },
    /// Staffed and accepting customers.
    Open,
    /// Close requested; no new joins accepted, existing queue is drained
    /// over at most `close_grace_window_sec` before the lane goes dark.
    Draining { since: Tick },
}

impl LaneState {
    pub fn accepts_new_customers(self) -> bool {
        matches!(self, LaneState::Open)
    }
}

/// Hysteresis windows and queue-pressure threshold driving every lane's
/// state transitions.
#[derive(Clone, Copy, Debug)]
pub struct LaneControllerConfig {
    pub open_confirm_window_sec: f32,
    pub close_grace_window_sec: f32,
    /// Average queue length per open lane above which a closed lane is
    /// automatically promoted to `Confirming`.
    pub queue_pressure_threshold: f32,
}

pub struct LaneController {
    pub config: LaneControllerConfig,
}

impl LaneController {
    pub fn new(config: LaneControllerConfig) -> Self {
        Self { config }
    }

    /// Manual open request (operator control surface / `set_lane_state`).
    /// No-op on a lane that's already `Open` or `Confirming`.
    pub fn request_open(&self, state: LaneState, now: Tick) -> LaneState {
        match state {
            LaneState::Closed => LaneState::Confirming { since: now },
            other => other,
        }
    }

    /// Manual close request. A lane still confirming is closed immediately
    /// (no customers committed yet); an open lane drains first.
    pub fn request_close(&self, state: LaneState, now: Tick) -> LaneState {
        match state {
            LaneState::Confirming { .. } => LaneState::Closed,
            LaneState::Open => LaneState::Draining { since: now },
            other => other,
        }
    }

    /// Advance one lane's state by one tick. `tick_duration_secs` converts
    /// elapsed ticks to seconds so the hysteresis windows stay meaningful
    /// across different `frequency_hz` configurations.
    pub fn tick(
        &self,
        state: LaneState,
        now: Tick,
        tick_duration_secs: f32,
        _queue_len: u32,
        cashier_ready: bool,
    ) -> LaneState {
        match state {
            LaneState::Confirming { since } => {
                let elapsed_secs = now.since(since) as f32 * tick_duration_secs;
                if cashier_ready && elapsed_secs >= self.config.open_confirm_window_sec {
                    LaneState::Open
                } else {
                    state
                }
            }
            LaneState::Open => {
                if cashier_ready {
                    state
                } else {
                    LaneState::Draining { since: now }
                }
            }
            LaneState::Draining { since } => {
                let elapsed_secs = now.since(since) as f32 * tick_duration_secs;
                if elapsed_secs >= self.config.close_grace_window_sec {
                    LaneState::Closed
                } else {
                    state
                }
            }
            other => other,
        }
    }

    /// Among currently `Closed` lanes, pick the first one to auto-promote to
    /// `Confirming` if the average queue length across `Open` lanes exceeds
    /// `queue_pressure_threshold`. Returns `None` if no promotion is needed
    /// or no closed lane is available.
    pub fn auto_promote(
        &self,
        lane_states: &[LaneState],
        queue_lengths: &[u32],
    ) -> Option<usize> {
        let open_lanes: Vec<usize> = lane_states
            .iter()
            .enumerate()
            .filter(|(_, s)| matches!(s, LaneState::Open))
            .map(|(i, _)| i)
            .collect();

        if open_lanes.is_empty() {
            return lane_states
                .iter()
                .position(|s| matches!(s, LaneState::Closed));
        }

        let total: u32 = open_lanes.iter().map(|&i| queue_lengths[i]).sum();
        let avg = total as f32 / open_lanes.len() as f32;
        if avg <= self.config.queue_pressure_threshold {
            return None;
        }

        lane_states
            .iter()
            .position(|s| matches!(s, LaneState::Closed))
    }
}
