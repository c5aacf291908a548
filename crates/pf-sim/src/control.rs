//! The single-writer control mailbox: external commands the tick loop drains
//! at the top of every tick.

use std::collections::BTreeMap;

use crossbeam_channel::Sender;

use pf_core::{LaneId, Tick};

use crate::observer::LaneSummary;

/// A request deposited by an external controller (the CLI's stdin thread, an
/// admin socket, a test harness). `Sim::run` drains all pending messages
/// before processing each tick, so effects are visible starting that tick.
#[derive(Debug, Clone)]
pub enum ControlMessage {
    /// Force a lane open (`true`) or closed (`false`). Still subject to the
    /// lane controller's confirm/drain hysteresis windows.
    SetLaneState { lane: LaneId, open: bool },
    /// Adjust one or more stress-test multipliers at runtime.
    SetConfig(ConfigUpdate),
    /// Finish the in-flight tick, then stop `Sim::run`.
    Stop,
    /// Request a status snapshot; the reply is sent back on `reply`.
    GetStatus(Sender<Status>),
}

#[derive(Debug, Clone, Default)]
pub struct ConfigUpdate {
    pub arrival_rate_multiplier: Option<f32>,
    pub checkout_prob_multiplier: Option<f32>,
    pub browsing_speed_multiplier: Option<f32>,
}

/// A point-in-time summary of the running simulation, returned by
/// `ControlMessage::GetStatus`.
#[derive(Debug, Clone)]
pub struct Status {
    pub tick: Tick,
    pub agent_count: usize,
    pub shopper_state_counts: BTreeMap<&'static str, u32>,
    pub cashier_state_counts: BTreeMap<&'static str, u32>,
    pub lanes: Vec<LaneSummary>,
    pub config_warnings: Vec<String>,
}
