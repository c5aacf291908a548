//! Intents — the mutations an FSM update wants applied during the tick's
//! apply phase.
//!
//! FSM updates never mutate `AgentStore`, `NavGrid`, or lane queues directly;
//! they return `Intent`s and let pf-sim apply them sequentially, in
//! ascending agent-id order, so state mutation is never order-dependent on
//! how the intent phase happened to visit agents.

use pf_core::{LaneId, Vec2};

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Request a new pathfinding goal. pf-sim runs the pathfinder and
    /// installs the resulting waypoints into the agent's SoA path buffer.
    SetDestination(Vec2),

    /// Join the back of a checkout lane's queue.
    JoinQueue { lane: LaneId },

    /// Leave a checkout lane's queue (reached the front and began service,
    /// or gave up and walked away).
    LeaveQueue { lane: LaneId },
}
