//! Per-kind agent substate.
//!
//! Shopper and cashier agents share the position/velocity/path envelope
//! (held directly in [`crate::store::AgentStore`]'s SoA columns) but have
//! disjoint behavior and fields. Rather than a type-erased component
//! registry, each agent carries exactly one of these two substates — a
//! closed, fully-known schema needs no generic indirection.

use pf_core::{LaneId, Tick};

/// Shopper FSM state: SPAWNING → ENTERING → BROWSING →
/// APPROACHING_QUEUE → QUEUEING → SERVICING → EXITING → DONE.
#[derive(Clone, Debug)]
pub enum ShopperState {
    Spawning { wake_at: Tick },
    Entering,
    Browsing { pause_until: Option<Tick> },
    ApproachingQueue { lane: LaneId },
    Queueing { lane: LaneId, slot: u32 },
    Servicing { lane: LaneId, until: Tick },
    Exiting,
    Done,
}

impl ShopperState {
    pub fn label(&self) -> &'static str {
        match self {
            ShopperState::Spawning { .. } => "SPAWNING",
            ShopperState::Entering => "ENTERING",
            ShopperState::Browsing { .. } => "BROWSING",
            ShopperState::ApproachingQueue { .. } => "APPROACHING_QUEUE",
            ShopperState::Queueing { .. } => "QUEUEING",
            ShopperState::Servicing { .. } => "SERVICING",
            ShopperState::Exiting => "EXITING",
            ShopperState::Done => "DONE",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ShopperState::Done)
    }
}

/// Per-shopper bookkeeping that outlives any single state (browsing budget,
/// failed-goal-pick counter for the "three consecutive picks fail" rule).
#[derive(Clone, Debug, Default)]
pub struct ShopperBudget {
    pub stay_budget_secs: f32,
    pub elapsed_browsing_secs: f32,
    pub failed_goal_picks: u8,
}

/// Cashier FSM state: INACTIVE → WORKING → ON_BREAK → OFF_SHIFT.
#[derive(Clone, Debug)]
pub enum CashierState {
    Inactive,
    Working { lane: LaneId },
    OnBreak { lane: LaneId, until: Tick },
    OffShift,
}

impl CashierState {
    pub fn label(&self) -> &'static str {
        match self {
            CashierState::Inactive => "INACTIVE",
            CashierState::Working { .. } => "WORKING",
            CashierState::OnBreak { .. } => "ON_BREAK",
            CashierState::OffShift => "OFF_SHIFT",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, CashierState::OffShift)
    }
}

/// Per-cashier bookkeeping fixed at spawn: shift end time.
#[derive(Clone, Debug, Default)]
pub struct CashierShift {
    pub shift_end: Tick,
}

/// Which kind of agent a slot holds, carrying its substate.
#[derive(Clone, Debug)]
pub enum AgentKind {
    Shopper {
        state: ShopperState,
        budget: ShopperBudget,
    },
    Cashier {
        state: CashierState,
        shift: CashierShift,
    },
}

impl AgentKind {
    pub fn label(&self) -> &'static str {
        match self {
            AgentKind::Shopper { state, .. } => state.label(),
            AgentKind::Cashier { state, .. } => state.label(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        match self {
            AgentKind::Shopper { state, .. } => state.is_terminal(),
            AgentKind::Cashier { state, .. } => state.is_terminal(),
        }
    }
}
