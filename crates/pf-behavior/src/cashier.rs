//! Cashier FSM: INACTIVE -> WORKING -> ON_BREAK -> OFF_SHIFT.

use pf_agent::{CashierShift, CashierState};
use pf_core::{AgentId, AgentRng, LaneId};

use crate::context::SimContext;

const MEAN_BREAK_SECS: f32 = 600.0;

/// Advance one cashier's FSM by one tick.
///
/// `assigned_lane` comes from the lane-state controller's staffing decision
/// (made by pf-sim, which owns the mapping from idle cashiers to lanes
/// needing a worker); `None` means no lane currently wants this cashier.
pub fn update(
    _agent: AgentId,
    state: &CashierState,
    shift: &CashierShift,
    assigned_lane: Option<LaneId>,
    ctx: &SimContext<'_>,
    rng: &mut AgentRng,
) -> CashierState {
    if ctx.tick >= shift.shift_end {
        return CashierState::OffShift;
    }

    match state {
        CashierState::Inactive => match assigned_lane {
            Some(lane) => CashierState::Working { lane },
            None => CashierState::Inactive,
        },

        CashierState::Working { lane } => {
            let hazard_per_sec = ctx.cashier_break_prob_per_hour / 3600.0;
            if rng.gen_bool((hazard_per_sec * ctx.tick_duration_secs) as f64) {
                let break_secs = rng.gen_range((MEAN_BREAK_SECS * 0.5)..(MEAN_BREAK_SECS * 1.5));
                let break_ticks = (break_secs / ctx.tick_duration_secs).ceil().max(1.0) as u64;
                CashierState::OnBreak { lane: *lane, until: ctx.tick.offset(break_ticks) }
            } else {
                CashierState::Working { lane: *lane }
            }
        }

        CashierState::OnBreak { lane, until } => {
            if ctx.tick >= *until {
                CashierState::Working { lane: *lane }
            } else {
                CashierState::OnBreak { lane: *lane, until: *until }
            }
        }

        CashierState::OffShift => CashierState::OffShift,
    }
}
