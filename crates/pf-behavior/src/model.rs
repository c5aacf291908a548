//! Single dispatch point from an agent id to its FSM update.

use pf_agent::AgentKind;
use pf_core::{AgentId, AgentRng};

use crate::context::SimContext;
use crate::error::{BehaviorError, BehaviorResult};
use crate::intent::Intent;
use crate::{cashier, shopper};

/// Update one agent's FSM state for the current tick.
///
/// Dispatches on the agent's [`AgentKind`] variant and returns the new
/// `AgentKind` plus any [`Intent`]s for pf-sim to apply. This is the only
/// place that knows both FSMs exist — everything else in the crate is
/// shopper- or cashier-specific.
pub fn update(
    agent: AgentId,
    ctx: &SimContext<'_>,
    rng: &mut AgentRng,
) -> BehaviorResult<(AgentKind, Vec<Intent>)> {
    let kind = ctx.agents.kind[agent.index()]
        .as_ref()
        .ok_or(BehaviorError::DeadAgent(agent))?;

    let position = ctx.agents.position[agent.index()];
    let waypoints_remaining = ctx.agents.path_waypoints[agent.index()].len();

    match kind {
        AgentKind::Shopper { state, budget } => {
            let (state, budget, intents) =
                shopper::update(agent, state, budget, position, waypoints_remaining, ctx, rng);
            Ok((AgentKind::Shopper { state, budget }, intents))
        }
        AgentKind::Cashier { state, shift } => {
            let assigned_lane = ctx.cashier_assigned_lane[agent.index()];
            let state = cashier::update(agent, state, shift, assigned_lane, ctx, rng);
            Ok((AgentKind::Cashier { state, shift: shift.clone() }, vec![]))
        }
    }
}
