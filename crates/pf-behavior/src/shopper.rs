//! Shopper FSM: SPAWNING -> ENTERING -> BROWSING -> APPROACHING_QUEUE ->
//! QUEUEING -> SERVICING -> EXITING -> DONE.

use pf_agent::{ShopperBudget, ShopperState};
use pf_core::{AgentId, AgentRng, LaneId, Vec2};
use pf_scene::ZoneRole;

use crate::context::SimContext;
use crate::intent::Intent;
use crate::lanestate::LaneState;

/// Consecutive failed goal-pick attempts before a shopper gives up and
/// heads for the exit.
const MAX_FAILED_GOAL_PICKS: u8 = 3;
/// Mean service duration at the register, in seconds.
const MEAN_SERVICE_SECS: f32 = 90.0;
/// Probability of idling at a browsing waypoint before picking the next one.
const PAUSE_PROBABILITY: f64 = 0.3;
const MIN_PAUSE_SECS: f32 = 3.0;
const MAX_PAUSE_SECS: f32 = 10.0;

/// Advance one shopper's FSM by one tick.
///
/// Returns the new `(ShopperState, ShopperBudget)` and any intents for
/// pf-sim to apply. The caller (pf-behavior's dispatch in `model.rs`) is
/// responsible for writing the returned state back into `AgentStore`.
pub fn update(
    agent: AgentId,
    state: &ShopperState,
    budget: &ShopperBudget,
    position: Vec2,
    path_waypoints_remaining: usize,
    ctx: &SimContext<'_>,
    rng: &mut AgentRng,
) -> (ShopperState, ShopperBudget, Vec<Intent>) {
    let mut budget = budget.clone();

    if ctx.path_failed[agent.index()] {
        budget.failed_goal_picks = budget.failed_goal_picks.saturating_add(1);
        if budget.failed_goal_picks >= MAX_FAILED_GOAL_PICKS {
            let target = nearest_entrance(ctx, position);
            return (ShopperState::Exiting, budget, vec![Intent::SetDestination(target)]);
        }
    }

    let at_destination = path_waypoints_remaining == 0;

    match state {
        ShopperState::Spawning { wake_at } => {
            if ctx.tick >= *wake_at {
                let target = nearest_shopping_point(ctx, rng, position);
                (ShopperState::Entering, budget, vec![Intent::SetDestination(target)])
            } else {
                (state.clone(), budget, vec![])
            }
        }

        ShopperState::Entering => {
            if at_destination {
                (ShopperState::Browsing { pause_until: None }, budget, vec![])
            } else {
                (state.clone(), budget, vec![])
            }
        }

        ShopperState::Browsing { pause_until } => {
            budget.elapsed_browsing_secs += ctx.tick_duration_secs * ctx.browsing_speed_multiplier;

            if budget.elapsed_browsing_secs >= budget.stay_budget_secs {
                if ctx.enable_cashiers && rng.gen_bool(ctx.checkout_prob_multiplier as f64) {
                    if let Some(lane) = shortest_queue_lane(ctx) {
                        let target = ctx.scene.zones[ctx.scene.lanes[lane.index()].queue_zone.index()].centroid();
                        return (
                            ShopperState::ApproachingQueue { lane },
                            budget,
                            vec![Intent::SetDestination(target)],
                        );
                    }
                }
                let target = nearest_entrance(ctx, position);
                return (ShopperState::Exiting, budget, vec![Intent::SetDestination(target)]);
            }

            if at_destination {
                if let Some(until) = pause_until {
                    if ctx.tick < *until {
                        return (state.clone(), budget, vec![]);
                    }
                    // Pause elapsed: fall through and pick the next waypoint.
                } else {
                    if ctx.enable_cashiers && rng.gen_bool(ctx.checkout_prob_multiplier as f64) {
                        if let Some(lane) = shortest_queue_lane(ctx) {
                            let target = ctx.scene.zones[ctx.scene.lanes[lane.index()].queue_zone.index()].centroid();
                            return (
                                ShopperState::ApproachingQueue { lane },
                                budget,
                                vec![Intent::SetDestination(target)],
                            );
                        }
                    }

                    if rng.gen_bool(PAUSE_PROBABILITY) {
                        let pause_secs = rng.gen_range(MIN_PAUSE_SECS..=MAX_PAUSE_SECS);
                        let pause_ticks = (pause_secs / ctx.tick_duration_secs).ceil().max(1.0) as u64;
                        return (
                            ShopperState::Browsing { pause_until: Some(ctx.tick.offset(pause_ticks)) },
                            budget,
                            vec![],
                        );
                    }
                }

                let target = nearest_shopping_point(ctx, rng, position);
                (
                    ShopperState::Browsing { pause_until: None },
                    budget,
                    vec![Intent::SetDestination(target)],
                )
            } else {
                (state.clone(), budget, vec![])
            }
        }

        ShopperState::ApproachingQueue { lane } => {
            if at_destination {
                let slot = ctx.lane_queue_length(*lane);
                (
                    ShopperState::Queueing { lane: *lane, slot },
                    budget,
                    vec![Intent::JoinQueue { lane: *lane }],
                )
            } else {
                (state.clone(), budget, vec![])
            }
        }

        ShopperState::Queueing { lane, slot } => {
            // A lane winding down releases anyone not already at the register;
            // they fall back to browsing and pick another lane later.
            if matches!(ctx.lane_state(*lane), LaneState::Draining { .. } | LaneState::Closed) {
                return (
                    ShopperState::Browsing { pause_until: None },
                    budget,
                    vec![Intent::LeaveQueue { lane: *lane }],
                );
            }

            if *slot == 0 && ctx.lane_state(*lane).accepts_new_customers() && ctx.lane_cashier_ready(*lane) {
                let service_secs = rng.gen_range((MEAN_SERVICE_SECS * 0.5)..(MEAN_SERVICE_SECS * 1.5));
                let service_ticks = (service_secs / ctx.tick_duration_secs).ceil().max(1.0) as u64;
                (
                    ShopperState::Servicing { lane: *lane, until: ctx.tick.offset(service_ticks) },
                    budget,
                    vec![Intent::LeaveQueue { lane: *lane }],
                )
            } else {
                (state.clone(), budget, vec![])
            }
        }

        ShopperState::Servicing { lane: _, until } => {
            if ctx.tick >= *until {
                let target = nearest_entrance(ctx, position);
                (ShopperState::Exiting, budget, vec![Intent::SetDestination(target)])
            } else {
                (state.clone(), budget, vec![])
            }
        }

        ShopperState::Exiting => {
            if at_destination {
                (ShopperState::Done, budget, vec![])
            } else {
                (state.clone(), budget, vec![])
            }
        }

        ShopperState::Done => (ShopperState::Done, budget, vec![]),
    }
}

fn nearest_entrance(ctx: &SimContext<'_>, position: Vec2) -> Vec2 {
    ctx.scene
        .entrances
        .iter()
        .map(|e| e.centroid())
        .min_by(|a, b| {
            position
                .distance_sq(*a)
                .partial_cmp(&position.distance_sq(*b))
                .unwrap()
        })
        .unwrap_or(position)
}

/// Pick a random point inside a random Shopping-role zone.
fn nearest_shopping_point(ctx: &SimContext<'_>, rng: &mut AgentRng, fallback: Vec2) -> Vec2 {
    let shopping_zones: Vec<_> = ctx.scene.zones_by_role(ZoneRole::Shopping).collect();
    match rng.choose(&shopping_zones) {
        Some((_, zone)) => {
            let (min, max) = zone.aabb();
            Vec2::new(
                rng.gen_range(min.x..=max.x.max(min.x + 0.01)),
                rng.gen_range(min.y..=max.y.max(min.y + 0.01)),
            )
        }
        None => fallback,
    }
}

fn shortest_queue_lane(ctx: &SimContext<'_>) -> Option<LaneId> {
    ctx.lane_states
        .iter()
        .enumerate()
        .filter(|(_, s)| s.accepts_new_customers())
        .min_by_key(|(i, _)| ctx.lane_queue_lengths[*i])
        .map(|(i, _)| LaneId(i as u16))
}
