//! Construction helpers for populating an [`AgentStore`] before a run starts
//! and for spawning new agents mid-run.

use pf_core::{AgentId, EngineRng, Tick, Vec2};

use crate::state::{AgentKind, CashierShift, CashierState, ShopperBudget, ShopperState};
use crate::store::{AgentRngs, AgentStore};

/// Owns an [`AgentStore`] and its matching [`AgentRngs`], and funnels every
/// spawn through the shared [`EngineRng`] stream so per-agent RNGs stay
/// reproducible across runs with the same seed.
pub struct AgentWorld {
    pub store: AgentStore,
    pub rngs: AgentRngs,
}

impl AgentWorld {
    pub fn new() -> Self {
        Self {
            store: AgentStore::new(),
            rngs: AgentRngs::new(),
        }
    }

    /// Spawn a shopper entering at `position`, woken at `wake_at`.
    pub fn spawn_shopper(
        &mut self,
        position: Vec2,
        wake_at: Tick,
        stay_budget_secs: f32,
        now: Tick,
        engine_rng: &mut EngineRng,
    ) -> AgentId {
        let kind = AgentKind::Shopper {
            state: ShopperState::Spawning { wake_at },
            budget: ShopperBudget {
                stay_budget_secs,
                elapsed_browsing_secs: 0.0,
                failed_goal_picks: 0,
            },
        };
        self.store
            .spawn(kind, position, now, &mut self.rngs, engine_rng)
    }

    /// Spawn a cashier, inactive until assigned to a lane.
    pub fn spawn_cashier(
        &mut self,
        position: Vec2,
        shift_end: Tick,
        now: Tick,
        engine_rng: &mut EngineRng,
    ) -> AgentId {
        let kind = AgentKind::Cashier {
            state: CashierState::Inactive,
            shift: CashierShift { shift_end },
        };
        self.store
            .spawn(kind, position, now, &mut self.rngs, engine_rng)
    }

    /// Remove every agent currently in a terminal state (DONE / OFF_SHIFT).
    /// Returns the ids that were pruned, for publish/logging purposes.
    pub fn prune_terminal(&mut self) -> Vec<AgentId> {
        let terminal = self.store.terminal_ids();
        for &id in &terminal {
            self.store.despawn(id, &mut self.rngs);
        }
        terminal
    }
}

impl Default for AgentWorld {
    fn default() -> Self {
        Self::new()
    }
}
