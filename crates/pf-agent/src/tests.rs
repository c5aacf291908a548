//! Unit tests for pf-agent.

#[cfg(test)]
mod world {
    use crate::builder::AgentWorld;
    use pf_core::{EngineRng, Tick, Vec2};

    #[test]
    fn spawn_shopper_is_live_and_spawning() {
        let mut world = AgentWorld::new();
        let mut rng = EngineRng::new(1);
        let id = world.spawn_shopper(Vec2::new(1.0, 1.0), Tick(0), 600.0, Tick(0), &mut rng);
        assert!(world.store.is_alive(id));
        assert_eq!(world.store.len(), 1);
        let kind = world.store.kind[id.index()].as_ref().unwrap();
        assert_eq!(kind.label(), "SPAWNING");
    }

    #[test]
    fn spawn_cashier_is_inactive() {
        let mut world = AgentWorld::new();
        let mut rng = EngineRng::new(1);
        let id = world.spawn_cashier(Vec2::new(0.0, 0.0), Tick(36000), Tick(0), &mut rng);
        let kind = world.store.kind[id.index()].as_ref().unwrap();
        assert_eq!(kind.label(), "INACTIVE");
    }

    #[test]
    fn despawn_frees_slot_for_reuse() {
        let mut world = AgentWorld::new();
        let mut rng = EngineRng::new(7);
        let a = world.spawn_shopper(Vec2::ZERO, Tick(0), 60.0, Tick(0), &mut rng);
        world.store.despawn(a, &mut world.rngs);
        assert!(!world.store.is_alive(a));
        assert_eq!(world.store.len(), 0);

        let b = world.spawn_shopper(Vec2::ZERO, Tick(0), 60.0, Tick(0), &mut rng);
        assert_eq!(b, a, "freed slot should be reused rather than growing");
        assert!(world.store.is_alive(b));
    }

    #[test]
    fn prune_terminal_removes_only_done_agents() {
        use crate::state::{AgentKind, ShopperBudget, ShopperState};

        let mut world = AgentWorld::new();
        let mut rng = EngineRng::new(3);
        let alive = world.spawn_shopper(Vec2::ZERO, Tick(0), 60.0, Tick(0), &mut rng);
        let done = world.spawn_shopper(Vec2::ZERO, Tick(0), 60.0, Tick(0), &mut rng);
        world.store.kind[done.index()] = Some(AgentKind::Shopper {
            state: ShopperState::Done,
            budget: ShopperBudget::default(),
        });

        let pruned = world.prune_terminal();
        assert_eq!(pruned, vec![done]);
        assert!(world.store.is_alive(alive));
        assert!(!world.store.is_alive(done));
    }

    #[test]
    fn live_ids_are_ascending() {
        let mut world = AgentWorld::new();
        let mut rng = EngineRng::new(2);
        for _ in 0..5 {
            world.spawn_shopper(Vec2::ZERO, Tick(0), 60.0, Tick(0), &mut rng);
        }
        let ids: Vec<u32> = world.store.live_ids().map(|id| id.0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }
}

#[cfg(test)]
mod rngs {
    use crate::builder::AgentWorld;
    use pf_core::{EngineRng, Tick, Vec2};

    #[test]
    fn same_seed_same_draws() {
        let mut world_a = AgentWorld::new();
        let mut rng_a = EngineRng::new(42);
        let id_a = world_a.spawn_shopper(Vec2::ZERO, Tick(0), 60.0, Tick(0), &mut rng_a);

        let mut world_b = AgentWorld::new();
        let mut rng_b = EngineRng::new(42);
        let id_b = world_b.spawn_shopper(Vec2::ZERO, Tick(0), 60.0, Tick(0), &mut rng_b);

        let a: f32 = world_a.rngs.get_mut(id_a).random();
        let b: f32 = world_b.rngs.get_mut(id_b).random();
        assert_eq!(a, b);
    }

    #[test]
    fn different_agents_diverge() {
        let mut world = AgentWorld::new();
        let mut rng = EngineRng::new(5);
        let a = world.spawn_shopper(Vec2::ZERO, Tick(0), 60.0, Tick(0), &mut rng);
        let b = world.spawn_shopper(Vec2::ZERO, Tick(0), 60.0, Tick(0), &mut rng);
        let av: u64 = world.rngs.get_mut(a).random();
        let bv: u64 = world.rngs.get_mut(b).random();
        assert_ne!(av, bv);
    }
}
