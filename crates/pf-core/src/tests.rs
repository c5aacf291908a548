//! Unit tests for pf-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, CellId, LaneId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(AgentId(0) < AgentId(1));
        assert!(CellId(100) > CellId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(CellId::INVALID.0, u32::MAX);
        assert_eq!(LaneId::INVALID.0, u16::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod vec2 {
    use crate::Vec2;

    #[test]
    fn zero_distance() {
        let p = Vec2::new(3.0, 4.0);
        assert!(p.distance(p) < 1e-6);
    }

    #[test]
    fn distance_3_4_5_triangle() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn normalized_is_unit_length() {
        let v = Vec2::new(3.0, 4.0).normalized();
        assert!((v.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn normalized_zero_is_zero() {
        assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
    }

    #[test]
    fn clamped_to_length_caps_magnitude() {
        let v = Vec2::new(10.0, 0.0).clamped_to_length(2.0);
        assert!((v.length() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn within_radius() {
        let center = Vec2::new(0.0, 0.0);
        assert!(Vec2::new(1.0, 0.0).within_radius(center, 2.0));
        assert!(!Vec2::new(5.0, 0.0).within_radius(center, 2.0));
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
    }

    #[test]
    fn clock_elapsed_at_10hz() {
        let mut clock = SimClock::from_frequency(0, 10); // 100 ms/tick
        assert_eq!(clock.elapsed_ms(), 0);
        clock.advance();
        assert_eq!(clock.elapsed_ms(), 100);
        clock.advance();
        assert_eq!(clock.elapsed_ms(), 200);
    }

    #[test]
    fn ticks_for_secs_rounds_up() {
        let clock = SimClock::from_frequency(0, 10);
        assert_eq!(clock.ticks_for_secs(6.0), 60);
        assert_eq!(clock.ticks_for_secs(0.05), 1);
    }

    #[test]
    fn tick_duration_secs_matches_frequency() {
        let clock = SimClock::from_frequency(0, 10);
        assert!((clock.tick_duration_secs() - 0.1).abs() < 1e-6);
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, EngineRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = EngineRng::new(12345);
        let mut r2 = EngineRng::new(12345);
        for _ in 0..100 {
            let a: f32 = r1.random();
            let b: f32 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn agent_rngs_diverge_for_same_draw() {
        let mut engine = EngineRng::new(1);
        let mut a0 = engine.spawn_agent_rng(AgentId(0));
        let mut engine2 = EngineRng::new(1);
        let mut a1 = engine2.spawn_agent_rng(AgentId(1));
        let x: u64 = a0.random();
        let y: u64 = a1.random();
        assert_ne!(x, y, "seeds for different agent ids should diverge");
    }

    #[test]
    fn gen_range_in_bounds() {
        let mut rng = EngineRng::new(0);
        for _ in 0..1000 {
            let v = rng.gen_range(0.0f32..1.0);
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = EngineRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }
}

#[cfg(test)]
mod config {
    use crate::EngineConfig;

    #[test]
    fn defaults_need_no_clamping() {
        let mut cfg = EngineConfig::default();
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn out_of_range_frequency_is_clamped_with_warning() {
        let mut cfg = EngineConfig {
            frequency_hz: 999,
            ..EngineConfig::default()
        };
        let warnings = cfg.validate();
        assert_eq!(cfg.frequency_hz, 60);
        assert!(warnings.iter().any(|w| w.contains("frequency_hz")));
    }

    #[test]
    fn tick_duration_matches_frequency() {
        let cfg = EngineConfig {
            frequency_hz: 20,
            ..EngineConfig::default()
        };
        assert!((cfg.tick_duration_secs() - 0.05).abs() < 1e-6);
    }
}
