//! Unit tests for pf-steering.

use pf_core::{AgentId, EngineRng, Vec2};
use pf_scene::navgrid::build_navgrid_with_cell_size;
use pf_scene::scene::{Obstacle, Scene};

use crate::engine::SteeringEngine;
use crate::params::SteeringParams;
use crate::state::SteeringState;

fn open_scene() -> Scene {
    Scene::new(10.0, 10.0, vec![], vec![], vec![], vec![]).unwrap()
}

fn agent_rng() -> pf_core::AgentRng {
    EngineRng::new(1).spawn_agent_rng(AgentId(0))
}

#[cfg(test)]
mod desired_velocity {
    use super::*;

    #[test]
    fn points_toward_target_at_max_speed() {
        let engine = SteeringEngine::default();
        let v = engine.desired_velocity(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0));
        assert!((v.length() - engine.params.max_speed_mps).abs() < 1e-4);
        assert!(v.x > 0.0 && v.y > 0.0);
    }

    #[test]
    fn zero_when_already_at_target() {
        let engine = SteeringEngine::default();
        let v = engine.desired_velocity(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0));
        assert_eq!(v, Vec2::ZERO);
    }
}

#[cfg(test)]
mod obstacle_avoidance {
    use super::*;

    #[test]
    fn pushes_away_from_nearby_wall() {
        let obstacle = Obstacle {
            center: Vec2::new(5.0, 5.5),
            half_extents: Vec2::new(2.0, 0.25),
            rotation_rad: 0.0,
        };
        let scene = Scene::new(10.0, 10.0, vec![obstacle], vec![], vec![], vec![]).unwrap();
        let grid = build_navgrid_with_cell_size(&scene, 0.25);
        let engine = SteeringEngine::default();

        let push = engine.obstacle_avoidance(Vec2::new(5.0, 5.0), &grid);
        assert!(push.y < 0.0, "should push away from the wall to the south");
    }

    #[test]
    fn zero_far_from_any_obstacle() {
        let scene = open_scene();
        let grid = build_navgrid_with_cell_size(&scene, 0.25);
        let engine = SteeringEngine::default();
        let push = engine.obstacle_avoidance(Vec2::new(5.0, 5.0), &grid);
        assert_eq!(push, Vec2::ZERO);
    }
}

#[cfg(test)]
mod separation {
    use super::*;

    #[test]
    fn pushes_away_from_close_neighbor() {
        let engine = SteeringEngine::default();
        let push = engine.separation(Vec2::new(0.0, 0.0), &[Vec2::new(0.2, 0.0)]);
        assert!(push.x < 0.0);
    }

    #[test]
    fn ignores_distant_neighbor() {
        let engine = SteeringEngine::default();
        let push = engine.separation(Vec2::new(0.0, 0.0), &[Vec2::new(50.0, 50.0)]);
        assert_eq!(push, Vec2::ZERO);
    }

    #[test]
    fn closer_neighbor_pushes_harder() {
        let engine = SteeringEngine::default();
        let near = engine.separation(Vec2::ZERO, &[Vec2::new(0.1, 0.0)]).length();
        let far = engine.separation(Vec2::ZERO, &[Vec2::new(0.5, 0.0)]).length();
        assert!(near > far);
    }
}

#[cfg(test)]
mod wobble {
    use super::*;

    #[test]
    fn amplitude_bounded_by_params() {
        let engine = SteeringEngine::default();
        for i in 0..20 {
            let state = SteeringState { wobble_phase_secs: i as f32 * 0.37 };
            let w = engine.wobble(state);
            assert!(w.length() <= engine.params.wobble_amplitude_mps * 2f32.sqrt() + 1e-4);
        }
    }
}

#[cfg(test)]
mod resolve_move {
    use super::*;

    #[test]
    fn unobstructed_move_applies_full_velocity() {
        let scene = open_scene();
        let grid = build_navgrid_with_cell_size(&scene, 0.25);
        let engine = SteeringEngine::default();
        let mut rng = agent_rng();

        let (new_pos, blocked) =
            engine.resolve_move(Vec2::new(5.0, 5.0), Vec2::new(1.0, 0.0), 1.0, &grid, &mut rng);
        assert!(!blocked);
        assert!((new_pos.x - 6.0).abs() < 1e-4);
    }

    #[test]
    fn diagonal_wall_retries_single_axis() {
        // Wall blocks straight-ahead diagonal movement but the x-only slide
        // should still land in a walkable cell.
        let wall = Obstacle {
            center: Vec2::new(6.0, 6.0),
            half_extents: Vec2::new(0.2, 0.2),
            rotation_rad: 0.0,
        };
        let scene = Scene::new(10.0, 10.0, vec![wall], vec![], vec![], vec![]).unwrap();
        let grid = build_navgrid_with_cell_size(&scene, 0.25);
        let engine = SteeringEngine::default();
        let mut rng = agent_rng();

        let (_, blocked) =
            engine.resolve_move(Vec2::new(5.5, 5.5), Vec2::new(1.0, 1.0), 1.0, &grid, &mut rng);
        assert!(!blocked);
    }

    #[test]
    fn fully_enclosed_agent_is_marked_blocked() {
        let walls = vec![
            Obstacle { center: Vec2::new(3.0, 2.0), half_extents: Vec2::new(1.5, 0.1), rotation_rad: 0.0 },
            Obstacle { center: Vec2::new(3.0, 4.0), half_extents: Vec2::new(1.5, 0.1), rotation_rad: 0.0 },
            Obstacle { center: Vec2::new(1.6, 3.0), half_extents: Vec2::new(0.1, 1.1), rotation_rad: 0.0 },
            Obstacle { center: Vec2::new(4.4, 3.0), half_extents: Vec2::new(0.1, 1.1), rotation_rad: 0.0 },
        ];
        let scene = Scene::new(10.0, 10.0, walls, vec![], vec![], vec![]).unwrap();
        let grid = build_navgrid_with_cell_size(&scene, 0.2);
        let engine = SteeringEngine::default();
        let mut rng = agent_rng();

        let (_, blocked) =
            engine.resolve_move(Vec2::new(3.0, 3.0), Vec2::new(5.0, 5.0), 1.0, &grid, &mut rng);
        assert!(blocked);
    }
}
