//! Unit tests for pf-scene.
//!
//! All tests use small hand-built scenes so they run without any external
//! fixtures.

#[cfg(test)]
mod scene_validation {
    use crate::scene::{Entrance, Lane, Obstacle, Scene, Zone, ZoneRole};
    use pf_core::{LaneId, Vec2, ZoneId};

    fn lane_zones() -> (Zone, Zone) {
        let queue = Zone {
            role: ZoneRole::Queue,
            lane_id: Some(LaneId(0)),
            points: vec![
                Vec2::new(5.0, 1.0),
                Vec2::new(7.0, 1.0),
                Vec2::new(7.0, 4.0),
                Vec2::new(5.0, 4.0),
            ],
        };
        let service = Zone {
            role: ZoneRole::Service,
            lane_id: Some(LaneId(0)),
            points: vec![
                Vec2::new(5.0, 4.0),
                Vec2::new(7.0, 4.0),
                Vec2::new(7.0, 5.0),
                Vec2::new(5.0, 5.0),
            ],
        };
        (queue, service)
    }

    #[test]
    fn valid_scene_with_matched_lane() {
        let (queue, service) = lane_zones();
        let lane = Lane {
            id: LaneId(0),
            queue_zone: ZoneId(0),
            service_zone: ZoneId(1),
            anchor_point: Vec2::new(6.0, 4.5),
            flow_direction: Vec2::new(0.0, -1.0),
        };
        let scene = Scene::new(10.0, 10.0, vec![], vec![], vec![queue, service], vec![lane]);
        assert!(scene.is_ok());
    }

    #[test]
    fn dangling_zone_lane_rejected() {
        let zone = Zone {
            role: ZoneRole::Queue,
            lane_id: Some(LaneId(9)),
            points: vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ],
        };
        let scene = Scene::new(10.0, 10.0, vec![], vec![], vec![zone], vec![]);
        assert!(scene.is_err());
    }

    #[test]
    fn obstacle_outside_bounds_rejected() {
        let obstacle = Obstacle {
            center: Vec2::new(1000.0, 1000.0),
            half_extents: Vec2::new(1.0, 1.0),
            rotation_rad: 0.0,
        };
        let scene = Scene::new(10.0, 10.0, vec![obstacle], vec![], vec![], vec![]);
        assert!(scene.is_err());
    }

    #[test]
    fn entrance_overlapping_obstacle_rejected() {
        let obstacle = Obstacle {
            center: Vec2::new(2.0, 2.0),
            half_extents: Vec2::new(1.0, 1.0),
            rotation_rad: 0.0,
        };
        let entrance = Entrance {
            points: vec![
                Vec2::new(1.5, 1.5),
                Vec2::new(2.5, 1.5),
                Vec2::new(2.5, 2.5),
                Vec2::new(1.5, 2.5),
            ],
        };
        let scene = Scene::new(10.0, 10.0, vec![obstacle], vec![entrance], vec![], vec![]);
        assert!(scene.is_err());
    }

    #[test]
    fn zone_contains_point_inside_and_outside() {
        let zone = Zone {
            role: ZoneRole::Shopping,
            lane_id: None,
            points: vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(4.0, 0.0),
                Vec2::new(4.0, 4.0),
                Vec2::new(0.0, 4.0),
            ],
        };
        assert!(zone.contains(Vec2::new(2.0, 2.0)));
        assert!(!zone.contains(Vec2::new(5.0, 5.0)));
    }
}

#[cfg(test)]
mod navgrid_tests {
    use crate::navgrid::build_navgrid_with_cell_size;
    use crate::scene::{Obstacle, Scene};
    use pf_core::Vec2;

    #[test]
    fn empty_scene_is_fully_walkable() {
        let scene = Scene::new(5.0, 5.0, vec![], vec![], vec![], vec![]).unwrap();
        let grid = build_navgrid_with_cell_size(&scene, 0.5);
        for j in 0..grid.height_cells {
            for i in 0..grid.width_cells {
                assert!(grid.walkable(i, j));
            }
        }
    }

    #[test]
    fn obstacle_blocks_its_cell() {
        let obstacle = Obstacle {
            center: Vec2::new(2.5, 2.5),
            half_extents: Vec2::new(0.5, 0.5),
            rotation_rad: 0.0,
        };
        let scene = Scene::new(5.0, 5.0, vec![obstacle], vec![], vec![], vec![]).unwrap();
        let grid = build_navgrid_with_cell_size(&scene, 0.5);
        let (i, j) = grid.cell_at(Vec2::new(2.5, 2.5));
        assert!(!grid.walkable(i, j));
    }

    #[test]
    fn nearest_walkable_escapes_obstacle() {
        let obstacle = Obstacle {
            center: Vec2::new(2.5, 2.5),
            half_extents: Vec2::new(1.0, 1.0),
            rotation_rad: 0.0,
        };
        let scene = Scene::new(10.0, 10.0, vec![obstacle], vec![], vec![], vec![]).unwrap();
        let grid = build_navgrid_with_cell_size(&scene, 0.5);
        let (i, j) = grid.cell_at(Vec2::new(2.5, 2.5));
        assert!(!grid.walkable(i, j));
        let (ni, nj) = grid.nearest_walkable(i, j).expect("should find a walkable cell");
        assert!(grid.walkable(ni, nj));
    }
}

#[cfg(test)]
mod zones_tests {
    use crate::scene::{Scene, Zone, ZoneRole};
    use crate::zones::ZoneIndex;
    use pf_core::Vec2;

    #[test]
    fn zones_containing_finds_the_right_zone() {
        let shopping = Zone {
            role: ZoneRole::Shopping,
            lane_id: None,
            points: vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(4.0, 0.0),
                Vec2::new(4.0, 4.0),
                Vec2::new(0.0, 4.0),
            ],
        };
        let scene = Scene::new(10.0, 10.0, vec![], vec![], vec![shopping], vec![]).unwrap();
        let idx = ZoneIndex::build(&scene);
        let hits = idx.zones_containing(&scene, Vec2::new(2.0, 2.0));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].1.role, ZoneRole::Shopping);

        let miss = idx.zones_containing(&scene, Vec2::new(9.0, 9.0));
        assert!(miss.is_empty());
    }
}

#[cfg(test)]
mod pathfinder_tests {
    use crate::navgrid::build_navgrid_with_cell_size;
    use crate::pathfinder::{AStarPathfinder, Pathfinder};
    use crate::scene::{Obstacle, Scene};
    use pf_core::Vec2;

    #[test]
    fn straight_line_path_in_open_room() {
        let scene = Scene::new(10.0, 10.0, vec![], vec![], vec![], vec![]).unwrap();
        let grid = build_navgrid_with_cell_size(&scene, 0.5);
        let path = AStarPathfinder
            .find_path(&grid, Vec2::new(0.5, 0.5), Vec2::new(9.0, 9.0))
            .unwrap();
        assert!(!path.waypoints.is_empty());
        let last = *path.waypoints.last().unwrap();
        assert!(last.distance(Vec2::new(9.0, 9.0)) < 1.0);
    }

    #[test]
    fn path_routes_around_wall() {
        // A wall spanning nearly the full width with a gap at y ~ 0.
        let wall = Obstacle {
            center: Vec2::new(5.0, 5.0),
            half_extents: Vec2::new(4.0, 0.25),
            rotation_rad: 0.0,
        };
        let scene = Scene::new(10.0, 10.0, vec![wall], vec![], vec![], vec![]).unwrap();
        let grid = build_navgrid_with_cell_size(&scene, 0.5);
        let path = AStarPathfinder
            .find_path(&grid, Vec2::new(5.0, 1.0), Vec2::new(5.0, 9.0))
            .unwrap();
        assert!(!path.waypoints.is_empty());
    }

    #[test]
    fn unreachable_goal_is_no_path() {
        // Fully enclosed box around the goal with no gap.
        let walls = vec![
            Obstacle { center: Vec2::new(5.0, 3.5), half_extents: Vec2::new(1.0, 0.1), rotation_rad: 0.0 },
            Obstacle { center: Vec2::new(5.0, 6.5), half_extents: Vec2::new(1.0, 0.1), rotation_rad: 0.0 },
            Obstacle { center: Vec2::new(3.9, 5.0), half_extents: Vec2::new(0.1, 1.5), rotation_rad: 0.0 },
            Obstacle { center: Vec2::new(6.1, 5.0), half_extents: Vec2::new(0.1, 1.5), rotation_rad: 0.0 },
        ];
        let scene = Scene::new(10.0, 10.0, walls, vec![], vec![], vec![]).unwrap();
        let grid = build_navgrid_with_cell_size(&scene, 0.25);
        let result = AStarPathfinder.find_path(&grid, Vec2::new(0.5, 0.5), Vec2::new(5.0, 5.0));
        assert!(result.is_err());
    }

    #[test]
    fn same_cell_start_and_goal_is_trivial() {
        let scene = Scene::new(5.0, 5.0, vec![], vec![], vec![], vec![]).unwrap();
        let grid = build_navgrid_with_cell_size(&scene, 0.5);
        let path = AStarPathfinder
            .find_path(&grid, Vec2::new(2.0, 2.0), Vec2::new(2.1, 2.1))
            .unwrap();
        assert!(path.is_trivial());
    }
}
