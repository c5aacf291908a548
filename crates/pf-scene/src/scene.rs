//! Immutable venue description: bounds, obstacles, entrances, zones, lanes.
//!
//! A `Scene` is constructed once by the host application (from a DB row, a
//! DXF import, or a test fixture) and handed to the engine. It never changes
//! after construction — validation runs once, at the boundary, so the engine
//! never has to re-check invariants mid-run.

use thiserror::Error;

use pf_core::{LaneId, Vec2, ZoneId};

/// Axis-aligned-after-rotation rectangular footprint: a wall, shelf, or
/// fixture. `rotation_rad` rotates the half-extents box about `center`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub center: Vec2,
    pub half_extents: Vec2,
    pub rotation_rad: f32,
}

impl Obstacle {
    /// `true` if `point` lies inside this obstacle, inflated by `padding` on
    /// every side.
    pub fn contains_inflated(&self, point: Vec2, padding: f32) -> bool {
        let local = point - self.center;
        let (sin, cos) = self.rotation_rad.sin_cos();
        // Rotate the point into the obstacle's local frame instead of
        // rotating the box, so the test stays a simple AABB comparison.
        let lx = local.x * cos + local.y * sin;
        let ly = -local.x * sin + local.y * cos;
        lx.abs() <= self.half_extents.x + padding && ly.abs() <= self.half_extents.y + padding
    }
}

/// What a `Zone` polygon is used for.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZoneRole {
    Queue,
    Service,
    Shopping,
    /// One-way: agents may pass through outward but the Shopper FSM never
    /// treats it as an entry target.
    ExitGap,
}

/// A simple polygon (closed, points in order, not self-intersecting) tagged
/// with a role and, for queue/service zones, the owning lane.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zone {
    pub role: ZoneRole,
    pub lane_id: Option<LaneId>,
    pub points: Vec<Vec2>,
}

impl Zone {
    /// Point-in-polygon via the standard ray-casting test.
    pub fn contains(&self, p: Vec2) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[j];
            let crosses = (a.y > p.y) != (b.y > p.y);
            if crosses {
                let x_at_p_y = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
                if p.x < x_at_p_y {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Axis-aligned bounding box, used for the coarse R-tree filter.
    pub fn aabb(&self) -> (Vec2, Vec2) {
        let mut min = Vec2::new(f32::INFINITY, f32::INFINITY);
        let mut max = Vec2::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for &p in &self.points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        (min, max)
    }

    /// Centroid of the polygon's vertices (sufficient for anchor-style use;
    /// not the exact area centroid).
    pub fn centroid(&self) -> Vec2 {
        let n = self.points.len().max(1) as f32;
        let sum = self
            .points
            .iter()
            .fold(Vec2::ZERO, |acc, &p| acc + p);
        sum * (1.0 / n)
    }
}

/// A source polygon where new shoppers spawn.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entrance {
    pub points: Vec<Vec2>,
}

impl Entrance {
    pub fn centroid(&self) -> Vec2 {
        let n = self.points.len().max(1) as f32;
        let sum = self
            .points
            .iter()
            .fold(Vec2::ZERO, |acc, &p| acc + p);
        sum * (1.0 / n)
    }
}

/// A checkout station: a matched queue/service zone pair plus the point
/// where the cashier stands.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lane {
    pub id: LaneId,
    pub queue_zone: ZoneId,
    pub service_zone: ZoneId,
    pub anchor_point: Vec2,
    /// Unit direction the queue extends away from the service anchor, used
    /// to place queue slots.
    pub flow_direction: Vec2,
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("zone {0:?} has lane_id {1:?} with no matching Lane record")]
    DanglingZoneLane(ZoneId, LaneId),
    #[error("lane {0:?} queue_zone does not reference a Queue-role zone")]
    LaneQueueZoneMismatch(LaneId),
    #[error("lane {0:?} service_zone does not reference a Service-role zone")]
    LaneServiceZoneMismatch(LaneId),
    #[error("obstacle at {0} lies entirely outside scene bounds ({1} x {2})")]
    ObstacleOutsideBounds(Vec2, f32, f32),
    #[error("entrance overlaps an obstacle")]
    EntranceOverlapsObstacle,
    #[error("scene bounds must be positive, got {0} x {1}")]
    NonPositiveBounds(f32, f32),
}

/// The immutable venue description handed to the engine at construction.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scene {
    pub width_m: f32,
    pub depth_m: f32,
    pub obstacles: Vec<Obstacle>,
    pub entrances: Vec<Entrance>,
    pub zones: Vec<Zone>,
    pub lanes: Vec<Lane>,
}

impl Scene {
    /// Construct and validate in one step. Construction fails fast on any
    /// invariant violation — the engine never starts with a broken Scene.
    pub fn new(
        width_m: f32,
        depth_m: f32,
        obstacles: Vec<Obstacle>,
        entrances: Vec<Entrance>,
        zones: Vec<Zone>,
        lanes: Vec<Lane>,
    ) -> Result<Self, SceneError> {
        let scene = Scene {
            width_m,
            depth_m,
            obstacles,
            entrances,
            zones,
            lanes,
        };
        scene.validate()?;
        Ok(scene)
    }

    fn validate(&self) -> Result<(), SceneError> {
        if self.width_m <= 0.0 || self.depth_m <= 0.0 {
            return Err(SceneError::NonPositiveBounds(self.width_m, self.depth_m));
        }

        for obstacle in &self.obstacles {
            let min = obstacle.center - obstacle.half_extents;
            let max = obstacle.center + obstacle.half_extents;
            let fully_outside = max.x < 0.0
                || max.y < 0.0
                || min.x > self.width_m
                || min.y > self.depth_m;
            if fully_outside {
                return Err(SceneError::ObstacleOutsideBounds(
                    obstacle.center,
                    self.width_m,
                    self.depth_m,
                ));
            }
        }

        for entrance in &self.entrances {
            let centroid = entrance.centroid();
            for obstacle in &self.obstacles {
                if obstacle.contains_inflated(centroid, 0.0) {
                    return Err(SceneError::EntranceOverlapsObstacle);
                }
            }
        }

        for (idx, zone) in self.zones.iter().enumerate() {
            if let Some(lane_id) = zone.lane_id {
                let zone_id = ZoneId(idx as u16);
                let lane = self
                    .lanes
                    .iter()
                    .find(|l| l.id == lane_id)
                    .ok_or(SceneError::DanglingZoneLane(zone_id, lane_id))?;

                match zone.role {
                    ZoneRole::Queue if lane.queue_zone != zone_id => {
                        return Err(SceneError::LaneQueueZoneMismatch(lane_id));
                    }
                    ZoneRole::Service if lane.service_zone != zone_id => {
                        return Err(SceneError::LaneServiceZoneMismatch(lane_id));
                    }
                    _ => {}
                }
            }
        }

        for lane in &self.lanes {
            let queue_zone = self
                .zones
                .get(lane.queue_zone.index())
                .ok_or(SceneError::LaneQueueZoneMismatch(lane.id))?;
            if queue_zone.role != ZoneRole::Queue {
                return Err(SceneError::LaneQueueZoneMismatch(lane.id));
            }
            let service_zone = self
                .zones
                .get(lane.service_zone.index())
                .ok_or(SceneError::LaneServiceZoneMismatch(lane.id))?;
            if service_zone.role != ZoneRole::Service {
                return Err(SceneError::LaneServiceZoneMismatch(lane.id));
            }
        }

        Ok(())
    }

    pub fn zones_by_role(&self, role: ZoneRole) -> impl Iterator<Item = (ZoneId, &Zone)> {
        self.zones
            .iter()
            .enumerate()
            .filter(move |(_, z)| z.role == role)
            .map(|(i, z)| (ZoneId(i as u16), z))
    }
}
