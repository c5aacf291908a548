//! Force accumulation and collision-filtered movement.

use std::f32::consts::{FRAC_PI_2, PI};

use pf_core::{AgentRng, Vec2};
use pf_scene::NavGrid;

use crate::params::SteeringParams;
use crate::state::SteeringState;

/// Sums desired-velocity, obstacle-avoidance, neighbor-separation, and
/// wobble terms into a single steering velocity, then applies collision
/// filtering against a [`NavGrid`].
pub struct SteeringEngine {
    pub params: SteeringParams,
}

impl SteeringEngine {
    pub fn new(params: SteeringParams) -> Self {
        Self { params }
    }

    /// Straight-line pursuit of `target` at `max_speed_mps`. Zero once the
    /// agent is effectively at the target (avoids a degenerate normalize).
    pub fn desired_velocity(&self, position: Vec2, target: Vec2) -> Vec2 {
        let to_target = target - position;
        if to_target.length() < 1e-3 {
            return Vec2::ZERO;
        }
        to_target.normalized() * self.params.max_speed_mps
    }

    /// Radial push away from non-walkable cells within `obstacle_radius_m`,
    /// scaled by `1 - d / obstacle_radius_m` so the push sharpens near walls.
    pub fn obstacle_avoidance(&self, position: Vec2, navgrid: &NavGrid) -> Vec2 {
        let radius = self.params.obstacle_radius_m;
        let (ci, cj) = navgrid.cell_at(position);
        let ring = (radius / navgrid.cell_size_m).ceil() as i64 + 1;
        let mut push = Vec2::ZERO;

        for dj in -ring..=ring {
            for di in -ring..=ring {
                let ni = ci as i64 + di;
                let nj = cj as i64 + dj;
                if !navgrid.in_bounds(ni, nj) {
                    continue;
                }
                let (ni, nj) = (ni as u32, nj as u32);
                if navgrid.walkable(ni, nj) {
                    continue;
                }
                let cell_center = navgrid.cell_center(ni, nj);
                let d = position.distance(cell_center);
                if d >= radius || d < 1e-3 {
                    continue;
                }
                push += (position - cell_center).normalized() * (1.0 - d / radius);
            }
        }
        push
    }

    /// `1 / d^2` push away from every neighbor within `separation_radius_m`.
    pub fn separation(&self, position: Vec2, neighbors: &[Vec2]) -> Vec2 {
        let radius = self.params.separation_radius_m;
        let mut push = Vec2::ZERO;
        for &other in neighbors {
            let d = position.distance(other);
            if d >= radius || d < 1e-3 {
                continue;
            }
            push += (position - other).normalized() * (self.params.separation_strength / (d * d));
        }
        push
    }

    /// Small sinusoidal wobble so agents don't walk in perfectly straight
    /// lines; the two axes are offset by a quarter period.
    pub fn wobble(&self, state: SteeringState) -> Vec2 {
        let omega = 2.0 * PI * self.params.wobble_frequency_hz;
        let t = state.wobble_phase_secs;
        Vec2::new(
            self.params.wobble_amplitude_mps * (omega * t).sin(),
            self.params.wobble_amplitude_mps * (omega * t + FRAC_PI_2).sin(),
        )
    }

    /// Sum every term and clamp to `max_speed_mps`.
    pub fn compute_velocity(
        &self,
        position: Vec2,
        target: Vec2,
        neighbors: &[Vec2],
        navgrid: &NavGrid,
        state: SteeringState,
    ) -> Vec2 {
        let velocity = self.desired_velocity(position, target)
            + self.obstacle_avoidance(position, navgrid)
            + self.separation(position, neighbors)
            + self.wobble(state);
        velocity.clamped_to_length(self.params.max_speed_mps)
    }

    fn is_walkable_at(&self, point: Vec2, navgrid: &NavGrid) -> bool {
        let (i, j) = navgrid.cell_at(point);
        navgrid.walkable(i, j)
    }

    /// Moves `position` by `velocity * dt_secs`, filtered against `navgrid`:
    ///
    /// 1. Try the full diagonal step.
    /// 2. If blocked, retry sliding along the x axis only, then the y axis
    ///    only (so an agent grazing a wall at an angle keeps moving instead
    ///    of stopping dead).
    /// 3. If both single-axis retries are blocked, apply a random jitter
    ///    nudge; if even that lands off the walkable grid, stay in place.
    ///
    /// Returns `(new_position, blocked)`. The caller increments the agent's
    /// `blocked_frames` counter whenever `blocked` is `true`.
    pub fn resolve_move(
        &self,
        position: Vec2,
        velocity: Vec2,
        dt_secs: f32,
        navgrid: &NavGrid,
        rng: &mut AgentRng,
    ) -> (Vec2, bool) {
        let full_step = position + velocity * dt_secs;
        if self.is_walkable_at(full_step, navgrid) {
            return (full_step, false);
        }

        let x_only = position + Vec2::new(velocity.x * dt_secs, 0.0);
        if velocity.x.abs() > 1e-6 && self.is_walkable_at(x_only, navgrid) {
            return (x_only, false);
        }

        let y_only = position + Vec2::new(0.0, velocity.y * dt_secs);
        if velocity.y.abs() > 1e-6 && self.is_walkable_at(y_only, navgrid) {
            return (y_only, false);
        }

        let angle: f32 = rng.gen_range(0.0..(2.0 * PI));
        let jitter = Vec2::new(angle.cos(), angle.sin()) * self.params.jitter_radius_m;
        let jittered = position + jitter;
        if self.is_walkable_at(jittered, navgrid) {
            (jittered, true)
        } else {
            (position, true)
        }
    }
}

impl Default for SteeringEngine {
    fn default() -> Self {
        Self::new(SteeringParams::default())
    }
}
