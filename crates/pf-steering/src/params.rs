//! Tunable constants for the steering force model.

/// Social-force-style steering parameters. Defaults match the reference
/// tuning: obstacle push radius 0.6 m, quadratic neighbor separation, a
/// small sinusoidal wobble so agents don't walk in perfectly straight lines.
#[derive(Clone, Copy, Debug)]
pub struct SteeringParams {
    pub max_speed_mps: f32,
    /// Radius within which a non-walkable cell exerts a radial push.
    pub obstacle_radius_m: f32,
    /// Radius within which another agent exerts a `1/d^2` separation push.
    pub separation_radius_m: f32,
    pub separation_strength: f32,
    pub wobble_amplitude_mps: f32,
    pub wobble_frequency_hz: f32,
    /// Magnitude of the random nudge applied when both movement axes are
    /// blocked in the same tick.
    pub jitter_radius_m: f32,
}

impl Default for SteeringParams {
    fn default() -> Self {
        Self {
            max_speed_mps: 1.3,
            obstacle_radius_m: 0.6,
            separation_radius_m: 0.8,
            separation_strength: 1.0,
            wobble_amplitude_mps: 0.05,
            wobble_frequency_hz: 0.3,
            jitter_radius_m: 0.15,
        }
    }
}
