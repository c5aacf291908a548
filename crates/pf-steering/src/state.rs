//! Per-agent steering state that outlives a single tick's force calculation.

/// Phase accumulator for an agent's sinusoidal wobble term. Advances every
/// tick by `tick_duration_secs`; wraps implicitly since only its sine/cosine
/// is ever read.
#[derive(Clone, Copy, Debug, Default)]
pub struct SteeringState {
    pub wobble_phase_secs: f32,
}
