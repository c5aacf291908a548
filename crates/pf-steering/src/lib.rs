//! `pf-steering` — social-force-style steering, wobble, and collision
//! filtering for agent movement.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                |
//! |------------|----------------------------------------------------------|
//! | [`params`] | `SteeringParams` — tunable force constants                |
//! | [`state`]  | `SteeringState` — per-agent wobble phase                   |
//! | [`store`]  | `SteeringStore` — `AgentId`-indexed `SteeringState` array  |
//! | [`engine`] | `SteeringEngine` — force accumulation + collision filter   |
//!
//! # Movement model
//!
//! Every tick, `SteeringEngine::compute_velocity` sums four terms — desired
//! velocity toward the agent's current path waypoint, obstacle avoidance,
//! neighbor separation, and a small sinusoidal wobble — then clamps the
//! result to `max_speed_mps`. `SteeringEngine::resolve_move` applies that
//! velocity against a [`pf_scene::NavGrid`], retrying on a single axis before
//! falling back to a random jitter if the agent is fully boxed in.

pub mod engine;
pub mod params;
pub mod state;
pub mod store;

#[cfg(test)]
mod tests;

pub use engine::SteeringEngine;
pub use params::SteeringParams;
pub use state::SteeringState;
pub use store::SteeringStore;
