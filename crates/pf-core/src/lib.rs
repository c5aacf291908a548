//! `pf-core` — foundational types for the pedestrian-flow simulator.
//!
//! This crate is a dependency of every other `pf-*` crate. It intentionally
//! has no `pf-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `CellId`, `LaneId`, `ZoneId`               |
//! | [`vec2`]        | `Vec2`, planar vector arithmetic                      |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`rng`]         | `EngineRng` (shared), `AgentRng` (per-agent)          |
//! | [`config`]      | `EngineConfig` and its clamping policy                |
//! | [`error`]       | `PfCoreError`, `PfResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by `pf-cli` to load `EngineConfig` from TOML.     |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod vec2;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::EngineConfig;
pub use error::{PfCoreError, PfResult};
pub use ids::{AgentId, CellId, LaneId, ZoneId};
pub use rng::{AgentRng, EngineRng};
pub use time::{SimClock, Tick};
pub use vec2::Vec2;
