//! `pf-sim` — fixed-step tick loop orchestrator for the pedestrian-flow
//! simulator.
//!
//! # Tick loop
//!
//! ```text
//! per tick:
//!   ⓪ drain control mailbox (SetLaneState / SetConfig / Stop / GetStatus)
//!   ① maybe spawn new shoppers (startup burst, then Bernoulli replenishment)
//!   ② intent phase   — model::update() per agent, read-only, no mutation
//!   ③ apply phase    — write back AgentKind; run the pathfinder for
//!                      SetDestination; update lane queues for
//!                      JoinQueue/LeaveQueue
//!   ④ movement phase — steering + collision-filtered integration, then
//!                      stuck-agent recovery
//!   ⑤ lane-state controller tick + cashier staffing pass
//!   ⑥ publish hook   — one TrackRecord-worth of state per live agent
//!   ⑦ prune DONE / OFF_SHIFT agents
//!   ⑧ record diagnostics
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use pf_core::EngineConfig;
//! use pf_scene::{AStarPathfinder, Scene};
//! use pf_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(EngineConfig::default(), scene, AStarPathfinder).build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod control;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use control::{ConfigUpdate, ControlMessage, Status};
pub use error::{PfSimError, PfSimResult};
pub use observer::{Diagnostics, LaneSummary, NoopObserver, SimObserver};
pub use sim::Sim;
