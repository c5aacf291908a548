//! `pf-behavior` — shopper/cashier FSMs, the checkout lane-state controller,
//! and the single dispatch point that ties them together.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                |
//! |---------------|------------------------------------------------------------|
//! | [`context`]   | `SimContext<'a>` — read-only tick snapshot                 |
//! | [`intent`]    | `Intent` — mutations for pf-sim's apply phase               |
//! | [`shopper`]   | Shopper FSM transition logic                                |
//! | [`cashier`]   | Cashier FSM transition logic                                |
//! | [`lanestate`] | `LaneState`, `LaneController` — checkout lane hysteresis     |
//! | [`model`]     | `update()` — single dispatch point from `AgentId` to FSM     |
//! | [`error`]     | `BehaviorError`, `BehaviorResult<T>`                        |
//!
//! # Two-phase tick
//!
//! 1. **Intent phase**: for every live agent, `model::update` reads
//!    `SimContext` and returns the agent's next `AgentKind` plus a list of
//!    `Intent`s. No mutation happens here.
//! 2. **Apply phase**: pf-sim walks agents in ascending `AgentId` order,
//!    writes the returned `AgentKind` back into `AgentStore`, and applies
//!    each `Intent` (running the pathfinder, updating lane queues).
//!
//! Agents are re-evaluated every tick at the configured `frequency_hz` —
//! there is no separate wake-queue or event schedule to maintain.

pub mod cashier;
pub mod context;
pub mod error;
pub mod intent;
pub mod lanestate;
pub mod model;
pub mod shopper;


pub use context::SimContext;
pub use error::{BehaviorError, BehaviorResult};
pub use intent::Intent;
pub use lanestate::{LaneController, LaneControllerConfig, LaneState};
pub use model::update;
