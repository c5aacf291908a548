//! `pf-agent` — Structure-of-Arrays agent storage for shopper/cashier agents.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|-------------------------------------------------------------|
//! | [`state`]   | `AgentKind`, `ShopperState`, `CashierState` and their bookkeeping |
//! | [`store`]   | `AgentStore` (SoA arrays), `AgentRngs` (per-agent RNG)     |
//! | [`builder`] | `AgentWorld` (spawn/despawn helpers)                       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on all public types.     |
//!
//! Agents here are a closed, known schema (shopper or cashier) rather than an
//! open set of pluggable components, so there is no generic component
//! registry — each slot carries exactly one [`state::AgentKind`].

pub mod builder;
pub mod state;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::AgentWorld;
pub use state::{AgentKind, CashierShift, CashierState, ShopperBudget, ShopperState};
pub use store::{AgentRngs, AgentStore};
