//! `pf-scene` — venue model, nav grid, zone lookups, and grid A* pathfinding.
//!
//! # Crate layout
//!
//! | Module       | Contents                                              |
//! |--------------|--------------------------------------------------------|
//! | [`scene`]    | `Scene`, `Obstacle`, `Entrance`, `Zone`, `Lane`        |
//! | [`navgrid`]  | `NavGrid`, `build_navgrid`                             |
//! | [`zones`]    | `ZoneIndex` (R-tree-backed containment queries)        |
//! | [`pathfinder`] | `Pathfinder` trait, `Path`, `AStarPathfinder`         |
//! | [`error`]    | `PfSceneError`, `PathfindError`, `SceneError`           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Scene` and friends.  |

pub mod error;
pub mod navgrid;
pub mod pathfinder;
pub mod scene;
pub mod zones;

#[cfg(test)]
mod tests;

pub use error::{PathfindError, PfSceneError, PfSceneResult, SceneError};
pub use navgrid::{build_navgrid, NavGrid};
pub use pathfinder::{AStarPathfinder, Path, Pathfinder};
pub use scene::{Entrance, Lane, Obstacle, Scene, Zone, ZoneRole};
pub use zones::ZoneIndex;
