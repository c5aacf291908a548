//! Scene/pathfinding error type.

use thiserror::Error;

pub use crate::scene::SceneError;

#[derive(Debug, Error)]
pub enum PfSceneError {
    #[error("no path from start to goal")]
    NoPath,

    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Pathfinding-specific error, kept distinct from `PfSceneError` so callers
/// that only do pathfinding (e.g. a replan site) don't have to match on
/// `Scene` variants that can't occur there.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum PathfindError {
    #[error("no path from start to goal")]
    NoPath,
}

pub type PfSceneResult<T> = Result<T, PfSceneError>;
