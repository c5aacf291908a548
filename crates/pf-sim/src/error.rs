use pf_scene::SceneError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PfSimError {
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),
}

pub type PfSimResult<T> = Result<T, PfSimError>;
