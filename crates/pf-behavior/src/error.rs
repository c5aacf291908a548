use pf_core::AgentId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("agent {0:?} has no AgentKind (dead slot)")]
    DeadAgent(AgentId),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
