use pisr_core::TaskId;
use pisr_pathing::PathingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("behavior configuration error: {0}")]
    Config(String),

    #[error("manual routing sequence is empty")]
    EmptySequence,

    #[error("task {0} is not in the registry")]
    UnknownTask(TaskId),

    #[error(transparent)]
    Pathing(#[from] PathingError),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
