use pisr_core::TaskId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("fleet configuration error: {0}")]
    Config(String),

    #[error("task {0} is not in the registry")]
    UnknownTask(TaskId),

    #[error("task at slot {index} has id {got}, expected {expected}")]
    TaskOrder {
        index:    usize,
        expected: TaskId,
        got:      TaskId,
    },
}

pub type FleetResult<T> = Result<T, FleetError>;
