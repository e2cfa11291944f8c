use pisr_core::{CoreError, Point, TaskId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathingError {
    #[error("path solver failed: {0}")]
    Solver(String),

    #[error("path solver output line {line} is not an `x,y` pair: {content:?}")]
    SolverOutput { line: usize, content: String },

    #[error("path solver returned an empty path from {from} to {to}")]
    EmptyPath { from: Point, to: Point },

    #[error("task {0} is not in the registry")]
    UnknownTask(TaskId),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error running path solver: {0}")]
    Io(#[from] std::io::Error),
}

pub type PathingResult<T> = Result<T, PathingError>;
