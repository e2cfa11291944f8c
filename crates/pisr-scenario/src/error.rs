use thiserror::Error;

use pisr_behavior::BehaviorError;
use pisr_fleet::FleetError;
use pisr_sim::SimError;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario config error: {0}")]
    Config(String),

    #[error("unknown task geometry {0:?}")]
    UnknownGeometry(String),

    #[error("{field} needs {needed} entries, got {got}")]
    ShortVector { field: &'static str, needed: usize, got: usize },

    #[error("scenario parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Fleet(#[from] FleetError),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),

    #[error(transparent)]
    Sim(#[from] SimError),
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;
