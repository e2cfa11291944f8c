use pisr_behavior::BehaviorError;
use pisr_fleet::FleetError;
use pisr_pathing::PathingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("vehicle at slot {slot} carries index {got}")]
    VehicleIndexMismatch { slot: usize, got: usize },

    #[error(transparent)]
    Fleet(#[from] FleetError),

    #[error("pathing error: {0}")]
    Pathing(#[from] PathingError),

    #[error("routing error: {0}")]
    Behavior(#[from] BehaviorError),
}

pub type SimResult<T> = Result<T, SimError>;
