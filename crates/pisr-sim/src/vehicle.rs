//! The vehicle aggregate: physical state plus the strategies attached to it.

use pisr_behavior::{CommunicationStrategy, Routing, RoutingPolicy};
use pisr_core::Point;
use pisr_fleet::{TrackedFields, VehicleState};
use pisr_pathing::PathingStrategy;

/// Everything needed to place one vehicle in a [`Sim`][crate::Sim].
#[derive(Clone, Debug)]
pub struct VehicleSetup {
    pub state:         VehicleState,
    pub routing:       RoutingPolicy,
    /// Physical pathing, used to commit trajectories.
    pub pathing:       PathingStrategy,
    pub communication: CommunicationStrategy,
    pub fields:        TrackedFields,
}

/// A vehicle inside a running simulation.  Its private database lives in
/// `Sim::databases` at the same slot.
#[derive(Clone, Debug)]
pub struct Vehicle {
    pub state:         VehicleState,
    pub routing:       Routing,
    pub pathing:       PathingStrategy,
    pub communication: CommunicationStrategy,
    /// Path to the current destination.
    pub trajectory:    Vec<Point>,
}

impl Vehicle {
    pub(crate) fn from_setup(setup: VehicleSetup) -> Self {
        let routing = Routing::new(setup.routing, &setup.state);
        Self {
            state: setup.state,
            routing,
            pathing: setup.pathing,
            communication: setup.communication,
            trajectory: Vec::new(),
        }
    }

    /// `true` while this vehicle can still be chosen as decider.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.state.is_active_for(self.routing.arrival_time)
    }
}
