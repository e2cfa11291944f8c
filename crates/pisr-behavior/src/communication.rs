//! Peer communication: what a deciding vehicle tells the rest of the fleet.
//!
//! | Strategy      | Peer age tracker (visited task) | Peer vehicle tracker (decider slot) |
//! |---------------|---------------------------------|-------------------------------------|
//! | `None`        | —                               | —                                   |
//! | `Completion`  | peer arrival − visit time       | —                                   |
//! | `Destination` | peer arrival − visit time       | new commitment                      |
//!
//! Only peers are written, and only the fields each peer tracks.  The
//! "peer arrival" is the peer's own committed arrival time: the age the
//! visited task will have when that peer next decides.

use pisr_core::TaskId;
use pisr_fleet::{Commitment, Database};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum CommunicationStrategy {
    #[default]
    None,
    Completion,
    Destination,
}

/// What a decider has just done, as seen by its peers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Disclosure {
    /// Slot of the deciding vehicle.
    pub vehicle:    usize,
    /// Task the decider just visited.
    pub visited:    TaskId,
    pub visit_time: f64,
    /// The decider's new commitment.
    pub commitment: Commitment,
}

impl CommunicationStrategy {
    pub fn name(self) -> &'static str {
        match self {
            CommunicationStrategy::None => "None",
            CommunicationStrategy::Completion => "Completion",
            CommunicationStrategy::Destination => "Destination",
        }
    }

    /// Write `disclosure` into every peer database.  `databases` is indexed
    /// by vehicle slot; the decider's own entry is skipped.
    pub fn disclose(self, disclosure: &Disclosure, databases: &mut [Database]) {
        if self == CommunicationStrategy::None {
            return;
        }
        for (slot, db) in databases.iter_mut().enumerate() {
            if slot == disclosure.vehicle {
                continue;
            }
            let age = (db.own_commitment().arrival_time - disclosure.visit_time).max(0.0);
            db.observe_age(disclosure.visited, age);
            if self == CommunicationStrategy::Destination {
                db.observe_commitment(disclosure.vehicle, disclosure.commitment);
            }
        }
        tracing::trace!(
            strategy = self.name(),
            vehicle = disclosure.vehicle,
            visited = %disclosure.visited,
            "disclosed to peers"
        );
    }
}
