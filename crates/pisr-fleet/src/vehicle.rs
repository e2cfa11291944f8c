//! Vehicle kinematic and clock state.

use pisr_core::{geo::turn_radius, TaskId, VehicleId};

use crate::{FleetError, FleetResult};

/// Physical state of one vehicle.
///
/// Strategies (routing, pathing, communication) and the private database are
/// attached by `pisr-sim`; this struct carries only what every strategy needs
/// to read.  `index` is the stable 0-based slot that addresses this vehicle in
/// every peer's vehicle tracker.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleState {
    pub id:               VehicleId,
    pub index:            usize,
    /// Metres per second, > 0.
    pub speed:            f64,
    /// Metres; derived from the maximum bank angle.
    pub turn_radius:      f64,
    /// Radians, counter-clockwise from east.
    pub heading:          f64,
    pub activation_time:  f64,
    pub termination_time: f64,
    /// The task the vehicle is at (or last departed from).
    pub location:         TaskId,
    /// Simulation time of the vehicle's last arrival.
    pub time:             f64,
}

impl VehicleState {
    /// Validate parameters and derive the turn radius.
    ///
    /// `heading` and `bank_angle` are radians.  The vehicle starts at
    /// `location` at its activation time.
    ///
    /// # Errors
    ///
    /// [`FleetError::Config`] if `speed` is not positive and finite, or
    /// `bank_angle` is outside `(0, π/2]`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id:               VehicleId,
        index:            usize,
        location:         TaskId,
        heading:          f64,
        speed:            f64,
        bank_angle:       f64,
        activation_time:  f64,
        termination_time: f64,
    ) -> FleetResult<Self> {
        if !(speed > 0.0 && speed.is_finite()) {
            return Err(FleetError::Config(format!("{id} has invalid speed {speed}")));
        }
        if !(bank_angle > 0.0 && bank_angle <= std::f64::consts::FRAC_PI_2) {
            return Err(FleetError::Config(format!(
                "{id} has bank angle {:.1}° outside (0°, 90°]",
                bank_angle.to_degrees()
            )));
        }
        if activation_time > termination_time {
            return Err(FleetError::Config(format!(
                "{id} activates at {activation_time} after it terminates at {termination_time}"
            )));
        }
        Ok(Self {
            id,
            index,
            speed,
            turn_radius: turn_radius(speed, bank_angle),
            heading,
            activation_time,
            termination_time,
            location,
            time: activation_time,
        })
    }

    /// Seconds needed to cover `length` metres.
    #[inline]
    pub fn travel_time(&self, length: f64) -> f64 {
        length / self.speed
    }

    /// `true` while the vehicle may still be chosen as decider for an
    /// arrival at `arrival_time`.
    #[inline]
    pub fn is_active_for(&self, arrival_time: f64) -> bool {
        self.termination_time > arrival_time
    }
}
