//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.
//!
//! `TaskId` is **1-based**: task 1 is the first entry of the task registry,
//! so it converts to a `Vec` slot with [`TaskId::index`] rather than by casting
//! the inner value.  `VehicleId` is a free-form label (conventionally 100,
//! 200, …); vehicles are addressed by their 0-based slot, not their id.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for $inner {
            #[inline(always)]
            fn from(id: $name) -> $inner {
                id.0
            }
        }
    };
}

typed_id! {
    /// 1-based identity of a surveillance task.
    pub struct TaskId(u32);
}

typed_id! {
    /// Label of a vehicle, e.g. `VehicleId(100)`.
    pub struct VehicleId(u32);
}

impl TaskId {
    /// The id of the task stored at 0-based slot `index`.
    #[inline(always)]
    pub fn from_index(index: usize) -> Self {
        TaskId(index as u32 + 1)
    }

    /// 0-based slot of this task in the task registry and in every
    /// age tracker.
    ///
    /// `TaskId(0)` is never issued; calling this on it is a logic error.
    #[inline(always)]
    pub fn index(self) -> usize {
        debug_assert!(self.0 > 0, "TaskId is 1-based");
        self.0 as usize - 1
    }
}
