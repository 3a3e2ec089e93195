//! # Trajectory control module
//!
//! Trajectory control drives the turtle along a small library of trajectories: straight lines,
//! rotations on the spot, point to point navigation, circles, spirals, sine waves and the
//! regular shapes built out of lines and rotations.
//!
//! Every trajectory is executed by its own blocking, fixed-rate loop. Each tick the loop reads
//! the latest pose from a [`PoseSource`], decides whether to continue, and publishes a single
//! velocity command to a [`CommandSink`]. The loop is paced by a [`Clock`] and can be cancelled
//! at any tick by a [`ShutdownSignal`]. Whatever the reason a trajectory ends, exactly one stop
//! command is sent once it has finished.
//!
//! The straight line and rotation controllers are open loop: the distance or angle covered is
//! estimated from the elapsed time and the commanded speed. Only point navigation closes the
//! loop on the pose. The other trajectories read the pose only to keep the turtle inside the
//! arena.
//!
//! Parameters are validated before any command is sent. A value outside its declared range
//! aborts the request, it is never clamped into range.
//!
//! [`PoseSource`]: crate::loc::PoseSource
//! [`CommandSink`]: crate::drive::CommandSink
//! [`Clock`]: crate::clock::Clock
//! [`ShutdownSignal`]: crate::shutdown::ShutdownSignal

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod linear;
pub mod params;
mod point;
mod profiles;
mod rotate;
mod shapes;
mod state;

#[cfg(test)]
mod test_util;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::fmt;

// Internal
pub use params::Params;
pub use point::point_cmd;
pub use profiles::sine_cmd;
pub use shapes::{Shape, ShapeReport};
pub use state::*;

use crate::bounds::BoundsError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The declared valid range of a trajectory parameter.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,

    /// If true the minimum itself is a valid value.
    pub min_inclusive: bool,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors which prevent a trajectory from starting.
///
/// Reaching the boundary and being cancelled are not errors, they are reported through
/// [`TrajState`].
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TrajCtrlError {
    #[error("Invalid value for {name}: {value} is not in {range}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        range: ParamRange,
    },

    #[error("Goal ({x_m:.3}, {y_m:.3}) is out of bounds")]
    GoalOutOfBounds { x_m: f64, y_m: f64 },

    #[error("Invalid arena: {0}")]
    InvalidArena(BoundsError),

    #[error("Loop rate {0} must be positive and finite, found {1}")]
    InvalidRate(&'static str, f64),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ParamRange {
    /// The range `(min, max]`.
    pub fn open_closed(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            min_inclusive: false,
        }
    }

    /// Any positive, finite value.
    pub fn positive() -> Self {
        Self::open_closed(0.0, std::f64::MAX)
    }

    /// The range `[min, max]`.
    pub fn closed(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            min_inclusive: true,
        }
    }

    /// True if the value lies in the range. NaN is never in range.
    pub fn contains(&self, value: f64) -> bool {
        let above_min = if self.min_inclusive {
            value >= self.min
        } else {
            value > self.min
        };

        above_min && value <= self.max
    }

    /// Check that the named parameter lies in the range.
    pub fn check(&self, name: &'static str, value: f64) -> Result<(), TrajCtrlError> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(TrajCtrlError::InvalidParameter {
                name,
                value,
                range: *self,
            })
        }
    }
}

impl fmt::Display for ParamRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let open = if self.min_inclusive { '[' } else { '(' };
        if self.max == std::f64::MAX {
            write!(f, "{}{}, inf)", open, self.min)
        } else {
            write!(f, "{}{}, {}]", open, self.min, self.max)
        }
    }
}
