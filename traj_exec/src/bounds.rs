//! # Arena bounds checking
//!
//! The turtle operates in a square arena `[0, size] x [0, size]`. A safety margin inside the
//! walls defines the *inbounds* region `[margin, size - margin]^2`, both edges inclusive.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::eqpt::turtle::Pose;
use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Side length of the arena.
pub const ARENA_SIZE_M: f64 = 11.0;

/// Default safety margin from the walls.
pub const DEFAULT_MARGIN_M: f64 = 1.0;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The arena and the margin which defines its inbounds region.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Arena {
    size_m: f64,
    margin_m: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum BoundsError {
    #[error("Arena size must be positive, found {0}")]
    InvalidSize(f64),

    #[error("Margin must satisfy 0 <= margin < {max}, found {margin}")]
    InvalidMargin { margin: f64, max: f64 },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Arena {
    /// Create a new arena, checking that the margin leaves a non-empty inbounds region.
    pub fn new(size_m: f64, margin_m: f64) -> Result<Self, BoundsError> {
        if !(size_m > 0.0) || size_m.is_infinite() {
            return Err(BoundsError::InvalidSize(size_m));
        }

        let max = size_m / 2.0;
        if !(margin_m >= 0.0 && margin_m < max) {
            return Err(BoundsError::InvalidMargin {
                margin: margin_m,
                max,
            });
        }

        Ok(Self { size_m, margin_m })
    }

    /// True if the point lies inside the inbounds region.
    pub fn contains(&self, x_m: f64, y_m: f64) -> bool {
        let lower = self.margin_m;
        let upper = self.size_m - self.margin_m;

        lower <= x_m && x_m <= upper && lower <= y_m && y_m <= upper
    }

    /// True if the pose's position lies inside the inbounds region.
    pub fn contains_pose(&self, pose: &Pose) -> bool {
        self.contains(pose.x_m, pose.y_m)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            size_m: ARENA_SIZE_M,
            margin_m: DEFAULT_MARGIN_M,
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Returns true iff `margin <= x <= 11 - margin` and `margin <= y <= 11 - margin`.
pub fn is_within_bounds(x_m: f64, y_m: f64, margin_m: f64) -> bool {
    margin_m <= x_m
        && x_m <= ARENA_SIZE_M - margin_m
        && margin_m <= y_m
        && y_m <= ARENA_SIZE_M - margin_m
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_is_within_bounds() {
        assert!(is_within_bounds(1.0, 1.0, DEFAULT_MARGIN_M));
        assert!(!is_within_bounds(0.5, 5.0, DEFAULT_MARGIN_M));
        assert!(is_within_bounds(10.0, 10.0, DEFAULT_MARGIN_M));
        assert!(!is_within_bounds(11.0, 11.0, DEFAULT_MARGIN_M));
        assert!(!is_within_bounds(5.0, 10.01, DEFAULT_MARGIN_M));
        assert!(!is_within_bounds(std::f64::NAN, 5.0, DEFAULT_MARGIN_M));
        assert!(is_within_bounds(0.0, 11.0, 0.0));
    }

    #[test]
    fn test_arena_matches_free_function() {
        let arena = Arena::default();
        let points = [
            (1.0, 1.0),
            (0.5, 5.0),
            (10.0, 10.0),
            (11.0, 11.0),
            (5.5, 0.99),
            (9.99, 5.0),
        ];

        for (x, y) in points.iter() {
            assert_eq!(
                arena.contains(*x, *y),
                is_within_bounds(*x, *y, DEFAULT_MARGIN_M)
            );
        }

        assert!(arena.contains_pose(&Pose::new(5.0, 5.0, 3.0)));
    }

    #[test]
    fn test_arena_new() {
        assert!(Arena::new(11.0, 0.0).is_ok());
        assert!(Arena::new(11.0, 5.49).is_ok());
        assert_eq!(
            Arena::new(11.0, 5.5),
            Err(BoundsError::InvalidMargin {
                margin: 5.5,
                max: 5.5
            })
        );
        assert!(Arena::new(11.0, -0.1).is_err());
        assert!(Arena::new(11.0, std::f64::NAN).is_err());
        assert_eq!(Arena::new(0.0, 0.0), Err(BoundsError::InvalidSize(0.0)));
    }
}
