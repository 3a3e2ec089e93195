//! # Turtle equipment messages
//!
//! The turtle publishes its [`Pose`] and accepts [`VelocityCmd`]s. Both follow the right hand
//! rule about the arena's Z+ (upwards) axis, so positive headings and angular rates are
//! anticlockwise when viewed from above.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The estimated pose of the turtle in the arena frame.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Position along the arena X axis.
    ///
    /// Units: meters
    pub x_m: f64,

    /// Position along the arena Y axis.
    ///
    /// Units: meters
    pub y_m: f64,

    /// Heading, the angle between the turtle's forward direction and the arena X axis.
    ///
    /// Units: radians
    pub theta_rad: f64,
}

/// A velocity demand for the turtle.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VelocityCmd {
    /// The forward speed of the turtle. Negative speeds drive backwards.
    ///
    /// Units: meters/second
    pub linear_ms: f64,

    /// The rate of turn of the turtle. Positive rates turn to the left.
    ///
    /// Units: radians/second
    pub angular_rads: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl Pose {
    pub fn new(x_m: f64, y_m: f64, theta_rad: f64) -> Self {
        Self { x_m, y_m, theta_rad }
    }

    /// Return the unit vector pointing in the turtle's forward direction.
    pub fn forward(&self) -> [f64; 2] {
        [self.theta_rad.cos(), self.theta_rad.sin()]
    }

    /// Return the euclidian distance between this pose's position and the given point.
    pub fn distance_to(&self, x_m: f64, y_m: f64) -> f64 {
        ((x_m - self.x_m).powi(2) + (y_m - self.y_m).powi(2)).sqrt()
    }
}

impl VelocityCmd {
    pub fn new(linear_ms: f64, angular_rads: f64) -> Self {
        Self {
            linear_ms,
            angular_rads,
        }
    }

    /// A command which brings the turtle to a full stop.
    pub fn stop() -> Self {
        Self::default()
    }

    /// Returns true if this command demands no motion at all.
    pub fn is_stop(&self) -> bool {
        self.linear_ms == 0.0 && self.angular_rads == 0.0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_forward() {
        let pose = Pose::new(1.0, 2.0, std::f64::consts::FRAC_PI_2);
        let fwd = pose.forward();

        assert_relative_eq!(fwd[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(fwd[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_distance_to() {
        let pose = Pose::new(1.0, 1.0, 0.0);

        assert_relative_eq!(pose.distance_to(4.0, 5.0), 5.0);
        assert_relative_eq!(pose.distance_to(1.0, 1.0), 0.0);
    }

    #[test]
    fn test_stop() {
        assert!(VelocityCmd::stop().is_stop());
        assert!(!VelocityCmd::new(0.0, -0.1).is_stop());
    }
}
