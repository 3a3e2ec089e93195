//! Trajectory control parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
use super::{ParamRange, TrajCtrlError};
use crate::bounds::{Arena, ARENA_SIZE_M, DEFAULT_MARGIN_M};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for trajectory control
///
/// Missing fields in a parameter file take their value from `Params::default()`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Params {
    // ---- ARENA ----
    /// Side length of the square arena.
    ///
    /// Units: meters
    pub arena_size_m: f64,

    /// Distance from the arena walls inside which the turtle is considered out of bounds.
    ///
    /// Units: meters
    pub margin_m: f64,

    // ---- LOOP RATES ----
    /// Rate of the straight line controller.
    ///
    /// Units: hertz
    pub linear_rate_hz: f64,

    /// Rate of the rotation controller.
    ///
    /// Units: hertz
    pub rotate_rate_hz: f64,

    /// Rate of the circle profile.
    ///
    /// Units: hertz
    pub circle_rate_hz: f64,

    /// Rate of the spiral profile. The spiral radius grows once per tick, so this also sets
    /// how quickly the spiral opens up.
    ///
    /// Units: hertz
    pub spiral_rate_hz: f64,

    /// Rate of the sine wave profile. The arc length advances by `speed / rate` each tick.
    ///
    /// Units: hertz
    pub sine_rate_hz: f64,

    // ---- STRAIGHT LINE ----
    /// Distance ahead of the turtle at which the boundary is checked during straight line
    /// motion.
    ///
    /// Units: meters
    pub lookahead_m: f64,

    /// If true the lookahead point is placed behind the turtle when reversing. The original
    /// behaviour, which always looks forwards, is kept when false.
    pub lookahead_follows_direction: bool,

    // ---- POINT CONTROL ----
    /// Proportional gain from distance to goal to linear speed.
    ///
    /// Units: 1/seconds
    pub k_linear: f64,

    /// Proportional gain from heading error to angular speed.
    ///
    /// Units: 1/seconds
    pub k_angular: f64,

    /// Distance from the goal under which the turtle is considered to have arrived.
    ///
    /// Units: meters
    pub arrival_threshold_m: f64,

    /// If true the heading error is wrapped into (-pi, pi] before the gain is applied. The
    /// original behaviour, which uses the raw difference, is kept when false.
    pub wrap_heading_error: bool,

    // ---- PROFILES ----
    /// Forward speed while drawing a circle.
    ///
    /// Units: meters/second
    pub circle_speed_ms: f64,

    /// Largest accepted circle radius.
    ///
    /// Units: meters
    pub circle_max_radius_m: f64,

    /// Smallest accepted spiral starting radius.
    ///
    /// Units: meters
    pub spiral_min_start_radius_m: f64,

    /// Largest accepted spiral starting radius.
    ///
    /// Units: meters
    pub spiral_max_start_radius_m: f64,

    /// Increase in spiral radius per tick.
    ///
    /// Units: meters
    pub spiral_radius_step_m: f64,

    /// The spiral finishes once its radius reaches this value.
    ///
    /// Units: meters
    pub spiral_max_radius_m: f64,

    /// Constant rate of turn while drawing a spiral.
    ///
    /// Units: radians/second
    pub spiral_turn_rate_rads: f64,

    /// Largest accepted sine wave amplitude.
    ///
    /// Units: meters
    pub sine_max_amplitude_m: f64,

    /// Largest accepted sine wave frequency.
    ///
    /// Units: cycles/meter
    pub sine_max_frequency_cpm: f64,

    /// Largest accepted sine wave speed.
    ///
    /// Units: meters/second
    pub sine_max_speed_ms: f64,

    // ---- SHAPES ----
    /// Speed of the straight sides of a shape.
    ///
    /// Units: meters/second
    pub shape_speed_ms: f64,

    /// Rate of turn at the corners of a shape.
    ///
    /// Units: degrees/second
    pub shape_turn_rate_degs: f64,

    /// Longest accepted side of a square.
    ///
    /// Units: meters
    pub square_max_side_m: f64,

    /// Longest accepted side of a triangle.
    ///
    /// Units: meters
    pub triangle_max_side_m: f64,

    /// Longest accepted side of a hexagon.
    ///
    /// Units: meters
    pub hexagon_max_side_m: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            arena_size_m: ARENA_SIZE_M,
            margin_m: DEFAULT_MARGIN_M,

            linear_rate_hz: 50.0,
            rotate_rate_hz: 50.0,
            circle_rate_hz: 50.0,
            spiral_rate_hz: 10.0,
            sine_rate_hz: 60.0,

            lookahead_m: 0.1,
            lookahead_follows_direction: false,

            k_linear: 0.5,
            k_angular: 4.0,
            arrival_threshold_m: 0.1,
            wrap_heading_error: false,

            circle_speed_ms: 1.0,
            circle_max_radius_m: 2.0,
            spiral_min_start_radius_m: 0.1,
            spiral_max_start_radius_m: 1.0,
            spiral_radius_step_m: 0.01,
            spiral_max_radius_m: 5.5,
            spiral_turn_rate_rads: 1.0,
            sine_max_amplitude_m: 2.0,
            sine_max_frequency_cpm: 2.0,
            sine_max_speed_ms: 2.0,

            shape_speed_ms: 1.0,
            shape_turn_rate_degs: 30.0,
            square_max_side_m: 4.0,
            triangle_max_side_m: 4.0,
            hexagon_max_side_m: 2.0,
        }
    }
}

impl Params {
    /// Build the arena described by these parameters.
    pub fn arena(&self) -> Result<Arena, TrajCtrlError> {
        Arena::new(self.arena_size_m, self.margin_m).map_err(TrajCtrlError::InvalidArena)
    }

    /// Check that the parameters describe a usable controller.
    pub fn validate(&self) -> Result<(), TrajCtrlError> {
        self.arena()?;

        let rates = [
            ("linear_rate_hz", self.linear_rate_hz),
            ("rotate_rate_hz", self.rotate_rate_hz),
            ("circle_rate_hz", self.circle_rate_hz),
            ("spiral_rate_hz", self.spiral_rate_hz),
            ("sine_rate_hz", self.sine_rate_hz),
        ];

        for (name, rate_hz) in rates.iter() {
            // Written so that NaN is also rejected
            if !(*rate_hz > 0.0) || rate_hz.is_infinite() {
                return Err(TrajCtrlError::InvalidRate(*name, *rate_hz));
            }
        }

        // Gains, speeds and limits
        let positive = [
            ("lookahead_m", self.lookahead_m),
            ("k_linear", self.k_linear),
            ("k_angular", self.k_angular),
            ("arrival_threshold_m", self.arrival_threshold_m),
            ("circle_speed_ms", self.circle_speed_ms),
            ("circle_max_radius_m", self.circle_max_radius_m),
            ("spiral_min_start_radius_m", self.spiral_min_start_radius_m),
            ("spiral_max_start_radius_m", self.spiral_max_start_radius_m),
            ("spiral_radius_step_m", self.spiral_radius_step_m),
            ("spiral_max_radius_m", self.spiral_max_radius_m),
            ("spiral_turn_rate_rads", self.spiral_turn_rate_rads),
            ("sine_max_amplitude_m", self.sine_max_amplitude_m),
            ("sine_max_frequency_cpm", self.sine_max_frequency_cpm),
            ("sine_max_speed_ms", self.sine_max_speed_ms),
            ("shape_speed_ms", self.shape_speed_ms),
            ("shape_turn_rate_degs", self.shape_turn_rate_degs),
            ("square_max_side_m", self.square_max_side_m),
            ("triangle_max_side_m", self.triangle_max_side_m),
            ("hexagon_max_side_m", self.hexagon_max_side_m),
        ];

        for (name, value) in positive.iter() {
            ParamRange::positive().check(*name, *value)?;
        }

        ParamRange::open_closed(0.0, self.spiral_max_start_radius_m)
            .check("spiral_min_start_radius_m", self.spiral_min_start_radius_m)?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Params::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_params() {
        let params = Params {
            margin_m: 5.5,
            ..Params::default()
        };
        assert!(matches!(
            params.validate(),
            Err(TrajCtrlError::InvalidArena(_))
        ));

        let params = Params {
            spiral_rate_hz: 0.0,
            ..Params::default()
        };
        assert!(matches!(
            params.validate(),
            Err(TrajCtrlError::InvalidRate("spiral_rate_hz", _))
        ));

        let params = Params {
            sine_rate_hz: std::f64::NAN,
            ..Params::default()
        };
        assert!(params.validate().is_err());
    }

    fn check_rejected(params: Params, field: &'static str) {
        match params.validate() {
            Err(TrajCtrlError::InvalidParameter { name, .. }) => assert_eq!(name, field),
            other => panic!("Expected {} to be rejected, got {:?}", field, other),
        }
    }

    #[test]
    fn test_zero_constants_rejected() {
        let d = Params::default;

        check_rejected(Params { lookahead_m: 0.0, ..d() }, "lookahead_m");
        check_rejected(Params { k_linear: 0.0, ..d() }, "k_linear");
        check_rejected(Params { k_angular: -4.0, ..d() }, "k_angular");
        check_rejected(Params { arrival_threshold_m: 0.0, ..d() }, "arrival_threshold_m");
        check_rejected(Params { circle_speed_ms: 0.0, ..d() }, "circle_speed_ms");
        check_rejected(Params { circle_max_radius_m: 0.0, ..d() }, "circle_max_radius_m");
        check_rejected(Params { spiral_radius_step_m: -0.01, ..d() }, "spiral_radius_step_m");
        check_rejected(Params { spiral_max_radius_m: 0.0, ..d() }, "spiral_max_radius_m");
        check_rejected(
            Params { spiral_turn_rate_rads: std::f64::NAN, ..d() },
            "spiral_turn_rate_rads",
        );
        check_rejected(Params { sine_max_amplitude_m: 0.0, ..d() }, "sine_max_amplitude_m");
        check_rejected(
            Params { sine_max_frequency_cpm: 0.0, ..d() },
            "sine_max_frequency_cpm",
        );
        check_rejected(Params { sine_max_speed_ms: 0.0, ..d() }, "sine_max_speed_ms");
        check_rejected(Params { shape_speed_ms: 0.0, ..d() }, "shape_speed_ms");
        check_rejected(Params { shape_turn_rate_degs: 0.0, ..d() }, "shape_turn_rate_degs");
        check_rejected(Params { square_max_side_m: 0.0, ..d() }, "square_max_side_m");
        check_rejected(
            Params { triangle_max_side_m: std::f64::INFINITY, ..d() },
            "triangle_max_side_m",
        );
        check_rejected(Params { hexagon_max_side_m: 0.0, ..d() }, "hexagon_max_side_m");
    }

    #[test]
    fn test_spiral_start_range() {
        check_rejected(
            Params {
                spiral_min_start_radius_m: 0.0,
                ..Params::default()
            },
            "spiral_min_start_radius_m",
        );
        check_rejected(
            Params {
                spiral_max_start_radius_m: 0.0,
                ..Params::default()
            },
            "spiral_max_start_radius_m",
        );

        // Minimum above the maximum
        check_rejected(
            Params {
                spiral_min_start_radius_m: 1.5,
                ..Params::default()
            },
            "spiral_min_start_radius_m",
        );

        // A single accepted radius is allowed
        let params = Params {
            spiral_min_start_radius_m: 1.0,
            ..Params::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_param_file_matches_default() {
        let params: Params = toml::from_str(include_str!("../../../params/traj_ctrl.toml")).unwrap();
        assert_eq!(params, Params::default());
    }

    #[test]
    fn test_partial_toml() {
        let params: Params = toml::from_str("margin_m = 0.5\nwrap_heading_error = true\n").unwrap();

        assert_eq!(params.margin_m, 0.5);
        assert!(params.wrap_heading_error);
        assert_eq!(params.k_angular, Params::default().k_angular);
    }
}
