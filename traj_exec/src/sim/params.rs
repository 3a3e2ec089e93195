//! Simulator parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;
use thiserror::Error;

use comms_if::eqpt::turtle::Pose;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the turtle simulator.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimParams {
    /// Rate at which the simulation is stepped and the pose published.
    ///
    /// Units: hertz
    pub rate_hz: f64,

    /// A velocity command older than this is ignored and the turtle stops.
    ///
    /// Units: seconds
    pub cmd_timeout_s: f64,

    /// Side length of the visible window. The turtle's position is clamped to this.
    ///
    /// Units: meters
    pub window_size_m: f64,

    /// Pose the turtle starts at, and returns to on reset.
    pub spawn_pose: Pose,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum SimParamsError {
    #[error("{0} must be positive and finite, found {1}")]
    NotPositive(&'static str, f64),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimParams {
    /// Check that the simulator can run with these parameters.
    pub fn validate(&self) -> Result<(), SimParamsError> {
        let checks = [
            ("rate_hz", self.rate_hz),
            ("cmd_timeout_s", self.cmd_timeout_s),
            ("window_size_m", self.window_size_m),
        ];

        for (name, value) in checks.iter() {
            // NaN fails the first comparison
            if !(*value > 0.0) || value.is_infinite() {
                return Err(SimParamsError::NotPositive(*name, *value));
            }
        }

        Ok(())
    }
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            rate_hz: 62.5,
            cmd_timeout_s: 1.0,
            window_size_m: 11.088889,
            spawn_pose: Pose::new(5.544445, 5.544445, 0.0),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_param_file_matches_default() {
        let params: SimParams = toml::from_str(include_str!("../../../params/sim.toml")).unwrap();
        assert_eq!(params, SimParams::default());
    }

    #[test]
    fn test_validate() {
        assert_eq!(SimParams::default().validate(), Ok(()));

        let params = SimParams {
            rate_hz: 0.0,
            ..SimParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(SimParamsError::NotPositive("rate_hz", 0.0))
        );

        let params = SimParams {
            rate_hz: std::f64::NAN,
            ..SimParams::default()
        };
        assert!(params.validate().is_err());

        let params = SimParams {
            cmd_timeout_s: -1.0,
            ..SimParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(SimParamsError::NotPositive("cmd_timeout_s", -1.0))
        );

        let params = SimParams {
            window_size_m: 0.0,
            ..SimParams::default()
        };
        assert!(params.validate().is_err());
    }
}
