//! # Telecommand module
//!
//! Telecommands are the trajectory requests made by the operator, either typed into the
//! interactive console or read from a script. Each one can be parsed from a command line style
//! string (`circle 1.5 --clockwise`) or from its JSON serialisation
//! (`{"Circle": {"radius_m": 1.5, "clockwise": true}}`).

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use structopt::StructOpt;
use thiserror::Error;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A telecommand, i.e. an instruction sent to the trajectory executable by the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, StructOpt)]
#[structopt(name = "tc", no_version)]
pub enum Tc {
    /// Draw a square by driving four sides and turning 90 degrees after each.
    #[structopt(name = "square")]
    Square {
        /// Length of each side in meters, in (0, 4]
        side_m: f64,
    },

    /// Draw an equilateral triangle, turning 120 degrees after each side.
    #[structopt(name = "triangle")]
    Triangle {
        /// Length of each side in meters, in (0, 4]
        side_m: f64,
    },

    /// Draw a regular hexagon, turning 60 degrees after each side.
    #[structopt(name = "hexagon")]
    Hexagon {
        /// Length of each side in meters, in (0, 2]
        side_m: f64,
    },

    /// Drive one full revolution of a circle at 1 m/s.
    #[structopt(name = "circle")]
    Circle {
        /// Radius of the circle in meters, in (0, 2]
        radius_m: f64,

        /// Turn to the right rather than the left
        #[structopt(long)]
        clockwise: bool,
    },

    /// Drive an outward spiral until the radius reaches 5.5 m or the boundary is reached.
    #[structopt(name = "spiral")]
    Spiral {
        /// Starting radius in meters, in [0.1, 1]
        start_radius_m: f64,
    },

    /// Drive to a point using proportional feedback on the turtle's pose.
    #[structopt(name = "goto")]
    GoTo {
        /// Target X coordinate in meters
        x_m: f64,

        /// Target Y coordinate in meters
        y_m: f64,
    },

    /// Trace a sine wave parametrised by arc length until the boundary is reached.
    #[structopt(name = "sine")]
    Sine {
        /// Amplitude in meters, in (0, 2]
        amplitude_m: f64,

        /// Frequency in cycles/meter, in (0, 2]
        frequency_cpm: f64,

        /// Forward speed in meters/second, in (0, 2]
        speed_ms: f64,
    },

    /// Drive in a straight line using dead reckoning.
    #[structopt(name = "line")]
    Line {
        /// Speed in meters/second
        speed_ms: f64,

        /// Distance in meters
        distance_m: f64,

        /// Drive backwards
        #[structopt(long)]
        reverse: bool,
    },

    /// Rotate on the spot using dead reckoning.
    #[structopt(name = "rotate")]
    Rotate {
        /// Rate of turn in degrees/second
        rate_degs: f64,

        /// Angle to turn through in degrees
        angle_deg: f64,

        /// Turn to the right rather than the left
        #[structopt(long)]
        clockwise: bool,
    },

    /// Put the turtle back at its spawn pose.
    #[structopt(name = "reset")]
    Reset,

    /// Print the turtle's current pose.
    #[structopt(name = "pose")]
    Pose,

    /// Exit the executable.
    #[structopt(name = "exit")]
    Exit,
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum TcParseError {
    #[error("TC is empty")]
    Empty,

    #[error("TC contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("{0}")]
    InvalidCommand(structopt::clap::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Tc {
    /// Parse a TC from either a command line style string or a JSON object.
    ///
    /// Strings beginning with `{` are treated as JSON.
    pub fn parse(s: &str) -> Result<Self, TcParseError> {
        let s = s.trim();

        if s.is_empty() {
            return Err(TcParseError::Empty);
        }

        if s.starts_with('{') {
            Self::from_json(s)
        } else {
            Self::from_line(s)
        }
    }

    /// Parse a new TC from a JSON packet
    pub fn from_json(json_str: &str) -> Result<Self, TcParseError> {
        serde_json::from_str(json_str).map_err(TcParseError::InvalidJson)
    }

    /// Parse a new TC from a whitespace separated command line, for example `goto 3 4`.
    pub fn from_line(line: &str) -> Result<Self, TcParseError> {
        Self::from_iter_safe(std::iter::once("tc").chain(line.split_whitespace()))
            .map_err(TcParseError::InvalidCommand)
    }

    /// Short name of the TC, used to label archived reports.
    pub fn name(&self) -> &'static str {
        match self {
            Tc::Square { .. } => "square",
            Tc::Triangle { .. } => "triangle",
            Tc::Hexagon { .. } => "hexagon",
            Tc::Circle { .. } => "circle",
            Tc::Spiral { .. } => "spiral",
            Tc::GoTo { .. } => "goto",
            Tc::Sine { .. } => "sine",
            Tc::Line { .. } => "line",
            Tc::Rotate { .. } => "rotate",
            Tc::Reset => "reset",
            Tc::Pose => "pose",
            Tc::Exit => "exit",
        }
    }

    /// True if executing this TC will move the turtle along a trajectory.
    pub fn is_trajectory(&self) -> bool {
        !matches!(self, Tc::Reset | Tc::Pose | Tc::Exit)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_line() {
        assert_eq!(
            Tc::from_line("circle 1.5 --clockwise").unwrap(),
            Tc::Circle {
                radius_m: 1.5,
                clockwise: true
            }
        );
        assert_eq!(
            Tc::from_line("  goto 3   4 ").unwrap(),
            Tc::GoTo { x_m: 3.0, y_m: 4.0 }
        );
        assert_eq!(
            Tc::from_line("sine 1 0.5 1").unwrap(),
            Tc::Sine {
                amplitude_m: 1.0,
                frequency_cpm: 0.5,
                speed_ms: 1.0
            }
        );
        assert_eq!(Tc::from_line("reset").unwrap(), Tc::Reset);
    }

    #[test]
    fn test_from_line_invalid() {
        assert!(matches!(
            Tc::from_line("square"),
            Err(TcParseError::InvalidCommand(_))
        ));
        assert!(matches!(
            Tc::from_line("dance 2"),
            Err(TcParseError::InvalidCommand(_))
        ));
        assert!(matches!(
            Tc::from_line("square two"),
            Err(TcParseError::InvalidCommand(_))
        ));
    }

    #[test]
    fn test_parse_json() {
        assert_eq!(
            Tc::parse(r#"{"Square": {"side_m": 2.0}}"#).unwrap(),
            Tc::Square { side_m: 2.0 }
        );
        assert_eq!(Tc::parse(r#"{"Rotate": {"rate_degs": 30.0, "angle_deg": 90.0, "clockwise": false}}"#).unwrap(),
            Tc::Rotate {
                rate_degs: 30.0,
                angle_deg: 90.0,
                clockwise: false
            }
        );
        assert!(matches!(Tc::parse("   "), Err(TcParseError::Empty)));
        assert!(matches!(
            Tc::parse("{not json"),
            Err(TcParseError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_is_trajectory() {
        assert!(Tc::Spiral { start_radius_m: 0.5 }.is_trajectory());
        assert!(!Tc::Pose.is_trajectory());
        assert_eq!(Tc::Hexagon { side_m: 1.0 }.name(), "hexagon");
    }
}
