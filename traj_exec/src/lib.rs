//! # Turtle trajectory library.
//!
//! This library allows other crates in the workspace to access items defined inside the
//! trajectory executable crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Arena bounds checking - decides whether a position is safely inside the arena
pub mod bounds;

/// Clock - time source and loop pacing for the controllers
pub mod clock;

/// Drive - carries velocity commands to the turtle
pub mod drive;

/// Localisation module - provides the controllers with the turtle's latest pose
pub mod loc;

/// Executable parameters
pub mod params;

/// Shutdown signal - lets the operator cancel a running trajectory
pub mod shutdown;

/// Turtle simulator - stands in for the real turtle's pose tracking and actuators
pub mod sim;

/// Trajectory control module - drives the turtle along the requested trajectory
pub mod traj_ctrl;
