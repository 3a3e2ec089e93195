//! # Communications interface crate.
//!
//! Provides the messages exchanged between the trajectory controllers, the turtle that executes
//! them, and the operator that requests them.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Telecommands, i.e. trajectory requests made by the operator
pub mod tc;

/// Message definitions for equipment (the turtle's pose and velocity demands)
pub mod eqpt;
