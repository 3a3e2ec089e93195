//! # Equipment Interface
//!
//! This module defines the interface structures which are exchanged with the turtle.

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

pub mod turtle;
