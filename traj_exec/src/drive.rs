//! # Drive module
//!
//! Carries velocity commands from the trajectory controllers to the turtle.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::warn;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;

pub use comms_if::eqpt::turtle::VelocityCmd;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Accepts velocity commands for dispatch to the turtle.
///
/// Sending is fire-and-forget: no acknowledgement is awaited and failures are not reported to
/// the controller.
pub trait CommandSink {
    fn send(&self, cmd: VelocityCmd);
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A command sink backed by an unbounded channel.
pub struct ChannelSink {
    sender: Sender<VelocityCmd>,

    /// Set once the receiver has gone, so the disconnect is only reported once
    disconnected: AtomicBool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ChannelSink {
    pub fn new(sender: Sender<VelocityCmd>) -> Self {
        Self {
            sender,
            disconnected: AtomicBool::new(false),
        }
    }
}

impl CommandSink for ChannelSink {
    fn send(&self, cmd: VelocityCmd) {
        if self.sender.send(cmd).is_err() && !self.disconnected.swap(true, Ordering::Relaxed) {
            warn!("Turtle is no longer receiving velocity commands");
        }
    }
}
