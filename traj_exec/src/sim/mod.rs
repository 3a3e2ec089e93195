//! # Turtle simulator
//!
//! A kinematic model of a differential-drive turtle, standing in for the real pose tracker and
//! actuators. The turtle follows the last velocity command it received until that command times
//! out. Each step the heading is integrated first and the position second along the new heading.
//!
//! [`spawn`] runs the model on a background thread, taking commands from a channel (see
//! [`crate::drive::ChannelSink`]) and publishing the pose into a [`PoseCell`].

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
pub use params::{SimParams, SimParamsError};

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

// Internal
use crate::drive::{ChannelSink, VelocityCmd};
use crate::loc::{Pose, PoseCell};
use util::maths::wrap_pi;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Longest time to wait for the simulator to perform a reset.
const RESET_TIMEOUT: Duration = Duration::from_secs(1);

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Kinematic state of the simulated turtle.
#[derive(Debug, Clone)]
pub struct TurtleSim {
    params: SimParams,

    pose: Pose,

    /// The command currently being followed.
    cmd: VelocityCmd,

    /// Time since `cmd` was received.
    cmd_age_s: f64,

    /// Set while the turtle is pressed against a wall, so the collision is only reported once.
    at_wall: bool,
}

/// Handle to a simulator running on a background thread.
pub struct SimHandle {
    pose: PoseCell,
    reset: Arc<AtomicBool>,
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TurtleSim {
    /// Create a new turtle at the spawn pose.
    pub fn new(params: SimParams) -> Self {
        Self {
            pose: params.spawn_pose,
            params,
            cmd: VelocityCmd::stop(),
            cmd_age_s: 0.0,
            at_wall: false,
        }
    }

    /// Create a new turtle at the given pose.
    pub fn at(params: SimParams, pose: Pose) -> Self {
        let mut sim = Self::new(params);
        sim.pose = pose;
        sim
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Set the command the turtle follows from now on.
    pub fn command(&mut self, cmd: VelocityCmd) {
        self.cmd = cmd;
        self.cmd_age_s = 0.0;
    }

    /// Put the turtle back at its spawn pose, stationary.
    pub fn reset(&mut self) {
        self.pose = self.params.spawn_pose;
        self.cmd = VelocityCmd::stop();
        self.cmd_age_s = 0.0;
        self.at_wall = false;
    }

    /// Advance the simulation by `dt_s` seconds.
    pub fn step(&mut self, dt_s: f64) {
        if self.cmd_age_s > self.params.cmd_timeout_s {
            self.cmd = VelocityCmd::stop();
        }
        self.cmd_age_s += dt_s;

        self.pose.theta_rad = wrap_pi(self.pose.theta_rad + self.cmd.angular_rads * dt_s);
        self.pose.x_m += self.pose.theta_rad.cos() * self.cmd.linear_ms * dt_s;
        self.pose.y_m += self.pose.theta_rad.sin() * self.cmd.linear_ms * dt_s;

        // Clamp to the window
        let max = self.params.window_size_m;
        let clamped_x = self.pose.x_m.max(0.0).min(max);
        let clamped_y = self.pose.y_m.max(0.0).min(max);

        let hit_wall = clamped_x != self.pose.x_m || clamped_y != self.pose.y_m;
        if hit_wall && !self.at_wall {
            warn!(
                "Turtle hit the wall at ({:.2}, {:.2})",
                clamped_x, clamped_y
            );
        }
        self.at_wall = hit_wall;

        self.pose.x_m = clamped_x;
        self.pose.y_m = clamped_y;
    }
}

impl SimHandle {
    /// The cell the simulator publishes the turtle's pose into.
    pub fn pose_cell(&self) -> PoseCell {
        self.pose.clone()
    }

    /// Put the turtle back at its spawn pose.
    ///
    /// Blocks until the simulator has published the spawn pose, returning false if it did not
    /// do so within `RESET_TIMEOUT`.
    pub fn reset(&self) -> bool {
        self.reset.store(true, Ordering::SeqCst);

        let start = Instant::now();
        while self.reset.load(Ordering::SeqCst) {
            if start.elapsed() > RESET_TIMEOUT {
                warn!("Simulator did not acknowledge the reset");
                return false;
            }
            thread::sleep(Duration::from_millis(1));
        }

        true
    }

    /// Stop the simulator thread and wait for it to exit.
    pub fn stop(mut self) {
        self.stop_thread();
    }

    fn stop_thread(&mut self) {
        self.stop.store(true, Ordering::SeqCst);

        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                warn!("Simulator thread panicked");
            }
        }
    }
}

impl Drop for SimHandle {
    fn drop(&mut self) {
        self.stop_thread();
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Start the simulator on a background thread.
///
/// Returns the handle used to read the pose and control the simulator, and the command sink
/// which drives the turtle. Nothing is started if the parameters are invalid.
pub fn spawn(params: SimParams) -> Result<(SimHandle, ChannelSink), SimParamsError> {
    params.validate()?;

    let (tx, rx) = channel();

    let pose = PoseCell::new(params.spawn_pose);
    let reset = Arc::new(AtomicBool::new(false));
    let stop = Arc::new(AtomicBool::new(false));

    let thread = {
        let pose = pose.clone();
        let reset = reset.clone();
        let stop = stop.clone();
        thread::spawn(move || sim_thread(TurtleSim::new(params), rx, pose, reset, stop))
    };

    info!("Turtle simulator started");

    Ok((
        SimHandle {
            pose,
            reset,
            stop,
            thread: Some(thread),
        },
        ChannelSink::new(tx),
    ))
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn sim_thread(
    mut sim: TurtleSim,
    cmd_rx: Receiver<VelocityCmd>,
    pose: PoseCell,
    reset: Arc<AtomicBool>,
    stop: Arc<AtomicBool>,
) {
    let period = Duration::from_secs_f64(1.0 / sim.params.rate_hz);
    let mut cmds_connected = true;

    while !stop.load(Ordering::SeqCst) {
        let cycle_start = Instant::now();

        // The flag is only cleared once the spawn pose is visible to readers
        if reset.load(Ordering::SeqCst) {
            sim.reset();
            pose.set(sim.pose());
            reset.store(false, Ordering::SeqCst);
            info!("Turtle reset to {:?}", sim.pose());
        }

        // Only the latest command matters
        while cmds_connected {
            match cmd_rx.try_recv() {
                Ok(cmd) => sim.command(cmd),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    debug!("Command channel closed, turtle will stop");
                    cmds_connected = false;
                }
            }
        }

        sim.step(period.as_secs_f64());
        pose.set(sim.pose());

        if let Some(d) = period.checked_sub(cycle_start.elapsed()) {
            thread::sleep(d);
        }
    }

    debug!("Simulator thread exiting");
}
