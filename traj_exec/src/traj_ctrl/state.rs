//! Trajectory control module state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{trace, warn};
use serde::Serialize;

// Internal
use super::*;
use crate::{
    bounds::Arena,
    clock::Clock,
    drive::{CommandSink, VelocityCmd},
    loc::{Pose, PoseSource},
    shutdown::ShutdownSignal,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Trajectory controller.
///
/// Holds the validated parameters and borrows the collaborators used by every trajectory: the
/// pose source, the command sink, the clock and the shutdown signal. Each trajectory is run by
/// one of the blocking methods on this struct, which returns once the trajectory has finished
/// and the turtle has been sent a stop command.
pub struct TrajCtrl<'a> {
    pub(super) params: Params,
    pub(super) arena: Arena,

    pub(super) pose_src: &'a dyn PoseSource,
    pub(super) cmd_sink: &'a dyn CommandSink,
    pub(super) clock: &'a dyn Clock,
    pub(super) shutdown: &'a dyn ShutdownSignal,
}

/// The outcome of running a single trajectory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajReport {
    pub traj: TrajKind,

    /// The state the trajectory finished in.
    pub state: TrajState,

    /// Number of non-zero velocity commands sent. The final stop command is not counted.
    pub num_ticks: usize,

    /// Time from the start of the trajectory until the loop finished.
    ///
    /// Units: seconds
    pub elapsed_s: f64,

    pub start_pose: Pose,
    pub final_pose: Pose,

    /// The progress made along the trajectory when it finished. This is the dead-reckoned
    /// distance for a line, the dead-reckoned angle for a rotation, the arc length for a circle
    /// or sine wave, the final radius for a spiral and the remaining distance to the goal for
    /// point navigation.
    pub progress: f64,
}

/// Data available to a trajectory on each tick of its loop.
#[derive(Debug, Copy, Clone)]
pub struct Tick {
    /// The latest pose, read at the start of the tick.
    pub pose: Pose,

    /// Time since the first tick.
    ///
    /// Units: seconds
    pub elapsed_s: f64,

    /// Number of the tick, starting at zero.
    pub index: usize,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The kinds of trajectory that can be run.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrajKind {
    Line,
    Rotate,
    GoTo,
    Circle,
    Spiral,
    Sine,
}

/// The state of a trajectory.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum TrajState {
    /// Commands are being sent.
    Running,

    /// The trajectory was stopped to keep the turtle inside the arena.
    BoundaryHalted,

    /// The trajectory's own termination condition was met.
    Completed,

    /// The shutdown signal was raised.
    Cancelled,
}

/// What a trajectory wants to happen on the current tick.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Step {
    /// Send this command and continue.
    Emit(VelocityCmd),

    /// Stop the loop, finishing in this state.
    Halt(TrajState),
}

/// How the loop is paced between ticks.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Pace {
    /// Tick at a fixed rate in hertz.
    Rate(f64),

    /// Run as fast as possible, yielding between ticks.
    Unpaced,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<'a> TrajCtrl<'a> {
    /// Create a new trajectory controller, checking the parameters.
    pub fn new(
        params: Params,
        pose_src: &'a dyn PoseSource,
        cmd_sink: &'a dyn CommandSink,
        clock: &'a dyn Clock,
        shutdown: &'a dyn ShutdownSignal,
    ) -> Result<Self, TrajCtrlError> {
        params.validate()?;
        let arena = params.arena()?;

        Ok(Self {
            params,
            arena,
            pose_src,
            cmd_sink,
            clock,
            shutdown,
        })
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Run a trajectory loop until it halts or is cancelled.
    ///
    /// Each tick the shutdown signal is polled, the pose is read and `step` decides what to do.
    /// A stop command is sent exactly once after the loop has finished, whatever the reason.
    /// The returned report has zero progress, the caller fills it in.
    pub(super) fn run_loop<F>(&self, traj: TrajKind, pace: Pace, mut step: F) -> TrajReport
    where
        F: FnMut(&Tick) -> Step,
    {
        let start_pose = self.pose_src.current();
        let t0 = self.clock.now_s();
        let mut num_ticks = 0;

        let state = loop {
            if self.shutdown.is_set() {
                warn!("{:?} cancelled after {} ticks", traj, num_ticks);
                break TrajState::Cancelled;
            }

            let tick = Tick {
                pose: self.pose_src.current(),
                elapsed_s: self.clock.now_s() - t0,
                index: num_ticks,
            };

            match step(&tick) {
                Step::Emit(cmd) => {
                    trace!("{:?} tick {}: {:?} at {:?}", traj, tick.index, cmd, tick.pose);
                    self.cmd_sink.send(cmd);
                    num_ticks += 1;
                }
                Step::Halt(state) => break state,
            }

            match pace {
                Pace::Rate(rate_hz) => self.clock.sleep_until_next_tick(rate_hz),
                Pace::Unpaced => self.clock.yield_now(),
            }
        };

        let elapsed_s = self.clock.now_s() - t0;
        self.cmd_sink.send(VelocityCmd::stop());

        TrajReport {
            traj,
            state,
            num_ticks,
            elapsed_s,
            start_pose,
            final_pose: self.pose_src.current(),
            progress: 0.0,
        }
    }
}
