//! # Telecommand processor module
//!
//! The telecommand processor executes TCs coming from either the console or a script.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, warn};
use serde::Serialize;

// Internal
use comms_if::tc::Tc;
use traj_lib::{
    loc::{PoseCell, PoseSource},
    sim::SimHandle,
    traj_ctrl::{ShapeReport, TrajCtrl, TrajCtrlError, TrajReport},
};
use util::session::Session;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Executes telecommands against the trajectory controller and simulator.
pub(crate) struct TcProcessor<'a> {
    pub ctrl: TrajCtrl<'a>,
    pub sim: &'a SimHandle,
    pub pose: &'a PoseCell,
    pub session: &'a Session,

    /// Save the report of every trajectory in the session directory
    pub archive_reports: bool,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// What the executable should do after a TC has been processed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum TcOutcome {
    Continue,
    Exit,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<'a> TcProcessor<'a> {
    /// Execute a telecommand.
    ///
    /// Trajectory TCs block until the trajectory has finished. A trajectory which cannot be
    /// started is reported and otherwise ignored.
    pub fn exec(&self, tc: &Tc) -> TcOutcome {
        let ctrl = &self.ctrl;

        match *tc {
            Tc::Square { side_m } => self.shape_done(tc, ctrl.draw_square(side_m)),
            Tc::Triangle { side_m } => self.shape_done(tc, ctrl.draw_triangle(side_m)),
            Tc::Hexagon { side_m } => self.shape_done(tc, ctrl.draw_hexagon(side_m)),
            Tc::Circle {
                radius_m,
                clockwise,
            } => self.traj_done(tc, ctrl.draw_circle(radius_m, clockwise)),
            Tc::Spiral { start_radius_m } => self.traj_done(tc, ctrl.draw_spiral(start_radius_m)),
            Tc::GoTo { x_m, y_m } => self.traj_done(tc, ctrl.go_to_point(x_m, y_m)),
            Tc::Sine {
                amplitude_m,
                frequency_cpm,
                speed_ms,
            } => self.traj_done(
                tc,
                ctrl.draw_sine_wave(amplitude_m, frequency_cpm, speed_ms),
            ),
            Tc::Line {
                speed_ms,
                distance_m,
                reverse,
            } => self.traj_done(tc, ctrl.move_linear(speed_ms, distance_m, !reverse)),
            Tc::Rotate {
                rate_degs,
                angle_deg,
                clockwise,
            } => self.traj_done(tc, ctrl.rotate(rate_degs, angle_deg, clockwise)),
            Tc::Reset => {
                if self.sim.reset() {
                    info!("The turtle's location has been reset");
                }
            }
            Tc::Pose => {
                let pose = self.pose.current();
                info!(
                    "Turtle at ({:.3}, {:.3}) heading {:.1} deg",
                    pose.x_m,
                    pose.y_m,
                    pose.theta_rad.to_degrees()
                );
            }
            Tc::Exit => return TcOutcome::Exit,
        }

        TcOutcome::Continue
    }

    fn traj_done(&self, tc: &Tc, result: Result<TrajReport, TrajCtrlError>) {
        if let Some(report) = self.check(tc, result) {
            info!(
                "{} finished in state {:?} after {} ticks ({:.2} s)",
                tc.name(),
                report.state,
                report.num_ticks,
                report.elapsed_s
            );
            self.archive(tc, report);
        }
    }

    fn shape_done(&self, tc: &Tc, result: Result<ShapeReport, TrajCtrlError>) {
        if let Some(report) = self.check(tc, result) {
            info!(
                "{} finished in state {:?}, {} steps turning {:.1} deg",
                tc.name(),
                report.state,
                report.steps.len(),
                report.total_turn_deg
            );
            self.archive(tc, report);
        }
    }

    fn check<T>(&self, tc: &Tc, result: Result<T, TrajCtrlError>) -> Option<T> {
        match result {
            Ok(r) => Some(r),
            Err(e) => {
                warn!("Cannot execute {}: {}", tc.name(), e);
                None
            }
        }
    }

    fn archive<T: Serialize + Send + 'static>(&self, tc: &Tc, report: T) {
        if self.archive_reports {
            self.session
                .save_with_timestamp(format!("reports/{}.json", tc.name()), report);
        }
    }
}
