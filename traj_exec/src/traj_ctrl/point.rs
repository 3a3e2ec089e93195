//! Closed loop point to point navigation

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, trace, warn};
use nalgebra::Vector2;

// Internal
use super::*;
use crate::drive::VelocityCmd;
use crate::loc::Pose;
use util::maths::ang_dist;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<'a> TrajCtrl<'a> {
    /// Drive to the point `(x_m, y_m)` using proportional control on the distance and heading
    /// errors.
    ///
    /// The loop is not rate limited, it yields between iterations and finishes once the turtle
    /// is within `arrival_threshold_m` of the goal. The boundary is not checked during the
    /// approach. If the turtle ends up out of bounds the trajectory finishes as
    /// `BoundaryHalted`.
    pub fn go_to_point(&self, x_m: f64, y_m: f64) -> Result<TrajReport, TrajCtrlError> {
        if !self.arena.contains(x_m, y_m) {
            return Err(TrajCtrlError::GoalOutOfBounds { x_m, y_m });
        }

        info!("Going to ({:.2}, {:.2})", x_m, y_m);

        let mut report = self.run_loop(TrajKind::GoTo, Pace::Unpaced, |tick| {
            if tick.pose.distance_to(x_m, y_m) < self.params.arrival_threshold_m {
                return Step::Halt(TrajState::Completed);
            }

            Step::Emit(point_cmd(&tick.pose, x_m, y_m, &self.params))
        });

        report.progress = report.final_pose.distance_to(x_m, y_m);

        if report.state == TrajState::Completed {
            if self.arena.contains_pose(&report.final_pose) {
                info!(
                    "Target reached at ({:.2}, {:.2})",
                    report.final_pose.x_m, report.final_pose.y_m
                );
            } else {
                warn!("Stopped out of bounds at {:?}", report.final_pose);
                report.state = TrajState::BoundaryHalted;
            }
        }

        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Calculate the proportional control command to drive from `pose` towards `(x_m, y_m)`.
///
/// The heading error is the raw difference between the desired and current headings unless
/// `wrap_heading_error` is set, so a goal just across the +/-pi line can demand a turn of
/// almost a full revolution.
pub fn point_cmd(pose: &Pose, x_m: f64, y_m: f64, params: &Params) -> VelocityCmd {
    let error = Vector2::new(x_m, y_m) - Vector2::new(pose.x_m, pose.y_m);
    let desired_rad = error.y.atan2(error.x);

    let head_error_rad = if params.wrap_heading_error {
        ang_dist(pose.theta_rad, desired_rad)
    } else {
        desired_rad - pose.theta_rad
    };

    trace!(
        "Distance {:.3} m, heading error {:.3} rad",
        error.norm(),
        head_error_rad
    );

    VelocityCmd::new(
        error.norm() * params.k_linear,
        head_error_rad * params.k_angular,
    )
}
