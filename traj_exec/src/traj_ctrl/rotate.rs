//! Open loop rotation on the spot

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, trace};

// Internal
use super::*;
use crate::drive::VelocityCmd;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<'a> TrajCtrl<'a> {
    /// Rotate on the spot by `angle_deg` at `rate_degs`.
    ///
    /// The angle turned is dead reckoned from the elapsed time. Rotation cannot move the turtle
    /// so no boundary check is made.
    pub fn rotate(
        &self,
        rate_degs: f64,
        angle_deg: f64,
        clockwise: bool,
    ) -> Result<TrajReport, TrajCtrlError> {
        ParamRange::positive().check("rate_degs", rate_degs)?;
        ParamRange::positive().check("angle_deg", angle_deg)?;

        info!(
            "Rotating {:.1} deg {} at {:.1} deg/s",
            angle_deg,
            if clockwise { "clockwise" } else { "anticlockwise" },
            rate_degs
        );

        let rate_rads = rate_degs.to_radians();
        let target_rad = angle_deg.to_radians();
        let angular_rads = if clockwise { -rate_rads } else { rate_rads };
        let mut turned_rad = 0.0;

        let mut report = self.run_loop(
            TrajKind::Rotate,
            Pace::Rate(self.params.rotate_rate_hz),
            |tick| {
                turned_rad = rate_rads * tick.elapsed_s;
                if turned_rad >= target_rad {
                    return Step::Halt(TrajState::Completed);
                }

                trace!("Angle turned: {:.3} rad", turned_rad);
                Step::Emit(VelocityCmd::new(0.0, angular_rads))
            },
        );
        report.progress = turned_rad;

        if report.state == TrajState::Completed {
            info!("Rotation complete, turned {:.1} deg", turned_rad.to_degrees());
        }

        Ok(report)
    }
}
