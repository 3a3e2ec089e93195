//! Open loop straight line motion

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, trace, warn};

// Internal
use super::*;
use crate::drive::VelocityCmd;
use crate::loc::Pose;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<'a> TrajCtrl<'a> {
    /// Drive in a straight line for `distance_m` at `speed_ms`, forwards or in reverse.
    ///
    /// The distance covered is dead reckoned from the elapsed time. Before each command the
    /// point `lookahead_m` ahead of the turtle is checked against the arena, and the line is
    /// cut short if that point is out of bounds.
    pub fn move_linear(
        &self,
        speed_ms: f64,
        distance_m: f64,
        forward: bool,
    ) -> Result<TrajReport, TrajCtrlError> {
        ParamRange::positive().check("speed_ms", speed_ms)?;
        ParamRange::positive().check("distance_m", distance_m)?;

        info!(
            "Moving {} {:.2} m at {:.2} m/s",
            if forward { "forward" } else { "backward" },
            distance_m,
            speed_ms
        );

        let linear_ms = if forward { speed_ms } else { -speed_ms };
        let mut traveled_m = 0.0;

        let mut report = self.run_loop(
            TrajKind::Line,
            Pace::Rate(self.params.linear_rate_hz),
            |tick| {
                traveled_m = speed_ms * tick.elapsed_s;
                if traveled_m >= distance_m {
                    return Step::Halt(TrajState::Completed);
                }

                let (x_m, y_m) = self.lookahead_point(&tick.pose, forward);
                if !self.arena.contains(x_m, y_m) {
                    return Step::Halt(TrajState::BoundaryHalted);
                }

                trace!("Distance traveled: {:.2} m", traveled_m);
                Step::Emit(VelocityCmd::new(linear_ms, 0.0))
            },
        );
        report.progress = traveled_m;

        match report.state {
            TrajState::BoundaryHalted => warn!(
                "Turtle stopped at the arena boundary after {:.2} m",
                traveled_m
            ),
            TrajState::Completed => info!("Line complete, traveled {:.2} m", traveled_m),
            _ => (),
        }

        Ok(report)
    }

    /// The point checked against the arena before each straight line command.
    ///
    /// Unless `lookahead_follows_direction` is set this is always ahead of the turtle, even when
    /// it is reversing.
    fn lookahead_point(&self, pose: &Pose, forward: bool) -> (f64, f64) {
        let sign = if forward || !self.params.lookahead_follows_direction {
            1.0
        } else {
            -1.0
        };
        let dir = pose.forward();

        (
            pose.x_m + sign * dir[0] * self.params.lookahead_m,
            pose.y_m + sign * dir[1] * self.params.lookahead_m,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::traj_ctrl::test_util::LockstepSim;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_line_completes() {
        let sim = LockstepSim::new(Pose::new(5.0, 5.0, 0.0));
        let report = sim.ctrl().move_linear(1.0, 2.0, true).unwrap();

        assert_eq!(report.state, TrajState::Completed);
        assert_abs_diff_eq!(report.elapsed_s, 2.0, epsilon = 0.021);
        assert_abs_diff_eq!(report.progress, 2.0, epsilon = 0.021);
        assert_abs_diff_eq!(sim.pose().x_m, 7.0, epsilon = 0.03);
        assert_abs_diff_eq!(sim.pose().y_m, 5.0, epsilon = 1e-9);

        let sent = sim.sent();
        assert_eq!(sent.len(), report.num_ticks + 1);
        assert!(sent[..report.num_ticks]
            .iter()
            .all(|c| *c == VelocityCmd::new(1.0, 0.0)));
        assert!(sent.last().unwrap().is_stop());
    }

    #[test]
    fn test_lookahead_at_wall() {
        // Facing a wall 0.05 m away, the lookahead point is already out
        let sim = LockstepSim::new(Pose::new(9.95, 5.0, 0.0));
        let report = sim.ctrl().move_linear(1.0, 1.0, true).unwrap();

        assert_eq!(report.state, TrajState::BoundaryHalted);
        assert_eq!(report.num_ticks, 0);
        assert_eq!(sim.sent(), vec![VelocityCmd::stop()]);
    }

    #[test]
    fn test_stops_before_boundary() {
        let sim = LockstepSim::new(Pose::new(8.0, 5.0, 0.0));
        let report = sim.ctrl().move_linear(1.0, 5.0, true).unwrap();

        assert_eq!(report.state, TrajState::BoundaryHalted);
        assert!(report.progress < 5.0);

        let x = sim.pose().x_m;
        assert!(x > 9.85 && x <= 10.0, "x {}", x);
    }

    #[test]
    fn test_reverse_lookahead() {
        // By default the lookahead ignores the direction of travel, so reversing away from a
        // wall is refused
        let sim = LockstepSim::new(Pose::new(9.95, 5.0, 0.0));
        let report = sim.ctrl().move_linear(1.0, 1.0, false).unwrap();
        assert_eq!(report.state, TrajState::BoundaryHalted);
        assert_eq!(report.num_ticks, 0);

        let params = Params {
            lookahead_follows_direction: true,
            ..Params::default()
        };
        let sim = LockstepSim::new(Pose::new(9.95, 5.0, 0.0));
        let report = sim.ctrl_with(params).move_linear(1.0, 1.0, false).unwrap();

        assert_eq!(report.state, TrajState::Completed);
        assert_abs_diff_eq!(sim.pose().x_m, 8.95, epsilon = 0.03);
        assert!(sim.sent()[0].linear_ms < 0.0);
    }

    #[test]
    fn test_cancelled() {
        let sim = LockstepSim::new(Pose::new(2.0, 5.0, 0.0)).shutdown_after(0.5);
        let report = sim.ctrl().move_linear(1.0, 5.0, true).unwrap();

        assert_eq!(report.state, TrajState::Cancelled);
        assert!(sim.pose().x_m < 2.6);
        assert!(sim.sent().last().unwrap().is_stop());
    }

    #[test]
    fn test_invalid_params() {
        let sim = LockstepSim::new(Pose::new(5.0, 5.0, 0.0));
        let ctrl = sim.ctrl();

        assert!(matches!(
            ctrl.move_linear(0.0, 1.0, true),
            Err(TrajCtrlError::InvalidParameter {
                name: "speed_ms",
                ..
            })
        ));
        assert!(ctrl.move_linear(1.0, std::f64::NAN, true).is_err());
        assert!(ctrl.move_linear(1.0, -2.0, true).is_err());
        assert!(sim.sent().is_empty());
    }
}
