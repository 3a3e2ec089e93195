//! Regular shapes drawn from straight lines and rotations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, warn};
use serde::Serialize;

// Internal
use super::*;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The outcome of drawing a shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeReport {
    pub shape: Shape,
    pub side_m: f64,

    /// `Completed` if every step completed, `BoundaryHalted` if any side was cut short and
    /// `Cancelled` if the shape was abandoned.
    pub state: TrajState,

    /// Reports of each side and turn, in the order they were run.
    pub steps: Vec<TrajReport>,

    /// Sum of the turns made at the corners.
    ///
    /// Units: degrees
    pub total_turn_deg: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Square,
    Triangle,
    Hexagon,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Shape {
    pub fn num_sides(&self) -> usize {
        match self {
            Shape::Square => 4,
            Shape::Triangle => 3,
            Shape::Hexagon => 6,
        }
    }

    /// The angle turned at each corner.
    pub fn exterior_angle_deg(&self) -> f64 {
        360.0 / self.num_sides() as f64
    }

    /// Longest side allowed by the parameters.
    pub fn max_side_m(&self, params: &Params) -> f64 {
        match self {
            Shape::Square => params.square_max_side_m,
            Shape::Triangle => params.triangle_max_side_m,
            Shape::Hexagon => params.hexagon_max_side_m,
        }
    }
}

impl<'a> TrajCtrl<'a> {
    pub fn draw_square(&self, side_m: f64) -> Result<ShapeReport, TrajCtrlError> {
        self.draw_shape(Shape::Square, side_m)
    }

    pub fn draw_triangle(&self, side_m: f64) -> Result<ShapeReport, TrajCtrlError> {
        self.draw_shape(Shape::Triangle, side_m)
    }

    pub fn draw_hexagon(&self, side_m: f64) -> Result<ShapeReport, TrajCtrlError> {
        self.draw_shape(Shape::Hexagon, side_m)
    }

    /// Draw a regular shape by driving each side then turning anticlockwise through the
    /// exterior angle.
    ///
    /// A side cut short by the boundary does not stop the shape, the remaining steps are still
    /// run from wherever the turtle stopped. Cancelling any step abandons the rest of the shape.
    pub fn draw_shape(&self, shape: Shape, side_m: f64) -> Result<ShapeReport, TrajCtrlError> {
        ParamRange::open_closed(0.0, shape.max_side_m(&self.params)).check("side_m", side_m)?;

        info!("Drawing {:?} with {:.2} m sides", shape, side_m);

        let exterior_deg = shape.exterior_angle_deg();
        let mut report = ShapeReport {
            shape,
            side_m,
            state: TrajState::Running,
            steps: Vec::with_capacity(2 * shape.num_sides()),
            total_turn_deg: 0.0,
        };

        for side in 0..shape.num_sides() {
            let edge = self.move_linear(self.params.shape_speed_ms, side_m, true)?;
            let edge_state = edge.state;
            report.steps.push(edge);

            match edge_state {
                TrajState::Cancelled => break,
                TrajState::BoundaryHalted => {
                    warn!("Side {} of {:?} was cut short", side + 1, shape)
                }
                _ => (),
            }

            let turn = self.rotate(self.params.shape_turn_rate_degs, exterior_deg, false)?;
            let turn_state = turn.state;
            report.total_turn_deg += match turn_state {
                TrajState::Completed => exterior_deg,
                _ => turn.progress.to_degrees(),
            };
            report.steps.push(turn);

            if turn_state == TrajState::Cancelled {
                break;
            }
        }

        report.state = report.overall_state();

        match report.state {
            TrajState::Cancelled => warn!("{:?} abandoned", shape),
            _ => info!(
                "{:?} finished, turned {:.1} deg in total",
                shape, report.total_turn_deg
            ),
        }

        Ok(report)
    }
}

impl ShapeReport {
    fn overall_state(&self) -> TrajState {
        let any = |s: TrajState| self.steps.iter().any(|r| r.state == s);

        if any(TrajState::Cancelled) {
            TrajState::Cancelled
        } else if any(TrajState::BoundaryHalted) {
            TrajState::BoundaryHalted
        } else {
            TrajState::Completed
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::loc::Pose;
    use crate::traj_ctrl::test_util::LockstepSim;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_shape_angles() {
        assert_abs_diff_eq!(Shape::Square.exterior_angle_deg(), 90.0);
        assert_abs_diff_eq!(Shape::Triangle.exterior_angle_deg(), 120.0);
        assert_abs_diff_eq!(Shape::Hexagon.exterior_angle_deg(), 60.0);

        let params = Params::default();
        assert_abs_diff_eq!(Shape::Hexagon.max_side_m(&params), 2.0);
    }

    #[test]
    fn test_square() {
        let start = Pose::new(5.0, 5.0, 0.0);
        let sim = LockstepSim::new(start);
        let report = sim.ctrl().draw_square(1.0).unwrap();

        assert_eq!(report.state, TrajState::Completed);
        assert_eq!(report.steps.len(), 8);
        assert_abs_diff_eq!(report.total_turn_deg, 360.0);
        assert!(sim.pose().distance_to(start.x_m, start.y_m) < 0.15);

        // Each step ends with its own stop
        let stops = sim.sent().iter().filter(|c| c.is_stop()).count();
        assert_eq!(stops, 8);
    }

    #[test]
    fn test_hexagon_total_turn() {
        let sim = LockstepSim::new(Pose::new(5.0, 3.0, 0.0));
        let report = sim.ctrl().draw_hexagon(1.0).unwrap();

        assert_eq!(report.state, TrajState::Completed);
        assert_abs_diff_eq!(report.total_turn_deg, 360.0);
        assert_eq!(
            report
                .steps
                .iter()
                .filter(|s| s.traj == TrajKind::Rotate)
                .count(),
            6
        );
    }

    #[test]
    fn test_truncated_side_continues() {
        let sim = LockstepSim::new(Pose::new(8.0, 5.0, 0.0));
        let report = sim.ctrl().draw_triangle(4.0).unwrap();

        assert_eq!(report.state, TrajState::BoundaryHalted);
        assert_eq!(report.steps[0].state, TrajState::BoundaryHalted);
        assert_eq!(report.steps.len(), 6);
        assert_abs_diff_eq!(report.total_turn_deg, 360.0);
    }

    #[test]
    fn test_cancel_abandons_shape() {
        let sim = LockstepSim::new(Pose::new(5.0, 5.0, 0.0)).shutdown_after(1.5);
        let report = sim.ctrl().draw_square(1.0).unwrap();

        assert_eq!(report.state, TrajState::Cancelled);
        assert_eq!(report.steps.len(), 2);
        assert_eq!(report.steps[1].state, TrajState::Cancelled);
        assert!(report.total_turn_deg < 90.0);
    }

    #[test]
    fn test_invalid_side() {
        let sim = LockstepSim::new(Pose::new(5.0, 5.0, 0.0));
        let ctrl = sim.ctrl();

        assert!(matches!(
            ctrl.draw_square(4.5),
            Err(TrajCtrlError::InvalidParameter { name: "side_m", .. })
        ));
        assert!(ctrl.draw_hexagon(0.0).is_err());
        assert!(ctrl.draw_hexagon(2.5).is_err());
        assert!(ctrl.draw_triangle(std::f64::NAN).is_err());
        assert!(sim.sent().is_empty());
    }
}
