//! Parametric velocity profiles
//!
//! Circles, spirals and sine waves are drawn by sending a predetermined velocity profile. The
//! pose is only read to keep the turtle inside the arena.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, trace, warn};
use std::f64::consts::PI;

// Internal
use super::*;
use crate::drive::VelocityCmd;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<'a> TrajCtrl<'a> {
    /// Drive a single full circle of the given radius, starting tangent to the turtle's current
    /// heading.
    ///
    /// The circle is timed, it finishes once the time taken to cover the circumference at
    /// `circle_speed_ms` has passed. If the turtle leaves the inbounds region the circle is cut
    /// short.
    pub fn draw_circle(&self, radius_m: f64, clockwise: bool) -> Result<TrajReport, TrajCtrlError> {
        ParamRange::open_closed(0.0, self.params.circle_max_radius_m).check("radius_m", radius_m)?;

        let speed_ms = self.params.circle_speed_ms;
        let rate_rads = speed_ms / radius_m;
        let angular_rads = if clockwise { -rate_rads } else { rate_rads };
        let duration_s = 2.0 * PI * radius_m / speed_ms;

        info!(
            "Drawing {} circle of radius {:.2} m, will take {:.2} s",
            if clockwise { "clockwise" } else { "anticlockwise" },
            radius_m,
            duration_s
        );

        let mut report = self.run_loop(
            TrajKind::Circle,
            Pace::Rate(self.params.circle_rate_hz),
            |tick| {
                if tick.elapsed_s >= duration_s {
                    return Step::Halt(TrajState::Completed);
                }

                if !self.arena.contains_pose(&tick.pose) {
                    return Step::Halt(TrajState::BoundaryHalted);
                }

                trace!(
                    "x = {:.2}, y = {:.2}, radius = {:.2}",
                    tick.pose.x_m,
                    tick.pose.y_m,
                    radius_m
                );
                Step::Emit(VelocityCmd::new(speed_ms, angular_rads))
            },
        );
        report.progress = speed_ms * report.elapsed_s.min(duration_s);

        match report.state {
            TrajState::BoundaryHalted => warn!("Circle stopped at the arena boundary"),
            TrajState::Completed => info!("Circle complete"),
            _ => (),
        }

        Ok(report)
    }

    /// Drive an outward spiral, starting with a turn of radius `start_radius_m`.
    ///
    /// The turn rate is constant while the forward speed, and so the radius of the turn, grows
    /// by `spiral_radius_step_m` on every tick. The spiral finishes once the radius reaches
    /// `spiral_max_radius_m` or the turtle leaves the inbounds region, whichever happens first.
    pub fn draw_spiral(&self, start_radius_m: f64) -> Result<TrajReport, TrajCtrlError> {
        ParamRange::closed(
            self.params.spiral_min_start_radius_m,
            self.params.spiral_max_start_radius_m,
        )
        .check("start_radius_m", start_radius_m)?;

        info!("Drawing spiral from radius {:.2} m", start_radius_m);

        let turn_rate_rads = self.params.spiral_turn_rate_rads;
        let mut radius_m = start_radius_m;

        let mut report = self.run_loop(
            TrajKind::Spiral,
            Pace::Rate(self.params.spiral_rate_hz),
            |tick| {
                if !self.arena.contains_pose(&tick.pose) {
                    return Step::Halt(TrajState::BoundaryHalted);
                }

                if radius_m >= self.params.spiral_max_radius_m {
                    return Step::Halt(TrajState::Completed);
                }

                trace!(
                    "x = {:.2}, y = {:.2}, radius = {:.2}",
                    tick.pose.x_m,
                    tick.pose.y_m,
                    radius_m
                );
                let cmd = VelocityCmd::new(radius_m * turn_rate_rads, turn_rate_rads);
                radius_m += self.params.spiral_radius_step_m;

                Step::Emit(cmd)
            },
        );
        report.progress = radius_m;

        match report.state {
            TrajState::BoundaryHalted => warn!(
                "Spiral stopped at the arena boundary with radius {:.2} m",
                radius_m
            ),
            TrajState::Completed => info!("Spiral complete with radius {:.2} m", radius_m),
            _ => (),
        }

        Ok(report)
    }

    /// Drive along a sine wave `y = A sin(2 pi f s)`, where `s` is the arc length traveled.
    ///
    /// The arc length is advanced by one tick's worth of travel at `speed_ms` on every tick.
    /// The wave has no natural end, it runs until the turtle leaves the inbounds region or the
    /// trajectory is cancelled.
    pub fn draw_sine_wave(
        &self,
        amplitude_m: f64,
        frequency_cpm: f64,
        speed_ms: f64,
    ) -> Result<TrajReport, TrajCtrlError> {
        ParamRange::open_closed(0.0, self.params.sine_max_amplitude_m)
            .check("amplitude_m", amplitude_m)?;
        ParamRange::open_closed(0.0, self.params.sine_max_frequency_cpm)
            .check("frequency_cpm", frequency_cpm)?;
        ParamRange::open_closed(0.0, self.params.sine_max_speed_ms)
            .check("speed_ms", speed_ms)?;

        info!(
            "Drawing sine wave with amplitude {:.2} m, frequency {:.2} cycles/m at {:.2} m/s",
            amplitude_m, frequency_cpm, speed_ms
        );

        let ds_m = speed_ms / self.params.sine_rate_hz;
        let mut arc_length_m = 0.0;

        let mut report = self.run_loop(
            TrajKind::Sine,
            Pace::Rate(self.params.sine_rate_hz),
            |tick| {
                if !self.arena.contains_pose(&tick.pose) {
                    return Step::Halt(TrajState::BoundaryHalted);
                }

                let cmd = sine_cmd(arc_length_m, amplitude_m, frequency_cpm, speed_ms);
                arc_length_m += ds_m;

                Step::Emit(cmd)
            },
        );
        report.progress = arc_length_m;

        if report.state == TrajState::BoundaryHalted {
            warn!(
                "Sine wave stopped at the arena boundary after {:.2} m",
                arc_length_m
            );
        }

        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Velocity command for a sine wave at arc length `arc_length_m`.
///
/// The angular rate is set to the angle of the wave's slope at that point.
pub fn sine_cmd(
    arc_length_m: f64,
    amplitude_m: f64,
    frequency_cpm: f64,
    speed_ms: f64,
) -> VelocityCmd {
    let omega = 2.0 * PI * frequency_cpm;
    let slope = amplitude_m * omega * (omega * arc_length_m).cos();

    VelocityCmd::new(speed_ms, slope.atan())
}
