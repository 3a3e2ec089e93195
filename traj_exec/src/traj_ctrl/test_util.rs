//! Lock-step test harness for the trajectory controllers.
//!
//! `LockstepSim` plays every collaborator at once over a `TurtleSim`. Simulated time only moves
//! when the controller paces itself, and the turtle is stepped by exactly the same amount, so
//! runs are deterministic and take no real time.

use std::cell::{Cell, RefCell};

use super::{Params, TrajCtrl};
use crate::{
    clock::Clock,
    drive::{CommandSink, VelocityCmd},
    loc::{Pose, PoseSource},
    shutdown::ShutdownSignal,
    sim::{SimParams, TurtleSim},
};

/// Time step taken by each yield of an unpaced loop.
pub const UNPACED_STEP_S: f64 = 0.001;

pub struct LockstepSim {
    sim: RefCell<TurtleSim>,
    time_s: Cell<f64>,
    sent: RefCell<Vec<VelocityCmd>>,

    /// Raise the shutdown signal once this much simulated time has passed.
    shutdown_after_s: Option<f64>,
}

impl LockstepSim {
    pub fn new(pose: Pose) -> Self {
        Self {
            sim: RefCell::new(TurtleSim::at(SimParams::default(), pose)),
            time_s: Cell::new(0.0),
            sent: RefCell::new(Vec::new()),
            shutdown_after_s: None,
        }
    }

    pub fn shutdown_after(mut self, time_s: f64) -> Self {
        self.shutdown_after_s = Some(time_s);
        self
    }

    /// A controller with default parameters driving this harness.
    pub fn ctrl(&self) -> TrajCtrl<'_> {
        self.ctrl_with(Params::default())
    }

    pub fn ctrl_with(&self, params: Params) -> TrajCtrl<'_> {
        TrajCtrl::new(params, self, self, self, self).unwrap()
    }

    pub fn pose(&self) -> Pose {
        self.sim.borrow().pose()
    }

    /// Every command sent so far, in order.
    pub fn sent(&self) -> Vec<VelocityCmd> {
        self.sent.borrow().clone()
    }

    pub fn clear_sent(&self) {
        self.sent.borrow_mut().clear();
    }

    fn advance(&self, dt_s: f64) {
        self.sim.borrow_mut().step(dt_s);
        self.time_s.set(self.time_s.get() + dt_s);
    }
}

impl PoseSource for LockstepSim {
    fn current(&self) -> Pose {
        self.pose()
    }
}

impl CommandSink for LockstepSim {
    fn send(&self, cmd: VelocityCmd) {
        self.sent.borrow_mut().push(cmd);
        self.sim.borrow_mut().command(cmd);
    }
}

impl Clock for LockstepSim {
    fn now_s(&self) -> f64 {
        self.time_s.get()
    }

    fn sleep_until_next_tick(&self, rate_hz: f64) {
        self.advance(1.0 / rate_hz);
    }

    fn yield_now(&self) {
        self.advance(UNPACED_STEP_S);
    }
}

impl ShutdownSignal for LockstepSim {
    fn is_set(&self) -> bool {
        match self.shutdown_after_s {
            Some(t) => self.time_s.get() >= t,
            None => false,
        }
    }
}
