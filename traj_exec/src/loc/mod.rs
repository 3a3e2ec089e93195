//! # Localisation module
//!
//! Provides the trajectory controllers with the turtle's latest pose. The pose is written by
//! whatever is tracking the turtle (the simulator in this executable) and read by the
//! controllers at the top of each tick.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use arc_swap::ArcSwap;
use std::sync::Arc;

pub use comms_if::eqpt::turtle::Pose;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A source of the turtle's latest pose.
pub trait PoseSource {
    /// Return the most recent pose. Must never block waiting for a new one.
    fn current(&self) -> Pose;
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A single slot holding the latest pose.
///
/// Writers replace the whole pose at once, so readers always see a complete pose, never a mix
/// of two updates. Clones share the same slot.
#[derive(Clone)]
pub struct PoseCell {
    inner: Arc<ArcSwap<Pose>>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PoseCell {
    pub fn new(pose: Pose) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(pose)),
        }
    }

    /// Replace the stored pose.
    pub fn set(&self, pose: Pose) {
        self.inner.store(Arc::new(pose));
    }
}

impl Default for PoseCell {
    fn default() -> Self {
        Self::new(Pose::default())
    }
}

impl PoseSource for PoseCell {
    fn current(&self) -> Pose {
        **self.inner.load()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::thread;

    #[test]
    fn test_set_and_read() {
        let cell = PoseCell::new(Pose::new(1.0, 2.0, 0.5));
        let reader = cell.clone();

        assert_eq!(reader.current(), Pose::new(1.0, 2.0, 0.5));

        cell.set(Pose::new(3.0, 4.0, -0.5));
        assert_eq!(reader.current(), Pose::new(3.0, 4.0, -0.5));
    }

    #[test]
    fn test_no_torn_reads() {
        let cell = PoseCell::default();
        let writer = cell.clone();

        // Every written pose has all three fields equal, so a torn read would show up as a
        // pose with differing fields.
        let handle = thread::spawn(move || {
            for i in 0..10_000 {
                let v = i as f64;
                writer.set(Pose::new(v, v, v));
            }
        });

        for _ in 0..10_000 {
            let p = cell.current();
            assert_eq!(p.x_m, p.y_m);
            assert_eq!(p.y_m, p.theta_rad);
        }

        handle.join().unwrap();
    }
}
