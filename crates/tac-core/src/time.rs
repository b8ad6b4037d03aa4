//! Animation time model.
//!
//! # Design
//!
//! The motion machine is tick-driven: the host calls `advance(now)` once per
//! frame/tick with a monotonically increasing timestamp.  Pauses inside a
//! motion phase (the pre-leap crouch, the landing beat) are stored as
//! absolute `SimTime` deadlines inside the phase's data and compared against
//! the timestamp of the current tick.  Nothing blocks, nothing depends on
//! the tick rate, and tests can synthesize any clock they like.
//!
//! `f64` seconds rather than an integer tick count: the delays involved are
//! sub-second (0.25 s crouch) and interpolation wants fractional elapsed
//! time anyway.

use std::fmt;

/// A point on the host's monotonically increasing clock, in seconds.
///
/// The zero point is arbitrary; only differences matter.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// The time `secs` seconds after `self`.
    #[inline]
    pub fn after(self, secs: f64) -> SimTime {
        SimTime(self.0 + secs)
    }

    /// Seconds elapsed from `earlier` to `self`, clamped at zero so a
    /// non-monotonic host clock degrades to "no time passed" rather than
    /// moving units backwards.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}
