//! L4 Atomic Layer: Explicit timing parameters
//!
//! Every motion receives a [`Timing`] instead of reading an ambient
//! animation context. Times are positions on the indicator's own timeline
//! (a `Duration` since the indicator was created).

use std::time::Duration;

/// When and how long a motion runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Length of the motion
    pub duration: Duration,
    /// Offset from the moment the motion is issued to its first frame
    pub delay: Duration,
    /// Apply the end state immediately, with no visible motion
    pub instant: bool,
}

impl Timing {
    /// An animated motion lasting `duration`
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            delay: Duration::ZERO,
            instant: false,
        }
    }

    /// A change applied in the same frame, no implicit animation
    pub fn instant() -> Self {
        Self {
            duration: Duration::ZERO,
            delay: Duration::ZERO,
            instant: true,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Timeline position of the first frame for a motion issued at `issued_at`
    #[inline]
    pub fn start(&self, issued_at: Duration) -> Duration {
        issued_at + self.delay
    }

    /// Timeline position of the last frame for a motion issued at `issued_at`
    #[inline]
    pub fn end(&self, issued_at: Duration) -> Duration {
        if self.instant {
            issued_at + self.delay
        } else {
            issued_at + self.delay + self.duration
        }
    }
}

/// Calculate motion progress (0.0 to 1.0) at `now` for a motion starting at `start`
///
/// # Returns
/// Progress value clamped to [0.0, 1.0]
#[inline]
pub fn progress(start: Duration, now: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return if now >= start { 1.0 } else { 0.0 };
    }
    let elapsed = now.saturating_sub(start);
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
