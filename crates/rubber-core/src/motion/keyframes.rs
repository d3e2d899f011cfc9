//! L4 Atomic Layer: Keyframe tracks
//!
//! A track holds values spread evenly over normalized time and interpolates
//! between them, with an optional easing curve applied inside every segment.
//! Tracks borrow their values, so fixed tracks live in constants.

use super::easing::{EasingType, EasingTypeExt};
use super::timing::lerp;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframes<'a> {
    values: &'a [f64],
    segment_easing: EasingType,
}

impl<'a> Keyframes<'a> {
    /// Values spread evenly over [0, 1]
    pub const fn evenly(values: &'a [f64]) -> Self {
        Self {
            values,
            segment_easing: EasingType::Linear,
        }
    }

    pub const fn with_segment_easing(self, easing: EasingType) -> Self {
        Self {
            values: self.values,
            segment_easing: easing,
        }
    }

    /// Value of the track at normalized progress `t`
    pub fn sample(&self, t: f64) -> f64 {
        let (Some(&first), Some(&last)) = (self.values.first(), self.values.last()) else {
            return 0.0;
        };
        let segments = self.values.len() - 1;
        if segments == 0 {
            return first;
        }

        let t = t.clamp(0.0, 1.0);
        if t >= 1.0 {
            return last;
        }

        let scaled = t * segments as f64;
        let segment = (scaled.floor() as usize).min(segments - 1);
        let local = self.segment_easing.apply(scaled - segment as f64);
        lerp(self.values[segment], self.values[segment + 1], local)
    }
}
