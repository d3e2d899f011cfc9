//! L4 Atomic Layer: Easing curves
//!
//! Maps normalized motion progress onto the curve named by [`EasingType`].
//! Every curve starts at 0, ends at 1 and never moves backwards.

pub use crate::config::EasingType;

pub trait EasingTypeExt {
    /// Eased progress for `t`, clamped into [0, 1] first
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            // Jump to the end on the last frame
            EasingType::None => t.floor(),
            EasingType::Linear => t,
            EasingType::Cubic => 1.0 - (1.0 - t).powi(3),
            EasingType::Quintic => 1.0 - (1.0 - t).powi(5),
            EasingType::EaseOut if t >= 1.0 => 1.0,
            EasingType::EaseOut => 1.0 - 2.0_f64.powf(-10.0 * t),
            EasingType::EaseInOut if t < 0.5 => 4.0 * t.powi(3),
            EasingType::EaseInOut => 1.0 - (2.0 - 2.0 * t).powi(3) / 2.0,
        }
    }
}
