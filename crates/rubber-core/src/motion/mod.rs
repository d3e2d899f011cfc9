//! Motion primitives for the indicator animations
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `easing` - Pure easing functions (cubic, quintic, exponential, ease-in-out)
//! - `timing` - Explicit timing parameters and progress calculation
//! - `keyframes` - Evenly spaced keyframe tracks with per-segment easing
//!
//! Nothing here reads a global clock: every function takes the timeline
//! position it should be evaluated at.

pub mod easing;
pub mod keyframes;
pub mod timing;

pub use easing::EasingTypeExt;
pub use keyframes::Keyframes;
pub use timing::{lerp, progress, Timing};
