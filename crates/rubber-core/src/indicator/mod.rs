//! Index-transition engine of the rubber page indicator
//!
//! - `geometry` - Strip layout and pointer hit testing
//! - `planner` - Index change to ordered marker hops
//! - `marker` - Small marker hop arc, squash and settle shake
//! - `main_marker` - Active page marker relocation and scale pulse
//! - `notify` - Index-changed fan-out (callback + subscribers)
//! - `controller` - Owns the current index and drives all of the above
//!
//! # Usage
//!
//! ```ignore
//! use rubber_core::indicator::{RubberIndicator, Size};
//! use rubber_core::StyleConfig;
//!
//! let mut indicator = RubberIndicator::new(5, StyleConfig::default(), Size::new(300.0, 100.0))?;
//! indicator.on_change(|index| println!("page {}", index));
//!
//! indicator.request_index(3);
//!
//! // In the frame loop, move the timeline and draw the snapshot
//! indicator.advance(elapsed);
//! let frame = indicator.frame();
//! ```

pub mod controller;
pub mod geometry;
pub mod main_marker;
pub mod marker;
pub mod notify;
pub mod planner;

pub use controller::{IndicatorFrame, RubberIndicator};
pub use geometry::{Point, Rect, Size, StripGeometry};
pub use main_marker::MainMarker;
pub use marker::{Marker, MarkerLayer, MarkerPose};
pub use notify::{IndexChanged, Notifier};
pub use planner::{plan, Direction, MotionStep};
