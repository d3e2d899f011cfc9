pub mod config;
pub mod error;
pub mod indicator;
pub mod motion;

pub use config::{AppConfig, EasingType, StyleConfig, UiConfig};
pub use error::{Error, Result};
pub use indicator::{
    Direction, IndexChanged, IndicatorFrame, Marker, MarkerLayer, MotionStep, RubberIndicator,
};
pub use motion::Timing;
