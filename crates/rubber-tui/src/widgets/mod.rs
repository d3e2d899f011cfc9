mod indicator;
mod shapes;
mod status_bar;

pub use indicator::IndicatorWidget;
pub use shapes::{Disc, Raster, Stadium};
pub use status_bar::StatusBarWidget;
