//! Filled canvas shapes. Ratatui's built-in circle only draws an outline,
//! and squashed markers need ellipses.

use ratatui::style::Color;
use ratatui::widgets::canvas::{Painter, Shape};

/// Sampling step in canvas units, one braille dot per step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Raster {
    pub step_x: f64,
    pub step_y: f64,
}

impl Raster {
    /// Dot spacing for `bounds` drawn over `cols`×`rows` braille cells
    pub fn for_area(bounds_width: f64, bounds_height: f64, cols: u16, rows: u16) -> Self {
        Self {
            step_x: bounds_width / (cols.max(1) as f64 * 2.0),
            step_y: bounds_height / (rows.max(1) as f64 * 4.0),
        }
    }

    /// Call `paint` for every sample point of the box around a center
    fn scan(&self, cx: f64, cy: f64, rx: f64, ry: f64, mut paint: impl FnMut(f64, f64)) {
        if self.step_x <= 0.0 || self.step_y <= 0.0 {
            return;
        }
        let mut y = cy - ry;
        while y <= cy + ry {
            let mut x = cx - rx;
            while x <= cx + rx {
                paint(x, y);
                x += self.step_x;
            }
            y += self.step_y;
        }
    }
}

/// Filled ellipse
#[derive(Debug, Clone, Copy)]
pub struct Disc {
    pub x: f64,
    pub y: f64,
    pub radius_x: f64,
    pub radius_y: f64,
    pub color: Color,
    pub raster: Raster,
}

impl Disc {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if self.radius_x <= 0.0 || self.radius_y <= 0.0 {
            return false;
        }
        let dx = (x - self.x) / self.radius_x;
        let dy = (y - self.y) / self.radius_y;
        dx * dx + dy * dy <= 1.0
    }
}

impl Shape for Disc {
    fn draw(&self, painter: &mut Painter) {
        self.raster
            .scan(self.x, self.y, self.radius_x, self.radius_y, |x, y| {
                if self.contains(x, y) {
                    if let Some((px, py)) = painter.get_point(x, y) {
                        painter.paint(px, py, self.color);
                    }
                }
            });
    }
}

/// Filled rectangle with fully rounded ends, used for the strip
#[derive(Debug, Clone, Copy)]
pub struct Stadium {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Color,
    pub raster: Raster,
}

impl Stadium {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let radius = (self.height / 2.0).min(self.width / 2.0);
        let cy = self.y + self.height / 2.0;
        let cx = x.clamp(self.x + radius, self.x + self.width - radius);
        let (dx, dy) = (x - cx, y - cy);
        dx * dx + dy * dy <= radius * radius
    }
}

impl Shape for Stadium {
    fn draw(&self, painter: &mut Painter) {
        let (rx, ry) = (self.width / 2.0, self.height / 2.0);
        self.raster
            .scan(self.x + rx, self.y + ry, rx, ry, |x, y| {
                if self.contains(x, y) {
                    if let Some((px, py)) = painter.get_point(x, y) {
                        painter.paint(px, py, self.color);
                    }
                }
            });
    }
}
