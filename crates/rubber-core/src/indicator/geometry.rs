//! Strip layout: where every slot, marker and the main marker sit.

use serde::Serialize;

use crate::config::StyleConfig;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Strict containment; points on the edge are outside
    pub fn contains(&self, point: Point) -> bool {
        point.x > self.x && point.x < self.max_x() && point.y > self.y && point.y < self.max_y()
    }
}

/// Layout of one indicator, fixed until the next reconstruction
#[derive(Debug, Clone, PartialEq)]
pub struct StripGeometry {
    strip: Rect,
    page_count: usize,
    small_size: f64,
    main_size: f64,
    h_space: f64,
    v_space: f64,
}

impl StripGeometry {
    /// Center a strip for `page_count` slots inside `bounds`
    pub fn new(bounds: Size, page_count: usize, style: &StyleConfig) -> Self {
        let small = style.small_marker_size;
        let h_space = style.horizontal_spacing;
        let v_space = style.vertical_spacing;

        let height = small + 2.0 * v_space;
        let width = page_count as f64 * small + (page_count + 1) as f64 * h_space;
        let x = (bounds.width - width) / 2.0;
        let y = (bounds.height - height) / 2.0;

        Self {
            strip: Rect::new(x, y, width, height),
            page_count,
            small_size: small,
            main_size: style.main_marker_size,
            h_space,
            v_space,
        }
    }

    pub fn strip(&self) -> Rect {
        self.strip
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// One slot width, also the distance a marker covers per hop
    #[inline]
    pub fn move_radius(&self) -> f64 {
        self.small_size + self.h_space
    }

    pub fn small_diameter(&self) -> f64 {
        self.small_size
    }

    /// Diameter of the disc drawn behind the main marker
    pub fn backdrop_diameter(&self) -> f64 {
        self.main_size
    }

    /// The main marker is the backdrop inset by the vertical spacing
    pub fn main_diameter(&self) -> f64 {
        (self.main_size - 2.0 * self.v_space).max(0.0)
    }

    /// Resting center of a small marker sitting in visual slot `slot`
    pub fn marker_center(&self, slot: usize) -> Point {
        Point::new(
            self.strip.x + self.h_space + slot as f64 * self.move_radius() + self.small_size / 2.0,
            self.strip.y + self.v_space + self.small_size / 2.0,
        )
    }

    /// Center of the main marker once it has settled on `index`
    pub fn main_center(&self, index: usize) -> Point {
        Point::new(
            self.strip.x + self.move_radius() * index as f64 + self.main_size / 2.0,
            self.strip.y + self.strip.height / 2.0,
        )
    }

    /// Candidate index for a pointer hit, `None` outside the strip.
    ///
    /// The result is not clamped; the slot layout starts with one spacing
    /// unit before the first marker, so hits near the right end can land
    /// one past the last page.
    pub fn hit_index(&self, point: Point) -> Option<i64> {
        if !self.strip.contains(point) {
            return None;
        }
        Some(((point.x - self.strip.x) / self.move_radius()).floor() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(pages: usize) -> StripGeometry {
        StripGeometry::new(Size::new(300.0, 100.0), pages, &StyleConfig::default())
    }

    #[test]
    fn test_strip_is_centered() {
        let g = geometry(5);
        // 5 * 16 + 6 * 12 = 152 wide, 16 + 2 * 8 = 32 high
        assert_eq!(g.strip(), Rect::new(74.0, 34.0, 152.0, 32.0));
    }

    #[test]
    fn test_marker_and_main_centers() {
        let g = geometry(5);
        assert_eq!(g.marker_center(1), Point::new(74.0 + 12.0 + 28.0 + 8.0, 50.0));
        assert_eq!(g.main_center(0), Point::new(94.0, 50.0));
        assert_eq!(g.main_center(3), Point::new(74.0 + 84.0 + 20.0, 50.0));
        assert_eq!(g.main_diameter(), 24.0);
    }

    #[test]
    fn test_hit_index() {
        let g = geometry(5);
        assert_eq!(g.hit_index(Point::new(75.0, 50.0)), Some(0));
        assert_eq!(g.hit_index(Point::new(74.0 + 28.0 * 3.0 + 1.0, 50.0)), Some(3));
        assert_eq!(g.hit_index(Point::new(225.0, 50.0)), Some(5));
        assert_eq!(g.hit_index(Point::new(74.0, 50.0)), None);
        assert_eq!(g.hit_index(Point::new(100.0, 10.0)), None);
    }
}
