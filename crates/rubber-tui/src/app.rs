use std::time::Instant;

use anyhow::Result;
use ratatui::layout::Rect;
use rubber_core::indicator::{IndexChanged, Point, RubberIndicator, Size};
use rubber_core::{AppConfig, StyleConfig};
use tokio::sync::mpsc;
use tracing::debug;

use crate::input::Action;
use crate::theme::Theme;

/// Upper bound for `+` in the demo; the canvas is sized for this many pages
pub const MAX_PAGES: usize = 12;

pub struct App {
    pub config: AppConfig,
    pub indicator: RubberIndicator,
    pub theme: Theme,
    /// Most recent index-changed event
    pub last_change: Option<IndexChanged>,
    pub status_message: Option<String>,
    pub should_quit: bool,
    /// Canvas area of the last draw, used to map mouse clicks
    pub indicator_area: Rect,
    max_pages: usize,
    changes: mpsc::UnboundedReceiver<IndexChanged>,
    started: Instant,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let max_pages = config.ui.page_count.max(MAX_PAGES);
        let bounds = indicator_bounds(&config.style, max_pages);
        let mut indicator =
            RubberIndicator::new(config.ui.page_count, config.style.clone(), bounds)?
                .with_easing(config.ui.easing);
        let changes = indicator.subscribe();
        let theme = Theme::from_style(&config.style);

        Ok(Self {
            config,
            indicator,
            theme,
            last_change: None,
            status_message: None,
            should_quit: false,
            indicator_area: Rect::default(),
            max_pages,
            changes,
            started: Instant::now(),
        })
    }

    /// Move the indicator timeline to wall-clock time and collect events
    pub fn update(&mut self) {
        self.indicator.advance(self.started.elapsed());
        while let Ok(change) = self.changes.try_recv() {
            self.last_change = Some(change);
        }
    }

    /// Whether the next frame should come at animation frame rate
    pub fn needs_animation_update(&self) -> bool {
        self.indicator.is_animating()
    }

    /// Set a temporary status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn handle_action(&mut self, action: Action) {
        // Requests are stamped with the current wall-clock time
        self.indicator.advance(self.started.elapsed());
        let current = self.indicator.current_index() as i64;
        let last = self.indicator.page_count() as i64 - 1;

        match action {
            Action::Quit => self.should_quit = true,
            Action::PrevPage => self.request(current - 1),
            Action::NextPage => self.request(current + 1),
            Action::FirstPage => self.request(0),
            Action::LastPage => self.request(last),
            Action::JumpTo(index) => self.request(index),
            Action::AddPage => self.change_page_count(1),
            Action::RemovePage => self.change_page_count(-1),
            Action::Click { column, row } => {
                if let Some(point) = self.cell_to_point(column, row) {
                    self.status_message = None;
                    self.indicator.hit(point);
                }
            }
            Action::None => {}
        }

        self.update();
    }

    fn request(&mut self, index: i64) {
        self.status_message = None;
        self.indicator.request_index(index);
    }

    fn change_page_count(&mut self, delta: i64) {
        let pages = self.indicator.page_count() as i64 + delta;
        if pages < 1 || pages as usize > self.max_pages {
            self.set_status(format!("Page count must stay within 1..={}", self.max_pages));
            return;
        }

        match self.indicator.set_page_count(pages as usize) {
            Ok(()) => {
                debug!(pages, "page count changed");
                self.set_status(format!("{} pages", pages));
            }
            Err(e) => self.set_status(format!("Error: {}", e)),
        }
    }

    /// Map a terminal cell to indicator coordinates; `None` outside the canvas
    pub fn cell_to_point(&self, column: u16, row: u16) -> Option<Point> {
        let area = self.indicator_area;
        if area.width == 0
            || area.height == 0
            || column < area.x
            || row < area.y
            || column >= area.x + area.width
            || row >= area.y + area.height
        {
            return None;
        }

        let bounds = self.indicator.bounds();
        let x = ((column - area.x) as f64 + 0.5) / area.width as f64 * bounds.width;
        let y = ((row - area.y) as f64 + 0.5) / area.height as f64 * bounds.height;
        Some(Point::new(x, y))
    }
}

/// Indicator bounds large enough for `pages` pages plus the main marker
pub fn indicator_bounds(style: &StyleConfig, pages: usize) -> Size {
    let strip_width = pages as f64 * style.small_marker_size
        + (pages + 1) as f64 * style.horizontal_spacing;
    Size::new(
        strip_width + style.main_marker_size,
        style.main_marker_size * 2.0 + style.small_marker_size,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(AppConfig::default()).unwrap()
    }

    #[test]
    fn test_navigation_actions() {
        let mut app = app();
        app.handle_action(Action::NextPage);
        app.handle_action(Action::NextPage);
        assert_eq!(app.indicator.current_index(), 2);
        assert_eq!(app.last_change, Some(IndexChanged { previous: 1, index: 2 }));

        app.handle_action(Action::LastPage);
        assert_eq!(app.indicator.current_index(), 4);
        app.handle_action(Action::JumpTo(9));
        assert_eq!(app.indicator.current_index(), 4);
        app.handle_action(Action::FirstPage);
        app.handle_action(Action::PrevPage);
        assert_eq!(app.indicator.current_index(), 0);
    }

    #[test]
    fn test_page_count_limits() {
        let mut app = app();
        for _ in 0..20 {
            app.handle_action(Action::RemovePage);
        }
        assert_eq!(app.indicator.page_count(), 1);
        assert!(app.status_message.is_some());

        for _ in 0..20 {
            app.handle_action(Action::AddPage);
        }
        assert_eq!(app.indicator.page_count(), MAX_PAGES);
    }

    #[test]
    fn test_click_maps_to_slot() {
        let mut app = app();
        let bounds = app.indicator.bounds();
        app.indicator_area = Rect::new(0, 0, bounds.width as u16, bounds.height as u16);

        // One cell per unit: aim at the middle of slot 2
        let strip = app.indicator.geometry().strip();
        let column = (strip.x + 28.0 * 2.0 + 14.0) as u16;
        let row = (strip.y + strip.height / 2.0) as u16;
        app.handle_action(Action::Click { column, row });
        assert_eq!(app.indicator.current_index(), 2);

        // Outside the canvas nothing happens
        app.handle_action(Action::Click { column: 999, row: 0 });
        assert_eq!(app.indicator.current_index(), 2);
    }

    #[test]
    fn test_bounds_fit_max_pages() {
        let style = StyleConfig::default();
        let bounds = indicator_bounds(&style, MAX_PAGES);
        let mut indicator = RubberIndicator::new(MAX_PAGES, style, bounds).unwrap();
        assert!(indicator.geometry().strip().x >= 0.0);
        indicator.request_index(MAX_PAGES as i64);
        let frame = indicator.frame();
        assert!(frame.strip.max_x() <= bounds.width);
    }
}
