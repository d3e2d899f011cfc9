use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    symbols,
    text::Line,
    widgets::{
        canvas::{Canvas, Context},
        Block, Borders, Paragraph,
    },
    Frame,
};
use rubber_core::indicator::{IndicatorFrame, MarkerPose, Size};

use super::shapes::{Disc, Raster, Stadium};
use crate::app::App;
use crate::theme::Theme;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f64 = 2.0;

pub struct IndicatorWidget;

impl IndicatorWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let block = Block::default()
            .title(" Pages ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.accent))
            .style(Style::default().bg(app.theme.bg0));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.height < 2 || inner.width == 0 {
            app.indicator_area = Rect::default();
            return;
        }

        // Last row is the page caption
        let canvas_area = Rect {
            height: inner.height - 1,
            ..inner
        };
        let bounds = app.indicator.bounds();
        let canvas_area = fit_aspect(canvas_area, bounds);
        app.indicator_area = canvas_area;

        let snapshot = app.indicator.frame();
        let raster = Raster::for_area(
            bounds.width,
            bounds.height,
            canvas_area.width,
            canvas_area.height,
        );
        let theme = app.theme.clone();

        let canvas = Canvas::default()
            .marker(symbols::Marker::Braille)
            .background_color(theme.bg0)
            .x_bounds([0.0, bounds.width])
            .y_bounds([0.0, bounds.height])
            .paint(move |ctx| paint(ctx, &snapshot, bounds, raster, &theme));
        frame.render_widget(canvas, canvas_area);

        let caption = Paragraph::new(Line::from(format!(
            "Page {} / {}",
            app.indicator.current_index() + 1,
            app.indicator.page_count()
        )))
        .style(Style::default().fg(app.theme.fg0))
        .alignment(Alignment::Center);
        let caption_area = Rect {
            y: inner.y + inner.height - 1,
            height: 1,
            ..inner
        };
        frame.render_widget(caption, caption_area);
    }
}

fn paint(ctx: &mut Context, snapshot: &IndicatorFrame, bounds: Size, raster: Raster, theme: &Theme) {
    // Canvas y grows upwards, indicator y grows downwards
    let flip = |y: f64| bounds.height - y;

    let strip = snapshot.strip;
    ctx.draw(&Stadium {
        x: strip.x,
        y: flip(strip.max_y()),
        width: strip.width,
        height: strip.height,
        color: theme.background,
        raster,
    });
    ctx.draw(&disc(&snapshot.backdrop, theme.background, raster, flip));
    ctx.layer();

    for pose in &snapshot.markers {
        ctx.draw(&disc(pose, theme.small_marker, raster, flip));
    }
    ctx.layer();

    ctx.draw(&disc(&snapshot.main, theme.main_marker, raster, flip));
}

fn disc(pose: &MarkerPose, color: ratatui::style::Color, raster: Raster, flip: impl Fn(f64) -> f64) -> Disc {
    Disc {
        x: pose.center.x,
        y: flip(pose.center.y),
        radius_x: pose.diameter / 2.0 * pose.scale_x,
        radius_y: pose.diameter / 2.0 * pose.scale_y,
        color,
        raster,
    }
}

/// Largest centered sub-area whose cell grid keeps the bounds' aspect ratio
fn fit_aspect(area: Rect, bounds: Size) -> Rect {
    if bounds.width <= 0.0 || bounds.height <= 0.0 || area.width == 0 || area.height == 0 {
        return area;
    }

    let wanted = bounds.width / bounds.height * CELL_ASPECT;
    let current = area.width as f64 / area.height as f64;

    if current > wanted {
        let width = ((area.height as f64 * wanted).round() as u16).clamp(1, area.width);
        Rect {
            x: area.x + (area.width - width) / 2,
            width,
            ..area
        }
    } else {
        let height = ((area.width as f64 / wanted).round() as u16).clamp(1, area.height);
        Rect {
            y: area.y + (area.height - height) / 2,
            height,
            ..area
        }
    }
}
