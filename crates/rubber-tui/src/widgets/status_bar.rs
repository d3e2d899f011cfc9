use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let mode_str = if app.indicator.is_animating() {
            "MOVING"
        } else {
            "IDLE"
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            let last = app
                .last_change
                .map(|c| format!("{} -> {}", c.previous, c.index))
                .unwrap_or_else(|| "-".to_string());
            format!(
                " {} | Pages: {} | Index: {} | Last change: {}",
                mode_str,
                app.indicator.page_count(),
                app.indicator.current_index(),
                last
            )
        };

        let help_hint = " q:quit h/l:page 0-9:jump +/-:pages click:select ";
        let padding_len = area
            .width
            .saturating_sub(status_text.len() as u16 + help_hint.len() as u16)
            as usize;

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey1).bg(theme.bg2)),
        ]);

        let paragraph = Paragraph::new(line);
        frame.render_widget(paragraph, area);
    }
}
