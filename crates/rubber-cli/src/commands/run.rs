use std::io;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tracing::info;

use rubber_core::AppConfig;
use rubber_tui::{
    event::{AppEvent, EventHandler},
    input::{handle_key_event, handle_mouse_event},
    widgets::{IndicatorWidget, StatusBarWidget},
    App,
};

pub fn run(mut config: AppConfig, pages: Option<usize>) -> Result<()> {
    if let Some(pages) = pages {
        config.ui.page_count = pages;
    }

    // Create app state before touching the terminal so bad input fails cleanly
    let mut app = App::new(config)?;
    app.indicator
        .on_change(|index| info!(index, "page changed"));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Rubber"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    // Create event handler with animation FPS support
    let event_handler =
        EventHandler::with_animation_fps(app.config.ui.tick_rate_ms, app.config.ui.animation_fps);

    loop {
        app.update();

        // Draw UI
        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(3), Constraint::Length(1)])
                .split(frame.area());

            IndicatorWidget::render(frame, layout[0], app);
            StatusBarWidget::render(frame, layout[1], app);
        })?;

        // Use the faster tick rate while anything is still moving
        let event = if app.needs_animation_update() {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };

        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => app.handle_action(handle_key_event(key)),
                AppEvent::Mouse(mouse) => app.handle_action(handle_mouse_event(mouse)),
                AppEvent::Resize(_, _) | AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
