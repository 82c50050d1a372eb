use std::io;
use std::path::Path;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use pagestack_core::PagestackConfig;
use pagestack_tui::{
    app::{App, Mode},
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    keymap::Keymap,
    load_theme,
    widgets::{MenuBarWidget, NavBarWidget, PageViewWidget, PopupWidget, StatusBarWidget},
    Deck, TerminalSurface,
};

pub async fn run(config: PagestackConfig, deck_path: &Path, at: Option<String>) -> Result<()> {
    let deck = Deck::load(deck_path)?;
    let title = deck.title.clone().unwrap_or_else(|| "Pagestack".to_string());

    let keymap = Keymap::from_config(&config.keymap);
    let theme = load_theme(&config.ui.theme);

    let mut surface = TerminalSurface::new(deck, config.ui.scroll.clone());
    if config.navigation.enabled && config.navigation.dynamic {
        surface = surface.with_dynamic_navigation();
    }
    if let Some(fragment) = at {
        surface = surface.with_fragment(fragment);
    }

    let event_handler =
        EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.ui.scroll.animation_fps);

    // Initialize before touching the terminal so errors print normally
    let mut app = App::new(config, surface, theme)?;
    info!(deck = %deck_path.display(), pages = app.stack.pages().len(), "Deck loaded");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle(&title))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app, &keymap, &event_handler);

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

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    keymap: &Keymap,
    event_handler: &EventHandler,
) -> Result<()> {
    // Checked at the end of each iteration to pick the next poll rate
    let mut needs_fast_update = false;

    loop {
        app.tick();

        terminal.draw(|frame| {
            let layout = app.update_layout(frame.area());

            if let Some(menu) = layout.menu {
                MenuBarWidget::render(frame, menu, app);
            }
            PageViewWidget::render(frame, layout.pages, app);
            if let Some(nav) = layout.nav {
                NavBarWidget::render(frame, nav, app);
            }
            StatusBarWidget::render(frame, layout.status, app);

            match &app.mode {
                Mode::Help => PopupWidget::render_help(frame, &app.stack.config().keymap, &app.theme),
                Mode::Address(text) => PopupWidget::render_address(frame, text, &app.theme),
                Mode::Normal => {}
            }
        })?;

        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, &app.mode, keymap);
                    app.handle_action(action);
                }
                AppEvent::Mouse(mouse) => app.handle_mouse(mouse),
                // The next draw recomputes the layout
                AppEvent::Resize(_, _) => {}
                AppEvent::Tick => {}
            }
        }

        needs_fast_update = app.needs_fast_update();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
