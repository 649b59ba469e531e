// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, gateway results)
// - Rendering the UI

pub mod app;
pub mod clipboard;
pub mod components;
pub mod input;
pub mod layout;
pub mod modal;
pub mod scroll;
pub mod traits;
pub mod views;

use crate::config::Config;
use crate::controller::{SessionEvent, UPDATE_CHANNEL_SIZE};
use crate::gateway::GatewayClient;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::{App, Focus, Screen};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::{Stream, StreamExt};
use modal::ModalAction;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use traits::Handled;

/// Run the TUI until the operator quits
///
/// Sets up the terminal, runs the event loop, and restores the terminal even
/// when the loop fails.
pub async fn run_tui(
    config: Config,
    client: GatewayClient,
    log_buffer: LogBuffer,
    start_screen: Screen,
) -> Result<()> {
    let (updates_tx, mut updates_rx) = mpsc::channel(UPDATE_CHANNEL_SIZE);

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(&config, client, updates_tx, log_buffer, start_screen);
    let mut input = EventStream::new();

    let result = run_event_loop(&mut terminal, &mut app, &mut updates_rx, &mut input).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on whichever comes first:
/// 1. Keyboard or mouse input
/// 2. A timer tick (spinner animation, toast expiry)
/// 3. A finished gateway call
///
/// Every branch is awaited, so spawned gateway calls run between events even
/// on a single-threaded runtime. The loop ends on quit or when input closes.
async fn run_event_loop<B, S>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    updates_rx: &mut mpsc::Receiver<SessionEvent>,
    input: &mut S,
) -> Result<()>
where
    B: Backend,
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            event = input.next() => match event {
                Some(Ok(Event::Key(key_event))) => handle_key_event(app, key_event),
                Some(Ok(Event::Mouse(mouse_event))) => handle_mouse_event(app, mouse_event),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e).context("Failed to read terminal input"),
                None => break,
            },

            _ = tick_interval.tick() => {
                app.tick_animation();
            }

            Some(update) = updates_rx.recv() => {
                app.apply_event(update);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Modal → Text entry → Global → Focused panel → Screen
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    // Layer 1: Modal captures all input when active
    if handle_modal_input(app, &key_event) {
        return;
    }

    match key_event.kind {
        KeyEventKind::Press => {}
        KeyEventKind::Release => {
            app.handle_key_release(key_event.code);
            return;
        }
        _ => return,
    }

    // Layer 2: Date typing bypasses debounce so "2024-01-11" types as written
    if app.focused == Focus::Form {
        if let KeyCode::Char(c @ ('0'..='9' | '-')) = key_event.code {
            app.edit_selected_date(Some(c));
            return;
        }
    }

    if !app.handle_key_press(key_event.code) {
        return;
    }

    // Layer 3: Global keys
    if handle_global_keys(app, &key_event) {
        return;
    }

    // Layer 4: Focused panel navigation
    if app.dispatch_to_focused(key_event) == Handled::Yes {
        return;
    }

    // Layer 5: Screen actions
    handle_screen_keys(app, &key_event);
}

/// Handle modal input - returns true if modal absorbed the input
fn handle_modal_input(app: &mut App, key_event: &KeyEvent) -> bool {
    let Some(ref mut modal) = app.modal else {
        return false;
    };

    // Releases still end holds, or the key stays "held" after the modal closes
    if key_event.kind == KeyEventKind::Release {
        app.handle_key_release(key_event.code);
        return true;
    }

    if key_event.kind != KeyEventKind::Press {
        return true;
    }

    match modal.handle_input(key_event.code) {
        ModalAction::None => {}
        ModalAction::Close => app.modal = None,
    }

    true
}

/// Handle global keys - returns true if handled
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Char('?') => app.modal = Some(modal::Modal::help()),
        KeyCode::Char('p') => {
            if app.screen != Screen::Profiles {
                app.start_session(Screen::Profiles);
            }
        }
        KeyCode::Char('r') => app.start_session(app.screen),
        KeyCode::Char('y') => app.copy_selection(),
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_prev(),
        _ => return false,
    }
    true
}

/// Keys whose meaning depends on the screen and focused panel
fn handle_screen_keys(app: &mut App, key_event: &KeyEvent) {
    match (app.screen, app.focused, key_event.code) {
        (Screen::Reports, Focus::Form, KeyCode::Left) => app.cycle_selected_choice(false),
        (Screen::Reports, Focus::Form, KeyCode::Right) => app.cycle_selected_choice(true),
        (Screen::Reports, Focus::Form, KeyCode::Backspace) => app.edit_selected_date(None),
        (Screen::Reports, Focus::Form, KeyCode::Enter) => app.submit_request(),
        (Screen::Reports, Focus::Table, KeyCode::Enter) => app.activate_selected_row(),
        (Screen::Profiles, Focus::Profiles, KeyCode::Enter) => app.select_highlighted_profile(),
        (Screen::Profiles, _, KeyCode::Esc) => app.start_session(Screen::Reports),
        _ => {}
    }
}

/// Mouse wheel scrolls the focused panel
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    let code = match mouse_event.kind {
        MouseEventKind::ScrollUp => KeyCode::Up,
        MouseEventKind::ScrollDown => KeyCode::Down,
        _ => return,
    };
    if app.modal.is_none() {
        app.dispatch_to_focused(KeyEvent::new(code, KeyModifiers::NONE));
    }
}
