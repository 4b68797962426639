// TUI module - the terminal presenter
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard/mouse input, animation ticks, background results)
// - Layered key dispatch

pub mod app;
pub mod components;
pub mod input;
pub mod layout;
pub mod markdown;
pub mod modal;
pub mod theme;
pub mod traits;
pub mod views;

use crate::config::Config;
use crate::contact::form::Focus;
use crate::contact::transport::ContactTransport;
use crate::deck::navigation::Step;
use crate::deck::Deck;
use crate::events::AppEvent;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::{Modal, ModalAction};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use traits::Handled;

/// Redraw interval while a transition runs (~60 fps)
const ANIMATION_FRAME: Duration = Duration::from_millis(16);
/// Redraw interval when idle (toast expiry, log overlay refresh)
const IDLE_FRAME: Duration = Duration::from_millis(250);

/// Run the presenter until the user quits
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// even when the loop fails.
pub async fn run_tui(
    deck: Deck,
    config: Config,
    transport: ContactTransport,
    log_buffer: LogBuffer,
) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        let _ = restore_terminal(&mut stdout);
        return Err(e).context("Failed to setup terminal");
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(terminal) => terminal,
        Err(e) => {
            let _ = restore_terminal(&mut io::stdout());
            return Err(e).context("Failed to create terminal");
        }
    };

    let (events_tx, mut events_rx) = mpsc::channel::<AppEvent>(16);
    let mut app = App::new(deck, &config, transport, log_buffer, events_tx);

    let result = match spawn_input_reader() {
        Ok(mut input_rx) => {
            run_event_loop(&mut terminal, &mut app, &mut input_rx, &mut events_rx).await
        }
        Err(e) => Err(e),
    };

    let restored = restore_terminal(terminal.backend_mut());
    // A loop error matters more than a restore error
    result.and(restored)
}

/// Undo raw mode, the alternate screen and mouse capture
///
/// Every step runs even when an earlier one fails; the first error is
/// returned.
fn restore_terminal<W: io::Write>(out: &mut W) -> Result<()> {
    let steps = [
        execute!(out, LeaveAlternateScreen).context("Failed to leave alternate screen"),
        execute!(out, DisableMouseCapture).context("Failed to disable mouse capture"),
        execute!(out, cursor::Show).context("Failed to show cursor"),
        disable_raw_mode().context("Failed to disable raw mode"),
    ];
    steps.into_iter().collect::<Result<Vec<()>>>().map(|_| ())
}

/// Read terminal events on a dedicated thread
///
/// `event::read()` blocks, so it lives outside the runtime; the loop
/// awaits the channel instead of polling. The thread ends on the first
/// send after the loop drops the receiver.
fn spawn_input_reader() -> Result<mpsc::Receiver<Event>> {
    let (tx, rx) = mpsc::channel(64);
    std::thread::Builder::new()
        .name("terminal-input".to_string())
        .spawn(move || loop {
            match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(ev).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Terminal input failed: {}", e);
                    break;
                }
            }
        })
        .context("Failed to start input thread")?;
    Ok(rx)
}

/// Main event loop
///
/// Waits on whichever comes first:
/// 1. Terminal input (keys, mouse, resize)
/// 2. The frame timer (fast while animating, slow when idle)
/// 3. Results from background tasks
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    input_rx: &mut mpsc::Receiver<Event>,
    events_rx: &mut mpsc::Receiver<AppEvent>,
) -> Result<()> {
    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        let frame = if app.is_animating() {
            ANIMATION_FRAME
        } else {
            IDLE_FRAME
        };

        tokio::select! {
            input = input_rx.recv() => match input {
                Some(Event::Key(key_event)) => handle_key_event(app, key_event),
                Some(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                Some(_) => {} // Resize: the redraw above picks up the new size
                None => anyhow::bail!("Terminal input closed"),
            },

            _ = tokio::time::sleep(frame) => {
                app.tick();
            }

            Some(app_event) = events_rx.recv() => {
                app.apply_event(app_event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Modal → Global → Contact form → App fallback
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    // Ctrl+C always quits, even with a modal open
    if key_event.kind == KeyEventKind::Press
        && key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        app.should_quit = true;
        return;
    }

    // Layer 1: Modal captures all input when active
    if handle_modal_input(app, &key_event) {
        return;
    }

    // Layer 2: Global keys (work regardless of form focus)
    if handle_global_keys(app, &key_event) {
        return;
    }

    let key = key_event.code;

    match key_event.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => {
            // Text entry bypasses debounce: "ll" must type two letters
            let typing = matches!(key, KeyCode::Char(_) | KeyCode::Backspace)
                && app.form.focus().is_some();
            if !typing && !app.handle_key_press(key, key_event.kind) {
                return;
            }

            // Layer 3: contact form (only live on the contact slide)
            if app.dispatch_to_form(key_event) == Handled::Yes {
                return;
            }

            // Layer 4: App fallback
            match key {
                KeyCode::Enter
                    if app.on_contact_slide() && app.form.focus() == Some(Focus::Submit) =>
                {
                    app.submit_form();
                }
                KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
                KeyCode::Char('t') => app.toggle_theme(),
                _ => {}
            }
        }
        KeyEventKind::Release => {
            app.handle_key_release(key);
        }
    }
}

/// Handle mouse input
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) if app.modal.is_none() => {
            app.click(mouse_event.column, mouse_event.row);
        }
        MouseEventKind::ScrollUp => scroll_modal(app, ModalAction::ScrollUp(3)),
        MouseEventKind::ScrollDown => scroll_modal(app, ModalAction::ScrollDown(3)),
        _ => {}
    }
}

fn scroll_modal(app: &mut App, action: ModalAction) {
    let total = app.log_buffer.len();
    if let Some(modal) = app.modal.as_mut() {
        modal.scroll(action, total);
    }
}

/// Handle modal input - returns true if modal absorbed the input
fn handle_modal_input(app: &mut App, key_event: &KeyEvent) -> bool {
    let Some(modal) = &app.modal else {
        return false;
    };

    // Keep InputHandler in sync, or keys stay "pressed" after the modal closes
    if key_event.kind == KeyEventKind::Release {
        app.handle_key_release(key_event.code);
        return true;
    }

    let action = modal.handle_input(key_event.code);
    if !app.handle_key_press(key_event.code, key_event.kind) {
        return true;
    }

    match action {
        ModalAction::None => {}
        ModalAction::Close => app.modal = None,
        scroll => scroll_modal(app, scroll),
    }

    true
}

/// Handle global keys - returns true if handled
/// Arrows always navigate, also while a form field has focus
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    if key_event.kind == KeyEventKind::Release {
        return false;
    }

    let key = key_event.code;
    match key {
        KeyCode::Left | KeyCode::Right => {
            if app.handle_key_press(key, key_event.kind) {
                let step = if key == KeyCode::Left {
                    Step::Back
                } else {
                    Step::Forward
                };
                app.navigate(step);
            }
            true
        }
        KeyCode::F(1) => {
            if app.handle_key_press(key, key_event.kind) {
                app.open_modal(Modal::help());
            }
            true
        }
        KeyCode::F(2) => {
            if app.handle_key_press(key, key_event.kind) {
                app.open_modal(Modal::logs());
            }
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::transport::MockTransport;
    use crate::contact::Field;

    fn app() -> App {
        let (tx, _rx) = mpsc::channel(1);
        App::new(
            Deck::bundled().unwrap(),
            &Config::default(),
            ContactTransport::Mock(MockTransport::succeeding()),
            LogBuffer::new(),
            tx,
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
        release(app, code);
    }

    fn release(app: &mut App, code: KeyCode) {
        let mut ev = KeyEvent::new(code, KeyModifiers::NONE);
        ev.kind = KeyEventKind::Release;
        handle_key_event(app, ev);
    }

    #[test]
    fn arrows_navigate_even_while_typing() {
        let mut app = app();
        while app.navigate(Step::Forward).moved() {}
        let last = app.navigator.current();

        app.form.set_focus(Some(Focus::Field(Field::Name)));
        press(&mut app, KeyCode::Left);
        assert_eq!(app.navigator.current(), last - 1);
        assert_eq!(app.form.focus(), None);
    }

    #[test]
    fn q_types_inside_the_form_and_quits_outside() {
        let mut app = app();
        while app.navigate(Step::Forward).moved() {}

        app.form.set_focus(Some(Focus::Field(Field::Message)));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.form.value(Field::Message), "q");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.form.focus(), None);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn repeated_letters_are_not_debounced() {
        let mut app = app();
        while app.navigate(Step::Forward).moved() {}
        app.form.set_focus(Some(Focus::Field(Field::Name)));

        // No Release events between presses, as most terminals send
        for _ in 0..2 {
            handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE));
        }
        assert_eq!(app.form.value(Field::Name), "ll");
    }

    #[test]
    fn modal_captures_keys_until_closed() {
        let mut app = app();
        press(&mut app, KeyCode::F(1));
        assert_eq!(app.modal, Some(Modal::Help));

        press(&mut app, KeyCode::Right);
        assert_eq!(app.navigator.current(), 0);

        press(&mut app, KeyCode::Esc);
        assert!(app.modal.is_none());
        press(&mut app, KeyCode::Right);
        assert_eq!(app.navigator.current(), 1);
    }

    #[test]
    fn quick_arrow_presses_each_advance() {
        let mut app = app();

        // Plain terminals report taps as Press only, never Release
        for _ in 0..3 {
            handle_key_event(&mut app, KeyEvent::new(KeyCode::Right, KeyModifiers::NONE));
        }
        assert_eq!(app.navigator.current(), 3);

        handle_key_event(&mut app, KeyEvent::new(KeyCode::Left, KeyModifiers::NONE));
        assert_eq!(app.navigator.current(), 2);
    }

    #[test]
    fn quick_tabs_each_move_focus() {
        let mut app = app();
        while app.navigate(Step::Forward).moved() {}

        for _ in 0..3 {
            handle_key_event(&mut app, KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        }
        assert_eq!(app.form.focus(), Some(Focus::Field(Field::Message)));
    }

    #[test]
    fn restore_leaves_alternate_screen_and_shows_cursor() {
        let mut out: Vec<u8> = Vec::new();
        let _ = restore_terminal(&mut out);

        let written = String::from_utf8_lossy(&out);
        assert!(written.contains("\x1b[?1049l"));
        assert!(written.contains("\x1b[?25h"));
    }

    #[test]
    fn ctrl_c_quits_from_anywhere() {
        let mut app = app();
        app.open_modal(Modal::logs());
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }
}
