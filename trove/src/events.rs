//! Event handling for the treasure-hunt TUI.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, Screen};

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
}

/// Handle a terminal event.
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> EventResult {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            app.scroll_up(3);
            EventResult::NeedsRedraw
        }
        MouseEventKind::ScrollDown => {
            app.scroll_down(3);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    // Global shortcut, works on every screen
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    match app.screen {
        Screen::Login => handle_login_key(app, key),
        Screen::Game => handle_game_key(app, key),
    }
}

/// Name entry: free text plus Enter to submit.
fn handle_login_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => EventResult::Quit,
        KeyCode::Enter => {
            app.submit_name();
            EventResult::NeedsRedraw
        }
        KeyCode::Left => {
            app.cursor_left();
            EventResult::NeedsRedraw
        }
        KeyCode::Right => {
            app.cursor_right();
            EventResult::NeedsRedraw
        }
        KeyCode::Home => {
            app.cursor_home();
            EventResult::NeedsRedraw
        }
        KeyCode::End => {
            app.cursor_end();
            EventResult::NeedsRedraw
        }
        KeyCode::Backspace => {
            app.backspace();
            EventResult::NeedsRedraw
        }
        KeyCode::Char(c) => {
            app.type_char(c);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// The hunt: hotkeys and log navigation.
fn handle_game_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('q') => EventResult::Quit,

        // Triggers
        KeyCode::Char('s') | KeyCode::Enter => {
            app.start_run();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('c') => {
            app.clear_progress();
            EventResult::NeedsRedraw
        }

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => {
            app.scroll_down(1);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.scroll_up(1);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('G') => {
            app.scroll_to_bottom();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('g') => {
            app.log_scroll = 0;
            app.scroll_locked_to_bottom = false;
            EventResult::NeedsRedraw
        }
        KeyCode::PageUp => {
            app.scroll_up(10);
            EventResult::NeedsRedraw
        }
        KeyCode::PageDown => {
            app.scroll_down(10);
            EventResult::NeedsRedraw
        }

        _ => EventResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AmbientAudio;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use tokio::sync::mpsc;

    fn test_app() -> (App, mpsc::Receiver<crate::worker::WorkerRequest>) {
        let (request_tx, request_rx) = mpsc::channel(8);
        let (_response_tx, response_rx) = mpsc::channel(8);
        let app = App::new(
            request_tx,
            response_rx,
            Ok(Vec::new()),
            AmbientAudio::disabled(),
        );
        (app, request_rx)
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_typing_on_login_screen() {
        let (mut app, _request_rx) = test_app();
        handle_event(&mut app, press(KeyCode::Char('M')));
        handle_event(&mut app, press(KeyCode::Char('a')));
        handle_event(&mut app, press(KeyCode::Backspace));
        assert_eq!(app.input_buffer(), "M");
    }

    #[test]
    fn test_quit_from_game_screen() {
        let (mut app, _request_rx) = test_app();
        app.screen = Screen::Game;
        assert_eq!(
            handle_event(&mut app, press(KeyCode::Char('q'))),
            EventResult::Quit
        );
    }

    #[test]
    fn test_start_hotkey_marks_run_in_progress() {
        let (mut app, _request_rx) = test_app();
        app.screen = Screen::Game;
        handle_event(&mut app, press(KeyCode::Char('s')));
        assert!(app.run_in_progress);
    }
}
