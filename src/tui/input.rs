//! Key binding dispatch for the inspector.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::InspectorApp;
use super::view::selection::Control;

/// Handle a key event, mutating app state.
pub fn handle_key(app: &mut InspectorApp, key: KeyEvent) {
    // Global bindings
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
            return;
        }
        _ => {}
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('J') | KeyCode::PageDown => app.next_device(),
        KeyCode::Char('K') | KeyCode::PageUp => app.prev_device(),
        // Display selector
        KeyCode::Char('d') => app.activate_control(Control::Default),
        KeyCode::Char('r') => app.activate_control(Control::Raw),
        KeyCode::Char('p') => app.activate_control(Control::Plot),
        _ => {}
    }
}
