//! Inspector event messages.
//!
//! The runner multiplexes:
//! - crossterm keyboard events
//! - tick interval (4Hz, expire status notices)
//! - render interval (30fps, draw frame)
//!
//! and feeds them to `InspectorApp::update` as `InspectorMessage`s.

use crossterm::event::KeyEvent;

/// Messages that drive the update loop.
#[derive(Debug, Clone)]
pub enum InspectorMessage {
    /// Keyboard input.
    Input(KeyEvent),
    /// Tick: housekeeping between frames.
    Tick,
    /// Render: draw a frame.
    Render,
    /// Quit the inspector.
    Quit,
}
