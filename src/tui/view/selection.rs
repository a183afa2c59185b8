//! Display selector: three exclusive toggles bound to `payload_display`.
//!
//! Holds no state of its own: checked marks are derived from the message
//! and every activation turns into exactly one dispatch.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::error::InspectorResult;
use crate::model::{DisplayMethod, Message};
use crate::store::{self, Action, Store};

/// The three selector controls, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Default,
    Raw,
    Plot,
}

impl Control {
    pub const ALL: [Control; 3] = [Control::Default, Control::Raw, Control::Plot];

    pub fn name(self) -> &'static str {
        match self {
            Control::Default => "default",
            Control::Raw => "raw",
            Control::Plot => "plot",
        }
    }

    /// Method the control is checked for.
    pub fn bound_method(self) -> DisplayMethod {
        match self {
            Control::Default => DisplayMethod::Default,
            Control::Raw => DisplayMethod::Raw,
            Control::Plot => DisplayMethod::Plot,
        }
    }
}

/// Method requested by activating the control called `name`.
///
/// Only `plot` selects Plot; anything else (including `default`) selects Raw.
pub fn method_for(name: &str) -> DisplayMethod {
    if name == Control::Plot.name() {
        DisplayMethod::Plot
    } else {
        DisplayMethod::Raw
    }
}

/// Render-ready state of one control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlView {
    pub control: Control,
    pub label: String,
    pub checked: bool,
    /// Hidden controls are neither drawn nor interactive.
    pub visible: bool,
}

/// Derive the three controls from the current message.
pub fn controls(message: &Message) -> Vec<ControlView> {
    Control::ALL
        .iter()
        .map(|&control| {
            let label = match control {
                Control::Default => format!("Default ({})", message.payload_serialization),
                Control::Raw => "Raw".to_string(),
                Control::Plot => "Plot".to_string(),
            };
            ControlView {
                control,
                label,
                checked: message.payload_display == control.bound_method(),
                visible: control != Control::Plot || message.is_plottable(),
            }
        })
        .collect()
}

/// Action for activating the control called `name`, if it is interactive.
pub fn activate(device: &str, message: &Message, name: &str) -> Option<Action> {
    if name == Control::Plot.name() && !message.is_plottable() {
        return None;
    }
    Some(store::set_display_method(device, message, method_for(name)))
}

/// Activate a control and dispatch the result. Returns whether anything
/// was dispatched.
pub fn on_activate(
    store: &mut Store,
    device: &str,
    message: &Message,
    name: &str,
) -> InspectorResult<bool> {
    match activate(device, message, name) {
        Some(action) => {
            store.dispatch(action)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// One line of checkboxes: `[x] Default (ROOT)  [ ] Raw  [ ] Plot`.
pub fn selection_line(message: &Message) -> Line<'static> {
    let mut spans = Vec::new();
    for view in controls(message).into_iter().filter(|c| c.visible) {
        let mark = if view.checked { "[x]" } else { "[ ]" };
        let style = if view.checked {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!("{mark} {}", view.label), style));
        spans.push(Span::raw("  "));
    }
    spans.pop();
    Line::from(spans)
}
