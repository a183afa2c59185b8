//! InspectorApp: the TEA model.
//!
//! All state lives here. Update receives InspectorMessages, mutates state.
//! View reads state to produce ratatui widgets. Message data is only ever
//! changed through the store.

use tracing::warn;

use crate::config::InspectorConfig;
use crate::model::{Device, Message};
use crate::plot::root::RootJsonBackend;
use crate::plot::{PlotBackend, PlotRegistry};
use crate::store::Store;

use super::event::InspectorMessage;
use super::view::selection::{self, Control};

/// Ticks a status notice stays visible (~2s at 4Hz).
const STATUS_TICKS: u8 = 8;

/// The main inspector state (TEA model).
pub struct InspectorApp {
    /// Device and message data; mutated only via dispatch.
    pub store: Store,
    /// Index of the selected device.
    pub selected_device: usize,
    /// Index of the selected message within the selected device.
    pub selected_message: usize,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Tree widget state for the device/message tree.
    pub tree_state: tui_tree_widget::TreeState<String>,
    /// Plotting library used in Plot mode.
    pub plot_backend: Box<dyn PlotBackend>,
    /// Drawings per container.
    pub plots: PlotRegistry,
    pub config: InspectorConfig,
    /// Transient notice for the status bar (dispatch errors).
    pub status: Option<String>,
    status_ticks: u8,
}

impl InspectorApp {
    /// Create an app over a store with the ROOT JSON plot backend.
    pub fn new(store: Store, config: InspectorConfig) -> Self {
        Self::with_backend(store, config, Box::new(RootJsonBackend))
    }

    pub fn with_backend(
        store: Store,
        config: InspectorConfig,
        plot_backend: Box<dyn PlotBackend>,
    ) -> Self {
        Self {
            store,
            selected_device: 0,
            selected_message: 0,
            should_quit: false,
            tree_state: tui_tree_widget::TreeState::default(),
            plot_backend,
            plots: PlotRegistry::new(),
            config,
            status: None,
            status_ticks: 0,
        }
    }

    pub fn selected_device(&self) -> Option<&Device> {
        self.store.state().devices.get(self.selected_device)
    }

    pub fn selected_message(&self) -> Option<&Message> {
        self.selected_device()
            .and_then(|d| d.messages.get(self.selected_message))
    }

    /// Process one message.
    pub fn update(&mut self, msg: InspectorMessage) {
        match msg {
            InspectorMessage::Input(key) => {
                super::input::handle_key(self, key);
            }
            InspectorMessage::Tick => {
                if self.status_ticks > 0 {
                    self.status_ticks -= 1;
                    if self.status_ticks == 0 {
                        self.status = None;
                    }
                }
            }
            InspectorMessage::Render => {
                // Render handled externally by runner
            }
            InspectorMessage::Quit => {
                self.should_quit = true;
            }
        }
    }

    /// Show a notice in the status bar for a few ticks.
    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(text.into());
        self.status_ticks = STATUS_TICKS;
    }

    /// Activate a display selector control on the selected message.
    pub fn activate_control(&mut self, control: Control) {
        let Some(device) = self.selected_device() else {
            return;
        };
        let device_name = device.name.clone();
        let Some(message) = device.messages.get(self.selected_message).cloned() else {
            return;
        };
        // The selector is only shown for messages with a payload.
        if !message.has_payload() {
            return;
        }

        match selection::on_activate(&mut self.store, &device_name, &message, control.name()) {
            Ok(true) => {}
            Ok(false) => self.set_status("Plot is only available for ROOT payloads"),
            Err(e) => {
                warn!("display selection failed: {e}");
                self.set_status(e.to_string());
            }
        }
    }

    fn message_count(&self) -> usize {
        self.selected_device().map_or(0, |d| d.messages.len())
    }

    /// Move message selection up.
    pub fn move_up(&mut self) {
        if self.selected_message > 0 {
            self.selected_message -= 1;
        }
    }

    /// Move message selection down.
    pub fn move_down(&mut self) {
        let max = self.message_count().saturating_sub(1);
        if self.selected_message < max {
            self.selected_message += 1;
        }
    }

    /// Select the next device, first message.
    pub fn next_device(&mut self) {
        let max = self.store.state().devices.len().saturating_sub(1);
        if self.selected_device < max {
            self.selected_device += 1;
            self.selected_message = 0;
        }
    }

    /// Select the previous device, first message.
    pub fn prev_device(&mut self) {
        if self.selected_device > 0 {
            self.selected_device -= 1;
            self.selected_message = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DisplayMethod;
    use crate::store::AppState;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use serde_json::json;

    fn key(c: char) -> InspectorMessage {
        InspectorMessage::Input(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn sample_app() -> InspectorApp {
        let mut readout = Device::new("readout");
        readout.messages.push(Message {
            payload_serialization: "ROOT".into(),
            payload: Some(json!({"_typename": "TH1F"})),
            ..Message::default()
        });
        readout.messages.push(Message {
            payload_serialization: "JSON".into(),
            payload: Some(json!({"k": 1})),
            ..Message::default()
        });
        readout.messages.push(Message::default());
        let mut qc = Device::new("qc");
        qc.messages.push(Message::default());
        let store = Store::from_state(AppState {
            devices: vec![readout, qc],
        });
        InspectorApp::new(store, InspectorConfig::default())
    }

    fn display(app: &InspectorApp) -> DisplayMethod {
        app.selected_message().unwrap().payload_display
    }

    #[test]
    fn app_default_state() {
        let app = sample_app();
        assert!(!app.should_quit);
        assert_eq!(app.selected_device().unwrap().name, "readout");
        assert!(app.status.is_none());
    }

    #[test]
    fn app_quit_on_ctrl_c() {
        let mut app = sample_app();
        app.update(InspectorMessage::Input(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.should_quit);
    }

    #[test]
    fn app_quit_on_q() {
        let mut app = sample_app();
        app.update(key('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn plot_then_default_yields_raw() {
        let mut app = sample_app();
        app.update(key('p'));
        assert_eq!(display(&app), DisplayMethod::Plot);
        app.update(key('d'));
        assert_eq!(display(&app), DisplayMethod::Raw);
    }

    #[test]
    fn plot_key_ignored_for_non_root() {
        let mut app = sample_app();
        app.move_down();
        let before = app.store.revision();
        app.update(key('p'));
        assert_eq!(display(&app), DisplayMethod::Default);
        assert_eq!(app.store.revision(), before);
        assert!(app.status.is_some());
    }

    #[test]
    fn selector_keys_ignored_without_payload() {
        let mut app = sample_app();
        app.move_down();
        app.move_down();
        let before = app.store.revision();
        app.update(key('r'));
        assert_eq!(app.store.revision(), before);
    }

    #[test]
    fn app_move_clamped() {
        let mut app = sample_app();
        app.move_up();
        assert_eq!(app.selected_message, 0);
        for _ in 0..5 {
            app.move_down();
        }
        assert_eq!(app.selected_message, 2);
    }

    #[test]
    fn device_switch_resets_message() {
        let mut app = sample_app();
        app.move_down();
        app.next_device();
        assert_eq!(app.selected_device, 1);
        assert_eq!(app.selected_message, 0);
        app.next_device();
        assert_eq!(app.selected_device, 1);
        app.prev_device();
        assert_eq!(app.selected_device, 0);
    }

    #[test]
    fn status_expires_after_ticks() {
        let mut app = sample_app();
        app.set_status("hello");
        for _ in 0..STATUS_TICKS {
            assert!(app.status.is_some());
            app.update(InspectorMessage::Tick);
        }
        assert!(app.status.is_none());
    }

    #[test]
    fn empty_store_is_safe() {
        let mut app = InspectorApp::new(Store::new(), InspectorConfig::default());
        app.move_down();
        app.next_device();
        app.update(key('r'));
        assert!(app.selected_message().is_none());
    }

    #[test]
    fn stale_message_dispatch_rejected() {
        let mut app = sample_app();
        let msg = app.selected_message().unwrap().clone();
        let mut stale = msg.clone();
        stale.id = crate::model::MessageId(999);
        let result = selection::on_activate(&mut app.store, "readout", &stale, "raw");
        assert!(result.is_err());
        assert_eq!(
            app.store.state().message("readout", msg.id).unwrap().payload_display,
            DisplayMethod::Default
        );
    }

    #[test]
    fn repeated_device_name_selector_works() {
        let mut first = Device::new("readout");
        first.messages.push(Message::default());
        let mut second = Device::new("readout");
        second.messages.push(Message {
            payload: Some(json!({"k": 1})),
            ..Message::default()
        });
        let store = Store::from_state(AppState {
            devices: vec![first, second],
        });
        let mut app = InspectorApp::new(store, InspectorConfig::default());
        app.move_down();
        app.update(key('r'));
        assert_eq!(display(&app), DisplayMethod::Raw);
        assert!(app.status.is_none());
    }
}
