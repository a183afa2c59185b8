//! Application store: state, actions, reducer.
//!
//! Views never mutate state directly. They build an [`Action`] with one of
//! the action creators and hand it to [`Store::dispatch`]. The reducer is
//! a plain function so it can be tested without a store.

use tracing::debug;

use crate::error::{InspectorError, InspectorResult};
use crate::model::{Device, DisplayMethod, Message, MessageId};

/// Everything the dashboard knows about.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub devices: Vec<Device>,
}

impl AppState {
    pub fn device(&self, name: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.name == name)
    }

    fn device_mut(&mut self, name: &str) -> Option<&mut Device> {
        self.devices.iter_mut().find(|d| d.name == name)
    }

    /// Look up a message by device name and id.
    pub fn message(&self, device: &str, id: MessageId) -> Option<&Message> {
        self.device(device).and_then(|d| d.message(id))
    }
}

/// State mutations the store understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Change how a message payload is displayed.
    SetDisplayMethod {
        device: String,
        message: MessageId,
        method: DisplayMethod,
    },
    /// Register a device (no-op if it already exists).
    AddDevice { name: String },
    /// Append a captured message to a device.
    AddMessage { device: String, message: Message },
}

/// Action creator for the display selector.
pub fn set_display_method(device: &str, message: &Message, method: DisplayMethod) -> Action {
    Action::SetDisplayMethod {
        device: device.to_string(),
        message: message.id,
        method,
    }
}

/// Apply an action to the state.
///
/// `AddMessage` expects the message id to be assigned already (see
/// [`Store::dispatch`]).
pub fn reduce(state: &mut AppState, action: Action) -> InspectorResult<()> {
    match action {
        Action::SetDisplayMethod {
            device,
            message,
            method,
        } => {
            let dev = state
                .device_mut(&device)
                .ok_or_else(|| InspectorError::DeviceNotFound(device.clone()))?;
            let msg = dev
                .message_mut(message)
                .ok_or(InspectorError::MessageNotFound { device, message })?;
            msg.payload_display = method;
        }
        Action::AddDevice { name } => {
            if state.device(&name).is_none() {
                state.devices.push(Device::new(name));
            }
        }
        Action::AddMessage { device, message } => {
            let dev = state
                .device_mut(&device)
                .ok_or(InspectorError::DeviceNotFound(device))?;
            dev.messages.push(message);
        }
    }
    Ok(())
}

/// Owns the state and serializes every mutation through `dispatch`.
#[derive(Debug, Default)]
pub struct Store {
    state: AppState,
    next_id: u64,
    revision: u64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a loaded state, assigning fresh message ids.
    ///
    /// Devices are keyed by name: repeated entries are merged into the
    /// first one, in order.
    pub fn from_state(state: AppState) -> Self {
        let mut store = Self::new();
        for device in state.devices {
            let index = match store.state.devices.iter().position(|d| d.name == device.name) {
                Some(index) => {
                    debug!(device = %device.name, "merging repeated device");
                    index
                }
                None => {
                    store.state.devices.push(Device::new(device.name));
                    store.state.devices.len() - 1
                }
            };
            for mut message in device.messages {
                message.id = store.allocate_id();
                store.state.devices[index].messages.push(message);
            }
        }
        store
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Incremented on every successful dispatch.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn allocate_id(&mut self) -> MessageId {
        self.next_id += 1;
        MessageId(self.next_id)
    }

    /// Run an action through the reducer.
    pub fn dispatch(&mut self, action: Action) -> InspectorResult<()> {
        let action = match action {
            Action::AddMessage { device, mut message } => {
                if self.state.device(&device).is_none() {
                    return Err(InspectorError::DeviceNotFound(device));
                }
                message.id = self.allocate_id();
                Action::AddMessage { device, message }
            }
            other => other,
        };
        debug!(?action, "dispatch");
        reduce(&mut self.state, action)?;
        self.revision += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_message() -> (Store, MessageId) {
        let mut store = Store::new();
        store
            .dispatch(Action::AddDevice {
                name: "readout".into(),
            })
            .unwrap();
        store
            .dispatch(Action::AddMessage {
                device: "readout".into(),
                message: Message::default(),
            })
            .unwrap();
        let id = store.state().devices[0].messages[0].id;
        (store, id)
    }

    #[test]
    fn add_message_assigns_unique_ids() {
        let (mut store, first) = store_with_message();
        store
            .dispatch(Action::AddMessage {
                device: "readout".into(),
                message: Message::default(),
            })
            .unwrap();
        let second = store.state().devices[0].messages[1].id;
        assert_ne!(first, second);
        assert_ne!(first, MessageId::default());
    }

    #[test]
    fn set_display_method_updates_message() {
        let (mut store, id) = store_with_message();
        let msg = store.state().message("readout", id).unwrap().clone();
        store
            .dispatch(set_display_method("readout", &msg, DisplayMethod::Plot))
            .unwrap();
        let msg = store.state().message("readout", id).unwrap();
        assert_eq!(msg.payload_display, DisplayMethod::Plot);
    }

    #[test]
    fn dispatch_bumps_revision() {
        let (mut store, id) = store_with_message();
        let before = store.revision();
        store
            .dispatch(Action::SetDisplayMethod {
                device: "readout".into(),
                message: id,
                method: DisplayMethod::Raw,
            })
            .unwrap();
        assert_eq!(store.revision(), before + 1);
    }

    #[test]
    fn unknown_message_rejected() {
        let (mut store, _) = store_with_message();
        let before = store.revision();
        let err = store
            .dispatch(Action::SetDisplayMethod {
                device: "readout".into(),
                message: MessageId(999),
                method: DisplayMethod::Raw,
            })
            .unwrap_err();
        assert!(matches!(err, InspectorError::MessageNotFound { .. }));
        assert_eq!(store.revision(), before);
    }

    #[test]
    fn unknown_device_rejected() {
        let mut store = Store::new();
        let err = store
            .dispatch(Action::AddMessage {
                device: "ghost".into(),
                message: Message::default(),
            })
            .unwrap_err();
        assert!(matches!(err, InspectorError::DeviceNotFound(_)));
    }

    #[test]
    fn add_device_is_idempotent() {
        let mut state = AppState::default();
        reduce(&mut state, Action::AddDevice { name: "a".into() }).unwrap();
        reduce(&mut state, Action::AddDevice { name: "a".into() }).unwrap();
        assert_eq!(state.devices.len(), 1);
    }

    #[test]
    fn from_state_reassigns_ids() {
        let mut device = Device::new("qc");
        device.messages.push(Message::default());
        device.messages.push(Message::default());
        let store = Store::from_state(AppState {
            devices: vec![device],
        });
        let ids: Vec<_> = store.state().devices[0]
            .messages
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![MessageId(1), MessageId(2)]);
    }

    #[test]
    fn from_state_merges_repeated_devices() {
        let mut first = Device::new("readout");
        first.messages.push(Message::default());
        let mut second = Device::new("readout");
        second.messages.push(Message::default());
        let mut store = Store::from_state(AppState {
            devices: vec![first, second, Device::new("qc")],
        });
        let names: Vec<_> = store.state().devices.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["readout", "qc"]);

        let later = store.state().devices[0].messages[1].clone();
        assert_eq!(later.id, MessageId(2));
        store
            .dispatch(set_display_method("readout", &later, DisplayMethod::Raw))
            .unwrap();
        assert_eq!(
            store.state().message("readout", later.id).unwrap().payload_display,
            DisplayMethod::Raw
        );
    }
}
