//! Device and message data model.
//!
//! Plain data shared by the store and the views. Field names follow the
//! capture format (camelCase) so snapshots deserialize without mapping.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Serialization tag of payloads the plot backend understands.
pub const ROOT_SERIALIZATION: &str = "ROOT";

/// Store-assigned message identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a message payload is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayMethod {
    #[default]
    Default,
    Raw,
    Plot,
}

/// A device of the topology, with the messages captured from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Device {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            messages: Vec::new(),
        }
    }

    pub fn message(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn message_mut(&mut self, id: MessageId) -> Option<&mut Message> {
        self.messages.iter_mut().find(|m| m.id == id)
    }

    /// Sum of the payload sizes of all captured messages.
    pub fn payload_bytes(&self) -> usize {
        self.messages.iter().map(|m| m.payload_size as usize).sum()
    }
}

/// A captured message: header metadata plus an optional payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Assigned by the store on insertion, never read from a capture.
    #[serde(skip)]
    pub id: MessageId,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sub_specification: u64,
    #[serde(default)]
    pub payload_size: u64,
    #[serde(default)]
    pub payload_serialization: String,
    #[serde(default)]
    pub payload_parts: u64,
    #[serde(default)]
    pub payload_split_index: u64,
    #[serde(default)]
    pub first_t_forbit: u64,
    #[serde(default)]
    pub run_number: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(default)]
    pub payload_display: DisplayMethod,
}

impl Message {
    /// Whether the payload can be drawn by the plot backend.
    pub fn is_plottable(&self) -> bool {
        self.payload_serialization == ROOT_SERIALIZATION
    }

    /// Whether the message carries a payload at all (selection block visibility).
    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }

    /// Whether the payload holds something worth rendering.
    ///
    /// `null`, `false`, `0` and `""` count as empty.
    pub fn has_displayable_payload(&self) -> bool {
        match &self.payload {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        }
    }
}
