//! Dashboard utilities: status bar and tree label formatting.

use crate::model::{DisplayMethod, Message};

/// Format a byte count for human display.
pub fn format_bytes(bytes: usize) -> String {
    if bytes >= 1_048_576 {
        format!("{:.1} MB", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}

/// Short badge for the current display method.
pub fn display_badge(method: DisplayMethod) -> &'static str {
    match method {
        DisplayMethod::Default => "dflt",
        DisplayMethod::Raw => "raw",
        DisplayMethod::Plot => "plot",
    }
}

/// `ORIGIN/DESCRIPTION/SUBSPEC` data description of a message.
pub fn data_description(m: &Message) -> String {
    format!("{}/{}/{}", m.origin, m.description, m.sub_specification)
}
