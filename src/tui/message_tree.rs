//! Device → message tree: tui-tree-widget integration.
//!
//! ```text
//! [v] readout-proxy (3 messages, 4.2 KB)
//!      TST/RAWDATA/0   512 B  raw
//!      QC/HIST/1       1.1 KB plot
//! [>] qc-task-its (0 messages, 0 B)
//! ```

use tui_tree_widget::TreeItem;

use super::dashboard;
use crate::model::{Device, Message};

/// Tree identifier of a device node.
pub fn device_key(index: usize) -> String {
    format!("dev-{index}")
}

/// Tree identifier of a message leaf.
pub fn message_key(device: usize, message: usize) -> String {
    format!("msg-{device}-{message}")
}

fn message_label(m: &Message) -> String {
    format!(
        "{:<20} {:>8}  {}",
        dashboard::data_description(m),
        dashboard::format_bytes(m.payload_size as usize),
        dashboard::display_badge(m.payload_display),
    )
}

/// Build one node per device with its messages as leaves.
pub fn build_message_tree<'a>(devices: &[Device]) -> Vec<TreeItem<'a, String>> {
    devices
        .iter()
        .enumerate()
        .filter_map(|(di, device)| {
            let label = format!(
                "{} ({} messages, {})",
                device.name,
                device.messages.len(),
                dashboard::format_bytes(device.payload_bytes()),
            );
            let children: Vec<TreeItem<'a, String>> = device
                .messages
                .iter()
                .enumerate()
                .map(|(mi, m)| TreeItem::new_leaf(message_key(di, mi), message_label(m)))
                .collect();
            // Keys are unique by construction; a failure here means a bug.
            TreeItem::new(device_key(di), label, children).ok()
        })
        .collect()
}
