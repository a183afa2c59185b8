//! Message metadata table: two columns, seven rows.

use std::fmt::Display;

use ratatui::layout::Constraint;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Cell, Row, Table};

use crate::model::Message;

/// Placeholder for optional fields that were never filled in.
pub const NOT_AVAILABLE: &str = "N/A";

/// Present the value, or `N/A` when missing or zero.
fn or_na<T: Display + PartialEq + Default>(value: Option<&T>) -> String {
    match value {
        Some(v) if *v != T::default() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Table cells as `[left, right]` pairs.
pub fn metadata_rows(m: &Message) -> Vec<[String; 2]> {
    vec![
        [
            format!("Origin: {}", m.origin),
            format!("Payload parts: {}", m.payload_parts),
        ],
        [
            format!("Description: {}", m.description),
            format!("Payload split index: {}", m.payload_split_index),
        ],
        [
            format!("Sub-specification: {}", m.sub_specification),
            format!("Start time: {}", or_na(m.start_time.as_ref())),
        ],
        [
            format!("Payload size: {} B", m.payload_size),
            format!("Duration: {}", or_na(m.duration.as_ref())),
        ],
        [
            format!("Serialization: {}", m.payload_serialization),
            format!("Creation time: {}", or_na(m.creation_time.as_ref())),
        ],
        [
            format!("FirstTForbit: {}", m.first_t_forbit),
            format!("Task's hash: {}", or_na(m.task_hash.as_ref())),
        ],
        [format!("Run number: {}", m.run_number), String::new()],
    ]
}

/// Build the metadata table widget.
pub fn metadata_table(m: &Message) -> Table<'static> {
    let rows: Vec<Row> = metadata_rows(m)
        .into_iter()
        .map(|[left, right]| Row::new(vec![Cell::from(left), Cell::from(right)]))
        .collect();
    Table::new(rows, [Constraint::Percentage(50), Constraint::Percentage(50)])
        .style(Style::default().fg(Color::White))
        .column_spacing(2)
}
