//! Message detail view.
//!
//! ```text
//! Display method:              ← only when the message has a payload
//! ───────────────
//! [x] Default (ROOT)  [ ] Raw  [ ] Plot
//! Header
//! ───────────────
//! Origin: TST          Payload parts: 1
//! ...
//! Payload
//! ───────────────
//! (payload renderer)
//! ```

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::metadata;
use super::payload::{self, PlotContext};
use super::selection;
use crate::model::Message;

pub const SELECTION_TITLE: &str = "Display method:";

/// Section heading with a rule underneath.
fn section(title: &str) -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
}

/// Render a message into `area`, drawing plots through `plots`.
pub fn render_message(f: &mut Frame, area: Rect, message: &Message, plots: &mut PlotContext<'_>) {
    let selection_height = if message.has_payload() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(selection_height), // display selection
            Constraint::Length(2),                // "Header"
            Constraint::Length(7),                // metadata table
            Constraint::Length(2),                // "Payload"
            Constraint::Min(1),                   // payload
        ])
        .split(area);

    if message.has_payload() {
        let sel = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(1)])
            .split(chunks[0]);
        f.render_widget(section(SELECTION_TITLE), sel[0]);
        f.render_widget(Paragraph::new(selection::selection_line(message)), sel[1]);
    }

    f.render_widget(section("Header"), chunks[1]);
    f.render_widget(metadata::metadata_table(message), chunks[2]);

    f.render_widget(section("Payload"), chunks[3]);
    let content = payload::resolve_payload(message, plots);
    payload::render_payload(f, chunks[4], &content);
}
