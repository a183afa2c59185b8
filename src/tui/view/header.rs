//! Device header strip.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::model::Device;

/// Glyph standing in for the device icon.
pub const DEVICE_ICON: &str = "▣";

const TOOLBAR_BG: Color = Color::Rgb(0xe0, 0xe0, 0xe0);

/// Icon and device name on a light toolbar background.
pub fn header_line(device: &Device) -> Line<'static> {
    Line::from(vec![
        Span::raw(" "),
        Span::styled(DEVICE_ICON, Style::default().fg(Color::DarkGray)),
        Span::raw(" "),
        Span::styled(
            device.name.clone(),
            Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

pub fn render_header(f: &mut Frame, area: Rect, device: &Device) {
    let para = Paragraph::new(header_line(device)).style(Style::default().bg(TOOLBAR_BG));
    f.render_widget(para, area);
}
