//! Inspector layout.
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │ ▣ readout-proxy                    (toolbar)    │
//! ├──────────────┬──────────────────────────────────┤
//! │ device tree  │ message view                     │
//! │              │                                  │
//! ├──────────────┴──────────────────────────────────┤
//! │ j/k:message J/K:device d/r/p:display  4.2 KB    │
//! └─────────────────────────────────────────────────┘
//! ```

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::app::InspectorApp;
use super::dashboard;
use super::message_tree;
use super::view::{self, payload::PlotContext};

/// Draw the full inspector layout.
pub fn draw(f: &mut Frame, app: &mut InspectorApp) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // device header
            Constraint::Min(5),    // content area
            Constraint::Length(1), // status bar
        ])
        .split(f.area());

    match app.selected_device() {
        Some(device) => view::render_header(f, outer[0], device),
        None => f.render_widget(
            Paragraph::new(" no devices").style(Style::default().fg(Color::DarkGray)),
            outer[0],
        ),
    }

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(outer[1]);

    draw_tree(f, app, content[0]);
    draw_message(f, app, content[1]);
    draw_status(f, app, outer[2]);
}

fn draw_tree(f: &mut Frame, app: &mut InspectorApp, area: Rect) {
    let block = Block::default()
        .title(" Devices ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let items = message_tree::build_message_tree(&app.store.state().devices);
    let device_key = message_tree::device_key(app.selected_device);
    app.tree_state.open(vec![device_key.clone()]);
    app.tree_state.select(vec![
        device_key,
        message_tree::message_key(app.selected_device, app.selected_message),
    ]);

    if let Ok(tree) = tui_tree_widget::Tree::new(&items) {
        let tree = tree.block(block).highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        f.render_stateful_widget(tree, area, &mut app.tree_state);
    } else {
        let para = Paragraph::new("Error building device tree").block(block);
        f.render_widget(para, area);
    }
}

fn draw_message(f: &mut Frame, app: &mut InspectorApp, area: Rect) {
    let Some(message) = app
        .store
        .state()
        .devices
        .get(app.selected_device)
        .and_then(|d| d.messages.get(app.selected_message))
    else {
        let block = Block::default()
            .title(" Message ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let para = Paragraph::new(Span::styled(
            "no message selected",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        f.render_widget(para, area);
        return;
    };

    let block = Block::default()
        .title(format!(" Message {} ", message.id))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut plots = PlotContext {
        backend: app.plot_backend.as_ref(),
        registry: &mut app.plots,
        container: &app.config.payload_container,
        option: &app.config.draw_option,
    };
    view::render_message(f, inner, message, &mut plots);
}

fn draw_status(f: &mut Frame, app: &InspectorApp, area: Rect) {
    let total: usize = app
        .store
        .state()
        .devices
        .iter()
        .map(|d| d.payload_bytes())
        .sum();

    let mut spans = vec![Span::styled(
        " j/k:message  J/K:device  d/r/p:display  q:quit ",
        Style::default().fg(Color::DarkGray),
    )];
    spans.push(Span::raw(format!(" [{}]", dashboard::format_bytes(total))));
    if let Some(status) = &app.status {
        spans.push(Span::styled(
            format!("  {status}"),
            Style::default().fg(Color::Yellow),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
