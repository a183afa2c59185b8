//! Payload renderer: placeholder, string form, or a plot.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Wrap};
use ratatui::Frame;
use serde_json::Value;
use tracing::warn;

use crate::error::InspectorError;
use crate::model::{DisplayMethod, Message};
use crate::plot::{Drawing, DrawingKind, PlotBackend, PlotRegistry};

pub const EMPTY_PAYLOAD: &str = "empty payload";
pub const DRAWING_UNSUPPORTED: &str = "Message type does not support drawing.";

/// Everything Plot mode needs: a backend, where drawings live, and how to draw.
pub struct PlotContext<'a> {
    pub backend: &'a dyn PlotBackend,
    pub registry: &'a mut PlotRegistry,
    pub container: &'a str,
    pub option: &'a str,
}

/// What the payload area shows for a message.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadContent {
    Empty,
    Text(String),
    Plot(Drawing),
    Unsupported,
}

/// String form of a payload: strings verbatim, everything else as JSON.
pub fn payload_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Decide what to show, drawing into the registry when in Plot mode.
pub fn resolve_payload(message: &Message, plots: &mut PlotContext<'_>) -> PayloadContent {
    let Some(payload) = message.payload.as_ref().filter(|_| message.has_displayable_payload())
    else {
        return PayloadContent::Empty;
    };

    match message.payload_display {
        DisplayMethod::Plot => plot_payload(message, payload, plots),
        DisplayMethod::Default | DisplayMethod::Raw => PayloadContent::Text(payload_text(payload)),
    }
}

fn plot_payload(message: &Message, payload: &Value, plots: &mut PlotContext<'_>) -> PayloadContent {
    if let Some(drawing) = plots.registry.get_for(plots.container, message.id) {
        return PayloadContent::Plot(drawing.clone());
    }
    if plots.registry.has_failed(plots.container, message.id) {
        return PayloadContent::Unsupported;
    }

    let drawn = serde_json::to_string(payload)
        .map_err(InspectorError::from)
        .and_then(|json| plots.backend.parse(&json))
        .and_then(|object| plots.backend.draw(plots.container, &object, plots.option));

    match drawn {
        Ok(drawing) => {
            plots.registry.insert(message.id, drawing.clone());
            PayloadContent::Plot(drawing)
        }
        Err(e) => {
            warn!(message = %message.id, "cannot draw payload: {e}");
            plots.registry.mark_failed(plots.container, message.id);
            PayloadContent::Unsupported
        }
    }
}

/// Draw resolved payload content into `area`.
pub fn render_payload(f: &mut Frame, area: Rect, content: &PayloadContent) {
    match content {
        PayloadContent::Empty => {
            let para = Paragraph::new(Span::styled(
                EMPTY_PAYLOAD,
                Style::default().fg(Color::DarkGray),
            ));
            f.render_widget(para, area);
        }
        PayloadContent::Text(text) => {
            let para = Paragraph::new(text.as_str()).wrap(Wrap { trim: false });
            f.render_widget(para, area);
        }
        PayloadContent::Unsupported => {
            let para = Paragraph::new(Span::styled(
                DRAWING_UNSUPPORTED,
                Style::default().fg(Color::Yellow),
            ));
            f.render_widget(para, area);
        }
        PayloadContent::Plot(drawing) => render_drawing(f, area, drawing),
    }
}

fn axis_labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
    vec![
        Span::raw(format!("{:.1}", bounds[0])),
        Span::raw(format!("{:.1}", bounds[1])),
    ]
}

/// Caption above a drawing: object title and draw option.
fn drawing_caption(drawing: &Drawing) -> Line<'static> {
    Line::from(vec![
        Span::styled(drawing.title.clone(), Style::default().fg(Color::White)),
        Span::styled(
            format!("  [{}]", drawing.option),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// Axis ranges under a colour grid.
fn grid_range_line(x_bounds: [f64; 2], y_bounds: [f64; 2]) -> Line<'static> {
    Line::styled(
        format!(
            "x: {:.1} .. {:.1}   y: {:.1} .. {:.1}",
            x_bounds[0], x_bounds[1], y_bounds[0], y_bounds[1]
        ),
        Style::default().fg(Color::DarkGray),
    )
}

fn render_drawing(f: &mut Frame, area: Rect, drawing: &Drawing) {
    let [caption, body] = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
    f.render_widget(Paragraph::new(drawing_caption(drawing)), caption);

    match &drawing.kind {
        DrawingKind::Series {
            points,
            x_bounds,
            y_bounds,
            bars,
        } => {
            let graph_type = if *bars {
                GraphType::Bar
            } else {
                GraphType::Line
            };
            let dataset = Dataset::default()
                .name(drawing.title.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(graph_type)
                .style(Style::default().fg(Color::Cyan))
                .data(points);
            let chart = Chart::new(vec![dataset])
                .x_axis(
                    Axis::default()
                        .style(Style::default().fg(Color::DarkGray))
                        .bounds(*x_bounds)
                        .labels(axis_labels(*x_bounds)),
                )
                .y_axis(
                    Axis::default()
                        .style(Style::default().fg(Color::DarkGray))
                        .bounds(*y_bounds)
                        .labels(axis_labels(*y_bounds)),
                );
            f.render_widget(chart, body);
        }
        DrawingKind::Grid {
            nx,
            ny,
            cells,
            max,
            x_bounds,
            y_bounds,
        } => {
            let [grid, range] =
                Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(body);
            f.render_widget(Paragraph::new(grid_text(*nx, *ny, cells, *max)), grid);
            f.render_widget(Paragraph::new(grid_range_line(*x_bounds, *y_bounds)), range);
        }
    }
}

/// Blue → red palette, like ROOT's default `colz` scale.
pub fn colz_color(fraction: f64) -> Color {
    let t = fraction.clamp(0.0, 1.0);
    let r = (255.0 * t) as u8;
    let b = (255.0 * (1.0 - t)) as u8;
    let g = (255.0 * (1.0 - (2.0 * t - 1.0).abs())) as u8;
    Color::Rgb(r, g, b)
}

/// Colour cells, highest y row first. Empty cells stay blank.
fn grid_text(nx: usize, ny: usize, cells: &[f64], max: f64) -> Text<'static> {
    let lines: Vec<Line> = (0..ny)
        .rev()
        .map(|y| {
            let spans: Vec<Span> = (0..nx)
                .map(|x| {
                    let value = cells.get(y * nx + x).copied().unwrap_or(0.0);
                    if value <= 0.0 || max <= 0.0 {
                        Span::raw("  ")
                    } else {
                        Span::styled("██", Style::default().fg(colz_color(value / max)))
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();
    Text::from(lines)
}
