//! Plot seam: parse a serialized object, draw it into a named container.
//!
//! The payload renderer only knows the [`PlotBackend`] trait. The built-in
//! backend understands ROOT JSON (histograms and graphs) and produces a
//! [`Drawing`] that the layout turns into ratatui widgets. Drawings are
//! kept per container in a [`PlotRegistry`] so the layout can find them.

pub mod root;

use std::collections::HashMap;

use crate::error::InspectorResult;
use crate::model::MessageId;

/// A parsed, plottable object.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotObject {
    /// One-dimensional histogram. `bins` excludes under/overflow.
    Hist1 {
        name: String,
        title: String,
        x_min: f64,
        x_max: f64,
        bins: Vec<f64>,
    },
    /// Two-dimensional histogram. `cells[y * nx + x]`, no under/overflow.
    Hist2 {
        name: String,
        title: String,
        nx: usize,
        ny: usize,
        x_range: [f64; 2],
        y_range: [f64; 2],
        cells: Vec<f64>,
    },
    /// Scatter/line graph.
    Graph {
        name: String,
        title: String,
        points: Vec<(f64, f64)>,
    },
}

impl PlotObject {
    pub fn title(&self) -> &str {
        match self {
            PlotObject::Hist1 { name, title, .. }
            | PlotObject::Hist2 { name, title, .. }
            | PlotObject::Graph { name, title, .. } => {
                if title.is_empty() {
                    name
                } else {
                    title
                }
            }
        }
    }
}

/// What ends up on screen for a drawn object.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingKind {
    /// Point series for a chart.
    Series {
        points: Vec<(f64, f64)>,
        x_bounds: [f64; 2],
        y_bounds: [f64; 2],
        bars: bool,
    },
    /// Colour-mapped cell grid (`colz`). `cells[y * nx + x]`.
    Grid {
        nx: usize,
        ny: usize,
        cells: Vec<f64>,
        max: f64,
        x_bounds: [f64; 2],
        y_bounds: [f64; 2],
    },
}

/// A drawn object bound to the container it was drawn into.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    pub container: String,
    pub option: String,
    pub title: String,
    pub kind: DrawingKind,
}

/// A plotting library: parse serialized objects, draw them into containers.
pub trait PlotBackend: Send + Sync {
    /// Turn a serialized object into something drawable.
    fn parse(&self, json: &str) -> InspectorResult<PlotObject>;
    /// Draw an object into the named container with a draw option.
    fn draw(&self, container: &str, object: &PlotObject, option: &str)
        -> InspectorResult<Drawing>;
}

/// Container id → last drawing, tagged with the message it came from.
///
/// Failed draws are remembered too so a bad payload is parsed once, not
/// once per frame.
#[derive(Debug, Default)]
pub struct PlotRegistry {
    drawings: HashMap<String, (MessageId, Drawing)>,
    failed: HashMap<String, MessageId>,
}

impl PlotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drawing held by a container, only if it was drawn for `message`.
    pub fn get_for(&self, container: &str, message: MessageId) -> Option<&Drawing> {
        self.drawings
            .get(container)
            .filter(|(id, _)| *id == message)
            .map(|(_, d)| d)
    }

    pub fn insert(&mut self, message: MessageId, drawing: Drawing) {
        self.failed.remove(&drawing.container);
        self.drawings
            .insert(drawing.container.clone(), (message, drawing));
    }

    /// Record that drawing `message` into `container` failed.
    pub fn mark_failed(&mut self, container: &str, message: MessageId) {
        self.drawings.remove(container);
        self.failed.insert(container.to_string(), message);
    }

    pub fn has_failed(&self, container: &str, message: MessageId) -> bool {
        self.failed.get(container) == Some(&message)
    }
}
