//! ROOT JSON backend: histograms and graphs as written by `TBufferJSON`.
//!
//! Dispatches on `_typename`:
//! - `TH1*`, `TProfile` → [`PlotObject::Hist1`] (profiles as bin means)
//! - `TH2*` → [`PlotObject::Hist2`]
//! - `TGraph`, `TGraphErrors`, `TGraphAsymmErrors` → [`PlotObject::Graph`]

use serde::Deserialize;
use serde_json::Value;

use super::{Drawing, DrawingKind, PlotBackend, PlotObject};
use crate::error::{InspectorError, InspectorResult};

#[derive(Debug, Deserialize)]
struct RawAxis {
    #[serde(rename = "fNbins")]
    n_bins: usize,
    #[serde(rename = "fXmin")]
    min: f64,
    #[serde(rename = "fXmax")]
    max: f64,
}

#[derive(Debug, Deserialize)]
struct RawHist {
    #[serde(rename = "fName", default)]
    name: String,
    #[serde(rename = "fTitle", default)]
    title: String,
    #[serde(rename = "fXaxis")]
    x_axis: RawAxis,
    #[serde(rename = "fYaxis", default)]
    y_axis: Option<RawAxis>,
    #[serde(rename = "fArray")]
    array: Vec<f64>,
    #[serde(rename = "fBinEntries", default)]
    bin_entries: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct RawGraph {
    #[serde(rename = "fName", default)]
    name: String,
    #[serde(rename = "fTitle", default)]
    title: String,
    #[serde(rename = "fNpoints")]
    n_points: usize,
    #[serde(rename = "fX", default)]
    x: Vec<f64>,
    #[serde(rename = "fY", default)]
    y: Vec<f64>,
}

fn invalid(e: impl std::fmt::Display) -> InspectorError {
    InspectorError::InvalidPlot(e.to_string())
}

/// Built-in backend for ROOT JSON payloads.
#[derive(Debug, Default, Clone, Copy)]
pub struct RootJsonBackend;

impl RootJsonBackend {
    fn parse_hist1(value: Value, profile: bool) -> InspectorResult<PlotObject> {
        let raw: RawHist = serde_json::from_value(value).map_err(invalid)?;
        let n = raw.x_axis.n_bins;
        let expected = n
            .checked_add(2)
            .ok_or_else(|| invalid(format!("fNbins {n} out of range")))?;
        if raw.array.len() < expected {
            return Err(invalid(format!(
                "fArray has {} entries, expected {expected}",
                raw.array.len()
            )));
        }
        let sums = &raw.array[1..=n];
        let bins: Vec<f64> = if profile {
            if raw.bin_entries.len() < expected {
                return Err(invalid(format!(
                    "fBinEntries has {} entries, expected {expected}",
                    raw.bin_entries.len()
                )));
            }
            sums.iter()
                .zip(&raw.bin_entries[1..=n])
                .map(|(sum, entries)| if *entries > 0.0 { sum / entries } else { 0.0 })
                .collect()
        } else {
            sums.to_vec()
        };
        Ok(PlotObject::Hist1 {
            name: raw.name,
            title: raw.title,
            x_min: raw.x_axis.min,
            x_max: raw.x_axis.max,
            bins,
        })
    }

    fn parse_hist2(value: Value) -> InspectorResult<PlotObject> {
        let raw: RawHist = serde_json::from_value(value).map_err(invalid)?;
        let y_axis = raw.y_axis.ok_or_else(|| invalid("missing fYaxis"))?;
        let (nx, ny) = (raw.x_axis.n_bins, y_axis.n_bins);
        let stride = nx
            .checked_add(2)
            .ok_or_else(|| invalid(format!("fNbins {nx} out of range")))?;
        let expected = ny
            .checked_add(2)
            .and_then(|rows| rows.checked_mul(stride))
            .ok_or_else(|| invalid(format!("{nx}x{ny} bins out of range")))?;
        if raw.array.len() < expected {
            return Err(invalid(format!(
                "fArray has {} entries, expected {expected}",
                raw.array.len()
            )));
        }
        let mut cells = Vec::with_capacity(nx * ny);
        for by in 1..=ny {
            for bx in 1..=nx {
                cells.push(raw.array[bx + stride * by]);
            }
        }
        Ok(PlotObject::Hist2 {
            name: raw.name,
            title: raw.title,
            nx,
            ny,
            x_range: [raw.x_axis.min, raw.x_axis.max],
            y_range: [y_axis.min, y_axis.max],
            cells,
        })
    }

    fn parse_graph(value: Value) -> InspectorResult<PlotObject> {
        let raw: RawGraph = serde_json::from_value(value).map_err(invalid)?;
        let points = raw
            .x
            .iter()
            .zip(raw.y.iter())
            .take(raw.n_points)
            .map(|(x, y)| (*x, *y))
            .collect();
        Ok(PlotObject::Graph {
            name: raw.name,
            title: raw.title,
            points,
        })
    }
}

/// `[min, max]` padded so a flat series still has a visible range.
fn bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    if min == max {
        [min - 0.5, max + 0.5]
    } else {
        [min, max]
    }
}

impl PlotBackend for RootJsonBackend {
    fn parse(&self, json: &str) -> InspectorResult<PlotObject> {
        let value: Value = serde_json::from_str(json)?;
        let typename = value
            .get("_typename")
            .and_then(Value::as_str)
            .ok_or_else(|| InspectorError::UnsupportedPlot("object without _typename".into()))?
            .to_string();

        if typename.starts_with("TH1") {
            Self::parse_hist1(value, false)
        } else if typename == "TProfile" {
            Self::parse_hist1(value, true)
        } else if typename.starts_with("TH2") {
            Self::parse_hist2(value)
        } else if matches!(
            typename.as_str(),
            "TGraph" | "TGraphErrors" | "TGraphAsymmErrors"
        ) {
            Self::parse_graph(value)
        } else {
            Err(InspectorError::UnsupportedPlot(typename))
        }
    }

    fn draw(
        &self,
        container: &str,
        object: &PlotObject,
        option: &str,
    ) -> InspectorResult<Drawing> {
        let kind = match object {
            PlotObject::Hist1 {
                x_min, x_max, bins, ..
            } => {
                if bins.is_empty() || x_max <= x_min {
                    return Err(invalid("histogram has no drawable bins"));
                }
                let width = (x_max - x_min) / bins.len() as f64;
                let points: Vec<(f64, f64)> = bins
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (x_min + width * (i as f64 + 0.5), *v))
                    .collect();
                let y_max = bins.iter().copied().fold(0.0_f64, f64::max);
                DrawingKind::Series {
                    points,
                    x_bounds: [*x_min, *x_max],
                    y_bounds: [0.0, if y_max > 0.0 { y_max } else { 1.0 }],
                    bars: true,
                }
            }
            PlotObject::Hist2 {
                nx,
                ny,
                x_range,
                y_range,
                cells,
                ..
            } => {
                if *nx == 0 || *ny == 0 {
                    return Err(invalid("histogram has no drawable bins"));
                }
                DrawingKind::Grid {
                    nx: *nx,
                    ny: *ny,
                    cells: cells.clone(),
                    max: cells.iter().copied().fold(0.0_f64, f64::max),
                    x_bounds: *x_range,
                    y_bounds: *y_range,
                }
            }
            PlotObject::Graph { points, .. } => {
                if points.is_empty() {
                    return Err(invalid("graph has no points"));
                }
                DrawingKind::Series {
                    points: points.clone(),
                    x_bounds: bounds(points.iter().map(|p| p.0)),
                    y_bounds: bounds(points.iter().map(|p| p.1)),
                    bars: false,
                }
            }
        };

        Ok(Drawing {
            container: container.to_string(),
            option: option.to_string(),
            title: object.title().to_string(),
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn th1() -> String {
        json!({
            "_typename": "TH1F",
            "fName": "hPed",
            "fTitle": "Pedestals",
            "fXaxis": {"_typename": "TAxis", "fNbins": 4, "fXmin": 0.0, "fXmax": 4.0},
            "fArray": [9, 1, 2, 3, 4, 9]
        })
        .to_string()
    }

    #[test]
    fn parse_th1_drops_under_and_overflow() {
        let obj = RootJsonBackend.parse(&th1()).unwrap();
        match obj {
            PlotObject::Hist1 { bins, title, .. } => {
                assert_eq!(bins, vec![1.0, 2.0, 3.0, 4.0]);
                assert_eq!(title, "Pedestals");
            }
            other => panic!("expected Hist1, got {other:?}"),
        }
    }

    #[test]
    fn draw_th1_uses_bin_centres() {
        let backend = RootJsonBackend;
        let obj = backend.parse(&th1()).unwrap();
        let drawing = backend.draw("message-payload", &obj, "colz").unwrap();
        assert_eq!(drawing.container, "message-payload");
        assert_eq!(drawing.option, "colz");
        match drawing.kind {
            DrawingKind::Series {
                points,
                bars,
                y_bounds,
                ..
            } => {
                assert!(bars);
                assert_eq!(points[0], (0.5, 1.0));
                assert_eq!(points[3], (3.5, 4.0));
                assert_eq!(y_bounds, [0.0, 4.0]);
            }
            other => panic!("expected series, got {other:?}"),
        }
    }

    #[test]
    fn parse_th2_extracts_inner_cells() {
        // nx = 2, ny = 1 → stride 4, 3 rows
        let json = json!({
            "_typename": "TH2D",
            "fXaxis": {"fNbins": 2, "fXmin": 0.0, "fXmax": 2.0},
            "fYaxis": {"fNbins": 1, "fXmin": -1.0, "fXmax": 1.0},
            "fArray": [0, 0, 0, 0,
                       0, 5, 7, 0,
                       0, 0, 0, 0]
        })
        .to_string();
        let backend = RootJsonBackend;
        let obj = backend.parse(&json).unwrap();
        let drawing = backend.draw("c", &obj, "colz").unwrap();
        match drawing.kind {
            DrawingKind::Grid {
                nx, ny, cells, max, ..
            } => {
                assert_eq!((nx, ny), (2, 1));
                assert_eq!(cells, vec![5.0, 7.0]);
                assert_eq!(max, 7.0);
            }
            other => panic!("expected grid, got {other:?}"),
        }
    }

    #[test]
    fn parse_graph_respects_npoints() {
        let json = json!({
            "_typename": "TGraph",
            "fNpoints": 2,
            "fX": [1.0, 2.0, 3.0],
            "fY": [10.0, 20.0, 30.0]
        })
        .to_string();
        let obj = RootJsonBackend.parse(&json).unwrap();
        match obj {
            PlotObject::Graph { points, .. } => assert_eq!(points, vec![(1.0, 10.0), (2.0, 20.0)]),
            other => panic!("expected graph, got {other:?}"),
        }
    }

    #[test]
    fn unsupported_typename_rejected() {
        let err = RootJsonBackend
            .parse(r#"{"_typename": "TTree"}"#)
            .unwrap_err();
        assert!(matches!(err, InspectorError::UnsupportedPlot(t) if t == "TTree"));
    }

    #[test]
    fn missing_typename_rejected() {
        let err = RootJsonBackend.parse(r#"{"fArray": []}"#).unwrap_err();
        assert!(matches!(err, InspectorError::UnsupportedPlot(_)));
    }

    #[test]
    fn short_array_is_invalid() {
        let json = json!({
            "_typename": "TH1I",
            "fXaxis": {"fNbins": 10, "fXmin": 0.0, "fXmax": 1.0},
            "fArray": [1, 2]
        })
        .to_string();
        let err = RootJsonBackend.parse(&json).unwrap_err();
        assert!(matches!(err, InspectorError::InvalidPlot(_)));
    }

    #[test]
    fn huge_bin_count_is_invalid() {
        let json = format!(
            r#"{{"_typename":"TH1F","fXaxis":{{"fNbins":{},"fXmin":0,"fXmax":1}},"fArray":[1,2]}}"#,
            u64::MAX
        );
        let err = RootJsonBackend.parse(&json).unwrap_err();
        assert!(matches!(err, InspectorError::InvalidPlot(_)));
    }

    #[test]
    fn huge_th2_is_invalid() {
        let json = json!({
            "_typename": "TH2F",
            "fXaxis": {"fNbins": 4294967296_u64, "fXmin": 0.0, "fXmax": 1.0},
            "fYaxis": {"fNbins": 4294967296_u64, "fXmin": 0.0, "fXmax": 1.0},
            "fArray": [0, 0, 0, 0]
        })
        .to_string();
        let err = RootJsonBackend.parse(&json).unwrap_err();
        assert!(matches!(err, InspectorError::InvalidPlot(_)));
    }

    #[test]
    fn profile_bins_are_means() {
        let json = json!({
            "_typename": "TProfile",
            "fXaxis": {"fNbins": 3, "fXmin": 0.0, "fXmax": 3.0},
            "fArray": [0, 10, 9, 4, 0],
            "fBinEntries": [0, 2, 3, 0, 0]
        })
        .to_string();
        match RootJsonBackend.parse(&json).unwrap() {
            PlotObject::Hist1 { bins, .. } => assert_eq!(bins, vec![5.0, 3.0, 0.0]),
            other => panic!("expected Hist1, got {other:?}"),
        }
    }

    #[test]
    fn profile_without_entries_is_invalid() {
        let json = json!({
            "_typename": "TProfile",
            "fXaxis": {"fNbins": 1, "fXmin": 0.0, "fXmax": 1.0},
            "fArray": [0, 4, 0]
        })
        .to_string();
        let err = RootJsonBackend.parse(&json).unwrap_err();
        assert!(matches!(err, InspectorError::InvalidPlot(_)));
    }

    #[test]
    fn flat_graph_bounds_padded() {
        assert_eq!(bounds([2.0, 2.0].into_iter()), [1.5, 2.5]);
        assert_eq!(bounds(std::iter::empty()), [0.0, 1.0]);
    }
}
