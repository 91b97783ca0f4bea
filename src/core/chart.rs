//! Chart requests and the series data extracted from them.

use serde_json::Value;

use crate::api::ChartPayload;
use crate::core::dataset::{cell_text, TabularDataset};

/// How a series is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
}

impl ChartKind {
    /// Map the backend's `type` string. Exactly `"line"` selects a line
    /// chart; any other value, or none, falls back to bars.
    pub fn from_wire(kind: Option<&str>) -> Self {
        match kind {
            Some("line") => ChartKind::Line,
            _ => ChartKind::Bar,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
        }
    }
}

/// A fully resolved chart request: the rows to plot, which fields supply
/// the axes, and the drawing style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSpec {
    pub data: TabularDataset,
    pub x_key: Option<String>,
    pub y_key: Option<String>,
    pub kind: ChartKind,
}

impl ChartSpec {
    /// Resolve a wire payload against the reply it arrived with. A chart
    /// that carries its own rows uses them; otherwise it plots the reply's
    /// dataset; failing both, it is empty and renders as nothing.
    pub fn from_payload(payload: &ChartPayload, reply_dataset: Option<&TabularDataset>) -> Self {
        let data = payload
            .data
            .clone()
            .or_else(|| reply_dataset.cloned())
            .unwrap_or_default();
        ChartSpec {
            data,
            x_key: payload.x_key.clone(),
            y_key: payload.y_key.clone(),
            kind: ChartKind::from_wire(payload.kind.as_deref()),
        }
    }

    /// Both axis keys, when both are present and non-empty. A chart without
    /// them cannot be plotted and gets a notice instead.
    pub fn axis_keys(&self) -> Option<(&str, &str)> {
        match (self.x_key.as_deref(), self.y_key.as_deref()) {
            (Some(x), Some(y)) if !x.is_empty() && !y.is_empty() => Some((x, y)),
            _ => None,
        }
    }

    /// Extract the plottable series, or `None` when axis keys are missing.
    ///
    /// Extraction is lenient the same way the table is: a record without
    /// the x field gets a blank label, and a y value that is absent or not
    /// numeric plots as zero.
    pub fn series(&self) -> Option<ChartSeries> {
        let (x_key, y_key) = self.axis_keys()?;
        let mut labels = Vec::with_capacity(self.data.len());
        let mut values = Vec::with_capacity(self.data.len());
        for record in self.data.records() {
            labels.push(cell_text(record.get(x_key)));
            values.push(record.get(y_key).and_then(Value::as_f64).unwrap_or(0.0));
        }
        Some(ChartSeries { labels, values })
    }
}

/// Labels and numeric values pulled out of a dataset, index-aligned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    /// Bar heights for the terminal bar widget, which takes unsigned
    /// integers. Negative values clamp to zero, fractions round.
    pub fn bar_points(&self) -> Vec<(String, u64)> {
        self.labels
            .iter()
            .zip(&self.values)
            .map(|(label, value)| (label.clone(), value.max(0.0).round() as u64))
            .collect()
    }

    /// Line chart points, plotted by record index.
    pub fn line_points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(index, value)| (index as f64, *value))
            .collect()
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        let last = self.values.len().saturating_sub(1).max(1);
        [0.0, last as f64]
    }

    /// Value-axis bounds with headroom so the plot never hugs the frame.
    pub fn y_bounds(&self) -> [f64; 2] {
        let mut min = f64::MAX;
        let mut max = f64::MIN;
        for value in &self.values {
            min = min.min(*value);
            max = max.max(*value);
        }
        if self.values.is_empty() {
            return [0.0, 1.0];
        }
        let pad = (max - min).max(1.0) * 0.15;
        [min - pad, max + pad]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(value: serde_json::Value) -> TabularDataset {
        serde_json::from_value(value).unwrap()
    }

    fn spec_for(value: serde_json::Value, x: &str, y: &str, kind: ChartKind) -> ChartSpec {
        ChartSpec {
            data: rows(value),
            x_key: Some(x.to_string()),
            y_key: Some(y.to_string()),
            kind,
        }
    }

    #[test]
    fn test_kind_from_wire() {
        assert_eq!(ChartKind::from_wire(Some("line")), ChartKind::Line);
        assert_eq!(ChartKind::from_wire(Some("bar")), ChartKind::Bar);
        assert_eq!(ChartKind::from_wire(Some("pie")), ChartKind::Bar);
        assert_eq!(ChartKind::from_wire(None), ChartKind::Bar);
    }

    #[test]
    fn test_payload_with_own_data_keeps_it() {
        let payload = ChartPayload {
            data: Some(rows(json!([{"m": "Jan", "v": 1}]))),
            x_key: Some("m".to_string()),
            y_key: Some("v".to_string()),
            kind: None,
        };
        let reply_rows = rows(json!([{"other": 9}]));
        let spec = ChartSpec::from_payload(&payload, Some(&reply_rows));
        assert_eq!(spec.data.columns(), vec!["m", "v"]);
    }

    #[test]
    fn test_payload_without_data_borrows_reply_dataset() {
        let payload = ChartPayload {
            data: None,
            x_key: Some("account_name".to_string()),
            y_key: Some("revenue".to_string()),
            kind: Some("bar".to_string()),
        };
        let reply_rows = rows(json!([{"account_name": "Acme", "revenue": 100}]));
        let spec = ChartSpec::from_payload(&payload, Some(&reply_rows));
        assert_eq!(spec.data.len(), 1);
        assert_eq!(spec.kind, ChartKind::Bar);
    }

    #[test]
    fn test_axis_keys_require_both_non_empty() {
        let mut spec = spec_for(json!([]), "x", "y", ChartKind::Bar);
        assert_eq!(spec.axis_keys(), Some(("x", "y")));
        spec.y_key = None;
        assert_eq!(spec.axis_keys(), None);
        spec.y_key = Some(String::new());
        assert_eq!(spec.axis_keys(), None);
    }

    #[test]
    fn test_series_missing_axis_keys_is_none() {
        let spec = ChartSpec {
            data: rows(json!([{"a": 1}])),
            x_key: None,
            y_key: Some("a".to_string()),
            kind: ChartKind::Bar,
        };
        assert!(spec.series().is_none());
    }

    #[test]
    fn test_series_extraction_is_lenient() {
        let spec = spec_for(
            json!([
                {"month": "Jan", "total": 10.0},
                {"total": "not a number"},
                {"month": "Mar"}
            ]),
            "month",
            "total",
            ChartKind::Line,
        );
        let series = spec.series().unwrap();
        assert_eq!(series.labels, vec!["Jan", "", "Mar"]);
        assert_eq!(series.values, vec![10.0, 0.0, 0.0]);
    }

    #[test]
    fn test_bar_points_clamp_and_round() {
        let series = ChartSeries {
            labels: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            values: vec![-5.0, 2.4, 2.5],
        };
        let points = series.bar_points();
        assert_eq!(points[0].1, 0);
        assert_eq!(points[1].1, 2);
        assert_eq!(points[2].1, 3);
    }

    #[test]
    fn test_line_points_use_record_index() {
        let series = ChartSeries {
            labels: vec!["Jan".to_string(), "Feb".to_string()],
            values: vec![10.0, 20.0],
        };
        assert_eq!(series.line_points(), vec![(0.0, 10.0), (1.0, 20.0)]);
        assert_eq!(series.x_bounds(), [0.0, 1.0]);
    }

    #[test]
    fn test_y_bounds_add_headroom() {
        let series = ChartSeries {
            labels: vec![String::new(), String::new()],
            values: vec![0.0, 100.0],
        };
        let [low, high] = series.y_bounds();
        assert!(low < 0.0);
        assert!(high > 100.0);
    }

    #[test]
    fn test_y_bounds_flat_series_still_has_span() {
        let series = ChartSeries {
            labels: vec![String::new()],
            values: vec![50.0],
        };
        let [low, high] = series.y_bounds();
        assert!(high > low);
    }
}
