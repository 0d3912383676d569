//! Chart-level series aggregation.
//!
//! Turns an ordered list of raw values into per-segment shares (percent) and
//! cumulative rotation offsets (degrees). Items toggled off via the legend
//! keep their slot with an effective value of zero, so their segments animate
//! out instead of snapping away.

use std::collections::BTreeSet;

use crate::error::{ArcwiseError, ArcwiseResult};
use crate::geometry::SegmentParams;

/// One series entry as supplied by the caller.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SeriesItem {
    /// Caller-supplied identity, used for diffing and legend toggling.
    pub key: String,
    /// Raw value, clamped to be non-negative.
    pub value: f64,
    pub color: String,
    #[serde(default)]
    pub pattern: Option<String>,
}

impl SeriesItem {
    pub fn new(key: impl Into<String>, value: f64, color: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.max(0.0),
            color: color.into(),
            pattern: None,
        }
    }
}

/// Chart-wide layout knobs shared by every segment.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChartOptions {
    /// Stroke band thickness as a fraction of the radius.
    pub width_ratio: f64,
    /// Gap between adjacent segments, in degrees.
    pub pad_angle_deg: f64,
    /// Hover depth cue strength, clamped to `[0, 0.25]` at this layer.
    pub hover_scale: f64,
}

impl ChartOptions {
    pub fn new(width_ratio: f64, pad_angle_deg: f64, hover_scale: f64) -> ArcwiseResult<Self> {
        if !(width_ratio.is_finite() && pad_angle_deg.is_finite() && hover_scale.is_finite()) {
            return Err(ArcwiseError::validation("chart options must be finite"));
        }
        Ok(Self {
            width_ratio,
            pad_angle_deg: pad_angle_deg.max(0.0),
            hover_scale: hover_scale.clamp(0.0, 0.25),
        })
    }
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width_ratio: 1.0,
            pad_angle_deg: 0.0,
            hover_scale: 0.05,
        }
    }
}

/// Ordered series with legend toggling state.
#[derive(Clone, Debug, Default)]
pub struct Series {
    items: Vec<SeriesItem>,
    disabled: BTreeSet<String>,
}

impl Series {
    pub fn new(items: Vec<SeriesItem>) -> Self {
        let items = items
            .into_iter()
            .map(|mut item| {
                if !item.value.is_finite() || item.value < 0.0 {
                    item.value = 0.0;
                }
                item
            })
            .collect();
        Self {
            items,
            disabled: BTreeSet::new(),
        }
    }

    pub fn items(&self) -> &[SeriesItem] {
        &self.items
    }

    /// Enable or disable one item by key. Disabled items contribute zero.
    pub fn set_enabled(&mut self, key: &str, enabled: bool) {
        if enabled {
            self.disabled.remove(key);
        } else {
            self.disabled.insert(key.to_string());
        }
    }

    pub fn is_enabled(&self, key: &str) -> bool {
        !self.disabled.contains(key)
    }

    fn effective_value(&self, item: &SeriesItem) -> f64 {
        if self.disabled.contains(&item.key) {
            0.0
        } else {
            item.value
        }
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(|i| self.effective_value(i)).sum()
    }

    /// Share of the whole chart in percent. A zero total yields zero-size
    /// segments rather than NaN.
    pub fn arc_size(&self, value: f64) -> f64 {
        let total = self.total();
        if total <= 0.0 {
            return 0.0;
        }
        value / total * 100.0
    }

    /// Cumulative rotation, in degrees, of the segments before `index`.
    pub fn arc_offset(&self, index: usize) -> f64 {
        let total = self.total();
        if total <= 0.0 {
            return 0.0;
        }
        self.items
            .iter()
            .take(index)
            .map(|i| self.effective_value(i) / total * 360.0)
            .sum()
    }

    /// Per-segment geometry inputs for the whole series, in order.
    #[tracing::instrument(level = "debug", skip_all, fields(items = self.items.len()))]
    pub fn segments(&self, options: &ChartOptions) -> Vec<SegmentParams> {
        let hover_zoom_ratio = options.hover_scale.clamp(0.0, 0.25);
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| SegmentParams {
                value_percent: self.arc_size(self.effective_value(item)),
                width_ratio: options.width_ratio,
                pad_angle_deg: options.pad_angle_deg,
                rotate_deg: self.arc_offset(index),
                hover_zoom_ratio,
                is_hovering: false,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Series {
        Series::new(vec![
            SeriesItem::new("a", 10.0, "#e91e63"),
            SeriesItem::new("b", 30.0, "#2196f3"),
            SeriesItem::new("c", 60.0, "#ffc107"),
        ])
    }

    #[test]
    fn arc_sizes_sum_to_one_hundred() {
        let series = sample();
        let sum: f64 = series
            .items()
            .iter()
            .map(|i| series.arc_size(i.value))
            .sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn offsets_are_cumulative_and_close_the_circle() {
        let series = sample();
        assert_eq!(series.arc_offset(0), 0.0);
        assert!((series.arc_offset(1) - 36.0).abs() < 1e-9);
        assert!((series.arc_offset(2) - 144.0).abs() < 1e-9);
        let last_span = series.arc_size(60.0) / 100.0 * 360.0;
        assert!((series.arc_offset(2) + last_span - 360.0).abs() < 1e-9);
    }

    #[test]
    fn zero_total_yields_zero_sizes_not_nan() {
        let series = Series::new(vec![
            SeriesItem::new("a", 0.0, "red"),
            SeriesItem::new("b", 0.0, "blue"),
        ]);
        assert_eq!(series.arc_size(0.0), 0.0);
        assert_eq!(series.arc_offset(1), 0.0);
        for params in series.segments(&ChartOptions::default()) {
            assert_eq!(params.value_percent, 0.0);
        }
    }

    #[test]
    fn disabled_items_keep_their_slot_at_zero() {
        let mut series = sample();
        series.set_enabled("b", false);
        assert!(!series.is_enabled("b"));
        assert_eq!(series.total(), 70.0);

        let segments = series.segments(&ChartOptions::default());
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1].value_percent, 0.0);
        // Segment c slides up to fill the gap.
        assert!((segments[2].rotate_deg - 10.0 / 70.0 * 360.0).abs() < 1e-9);

        series.set_enabled("b", true);
        assert_eq!(series.total(), 100.0);
    }

    #[test]
    fn negative_and_non_finite_values_are_zeroed() {
        let series = Series::new(vec![
            SeriesItem::new("a", -4.0, "red"),
            SeriesItem {
                key: "b".into(),
                value: f64::NAN,
                color: "blue".into(),
                pattern: None,
            },
            SeriesItem::new("c", 5.0, "green"),
        ]);
        assert_eq!(series.total(), 5.0);
    }

    #[test]
    fn options_clamp_hover_scale() {
        let options = ChartOptions::new(0.5, 2.0, 0.9).unwrap();
        assert_eq!(options.hover_scale, 0.25);
        assert!(ChartOptions::new(f64::INFINITY, 0.0, 0.0).is_err());
    }

    #[test]
    fn items_round_trip_through_json() {
        let item = SeriesItem {
            key: "cpu".into(),
            value: 12.5,
            color: "#f44336".into(),
            pattern: Some("url(#hatch)".into()),
        };
        let json = serde_json::to_string(&item).unwrap();
        let back: SeriesItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
