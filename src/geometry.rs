//! Arc geometry calculator.
//!
//! Converts a segment's logical inputs (value share, band width, pad angle,
//! hover state) into the stroke-circle parameters that render a partial arc
//! via the dash-offset technique: the circle is stroked with a dash array
//! equal to its full circumference and the untraveled portion is hidden by
//! the dash offset. Everything here is pure and side-effect free; invalid
//! numeric inputs are clamped, never rejected.
//!
//! The coordinate space is a 100x100 unit square centered on (50, 50).

use std::f64::consts::TAU;

use kurbo::Point;

use crate::arc_path::{PathToken, path_string};

/// Center of the unit viewBox.
pub const CENTER: Point = Point::new(50.0, 50.0);

/// One stroked-circle drawing primitive.
///
/// `dash_array` always equals the circle's full circumference; `dash_offset`
/// hides the `(100 - value)%` of it that the segment does not cover.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrokeCircle {
    pub radius: f64,
    pub stroke_width: f64,
    pub dash_array: f64,
    pub dash_offset: f64,
}

/// Logical inputs for one segment, as supplied by the chart aggregation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SegmentParams {
    /// Share of the whole chart, in percent.
    pub value_percent: f64,
    /// Stroke band thickness as a fraction of the radius: 1 is a solid pie
    /// slice, values below 1 leave a hole.
    pub width_ratio: f64,
    /// Angular gap reserved between adjacent segments, in degrees.
    pub pad_angle_deg: f64,
    /// Cumulative rotation of the segments before this one, in degrees.
    pub rotate_deg: f64,
    /// How much non-hovered segments shrink while a sibling is hovered.
    pub hover_zoom_ratio: f64,
    pub is_hovering: bool,
}

impl Default for SegmentParams {
    fn default() -> Self {
        Self {
            value_percent: 0.0,
            width_ratio: 1.0,
            pad_angle_deg: 0.0,
            rotate_deg: 0.0,
            hover_zoom_ratio: 0.05,
            is_hovering: false,
        }
    }
}

impl SegmentParams {
    /// Value share with the pad angle's cut reserved, clamped to
    /// `[0, 99.99]`. A perfect 100 would make the dash-offset trick
    /// ambiguous (full circle vs. empty), hence the 99.99 ceiling.
    pub fn normalized_value(&self) -> f64 {
        (self.value_percent - 100.0 * self.pad_angle_deg / 360.0).clamp(0.0, 99.99)
    }

    pub fn normalized_width(&self) -> f64 {
        self.width_ratio.clamp(0.0, 1.0)
    }

    /// Depth cue: while a sibling is hovered every non-hovered segment is
    /// shrunk by the zoom ratio, rather than the hovered one growing.
    fn hover_factor(&self) -> f64 {
        if self.is_hovering {
            1.0
        } else {
            1.0 - self.hover_zoom_ratio.clamp(0.0, 0.5)
        }
    }

    /// Rotation target for the segment, in degrees: cumulative offset plus
    /// half the pad angle so the visible gap is centered on the boundary.
    pub fn angle_deg(&self) -> f64 {
        self.rotate_deg + self.pad_angle_deg / 2.0
    }

    /// Rotation applied to the stroke group so 0% starts at 12 o'clock.
    pub fn stroke_rotation_deg(&self) -> f64 {
        -90.0 + self.angle_deg()
    }

    /// The main stroke circle for this segment.
    pub fn outer_stroke(&self) -> StrokeCircle {
        let width = self.normalized_width();
        let radius = 50.0 * (1.0 - width / 2.0) * self.hover_factor();
        // Full circle diameter after hover scaling; the band takes its
        // width_ratio share of it.
        let diameter = radius / (1.0 - width / 2.0);
        self.stroke_circle(radius, width * diameter)
    }

    /// Faint half-radius halo drawn inside segments that are not a full pie
    /// slice. `None` once the band fills the whole radius.
    pub fn inner_slice(&self) -> Option<StrokeCircle> {
        let slice_width = 1.0 - self.normalized_width();
        if slice_width <= 0.0 {
            return None;
        }
        let radius = 50.0 * slice_width / 2.0 * self.hover_factor();
        let diameter = radius / (slice_width / 2.0);
        Some(self.stroke_circle(radius, slice_width * diameter))
    }

    fn stroke_circle(&self, radius: f64, stroke_width: f64) -> StrokeCircle {
        let circumference = TAU * radius;
        StrokeCircle {
            radius,
            stroke_width,
            dash_array: circumference,
            dash_offset: (100.0 - self.normalized_value()) / 100.0 * circumference,
        }
    }

    /// Pie-slice hit region from the center to the segment's two arc
    /// endpoints on the r=50 circle, independent of how thin the stroke band
    /// is, so pointer events target the visual slice rather than the ring.
    pub fn wedge_tokens(&self) -> Vec<PathToken> {
        let value = self.normalized_value();
        let radians = ((360.0 * (-value / 100.0)) + 90.0).to_radians();
        let tip = Point::new(
            CENTER.x + 50.0 * radians.cos(),
            CENTER.y - 50.0 * radians.sin(),
        );
        vec![
            PathToken::MoveTo(Point::new(CENTER.x, 0.0)),
            PathToken::Arc {
                radius: 50.0,
                large_arc: value > 50.0,
                sweep: true,
                to: tip,
            },
            PathToken::LineTo(CENTER),
        ]
    }

    /// [`Self::wedge_tokens`] serialized to a path string.
    pub fn wedge_path(&self) -> String {
        path_string(&self.wedge_tokens())
    }
}
