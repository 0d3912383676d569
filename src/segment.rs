//! Animated segment: geometry targets routed through the transition engine.
//!
//! Hover and value changes arrive as step inputs; smoothing happens here by
//! feeding the freshly derived numeric targets (radius, stroke width,
//! circumference, dash offset, angle) into [`TransitionEngine::observe`].
//! The boolean hover state itself is never animated.

use crate::geometry::{SegmentParams, StrokeCircle};
use crate::transition::{ChannelId, FrameScheduler, TransitionConfig, TransitionEngine};

/// Presentation attributes that ride along unanimated.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SegmentStyle {
    pub color: String,
    /// Paint reference for an optional overlay stroked on top of the outer
    /// circle (e.g. a hatch pattern).
    #[serde(default)]
    pub pattern: Option<String>,
    /// Suppress the inner halo even when the band leaves room for one.
    #[serde(default)]
    pub hide_slice: bool,
}

/// Snapshot of everything a renderer needs to draw one segment.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentDrawable {
    pub color: String,
    /// When set, a second stroke identical to `outer` is drawn with this
    /// paint on top of it.
    pub pattern: Option<String>,
    pub outer: StrokeCircle,
    pub halo: Option<StrokeCircle>,
    /// Rotation of the stroke group about the center, in degrees.
    pub stroke_rotation_deg: f64,
    /// Rotation of the hit-test wedge, in degrees.
    pub wedge_rotation_deg: f64,
    /// Pie-slice hit region path (unrotated, raw geometry).
    pub wedge_path: String,
}

/// Channel ids for the animated properties of one segment.
#[derive(Clone, Copy, Debug)]
struct SegmentChannels {
    angle: ChannelId,
    radius: ChannelId,
    stroke_width: ChannelId,
    circumference: ChannelId,
    dash_offset: ChannelId,
    slice_radius: ChannelId,
    slice_stroke_width: ChannelId,
    slice_circumference: ChannelId,
    slice_dash_offset: ChannelId,
}

/// One donut segment whose visual properties interpolate between states.
#[derive(Clone, Debug)]
pub struct AnimatedSegment {
    style: SegmentStyle,
    params: SegmentParams,
    config: TransitionConfig,
    channels: SegmentChannels,
}

impl AnimatedSegment {
    /// Create the segment with every channel settled at the initial
    /// geometry; nothing animates until the first update.
    pub fn new<S: FrameScheduler>(
        style: SegmentStyle,
        params: SegmentParams,
        config: TransitionConfig,
        engine: &mut TransitionEngine<S>,
    ) -> Self {
        let outer = params.outer_stroke();
        let halo = params.inner_slice().unwrap_or_default();
        let channels = SegmentChannels {
            angle: engine.observe(None, params.angle_deg(), &config),
            radius: engine.observe(None, outer.radius, &config),
            stroke_width: engine.observe(None, outer.stroke_width, &config),
            circumference: engine.observe(None, outer.dash_array, &config),
            dash_offset: engine.observe(None, outer.dash_offset, &config),
            slice_radius: engine.observe(None, halo.radius, &config),
            slice_stroke_width: engine.observe(None, halo.stroke_width, &config),
            slice_circumference: engine.observe(None, halo.dash_array, &config),
            slice_dash_offset: engine.observe(None, halo.dash_offset, &config),
        };
        Self {
            style,
            params,
            config,
            channels,
        }
    }

    pub fn style(&self) -> &SegmentStyle {
        &self.style
    }

    pub fn params(&self) -> SegmentParams {
        self.params
    }

    pub fn is_hovering(&self) -> bool {
        self.params.is_hovering
    }

    /// Retarget every channel to the geometry derived from `params`.
    pub fn update<S: FrameScheduler>(
        &mut self,
        params: SegmentParams,
        engine: &mut TransitionEngine<S>,
    ) {
        self.params = params;
        let outer = params.outer_stroke();
        // A full-width band has no halo; drive its channels to zero so a
        // later width change animates the halo back in from nothing.
        let halo = params.inner_slice().unwrap_or_default();
        let ch = &self.channels;
        engine.observe(Some(ch.angle), params.angle_deg(), &self.config);
        engine.observe(Some(ch.radius), outer.radius, &self.config);
        engine.observe(Some(ch.stroke_width), outer.stroke_width, &self.config);
        engine.observe(Some(ch.circumference), outer.dash_array, &self.config);
        engine.observe(Some(ch.dash_offset), outer.dash_offset, &self.config);
        engine.observe(Some(ch.slice_radius), halo.radius, &self.config);
        engine.observe(Some(ch.slice_stroke_width), halo.stroke_width, &self.config);
        engine.observe(Some(ch.slice_circumference), halo.dash_array, &self.config);
        engine.observe(Some(ch.slice_dash_offset), halo.dash_offset, &self.config);
    }

    /// Pointer enter/leave. The step is smoothed by retargeting the derived
    /// geometry, not by animating the boolean.
    pub fn set_hovering<S: FrameScheduler>(
        &mut self,
        hovering: bool,
        engine: &mut TransitionEngine<S>,
    ) {
        if self.params.is_hovering == hovering {
            return;
        }
        let params = SegmentParams {
            is_hovering: hovering,
            ..self.params
        };
        self.update(params, engine);
    }

    /// Snapshot the animated values into a drawable description.
    pub fn drawable<S: FrameScheduler>(&self, engine: &TransitionEngine<S>) -> SegmentDrawable {
        let ch = &self.channels;
        let angle = engine.value(ch.angle);
        let outer = StrokeCircle {
            radius: engine.value(ch.radius),
            stroke_width: engine.value(ch.stroke_width),
            dash_array: engine.value(ch.circumference),
            dash_offset: engine.value(ch.dash_offset),
        };
        let show_halo =
            !self.style.hide_slice && self.params.normalized_width() < 1.0;
        let halo = show_halo.then(|| StrokeCircle {
            radius: engine.value(ch.slice_radius),
            stroke_width: engine.value(ch.slice_stroke_width),
            dash_array: engine.value(ch.slice_circumference),
            dash_offset: engine.value(ch.slice_dash_offset),
        });
        SegmentDrawable {
            color: self.style.color.clone(),
            pattern: self.style.pattern.clone(),
            outer,
            halo,
            stroke_rotation_deg: -90.0 + angle,
            wedge_rotation_deg: angle,
            wedge_path: self.params.wedge_path(),
        }
    }
}
