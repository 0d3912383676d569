#![forbid(unsafe_code)]

//! Geometry and animation core for stroked donut/pie charts.
//!
//! Three independent pieces: a per-scalar transition engine ([`transition`]),
//! a pure arc geometry calculator ([`geometry`]), and a rounded arc SVG path
//! builder ([`arc_path`]). [`series`] aggregates raw values into per-segment
//! shares and [`segment`] wires geometry targets into the engine so hover and
//! value changes animate smoothly.

pub mod arc_path;
pub mod ease;
pub mod error;
pub mod geometry;
pub mod segment;
pub mod series;
pub mod transition;

pub use arc_path::{PathToken, path_string, rounded_arc, rounded_arc_path};
pub use ease::Ease;
pub use error::{ArcwiseError, ArcwiseResult};
pub use geometry::{SegmentParams, StrokeCircle};
pub use segment::{AnimatedSegment, SegmentDrawable, SegmentStyle};
pub use series::{ChartOptions, Series, SeriesItem};
pub use transition::{
    ChannelId, FrameScheduler, FrameToken, ManualScheduler, Speed, TransitionConfig,
    TransitionEngine,
};
