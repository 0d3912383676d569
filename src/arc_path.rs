//! Rounded arc SVG path builder.
//!
//! Produces filled donut-segment outlines with rounded end caps as a token
//! sequence serializable to a single `d` attribute. Pure functions of their
//! inputs; angles use the SVG screen convention (0 degrees at 12 o'clock,
//! clockwise, y axis down).

use std::f64::consts::{PI, TAU};
use std::fmt;
use std::fmt::Write as _;

use kurbo::Point;

/// One SVG path drawing command.
///
/// Arcs are always circular (`rx == ry`) with zero x-axis rotation, so only
/// the radius and the two disambiguation flags are carried.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathToken {
    MoveTo(Point),
    Arc {
        radius: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    LineTo(Point),
    Close,
}

impl fmt::Display for PathToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::MoveTo(p) => write!(f, "M {} {}", fmt_coord(p.x), fmt_coord(p.y)),
            Self::Arc {
                radius,
                large_arc,
                sweep,
                to,
            } => write!(
                f,
                "A {r} {r} 0 {la} {sw} {x} {y}",
                r = fmt_coord(radius),
                la = large_arc as u8,
                sw = sweep as u8,
                x = fmt_coord(to.x),
                y = fmt_coord(to.y),
            ),
            Self::LineTo(p) => write!(f, "L {} {}", fmt_coord(p.x), fmt_coord(p.y)),
            Self::Close => write!(f, "Z"),
        }
    }
}

/// Serialize a token sequence into a single path string.
pub fn path_string(tokens: &[PathToken]) -> String {
    let mut out = String::new();
    for token in tokens {
        if !out.is_empty() {
            out.push(' ');
        }
        // Writing into a String is infallible.
        let _ = write!(out, "{token}");
    }
    out
}

/// Format a coordinate rounded to three decimals with trailing zeros trimmed.
fn fmt_coord(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut r = (v * 1000.0).round() / 1000.0;
    if r.abs() < 0.0005 {
        r = 0.0;
    }
    let mut s = format!("{r:.3}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" { "0".to_string() } else { s }
}

/// Point on the circle of `radius` around `center` at `angle_deg`, measured
/// clockwise from 12 o'clock.
fn point_on_arc(center: Point, radius: f64, angle_deg: f64) -> Point {
    let radians = (angle_deg - 90.0).to_radians();
    Point::new(
        center.x + radius * radians.cos(),
        center.y + radius * radians.sin(),
    )
}

/// Angular footprint, in degrees, of a cap of `rounding` radius sitting on a
/// circle of `radius`. Zero when either is degenerate so thin or slice-shaped
/// segments never produce NaN coordinates.
fn footprint_deg(rounding: f64, radius: f64) -> f64 {
    if rounding <= 0.0 || radius <= 0.0 {
        return 0.0;
    }
    360.0 * (rounding / (TAU * radius))
}

/// A full ring as two concentric circles, each drawn with two half-circle
/// arcs. Rounding is meaningless for a closed ring.
fn circle_tokens(center: Point, radius: f64, width: f64) -> Vec<PathToken> {
    let inner = (radius - width).max(0.0);
    let east_west = |r: f64| {
        (
            Point::new(center.x - r, center.y),
            Point::new(center.x + r, center.y),
        )
    };
    let (o_west, o_east) = east_west(radius);
    let (i_west, i_east) = east_west(inner);
    vec![
        PathToken::MoveTo(o_west),
        PathToken::Arc {
            radius,
            large_arc: true,
            sweep: false,
            to: o_east,
        },
        PathToken::Arc {
            radius,
            large_arc: true,
            sweep: false,
            to: o_west,
        },
        PathToken::MoveTo(i_west),
        PathToken::Arc {
            radius: inner,
            large_arc: true,
            sweep: false,
            to: i_east,
        },
        PathToken::Arc {
            radius: inner,
            large_arc: true,
            sweep: false,
            to: i_west,
        },
        PathToken::Close,
    ]
}

/// Build the outline of a donut segment with rounded end caps.
///
/// `radius` is the outer radius, `width` the stroke band thickness and
/// `rounding` the requested cap corner radius. The rounding is clamped to
/// half the band and shrunk further when its angular footprint would exceed
/// the segment's span, so caps never cross on angularly thin segments. A
/// span of exactly 360 degrees degenerates to a plain ring.
pub fn rounded_arc(
    center: Point,
    radius: f64,
    start_deg: f64,
    end_deg: f64,
    width: f64,
    rounding: f64,
) -> Vec<PathToken> {
    let radius = radius.max(0.0);
    let width = width.max(0.0);
    let span = (end_deg - start_deg).abs();
    if span == 360.0 {
        return circle_tokens(center, radius, width);
    }

    let inner_r = (radius - width).max(0.0);
    let mut rounding = rounding.max(0.0).min(width / 2.0);
    if inner_r <= 0.0 || 360.0 * (rounding / (PI * inner_r)) > span {
        rounding = span / 360.0 * inner_r * PI;
    }

    // Butt corner points sit on circles pulled in by the rounding radius.
    let inner_r2 = inner_r + rounding;
    let outer_r2 = radius - rounding;

    let o_start = point_on_arc(center, outer_r2, start_deg);
    let o_end = point_on_arc(center, outer_r2, end_deg);
    let i_start = point_on_arc(center, inner_r2, start_deg);
    let i_end = point_on_arc(center, inner_r2, end_deg);

    // Main arcs give up the caps' angular footprint at each end.
    let i_section = footprint_deg(rounding, inner_r);
    let o_section = footprint_deg(rounding, radius);

    let o_arc_start = point_on_arc(center, radius, start_deg + o_section);
    let o_arc_end = point_on_arc(center, radius, end_deg - o_section);
    let i_arc_start = point_on_arc(center, inner_r, start_deg + i_section);
    let i_arc_end = point_on_arc(center, inner_r, end_deg - i_section);

    // The large-arc flag must come from the adjusted span, otherwise a >180
    // degree segment with caps renders the short way around.
    let outer_large = span > 180.0 + 2.0 * o_section;
    let inner_large = span > 180.0 + 2.0 * i_section;

    vec![
        PathToken::MoveTo(o_start),
        PathToken::Arc {
            radius: rounding,
            large_arc: false,
            sweep: true,
            to: o_arc_start,
        },
        PathToken::Arc {
            radius,
            large_arc: outer_large,
            sweep: true,
            to: o_arc_end,
        },
        PathToken::Arc {
            radius: rounding,
            large_arc: false,
            sweep: true,
            to: o_end,
        },
        PathToken::LineTo(i_end),
        PathToken::Arc {
            radius: rounding,
            large_arc: false,
            sweep: true,
            to: i_arc_end,
        },
        PathToken::Arc {
            radius: inner_r,
            large_arc: inner_large,
            sweep: false,
            to: i_arc_start,
        },
        PathToken::Arc {
            radius: rounding,
            large_arc: false,
            sweep: true,
            to: i_start,
        },
        PathToken::Close,
    ]
}

/// [`rounded_arc`] serialized to a path string.
pub fn rounded_arc_path(
    center: Point,
    radius: f64,
    start_deg: f64,
    end_deg: f64,
    width: f64,
    rounding: f64,
) -> String {
    path_string(&rounded_arc(
        center, radius, start_deg, end_deg, width, rounding,
    ))
}
