//! Utility functions for colors, geometry, and arrowhead calculations.
//!
//! This module provides:
//! - [`Point`] and [`Bounds`], the coordinate types shared by every element
//! - Segment distance and proximity predicates used by hit-testing
//! - Arrowhead geometry calculations
//! - Name-to-color mapping for the configuration file and command scripts

use crate::draw::{Color, color::*};
use serde::{Deserialize, Serialize};

/// A position on the canvas, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Squared distance, for comparisons that don't need the root.
    pub fn distance_sq(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

// ============================================================================
// Segment Geometry
// ============================================================================

/// Returns true when `point` is within `tolerance` of the segment `start`-`end`.
///
/// Two conditions must hold:
/// - the perpendicular distance to the infinite line is below `tolerance`
/// - the sum of distances to both endpoints is at most the segment length plus
///   `tolerance`, which rejects collinear points far past either end
pub fn is_point_close_to_line(start: Point, end: Point, point: Point, tolerance: f64) -> bool {
    let line_length = start.distance(end);
    if line_length == 0.0 {
        return point.distance(start) < tolerance;
    }

    let dist_to_start = point.distance(start);
    let dist_to_end = point.distance(end);
    let dist_to_line = ((end.y - start.y) * point.x - (end.x - start.x) * point.y
        + end.x * start.y
        - end.y * start.x)
        .abs()
        / line_length;

    dist_to_line < tolerance && dist_to_start + dist_to_end <= line_length + tolerance
}

// ============================================================================
// Arrowhead Geometry
// ============================================================================

/// Angle between each arrowhead leg and the shaft (30°).
pub const ARROWHEAD_ANGLE: f64 = std::f64::consts::PI / 6.0;

/// Calculates the two arrowhead leg endpoints for an arrow pointing from `start` to `tip`.
///
/// With `angle = atan2(dy, dx)` of the shaft, each leg ends at
/// `tip - length * (cos(angle ∓ π/6), sin(angle ∓ π/6))`. A zero-length shaft yields
/// legs pointing back along the positive x axis, matching `atan2(0, 0) == 0`.
///
/// # Returns
/// Array `[left, right]` where `left` uses `angle - π/6` and `right` uses `angle + π/6`.
pub fn arrowhead_legs(start: Point, tip: Point, length: f64) -> [Point; 2] {
    let angle = (tip.y - start.y).atan2(tip.x - start.x);

    let left = Point::new(
        tip.x - length * (angle - ARROWHEAD_ANGLE).cos(),
        tip.y - length * (angle - ARROWHEAD_ANGLE).sin(),
    );
    let right = Point::new(
        tip.x - length * (angle + ARROWHEAD_ANGLE).cos(),
        tip.y - length * (angle + ARROWHEAD_ANGLE).sin(),
    );

    [left, right]
}

// ============================================================================
// Bounds
// ============================================================================

/// Axis-aligned rectangle in canvas units, `min` inclusive top-left, `max` bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Builds normalized bounds from any two opposite corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Smallest bounds covering every point, or `None` for an empty slice.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = *points.first()?;
        Some(points[1..].iter().fold(
            Self {
                min: first,
                max: first,
            },
            |acc, p| Self {
                min: Point::new(acc.min.x.min(p.x), acc.min.y.min(p.y)),
                max: Point::new(acc.max.x.max(p.x), acc.max.y.max(p.y)),
            },
        ))
    }

    /// Grows the bounds evenly in all directions.
    pub fn inflate(self, amount: f64) -> Self {
        Self {
            min: Point::new(self.min.x - amount, self.min.y - amount),
            max: Point::new(self.max.x + amount, self.max.y + amount),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: Point) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y)
    }

    /// The four edges in drawing order: top, right, bottom, left.
    pub fn edges(&self) -> [(Point, Point); 4] {
        let top_right = Point::new(self.max.x, self.min.y);
        let bottom_left = Point::new(self.min.x, self.max.y);
        [
            (self.min, top_right),
            (top_right, self.max),
            (self.max, bottom_left),
            (bottom_left, self.min),
        ]
    }
}

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps palette names to Color values.
///
/// Used by the configuration system and command scripts.
///
/// # Supported Names (case-insensitive)
/// - "black", "red", "green", "blue", "yellow", "purple", "orange", "pink", "white"
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.trim().to_lowercase().as_str() {
        "black" => Some(BLACK),
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "purple" => Some(PURPLE),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        _ => None,
    }
}
