//! Freehand stroke outlines.
//!
//! Converts the raw pointer samples of a brush stroke into a closed outline polygon
//! with pressure-like width variation. The pipeline has two passes:
//! 1. [`stroke_points`] streamlines the input and annotates each sample with its
//!    direction vector and running length.
//! 2. [`outline_points`] offsets each sample left and right by a radius derived from
//!    simulated pressure, adds round caps and rounds sharp corners.
//!
//! [`svg_path`] turns the polygon into SVG path data that a renderer can fill.

use crate::util::Point;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Slightly more than π so that rotated cap points overlap instead of leaving a seam.
const FIXED_PI: f64 = PI + 0.0001;

/// How quickly simulated pressure follows pointer speed.
const RATE_OF_PRESSURE_CHANGE: f64 = 0.275;

/// Pressure assumed for every sample (pointer events carry none).
const DEFAULT_PRESSURE: f64 = 0.5;

/// Taper and cap settings for one end of a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StrokeEnd {
    /// Length over which the stroke narrows to a point (0 = no taper)
    #[serde(default)]
    pub taper: f64,
    /// Round cap when not tapered
    #[serde(default = "default_cap")]
    pub cap: bool,
}

impl Default for StrokeEnd {
    fn default() -> Self {
        Self {
            taper: 0.0,
            cap: default_cap(),
        }
    }
}

fn default_cap() -> bool {
    true
}

/// Parameters of the stroke-to-outline conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeOptions {
    /// Base diameter of the stroke
    pub size: f64,
    /// How much pressure narrows the stroke (0 = constant width)
    pub thinning: f64,
    /// Minimum spacing between outline points, as a fraction of size
    pub smoothing: f64,
    /// How strongly each sample is pulled toward the previous one (0..1)
    pub streamline: f64,
    /// Derive pressure from pointer speed
    pub simulate_pressure: bool,
    pub start: StrokeEnd,
    pub end: StrokeEnd,
    /// The stroke is complete: the final sample is used as-is
    pub last: bool,
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self {
            size: 16.0,
            thinning: 0.5,
            smoothing: 0.5,
            streamline: 0.5,
            simulate_pressure: true,
            start: StrokeEnd::default(),
            end: StrokeEnd::default(),
            last: false,
        }
    }
}

/// A streamlined sample annotated for outline construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokePoint {
    pub point: Point,
    pub pressure: f64,
    /// Unit vector pointing back toward the previous sample
    pub vector: Point,
    /// Distance from the previous sample
    pub distance: f64,
    /// Distance along the stroke from the first sample
    pub running_length: f64,
}

// ============================================================================
// Vector helpers
// ============================================================================

fn add(a: Point, b: Point) -> Point {
    Point::new(a.x + b.x, a.y + b.y)
}

fn sub(a: Point, b: Point) -> Point {
    Point::new(a.x - b.x, a.y - b.y)
}

fn mul(a: Point, n: f64) -> Point {
    Point::new(a.x * n, a.y * n)
}

fn neg(a: Point) -> Point {
    Point::new(-a.x, -a.y)
}

/// Perpendicular (rotated a quarter turn).
fn per(a: Point) -> Point {
    Point::new(a.y, -a.x)
}

fn dot(a: Point, b: Point) -> f64 {
    a.x * b.x + a.y * b.y
}

fn unit(a: Point) -> Point {
    let len = a.x.hypot(a.y);
    if len == 0.0 {
        Point::default()
    } else {
        Point::new(a.x / len, a.y / len)
    }
}

fn lerp(a: Point, b: Point, t: f64) -> Point {
    add(a, mul(sub(b, a), t))
}

fn project(a: Point, direction: Point, distance: f64) -> Point {
    add(a, mul(direction, distance))
}

fn rotate_around(a: Point, center: Point, radians: f64) -> Point {
    let (s, c) = radians.sin_cos();
    let px = a.x - center.x;
    let py = a.y - center.y;
    Point::new(px * c - py * s + center.x, px * s + py * c + center.y)
}

fn stroke_radius(size: f64, thinning: f64, pressure: f64) -> f64 {
    size * (0.5 - thinning * (0.5 - pressure))
}

fn simulated_pressure(previous: f64, distance: f64, size: f64) -> f64 {
    let speed = (distance / size).min(1.0);
    let rate = (1.0 - speed).min(1.0);
    (previous + (rate - previous) * (speed * RATE_OF_PRESSURE_CHANGE)).min(1.0)
}

// ============================================================================
// Passes
// ============================================================================

/// Streamlines raw samples and annotates them with vectors and running length.
pub fn stroke_points(input: &[Point], options: &StrokeOptions) -> Vec<StrokePoint> {
    if input.is_empty() {
        return Vec::new();
    }

    let t = 0.15 + (1.0 - options.streamline) * 0.85;
    let mut pts: Vec<Point> = input.to_vec();

    // Two samples give too little to streamline against; interpolate between them.
    if pts.len() == 2 {
        let last = pts[1];
        pts.truncate(1);
        for i in 1..5 {
            pts.push(lerp(pts[0], last, f64::from(i) / 4.0));
        }
    }
    if pts.len() == 1 {
        pts.push(add(pts[0], Point::new(1.0, 1.0)));
    }

    let mut result = vec![StrokePoint {
        point: pts[0],
        pressure: DEFAULT_PRESSURE,
        vector: Point::new(1.0, 1.0),
        distance: 0.0,
        running_length: 0.0,
    }];

    let mut reached_minimum_length = false;
    let mut running_length = 0.0;
    let mut prev = result[0];
    let max = pts.len() - 1;

    for (i, &sample) in pts.iter().enumerate().skip(1) {
        let point = if options.last && i == max {
            sample
        } else {
            lerp(prev.point, sample, t)
        };

        if point == prev.point {
            continue;
        }

        let distance = point.distance(prev.point);
        running_length += distance;

        if i < max && !reached_minimum_length {
            if running_length < options.size {
                continue;
            }
            reached_minimum_length = true;
        }

        prev = StrokePoint {
            point,
            pressure: DEFAULT_PRESSURE,
            vector: unit(sub(prev.point, point)),
            distance,
            running_length,
        };
        result.push(prev);
    }

    result[0].vector = result.get(1).map_or(Point::default(), |p| p.vector);
    result
}

/// Builds the closed outline polygon around annotated stroke points.
pub fn outline_points(points: &[StrokePoint], options: &StrokeOptions) -> Vec<Point> {
    let size = options.size;
    if points.is_empty() || size <= 0.0 {
        return Vec::new();
    }

    let len = points.len();
    let total_length = points[len - 1].running_length;
    let taper_start = options.start.taper;
    let taper_end = options.end.taper;
    let min_distance = (size * options.smoothing).powi(2);

    let mut left_pts: Vec<Point> = Vec::new();
    let mut right_pts: Vec<Point> = Vec::new();

    let mut prev_pressure = points.iter().take(10).fold(points[0].pressure, |acc, curr| {
        let pressure = if options.simulate_pressure {
            simulated_pressure(acc, curr.distance, size)
        } else {
            curr.pressure
        };
        (acc + pressure) / 2.0
    });

    let mut radius = stroke_radius(size, options.thinning, points[len - 1].pressure);
    let mut first_radius: Option<f64> = None;
    let mut prev_vector = points[0].vector;
    let mut pl = points[0].point;
    let mut pr = pl;
    let mut tl = pl;
    let mut tr = pr;
    let mut prev_was_sharp_corner = false;

    for i in 0..len {
        let StrokePoint {
            point,
            mut pressure,
            vector,
            distance,
            running_length,
        } = points[i];

        // Skip samples inside the final few units; the end cap covers them.
        if i < len - 1 && total_length - running_length < 3.0 {
            continue;
        }

        if options.thinning != 0.0 {
            if options.simulate_pressure {
                pressure = simulated_pressure(prev_pressure, distance, size);
            }
            radius = stroke_radius(size, options.thinning, pressure);
        } else {
            radius = size / 2.0;
        }

        if first_radius.is_none() {
            first_radius = Some(radius);
        }

        let ts = if running_length < taper_start {
            running_length / taper_start
        } else {
            1.0
        };
        let te = if total_length - running_length < taper_end {
            (total_length - running_length) / taper_end
        } else {
            1.0
        };
        radius = (radius * ts.min(te)).max(0.01);

        let next_vector = if i < len - 1 {
            points[i + 1].vector
        } else {
            points[i].vector
        };
        let next_dpr = if i < len - 1 {
            dot(vector, next_vector)
        } else {
            1.0
        };
        let prev_dpr = dot(vector, prev_vector);

        let is_sharp_corner = prev_dpr < 0.0 && !prev_was_sharp_corner;
        let next_is_sharp_corner = next_dpr < 0.0;

        if is_sharp_corner || next_is_sharp_corner {
            // Round the corner with a half circle on each side.
            let offset = mul(per(prev_vector), radius);
            let step = 1.0 / 13.0;
            let mut t = 0.0;
            while t <= 1.0 {
                tl = rotate_around(sub(point, offset), point, FIXED_PI * t);
                left_pts.push(tl);
                tr = rotate_around(add(point, offset), point, FIXED_PI * -t);
                right_pts.push(tr);
                t += step;
            }
            pl = tl;
            pr = tr;
            if next_is_sharp_corner {
                prev_was_sharp_corner = true;
            }
            continue;
        }

        prev_was_sharp_corner = false;

        if i == len - 1 {
            let offset = mul(per(vector), radius);
            left_pts.push(sub(point, offset));
            right_pts.push(add(point, offset));
            continue;
        }

        let offset = mul(per(lerp(next_vector, vector, next_dpr)), radius);

        tl = sub(point, offset);
        if i <= 1 || pl.distance_sq(tl) > min_distance {
            left_pts.push(tl);
            pl = tl;
        }

        tr = add(point, offset);
        if i <= 1 || pr.distance_sq(tr) > min_distance {
            right_pts.push(tr);
            pr = tr;
        }

        prev_pressure = pressure;
        prev_vector = vector;
    }

    let first_point = points[0].point;
    let last_point = if len > 1 {
        points[len - 1].point
    } else {
        add(points[0].point, Point::new(1.0, 1.0))
    };

    let mut start_cap: Vec<Point> = Vec::new();
    let mut end_cap: Vec<Point> = Vec::new();

    if len == 1 {
        if (taper_start == 0.0 && taper_end == 0.0) || options.last {
            // A single sample draws a dot.
            let start = project(
                first_point,
                unit(per(sub(first_point, last_point))),
                -first_radius.unwrap_or(radius),
            );
            let step = 1.0 / 13.0;
            let mut dot_pts = Vec::new();
            let mut t = step;
            while t <= 1.0 {
                dot_pts.push(rotate_around(start, first_point, FIXED_PI * 2.0 * t));
                t += step;
            }
            return dot_pts;
        }
    } else {
        if taper_start > 0.0 || (taper_end > 0.0 && len == 1) {
            // Tapered start needs no cap.
        } else if options.start.cap {
            if let Some(&first_right) = right_pts.first() {
                let step = 1.0 / 13.0;
                let mut t = step;
                while t <= 1.0 {
                    start_cap.push(rotate_around(first_right, first_point, FIXED_PI * t));
                    t += step;
                }
            }
        } else if let (Some(&first_left), Some(&first_right)) =
            (left_pts.first(), right_pts.first())
        {
            let corners = sub(first_left, first_right);
            let offset_a = mul(corners, 0.5);
            let offset_b = mul(corners, 0.51);
            start_cap.extend([
                sub(first_point, offset_a),
                sub(first_point, offset_b),
                add(first_point, offset_b),
                add(first_point, offset_a),
            ]);
        }

        let direction = per(neg(points[len - 1].vector));

        if taper_end > 0.0 || (taper_start > 0.0 && len == 1) {
            end_cap.push(last_point);
        } else if options.end.cap {
            let start = project(last_point, direction, radius);
            let step = 1.0 / 29.0;
            let mut t = step;
            while t < 1.0 {
                end_cap.push(rotate_around(start, last_point, FIXED_PI * 3.0 * t));
                t += step;
            }
        } else {
            end_cap.extend([
                add(last_point, mul(direction, radius)),
                add(last_point, mul(direction, radius * 0.99)),
                sub(last_point, mul(direction, radius * 0.99)),
                sub(last_point, mul(direction, radius)),
            ]);
        }
    }

    right_pts.reverse();
    left_pts
        .into_iter()
        .chain(end_cap)
        .chain(right_pts)
        .chain(start_cap)
        .collect()
}

/// Full conversion from raw samples to outline polygon.
pub fn outline(input: &[Point], options: &StrokeOptions) -> Vec<Point> {
    outline_points(&stroke_points(input, options), options)
}

/// SVG path data for a closed outline, using quadratic curves through edge midpoints.
///
/// Returns an empty string for an empty outline.
pub fn svg_path(outline: &[Point]) -> String {
    let Some(first) = outline.first() else {
        return String::new();
    };

    let mut d = format!("M {} {} Q", fmt_coord(first.x), fmt_coord(first.y));
    for (i, p) in outline.iter().enumerate() {
        let next = outline[(i + 1) % outline.len()];
        d.push_str(&format!(
            " {} {} {} {}",
            fmt_coord(p.x),
            fmt_coord(p.y),
            fmt_coord((p.x + next.x) / 2.0),
            fmt_coord((p.y + next.y) / 2.0)
        ));
    }
    d.push_str(" Z");
    d
}

fn fmt_coord(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == 0.0 {
        // Avoid "-0"
        "0".to_string()
    } else {
        format!("{rounded}")
    }
}
