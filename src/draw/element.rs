//! Element definitions for whiteboard drawings.

use super::color::Color;
use super::font::{DEFAULT_FONT_FAMILY, TextMeasure};
use super::freehand::{self, StrokeOptions};
use crate::error::BoardError;
use crate::input::{ToolKind, ToolStyle};
use crate::util::{self, Bounds, Point};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use uuid::Uuid;

/// Unique identity of an element. Re-created text elements keep their id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The six kinds of drawable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Line,
    Rectangle,
    Circle,
    Arrow,
    Brush,
    Text,
}

/// How the arrowhead leg length is chosen when an arrow is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArrowLengthPolicy {
    /// Same leg length for every arrow
    Fixed { length: f64 },
    /// Leg length = stroke width × factor
    Proportional { factor: f64 },
}

impl Default for ArrowLengthPolicy {
    fn default() -> Self {
        Self::Fixed {
            length: DEFAULT_ARROW_LENGTH,
        }
    }
}

/// Leg length used by [`ArrowLengthPolicy::Fixed`] unless configured.
pub const DEFAULT_ARROW_LENGTH: f64 = 20.0;

/// Multiplier used by [`ArrowLengthPolicy::Proportional`] unless configured.
pub const DEFAULT_ARROW_FACTOR: f64 = 15.0;

impl ArrowLengthPolicy {
    /// Leg length for an arrow with the given stroke width.
    pub fn length_for(&self, stroke_width: f64) -> f64 {
        match *self {
            Self::Fixed { length } => length,
            Self::Proportional { factor } => stroke_width * factor,
        }
    }
}

/// Creation-time parameters that don't come from the tool style.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementSettings {
    pub arrow: ArrowLengthPolicy,
    /// Template for brush outlines; `size` is overridden by the brush style
    pub brush: StrokeOptions,
}

/// Freehand stroke: sampled points plus a lazily computed outline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrushStroke {
    /// Pointer samples in input order
    points: Vec<Point>,
    /// Outline parameters
    options: StrokeOptions,
    /// Derived from `points` and `options`; reset whenever either changes
    #[serde(skip)]
    outline: OnceLock<Vec<Point>>,
}

impl BrushStroke {
    fn new(start: Point, options: StrokeOptions) -> Self {
        Self {
            points: vec![start],
            options,
            outline: OnceLock::new(),
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn options(&self) -> &StrokeOptions {
        &self.options
    }

    /// Outline polygon, computed on first access.
    pub fn outline(&self) -> &[Point] {
        self.outline
            .get_or_init(|| freehand::outline(&self.points, &self.options))
    }

    /// SVG path data for [`Self::outline`].
    pub fn svg_path(&self) -> String {
        freehand::svg_path(self.outline())
    }

    fn push(&mut self, point: Point) {
        self.points.push(point);
        self.outline = OnceLock::new();
    }

    fn finish(&mut self) {
        self.options.last = true;
        self.outline = OnceLock::new();
        self.outline();
    }
}

impl PartialEq for BrushStroke {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points && self.options == other.options
    }
}

/// Geometry of an element, one variant per [`ElementKind`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// Straight segment from `p1` to `p2`
    Line { p1: Point, p2: Point },
    /// Axis-aligned rectangle, normalized so `p1` is the min corner and `p2` the max
    Rectangle {
        p1: Point,
        p2: Point,
        fill: Option<Color>,
    },
    /// Circle centred on `p1` passing through `p2`
    Circle {
        p1: Point,
        p2: Point,
        fill: Option<Color>,
    },
    /// Segment from `p1` to `p2` with two arrowhead legs ending at `head`
    Arrow { p1: Point, p2: Point, head: [Point; 2] },
    /// Freehand stroke
    Brush(BrushStroke),
    /// Text anchored at its top-left corner
    Text {
        anchor: Point,
        content: String,
        font_family: String,
    },
}

/// A drawable element: identity, stroke style and geometry.
///
/// `size` is the stroke width for outlines, the stroke diameter for brushes and the
/// font size for text. Once an element is added to a canvas it sits behind an `Arc`
/// and is never mutated again.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub stroke: Color,
    pub size: f64,
    #[serde(flatten)]
    pub shape: Shape,
}

impl Element {
    /// Builds an element for `tool` from an anchor and a free point.
    ///
    /// Brushes start with `p1` as their only sample and text starts empty at `p1`;
    /// both ignore `p2`. The eraser has no element kind.
    pub fn create(
        id: ElementId,
        tool: ToolKind,
        p1: Point,
        p2: Point,
        style: &ToolStyle,
        settings: &ElementSettings,
    ) -> Result<Self, BoardError> {
        let kind = tool
            .element_kind()
            .ok_or_else(|| BoardError::UnrecognizedToolKind(tool.to_string()))?;

        let shape = match kind {
            ElementKind::Line => Shape::Line { p1, p2 },
            ElementKind::Rectangle => {
                let bounds = Bounds::from_corners(p1, p2);
                Shape::Rectangle {
                    p1: bounds.min,
                    p2: bounds.max,
                    fill: style.fill,
                }
            }
            ElementKind::Circle => Shape::Circle {
                p1,
                p2,
                fill: style.fill,
            },
            ElementKind::Arrow => Shape::Arrow {
                p1,
                p2,
                head: util::arrowhead_legs(p1, p2, settings.arrow.length_for(style.size)),
            },
            ElementKind::Brush => {
                let options = StrokeOptions {
                    size: style.size,
                    last: false,
                    ..settings.brush
                };
                Shape::Brush(BrushStroke::new(p1, options))
            }
            ElementKind::Text => Shape::Text {
                anchor: p1,
                content: String::new(),
                font_family: style
                    .font_family
                    .clone()
                    .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string()),
            },
        };

        Ok(Self {
            id,
            stroke: style.stroke,
            size: style.size,
            shape,
        })
    }

    /// Builds a text element with the given content.
    pub fn text(id: ElementId, anchor: Point, content: String, style: &ToolStyle) -> Self {
        Self {
            id,
            stroke: style.stroke,
            size: style.size,
            shape: Shape::Text {
                anchor,
                content,
                font_family: style
                    .font_family
                    .clone()
                    .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string()),
            },
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self.shape {
            Shape::Line { .. } => ElementKind::Line,
            Shape::Rectangle { .. } => ElementKind::Rectangle,
            Shape::Circle { .. } => ElementKind::Circle,
            Shape::Arrow { .. } => ElementKind::Arrow,
            Shape::Brush(_) => ElementKind::Brush,
            Shape::Text { .. } => ElementKind::Text,
        }
    }

    /// Appends a sample to an in-progress brush stroke.
    ///
    /// Returns false (and does nothing) for any other kind.
    pub fn append_point(&mut self, point: Point) -> bool {
        match &mut self.shape {
            Shape::Brush(stroke) => {
                stroke.push(point);
                true
            }
            _ => false,
        }
    }

    /// Freezes derived geometry before the element joins a canvas.
    ///
    /// Brushes switch to their completed-stroke outline and bake it.
    pub fn finalize(&mut self) {
        if let Shape::Brush(stroke) = &mut self.shape {
            stroke.finish();
        }
    }

    /// Text content, for text elements.
    pub fn text_content(&self) -> Option<&str> {
        match &self.shape {
            Shape::Text { content, .. } => Some(content),
            _ => None,
        }
    }

    /// Centre and radius, for circles.
    pub fn circle_geometry(&self) -> Option<(Point, f64)> {
        match self.shape {
            Shape::Circle { p1, p2, .. } => Some((p1, p1.distance(p2))),
            _ => None,
        }
    }

    /// Axis-aligned box covering the element's geometry (stroke width not included).
    pub fn bounds(&self, measure: &dyn TextMeasure) -> Option<Bounds> {
        match &self.shape {
            Shape::Line { p1, p2 } | Shape::Rectangle { p1, p2, .. } => {
                Some(Bounds::from_corners(*p1, *p2))
            }
            Shape::Circle { p1, p2, .. } => {
                Some(Bounds::from_corners(*p1, *p1).inflate(p1.distance(*p2)))
            }
            Shape::Arrow { p1, p2, head } => Bounds::from_points(&[*p1, *p2, head[0], head[1]]),
            Shape::Brush(stroke) => Bounds::from_points(stroke.outline())
                .or_else(|| Bounds::from_points(stroke.points())),
            Shape::Text {
                anchor,
                content,
                font_family,
            } => {
                let width = measure.text_width(content, font_family, self.size);
                let lines = content.lines().count().max(1) as f64;
                Some(Bounds::from_corners(
                    *anchor,
                    Point::new(anchor.x + width, anchor.y + self.size * lines),
                ))
            }
        }
    }

    /// Returns true when `point` touches the element's drawn outline.
    ///
    /// - Lines and arrows: near the shaft, within the segment's extent
    /// - Rectangles: near one of the four edges (the interior is not a hit)
    /// - Circles: near the circumference (the interior is not a hit)
    /// - Brushes: near any sampled point
    /// - Text: inside the measured text box
    pub fn hit_test(&self, point: Point, tolerance: f64, measure: &dyn TextMeasure) -> bool {
        match &self.shape {
            Shape::Line { p1, p2 } | Shape::Arrow { p1, p2, .. } => {
                util::is_point_close_to_line(*p1, *p2, point, tolerance)
            }
            Shape::Rectangle { p1, p2, .. } => Bounds::from_corners(*p1, *p2)
                .edges()
                .iter()
                .any(|(a, b)| util::is_point_close_to_line(*a, *b, point, tolerance)),
            Shape::Circle { p1, p2, .. } => {
                let radius = p1.distance(*p2);
                (point.distance(*p1) - radius).abs() < tolerance
            }
            Shape::Brush(stroke) => stroke
                .points()
                .iter()
                .any(|sample| sample.distance(point) < tolerance),
            Shape::Text { .. } => self
                .bounds(measure)
                .is_some_and(|bounds| bounds.contains(point)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::font::AverageAdvance;
    use crate::draw::{BLACK, RED};

    fn style(size: f64) -> ToolStyle {
        ToolStyle {
            stroke: BLACK,
            fill: None,
            size,
            font_family: None,
        }
    }

    fn make(tool: ToolKind, p1: (f64, f64), p2: (f64, f64)) -> Element {
        Element::create(
            ElementId::new(),
            tool,
            p1.into(),
            p2.into(),
            &style(2.0),
            &ElementSettings::default(),
        )
        .expect("tool has an element kind")
    }

    fn hit(element: &Element, x: f64, y: f64, tolerance: f64) -> bool {
        element.hit_test(Point::new(x, y), tolerance, &AverageAdvance::default())
    }

    #[test]
    fn eraser_cannot_create_elements() {
        let result = Element::create(
            ElementId::new(),
            ToolKind::Eraser,
            Point::default(),
            Point::default(),
            &style(20.0),
            &ElementSettings::default(),
        );
        assert_eq!(
            result,
            Err(BoardError::UnrecognizedToolKind("eraser".to_string()))
        );
    }

    #[test]
    fn rectangle_is_normalized() {
        let rect = make(ToolKind::Rectangle, (50.0, 5.0), (10.0, 40.0));
        match rect.shape {
            Shape::Rectangle { p1, p2, .. } => {
                assert_eq!(p1, Point::new(10.0, 5.0));
                assert_eq!(p2, Point::new(50.0, 40.0));
            }
            other => panic!("expected rectangle, got {other:?}"),
        }
    }

    #[test]
    fn rectangle_hits_edges_not_interior() {
        let rect = make(ToolKind::Rectangle, (10.0, 10.0), (50.0, 50.0));
        assert!(hit(&rect, 10.0, 30.0, 5.0));
        assert!(!hit(&rect, 30.0, 30.0, 5.0));
        assert!(hit(&rect, 30.0, 10.0, 5.0));
        assert!(hit(&rect, 53.0, 50.0, 5.0));
        assert!(!hit(&rect, 70.0, 30.0, 5.0));
    }

    #[test]
    fn line_hit_respects_segment_extent() {
        let line = make(ToolKind::Line, (0.0, 0.0), (10.0, 0.0));
        assert!(hit(&line, 5.0, 1.0, 2.0));
        assert!(!hit(&line, 15.0, 0.0, 2.0));
    }

    #[test]
    fn circle_hits_circumference_only() {
        let circle = make(ToolKind::Circle, (0.0, 0.0), (10.0, 0.0));
        assert_eq!(circle.circle_geometry(), Some((Point::new(0.0, 0.0), 10.0)));
        assert!(hit(&circle, 0.0, 9.0, 2.0));
        assert!(hit(&circle, -10.5, 0.0, 2.0));
        assert!(!hit(&circle, 0.0, 0.0, 2.0));
        assert!(!hit(&circle, 14.0, 0.0, 2.0));
    }

    #[test]
    fn arrow_legs_use_fixed_length_by_default() {
        let arrow = make(ToolKind::Arrow, (0.0, 0.0), (100.0, 0.0));
        let Shape::Arrow { p2, head, .. } = arrow.shape else {
            panic!("expected arrow");
        };
        for leg in head {
            assert!((leg.distance(p2) - DEFAULT_ARROW_LENGTH).abs() < 1e-9);
        }
    }

    #[test]
    fn arrow_legs_with_proportional_policy() {
        let settings = ElementSettings {
            arrow: ArrowLengthPolicy::Proportional { factor: 2.0 },
            ..ElementSettings::default()
        };
        let arrow = Element::create(
            ElementId::new(),
            ToolKind::Arrow,
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            &style(2.0),
            &settings,
        )
        .unwrap();
        let Shape::Arrow { head, .. } = arrow.shape else {
            panic!("expected arrow");
        };
        let expected_x = 10.0 - 4.0 * (30f64).to_radians().cos();
        assert!((head[0].x - expected_x).abs() < 1e-6);
        assert!((head[0].y - 2.0).abs() < 1e-6);
        assert!((head[1].x - expected_x).abs() < 1e-6);
        assert!((head[1].y + 2.0).abs() < 1e-6);
    }

    #[test]
    fn brush_appends_and_resets_outline() {
        let mut brush = make(ToolKind::Brush, (0.0, 0.0), (99.0, 99.0));
        let Shape::Brush(stroke) = &brush.shape else {
            panic!("expected brush");
        };
        assert_eq!(stroke.points(), &[Point::new(0.0, 0.0)]);
        let first_outline = stroke.outline().to_vec();
        assert!(!first_outline.is_empty());

        assert!(brush.append_point(Point::new(30.0, 0.0)));
        assert!(brush.append_point(Point::new(60.0, 0.0)));
        brush.finalize();
        let Shape::Brush(stroke) = &brush.shape else {
            panic!("expected brush");
        };
        assert_eq!(stroke.points().len(), 3);
        assert!(stroke.options().last);
        assert_ne!(stroke.outline(), first_outline.as_slice());
        assert!(stroke.svg_path().starts_with('M'));
    }

    #[test]
    fn append_point_ignores_non_brush() {
        let mut line = make(ToolKind::Line, (0.0, 0.0), (1.0, 1.0));
        assert!(!line.append_point(Point::new(2.0, 2.0)));
    }

    #[test]
    fn brush_hits_near_samples() {
        let mut brush = make(ToolKind::Brush, (0.0, 0.0), (0.0, 0.0));
        brush.append_point(Point::new(20.0, 0.0));
        assert!(hit(&brush, 1.0, 1.0, 5.0));
        assert!(hit(&brush, 22.0, 0.0, 5.0));
        assert!(!hit(&brush, 10.0, 0.0, 5.0));
    }

    #[test]
    fn text_hits_inside_measured_box() {
        let text_style = ToolStyle {
            stroke: RED,
            fill: None,
            size: 10.0,
            font_family: Some("Arial".to_string()),
        };
        let text = Element::text(
            ElementId::new(),
            Point::new(100.0, 100.0),
            "hello".to_string(),
            &text_style,
        );
        // 5 chars * 10px * 0.6 = 30px wide, 10px tall
        assert!(hit(&text, 101.0, 101.0, 0.0));
        assert!(hit(&text, 129.0, 109.0, 0.0));
        assert!(!hit(&text, 131.0, 105.0, 0.0));
        assert!(!hit(&text, 110.0, 111.0, 0.0));
        assert_eq!(text.text_content(), Some("hello"));
        assert_eq!(text.kind(), ElementKind::Text);
    }

    #[test]
    fn serializes_with_kind_tag() {
        let line = make(ToolKind::Line, (0.0, 0.0), (1.0, 2.0));
        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value["kind"], "line");
        assert_eq!(value["stroke"], "#000000");
        assert_eq!(value["p2"]["y"], 2.0);
    }
}
