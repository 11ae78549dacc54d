//! Canvas snapshots: the ordered set of finalized elements.

use super::element::{Element, ElementId};
use super::font::TextMeasure;
use crate::util::Point;
use std::sync::Arc;

/// Ordered collection of finalized elements.
///
/// Order is paint order (first = bottom layer, last = top layer). A canvas is never
/// edited in place once committed to history: every change produces a new canvas that
/// shares the untouched elements with its predecessor.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    elements: Vec<Arc<Element>>,
}

impl Canvas {
    /// Creates an empty canvas.
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    pub fn elements(&self) -> &[Arc<Element>] {
        &self.elements
    }

    /// Elements in paint order. Reverse it to walk from the top down.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Element> {
        self.elements.iter().map(Arc::as_ref)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns a copy with `element` added on top.
    pub fn with_element(&self, element: Element) -> Self {
        let mut elements = self.elements.clone();
        elements.push(Arc::new(element));
        Self { elements }
    }

    /// Returns a copy without the element at `index`, or `None` when out of range.
    pub fn without(&self, index: usize) -> Option<Self> {
        if index >= self.elements.len() {
            return None;
        }
        let mut elements = self.elements.clone();
        elements.remove(index);
        Some(Self { elements })
    }

    /// Returns a copy with the element sharing `element.id` replaced in place, keeping
    /// its paint position. Falls back to adding on top if no element has that id.
    pub fn with_replaced(&self, element: Element) -> Self {
        match self.position_of(element.id) {
            Some(index) => {
                let mut elements = self.elements.clone();
                elements[index] = Arc::new(element);
                Self { elements }
            }
            None => self.with_element(element),
        }
    }

    pub fn find(&self, id: ElementId) -> Option<&Arc<Element>> {
        self.elements.iter().find(|element| element.id == id)
    }

    pub fn position_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|element| element.id == id)
    }

    /// Index of the topmost element touching `point`, searching from the top layer down.
    pub fn topmost_hit(
        &self,
        point: Point,
        tolerance: f64,
        measure: &dyn TextMeasure,
    ) -> Option<usize> {
        self.elements
            .iter()
            .rposition(|element| element.hit_test(point, tolerance, measure))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::element::ElementSettings;
    use crate::draw::font::AverageAdvance;
    use crate::draw::{BLACK, RED};
    use crate::input::{ToolKind, ToolStyle};

    fn circle(color: crate::draw::Color) -> Element {
        Element::create(
            ElementId::new(),
            ToolKind::Circle,
            Point::new(0.0, 0.0),
            Point::new(7.0, 7.0),
            &ToolStyle {
                stroke: color,
                fill: None,
                size: 1.0,
                font_family: None,
            },
            &ElementSettings::default(),
        )
        .unwrap()
    }

    #[test]
    fn with_element_shares_existing_elements() {
        let first = Canvas::new().with_element(circle(BLACK));
        let second = first.with_element(circle(RED));
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);
        assert!(Arc::ptr_eq(&first.elements()[0], &second.elements()[0]));
    }

    #[test]
    fn topmost_hit_prefers_later_elements() {
        let canvas = Canvas::new()
            .with_element(circle(BLACK))
            .with_element(circle(RED));
        let hit = canvas.topmost_hit(Point::new(5.0, 5.0), 5.0, &AverageAdvance::default());
        assert_eq!(hit, Some(1));
        assert_eq!(
            canvas.topmost_hit(Point::new(50.0, 50.0), 5.0, &AverageAdvance::default()),
            None
        );
    }

    #[test]
    fn iter_walks_both_directions() {
        let canvas = Canvas::new()
            .with_element(circle(BLACK))
            .with_element(circle(RED));
        let strokes: Vec<_> = canvas.iter().rev().map(|element| element.stroke).collect();
        assert_eq!(strokes, vec![RED, BLACK]);
        assert_eq!(canvas.iter().next().map(|element| element.stroke), Some(BLACK));
    }

    #[test]
    fn without_removes_only_target() {
        let bottom = circle(BLACK);
        let bottom_id = bottom.id;
        let canvas = Canvas::new().with_element(bottom).with_element(circle(RED));
        let remaining = canvas.without(1).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining.elements()[0].id, bottom_id);
        assert!(canvas.without(2).is_none());
    }

    #[test]
    fn with_replaced_keeps_paint_position() {
        let original = circle(BLACK);
        let id = original.id;
        let canvas = Canvas::new().with_element(original).with_element(circle(RED));
        let mut updated = canvas.find(id).unwrap().as_ref().clone();
        updated.stroke = RED;
        let replaced = canvas.with_replaced(updated);
        assert_eq!(replaced.len(), 2);
        assert_eq!(replaced.position_of(id), Some(0));
        assert_eq!(replaced.elements()[0].stroke, RED);
        assert_eq!(canvas.elements()[0].stroke, BLACK);
    }
}
