//! Undo/redo timeline of canvas snapshots.

use super::canvas::Canvas;
use std::sync::Arc;

/// Timeline of canvas snapshots with a cursor marking the rendered one.
///
/// Invariant: `0 <= cursor < timeline.len()`, and `timeline[cursor]` is the current
/// canvas. Committing truncates everything after the cursor before appending, so the
/// redo branch is discarded. Undo and redo only move the cursor.
#[derive(Debug, Clone)]
pub struct CanvasHistory {
    timeline: Vec<Arc<Canvas>>,
    cursor: usize,
    /// Maximum number of snapshots kept (0 = unlimited)
    limit: usize,
}

impl Default for CanvasHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasHistory {
    /// Creates a history holding a single empty canvas.
    pub fn new() -> Self {
        Self::with_limit(0)
    }

    /// Creates a history that keeps at most `limit` snapshots (0 = unlimited).
    ///
    /// Limits below 2 other than 0 are raised to 2 so that one undo step stays possible.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            timeline: vec![Arc::new(Canvas::new())],
            cursor: 0,
            limit: if limit == 0 { 0 } else { limit.max(2) },
        }
    }

    /// The canvas currently rendered.
    pub fn current(&self) -> &Arc<Canvas> {
        &self.timeline[self.cursor]
    }

    /// Makes `canvas` the current state, discarding any redo branch.
    pub fn commit(&mut self, canvas: Canvas) {
        self.timeline.truncate(self.cursor + 1);
        self.timeline.push(Arc::new(canvas));

        if self.limit > 0 && self.timeline.len() > self.limit {
            let excess = self.timeline.len() - self.limit;
            self.timeline.drain(..excess);
            log::debug!("History limit {} reached, dropped {} snapshot(s)", self.limit, excess);
        }

        self.cursor = self.timeline.len() - 1;
    }

    /// Steps back one snapshot. No-op at the oldest snapshot.
    pub fn undo(&mut self) -> &Arc<Canvas> {
        if self.can_undo() {
            self.cursor -= 1;
        }
        self.current()
    }

    /// Steps forward one snapshot. No-op at the newest snapshot.
    pub fn redo(&mut self) -> &Arc<Canvas> {
        if self.can_redo() {
            self.cursor += 1;
        }
        self.current()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.timeline.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of snapshots in the timeline (always at least 1).
    pub fn len(&self) -> usize {
        self.timeline.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::element::{Element, ElementId};
    use crate::draw::BLACK;
    use crate::input::ToolStyle;
    use crate::util::Point;

    fn canvas_with(count: usize) -> Canvas {
        let style = ToolStyle {
            stroke: BLACK,
            fill: None,
            size: 24.0,
            font_family: None,
        };
        (0..count).fold(Canvas::new(), |canvas, i| {
            canvas.with_element(Element::text(
                ElementId::new(),
                Point::new(i as f64, 0.0),
                format!("note {i}"),
                &style,
            ))
        })
    }

    fn assert_invariant(history: &CanvasHistory) {
        assert!(history.cursor() < history.len());
        assert_eq!(history.can_undo(), history.cursor() > 0);
        assert_eq!(history.can_redo(), history.cursor() < history.len() - 1);
    }

    #[test]
    fn starts_with_one_empty_canvas() {
        let history = CanvasHistory::new();
        assert_eq!(history.len(), 1);
        assert!(history.current().is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn invariant_holds_across_interleaved_operations() {
        let mut history = CanvasHistory::new();
        assert_invariant(&history);
        for step in 0..12usize {
            match step % 4 {
                0 | 1 => history.commit(canvas_with(step)),
                2 => {
                    history.undo();
                }
                _ => {
                    history.redo();
                }
            }
            assert_invariant(&history);
        }
    }

    #[test]
    fn undo_then_redo_restores_same_snapshot() {
        let mut history = CanvasHistory::new();
        history.commit(canvas_with(1));
        history.commit(canvas_with(2));
        let before = Arc::clone(history.current());

        history.undo();
        assert_eq!(history.current().len(), 1);
        history.redo();
        assert!(Arc::ptr_eq(&before, history.current()));
    }

    #[test]
    fn commit_after_undo_discards_redo_branch() {
        let mut history = CanvasHistory::new();
        history.commit(canvas_with(1));
        history.commit(canvas_with(2));
        history.undo();
        assert!(history.can_redo());

        history.commit(canvas_with(3));
        assert!(!history.can_redo());
        assert_eq!(history.len(), 3);
        assert_eq!(history.current().len(), 3);
    }

    #[test]
    fn undo_at_boundary_is_idempotent() {
        let mut history = CanvasHistory::new();
        let initial = Arc::clone(history.current());
        history.undo();
        history.undo();
        assert_eq!(history.cursor(), 0);
        assert!(Arc::ptr_eq(&initial, history.current()));

        history.commit(canvas_with(1));
        let top = Arc::clone(history.current());
        history.redo();
        assert!(Arc::ptr_eq(&top, history.current()));
    }

    #[test]
    fn limit_drops_oldest_snapshots() {
        let mut history = CanvasHistory::with_limit(3);
        for count in 1..=5 {
            history.commit(canvas_with(count));
            assert_invariant(&history);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
        history.undo();
        history.undo();
        assert!(!history.can_undo());
        assert_eq!(history.current().len(), 3);
    }

    #[test]
    fn tiny_limits_keep_one_undo_step() {
        let history = CanvasHistory::with_limit(1);
        assert_eq!(history.limit(), 2);
        assert_eq!(CanvasHistory::with_limit(0).limit(), 0);
    }
}
