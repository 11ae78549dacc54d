use crate::draw::{Element, ElementId, Shape};
use crate::error::BoardError;
use crate::input::events::primary_held;
use crate::input::tool::ToolKind;
use crate::input::toolbox::ToolStyle;
use crate::util::Point;
use log::{debug, trace};

use super::text::TextEdit;
use super::{DrawingState, InputState};

/// Drops expected races and blank commits; everything else reaches the caller.
pub(super) fn settle(result: Result<(), BoardError>) -> Result<(), BoardError> {
    match result {
        Err(err @ BoardError::InvalidGestureState { .. }) => {
            trace!("{}", err);
            Ok(())
        }
        Err(BoardError::EmptyCommit) => {
            debug!("Discarded blank text");
            Ok(())
        }
        other => other,
    }
}

impl InputState {
    /// Processes a pointer press.
    ///
    /// # Arguments
    /// * `x`, `y` - Pointer position in canvas units
    /// * `buttons` - Pressed button mask (bit 0 = primary)
    ///
    /// # Behavior
    /// - Shape tools: start a gesture anchored here (brushes record this first sample)
    /// - Eraser: start erasing and erase under the pointer immediately
    /// - Text: open a text edit here, or on the topmost text element under the pointer
    /// - During a text edit: the open edit is committed first
    pub fn pointer_down(&mut self, x: f64, y: f64, buttons: u8) -> Result<(), BoardError> {
        settle(self.try_pointer_down(Point::new(x, y), buttons))
    }

    /// Processes pointer motion. Only moves with the primary button held do anything.
    ///
    /// # Behavior
    /// - Brush: appends a sample
    /// - Line, rectangle, circle, arrow: rebuilds the shape out to the pointer
    /// - Eraser: erases the topmost element under the pointer
    pub fn pointer_move(&mut self, x: f64, y: f64, buttons: u8) -> Result<(), BoardError> {
        settle(self.try_pointer_move(Point::new(x, y), buttons))
    }

    /// Processes a pointer release.
    ///
    /// When a drawing gesture is open, the element is finalized out to the release point
    /// and committed to history as one step. A press and release at the same point
    /// without any movement commits nothing for the drag-shape tools.
    pub fn pointer_up(&mut self, x: f64, y: f64, _buttons: u8) -> Result<(), BoardError> {
        settle(self.try_pointer_up(Point::new(x, y)))
    }

    fn try_pointer_down(&mut self, point: Point, buttons: u8) -> Result<(), BoardError> {
        if !primary_held(buttons) {
            return Err(BoardError::InvalidGestureState {
                event: "pointer_down without primary button",
                state: self.state.name(),
            });
        }

        if matches!(self.state, DrawingState::TextInput(_)) {
            // Clicking elsewhere blurs the edit, which commits it
            settle(self.finish_text_edit())?;
        }

        if !matches!(self.state, DrawingState::Idle) {
            return Err(BoardError::InvalidGestureState {
                event: "pointer_down",
                state: self.state.name(),
            });
        }

        let Some(tool) = self.active_tool else {
            return Err(BoardError::InvalidGestureState {
                event: "pointer_down",
                state: "no active tool",
            });
        };

        match tool {
            ToolKind::Eraser => {
                self.state = DrawingState::Erasing;
                self.erase_at(point);
            }
            ToolKind::Text => self.begin_text_edit(point),
            ToolKind::Brush => {
                let element = Element::create(
                    ElementId::new(),
                    tool,
                    point,
                    point,
                    self.toolbox.get(tool),
                    &self.settings,
                )?;
                self.state = DrawingState::Drawing {
                    tool,
                    anchor: point,
                    element: Some(element),
                };
            }
            ToolKind::Line | ToolKind::Rectangle | ToolKind::Circle | ToolKind::Arrow => {
                self.state = DrawingState::Drawing {
                    tool,
                    anchor: point,
                    element: None,
                };
            }
        }

        debug!(
            "pointer_down at ({}, {}) with {} -> {}",
            point.x,
            point.y,
            tool,
            self.state.name()
        );
        self.needs_redraw = true;
        Ok(())
    }

    fn try_pointer_move(&mut self, point: Point, buttons: u8) -> Result<(), BoardError> {
        if !primary_held(buttons) {
            return Err(BoardError::InvalidGestureState {
                event: "pointer_move without primary button",
                state: self.state.name(),
            });
        }

        if matches!(self.state, DrawingState::Erasing) {
            self.erase_at(point);
            return Ok(());
        }

        let state_name = self.state.name();
        let DrawingState::Drawing {
            tool,
            anchor,
            element,
        } = &mut self.state
        else {
            return Err(BoardError::InvalidGestureState {
                event: "pointer_move",
                state: state_name,
            });
        };

        if *tool == ToolKind::Brush {
            if let Some(stroke) = element {
                stroke.append_point(point);
            }
        } else {
            let id = element.as_ref().map_or_else(ElementId::new, |e| e.id);
            *element = Some(Element::create(
                id,
                *tool,
                *anchor,
                point,
                self.toolbox.get(*tool),
                &self.settings,
            )?);
        }
        self.needs_redraw = true;
        Ok(())
    }

    fn try_pointer_up(&mut self, point: Point) -> Result<(), BoardError> {
        match std::mem::replace(&mut self.state, DrawingState::Idle) {
            DrawingState::Drawing {
                tool,
                anchor,
                element,
            } => {
                let element = match element {
                    Some(mut element) if tool == ToolKind::Brush => {
                        element.finalize();
                        Some(element)
                    }
                    Some(element) => Some(Element::create(
                        element.id,
                        tool,
                        anchor,
                        point,
                        self.toolbox.get(tool),
                        &self.settings,
                    )?),
                    None if point != anchor => Some(Element::create(
                        ElementId::new(),
                        tool,
                        anchor,
                        point,
                        self.toolbox.get(tool),
                        &self.settings,
                    )?),
                    None => None,
                };

                self.needs_redraw = true;
                match element {
                    Some(element) => {
                        debug!("Finished {:?} {}", element.kind(), element.id);
                        let canvas = self.history.current().with_element(element);
                        self.commit(canvas);
                    }
                    None => debug!("{} click without drag, nothing to commit", tool),
                }
                Ok(())
            }
            DrawingState::Erasing => {
                self.needs_redraw = true;
                Ok(())
            }
            // The press that opened the edit is followed by its release; keep editing
            state @ DrawingState::TextInput(_) => {
                self.state = state;
                Ok(())
            }
            DrawingState::Idle => Err(BoardError::InvalidGestureState {
                event: "pointer_up",
                state: DrawingState::Idle.name(),
            }),
        }
    }

    /// Removes the topmost element under `point`, committing one history step.
    ///
    /// Returns true when something was erased.
    pub(super) fn erase_at(&mut self, point: Point) -> bool {
        let tolerance = self.eraser_tolerance();
        let canvas = self.history.current();
        let Some(index) = canvas.topmost_hit(point, tolerance, &*self.measure) else {
            return false;
        };
        let Some(remaining) = canvas.without(index) else {
            return false;
        };

        debug!(
            "Erased {:?} {} at ({}, {})",
            canvas.elements()[index].kind(),
            canvas.elements()[index].id,
            point.x,
            point.y
        );
        self.commit(remaining);
        true
    }

    /// Opens a text edit at `point`, or on the topmost text element under it.
    fn begin_text_edit(&mut self, point: Point) {
        let measure = &*self.measure;
        let existing = self
            .history
            .current()
            .iter()
            .rev()
            .find_map(|element| match &element.shape {
                Shape::Text {
                    anchor,
                    content,
                    font_family,
                } if element.hit_test(point, 0.0, measure) => {
                    debug!("Editing text element {}", element.id);
                    Some(TextEdit::existing(
                        element.id,
                        *anchor,
                        content,
                        ToolStyle {
                            stroke: element.stroke,
                            fill: None,
                            size: element.size,
                            font_family: Some(font_family.clone()),
                        },
                    ))
                }
                _ => None,
            });

        let edit = existing
            .unwrap_or_else(|| TextEdit::new(point, self.toolbox.get(ToolKind::Text).clone()));
        self.state = DrawingState::TextInput(edit);
    }

    /// Commits the open text edit and returns to Idle.
    ///
    /// Blank content yields [`BoardError::EmptyCommit`] and commits nothing. Editing an
    /// element without changing it commits nothing either.
    pub(super) fn finish_text_edit(&mut self) -> Result<(), BoardError> {
        if !matches!(self.state, DrawingState::TextInput(_)) {
            return Err(BoardError::InvalidGestureState {
                event: "text commit",
                state: self.state.name(),
            });
        }
        let DrawingState::TextInput(edit) = std::mem::replace(&mut self.state, DrawingState::Idle)
        else {
            return Ok(());
        };
        self.needs_redraw = true;

        if edit.is_blank() {
            return Err(BoardError::EmptyCommit);
        }

        let element = edit.to_element();
        let canvas = self.history.current();
        if canvas
            .find(element.id)
            .is_some_and(|committed| **committed == element)
        {
            debug!("Text element {} unchanged", element.id);
            return Ok(());
        }

        let canvas = canvas.with_replaced(element);
        self.commit(canvas);
        Ok(())
    }
}
