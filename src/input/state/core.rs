//! Drawing state machine and input state management.

use super::text::TextEdit;
use crate::config::{Action, Config, KeyBinding};
use crate::draw::{
    AverageAdvance, Canvas, CanvasHistory, Color, Element, ElementSettings, TextMeasure,
};
use crate::error::BoardError;
use crate::input::{modifiers::Modifiers, tool::ToolKind, toolbox::ToolStyleRegistry};
use crate::util::Point;
use std::collections::HashMap;
use std::sync::Arc;

/// Current drawing mode state machine.
///
/// Tracks whether the user is idle, dragging out a shape, erasing, or entering text.
/// State transitions occur based on pointer and keyboard events.
#[derive(Debug)]
pub enum DrawingState {
    /// Not in a gesture - waiting for user input
    Idle,
    /// Dragging out an element (primary button held down)
    Drawing {
        /// Which tool started this gesture
        tool: ToolKind,
        /// Where the pointer was pressed
        anchor: Point,
        /// Element under construction. Brushes have one from the start; other shapes
        /// get one on the first move.
        element: Option<Element>,
    },
    /// Eraser held down; every move removes the topmost element under the pointer
    Erasing,
    /// Typing into a new or existing text element
    TextInput(TextEdit),
}

impl DrawingState {
    /// Short name used in logs and gesture errors.
    pub fn name(&self) -> &'static str {
        match self {
            DrawingState::Idle => "idle",
            DrawingState::Drawing { .. } => "drawing",
            DrawingState::Erasing => "erasing",
            DrawingState::TextInput(_) => "editing text",
        }
    }
}

/// Main input state containing the whole board session.
///
/// Owns the canvas history, the tool-style store, the active tool and the gesture state
/// machine. Pointer and keyboard handlers update it synchronously; a renderer reads
/// [`InputState::elements`] and [`InputState::preview`] whenever `needs_redraw` is set.
pub struct InputState {
    /// Timeline of committed canvases
    pub(super) history: CanvasHistory,
    /// Per-tool styles (stroke, fill, size, font)
    pub toolbox: ToolStyleRegistry,
    /// Tool used by the next gesture (`None` = pointer does nothing)
    pub(super) active_tool: Option<ToolKind>,
    /// Current modifier key state
    pub modifiers: Modifiers,
    /// Current drawing mode state machine
    pub state: DrawingState,
    /// Whether the display needs to be redrawn
    pub needs_redraw: bool,
    /// Arrow length policy and brush outline template
    pub(super) settings: ElementSettings,
    /// Text width measurement for text hit-testing
    pub(super) measure: Box<dyn TextMeasure + Send>,
    /// Keybinding action map for efficient lookup
    action_map: HashMap<KeyBinding, Action>,
}

impl InputState {
    /// Creates a new InputState with an empty canvas.
    ///
    /// # Arguments
    /// * `toolbox` - Initial tool styles
    /// * `active_tool` - Tool selected at start-up
    /// * `settings` - Arrow policy and brush outline template
    /// * `history_limit` - Maximum number of undo snapshots (0 = unlimited)
    /// * `action_map` - Keybinding action map
    pub fn with_defaults(
        toolbox: ToolStyleRegistry,
        active_tool: Option<ToolKind>,
        settings: ElementSettings,
        history_limit: usize,
        action_map: HashMap<KeyBinding, Action>,
    ) -> Self {
        Self {
            history: CanvasHistory::with_limit(history_limit),
            toolbox,
            active_tool,
            modifiers: Modifiers::new(),
            state: DrawingState::Idle,
            needs_redraw: true,
            settings,
            measure: Box::new(AverageAdvance::default()),
            action_map,
        }
    }

    /// Builds the board from a loaded configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let action_map = config
            .keybindings
            .build_action_map()
            .map_err(|err| anyhow::anyhow!("Invalid keybindings: {}", err))?;

        Ok(Self::with_defaults(
            config.tool_styles()?,
            Some(config.drawing.default_tool),
            config.element_settings(),
            config.history.limit,
            action_map,
        ))
    }

    /// Replaces the text measurement used for hit-testing text elements.
    pub fn with_text_measure(mut self, measure: Box<dyn TextMeasure + Send>) -> Self {
        self.measure = measure;
        self
    }

    // ========================================================================
    // Read access for renderers
    // ========================================================================

    /// Committed elements in paint order.
    pub fn elements(&self) -> &[Arc<Element>] {
        self.history.current().elements()
    }

    /// The committed canvas snapshot currently shown.
    pub fn canvas(&self) -> &Arc<Canvas> {
        self.history.current()
    }

    pub fn history(&self) -> &CanvasHistory {
        &self.history
    }

    /// Element being drawn or typed, to paint over the committed elements.
    ///
    /// While an existing text element is being edited the preview carries that
    /// element's id, so renderers can hide the committed copy.
    pub fn preview(&self) -> Option<Element> {
        match &self.state {
            DrawingState::Drawing { element, .. } => element.clone(),
            DrawingState::TextInput(edit) => Some(edit.to_element()),
            DrawingState::Idle | DrawingState::Erasing => None,
        }
    }

    pub fn active_tool(&self) -> Option<ToolKind> {
        self.active_tool
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ========================================================================
    // Global commands
    // ========================================================================

    /// Steps back one committed state. Any open gesture is kept.
    pub fn undo(&mut self) {
        if self.history.can_undo() {
            self.history.undo();
            self.needs_redraw = true;
            log::debug!("Undo -> snapshot {}", self.history.cursor());
        }
    }

    /// Steps forward one committed state.
    pub fn redo(&mut self) {
        if self.history.can_redo() {
            self.history.redo();
            self.needs_redraw = true;
            log::debug!("Redo -> snapshot {}", self.history.cursor());
        }
    }

    /// Selects the tool for the next gesture.
    ///
    /// Switching to a different tool discards any gesture in progress, including an
    /// open text edit, without committing it. Re-selecting the active tool keeps it.
    pub fn set_active_tool(&mut self, tool: Option<ToolKind>) {
        if tool == self.active_tool {
            return;
        }
        if !matches!(self.state, DrawingState::Idle) {
            log::debug!(
                "Tool switch while {}: discarding gesture",
                self.state.name()
            );
            self.abort_gesture();
        }
        log::debug!("Active tool: {:?} -> {:?}", self.active_tool, tool);
        self.active_tool = tool;
        self.needs_redraw = true;
    }

    /// Removes every element as one undoable step.
    ///
    /// Aborts any gesture in progress. Does nothing when the canvas is already empty.
    pub fn clear_board(&mut self) {
        self.abort_gesture();
        if self.history.current().is_empty() {
            return;
        }
        log::debug!("Clearing {} element(s)", self.history.current().len());
        self.commit(Canvas::new());
    }

    /// Returns to Idle without committing anything.
    pub fn abort_gesture(&mut self) {
        if !matches!(self.state, DrawingState::Idle) {
            log::debug!("Gesture aborted while {}", self.state.name());
            self.state = DrawingState::Idle;
            self.needs_redraw = true;
        }
    }

    // ========================================================================
    // Tool styles
    // ========================================================================

    pub fn set_stroke(&mut self, tool: ToolKind, color: Color) -> Result<(), BoardError> {
        self.toolbox.set_stroke(tool, color)?;
        self.needs_redraw = true;
        Ok(())
    }

    pub fn set_fill(&mut self, tool: ToolKind, color: Option<Color>) -> Result<(), BoardError> {
        self.toolbox.set_fill(tool, color)?;
        self.needs_redraw = true;
        Ok(())
    }

    /// Sets the size for `tool`, clamped to its range. Returns the stored size.
    pub fn set_size(&mut self, tool: ToolKind, size: f64) -> f64 {
        self.needs_redraw = true;
        self.toolbox.set_size(tool, size)
    }

    /// Sets the eraser diameter. Returns the stored size.
    pub fn set_eraser_size(&mut self, size: f64) -> f64 {
        self.set_size(ToolKind::Eraser, size)
    }

    pub fn set_font_family(&mut self, tool: ToolKind, family: &str) -> Result<(), BoardError> {
        self.toolbox.set_font_family(tool, family)?;
        self.needs_redraw = true;
        Ok(())
    }

    // ========================================================================
    // Internals shared by the handlers
    // ========================================================================

    /// Makes `canvas` the current committed state.
    pub(super) fn commit(&mut self, canvas: Canvas) {
        self.history.commit(canvas);
        self.needs_redraw = true;
        log::debug!(
            "Committed snapshot {} ({} element(s))",
            self.history.cursor(),
            self.history.current().len()
        );
    }

    /// Hit radius for the eraser: half its diameter.
    pub(super) fn eraser_tolerance(&self) -> f64 {
        self.toolbox.get(ToolKind::Eraser).size / 2.0
    }

    /// Look up an action for the given key and modifiers.
    ///
    /// A binding that matches Shift exactly wins over a Shift-tolerant symbol binding.
    pub(super) fn find_action(&self, key_str: &str) -> Option<Action> {
        let Modifiers { shift, ctrl, alt } = self.modifiers;
        let mut fallback = None;
        for (binding, action) in &self.action_map {
            if binding.matches_exactly(key_str, ctrl, shift, alt) {
                return Some(*action);
            }
            if fallback.is_none() && binding.matches(key_str, ctrl, shift, alt) {
                fallback = Some(*action);
            }
        }
        fallback
    }
}
