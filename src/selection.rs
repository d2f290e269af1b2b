//! Pointer-drag state machine for rectangular selections.
//!
//! [`Selector`] is pure: it consumes pointer events and reports what should happen, leaving
//! drawing, analysis and persistence to [`crate::session::Session`].

use log::debug;

use crate::rect::SelectionRect;

/// A pointer event in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Press { x: u32, y: u32 },
    Move { x: u32, y: u32 },
    Release { x: u32, y: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Dragging {
        anchor: (u32, u32),
    },
}

/// The side effect requested by a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing to do.
    None,
    /// A drag started at the given anchor.
    Started { anchor: (u32, u32) },
    /// Show a temporary rectangle without touching the persistent image.
    Preview(SelectionRect),
    /// The drag ended; the rectangle must be drawn, analysed and recorded.
    Finalize(SelectionRect),
}

#[derive(Debug, Clone, Default)]
pub struct Selector {
    state: SelectionState,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SelectionState::Dragging { .. })
    }

    /// Advances the state machine by one pointer event.
    ///
    /// | state    | event   | next     | transition            |
    /// |----------|---------|----------|-----------------------|
    /// | Idle     | press   | Dragging | `Started`             |
    /// | Dragging | move    | Dragging | `Preview`             |
    /// | Dragging | release | Idle     | `Finalize`            |
    /// | Dragging | press   | Dragging | `Started` (re-anchor) |
    /// | Idle     | move    | Idle     | `None`                |
    /// | Idle     | release | Idle     | `None`                |
    ///
    /// A press while dragging means the matching release was lost (e.g. it happened outside
    /// the window), so the gesture restarts from the new anchor.
    pub fn handle_event(&mut self, event: PointerEvent) -> Transition {
        match (self.state, event) {
            (SelectionState::Idle, PointerEvent::Press { x, y }) => {
                self.state = SelectionState::Dragging { anchor: (x, y) };
                Transition::Started { anchor: (x, y) }
            }
            (SelectionState::Dragging { anchor }, PointerEvent::Press { x, y }) => {
                debug!("press at ({x}, {y}) while dragging from {anchor:?}, restarting selection");
                self.state = SelectionState::Dragging { anchor: (x, y) };
                Transition::Started { anchor: (x, y) }
            }
            (SelectionState::Dragging { anchor }, PointerEvent::Move { x, y }) => {
                Transition::Preview(SelectionRect::from_corners(anchor, (x, y)))
            }
            (SelectionState::Dragging { anchor }, PointerEvent::Release { x, y }) => {
                self.state = SelectionState::Idle;
                Transition::Finalize(SelectionRect::from_corners(anchor, (x, y)))
            }
            (SelectionState::Idle, PointerEvent::Release { x, y }) => {
                debug!("ignoring release at ({x}, {y}) without a matching press");
                Transition::None
            }
            (SelectionState::Idle, PointerEvent::Move { .. }) => Transition::None,
        }
    }
}
