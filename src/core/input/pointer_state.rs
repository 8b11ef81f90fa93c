//=========================================================================
// Pointer State
//=========================================================================
//
// Rolling pointer state for one bound surface.
//
// Architecture:
//   PhysicalEvent → GestureClassifier (sole writer) → Rc<Cell<PointerState>>
//                                                          ↓
//                      ActionState / handlers ← PointerView (read-only)
//
// Edge flags (`is_just_pressed`, `is_just_released`) are cleared at the
// start of every event and may be set again by that same event.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

//=== ScreenPoint =========================================================

/// Normalized surface position: both axes in -1..1, origin at the center,
/// y pointing up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

//=== SurfaceRect =========================================================

/// Bounding rectangle of the bound surface, in client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A rectangle at the origin with the given size.
    pub const fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Maps a client position into normalized screen space.
    ///
    /// Returns `None` for a degenerate (empty) rectangle.
    pub fn normalize(&self, client_x: f32, client_y: f32) -> Option<ScreenPoint> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return None;
        }

        Some(ScreenPoint {
            x: (client_x - self.left) / self.width * 2.0 - 1.0,
            y: -((client_y - self.top) / self.height * 2.0 - 1.0),
        })
    }
}

//=== PointerState ========================================================

/// Snapshot of the pointer as seen by the gesture classifier.
///
/// Only the classifier mutates this; everyone else reads copies through a
/// [`PointerView`].
#[derive(Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub(super) position: ScreenPoint,
    pub(super) is_pressed: bool,
    pub(super) is_just_pressed: bool,
    pub(super) is_just_released: bool,
    pub(super) is_hit_test_success: bool,
    pub(super) is_dragging: bool,
    pub(super) press_position: ScreenPoint,
    pub(super) movement_x: f32,
    pub(super) movement_y: f32,
}

impl PointerState {
    /// Last known normalized position.
    pub fn position(&self) -> ScreenPoint {
        self.position
    }

    /// `true` while a press that started over the target is held.
    pub fn is_pressed(&self) -> bool {
        self.is_pressed
    }

    /// `true` only during the event that started the press.
    pub fn is_just_pressed(&self) -> bool {
        self.is_just_pressed
    }

    /// `true` only during the event that ended the press.
    pub fn is_just_released(&self) -> bool {
        self.is_just_released
    }

    /// Result of the latest hit test (always `false` without a target).
    pub fn is_hit_test_success(&self) -> bool {
        self.is_hit_test_success
    }

    /// `true` between a drag start and the end of its press.
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Normalized position of the latest press that started over the target.
    pub fn press_position(&self) -> ScreenPoint {
        self.press_position
    }

    /// Horizontal movement (normalized units) since the last drag start.
    pub fn movement_x(&self) -> f32 {
        self.movement_x
    }

    /// Vertical movement (normalized units) since the last drag start.
    pub fn movement_y(&self) -> f32 {
        self.movement_y
    }

    //--- Mutation (classifier only) ---------------------------------------

    pub(super) fn clear_edges(&mut self) {
        self.is_just_pressed = false;
        self.is_just_released = false;
    }

    pub(super) fn reset_movement(&mut self) {
        self.movement_x = 0.0;
        self.movement_y = 0.0;
    }
}

impl fmt::Debug for PointerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerState")
            .field("position", &(self.position.x, self.position.y))
            .field("pressed", &self.is_pressed)
            .field("just_pressed", &self.is_just_pressed)
            .field("just_released", &self.is_just_released)
            .field("hit", &self.is_hit_test_success)
            .field("dragging", &self.is_dragging)
            .field("press_position", &(self.press_position.x, self.press_position.y))
            .field("movement", &(self.movement_x, self.movement_y))
            .finish()
    }
}

//=== PointerView =========================================================

/// Read-only back-reference to a classifier's pointer state.
///
/// Cloning the view shares the same underlying state; it never copies it.
#[derive(Clone)]
pub struct PointerView(Rc<Cell<PointerState>>);

impl PointerView {
    pub(super) fn new(cell: Rc<Cell<PointerState>>) -> Self {
        Self(cell)
    }

    /// Current pointer state.
    pub fn get(&self) -> PointerState {
        self.0.get()
    }
}

impl fmt::Debug for PointerView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.get(), f)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_maps_corners_and_center() {
        let rect = SurfaceRect::sized(200.0, 100.0);

        assert_eq!(rect.normalize(0.0, 0.0), Some(ScreenPoint::new(-1.0, 1.0)));
        assert_eq!(rect.normalize(200.0, 100.0), Some(ScreenPoint::new(1.0, -1.0)));
        assert_eq!(rect.normalize(100.0, 50.0), Some(ScreenPoint::new(0.0, 0.0)));
    }

    #[test]
    fn normalize_respects_offset() {
        let rect = SurfaceRect::new(50.0, 20.0, 100.0, 100.0);
        assert_eq!(rect.normalize(100.0, 70.0), Some(ScreenPoint::new(0.0, 0.0)));
    }

    #[test]
    fn normalize_rejects_empty_rect() {
        assert_eq!(SurfaceRect::sized(0.0, 100.0).normalize(1.0, 1.0), None);
        assert_eq!(SurfaceRect::default().normalize(1.0, 1.0), None);
    }

    #[test]
    fn default_state_is_idle() {
        let state = PointerState::default();
        assert!(!state.is_pressed());
        assert!(!state.is_dragging());
        assert!(!state.is_hit_test_success());
        assert_eq!(state.movement_x(), 0.0);
    }

    #[test]
    fn clear_edges_keeps_persistent_flags() {
        let mut state = PointerState {
            is_pressed: true,
            is_just_pressed: true,
            is_just_released: false,
            ..PointerState::default()
        };

        state.clear_edges();

        assert!(state.is_pressed());
        assert!(!state.is_just_pressed());
        assert!(!state.is_just_released());
    }

    #[test]
    fn view_observes_later_writes() {
        let cell = Rc::new(Cell::new(PointerState::default()));
        let view = PointerView::new(Rc::clone(&cell));

        let mut next = cell.get();
        next.is_dragging = true;
        cell.set(next);

        assert!(view.get().is_dragging());
    }
}
