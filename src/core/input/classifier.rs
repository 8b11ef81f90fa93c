//=========================================================================
// Gesture Classifier
//=========================================================================
//
// Stateful translator from physical events to gestures.
//
// Per event:
//   clear edges → update position/movement → hit test → hover edge
//               → press / move / release / cancel edges → gestures
//
// Gestures come out in dispatch order: hover, then drag, then click.
// The raw physical trigger is dispatched after them by the manager.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::Cell;
use std::rc::Rc;

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::event::{EventClass, PhysicalEvent};
use super::hit_test::HitTester;
use super::pointer_state::{PointerState, PointerView, SurfaceRect};
use super::trigger::Gesture;

/// Default distance (client pixels) a pressed pointer must travel before a
/// drag starts. Shorter movements still end in a click.
pub const DEFAULT_DRAG_SLOP: f32 = 10.0;

//=== GestureClassifier ===================================================

/// Owns the pointer state of one surface and derives gestures from it.
#[derive(Debug)]
pub struct GestureClassifier {
    state: Rc<Cell<PointerState>>,
    hit_tester: HitTester,
    drag_slop: f32,

    /// Client position of the press that may turn into a drag.
    press_origin: Option<(f32, f32)>,

    /// Whether any positioned event has been seen yet.
    has_position: bool,
}

impl GestureClassifier {
    pub fn new(hit_tester: HitTester, drag_slop: f32) -> Self {
        Self {
            state: Rc::new(Cell::new(PointerState::default())),
            hit_tester,
            drag_slop,
            press_origin: None,
            has_position: false,
        }
    }

    /// Read-only view sharing this classifier's state.
    pub fn view(&self) -> PointerView {
        PointerView::new(Rc::clone(&self.state))
    }

    /// Current pointer state.
    pub fn state(&self) -> PointerState {
        self.state.get()
    }

    pub fn drag_slop(&self) -> f32 {
        self.drag_slop
    }

    /// Returns the pointer to its idle state (used on teardown).
    pub fn reset(&mut self) {
        self.state.set(PointerState::default());
        self.press_origin = None;
        self.has_position = false;
    }

    //--- Classification ---------------------------------------------------

    /// Consumes one physical event and returns the gestures it produced.
    pub fn handle(&mut self, event: &PhysicalEvent, bounds: SurfaceRect) -> Vec<Gesture> {
        let mut state = self.state.get();
        let mut gestures = Vec::with_capacity(2);

        state.clear_edges();

        //--- Position & hit test -----------------------------------------
        if let Some((cx, cy)) = event.client_position() {
            let was_hit = state.is_hit_test_success;

            if let Some(point) = bounds.normalize(cx, cy) {
                if self.has_position {
                    state.movement_x += point.x - state.position.x;
                    state.movement_y += point.y - state.position.y;
                }
                state.position = point;
                self.has_position = true;
            }

            state.is_hit_test_success = self.hit_tester.test(state.position);

            match (was_hit, state.is_hit_test_success) {
                (false, true) => gestures.push(Gesture::HoverIn),
                (true, false) => gestures.push(Gesture::HoverOut),
                _ => {}
            }
        }

        //--- Press / drag / release edges --------------------------------
        match event.class() {
            EventClass::Press => self.on_press(event, &mut state),
            EventClass::Move => self.on_move(event, &mut state, &mut gestures),
            EventClass::Release => self.on_release(&mut state, &mut gestures, true),
            EventClass::Cancel => self.on_release(&mut state, &mut gestures, false),
            EventClass::Key | EventClass::Other => {}
        }

        if !gestures.is_empty() {
            trace!(target: "input::classifier", "{} -> {:?}", event.kind, gestures);
        }

        self.state.set(state);
        gestures
    }

    //--- Internal Helpers -------------------------------------------------

    fn on_press(&mut self, event: &PhysicalEvent, state: &mut PointerState) {
        if !event.button().map_or(true, |b| b.is_primary()) {
            return;
        }
        if !state.is_hit_test_success || state.is_pressed {
            return;
        }

        state.is_pressed = true;
        state.is_just_pressed = true;
        state.press_position = state.position;
        self.press_origin = event.client_position();
    }

    fn on_move(&mut self, event: &PhysicalEvent, state: &mut PointerState, out: &mut Vec<Gesture>) {
        if !state.is_pressed {
            return;
        }

        if state.is_dragging {
            out.push(Gesture::DragMove);
            return;
        }

        if self.exceeds_slop(event) {
            state.is_dragging = true;
            state.reset_movement();
            out.push(Gesture::DragStart);
        }
    }

    fn on_release(&mut self, state: &mut PointerState, out: &mut Vec<Gesture>, allow_click: bool) {
        if !state.is_pressed {
            return;
        }

        state.is_pressed = false;
        state.is_just_released = true;
        self.press_origin = None;

        if state.is_dragging {
            state.is_dragging = false;
            state.reset_movement();
            out.push(Gesture::DragEnd);
        } else if allow_click {
            out.push(Gesture::Click);
        }
    }

    fn exceeds_slop(&self, event: &PhysicalEvent) -> bool {
        match (self.press_origin, event.client_position()) {
            (Some((ox, oy)), Some((x, y))) => {
                let (dx, dy) = (x - ox, y - oy);
                (dx * dx + dy * dy).sqrt() > self.drag_slop
            }
            // A press without an origin (e.g. a host that omits coordinates)
            // starts dragging on its first move.
            _ => true,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
