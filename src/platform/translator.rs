//=========================================================================
// Winit Translator
//=========================================================================
//
// Converts Winit window events into physical events.
//
// Architecture:
//   WindowEvent → WinitTranslator → PhysicalEvent → InputManager::handle
//
// Stateful tracking:
// - Modifiers from `ModifiersChanged`, applied to every later event
// - Last cursor position, attached to button and wheel events (Winit does
//   not report coordinates for those). It survives `CursorLeft`, so a
//   release outside the window still ends the press.
// - Window size, to place the pointer just past the nearest edge when the
//   cursor leaves
// - The primary touch contact
//
// Touches are delivered as pointer kinds, the way browsers surface them
// through pointer events, so one table serves mouse and touch alike. Only
// the first contact drives the pointer; other fingers are dropped until it
// lifts.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;
use winit::{
    event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, TouchPhase, WindowEvent},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{KeyCode, Modifiers, MouseButton, PhysicalEvent, PhysicalKind};

/// Pixels per wheel line for `LineDelta` scrolling.
const LINE_HEIGHT: f32 = 16.0;

//=== WinitTranslator =====================================================

#[derive(Debug, Default)]
pub struct WinitTranslator {
    modifiers: Modifiers,
    cursor: Option<(f32, f32)>,
    size: (f32, f32),
    primary_touch: Option<u64>,
}

impl WinitTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translates one window event. Events with no physical counterpart
    /// return `None`.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<PhysicalEvent> {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.update_modifiers(modifiers.state());
                None
            }

            WindowEvent::CursorMoved { position, .. } => {
                Some(self.cursor_moved(position.x as f32, position.y as f32))
            }

            WindowEvent::CursorLeft { .. } => self.cursor_left(),

            WindowEvent::MouseInput { state, button, .. } => self.mouse_input(*button, *state),

            WindowEvent::MouseWheel { delta, .. } => self.mouse_wheel(*delta),

            WindowEvent::KeyboardInput { event, .. } => match event.physical_key {
                PhysicalKey::Code(code) => self.key(KeyCode::from(code), event.state, event.repeat),
                PhysicalKey::Unidentified(_) => None,
            },

            WindowEvent::Touch(touch) => {
                let pressure = touch.force.map(|force| force.normalized() as f32);
                self.touch(
                    touch.id,
                    touch.phase,
                    touch.location.x as f32,
                    touch.location.y as f32,
                    pressure,
                )
            }

            _ => None,
        }
    }

    //--- Modifier State ---------------------------------------------------

    pub fn update_modifiers(&mut self, state: ModifiersState) {
        self.modifiers = Modifiers::from(state);
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn cursor(&self) -> Option<(f32, f32)> {
        self.cursor
    }

    /// Inner window size in physical pixels.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = (width, height);
    }

    //--- Per-source Conversions -------------------------------------------

    pub fn cursor_moved(&mut self, x: f32, y: f32) -> PhysicalEvent {
        self.cursor = Some((x, y));
        PhysicalEvent::pointer_move(x, y).with_modifiers(self.modifiers)
    }

    /// Pointer leaving the window: a move to just past the nearest window
    /// edge, so the hit test fails and hover ends. The position is kept for
    /// a release that arrives while the cursor is outside.
    pub fn cursor_left(&mut self) -> Option<PhysicalEvent> {
        let (x, y) = self.cursor?;
        let (exit_x, exit_y) = self.exit_point(x, y);
        trace!(target: "platform::input", "Cursor left at ({}, {})", exit_x, exit_y);
        Some(self.cursor_moved(exit_x, exit_y))
    }

    /// Button press/release at the last cursor position. Dropped until the
    /// first cursor position is known.
    pub fn mouse_input(&self, button: WinitMouseButton, state: ElementState) -> Option<PhysicalEvent> {
        let Some((x, y)) = self.cursor else {
            trace!(target: "platform::input", "Mouse {:?} ignored: no cursor position yet", button);
            return None;
        };

        let kind = match state {
            ElementState::Pressed => PhysicalKind::PointerDown,
            ElementState::Released => PhysicalKind::PointerUp,
        };

        Some(
            PhysicalEvent::pointer(kind, x, y)
                .with_button(MouseButton::from(button))
                .with_modifiers(self.modifiers),
        )
    }

    pub fn mouse_wheel(&self, delta: MouseScrollDelta) -> Option<PhysicalEvent> {
        let (x, y) = self.cursor?;
        let (dx, dy) = match delta {
            MouseScrollDelta::LineDelta(dx, dy) => (dx * LINE_HEIGHT, dy * LINE_HEIGHT),
            MouseScrollDelta::PixelDelta(pos) => (pos.x as f32, pos.y as f32),
        };
        Some(PhysicalEvent::wheel(x, y, dx, dy).with_modifiers(self.modifiers))
    }

    /// Key press/release. Unmapped keys and auto-repeats are dropped.
    pub fn key(&self, key: KeyCode, state: ElementState, repeat: bool) -> Option<PhysicalEvent> {
        if key == KeyCode::Unidentified || repeat {
            return None;
        }

        let event = match state {
            ElementState::Pressed => PhysicalEvent::key_down(key),
            ElementState::Released => PhysicalEvent::key_up(key),
        };
        Some(event.with_modifiers(self.modifiers))
    }

    /// Touch contact `id`. Contacts other than the primary one return `None`.
    pub fn touch(
        &mut self,
        id: u64,
        phase: TouchPhase,
        x: f32,
        y: f32,
        pressure: Option<f32>,
    ) -> Option<PhysicalEvent> {
        if !self.track_contact(id, phase) {
            trace!(target: "platform::input", "Touch {} ignored: not the primary contact", id);
            return None;
        }

        let kind = match phase {
            TouchPhase::Started => PhysicalKind::PointerDown,
            TouchPhase::Moved => PhysicalKind::PointerMove,
            TouchPhase::Ended => PhysicalKind::PointerUp,
            TouchPhase::Cancelled => PhysicalKind::PointerCancel,
        };

        self.cursor = Some((x, y));
        let event = PhysicalEvent::pointer(kind, x, y).with_modifiers(self.modifiers);
        Some(match pressure {
            Some(p) => event.with_pressure(p),
            None => event,
        })
    }

    //--- Internal Helpers -------------------------------------------------

    /// Updates the primary contact and reports whether `id` is it.
    fn track_contact(&mut self, id: u64, phase: TouchPhase) -> bool {
        match phase {
            TouchPhase::Started if self.primary_touch.is_none() => {
                self.primary_touch = Some(id);
                true
            }
            TouchPhase::Started => false,
            TouchPhase::Moved => self.primary_touch == Some(id),
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.primary_touch != Some(id) {
                    return false;
                }
                self.primary_touch = None;
                true
            }
        }
    }

    /// One pixel past the window edge closest to `(x, y)`. Without a known
    /// size the pointer exits to the left.
    fn exit_point(&self, x: f32, y: f32) -> (f32, f32) {
        let (width, height) = self.size;
        if !(width > 0.0 && height > 0.0) {
            return (-1.0, y);
        }

        let exits = [
            (x, (-1.0, y)),
            (width - x, (width + 1.0, y)),
            (y, (x, -1.0)),
            (height - y, (x, height + 1.0)),
        ];
        exits
            .into_iter()
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map_or((-1.0, y), |(_, point)| point)
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Winit normalizes platform keys (macOS Option → Alt, Cmd → Super).
impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
            meta: state.super_key(),
        }
    }
}

/// Maps A-Z, 0-9, arrows and common special keys; everything else is
/// `Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode as W;
        match code {
            W::Digit0 => KeyCode::Digit0,
            W::Digit1 => KeyCode::Digit1,
            W::Digit2 => KeyCode::Digit2,
            W::Digit3 => KeyCode::Digit3,
            W::Digit4 => KeyCode::Digit4,
            W::Digit5 => KeyCode::Digit5,
            W::Digit6 => KeyCode::Digit6,
            W::Digit7 => KeyCode::Digit7,
            W::Digit8 => KeyCode::Digit8,
            W::Digit9 => KeyCode::Digit9,

            W::KeyA => KeyCode::KeyA,
            W::KeyB => KeyCode::KeyB,
            W::KeyC => KeyCode::KeyC,
            W::KeyD => KeyCode::KeyD,
            W::KeyE => KeyCode::KeyE,
            W::KeyF => KeyCode::KeyF,
            W::KeyG => KeyCode::KeyG,
            W::KeyH => KeyCode::KeyH,
            W::KeyI => KeyCode::KeyI,
            W::KeyJ => KeyCode::KeyJ,
            W::KeyK => KeyCode::KeyK,
            W::KeyL => KeyCode::KeyL,
            W::KeyM => KeyCode::KeyM,
            W::KeyN => KeyCode::KeyN,
            W::KeyO => KeyCode::KeyO,
            W::KeyP => KeyCode::KeyP,
            W::KeyQ => KeyCode::KeyQ,
            W::KeyR => KeyCode::KeyR,
            W::KeyS => KeyCode::KeyS,
            W::KeyT => KeyCode::KeyT,
            W::KeyU => KeyCode::KeyU,
            W::KeyV => KeyCode::KeyV,
            W::KeyW => KeyCode::KeyW,
            W::KeyX => KeyCode::KeyX,
            W::KeyY => KeyCode::KeyY,
            W::KeyZ => KeyCode::KeyZ,

            W::ArrowUp => KeyCode::ArrowUp,
            W::ArrowDown => KeyCode::ArrowDown,
            W::ArrowLeft => KeyCode::ArrowLeft,
            W::ArrowRight => KeyCode::ArrowRight,

            W::Space => KeyCode::Space,
            W::Enter => KeyCode::Enter,
            W::Escape => KeyCode::Escape,
            W::Tab => KeyCode::Tab,
            W::Backspace => KeyCode::Backspace,
            W::Delete => KeyCode::Delete,

            _ => KeyCode::Unidentified,
        }
    }
}

/// Back/Forward/Other collapse into `Other`.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
