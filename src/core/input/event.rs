//=========================================================================
// Physical Event Types
//
// Defines the internal representation of low-level surface events.
//
// This module abstracts away host-specific input (DOM-style pointer/mouse/
// touch/keyboard events, Winit window events) into one portable format
// consumed by the gesture classifier and the action registry.
//
// Responsibilities:
// - Name every physical event kind a surface can deliver
// - Group kinds into classes (press, release, cancel, move, key)
// - Carry the payload each kind needs (client position, key, wheel delta)
// - Represent modifier key state (Shift, Ctrl, Alt, Meta)
//
// Event Flow:
// ```text
// Host surface (browser canvas, Winit window)
//         ↓
//    PhysicalEvent (this module)
//         ↓
//    GestureClassifier (derives hover / drag / click)
//         ↓
//    ActionRegistry (gated action emission)
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// The `Other` variant covers side buttons, macro buttons, and any
/// non-standard inputs. Touch contacts are reported as `Left` so that a
/// finger behaves like the primary button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    /// Primary button (typically left, or a touch contact).
    #[default]
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button (side buttons, thumb buttons, macro keys).
    Other,
}

impl MouseButton {
    /// Returns `true` for the button that drives press/drag/click gestures.
    #[inline]
    pub fn is_primary(self) -> bool {
        matches!(self, Self::Left)
    }
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    /// Directional navigation keys
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    /// Spacebar
    Space,

    /// Return/Enter key
    Enter,

    /// Escape key
    Escape,

    /// Tab key
    Tab,

    /// Backspace key
    Backspace,

    /// Delete key
    Delete,

    /// Fallback for keys not explicitly mapped by the host translation layer.
    Unidentified,
}

//=== Modifiers ===========================================================

/// Modifier key state at the time of an event.
///
/// Left/right variants are not distinguished. `meta` is the Command key on
/// macOS and the Windows/Super key elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// Shift key held.
    pub shift: bool,

    /// Ctrl key held.
    pub ctrl: bool,

    /// Alt (Option) key held.
    pub alt: bool,

    /// Meta (Command / Super) key held.
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Shift only.
    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// Ctrl only.
    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    /// Alt only.
    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };

    /// Meta only.
    pub const META: Self = Self {
        meta: true,
        ..Self::NONE
    };

    /// Returns `true` if no modifier is held.
    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }
}

//=== EventClass ==========================================================

/// Coarse grouping of physical kinds used by the gesture classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventClass {
    /// Pointer, mouse button or touch contact went down.
    Press,

    /// Pointer, mouse button or touch contact went up.
    Release,

    /// The host aborted the pointer/touch sequence.
    Cancel,

    /// Pointer, mouse or touch moved.
    Move,

    /// Keyboard key went down or up.
    Key,

    /// Anything else (wheel).
    Other,
}

//=== PhysicalKind ========================================================

/// Every physical event kind a surface can deliver.
///
/// Each kind has a canonical lowercase name matching the DOM event type
/// (`"pointerdown"`, `"keyup"`, ...). Listener installation is keyed by kind,
/// so one kind is bound to a surface at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PhysicalKind {
    MouseDown,
    MouseUp,
    MouseMove,
    PointerDown,
    PointerUp,
    PointerMove,
    PointerCancel,
    TouchStart,
    TouchEnd,
    TouchMove,
    TouchCancel,
    KeyDown,
    KeyUp,
    Wheel,
}

impl PhysicalKind {
    /// All kinds, in declaration order.
    pub const ALL: [PhysicalKind; 14] = [
        Self::MouseDown,
        Self::MouseUp,
        Self::MouseMove,
        Self::PointerDown,
        Self::PointerUp,
        Self::PointerMove,
        Self::PointerCancel,
        Self::TouchStart,
        Self::TouchEnd,
        Self::TouchMove,
        Self::TouchCancel,
        Self::KeyDown,
        Self::KeyUp,
        Self::Wheel,
    ];

    /// Canonical event name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::MouseDown => "mousedown",
            Self::MouseUp => "mouseup",
            Self::MouseMove => "mousemove",
            Self::PointerDown => "pointerdown",
            Self::PointerUp => "pointerup",
            Self::PointerMove => "pointermove",
            Self::PointerCancel => "pointercancel",
            Self::TouchStart => "touchstart",
            Self::TouchEnd => "touchend",
            Self::TouchMove => "touchmove",
            Self::TouchCancel => "touchcancel",
            Self::KeyDown => "keydown",
            Self::KeyUp => "keyup",
            Self::Wheel => "wheel",
        }
    }

    /// Looks a kind up by its canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Returns the classifier class of this kind.
    pub const fn class(self) -> EventClass {
        match self {
            Self::MouseDown | Self::PointerDown | Self::TouchStart => EventClass::Press,
            Self::MouseUp | Self::PointerUp | Self::TouchEnd => EventClass::Release,
            Self::PointerCancel | Self::TouchCancel => EventClass::Cancel,
            Self::MouseMove | Self::PointerMove | Self::TouchMove => EventClass::Move,
            Self::KeyDown | Self::KeyUp => EventClass::Key,
            Self::Wheel => EventClass::Other,
        }
    }

    /// For a cancel kind, the release kind of the same sequence. A surface
    /// listening for that release also delivers the cancel.
    pub const fn cancelled_release(self) -> Option<Self> {
        match self {
            Self::PointerCancel => Some(Self::PointerUp),
            Self::TouchCancel => Some(Self::TouchEnd),
            _ => None,
        }
    }
}

impl fmt::Display for PhysicalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//=== EventPayload ========================================================

/// Data carried by a physical event.
///
/// Client coordinates are surface pixels with a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventPayload {
    /// Pointer, mouse or touch sample.
    Pointer {
        x: f32,
        y: f32,
        button: MouseButton,
        /// Normalized contact pressure (0..1) when the host reports one.
        pressure: Option<f32>,
    },

    /// Keyboard key.
    Key(KeyCode),

    /// Wheel delta at a client position.
    Wheel { x: f32, y: f32, dx: f32, dy: f32 },

    /// No payload.
    None,
}

//=== PhysicalEvent =======================================================

/// One raw event as delivered by the bound surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalEvent {
    pub kind: PhysicalKind,
    pub payload: EventPayload,
    pub modifiers: Modifiers,
}

impl PhysicalEvent {
    //--- Construction -----------------------------------------------------

    /// Creates a pointer-style event of the given kind at a client position.
    pub fn pointer(kind: PhysicalKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            payload: EventPayload::Pointer {
                x,
                y,
                button: MouseButton::Left,
                pressure: None,
            },
            modifiers: Modifiers::NONE,
        }
    }

    /// `pointerdown` at a client position (primary button).
    pub fn pointer_down(x: f32, y: f32) -> Self {
        Self::pointer(PhysicalKind::PointerDown, x, y)
    }

    /// `pointermove` to a client position.
    pub fn pointer_move(x: f32, y: f32) -> Self {
        Self::pointer(PhysicalKind::PointerMove, x, y)
    }

    /// `pointerup` at a client position (primary button).
    pub fn pointer_up(x: f32, y: f32) -> Self {
        Self::pointer(PhysicalKind::PointerUp, x, y)
    }

    /// `keydown` for a key.
    pub fn key_down(key: KeyCode) -> Self {
        Self {
            kind: PhysicalKind::KeyDown,
            payload: EventPayload::Key(key),
            modifiers: Modifiers::NONE,
        }
    }

    /// `keyup` for a key.
    pub fn key_up(key: KeyCode) -> Self {
        Self {
            kind: PhysicalKind::KeyUp,
            payload: EventPayload::Key(key),
            modifiers: Modifiers::NONE,
        }
    }

    /// `wheel` at a client position.
    pub fn wheel(x: f32, y: f32, dx: f32, dy: f32) -> Self {
        Self {
            kind: PhysicalKind::Wheel,
            payload: EventPayload::Wheel { x, y, dx, dy },
            modifiers: Modifiers::NONE,
        }
    }

    /// Returns a copy with a different button (pointer payloads only).
    pub fn with_button(mut self, button: MouseButton) -> Self {
        if let EventPayload::Pointer { button: b, .. } = &mut self.payload {
            *b = button;
        }
        self
    }

    /// Returns a copy with a contact pressure (pointer payloads only).
    pub fn with_pressure(mut self, pressure: f32) -> Self {
        if let EventPayload::Pointer { pressure: p, .. } = &mut self.payload {
            *p = Some(pressure.clamp(0.0, 1.0));
        }
        self
    }

    /// Returns a copy with updated modifiers.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    //--- Queries ----------------------------------------------------------

    /// Client position, if this event carries one.
    pub fn client_position(&self) -> Option<(f32, f32)> {
        match self.payload {
            EventPayload::Pointer { x, y, .. } | EventPayload::Wheel { x, y, .. } => Some((x, y)),
            _ => None,
        }
    }

    /// Button of a pointer payload.
    pub fn button(&self) -> Option<MouseButton> {
        match self.payload {
            EventPayload::Pointer { button, .. } => Some(button),
            _ => None,
        }
    }

    /// Pressure of a pointer payload, if reported.
    pub fn pressure(&self) -> Option<f32> {
        match self.payload {
            EventPayload::Pointer { pressure, .. } => pressure,
            _ => None,
        }
    }

    /// Key of a keyboard payload.
    pub fn key(&self) -> Option<KeyCode> {
        match self.payload {
            EventPayload::Key(key) => Some(key),
            _ => None,
        }
    }

    /// Shorthand for `self.kind.class()`.
    #[inline]
    pub fn class(&self) -> EventClass {
        self.kind.class()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
