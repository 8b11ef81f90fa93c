//=========================================================================
// Triggers
//=========================================================================
//
// A trigger is what an action listens for: either a physical event kind
// delivered by the surface, or a gesture the classifier synthesizes.
//
// Expansion (fixed, exhaustive):
//   DragStart | DragMove | DragEnd  → pointerdown, pointermove, pointerup
//   Click                           → pointerdown, pointerup
//   HoverIn | HoverOut              → pointermove
//   Physical(kind)                  → kind
//
// The expansion decides which physical listeners get installed.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use super::error::InputError;
use super::event::PhysicalKind;

/// Marker that forces a trigger string to be read as a gesture name.
pub const GESTURE_MARKER: char = ':';

//=== Gesture =============================================================

/// Gestures derived by the classifier from physical events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Gesture {
    HoverIn,
    HoverOut,
    DragStart,
    DragMove,
    DragEnd,
    Click,
}

impl Gesture {
    pub const ALL: [Gesture; 6] = [
        Self::HoverIn,
        Self::HoverOut,
        Self::DragStart,
        Self::DragMove,
        Self::DragEnd,
        Self::Click,
    ];

    /// Canonical (unprefixed) gesture name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::HoverIn => "hoverIn",
            Self::HoverOut => "hoverOut",
            Self::DragStart => "dragStart",
            Self::DragMove => "dragMove",
            Self::DragEnd => "dragEnd",
            Self::Click => "click",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.name() == name)
    }

    /// Physical kinds the classifier needs to observe to derive this gesture.
    pub const fn physical_sources(self) -> &'static [PhysicalKind] {
        const DRAG: &[PhysicalKind] = &[
            PhysicalKind::PointerDown,
            PhysicalKind::PointerMove,
            PhysicalKind::PointerUp,
        ];
        const CLICK: &[PhysicalKind] = &[PhysicalKind::PointerDown, PhysicalKind::PointerUp];
        const HOVER: &[PhysicalKind] = &[PhysicalKind::PointerMove];

        match self {
            Self::DragStart | Self::DragMove | Self::DragEnd => DRAG,
            Self::Click => CLICK,
            Self::HoverIn | Self::HoverOut => HOVER,
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", GESTURE_MARKER, self.name())
    }
}

//=== Trigger =============================================================

/// What an action listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Trigger {
    /// A raw event kind, bound directly to the surface.
    Physical(PhysicalKind),

    /// A classifier gesture, never bound directly.
    Synthetic(Gesture),
}

impl Trigger {
    /// Parses a trigger string on behalf of `action` (used in error reports).
    ///
    /// - `":name"` must be a gesture.
    /// - A bare gesture name (`"click"`, `"dragStart"`) is a gesture.
    /// - Otherwise it must be a physical event name.
    pub fn parse(action: &str, raw: &str) -> Result<Self, InputError> {
        if let Some(name) = raw.strip_prefix(GESTURE_MARKER) {
            if name.is_empty() {
                return Err(InputError::EmptyTrigger {
                    action: action.to_owned(),
                });
            }
            return Gesture::from_name(name)
                .map(Self::Synthetic)
                .ok_or_else(|| InputError::UnknownGesture {
                    action: action.to_owned(),
                    trigger: raw.to_owned(),
                });
        }

        if raw.is_empty() {
            return Err(InputError::EmptyTrigger {
                action: action.to_owned(),
            });
        }

        if let Some(gesture) = Gesture::from_name(raw) {
            return Ok(Self::Synthetic(gesture));
        }

        PhysicalKind::from_name(raw)
            .map(Self::Physical)
            .ok_or_else(|| InputError::UnknownEvent {
                action: action.to_owned(),
                trigger: raw.to_owned(),
            })
    }

    /// Physical kinds that must be installed on the surface for this trigger.
    pub fn physical_sources(&self) -> &[PhysicalKind] {
        match self {
            Self::Physical(kind) => std::slice::from_ref(kind),
            Self::Synthetic(gesture) => gesture.physical_sources(),
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, Self::Synthetic(_))
    }
}

impl From<PhysicalKind> for Trigger {
    fn from(kind: PhysicalKind) -> Self {
        Self::Physical(kind)
    }
}

impl From<Gesture> for Trigger {
    fn from(gesture: Gesture) -> Self {
        Self::Synthetic(gesture)
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Physical(kind) => fmt::Display::fmt(kind, f),
            Self::Synthetic(gesture) => fmt::Display::fmt(gesture, f),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
