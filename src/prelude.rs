//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use card_gestures::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Input pipeline
pub use crate::core::input::{
    ActionState, ActionTable, Gate, GateError, Gesture, HitTarget, InputError, InputManager,
    KeyCode, Modifiers, MouseButton, PhysicalEvent, PhysicalKind, PointerState, ScreenPoint,
    ScreenRegion, Surface, SurfaceRect, TeardownHandle, Trigger,
};

// Event bus
pub use crate::core::event_bus::{EventBus, SubscriptionId};

// Transitions
pub use crate::core::transition::{
    Animator, ChannelAnimator, Easing, PendingTransition, Property, TargetId, TransitionHandle,
    TransitionRequest, TransitionStatus,
};

// Components
pub use crate::components::{Card, CardActions};

// Platform
pub use crate::platform::{Platform, PlatformError, WindowSurface};
