//=========================================================================
// Input System
//=========================================================================
//
// Turns raw physical events from a bound surface into named actions.
//
// Responsibilities:
// - Model physical events and the triggers actions listen for
// - Derive hover, drag and click gestures from pointer events
// - Route gestures and raw events to gated, application-defined actions
// - Install and tear down the surface listeners those actions need
//
// Architecture:
//   PhysicalEvent → GestureClassifier → ActionRegistry → EventBus
//                         ↓                   ↑
//                   PointerState ── PointerView ── ActionState
//
//=========================================================================

//=== Submodules ==========================================================

pub mod action;
pub mod action_registry;
pub mod classifier;
pub mod error;
pub mod event;
pub mod hit_test;
pub mod input_manager;
pub mod listeners;
pub mod pointer_state;
pub mod trigger;

//=== Public Exports ======================================================

pub use action::{ActionBuilder, ActionDefinition, ActionState, ActionTable, ActionTableBuilder, Gate};
pub use action_registry::ActionRegistry;
pub use classifier::{GestureClassifier, DEFAULT_DRAG_SLOP};
pub use error::{GateError, InputError};
pub use event::{
    EventClass, EventPayload, KeyCode, Modifiers, MouseButton, PhysicalEvent, PhysicalKind,
};
pub use hit_test::{HitTarget, HitTester, ScreenRegion};
pub use input_manager::{InputManager, InputManagerBuilder, TeardownHandle};
pub use listeners::{ListenerSet, Surface};
pub use pointer_state::{PointerState, PointerView, ScreenPoint, SurfaceRect};
pub use trigger::{Gesture, Trigger};
