//=========================================================================
// Core Systems
//=========================================================================
//
// Platform-independent building blocks.
//
// Responsibilities:
// - `input`: physical events → gestures → gated actions
// - `event_bus`: name-keyed delivery of action emissions
// - `transition`: the request/notify boundary to the animation collaborator
//
// Notes:
// Everything here is single-threaded and synchronous. The only thread
// boundary is the transition queue.
//
//=========================================================================

pub mod event_bus;
pub mod input;
pub mod transition;
