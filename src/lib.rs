//=========================================================================
// Card Gestures Library Root
//
// Gesture classification and action dispatch for interactive card scenes.
//
// Responsibilities:
// - Expose the input pipeline (`core::input`) and its event bus
// - Expose the transition boundary used by scene components
// - Provide a Winit host (`platform`) and a ready-made card component
//
// Typical usage:
// ```no_run
// use card_gestures::prelude::*;
// use std::rc::Rc;
//
// fn main() -> Result<(), Box<dyn std::error::Error>> {
//     let card = Card::new(TargetId(0));
//
//     let mut input = InputManager::builder(WindowSurface::new(800.0, 600.0))
//         .with_hit_target(ScreenRegion::centered(ScreenPoint::new(0.0, 0.0), 0.3, 0.4))
//         .build();
//     input.register(card.actions().table()?)?;
//
//     let (animator, _queue) = ChannelAnimator::new(64);
//     let mut card = card;
//     card.bind(input.bus(), Rc::new(animator));
//
//     Platform::new(input).run()?;
//     Ok(())
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the platform-independent pipeline. `components` holds scene
// objects built on it. `platform` hosts the pipeline in a Winit window.
//
pub mod components;
pub mod core;
pub mod platform;
pub mod prelude;

//--- Public Exports ------------------------------------------------------

pub use crate::core::input::InputManager;
pub use crate::platform::Platform;
