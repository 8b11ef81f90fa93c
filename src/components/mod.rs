//=========================================================================
// Components
//=========================================================================
//
// Scene objects that react to actions by requesting transitions.
//
//=========================================================================

pub mod card;

pub use card::{Card, CardActions, CardPose, DEFAULT_DRAG_FACTOR, DEFAULT_HOVER_SCALE};
