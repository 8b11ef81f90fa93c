//=========================================================================
// Transition Boundary
//=========================================================================
//
// The one capability components need from the animation collaborator:
// "move this property of this target to that value and tell me when it
// is done". Interpolation and timeline scheduling stay outside.
//
//=========================================================================

mod channel_animator;
mod request;

pub use channel_animator::{ChannelAnimator, PendingTransition};
pub use request::{
    Easing, Property, TargetId, TimelineLabel, TransitionHandle, TransitionRequest,
    TransitionStatus, DEFAULT_DURATION,
};

//=== Animator ============================================================

/// Accepts transition requests on behalf of the animation collaborator.
pub trait Animator {
    fn request(&self, request: TransitionRequest) -> TransitionHandle;
}

impl<A: Animator + ?Sized> Animator for std::rc::Rc<A> {
    fn request(&self, request: TransitionRequest) -> TransitionHandle {
        (**self).request(request)
    }
}
