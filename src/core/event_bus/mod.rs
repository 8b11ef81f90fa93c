//=========================================================================
// Event Bus Module
//=========================================================================
//
// Publish/subscribe channel between the action registry and the
// application. The registry emits action names; components subscribe.
//
//=========================================================================

mod event_bus;
mod subscription;

pub use event_bus::EventBus;
pub use subscription::SubscriptionId;
