//=========================================================================
// Input Manager
//=========================================================================
//
// Binds the gesture pipeline to one surface.
//
// Architecture:
// ```text
//   InputManagerBuilder ──build()──> InputManager<S: Surface>
//       │                               │
//       ├─ with_hit_target()            ├─ register(ActionTable)
//       └─ with_drag_slop()             ├─ handle(&PhysicalEvent)
//                                       │     ├─ GestureClassifier
//                                       │     ├─ ActionRegistry (gestures, then raw)
//                                       │     └─ EventBus<ActionState>
//                                       ├─ destroy()
//                                       └─ teardown_handle() → request() from a handler
// ```
//
// Synthetic gestures of an event are fully dispatched before the raw
// physical trigger of that same event.
//
// Handlers cannot borrow the manager that is dispatching to them, so a
// teardown requested from inside one is deferred: the bus is cleared at
// once and the listeners are removed before `handle` returns.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::Cell;
use std::fmt;
use std::iter;
use std::rc::{Rc, Weak};

//=== External Dependencies ===============================================

use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use super::action::{ActionState, ActionTable};
use super::action_registry::ActionRegistry;
use super::classifier::{GestureClassifier, DEFAULT_DRAG_SLOP};
use super::error::InputError;
use super::event::{PhysicalEvent, PhysicalKind};
use super::hit_test::{HitTarget, HitTester};
use super::listeners::Surface;
use super::pointer_state::PointerState;
use super::trigger::Trigger;
use crate::core::event_bus::{EventBus, SubscriptionId};

//=== InputManagerBuilder =================================================

/// Builder for [`InputManager`].
///
/// # Default Values
///
/// - **Hit target**: none (every hit test fails)
/// - **Drag slop**: [`DEFAULT_DRAG_SLOP`] pixels
pub struct InputManagerBuilder<S: Surface> {
    surface: S,
    hit_target: Option<Box<dyn HitTarget>>,
    drag_slop: f32,
}

impl<S: Surface> InputManagerBuilder<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            hit_target: None,
            drag_slop: DEFAULT_DRAG_SLOP,
        }
    }

    /// Sets the camera + target collaborator used for hit testing.
    pub fn with_hit_target(mut self, target: impl HitTarget + 'static) -> Self {
        self.hit_target = Some(Box::new(target));
        self
    }

    /// Sets the distance in client pixels a press must travel before it
    /// becomes a drag. `0.0` makes the first move start the drag.
    ///
    /// # Panics
    ///
    /// Panics if `slop` is negative or not finite.
    pub fn with_drag_slop(mut self, slop: f32) -> Self {
        assert!(
            slop.is_finite() && slop >= 0.0,
            "Drag slop must be finite and non-negative, got {}",
            slop
        );
        self.drag_slop = slop;
        self
    }

    pub fn build(self) -> InputManager<S> {
        info!(
            target: "input",
            "Building input manager (hit target: {}, drag slop: {}px)",
            self.hit_target.is_some(),
            self.drag_slop
        );

        InputManager {
            surface: self.surface,
            classifier: GestureClassifier::new(HitTester::new(self.hit_target), self.drag_slop),
            registry: ActionRegistry::new(),
            bus: Rc::new(EventBus::new()),
            teardown: Rc::new(Cell::new(false)),
        }
    }
}

//=== TeardownHandle ======================================================

/// Deferred [`InputManager::destroy`] that action handlers can hold.
///
/// `request()` clears the bus immediately, which also stops the delivery
/// in flight. The manager removes its listeners and actions before the
/// current `handle` call returns, or at the start of the next one when
/// requested outside dispatch.
#[derive(Debug, Clone)]
pub struct TeardownHandle {
    requested: Rc<Cell<bool>>,
    bus: Weak<EventBus<ActionState>>,
}

impl TeardownHandle {
    pub fn request(&self) {
        if self.requested.replace(true) {
            return;
        }
        if let Some(bus) = self.bus.upgrade() {
            bus.destroy();
        }
        debug!(target: "input", "Teardown requested");
    }

    pub fn is_requested(&self) -> bool {
        self.requested.get()
    }
}

//=== InputManager ========================================================

/// Gesture pipeline bound to a single surface.
///
/// # Example
///
/// ```
/// use card_gestures::prelude::*;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// struct Canvas;
///
/// impl Surface for Canvas {
///     fn bounds(&self) -> SurfaceRect {
///         SurfaceRect::sized(200.0, 200.0)
///     }
///     fn install(&mut self, _: PhysicalKind) {}
///     fn uninstall(&mut self, _: PhysicalKind) {}
/// }
///
/// let mut input = InputManager::builder(Canvas)
///     .with_hit_target(ScreenRegion::centered(ScreenPoint::new(0.0, 0.0), 0.5, 0.5))
///     .build();
///
/// input
///     .register(ActionTable::builder().action("selected", |a| a.on("click")).build()?)?;
///
/// let clicks = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&clicks);
/// input.on("selected", move |_| counter.set(counter.get() + 1));
///
/// input.handle(&PhysicalEvent::pointer_down(100.0, 100.0));
/// input.handle(&PhysicalEvent::pointer_up(100.0, 100.0));
///
/// assert_eq!(clicks.get(), 1);
/// # Ok::<(), InputError>(())
/// ```
pub struct InputManager<S: Surface> {
    surface: S,
    classifier: GestureClassifier,
    registry: ActionRegistry,
    bus: Rc<EventBus<ActionState>>,
    teardown: Rc<Cell<bool>>,
}

impl<S: Surface> InputManager<S> {
    pub fn builder(surface: S) -> InputManagerBuilder<S> {
        InputManagerBuilder::new(surface)
    }

    /// Manager with no hit target and the default drag slop.
    pub fn new(surface: S) -> Self {
        Self::builder(surface).build()
    }

    //--- Registration -----------------------------------------------------

    /// Registers an action table and installs the listeners it needs.
    pub fn register(&mut self, table: ActionTable) -> Result<(), InputError> {
        self.registry.register(table, &mut self.surface)
    }

    //--- Event Handling ---------------------------------------------------

    /// Feeds one physical event through the pipeline.
    ///
    /// Only kinds the manager [observes](Self::observes) reach the
    /// classifier; the rest are ignored. Pointer state therefore tracks
    /// just the listened kinds: a table gating `keyup` on
    /// `is_hit_test_success()` also needs a trigger that installs
    /// `pointermove` (such as `:hoverIn`) to see the pointer move.
    ///
    /// Returns the number of actions emitted.
    pub fn handle(&mut self, event: &PhysicalEvent) -> usize {
        if self.teardown.get() {
            self.destroy();
            return 0;
        }
        if !self.observes(event.kind) {
            return 0;
        }

        let gestures = self.classifier.handle(event, self.surface.bounds());
        let pointer = self.classifier.view();
        let mut emitted = 0;

        let triggers = gestures
            .into_iter()
            .map(Trigger::Synthetic)
            .chain(iter::once(Trigger::Physical(event.kind)));

        for trigger in triggers {
            emitted += self.registry.dispatch(trigger, event, &pointer, &self.bus);

            if self.teardown.get() {
                debug!(target: "input", "Tearing down after {} as requested by a handler", trigger);
                self.destroy();
                break;
            }
        }

        if emitted > 0 {
            trace!(target: "input", "{} → {} actions", event.kind, emitted);
        }
        emitted
    }

    /// Whether `handle` processes events of `kind`: installed kinds, plus
    /// cancels whose release kind is installed.
    pub fn observes(&self, kind: PhysicalKind) -> bool {
        self.registry.listens_to(kind)
            || kind
                .cancelled_release()
                .is_some_and(|release| self.registry.listens_to(release))
    }

    //--- Subscriptions ----------------------------------------------------

    pub fn on<F>(&self, action: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&ActionState) + 'static,
    {
        self.bus.on(action, handler)
    }

    pub fn once<F>(&self, action: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&ActionState) + 'static,
    {
        self.bus.once(action, handler)
    }

    pub fn off(&self, action: &str, id: SubscriptionId) -> bool {
        self.bus.off(action, id)
    }

    /// Shared handle to the bus, for components that subscribe themselves.
    pub fn bus(&self) -> &Rc<EventBus<ActionState>> {
        &self.bus
    }

    //--- Queries ----------------------------------------------------------

    pub fn pointer(&self) -> PointerState {
        self.classifier.state()
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    //--- Lifecycle --------------------------------------------------------

    /// Handle for requesting [`destroy`](Self::destroy) from inside an
    /// action handler.
    pub fn teardown_handle(&self) -> TeardownHandle {
        TeardownHandle {
            requested: Rc::clone(&self.teardown),
            bus: Rc::downgrade(&self.bus),
        }
    }

    /// Uninstalls all listeners, forgets all actions and subscriptions and
    /// resets the pointer. Idempotent.
    pub fn destroy(&mut self) {
        self.registry.destroy(&mut self.surface);
        self.bus.destroy();
        self.classifier.reset();
        self.teardown.set(false);
    }
}

impl<S: Surface> Drop for InputManager<S> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<S: Surface> fmt::Debug for InputManager<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputManager")
            .field("pointer", &self.classifier.state())
            .field("registry", &self.registry)
            .field("bus", &self.bus)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::event::{KeyCode, PhysicalKind};
    use crate::core::input::hit_test::ScreenRegion;
    use crate::core::input::pointer_state::{ScreenPoint, SurfaceRect};
    use std::cell::RefCell;

    //--- Test Helpers -----------------------------------------------------

    #[derive(Default)]
    struct Canvas {
        installed: Vec<PhysicalKind>,
    }

    impl Surface for Canvas {
        fn bounds(&self) -> SurfaceRect {
            SurfaceRect::sized(200.0, 200.0)
        }

        fn install(&mut self, kind: PhysicalKind) {
            self.installed.push(kind);
        }

        fn uninstall(&mut self, kind: PhysicalKind) {
            self.installed.retain(|k| *k != kind);
        }
    }

    fn manager() -> InputManager<Canvas> {
        InputManager::builder(Canvas::default())
            .with_hit_target(ScreenRegion::centered(ScreenPoint::new(0.0, 0.0), 0.5, 0.5))
            .build()
    }

    fn record(input: &InputManager<Canvas>, names: &[&str]) -> Rc<RefCell<Vec<String>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        for name in names {
            let sink = Rc::clone(&log);
            input.on(name, move |state| sink.borrow_mut().push(state.name().to_owned()));
        }
        log
    }

    //=====================================================================
    // Builder
    //=====================================================================

    #[test]
    fn builder_uses_defaults() {
        let input = InputManager::new(Canvas::default());
        assert!(!input.pointer().is_pressed());
        assert!(input.registry().is_empty());
    }

    #[test]
    #[should_panic(expected = "Drag slop")]
    fn negative_slop_panics() {
        let _ = InputManager::builder(Canvas::default()).with_drag_slop(-1.0);
    }

    #[test]
    #[should_panic(expected = "Drag slop")]
    fn nan_slop_panics() {
        let _ = InputManager::builder(Canvas::default()).with_drag_slop(f32::NAN);
    }

    //=====================================================================
    // Handling
    //=====================================================================

    #[test]
    fn uninstalled_kinds_are_ignored() {
        let mut input = manager();
        let log = record(&input, &["jump"]);
        input
            .register(ActionTable::builder().action("jump", |a| a.on("keyup")).build().unwrap())
            .unwrap();

        assert_eq!(input.handle(&PhysicalEvent::pointer_move(100.0, 100.0)), 0);
        assert!(!input.pointer().is_hit_test_success());

        assert_eq!(input.handle(&PhysicalEvent::key_up(KeyCode::Space)), 1);
        assert_eq!(*log.borrow(), vec!["jump"]);
    }

    #[test]
    fn gestures_are_dispatched_before_raw_events() {
        let mut input = manager();
        let log = record(&input, &["raw", "selected"]);

        let table = ActionTable::builder()
            .action("raw", |a| a.on("pointerup"))
            .action("selected", |a| a.on("click"))
            .build()
            .unwrap();
        input.register(table).unwrap();

        input.handle(&PhysicalEvent::pointer_down(100.0, 100.0));
        assert!(log.borrow().is_empty());

        assert_eq!(input.handle(&PhysicalEvent::pointer_up(100.0, 100.0)), 2);
        assert_eq!(*log.borrow(), vec!["selected", "raw"]);
    }

    #[test]
    fn handlers_observe_live_pointer_state() {
        let mut input = manager();
        input
            .register(ActionTable::builder().action("grab", |a| a.on(":dragStart")).build().unwrap())
            .unwrap();

        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        input.on("grab", move |state| *sink.borrow_mut() = Some(state.pointer()));

        input.handle(&PhysicalEvent::pointer_down(100.0, 100.0));
        input.handle(&PhysicalEvent::pointer_move(130.0, 100.0));

        let pointer = seen.borrow().expect("dragStart emitted");
        assert!(pointer.is_dragging());
        assert!(pointer.is_pressed());
    }

    //=====================================================================
    // Lifecycle
    //=====================================================================

    #[test]
    fn destroy_removes_listeners_and_subscribers() {
        let mut input = manager();
        let log = record(&input, &["selected"]);
        input
            .register(ActionTable::builder().action("selected", |a| a.on("click")).build().unwrap())
            .unwrap();
        assert_eq!(input.surface().installed.len(), 2);

        input.destroy();
        input.destroy();

        assert!(input.surface().installed.is_empty());
        assert_eq!(input.bus().subscriber_count("selected"), 0);
        assert_eq!(input.handle(&PhysicalEvent::pointer_down(100.0, 100.0)), 0);
        assert_eq!(input.handle(&PhysicalEvent::pointer_up(100.0, 100.0)), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn manager_can_register_again_after_destroy() {
        let mut input = manager();
        let table = || ActionTable::builder().action("jump", |a| a.on("keyup")).build().unwrap();

        input.register(table()).unwrap();
        input.destroy();
        input.register(table()).unwrap();

        assert!(input.registry().contains("jump"));
    }

    #[test]
    fn handler_can_tear_down_the_manager_it_runs_in() {
        let mut input = manager();
        let log = record(&input, &["quit"]);
        let table = ActionTable::builder()
            .action("quit", |a| a.on("keyup"))
            .action("selected", |a| a.on("click"))
            .build()
            .unwrap();
        input.register(table).unwrap();

        let teardown = input.teardown_handle();
        input.on("quit", move |_| teardown.request());
        let late = record(&input, &["quit"]);

        assert_eq!(input.handle(&PhysicalEvent::key_up(KeyCode::Escape)), 1);

        assert_eq!(*log.borrow(), vec!["quit"]);
        assert!(late.borrow().is_empty());
        assert!(input.surface().installed.is_empty());
        assert!(input.registry().is_empty());
        assert!(!input.teardown_handle().is_requested());
        assert_eq!(input.handle(&PhysicalEvent::key_up(KeyCode::Escape)), 0);
    }

    #[test]
    fn teardown_requested_outside_dispatch_applies_on_next_event() {
        let mut input = manager();
        input
            .register(ActionTable::builder().action("jump", |a| a.on("keyup")).build().unwrap())
            .unwrap();

        input.teardown_handle().request();
        assert_eq!(input.registry().len(), 1);

        assert_eq!(input.handle(&PhysicalEvent::key_up(KeyCode::Space)), 0);
        assert!(input.surface().installed.is_empty());
        assert!(input.registry().is_empty());
    }

    #[test]
    fn cancel_is_observed_through_the_release_listener() {
        let mut input = manager();
        input
            .register(ActionTable::builder().action("selected", |a| a.on("click")).build().unwrap())
            .unwrap();

        assert!(input.observes(PhysicalKind::PointerCancel));
        assert!(!input.observes(PhysicalKind::TouchCancel));

        input.handle(&PhysicalEvent::pointer_down(100.0, 100.0));
        assert!(input.pointer().is_pressed());
        input.handle(&PhysicalEvent::pointer(PhysicalKind::PointerCancel, 100.0, 100.0));
        assert!(!input.pointer().is_pressed());
    }
}
