//=========================================================================
// Action Registry
//=========================================================================
//
// Routes triggers to the actions interested in them.
//
// Architecture:
//   register(table) → definitions + interest index + installed listeners
//                              ↓
//   dispatch(trigger) → interested actions (registration order)
//                              ↓
//        ActionState refresh → gate → bus.emit(action name, &state)
//
// A failing gate only suppresses its own action.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashMap;
use std::rc::Rc;

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::action::{ActionDefinition, ActionState, ActionTable};
use super::error::InputError;
use super::event::{PhysicalEvent, PhysicalKind};
use super::listeners::{ListenerSet, Surface};
use super::pointer_state::PointerView;
use super::trigger::Trigger;
use crate::core::event_bus::EventBus;

//=== ActionRegistry ======================================================

/// Registered actions, their trigger index and lazily created states.
#[derive(Debug, Default)]
pub struct ActionRegistry {
    definitions: Vec<ActionDefinition>,
    interest: HashMap<Trigger, Vec<usize>>,
    states: HashMap<usize, ActionState>,
    listeners: ListenerSet,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Registration -----------------------------------------------------

    /// Merges `table` into the registry and installs the physical listeners
    /// its triggers need.
    ///
    /// The table is rejected as a whole if any of its action names is
    /// already registered.
    pub fn register(&mut self, table: ActionTable, surface: &mut dyn Surface) -> Result<(), InputError> {
        if let Some(dup) = table
            .definitions
            .iter()
            .find(|def| self.position(def.name()).is_some())
        {
            return Err(InputError::DuplicateAction(dup.name().to_owned()));
        }

        for definition in table.definitions {
            let index = self.definitions.len();

            for trigger in definition.triggers() {
                self.interest.entry(trigger).or_default().push(index);
                for &kind in trigger.physical_sources() {
                    self.listeners.ensure(kind, surface);
                }
            }

            debug!(
                target: "input::registry",
                "Registered action `{}` ({} triggers)",
                definition.name(),
                definition.bindings.len()
            );
            self.definitions.push(definition);
        }

        Ok(())
    }

    //--- Dispatch ---------------------------------------------------------

    /// Evaluates every action interested in `trigger` and emits the ones
    /// whose gate passes. Returns the number of actions emitted.
    pub fn dispatch(
        &mut self,
        trigger: Trigger,
        event: &PhysicalEvent,
        pointer: &PointerView,
        bus: &EventBus<ActionState>,
    ) -> usize {
        let Some(indices) = self.interest.get(&trigger) else {
            return 0;
        };

        let mut emitted = 0;

        for &index in indices {
            let definition = &self.definitions[index];
            let state = self
                .states
                .entry(index)
                .or_insert_with(|| ActionState::new(Rc::clone(&definition.name), pointer.clone()));
            state.refresh(trigger, event);

            let allowed = match definition.gate_for(trigger) {
                None => true,
                Some(gate) => match gate.evaluate(event, state) {
                    Ok(allowed) => allowed,
                    Err(err) => {
                        warn!(
                            target: "input::registry",
                            "Action `{}` skipped on {}: {}",
                            definition.name(),
                            trigger,
                            err
                        );
                        false
                    }
                },
            };

            if allowed {
                bus.emit(definition.name(), state);
                emitted += 1;
            }
        }

        emitted
    }

    //--- Lifecycle --------------------------------------------------------

    /// Uninstalls every listener and forgets all actions. Idempotent.
    pub fn destroy(&mut self, surface: &mut dyn Surface) {
        let removed = self.listeners.teardown(surface);
        let actions = self.definitions.len();

        self.definitions.clear();
        self.interest.clear();
        self.states.clear();

        if removed > 0 || actions > 0 {
            info!(
                target: "input::registry",
                "Registry destroyed ({} actions, {} listeners)",
                actions,
                removed
            );
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn listens_to(&self, kind: PhysicalKind) -> bool {
        self.listeners.is_installed(kind)
    }

    pub fn listeners(&self) -> &ListenerSet {
        &self.listeners
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// State of `name`, if the action has been dispatched at least once.
    pub fn state(&self, name: &str) -> Option<&ActionState> {
        self.position(name).and_then(|index| self.states.get(&index))
    }

    pub fn action_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.definitions.iter().map(ActionDefinition::name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.definitions.iter().position(|def| def.name() == name)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::action::Gate;
    use crate::core::input::error::GateError;
    use crate::core::input::pointer_state::{PointerState, SurfaceRect};
    use crate::core::input::trigger::Gesture;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct Recording {
        installed: Vec<PhysicalKind>,
        uninstalled: Vec<PhysicalKind>,
    }

    impl Surface for Recording {
        fn bounds(&self) -> SurfaceRect {
            SurfaceRect::sized(100.0, 100.0)
        }

        fn install(&mut self, kind: PhysicalKind) {
            self.installed.push(kind);
        }

        fn uninstall(&mut self, kind: PhysicalKind) {
            self.uninstalled.push(kind);
        }
    }

    fn view() -> PointerView {
        PointerView::new(Rc::new(Cell::new(PointerState::default())))
    }

    fn record_emissions(bus: &EventBus<ActionState>, names: &[&str]) -> Rc<RefCell<Vec<String>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        for name in names {
            let sink = Rc::clone(&log);
            bus.on(name, move |state: &ActionState| sink.borrow_mut().push(state.name().to_owned()));
        }
        log
    }

    //=====================================================================
    // Registration
    //=====================================================================

    #[test]
    fn expands_triggers_into_unique_listeners() {
        let mut surface = Recording::default();
        let mut registry = ActionRegistry::new();

        let table = ActionTable::builder()
            .action("selected", |a| a.on("click"))
            .action("dragged", |a| a.on(":dragMove"))
            .action("scaleUp", |a| a.on(":hoverIn"))
            .build()
            .unwrap();
        registry.register(table, &mut surface).unwrap();

        assert_eq!(
            surface.installed,
            vec![
                PhysicalKind::PointerDown,
                PhysicalKind::PointerUp,
                PhysicalKind::PointerMove
            ]
        );
        assert!(registry.listens_to(PhysicalKind::PointerMove));
        assert!(!registry.listens_to(PhysicalKind::KeyUp));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn rejects_names_registered_earlier() {
        let mut surface = Recording::default();
        let mut registry = ActionRegistry::new();

        let first = ActionTable::builder().action("a", |a| a.on("keyup")).build().unwrap();
        registry.register(first, &mut surface).unwrap();

        let second = ActionTable::builder()
            .action("b", |a| a.on("keydown"))
            .action("a", |a| a.on("wheel"))
            .build()
            .unwrap();

        assert_eq!(
            registry.register(second, &mut surface),
            Err(InputError::DuplicateAction("a".into()))
        );
        assert!(!registry.contains("b"));
        assert!(!registry.listens_to(PhysicalKind::KeyDown));
    }

    //=====================================================================
    // Dispatch
    //=====================================================================

    #[test]
    fn dispatch_reaches_only_interested_actions() {
        let mut surface = Recording::default();
        let mut registry = ActionRegistry::new();
        let bus = EventBus::new();
        let log = record_emissions(&bus, &["selected", "jump"]);

        let table = ActionTable::builder()
            .action("selected", |a| a.on("click"))
            .action("jump", |a| a.on("keyup"))
            .build()
            .unwrap();
        registry.register(table, &mut surface).unwrap();

        let up = PhysicalEvent::pointer_up(10.0, 10.0);
        let emitted = registry.dispatch(Trigger::Synthetic(Gesture::Click), &up, &view(), &bus);

        assert_eq!(emitted, 1);
        assert_eq!(*log.borrow(), vec!["selected"]);
        assert_eq!(
            registry.state("selected").and_then(ActionState::trigger),
            Some(Trigger::Synthetic(Gesture::Click))
        );
        assert!(registry.state("jump").is_none());
    }

    #[test]
    fn closed_gate_suppresses_emission() {
        let mut surface = Recording::default();
        let mut registry = ActionRegistry::new();
        let bus = EventBus::new();
        let log = record_emissions(&bus, &["guarded"]);

        let table = ActionTable::builder()
            .action("guarded", |a| a.on_gated("keyup", |_, _| false))
            .build()
            .unwrap();
        registry.register(table, &mut surface).unwrap();

        let key = PhysicalEvent::key_up(crate::core::input::event::KeyCode::Space);
        let emitted = registry.dispatch(Trigger::Physical(PhysicalKind::KeyUp), &key, &view(), &bus);

        assert_eq!(emitted, 0);
        assert!(log.borrow().is_empty());
        assert!(registry.state("guarded").is_some());
    }

    #[test]
    fn failing_gate_is_isolated() {
        let mut surface = Recording::default();
        let mut registry = ActionRegistry::new();
        let bus = EventBus::new();
        let log = record_emissions(&bus, &["broken", "healthy"]);

        let table = ActionTable::builder()
            .action("broken", |a| {
                a.on_trigger(
                    PhysicalKind::KeyUp,
                    Some(Gate::try_new(|_, _| Err(GateError::new("camera missing")))),
                )
            })
            .action("healthy", |a| a.on("keyup"))
            .build()
            .unwrap();
        registry.register(table, &mut surface).unwrap();

        let key = PhysicalEvent::key_up(crate::core::input::event::KeyCode::Enter);
        let emitted = registry.dispatch(Trigger::Physical(PhysicalKind::KeyUp), &key, &view(), &bus);

        assert_eq!(emitted, 1);
        assert_eq!(*log.borrow(), vec!["healthy"]);
    }

    #[test]
    fn states_are_created_once_per_action() {
        let mut surface = Recording::default();
        let mut registry = ActionRegistry::new();
        let bus = EventBus::new();

        let table = ActionTable::builder()
            .action("any", |a| a.on("keyup").on("keydown"))
            .build()
            .unwrap();
        registry.register(table, &mut surface).unwrap();

        let pointer = view();
        let up = PhysicalEvent::key_up(crate::core::input::event::KeyCode::KeyA);
        let down = PhysicalEvent::key_down(crate::core::input::event::KeyCode::KeyA);
        registry.dispatch(Trigger::Physical(PhysicalKind::KeyUp), &up, &pointer, &bus);
        registry.dispatch(Trigger::Physical(PhysicalKind::KeyDown), &down, &pointer, &bus);

        assert_eq!(registry.states.len(), 1);
        assert_eq!(
            registry.state("any").and_then(ActionState::trigger),
            Some(Trigger::Physical(PhysicalKind::KeyDown))
        );
    }

    //=====================================================================
    // Lifecycle
    //=====================================================================

    #[test]
    fn destroy_removes_listeners_and_actions() {
        let mut surface = Recording::default();
        let mut registry = ActionRegistry::new();
        let bus = EventBus::new();
        let log = record_emissions(&bus, &["selected"]);

        let table = ActionTable::builder().action("selected", |a| a.on("click")).build().unwrap();
        registry.register(table, &mut surface).unwrap();

        registry.destroy(&mut surface);
        registry.destroy(&mut surface);

        assert_eq!(surface.uninstalled.len(), 2);
        assert!(registry.is_empty());
        assert!(registry.listeners().is_empty());

        let up = PhysicalEvent::pointer_up(0.0, 0.0);
        assert_eq!(
            registry.dispatch(Trigger::Synthetic(Gesture::Click), &up, &view(), &bus),
            0
        );
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn destroy_before_register_is_safe() {
        let mut surface = Recording::default();
        let mut registry = ActionRegistry::new();

        registry.destroy(&mut surface);

        assert!(surface.uninstalled.is_empty());
    }
}
