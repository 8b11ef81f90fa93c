//=========================================================================
// Actions, Gates & Action Tables
//=========================================================================
//
// Application-defined actions and the declarative table that binds them
// to triggers.
//
// Actions: named, routed by the registry, interpreted by the application.
// Gates:   optional predicates deciding whether a matched action fires.
// Tables:  validated at build time; unknown gesture names are rejected.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use super::error::{GateError, InputError};
use super::event::PhysicalEvent;
use super::pointer_state::{PointerState, PointerView};
use super::trigger::{Gesture, Trigger};

//=== ActionState =========================================================

/// Per-action state handed to gates and to bus subscribers.
///
/// Created lazily the first time its action is dispatched and kept for the
/// lifetime of the owning registry. The pointer is a shared read-only view,
/// never a copy.
#[derive(Debug, Clone)]
pub struct ActionState {
    name: Rc<str>,
    pointer: PointerView,
    pressed_strength: f32,
    is_just_pressed: bool,
    is_just_released: bool,
    trigger: Option<Trigger>,
}

impl ActionState {
    pub(crate) fn new(name: Rc<str>, pointer: PointerView) -> Self {
        Self {
            name,
            pointer,
            pressed_strength: 0.0,
            is_just_pressed: false,
            is_just_released: false,
            trigger: None,
        }
    }

    /// Copies the edge flags from the pointer and records the trigger.
    ///
    /// A click spans a whole press cycle, so it reports the press edge it
    /// started with next to the release edge that completed it.
    pub(crate) fn refresh(&mut self, trigger: Trigger, event: &PhysicalEvent) {
        let pointer = self.pointer.get();

        self.is_just_pressed =
            pointer.is_just_pressed() || trigger == Trigger::Synthetic(Gesture::Click);
        self.is_just_released = pointer.is_just_released();
        self.pressed_strength = if pointer.is_pressed() {
            event.pressure().unwrap_or(1.0)
        } else {
            0.0
        };
        self.trigger = Some(trigger);
    }

    //--- Queries ----------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Live pointer state of the surface.
    pub fn pointer(&self) -> PointerState {
        self.pointer.get()
    }

    /// 0 when released; the reported pressure (or 1) while pressed.
    pub fn pressed_strength(&self) -> f32 {
        self.pressed_strength
    }

    /// Press edge of the emitting event; always set for a click.
    pub fn is_just_pressed(&self) -> bool {
        self.is_just_pressed
    }

    pub fn is_just_released(&self) -> bool {
        self.is_just_released
    }

    /// Trigger of the most recent evaluation.
    pub fn trigger(&self) -> Option<Trigger> {
        self.trigger
    }
}

//=== Gate ================================================================

type GateFn = dyn Fn(&PhysicalEvent, &ActionState) -> Result<bool, GateError>;

/// Predicate deciding whether a matched action is emitted.
pub struct Gate(Box<GateFn>);

impl Gate {
    /// Infallible gate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&PhysicalEvent, &ActionState) -> bool + 'static,
    {
        Self(Box::new(move |event: &PhysicalEvent, state: &ActionState| {
            Ok(predicate(event, state))
        }))
    }

    /// Gate that may fail; a failure only suppresses its own action.
    pub fn try_new<F>(predicate: F) -> Self
    where
        F: Fn(&PhysicalEvent, &ActionState) -> Result<bool, GateError> + 'static,
    {
        Self(Box::new(predicate))
    }

    pub fn evaluate(&self, event: &PhysicalEvent, state: &ActionState) -> Result<bool, GateError> {
        (self.0)(event, state)
    }
}

impl fmt::Debug for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Gate(..)")
    }
}

//=== ActionDefinition ====================================================

/// One action: a unique name and its (trigger, gate) bindings.
#[derive(Debug)]
pub struct ActionDefinition {
    pub(crate) name: Rc<str>,
    pub(crate) bindings: Vec<(Trigger, Option<Gate>)>,
}

impl ActionDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Triggers in declaration order.
    pub fn triggers(&self) -> impl Iterator<Item = Trigger> + '_ {
        self.bindings.iter().map(|(trigger, _)| *trigger)
    }

    pub(crate) fn gate_for(&self, trigger: Trigger) -> Option<&Gate> {
        self.bindings
            .iter()
            .find(|(t, _)| *t == trigger)
            .and_then(|(_, gate)| gate.as_ref())
    }
}

//=== ActionBuilder =======================================================

/// Collects the bindings of a single action inside [`ActionTableBuilder`].
pub struct ActionBuilder {
    name: Rc<str>,
    bindings: Vec<(Trigger, Option<Gate>)>,
    error: Option<InputError>,
}

impl ActionBuilder {
    fn new(name: &str) -> Self {
        Self {
            name: Rc::from(name),
            bindings: Vec::new(),
            error: None,
        }
    }

    /// Binds a trigger by name (`"click"`, `":hoverIn"`, `"keyup"`, ...).
    pub fn on(self, trigger: &str) -> Self {
        self.bind_str(trigger, None)
    }

    /// Binds a trigger by name with a gate.
    pub fn on_gated<F>(self, trigger: &str, gate: F) -> Self
    where
        F: Fn(&PhysicalEvent, &ActionState) -> bool + 'static,
    {
        self.bind_str(trigger, Some(Gate::new(gate)))
    }

    /// Binds an already-typed trigger with an optional gate.
    pub fn on_trigger(mut self, trigger: impl Into<Trigger>, gate: Option<Gate>) -> Self {
        self.bind(trigger.into(), gate);
        self
    }

    fn bind_str(mut self, raw: &str, gate: Option<Gate>) -> Self {
        if self.error.is_some() {
            return self;
        }
        match Trigger::parse(&self.name, raw) {
            Ok(trigger) => self.bind(trigger, gate),
            Err(err) => self.error = Some(err),
        }
        self
    }

    /// A later binding of the same trigger replaces the earlier one.
    fn bind(&mut self, trigger: Trigger, gate: Option<Gate>) {
        match self.bindings.iter_mut().find(|(t, _)| *t == trigger) {
            Some(slot) => slot.1 = gate,
            None => self.bindings.push((trigger, gate)),
        }
    }
}

//=== ActionTable =========================================================

/// Validated set of action definitions, ready for registration.
///
/// Pointer state only follows the kinds some trigger installs: the
/// `flipWithKey` gate below sees hover changes because `:hoverIn` installs
/// `pointermove`.
///
/// # Example
///
/// ```
/// use card_gestures::prelude::*;
///
/// let table = ActionTable::builder()
///     .action("selected", |a| a.on("click"))
///     .action("scaleUp", |a| a.on(":hoverIn"))
///     .action("flipWithKey", |a| {
///         a.on_gated("keyup", |_, state| state.pointer().is_hit_test_success())
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(table.len(), 3);
/// ```
#[derive(Debug, Default)]
pub struct ActionTable {
    pub(crate) definitions: Vec<ActionDefinition>,
}

impl ActionTable {
    pub fn builder() -> ActionTableBuilder {
        ActionTableBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn definitions(&self) -> &[ActionDefinition] {
        &self.definitions
    }
}

//=== ActionTableBuilder ==================================================

/// Builder for [`ActionTable`]. Errors are collected and reported by
/// [`build`](Self::build); the first one wins.
#[derive(Default)]
pub struct ActionTableBuilder {
    definitions: Vec<ActionDefinition>,
    error: Option<InputError>,
}

impl ActionTableBuilder {
    /// Declares an action and configures its triggers.
    pub fn action<F>(mut self, name: &str, configure: F) -> Self
    where
        F: FnOnce(ActionBuilder) -> ActionBuilder,
    {
        if self.error.is_some() {
            return self;
        }

        if self.definitions.iter().any(|d| &*d.name == name) {
            self.error = Some(InputError::DuplicateAction(name.to_owned()));
            return self;
        }

        let action = configure(ActionBuilder::new(name));
        match action.error {
            Some(err) => self.error = Some(err),
            None => {
                if action.bindings.is_empty() {
                    log::warn!(target: "input::registry", "Action `{}` declares no triggers", name);
                }
                self.definitions.push(ActionDefinition {
                    name: action.name,
                    bindings: action.bindings,
                });
            }
        }
        self
    }

    pub fn build(self) -> Result<ActionTable, InputError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(ActionTable {
                definitions: self.definitions,
            }),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
