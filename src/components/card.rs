//=========================================================================
// Card
//=========================================================================
//
// Draggable, flippable card driven by named actions.
//
// Responsibilities:
// - Name the actions a card reacts to and build their table
// - Subscribe to those actions on an event bus
// - Turn each action into transition requests (scale, flip, follow)
//
// Geometry, materials and the actual tweening live with the rendering
// collaborator; the card only tracks the values it asked for.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::Cell;
use std::f32::consts::PI;
use std::rc::Rc;
use std::time::Duration;

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::event_bus::{EventBus, SubscriptionId};
use crate::core::input::{ActionState, ActionTable, InputError};
use crate::core::transition::{Animator, Easing, Property, TargetId, TransitionRequest};

//=== Defaults ============================================================

pub const DEFAULT_HOVER_SCALE: f32 = 1.1;
pub const DEFAULT_DRAG_FACTOR: f32 = 1.0;

const HOVER_DURATION: Duration = Duration::from_millis(300);
const FLIP_DURATION: Duration = Duration::from_millis(600);
const FOLLOW_DURATION: Duration = Duration::from_millis(50);

//=== CardActions =========================================================

/// Action names a card subscribes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardActions {
    pub scale_up: String,
    pub scale_down: String,
    pub selected: String,
    pub grabbed: String,
    pub dragged: String,
}

impl Default for CardActions {
    fn default() -> Self {
        Self {
            scale_up: "scaleUp".into(),
            scale_down: "scaleDown".into(),
            selected: "selected".into(),
            grabbed: "grabbed".into(),
            dragged: "dragged".into(),
        }
    }
}

impl CardActions {
    /// Table binding each action to its gesture.
    pub fn table(&self) -> Result<ActionTable, InputError> {
        ActionTable::builder()
            .action(&self.scale_up, |a| a.on(":hoverIn"))
            .action(&self.scale_down, |a| a.on(":hoverOut"))
            .action(&self.selected, |a| a.on("click"))
            .action(&self.grabbed, |a| a.on(":dragStart"))
            .action(&self.dragged, |a| a.on(":dragMove"))
            .build()
    }
}

//=== CardPose ============================================================

/// Values the card last requested.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CardPose {
    pub x: f32,
    pub y: f32,
    pub flipped: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct CardState {
    pose: CardPose,
    grab_origin: (f32, f32),
}

//=== Card ================================================================

#[derive(Debug)]
pub struct Card {
    target: TargetId,
    actions: CardActions,
    hover_scale: f32,
    drag_factor: f32,
    state: Rc<Cell<CardState>>,
    subscriptions: Vec<(String, SubscriptionId)>,
}

impl Card {
    pub fn new(target: TargetId) -> Self {
        Self {
            target,
            actions: CardActions::default(),
            hover_scale: DEFAULT_HOVER_SCALE,
            drag_factor: DEFAULT_DRAG_FACTOR,
            state: Rc::new(Cell::new(CardState::default())),
            subscriptions: Vec::new(),
        }
    }

    pub fn with_actions(mut self, actions: CardActions) -> Self {
        self.actions = actions;
        self
    }

    /// # Panics
    ///
    /// Panics if `scale` is not a positive finite number.
    pub fn with_hover_scale(mut self, scale: f32) -> Self {
        assert!(
            scale.is_finite() && scale > 0.0,
            "Hover scale must be positive, got {}",
            scale
        );
        self.hover_scale = scale;
        self
    }

    /// World units per normalized unit of pointer movement.
    ///
    /// # Panics
    ///
    /// Panics if `factor` is not finite.
    pub fn with_drag_factor(mut self, factor: f32) -> Self {
        assert!(factor.is_finite(), "Drag factor must be finite, got {}", factor);
        self.drag_factor = factor;
        self
    }

    /// Initial position.
    pub fn at(self, x: f32, y: f32) -> Self {
        let mut state = self.state.get();
        state.pose.x = x;
        state.pose.y = y;
        self.state.set(state);
        self
    }

    //--- Binding ----------------------------------------------------------

    /// Subscribes the card's handlers on `bus`. A card bound earlier is
    /// unbound first.
    pub fn bind(
        &mut self,
        bus: &EventBus<ActionState>,
        animator: Rc<dyn Animator>,
    ) -> Vec<SubscriptionId> {
        if !self.subscriptions.is_empty() {
            self.unbind(bus);
        }

        let target = self.target;

        //--- hover ---
        let hover_in = {
            let animator = Rc::clone(&animator);
            let scale = self.hover_scale;
            bus.on(&self.actions.scale_up, move |_| {
                animator.request(
                    TransitionRequest::new(target, Property::Scale, scale).with_duration(HOVER_DURATION),
                );
            })
        };

        let hover_out = {
            let animator = Rc::clone(&animator);
            bus.on(&self.actions.scale_down, move |_| {
                animator.request(
                    TransitionRequest::new(target, Property::Scale, 1.0).with_duration(HOVER_DURATION),
                );
            })
        };

        //--- flip ---
        let flip = {
            let animator = Rc::clone(&animator);
            let state = Rc::clone(&self.state);
            bus.on(&self.actions.selected, move |_| {
                let mut current = state.get();
                current.pose.flipped = !current.pose.flipped;
                state.set(current);

                let angle = if current.pose.flipped { PI } else { 0.0 };
                animator.request(
                    TransitionRequest::new(target, Property::RotationY, angle)
                        .with_duration(FLIP_DURATION)
                        .with_easing(Easing::BackOut),
                );
            })
        };

        //--- drag ---
        let grab = {
            let state = Rc::clone(&self.state);
            let factor = self.drag_factor;
            bus.on(&self.actions.grabbed, move |action| {
                // Movement restarts at drag start; the slop already travelled
                // since the press is folded into the origin instead.
                let pointer = action.pointer();
                let (position, pressed_at) = (pointer.position(), pointer.press_position());
                let mut current = state.get();
                current.grab_origin = (
                    current.pose.x + (position.x - pressed_at.x) * factor,
                    current.pose.y + (position.y - pressed_at.y) * factor,
                );
                state.set(current);
            })
        };

        let follow = {
            let state = Rc::clone(&self.state);
            let factor = self.drag_factor;
            bus.on(&self.actions.dragged, move |action| {
                let pointer = action.pointer();
                let mut current = state.get();
                current.pose.x = current.grab_origin.0 + pointer.movement_x() * factor;
                current.pose.y = current.grab_origin.1 + pointer.movement_y() * factor;
                state.set(current);

                for (property, to) in [
                    (Property::PositionX, current.pose.x),
                    (Property::PositionY, current.pose.y),
                ] {
                    animator.request(
                        TransitionRequest::new(target, property, to)
                            .with_duration(FOLLOW_DURATION)
                            .with_easing(Easing::Linear),
                    );
                }
            })
        };

        self.subscriptions = vec![
            (self.actions.scale_up.clone(), hover_in),
            (self.actions.scale_down.clone(), hover_out),
            (self.actions.selected.clone(), flip),
            (self.actions.grabbed.clone(), grab),
            (self.actions.dragged.clone(), follow),
        ];
        debug!(target: "components", "Card {} bound ({} handlers)", target, self.subscriptions.len());

        self.subscriptions.iter().map(|(_, id)| *id).collect()
    }

    /// Removes the card's handlers from `bus`. Returns how many were removed.
    pub fn unbind(&mut self, bus: &EventBus<ActionState>) -> usize {
        self.subscriptions
            .drain(..)
            .filter(|(name, id)| bus.off(name, *id))
            .count()
    }

    //--- Queries ----------------------------------------------------------

    pub fn target(&self) -> TargetId {
        self.target
    }

    pub fn actions(&self) -> &CardActions {
        &self.actions
    }

    pub fn pose(&self) -> CardPose {
        self.state.get().pose
    }

    pub fn is_bound(&self) -> bool {
        !self.subscriptions.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
