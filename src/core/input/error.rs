//=========================================================================
// Input Errors
//=========================================================================
//
// Configuration errors surface to the caller of `register` / `build`.
// Gate failures are contained per action and only logged.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== InputError ==========================================================

/// Errors detected while building or registering an action table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// A `:`-prefixed trigger names no known gesture.
    #[error("action `{action}`: unknown gesture trigger `{trigger}`")]
    UnknownGesture { action: String, trigger: String },

    /// A bare trigger name is neither a gesture nor a physical event.
    #[error("action `{action}`: unknown event trigger `{trigger}`")]
    UnknownEvent { action: String, trigger: String },

    /// The trigger string is empty (or only the `:` marker).
    #[error("action `{action}`: empty trigger name")]
    EmptyTrigger { action: String },

    /// Two definitions share one action name.
    #[error("action `{0}` is already registered")]
    DuplicateAction(String),
}

//=== GateError ===========================================================

/// Failure reported by an action gate.
///
/// Returned from fallible gates; the registry logs it and skips that one
/// action without affecting the others interested in the same event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("gate failed: {0}")]
pub struct GateError(pub String);

impl GateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
