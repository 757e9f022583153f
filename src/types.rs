//! Type-safe wrapper for action names.
//!
//! Actions are plain strings, but keeping them in a newtype prevents mixing
//! them up with state or proposition names in the construction API.

use std::fmt;

/// An action of a transition system.
///
/// Actions are compared by name. The empty name is allowed and stands for the
/// internal (silent) action; it is displayed as `ε`.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Action(String);

impl Action {
    /// Creates a new action with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Action(name.into())
    }

    /// Returns the name of the action.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Checks if this is the silent action (empty name).
    pub fn is_silent(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_silent() {
            write!(f, "ε")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl From<&str> for Action {
    fn from(name: &str) -> Self {
        Action::new(name)
    }
}

impl From<String> for Action {
    fn from(name: String) -> Self {
        Action(name)
    }
}
