//! States of transition systems and automata.
//!
//! A [`State`] is a plain value: two states are equal iff their identifying
//! values are equal. Composite states produced by the interleaving product and
//! by quotienting are tagged variants rather than formatted names, so a simple
//! state literally named `"(a, b)"` never collides with a product state.
//!
//! States do not point back to their system. Relative queries either take the
//! system explicitly ([`TransitionSystem::post`]) or go through a
//! [`SystemState`] handle borrowed from the system.

use std::collections::BTreeSet;
use std::fmt;

use crate::proposition::AtomicProposition;
use crate::system::TransitionSystem;
use crate::types::Action;

/// A state, identified by value.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum State {
    /// A named state.
    Simple(String),
    /// A state of an interleaving product: `(left, right)`.
    Product(Box<State>, Box<State>),
    /// A block of a partition, used as a state of a quotient system.
    ///
    /// Blocks are compared by set equality of their members.
    Block(BTreeSet<State>),
}

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        State::Simple(name.into())
    }

    pub fn product(left: State, right: State) -> Self {
        State::Product(Box::new(left), Box::new(right))
    }

    pub fn block(members: impl IntoIterator<Item = State>) -> Self {
        State::Block(members.into_iter().collect())
    }

    /// Returns the name of a simple state.
    pub fn name(&self) -> Option<&str> {
        match self {
            State::Simple(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Returns the components of a product state.
    pub fn components(&self) -> Option<(&State, &State)> {
        match self {
            State::Product(left, right) => Some((&**left, &**right)),
            _ => None,
        }
    }

    /// Returns the members of a block state.
    pub fn members(&self) -> Option<&BTreeSet<State>> {
        match self {
            State::Block(members) => Some(members),
            _ => None,
        }
    }

    /// Checks whether this state occurs in `states`.
    pub fn is_in(&self, states: &[State]) -> bool {
        states.contains(self)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Simple(name) => write!(f, "{}", name),
            State::Product(left, right) => write!(f, "({}, {})", left, right),
            State::Block(members) => {
                write!(f, "{{")?;
                for (i, s) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", s)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<&str> for State {
    fn from(name: &str) -> Self {
        State::new(name)
    }
}

impl From<String> for State {
    fn from(name: String) -> Self {
        State::Simple(name)
    }
}

/// Converts a list of names into simple states.
pub fn from_names<S: AsRef<str>>(names: &[S]) -> Vec<State> {
    names.iter().map(|s| State::new(s.as_ref())).collect()
}

/// A state together with the system it belongs to.
///
/// Obtained from [`TransitionSystem::state`]. The handle borrows the system,
/// so it cannot outlive it or observe a different one.
#[derive(Debug, Clone, Copy)]
pub struct SystemState<'a> {
    system: &'a TransitionSystem,
    state: &'a State,
}

impl<'a> SystemState<'a> {
    pub(crate) fn new(system: &'a TransitionSystem, state: &'a State) -> Self {
        SystemState { system, state }
    }

    pub fn state(&self) -> &'a State {
        self.state
    }

    pub fn system(&self) -> &'a TransitionSystem {
        self.system
    }

    pub fn post(&self) -> Vec<State> {
        self.system.post(self.state)
    }

    pub fn post_action(&self, action: &Action) -> Vec<State> {
        self.system.post_action(self.state, action)
    }

    pub fn pre(&self) -> Vec<State> {
        self.system.pre(self.state)
    }

    pub fn pre_action(&self, action: &Action) -> Vec<State> {
        self.system.pre_action(self.state, action)
    }

    pub fn is_initial(&self) -> bool {
        self.system.is_initial(self.state)
    }

    pub fn is_terminal(&self) -> bool {
        self.system.is_terminal(self.state)
    }

    pub fn is_reachable(&self) -> bool {
        self.system.is_reachable(self.state)
    }

    pub fn label(&self) -> &'a [AtomicProposition] {
        self.system.label(self.state)
    }

    pub fn satisfies(&self, ap: &AtomicProposition) -> bool {
        self.system.satisfies(self.state, ap)
    }
}

impl fmt::Display for SystemState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.state)
    }
}

impl PartialEq for SystemState<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.system, other.system) && self.state == other.state
    }
}
