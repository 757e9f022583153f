//! Execution and path fragments.
//!
//! An *execution fragment* alternates states and actions,
//! `s0 a0 s1 a1 ... sn`, with `s_{i+1} ∈ Post(s_i, a_i)`. A *path fragment*
//! only records states, with `s_{i+1} ∈ Post(s_i)`.
//!
//! Infinite fragments are lassos: a finite unique prefix followed by a
//! repeating suffix. For infinite executions both parts carry one action per
//! state: the last action of the prefix leads into the first suffix state, and
//! the last action of the suffix leads back to it.
//!
//! Fragments borrow the system they run in, and are validated against it by
//! [`PathFragment::check`]. The other trait methods assume a successful check.
//!
//! ```
//! use lts_rs::fragment::{is_path, FiniteExecutionFragment, PathFragment};
//! use lts_rs::models::simple_chain;
//!
//! let ts = simple_chain();
//! let fragment = FiniteExecutionFragment::from_names(&ts, &["1", "2", "3"], &["a", "a"]);
//! assert!(fragment.check().is_ok());
//! assert!(is_path(&fragment));
//!
//! let bad = FiniteExecutionFragment::from_names(&ts, &["1", "3"], &["a"]);
//! assert!(bad.check().is_err());
//! ```

use crate::error::{Error, Result};
use crate::state::{self, State};
use crate::system::TransitionSystem;
use crate::trace::{FiniteTrace, InfiniteTrace, Trace};
use crate::types::Action;

pub trait PathFragment {
    type Trace: Trace;

    /// Validates the fragment against the transition relation of its system.
    fn check(&self) -> Result<()>;

    /// The first state is an initial state.
    fn is_initial(&self) -> bool;

    /// The fragment cannot be extended: the last state of a finite fragment is
    /// terminal. Infinite fragments are always maximal.
    fn is_maximal(&self) -> bool;

    /// The labels of the visited states.
    fn to_trace(&self) -> Self::Trace;
}

/// A fragment is a path iff it is both initial and maximal.
pub fn is_path<F: PathFragment + ?Sized>(fragment: &F) -> bool {
    fragment.is_initial() && fragment.is_maximal()
}

fn check_execution_steps(system: &TransitionSystem, states: &[State], actions: &[Action]) -> Result<()> {
    for (index, (pair, action)) in states.windows(2).zip(actions).enumerate() {
        let (from, to) = (&pair[0], &pair[1]);
        if !to.is_in(&system.post_action(from, action)) {
            return Err(Error::InvalidTransition {
                index,
                from: from.clone(),
                action: action.clone(),
                to: to.clone(),
            });
        }
    }
    Ok(())
}

fn check_path_steps(system: &TransitionSystem, states: &[State]) -> Result<()> {
    for (index, pair) in states.windows(2).enumerate() {
        let (from, to) = (&pair[0], &pair[1]);
        if !to.is_in(&system.post(from)) {
            return Err(Error::InvalidPathStep {
                index,
                from: from.clone(),
                to: to.clone(),
            });
        }
    }
    Ok(())
}

fn trace_of(system: &TransitionSystem, states: &[State]) -> FiniteTrace {
    FiniteTrace::new(states.iter().map(|s| system.label(s).to_vec()).collect())
}

// ─── Finite fragments ───

#[derive(Debug, Clone)]
pub struct FiniteExecutionFragment<'a> {
    system: &'a TransitionSystem,
    states: Vec<State>,
    actions: Vec<Action>,
}

impl<'a> FiniteExecutionFragment<'a> {
    pub fn new(system: &'a TransitionSystem, states: Vec<State>, actions: Vec<Action>) -> Self {
        FiniteExecutionFragment { system, states, actions }
    }

    pub fn from_names(system: &'a TransitionSystem, states: &[&str], actions: &[&str]) -> Self {
        Self::new(system, state::from_names(states), actions.iter().map(|&a| Action::new(a)).collect())
    }

    pub fn system(&self) -> &'a TransitionSystem {
        self.system
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Forgets the actions.
    pub fn to_path_fragment(&self) -> FinitePathFragment<'a> {
        FinitePathFragment::new(self.system, self.states.clone())
    }
}

impl PathFragment for FiniteExecutionFragment<'_> {
    type Trace = FiniteTrace;

    /// Requires `|states| = |actions| + 1` and `s_{i+1} ∈ Post(s_i, a_i)`.
    fn check(&self) -> Result<()> {
        if self.states.len() != self.actions.len() + 1 {
            return Err(Error::ShapeMismatch {
                states: self.states.len(),
                actions: self.actions.len(),
            });
        }
        check_execution_steps(self.system, &self.states, &self.actions)
    }

    fn is_initial(&self) -> bool {
        self.states.first().is_some_and(|s| self.system.is_initial(s))
    }

    fn is_maximal(&self) -> bool {
        self.states.last().is_some_and(|s| self.system.is_terminal(s))
    }

    fn to_trace(&self) -> FiniteTrace {
        trace_of(self.system, &self.states)
    }
}

#[derive(Debug, Clone)]
pub struct FinitePathFragment<'a> {
    system: &'a TransitionSystem,
    states: Vec<State>,
}

impl<'a> FinitePathFragment<'a> {
    pub fn new(system: &'a TransitionSystem, states: Vec<State>) -> Self {
        FinitePathFragment { system, states }
    }

    pub fn from_names(system: &'a TransitionSystem, states: &[&str]) -> Self {
        Self::new(system, state::from_names(states))
    }

    pub fn system(&self) -> &'a TransitionSystem {
        self.system
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }
}

impl PathFragment for FinitePathFragment<'_> {
    type Trace = FiniteTrace;

    /// Requires `s_{i+1} ∈ Post(s_i)` for every consecutive pair.
    fn check(&self) -> Result<()> {
        check_path_steps(self.system, &self.states)
    }

    fn is_initial(&self) -> bool {
        self.states.first().is_some_and(|s| self.system.is_initial(s))
    }

    fn is_maximal(&self) -> bool {
        self.states.last().is_some_and(|s| self.system.is_terminal(s))
    }

    fn to_trace(&self) -> FiniteTrace {
        trace_of(self.system, &self.states)
    }
}

// ─── Infinite fragments ───

#[derive(Debug, Clone)]
pub struct InfiniteExecutionFragment<'a> {
    prefix: FiniteExecutionFragment<'a>,
    suffix: FiniteExecutionFragment<'a>,
}

impl<'a> InfiniteExecutionFragment<'a> {
    /// Creates the lasso `prefix (suffix)^ω`.
    ///
    /// # Panics
    ///
    /// Panics if the two parts belong to different systems.
    pub fn new(prefix: FiniteExecutionFragment<'a>, suffix: FiniteExecutionFragment<'a>) -> Self {
        assert!(
            std::ptr::eq(prefix.system, suffix.system),
            "Prefix and suffix must belong to the same system"
        );
        InfiniteExecutionFragment { prefix, suffix }
    }

    pub fn prefix(&self) -> &FiniteExecutionFragment<'a> {
        &self.prefix
    }

    pub fn suffix(&self) -> &FiniteExecutionFragment<'a> {
        &self.suffix
    }

    fn first_state(&self) -> Option<&State> {
        self.prefix.states.first().or_else(|| self.suffix.states.first())
    }
}

impl PathFragment for InfiniteExecutionFragment<'_> {
    type Trace = InfiniteTrace;

    /// Checks, in order:
    ///
    /// 1. `|prefix.states| = |prefix.actions|` and likewise for the suffix;
    /// 2. the suffix is not empty;
    /// 3. the steps inside the prefix and inside the suffix;
    /// 4. the join from the last prefix state into the first suffix state;
    /// 5. the loop from the last suffix state back to the first suffix state.
    fn check(&self) -> Result<()> {
        let system = self.suffix.system;
        let (prefix, suffix) = (&self.prefix, &self.suffix);

        if prefix.states.len() != prefix.actions.len() {
            return Err(Error::PrefixShapeMismatch {
                states: prefix.states.len(),
                actions: prefix.actions.len(),
            });
        }
        if suffix.states.len() != suffix.actions.len() {
            return Err(Error::SuffixShapeMismatch {
                states: suffix.states.len(),
                actions: suffix.actions.len(),
            });
        }
        let (Some(head), Some(last), Some(last_action)) = (suffix.states.first(), suffix.states.last(), suffix.actions.last()) else {
            return Err(Error::EmptySuffix);
        };

        check_execution_steps(system, &prefix.states, &prefix.actions)?;
        check_execution_steps(system, &suffix.states, &suffix.actions)?;

        if let (Some(from), Some(action)) = (prefix.states.last(), prefix.actions.last()) {
            if !head.is_in(&system.post_action(from, action)) {
                return Err(Error::InvalidJoin {
                    from: from.clone(),
                    to: head.clone(),
                });
            }
        }

        if !head.is_in(&system.post_action(last, last_action)) {
            return Err(Error::InvalidLoop {
                from: last.clone(),
                to: head.clone(),
            });
        }

        Ok(())
    }

    fn is_initial(&self) -> bool {
        self.first_state().is_some_and(|s| self.suffix.system.is_initial(s))
    }

    fn is_maximal(&self) -> bool {
        true
    }

    fn to_trace(&self) -> InfiniteTrace {
        InfiniteTrace::new(self.prefix.to_trace(), self.suffix.to_trace())
    }
}

#[derive(Debug, Clone)]
pub struct InfinitePathFragment<'a> {
    prefix: FinitePathFragment<'a>,
    suffix: FinitePathFragment<'a>,
}

impl<'a> InfinitePathFragment<'a> {
    /// Creates the lasso `prefix (suffix)^ω`.
    ///
    /// # Panics
    ///
    /// Panics if the two parts belong to different systems.
    pub fn new(prefix: FinitePathFragment<'a>, suffix: FinitePathFragment<'a>) -> Self {
        assert!(
            std::ptr::eq(prefix.system, suffix.system),
            "Prefix and suffix must belong to the same system"
        );
        InfinitePathFragment { prefix, suffix }
    }

    pub fn prefix(&self) -> &FinitePathFragment<'a> {
        &self.prefix
    }

    pub fn suffix(&self) -> &FinitePathFragment<'a> {
        &self.suffix
    }

    fn first_state(&self) -> Option<&State> {
        self.prefix.states.first().or_else(|| self.suffix.states.first())
    }
}

impl PathFragment for InfinitePathFragment<'_> {
    type Trace = InfiniteTrace;

    /// Checks that the suffix is not empty, that prefix and suffix are valid
    /// path fragments, and that the join and the loop are transitions.
    fn check(&self) -> Result<()> {
        let system = self.suffix.system;
        let (Some(head), Some(last)) = (self.suffix.states.first(), self.suffix.states.last()) else {
            return Err(Error::EmptySuffix);
        };

        self.prefix.check()?;
        self.suffix.check()?;

        if let Some(from) = self.prefix.states.last() {
            if !head.is_in(&system.post(from)) {
                return Err(Error::InvalidJoin {
                    from: from.clone(),
                    to: head.clone(),
                });
            }
        }

        if !head.is_in(&system.post(last)) {
            return Err(Error::InvalidLoop {
                from: last.clone(),
                to: head.clone(),
            });
        }

        Ok(())
    }

    fn is_initial(&self) -> bool {
        self.first_state().is_some_and(|s| self.suffix.system.is_initial(s))
    }

    fn is_maximal(&self) -> bool {
        true
    }

    fn to_trace(&self) -> InfiniteTrace {
        InfiniteTrace::new(self.prefix.to_trace(), self.suffix.to_trace())
    }
}
