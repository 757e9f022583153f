//! Explicit-state labeled transition systems.
//!
//! A [`TransitionSystem`] is the tuple `(S, Act, →, I, AP, L)`:
//!
//! - `S` is a finite list of [states][State],
//! - `Act` is a finite list of [actions][Action],
//! - `→ : S × Act → 2^S` is the transition relation,
//! - `I ⊆ S` is the set of initial states,
//! - `AP` is a list of [atomic propositions][AtomicProposition],
//! - `L : S → 2^AP` is the labeling function.
//!
//! Systems are built once, by [`TransitionSystem::new`], and validated on
//! construction. They are never mutated afterwards: the quotient and the
//! interleaving product build fresh systems.
//!
//! # Post and Pre
//!
//! `Post(s, a)` is the list of `a`-successors of `s`, and `Post(s)` is the union
//! over all actions, in the order of the action alphabet. `Pre` is the inverse,
//! computed by a linear scan over the state list. Both return deduplicated
//! vectors in a deterministic order.
//!
//! # Example
//!
//! ```
//! use lts_rs::state::State;
//! use lts_rs::system::TransitionSystem;
//! use lts_rs::types::Action;
//!
//! let ts = TransitionSystem::new(
//!     &["1", "2", "3"],
//!     &["a"],
//!     vec![
//!         ("1", vec![("a", vec!["1", "2"])]),
//!         ("2", vec![("a", vec!["3"])]),
//!     ],
//!     &["1"],
//!     &["A", "B"],
//!     vec![("1", vec!["A"]), ("2", vec!["B"]), ("3", vec!["A", "B"])],
//! )
//! .unwrap();
//!
//! let s1 = State::new("1");
//! assert_eq!(ts.post_action(&s1, &Action::new("a")), vec![State::new("1"), State::new("2")]);
//! assert!(ts.is_terminal(&State::new("3")));
//! assert!(ts.is_reachable(&State::new("3")));
//! ```

use std::collections::BTreeMap;

use log::debug;

use crate::error::{Error, Result};
use crate::proposition::{self, AtomicProposition, Label};
use crate::state::{State, SystemState};
use crate::types::Action;
use crate::utils;

/// Transition relation: `state -> action -> successors`.
pub type Transitions = BTreeMap<State, BTreeMap<Action, Vec<State>>>;

#[derive(Debug, Clone, PartialEq)]
pub struct TransitionSystem {
    states: Vec<State>,
    actions: Vec<Action>,
    transitions: Transitions,
    initial_states: Vec<State>,
    atomic_propositions: Vec<AtomicProposition>,
    labels: BTreeMap<State, Label>,
}

impl TransitionSystem {
    /// Builds a transition system from names and validates it.
    ///
    /// `transitions` maps a state name to a list of `(action, successors)`
    /// pairs, and `labels` maps a state name to the propositions holding in it.
    /// States missing from `labels` are labeled with the empty set.
    ///
    /// The checks run in this order: [initial states][Self::check_initial_states],
    /// [transition relation][Self::check_transition], [labels][Self::check_labels].
    /// The first violation is returned.
    pub fn new<'a, T, A, L>(
        state_names: &[&str],
        action_names: &[&str],
        transitions: T,
        initial_state_names: &[&str],
        atomic_proposition_names: &[&str],
        labels: L,
    ) -> Result<Self>
    where
        T: IntoIterator<Item = (&'a str, A)>,
        A: IntoIterator<Item = (&'a str, Vec<&'a str>)>,
        L: IntoIterator<Item = (&'a str, Vec<&'a str>)>,
    {
        let mut transition_map = Transitions::new();
        for (source, per_action) in transitions {
            let entry = transition_map.entry(State::new(source)).or_default();
            for (action, targets) in per_action {
                entry.insert(Action::new(action), targets.into_iter().map(State::new).collect());
            }
        }

        let label_map = labels
            .into_iter()
            .map(|(state, props)| (State::new(state), proposition::from_names(&props)))
            .collect();

        Self::from_parts(
            state_names.iter().map(|&s| State::new(s)).collect(),
            action_names.iter().map(|&a| Action::new(a)).collect(),
            transition_map,
            initial_state_names.iter().map(|&s| State::new(s)).collect(),
            proposition::from_names(atomic_proposition_names),
            label_map,
        )
    }

    /// Builds a transition system from already typed parts and validates it.
    pub fn from_parts(
        states: Vec<State>,
        actions: Vec<Action>,
        transitions: Transitions,
        initial_states: Vec<State>,
        atomic_propositions: Vec<AtomicProposition>,
        labels: BTreeMap<State, Label>,
    ) -> Result<Self> {
        let ts = Self::from_parts_unchecked(states, actions, transitions, initial_states, atomic_propositions, labels);
        debug!(
            "new transition system: {} states, {} actions, {} initial, {} propositions",
            ts.states.len(),
            ts.actions.len(),
            ts.initial_states.len(),
            ts.atomic_propositions.len()
        );
        ts.check()?;
        Ok(ts)
    }

    /// Builds a transition system without validating it.
    ///
    /// Queries on an invalid system are well-defined but meaningless; use
    /// [`check`][Self::check] before relying on the result.
    pub fn from_parts_unchecked(
        states: Vec<State>,
        actions: Vec<Action>,
        transitions: Transitions,
        initial_states: Vec<State>,
        atomic_propositions: Vec<AtomicProposition>,
        labels: BTreeMap<State, Label>,
    ) -> Self {
        TransitionSystem {
            states,
            actions,
            transitions,
            initial_states,
            atomic_propositions,
            labels,
        }
    }
}

// Validation
impl TransitionSystem {
    /// Checks all structural invariants of the system.
    pub fn check(&self) -> Result<()> {
        self.check_initial_states()?;
        self.check_transition()?;
        self.check_labels()?;
        Ok(())
    }

    /// Checks that every initial state is in the state set.
    pub fn check_initial_states(&self) -> Result<()> {
        for s in self.initial_states.iter() {
            if !s.is_in(&self.states) {
                return Err(Error::UnknownInitialState(s.clone()));
            }
        }
        Ok(())
    }

    /// Checks the transition relation: source states, actions and target
    /// states must all be declared.
    pub fn check_transition(&self) -> Result<()> {
        for source in self.transitions.keys() {
            if !source.is_in(&self.states) {
                return Err(Error::UnknownSourceState(source.clone()));
            }
        }

        for (source, per_action) in self.transitions.iter() {
            for (action, targets) in per_action.iter() {
                if !self.actions.contains(action) {
                    return Err(Error::UnknownAction {
                        state: source.clone(),
                        action: action.clone(),
                    });
                }
                for target in targets {
                    if !target.is_in(&self.states) {
                        return Err(Error::UnknownTargetState {
                            from: source.clone(),
                            action: action.clone(),
                            to: target.clone(),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// Checks that every labeled state is declared and every label only uses
    /// declared atomic propositions.
    pub fn check_labels(&self) -> Result<()> {
        for (state, label) in self.labels.iter() {
            if !state.is_in(&self.states) {
                return Err(Error::UnknownLabeledState(state.clone()));
            }
            for ap in label {
                if !ap.is_in(&self.atomic_propositions) {
                    return Err(Error::UnknownProposition {
                        state: state.clone(),
                        proposition: ap.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

// Accessors
impl TransitionSystem {
    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn transitions(&self) -> &Transitions {
        &self.transitions
    }

    pub fn initial_states(&self) -> &[State] {
        &self.initial_states
    }

    pub fn atomic_propositions(&self) -> &[AtomicProposition] {
        &self.atomic_propositions
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    pub fn num_transitions(&self) -> usize {
        self.transitions.values().flat_map(|m| m.values()).map(|targets| targets.len()).sum()
    }

    pub fn contains_state(&self, state: &State) -> bool {
        state.is_in(&self.states)
    }

    pub fn is_initial(&self, state: &State) -> bool {
        state.is_in(&self.initial_states)
    }

    /// Returns the label `L(s)`, empty if the state has none.
    pub fn label(&self, state: &State) -> &[AtomicProposition] {
        self.labels.get(state).map(|l| l.as_slice()).unwrap_or(&[])
    }

    /// Returns a handle for the declared state equal to `state`.
    pub fn state(&self, state: impl Into<State>) -> Option<SystemState<'_>> {
        let state = state.into();
        self.states.iter().find(|s| **s == state).map(|s| SystemState::new(self, s))
    }

    /// Checks whether `ap ∈ L(s)`.
    pub fn satisfies(&self, state: &State, ap: &AtomicProposition) -> bool {
        ap.is_in(self.label(state))
    }
}

// Post and Pre
impl TransitionSystem {
    /// Successors of `state` under `action`.
    ///
    /// A missing entry in the relation means "no move" and yields an empty list.
    pub fn post_action(&self, state: &State, action: &Action) -> Vec<State> {
        let mut result = Vec::new();
        if let Some(targets) = self.transitions.get(state).and_then(|m| m.get(action)) {
            for t in targets {
                utils::append_if_unique(&mut result, t.clone());
            }
        }
        result
    }

    /// Successors of `state` under any action, in the order of the action alphabet.
    pub fn post(&self, state: &State) -> Vec<State> {
        let mut result = Vec::new();
        for action in self.actions.iter() {
            for t in self.post_action(state, action) {
                utils::append_if_unique(&mut result, t);
            }
        }
        result
    }

    /// Predecessors of `state` under `action`, in the order of the state list.
    pub fn pre_action(&self, state: &State, action: &Action) -> Vec<State> {
        self.states
            .iter()
            .filter(|p| {
                self.transitions
                    .get(*p)
                    .and_then(|m| m.get(action))
                    .is_some_and(|targets| state.is_in(targets))
            })
            .cloned()
            .collect()
    }

    /// Predecessors of `state` under any action.
    pub fn pre(&self, state: &State) -> Vec<State> {
        let mut result = Vec::new();
        for action in self.actions.iter() {
            for p in self.pre_action(state, action) {
                utils::append_if_unique(&mut result, p);
            }
        }
        result
    }

    /// A state is terminal iff it has no successors.
    pub fn is_terminal(&self, state: &State) -> bool {
        self.post(state).is_empty()
    }
}

// Reachability
impl TransitionSystem {
    /// Checks whether `state` can be reached from some initial state.
    ///
    /// Computes the backward closure of `state` breadth-first. The frontier only
    /// ever holds states that were not visited before, so the loop stops after
    /// at most `|S|` rounds.
    pub fn is_reachable(&self, state: &State) -> bool {
        if self.is_initial(state) {
            return true;
        }

        let mut visited = vec![state.clone()];
        let mut frontier = vec![state.clone()];
        let mut round = 0;

        while !frontier.is_empty() {
            round += 1;

            let mut predecessors = Vec::new();
            for s in frontier.iter() {
                for p in self.pre(s) {
                    utils::append_if_unique(&mut predecessors, p);
                }
            }

            if predecessors.iter().any(|p| self.is_initial(p)) {
                debug!("is_reachable({}): initial state found in round {}", state, round);
                return true;
            }

            frontier = predecessors.into_iter().filter(|p| utils::append_if_unique(&mut visited, p.clone())).collect();
            debug!("is_reachable({}): round {}, {} new, {} visited", state, round, frontier.len(), visited.len());
        }

        false
    }

    /// All states reachable from the initial states, in breadth-first order.
    pub fn reachable_states(&self) -> Vec<State> {
        let mut visited: Vec<State> = Vec::new();
        for s in self.initial_states.iter() {
            utils::append_if_unique(&mut visited, s.clone());
        }

        let mut i = 0;
        while i < visited.len() {
            let current = visited[i].clone();
            for t in self.post(&current) {
                utils::append_if_unique(&mut visited, t);
            }
            i += 1;
        }

        visited
    }
}

// Classification
impl TransitionSystem {
    /// At most one initial state, and `|Post(s, a)| <= 1` for every state and action.
    pub fn is_action_deterministic(&self) -> bool {
        if self.initial_states.len() > 1 {
            return false;
        }

        for s in self.states.iter() {
            for a in self.actions.iter() {
                if self.post_action(s, a).len() > 1 {
                    return false;
                }
            }
        }

        true
    }

    /// At most one initial state, and for every state `s` and every label
    /// `A ⊆ AP`, at most one successor of `s` is labeled exactly `A`.
    ///
    /// Labels are subsets of `AP` once [`check_labels`][Self::check_labels]
    /// passed, so it is enough to look for two successors with equal labels.
    pub fn is_ap_deterministic(&self) -> bool {
        if self.initial_states.len() > 1 {
            return false;
        }

        for s in self.states.iter() {
            let successors = self.post(s);
            for (i, t1) in successors.iter().enumerate() {
                for t2 in successors.iter().skip(i + 1) {
                    if proposition::label_equals(self.label(t1), self.label(t2)) {
                        debug!(
                            "is_ap_deterministic: successors {} and {} of {} are both labeled {}",
                            t1,
                            t2,
                            s,
                            proposition::display_label(self.label(t1))
                        );
                        return false;
                    }
                }
            }
        }

        true
    }

    /// Every state has at least one successor under every action.
    pub fn is_non_blocking(&self) -> bool {
        self.states.iter().all(|s| self.actions.iter().all(|a| !self.post_action(s, a).is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn s(name: &str) -> State {
        State::new(name)
    }

    fn a(name: &str) -> Action {
        Action::new(name)
    }

    fn simple_ts1() -> TransitionSystem {
        TransitionSystem::new(
            &["1", "2", "3"],
            &["1", "2"],
            vec![
                ("1", vec![("1", vec!["1"]), ("2", vec!["2"])]),
                ("2", vec![("1", vec!["1", "2"]), ("2", vec!["2", "3"])]),
                ("3", vec![("1", vec!["3"]), ("2", vec!["2"])]),
            ],
            &["1"],
            &["A", "B", "C", "D"],
            vec![("1", vec!["A"]), ("2", vec!["B", "D"]), ("3", vec!["C", "D"])],
        )
        .unwrap()
    }

    fn simple_ts2() -> TransitionSystem {
        TransitionSystem::new(
            &["1", "2", "3", "4", "5"],
            &["1", "2"],
            vec![
                ("1", vec![("1", vec!["1"]), ("2", vec!["2"])]),
                ("2", vec![("1", vec!["1", "2"]), ("2", vec!["2", "3"])]),
                ("3", vec![("1", vec!["3"]), ("2", vec!["2"])]),
                ("4", vec![("1", vec!["2"]), ("2", vec!["2"])]),
            ],
            &["1"],
            &["A", "B"],
            vec![("1", vec!["A"]), ("2", vec!["B"]), ("3", vec!["A", "B"])],
        )
        .unwrap()
    }

    #[test]
    fn test_construction() {
        let ts = simple_ts1();
        assert_eq!(ts.num_states(), 3);
        assert_eq!(ts.actions().len(), 2);
        assert_eq!(ts.initial_states(), &[s("1")]);
        assert_eq!(ts.atomic_propositions().len(), 4);
        assert_eq!(ts.num_transitions(), 8);
        assert_eq!(ts.label(&s("2")), proposition::from_names(&["B", "D"]).as_slice());
    }

    #[test]
    fn test_unknown_initial_state() {
        let res = TransitionSystem::new(&["1"], &["a"], vec![("1", vec![("a", vec!["1"])])], &["7"], &[], Vec::new());
        assert_eq!(res.unwrap_err(), Error::UnknownInitialState(s("7")));
    }

    #[test]
    fn test_initial_state_checked_first() {
        // Both the initial state and the relation are broken; CheckI comes first.
        let res = TransitionSystem::new(&["1"], &["a"], vec![("9", vec![("a", vec!["1"])])], &["7"], &[], Vec::new());
        assert_eq!(res.unwrap_err(), Error::UnknownInitialState(s("7")));
    }

    #[test]
    fn test_unknown_source_state() {
        let res = TransitionSystem::new(&["1"], &["a"], vec![("9", vec![("a", vec!["1"])])], &["1"], &[], Vec::new());
        assert_eq!(res.unwrap_err(), Error::UnknownSourceState(s("9")));
    }

    #[test]
    fn test_unknown_action() {
        let res = TransitionSystem::new(&["1"], &["a"], vec![("1", vec![("b", vec!["1"])])], &["1"], &[], Vec::new());
        assert_eq!(
            res.unwrap_err(),
            Error::UnknownAction {
                state: s("1"),
                action: a("b")
            }
        );
    }

    #[test]
    fn test_unknown_target_state() {
        let res = TransitionSystem::new(&["1", "2"], &["a"], vec![("1", vec![("a", vec!["2", "3"])])], &["1"], &[], Vec::new());
        assert_eq!(
            res.unwrap_err(),
            Error::UnknownTargetState {
                from: s("1"),
                action: a("a"),
                to: s("3")
            }
        );
    }

    #[test]
    fn test_unknown_label() {
        let res = TransitionSystem::new(&["1"], &["a"], vec![("1", vec![("a", vec!["1"])])], &["1"], &["p"], vec![("2", vec!["p"])]);
        assert_eq!(res.unwrap_err(), Error::UnknownLabeledState(s("2")));

        let res = TransitionSystem::new(&["1"], &["a"], vec![("1", vec![("a", vec!["1"])])], &["1"], &["p"], vec![("1", vec!["q"])]);
        assert_eq!(
            res.unwrap_err(),
            Error::UnknownProposition {
                state: s("1"),
                proposition: AtomicProposition::new("q")
            }
        );
    }

    #[test]
    fn test_post_action() {
        let ts = simple_ts1();
        assert_eq!(ts.post_action(&s("1"), &a("1")), vec![s("1")]);
        assert_eq!(ts.post_action(&s("2"), &a("2")), vec![s("2"), s("3")]);
        // Undeclared pair is "no move", not an error.
        assert!(ts.post_action(&s("1"), &a("zzz")).is_empty());
    }

    #[test]
    fn test_post_union() {
        let ts = simple_ts1();
        assert_eq!(ts.post(&s("1")), vec![s("1"), s("2")]);
        assert_eq!(ts.post(&s("2")), vec![s("1"), s("2"), s("3")]);
        assert_eq!(ts.post(&s("3")), vec![s("3"), s("2")]);

        for st in ts.states() {
            let expected = utils::union(ts.actions().iter().map(|act| ts.post_action(st, act)).collect::<Vec<_>>().iter().map(|v| v.as_slice()));
            assert_eq!(ts.post(st), expected);
        }
    }

    #[test]
    fn test_post_deduplicates() {
        let no_labels = Vec::<(&str, Vec<&str>)>::new();
        let ts = TransitionSystem::new(&["1", "2"], &["a"], vec![("1", vec![("a", vec!["2", "2", "1", "2"])])], &["1"], &[], no_labels).unwrap();
        assert_eq!(ts.post_action(&s("1"), &a("a")), vec![s("2"), s("1")]);
    }

    #[test]
    fn test_pre() {
        let ts = simple_ts2();
        assert_eq!(ts.pre_action(&s("2"), &a("1")), vec![s("2"), s("4")]);
        assert_eq!(ts.pre(&s("2")), vec![s("2"), s("4"), s("1"), s("3")]);
        assert_eq!(ts.pre(&s("3")), vec![s("3"), s("2")]);
        assert!(ts.pre(&s("4")).is_empty());
        assert!(ts.pre(&s("5")).is_empty());
    }

    #[test]
    fn test_terminal() {
        let ts = simple_ts2();
        assert!(!ts.is_terminal(&s("1")));
        assert!(ts.is_terminal(&s("5")));
        for st in ts.states() {
            assert_eq!(ts.is_terminal(st), ts.post(st).is_empty());
        }
    }

    #[test]
    fn test_reachable() {
        let ts = simple_ts2();
        assert!(ts.is_reachable(&s("1")));
        assert!(ts.is_reachable(&s("2")));
        assert!(ts.is_reachable(&s("3")));
        assert!(!ts.is_reachable(&s("4")));
        assert!(!ts.is_reachable(&s("5")));
        assert_eq!(ts.reachable_states(), vec![s("1"), s("2"), s("3")]);
    }

    #[test]
    fn test_reachable_terminates_on_cycle() {
        // 2 <-> 3 form a cycle disconnected from the initial state 1.
        let ts = TransitionSystem::new(
            &["1", "2", "3"],
            &["a"],
            vec![("2", vec![("a", vec!["3"])]), ("3", vec![("a", vec!["2"])])],
            &["1"],
            &[],
            Vec::new(),
        )
        .unwrap();
        assert!(!ts.is_reachable(&s("2")));
        assert!(!ts.is_reachable(&s("3")));
    }

    #[test]
    fn test_initial_states_are_reachable() {
        let ts = simple_ts1();
        for st in ts.initial_states() {
            assert!(ts.is_reachable(st));
        }
    }

    #[test]
    fn test_action_deterministic() {
        let ts = simple_ts1();
        assert!(!ts.is_action_deterministic());

        let ts = TransitionSystem::new(
            &["1", "2"],
            &["a", "b"],
            vec![("1", vec![("a", vec!["2"]), ("b", vec!["1"])]), ("2", vec![("a", vec!["1"])])],
            &["1"],
            &[],
            Vec::new(),
        )
        .unwrap();
        assert!(ts.is_action_deterministic());

        let no_transitions = Vec::<(&str, Vec<(&str, Vec<&str>)>)>::new();
        let no_labels = Vec::<(&str, Vec<&str>)>::new();
        let ts = TransitionSystem::new(&["1", "2"], &["a"], no_transitions, &["1", "2"], &[], no_labels).unwrap();
        assert!(!ts.is_action_deterministic());
    }

    #[test]
    fn test_ap_deterministic() {
        // State 2 reaches 2 and 3 with labels {B, D} and {C, D}: distinct.
        // State 1 reaches 1 and 2 with labels {A} and {B, D}: distinct.
        let ts = simple_ts1();
        assert!(ts.is_ap_deterministic());

        let ts = TransitionSystem::new(
            &["1", "2", "3"],
            &["a", "b"],
            vec![("1", vec![("a", vec!["2"]), ("b", vec!["3"])])],
            &["1"],
            &["p", "q"],
            vec![("2", vec!["p", "q"]), ("3", vec!["q", "p"])],
        )
        .unwrap();
        assert!(!ts.is_ap_deterministic());
    }

    #[test]
    fn test_ap_deterministic_many_propositions() {
        let names: Vec<String> = (0..64).map(|i| format!("p{}", i)).collect();
        let aps: Vec<&str> = names.iter().map(|n| n.as_str()).collect();
        let ts = TransitionSystem::new(
            &["1", "2"],
            &["a"],
            vec![("1", vec![("a", vec!["2"])])],
            &["1"],
            &aps,
            vec![("1", aps[..32].to_vec()), ("2", aps.clone())],
        )
        .unwrap();
        assert!(ts.is_ap_deterministic());

        let ts = TransitionSystem::new(
            &["1", "2", "3"],
            &["a"],
            vec![("1", vec![("a", vec!["2", "3"])])],
            &["1"],
            &aps,
            vec![("2", aps.clone()), ("3", aps.iter().rev().copied().collect())],
        )
        .unwrap();
        assert!(!ts.is_ap_deterministic());
    }

    #[test]
    fn test_non_blocking() {
        assert!(simple_ts1().is_non_blocking());
        assert!(!simple_ts2().is_non_blocking());
    }

    #[test]
    fn test_satisfies() {
        let ts = simple_ts1();
        assert!(ts.satisfies(&s("2"), &AtomicProposition::new("B")));
        assert!(!ts.satisfies(&s("1"), &AtomicProposition::new("B")));
    }

    #[test]
    fn test_state_handle() {
        let ts = simple_ts2();
        let s3 = ts.state("3").unwrap();
        assert_eq!(s3.post(), vec![s("3"), s("2")]);
        assert_eq!(s3.pre(), vec![s("3"), s("2")]);
        assert!(s3.is_reachable());
        assert!(!s3.is_terminal());
        assert_eq!(s3.label().len(), 2);
        assert!(ts.state("5").unwrap().is_terminal());
        assert!(ts.state("42").is_none());
        assert_eq!(ts.state("1"), ts.state("1"));
    }
}
