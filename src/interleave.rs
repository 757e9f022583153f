//! Interleaving (asynchronous parallel composition) of transition systems.
//!
//! In `TS1 ||| TS2` each component moves on its own; there is no
//! synchronization on shared actions. If an action belongs to both alphabets,
//! either component may take it, but never both at once.

use std::collections::BTreeMap;

use log::debug;

use crate::error::{Error, Result};
use crate::proposition::Label;
use crate::state::State;
use crate::system::{TransitionSystem, Transitions};
use crate::utils;

impl TransitionSystem {
    /// Builds the interleaving product `self ||| other`.
    ///
    /// - states: `(s1, s2)` for every `s1 ∈ S1` and `s2 ∈ S2`, as [`State::Product`];
    /// - actions: `Act1 ∪ Act2`;
    /// - `(s1, s2) --a--> (s1', s2)` if `a ∈ Act1` and `s1' ∈ Post1(s1, a)`,
    ///   and `(s1, s2) --a--> (s1, s2')` if `a ∈ Act2` and `s2' ∈ Post2(s2, a)`;
    /// - initial states: `I1 × I2`;
    /// - atomic propositions: `AP1` followed by `AP2`;
    /// - `L(s1, s2) = L1(s1)` followed by `L2(s2)`.
    ///
    /// Both operands must pass [`check`][Self::check]; otherwise the error names
    /// the failure of each operand.
    ///
    /// ```
    /// use lts_rs::models::beverage_vending_machine;
    ///
    /// let ts = beverage_vending_machine();
    /// let product = ts.interleave(&ts).unwrap();
    /// assert_eq!(product.num_states(), 16);
    /// assert_eq!(product.initial_states().len(), 1);
    /// ```
    pub fn interleave(&self, other: &TransitionSystem) -> Result<TransitionSystem> {
        let left = self.check().err();
        let right = other.check().err();
        if left.is_some() || right.is_some() {
            return Err(Error::InvalidOperands {
                left: left.map(Box::new),
                right: right.map(Box::new),
            });
        }

        let pairs = utils::cartesian_product(self.states(), other.states());
        let states: Vec<State> = pairs.iter().map(|(s1, s2)| State::product(s1.clone(), s2.clone())).collect();

        let actions = utils::union([self.actions(), other.actions()]);

        let mut transitions = Transitions::new();
        for ((s1, s2), state) in pairs.iter().zip(states.iter()) {
            for action in actions.iter() {
                let mut targets = Vec::new();
                if self.actions().contains(action) {
                    for t1 in self.post_action(s1, action) {
                        utils::append_if_unique(&mut targets, State::product(t1, s2.clone()));
                    }
                }
                if other.actions().contains(action) {
                    for t2 in other.post_action(s2, action) {
                        utils::append_if_unique(&mut targets, State::product(s1.clone(), t2));
                    }
                }
                if !targets.is_empty() {
                    transitions.entry(state.clone()).or_default().insert(action.clone(), targets);
                }
            }
        }

        let initial_states = utils::cartesian_product(self.initial_states(), other.initial_states())
            .into_iter()
            .map(|(s1, s2)| State::product(s1, s2))
            .collect();

        let mut atomic_propositions = self.atomic_propositions().to_vec();
        atomic_propositions.extend_from_slice(other.atomic_propositions());

        let mut labels = BTreeMap::<State, Label>::new();
        for ((s1, s2), state) in pairs.iter().zip(states.iter()) {
            let mut label = self.label(s1).to_vec();
            label.extend_from_slice(other.label(s2));
            labels.insert(state.clone(), label);
        }

        debug!(
            "interleave: {} x {} states -> {} states, {} actions",
            self.num_states(),
            other.num_states(),
            states.len(),
            actions.len()
        );

        TransitionSystem::from_parts(states, actions, transitions, initial_states, atomic_propositions, labels)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::models::{beverage_vending_machine, simple_chain};
    use crate::proposition::{self, AtomicProposition};
    use crate::types::Action;

    fn p(a: &str, b: &str) -> State {
        State::product(State::new(a), State::new(b))
    }

    fn toggle(name: &str, action: &str) -> TransitionSystem {
        TransitionSystem::new(
            &["off", "on"],
            &[action],
            vec![("off", vec![(action, vec!["on"])]), ("on", vec![(action, vec!["off"])])],
            &["off"],
            &[name],
            vec![("on", vec![name])],
        )
        .unwrap()
    }

    #[test]
    fn test_cardinalities() {
        let ts1 = beverage_vending_machine();
        let ts2 = simple_chain();
        let product = ts1.interleave(&ts2).unwrap();

        assert_eq!(product.num_states(), ts1.num_states() * ts2.num_states());
        assert_eq!(product.actions().len(), utils::union([ts1.actions(), ts2.actions()]).len());
        assert_eq!(product.initial_states().len(), ts1.initial_states().len() * ts2.initial_states().len());
        assert_eq!(
            product.atomic_propositions().len(),
            ts1.atomic_propositions().len() + ts2.atomic_propositions().len()
        );
    }

    #[test]
    fn test_independent_moves() {
        let product = toggle("x", "a").interleave(&toggle("y", "b")).unwrap();

        assert_eq!(product.actions(), &[Action::new("a"), Action::new("b")]);
        assert_eq!(product.initial_states(), &[p("off", "off")]);
        assert_eq!(product.post_action(&p("off", "off"), &Action::new("a")), vec![p("on", "off")]);
        assert_eq!(product.post_action(&p("off", "off"), &Action::new("b")), vec![p("off", "on")]);
        assert_eq!(product.post(&p("on", "on")), vec![p("off", "on"), p("on", "off")]);
        assert!(product.is_reachable(&p("on", "on")));
    }

    #[test]
    fn test_shared_action_is_not_synchronized() {
        let product = toggle("x", "a").interleave(&toggle("y", "a")).unwrap();

        assert_eq!(product.actions(), &[Action::new("a")]);
        // Either component moves alone; (on, on) is never reached in one step.
        assert_eq!(product.post_action(&p("off", "off"), &Action::new("a")), vec![p("on", "off"), p("off", "on")]);
    }

    #[test]
    fn test_labels_concatenate() {
        let product = toggle("x", "a").interleave(&toggle("y", "b")).unwrap();

        assert_eq!(product.atomic_propositions(), proposition::from_names(&["x", "y"]).as_slice());
        assert_eq!(product.label(&p("on", "on")), proposition::from_names(&["x", "y"]).as_slice());
        assert_eq!(product.label(&p("off", "on")), proposition::from_names(&["y"]).as_slice());
        assert!(product.label(&p("off", "off")).is_empty());
        assert!(product.satisfies(&p("on", "off"), &AtomicProposition::new("x")));
    }

    #[test]
    fn test_invalid_operands() {
        let good = toggle("x", "a");
        let bad = TransitionSystem::from_parts_unchecked(
            vec![State::new("1")],
            vec![Action::new("a")],
            Transitions::new(),
            vec![State::new("0")],
            Vec::new(),
            BTreeMap::new(),
        );
        assert!(bad.check().is_err());

        let err = good.interleave(&bad).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidOperands {
                left: None,
                right: Some(Box::new(Error::UnknownInitialState(State::new("0"))))
            }
        );

        let err = bad.interleave(&bad).unwrap_err();
        match err {
            Error::InvalidOperands { left, right } => {
                assert!(left.is_some());
                assert!(right.is_some());
            }
            e => panic!("unexpected error: {}", e),
        }
    }

    #[test]
    fn test_product_of_products() {
        let t = toggle("x", "a");
        let tt = t.interleave(&t).unwrap();
        let ttt = tt.interleave(&t).unwrap();
        assert_eq!(ttt.num_states(), 8);
        assert!(ttt.check().is_ok());
    }
}
