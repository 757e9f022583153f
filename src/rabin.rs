//! Deterministic Rabin automata.
//!
//! A DRA is `(Q, q0, Σ, δ, Ω)`: a finite state set, a single initial state,
//! an alphabet of atomic propositions, a partial transition *function*
//! `δ: Q × Σ → Q`, and a list of acceptance pairs `Ω = [(E_1, F_1), ...]`.
//! A run is accepting iff for some pair it visits `E_i` finitely often and
//! `F_i` infinitely often.
//!
//! Only the structure is modeled and validated here; acceptance of runs is
//! not decided.
//!
//! ```
//! use lts_rs::proposition::AtomicProposition;
//! use lts_rs::rabin::DeterministicRabinAutomaton;
//! use lts_rs::state::State;
//!
//! let dra = DeterministicRabinAutomaton::new(
//!     &["q0", "q1"],
//!     "q0",
//!     &["a", "b"],
//!     vec![("q0", vec![("a", "q1"), ("b", "q0")]), ("q1", vec![("a", "q1")])],
//!     vec![(vec![], vec!["q1"])],
//! )
//! .unwrap();
//!
//! let q0 = State::new("q0");
//! assert_eq!(dra.next(&q0, &AtomicProposition::new("a")), Some(&State::new("q1")));
//! assert_eq!(dra.next(&State::new("q1"), &AtomicProposition::new("b")), None);
//! ```

use std::collections::BTreeMap;

use log::debug;

use crate::error::{Error, OmegaHalf, Result};
use crate::proposition::{self, AtomicProposition};
use crate::state::{self, State};

/// The transition function `δ`, partial in both arguments.
pub type Alpha = BTreeMap<State, BTreeMap<AtomicProposition, State>>;

/// A Rabin acceptance pair `(E, F)`.
pub type OmegaPair = (Vec<State>, Vec<State>);

#[derive(Debug, Clone, PartialEq)]
pub struct DeterministicRabinAutomaton {
    states: Vec<State>,
    initial_state: State,
    alphabet: Vec<AtomicProposition>,
    alpha: Alpha,
    omega: Vec<OmegaPair>,
}

impl DeterministicRabinAutomaton {
    /// Builds an automaton from names and validates it.
    ///
    /// `transitions` maps a state name to `(symbol, successor)` pairs. A later
    /// pair for the same symbol replaces an earlier one.
    ///
    /// The checks run in this order: [initial state][Self::check_s0],
    /// [transition function][Self::check_alpha], [acceptance pairs][Self::check_omega].
    pub fn new<'a, T, P>(
        state_names: &[&str],
        initial_state_name: &str,
        alphabet_names: &[&str],
        transitions: T,
        omega: Vec<(Vec<&str>, Vec<&str>)>,
    ) -> Result<Self>
    where
        T: IntoIterator<Item = (&'a str, P)>,
        P: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut alpha = Alpha::new();
        for (source, moves) in transitions {
            let entry = alpha.entry(State::new(source)).or_default();
            for (symbol, target) in moves {
                entry.insert(AtomicProposition::new(symbol), State::new(target));
            }
        }

        let omega = omega
            .into_iter()
            .map(|(e, f)| (state::from_names(&e), state::from_names(&f)))
            .collect();

        Self::from_parts(
            state::from_names(state_names),
            State::new(initial_state_name),
            proposition::from_names(alphabet_names),
            alpha,
            omega,
        )
    }

    /// Builds an automaton from typed parts and validates it.
    pub fn from_parts(
        states: Vec<State>,
        initial_state: State,
        alphabet: Vec<AtomicProposition>,
        alpha: Alpha,
        omega: Vec<OmegaPair>,
    ) -> Result<Self> {
        let dra = DeterministicRabinAutomaton {
            states,
            initial_state,
            alphabet,
            alpha,
            omega,
        };
        debug!(
            "new DRA: {} states, {} symbols, {} acceptance pairs",
            dra.states.len(),
            dra.alphabet.len(),
            dra.omega.len()
        );
        dra.check_s0()?;
        dra.check_alpha()?;
        dra.check_omega()?;
        Ok(dra)
    }

    /// Checks that the initial state is in the state set.
    pub fn check_s0(&self) -> Result<()> {
        if !self.initial_state.is_in(&self.states) {
            return Err(Error::UnknownInitialState(self.initial_state.clone()));
        }
        Ok(())
    }

    /// Checks the transition function: sources and successors must be states,
    /// and every symbol must be in the alphabet.
    pub fn check_alpha(&self) -> Result<()> {
        for (source, moves) in self.alpha.iter() {
            if !source.is_in(&self.states) {
                return Err(Error::UnknownSourceState(source.clone()));
            }
            for (symbol, target) in moves.iter() {
                if !symbol.is_in(&self.alphabet) {
                    return Err(Error::UnknownSymbol {
                        state: source.clone(),
                        symbol: symbol.clone(),
                    });
                }
                if !target.is_in(&self.states) {
                    return Err(Error::UnknownSuccessor {
                        from: source.clone(),
                        symbol: symbol.clone(),
                        to: target.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Checks that both components of every acceptance pair are subsets of
    /// the state set. Reports the first offending pair, half and state.
    pub fn check_omega(&self) -> Result<()> {
        for (index, (e, f)) in self.omega.iter().enumerate() {
            for (half, set) in [(OmegaHalf::E, e), (OmegaHalf::F, f)] {
                if let Some(state) = set.iter().find(|s| !s.is_in(&self.states)) {
                    return Err(Error::OmegaNotSubset {
                        index,
                        half,
                        state: state.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn initial_state(&self) -> &State {
        &self.initial_state
    }

    pub fn alphabet(&self) -> &[AtomicProposition] {
        &self.alphabet
    }

    pub fn alpha(&self) -> &Alpha {
        &self.alpha
    }

    pub fn omega(&self) -> &[OmegaPair] {
        &self.omega
    }

    /// The successor `δ(state, symbol)`, if defined.
    pub fn next(&self, state: &State, symbol: &AtomicProposition) -> Option<&State> {
        self.alpha.get(state)?.get(symbol)
    }
}
