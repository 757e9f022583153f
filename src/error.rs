//! Error type shared by all constructors and validators.
//!
//! Every failure here is recoverable: it describes which invariant was violated
//! and by which state, action or proposition, and leaves it to the caller to
//! retry with corrected input.

use crate::proposition::AtomicProposition;
use crate::state::State;
use crate::types::Action;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ─── Structure ───
    #[error("initial state \"{0}\" is not in the state set")]
    UnknownInitialState(State),

    #[error("source state \"{0}\" of the transition relation is not in the state set")]
    UnknownSourceState(State),

    #[error("action \"{action}\" used by state \"{state}\" is not in the action set")]
    UnknownAction { state: State, action: Action },

    #[error("target state \"{to}\" of transition ({from}, {action}) is not in the state set")]
    UnknownTargetState { from: State, action: Action, to: State },

    #[error("labeled state \"{0}\" is not in the state set")]
    UnknownLabeledState(State),

    #[error("proposition \"{proposition}\" in the label of state \"{state}\" is not an atomic proposition of the system")]
    UnknownProposition { state: State, proposition: AtomicProposition },

    // ─── Partitions ───
    #[error("invalid partition: block {index} is empty")]
    EmptyBlock { index: usize },

    #[error("invalid partition: state \"{state}\" in block {block} is not in the state set")]
    ForeignState { block: usize, state: State },

    #[error("invalid partition: state \"{0}\" is not covered by any block")]
    UncoveredState(State),

    #[error("invalid partition: blocks {first} and {second} share state \"{state}\"")]
    OverlappingBlocks { first: usize, second: usize, state: State },

    #[error("partition is not observation preserving: states \"{first}\" and \"{other}\" in block {block} have different labels")]
    MixedLabels { block: usize, first: State, other: State },

    // ─── Composition ───
    #[error("cannot interleave invalid systems (left: {}, right: {})", describe(.left), describe(.right))]
    InvalidOperands { left: Option<Box<Error>>, right: Option<Box<Error>> },

    // ─── Fragments ───
    #[error("fragment has {states} states, so it needs {} actions, but has {actions}", .states.saturating_sub(1))]
    ShapeMismatch { states: usize, actions: usize },

    #[error("prefix must have as many states as actions, but has {states} states and {actions} actions")]
    PrefixShapeMismatch { states: usize, actions: usize },

    #[error("suffix must have as many states as actions, but has {states} states and {actions} actions")]
    SuffixShapeMismatch { states: usize, actions: usize },

    #[error("repeating suffix is empty")]
    EmptySuffix,

    #[error("invalid transition at index {index}: \"{to}\" is not in Post(\"{from}\", \"{action}\")")]
    InvalidTransition { index: usize, from: State, action: Action, to: State },

    #[error("invalid step at index {index}: \"{to}\" is not in Post(\"{from}\")")]
    InvalidPathStep { index: usize, from: State, to: State },

    #[error("invalid join from prefix to suffix: \"{to}\" is not a successor of \"{from}\"")]
    InvalidJoin { from: State, to: State },

    #[error("invalid loop closing the suffix: \"{to}\" is not a successor of \"{from}\"")]
    InvalidLoop { from: State, to: State },

    // ─── Rabin automata ───
    #[error("symbol \"{symbol}\" used by state \"{state}\" is not in the alphabet")]
    UnknownSymbol { state: State, symbol: AtomicProposition },

    #[error("successor \"{to}\" of ({from}, {symbol}) is not in the state set")]
    UnknownSuccessor { from: State, symbol: AtomicProposition, to: State },

    #[error("component {half} of omega pair {index} contains \"{state}\", which is not in the state set")]
    OmegaNotSubset { index: usize, half: OmegaHalf, state: State },
}

/// One of the two sets of a Rabin acceptance pair `(E, F)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OmegaHalf {
    /// States to be visited finitely often.
    E,
    /// States to be visited infinitely often.
    F,
}

impl std::fmt::Display for OmegaHalf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OmegaHalf::E => write!(f, "E"),
            OmegaHalf::F => write!(f, "F"),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

fn describe(error: &Option<Box<Error>>) -> String {
    match error {
        Some(e) => e.to_string(),
        None => "ok".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_offenders() {
        let e = Error::UnknownTargetState {
            from: State::new("1"),
            action: Action::new("a"),
            to: State::new("9"),
        };
        let msg = e.to_string();
        assert!(msg.contains("\"9\""), "{}", msg);
        assert!(msg.contains("(1, a)"), "{}", msg);

        let e = Error::OverlappingBlocks { first: 0, second: 2, state: State::new("x") };
        assert_eq!(e.to_string(), "invalid partition: blocks 0 and 2 share state \"x\"");
    }

    #[test]
    fn test_shape_mismatch_message() {
        let e = Error::ShapeMismatch { states: 2, actions: 0 };
        assert_eq!(e.to_string(), "fragment has 2 states, so it needs 1 actions, but has 0");
    }

    #[test]
    fn test_invalid_operands_message() {
        let e = Error::InvalidOperands {
            left: None,
            right: Some(Box::new(Error::UnknownInitialState(State::new("q")))),
        };
        let msg = e.to_string();
        assert!(msg.contains("left: ok"), "{}", msg);
        assert!(msg.contains("initial state \"q\""), "{}", msg);
    }

    #[test]
    fn test_omega_half_display() {
        let e = Error::OmegaNotSubset { index: 1, half: OmegaHalf::F, state: State::new("z") };
        assert_eq!(e.to_string(), "component F of omega pair 1 contains \"z\", which is not in the state set");
    }
}
