//! Atomic propositions and labels.
//!
//! A state of a transition system is labeled with the set of atomic
//! propositions that hold in it. Labels are stored as ordered vectors; every
//! comparison that has a semantic meaning (equality of two labels) goes through
//! [`set_equals`][crate::utils::set_equals], so order never matters.

use std::fmt;

use crate::utils;

/// A named atomic proposition. Two propositions are equal iff their names are.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct AtomicProposition(String);

/// The set of atomic propositions holding in a state.
pub type Label = Vec<AtomicProposition>;

impl AtomicProposition {
    pub fn new(name: impl Into<String>) -> Self {
        AtomicProposition(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Checks whether this proposition occurs in `props`.
    pub fn is_in(&self, props: &[AtomicProposition]) -> bool {
        props.contains(self)
    }
}

impl fmt::Display for AtomicProposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AtomicProposition {
    fn from(name: &str) -> Self {
        AtomicProposition::new(name)
    }
}

impl From<String> for AtomicProposition {
    fn from(name: String) -> Self {
        AtomicProposition(name)
    }
}

/// Converts a list of names into a label.
pub fn from_names<S: AsRef<str>>(names: &[S]) -> Label {
    names.iter().map(|s| AtomicProposition::new(s.as_ref())).collect()
}

/// All subsets of the given propositions, the empty label last.
///
/// ```
/// use lts_rs::proposition::{from_names, powerset};
///
/// let aps = from_names(&["paid", "drink"]);
/// let all = powerset(&aps);
/// assert_eq!(all.len(), 4);
/// assert!(all.last().unwrap().is_empty());
/// ```
pub fn powerset(props: &[AtomicProposition]) -> Vec<Label> {
    utils::powerset(props)
}

/// Checks whether the label `a` is a subset of the label `b`.
pub fn is_subset(a: &[AtomicProposition], b: &[AtomicProposition]) -> bool {
    utils::is_subset(a, b)
}

/// Checks whether two labels contain the same propositions.
pub fn label_equals(a: &[AtomicProposition], b: &[AtomicProposition]) -> bool {
    utils::set_equals(a, b)
}

/// Formats a label as `{p, q}`.
pub fn display_label(label: &[AtomicProposition]) -> String {
    let names: Vec<&str> = label.iter().map(|ap| ap.name()).collect();
    format!("{{{}}}", names.join(", "))
}
