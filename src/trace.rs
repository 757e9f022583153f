//! Traces: the labels observed along a path.
//!
//! A finite trace is a sequence of labels. An infinite trace is a finite
//! prefix followed by a suffix repeated forever; it is kept in that form and
//! only unrolled lazily by [`InfiniteTrace::iter`].

use crate::proposition::{AtomicProposition, Label};

pub trait Trace {
    /// Checks whether `ap` holds at every position of the trace.
    fn satisfies_invariant(&self, ap: &AtomicProposition) -> bool;
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FiniteTrace {
    labels: Vec<Label>,
}

impl FiniteTrace {
    pub fn new(labels: Vec<Label>) -> Self {
        FiniteTrace { labels }
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Trace for FiniteTrace {
    fn satisfies_invariant(&self, ap: &AtomicProposition) -> bool {
        self.labels.iter().all(|label| ap.is_in(label))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfiniteTrace {
    prefix: FiniteTrace,
    suffix: FiniteTrace,
}

impl InfiniteTrace {
    pub fn new(prefix: FiniteTrace, suffix: FiniteTrace) -> Self {
        InfiniteTrace { prefix, suffix }
    }

    pub fn prefix(&self) -> &FiniteTrace {
        &self.prefix
    }

    pub fn suffix(&self) -> &FiniteTrace {
        &self.suffix
    }

    /// Iterates over the prefix, then over the suffix forever.
    ///
    /// The iterator is infinite unless the suffix is empty.
    pub fn iter(&self) -> impl Iterator<Item = &Label> + '_ {
        self.prefix.labels.iter().chain(self.suffix.labels.iter().cycle())
    }
}

impl Trace for InfiniteTrace {
    fn satisfies_invariant(&self, ap: &AtomicProposition) -> bool {
        self.prefix.satisfies_invariant(ap) && self.suffix.satisfies_invariant(ap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposition::from_names;

    fn trace(labels: &[&[&str]]) -> FiniteTrace {
        FiniteTrace::new(labels.iter().map(|&l| from_names(l)).collect())
    }

    #[test]
    fn test_finite_invariant() {
        let t = trace(&[&["a", "b"], &["a"], &["c", "a"]]);
        assert_eq!(t.len(), 3);
        assert!(t.satisfies_invariant(&AtomicProposition::new("a")));
        assert!(!t.satisfies_invariant(&AtomicProposition::new("b")));
        assert!(FiniteTrace::default().satisfies_invariant(&AtomicProposition::new("b")));
    }

    #[test]
    fn test_infinite_invariant_checks_suffix() {
        let t = InfiniteTrace::new(trace(&[&["a"]]), trace(&[&["a"], &[]]));
        assert!(!t.satisfies_invariant(&AtomicProposition::new("a")));

        let t = InfiniteTrace::new(trace(&[&["a"]]), trace(&[&["a", "b"]]));
        assert!(t.satisfies_invariant(&AtomicProposition::new("a")));
    }

    #[test]
    fn test_infinite_iter() {
        let t = InfiniteTrace::new(trace(&[&["p"]]), trace(&[&["q"], &["r"]]));
        let first: Vec<String> = t.iter().take(6).map(|l| l[0].to_string()).collect();
        assert_eq!(first, vec!["p", "q", "r", "q", "r", "q"]);

        let t = InfiniteTrace::new(trace(&[&["p"]]), FiniteTrace::default());
        assert_eq!(t.iter().count(), 1);
    }
}
