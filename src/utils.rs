//! Set operations over slices.
//!
//! States, actions and atomic propositions are all kept in small ordered
//! vectors. The helpers here treat such a vector as a set: membership and
//! subset tests use `PartialEq`, and results preserve insertion order.

/// Pushes `item` onto `items` unless an equal element is already present.
///
/// Returns `true` if the element was appended.
pub fn append_if_unique<T: PartialEq>(items: &mut Vec<T>, item: T) -> bool {
    if items.contains(&item) {
        false
    } else {
        items.push(item);
        true
    }
}

/// Checks whether every element of `a` is contained in `b`.
pub fn is_subset<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    a.iter().all(|x| b.contains(x))
}

/// Set equality: `a ⊆ b` and `b ⊆ a`.
///
/// Order and multiplicity are ignored.
pub fn set_equals<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    is_subset(a, b) && is_subset(b, a)
}

/// Deduplicated union of several slices, in order of first appearance.
pub fn union<'a, T, I>(slices: I) -> Vec<T>
where
    T: PartialEq + Clone + 'a,
    I: IntoIterator<Item = &'a [T]>,
{
    let mut result = Vec::new();
    for slice in slices {
        for item in slice {
            if !result.contains(item) {
                result.push(item.clone());
            }
        }
    }
    result
}

/// Elements of `a` that are also contained in `b`, in the order of `a`.
pub fn intersection<T: PartialEq + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    a.iter().filter(|x| b.contains(x)).cloned().collect()
}

/// Cartesian product `a × b`, with `a` as the major (outer) index.
pub fn cartesian_product<A: Clone, B: Clone>(a: &[A], b: &[B]) -> Vec<(A, B)> {
    let mut result = Vec::with_capacity(a.len() * b.len());
    for x in a {
        for y in b {
            result.push((x.clone(), y.clone()));
        }
    }
    result
}

/// All subsets of `items`.
///
/// Non-empty subsets come first, enumerated by increasing bitmask over the
/// positions of `items`; the empty subset is last.
///
/// # Panics
///
/// Panics if `items` has 64 or more elements.
pub fn powerset<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    let n = items.len();
    assert!(n < 64, "Powerset of {} elements is too large", n);

    let mut result = Vec::with_capacity(1 << n);
    for mask in 1u64..(1u64 << n) {
        let subset = items.iter().enumerate().filter(|(i, _)| (mask >> i) & 1 == 1).map(|(_, x)| x.clone()).collect();
        result.push(subset);
    }
    result.push(Vec::new());
    result
}
