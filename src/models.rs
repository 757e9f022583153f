//! Small ready-made transition systems.
//!
//! Used by the tests, the doc examples and the demos.

use crate::system::TransitionSystem;

/// The beverage vending machine from *Principles of Model Checking* (Baier, Katoen).
///
/// ```text
/// pay --insert_coin--> select --ε--> beer --get_beer--> pay
///                             --ε--> soda --get_soda--> pay
/// ```
///
/// Labels: `pay: {}`, `select: {paid}`, `beer: {paid, drink}`, `soda: {paid, drink}`.
/// The silent action `ε` is the action with the empty name.
pub fn beverage_vending_machine() -> TransitionSystem {
    TransitionSystem::new(
        &["pay", "select", "beer", "soda"],
        &["", "insert_coin", "get_beer", "get_soda"],
        vec![
            ("pay", vec![("insert_coin", vec!["select"])]),
            ("select", vec![("", vec!["beer", "soda"])]),
            ("beer", vec![("get_beer", vec!["pay"])]),
            ("soda", vec![("get_soda", vec!["pay"])]),
        ],
        &["pay"],
        &["paid", "drink"],
        vec![
            ("pay", vec![]),
            ("select", vec!["paid"]),
            ("beer", vec!["paid", "drink"]),
            ("soda", vec!["paid", "drink"]),
        ],
    )
    .expect("vending machine is well-formed")
}

/// Three states on a single action `a`, with `3` terminal.
///
/// ```text
/// Post(1, a) = {1, 2}
/// Post(2, a) = {1, 2, 3}
/// Post(3, a) = {}
/// ```
///
/// Labels: `1: {A}`, `2: {B}`, `3: {B, C}`. Initial state: `1`.
pub fn simple_chain() -> TransitionSystem {
    TransitionSystem::new(
        &["1", "2", "3"],
        &["a"],
        vec![("1", vec![("a", vec!["1", "2"])]), ("2", vec![("a", vec!["1", "2", "3"])])],
        &["1"],
        &["A", "B", "C"],
        vec![("1", vec!["A"]), ("2", vec!["B"]), ("3", vec!["B", "C"])],
    )
    .expect("chain is well-formed")
}
