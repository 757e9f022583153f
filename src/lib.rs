//! # lts-rs: Labeled Transition Systems in Rust
//!
//! **`lts-rs`** is a small, explicit-state library for working with **labeled transition systems** (LTS),
//! the basic semantic model used in formal verification and model checking.
//!
//! ## What is a Transition System?
//!
//! A transition system is a tuple `(S, Act, →, I, AP, L)`:
//! a set of states `S`, a set of actions `Act`, a transition relation `→ ⊆ S × Act × S`,
//! a set of initial states `I ⊆ S`, a set of atomic propositions `AP`,
//! and a labeling function `L: S → 2^AP` telling which propositions hold in each state.
//!
//! ## Key Features
//!
//! - **Validated Construction**: Every system is built through a constructor that checks initial states,
//!   the transition relation and the labels, and reports the first violation as a typed [`Error`][crate::error::Error].
//! - **Value Identity**: A [`State`][crate::state::State] is a plain value. Product and quotient states are
//!   structured variants, not formatted names, so they never collide with user-chosen names.
//! - **Analysis**: `Post`/`Pre`, terminal states, reachability, action- and AP-determinism.
//! - **Derived Systems**: quotient systems over state-space partitions, and interleaving (`|||`) products.
//! - **Fragments & Traces**: validation of finite and infinite (lasso) execution and path fragments.
//!
//! ## Basic Usage
//!
//! ```rust
//! use lts_rs::state::State;
//! use lts_rs::system::TransitionSystem;
//! use lts_rs::types::Action;
//!
//! // 1. Build a system from names
//! let ts = TransitionSystem::new(
//!     &["off", "on"],
//!     &["toggle"],
//!     vec![("off", vec![("toggle", vec!["on"])]), ("on", vec![("toggle", vec!["off"])])],
//!     &["off"],
//!     &["lit"],
//!     vec![("on", vec!["lit"])],
//! )
//! .unwrap();
//!
//! // 2. Query it
//! let off = State::new("off");
//! let on = State::new("on");
//! assert_eq!(ts.post_action(&off, &Action::new("toggle")), vec![on.clone()]);
//! assert!(ts.is_reachable(&on));
//! assert!(ts.is_action_deterministic());
//!
//! // 3. Compose it
//! let product = ts.interleave(&ts).unwrap();
//! assert_eq!(product.num_states(), 4);
//! ```
//!
//! ## Core Components
//!
//! - **[`system`]**: The heart of the library. Contains [`TransitionSystem`][crate::system::TransitionSystem] and the core algorithms.
//! - **[`quotient`]**: Partitions and quotient systems.
//! - **[`interleave`]**: Asynchronous parallel composition.
//! - **[`fragment`]** and **[`trace`]**: Execution/path fragments and the traces they produce.
//! - **[`rabin`]**: Deterministic Rabin automata.
//! - **[`dot`]**: Utilities for visualizing systems using Graphviz.

pub mod dot;
pub mod error;
pub mod fragment;
pub mod interleave;
pub mod models;
pub mod proposition;
pub mod quotient;
pub mod rabin;
pub mod state;
pub mod system;
pub mod trace;
pub mod types;
pub mod utils;
