//! State-space partitions and quotient transition systems.
//!
//! A partition `Q = [B_0, ..., B_{n-1}]` of the state space `S` is valid iff
//!
//! 1. no block is empty,
//! 2. the union of all blocks is exactly `S`,
//! 3. the blocks are pairwise disjoint.
//!
//! The quotient of a system by a valid partition has one state per block
//! ([`State::Block`]). A block `B` moves under action `a` to every block that
//! contains an `a`-successor of some member of `B`.
//!
//! ```
//! use lts_rs::models::beverage_vending_machine;
//! use lts_rs::state::from_names;
//!
//! let ts = beverage_vending_machine();
//! let q = vec![from_names(&["pay"]), from_names(&["select"]), from_names(&["beer", "soda"])];
//! assert!(ts.has_state_space_partition(&q));
//!
//! let quotient = ts.to_quotient_transition_system_for(&q).unwrap();
//! assert_eq!(quotient.num_states(), 3);
//! ```

use std::collections::BTreeMap;

use log::debug;

use crate::error::{Error, Result};
use crate::proposition::{self, Label};
use crate::state::State;
use crate::system::{TransitionSystem, Transitions};
use crate::utils;

impl TransitionSystem {
    /// Validates `partition` against the state space.
    ///
    /// Runs the empty-block check, then the coverage check, then the pairwise
    /// disjointness check, and reports the first failure with its block index.
    pub fn check_partition(&self, partition: &[Vec<State>]) -> Result<()> {
        let result = self.check_partition_inner(partition);
        if let Err(e) = &result {
            debug!("check_partition: {}", e);
        }
        result
    }

    fn check_partition_inner(&self, partition: &[Vec<State>]) -> Result<()> {
        for (index, block) in partition.iter().enumerate() {
            if block.is_empty() {
                return Err(Error::EmptyBlock { index });
            }
        }

        // Union of blocks must be equal to S, in both directions.
        for (block, members) in partition.iter().enumerate() {
            for state in members {
                if !self.contains_state(state) {
                    return Err(Error::ForeignState {
                        block,
                        state: state.clone(),
                    });
                }
            }
        }
        for state in self.states() {
            if !partition.iter().any(|b| state.is_in(b)) {
                return Err(Error::UncoveredState(state.clone()));
            }
        }

        for (first, b1) in partition.iter().enumerate() {
            for (second, b2) in partition.iter().enumerate().skip(first + 1) {
                if let Some(state) = utils::intersection(b1, b2).into_iter().next() {
                    return Err(Error::OverlappingBlocks { first, second, state });
                }
            }
        }

        Ok(())
    }

    /// Checks whether `partition` is a valid partition of the state space.
    pub fn has_state_space_partition(&self, partition: &[Vec<State>]) -> bool {
        self.check_partition(partition).is_ok()
    }

    /// Validates `partition` and additionally requires all states of each block
    /// to carry the same label.
    pub fn check_observation_preserving_partition(&self, partition: &[Vec<State>]) -> Result<()> {
        self.check_partition(partition)?;

        for (block, members) in partition.iter().enumerate() {
            let first = &members[0];
            let first_label = self.label(first);
            for other in members[1..].iter() {
                if !proposition::label_equals(first_label, self.label(other)) {
                    debug!("check_observation_preserving_partition: block {} mixes labels", block);
                    return Err(Error::MixedLabels {
                        block,
                        first: first.clone(),
                        other: other.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn has_observation_preserving_state_space_partition(&self, partition: &[Vec<State>]) -> bool {
        self.check_observation_preserving_partition(partition).is_ok()
    }

    /// Builds the quotient system for a valid partition.
    ///
    /// - states: one [`State::Block`] per block, in partition order;
    /// - actions and atomic propositions: unchanged;
    /// - initial states: blocks containing an initial state;
    /// - label of a block: union of its members' labels, which is the common
    ///   label when the partition is observation preserving.
    pub fn to_quotient_transition_system_for(&self, partition: &[Vec<State>]) -> Result<TransitionSystem> {
        self.check_partition(partition)?;

        let blocks: Vec<State> = partition.iter().map(|b| State::block(b.iter().cloned())).collect();
        let block_of = |s: &State| partition.iter().position(|b| s.is_in(b));

        let mut transitions = Transitions::new();
        for (members, block) in partition.iter().zip(blocks.iter()) {
            for action in self.actions() {
                let mut targets = Vec::new();
                for s in members {
                    for t in self.post_action(s, action) {
                        if let Some(j) = block_of(&t) {
                            utils::append_if_unique(&mut targets, blocks[j].clone());
                        }
                    }
                }
                if !targets.is_empty() {
                    transitions.entry(block.clone()).or_default().insert(action.clone(), targets);
                }
            }
        }

        let initial_states = partition
            .iter()
            .zip(blocks.iter())
            .filter(|(members, _)| members.iter().any(|s| self.is_initial(s)))
            .map(|(_, block)| block.clone())
            .collect();

        let mut labels = BTreeMap::<State, Label>::new();
        for (members, block) in partition.iter().zip(blocks.iter()) {
            let label = utils::union(members.iter().map(|s| self.label(s)));
            labels.insert(block.clone(), label);
        }

        debug!("quotient: {} states -> {} blocks", self.num_states(), blocks.len());

        TransitionSystem::from_parts(
            blocks,
            self.actions().to_vec(),
            transitions,
            initial_states,
            self.atomic_propositions().to_vec(),
            labels,
        )
    }
}
