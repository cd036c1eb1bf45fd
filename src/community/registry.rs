//! Global community registry with epsilon merging.
//!
//! Proposals arrive one at a time. Each is either:
//!
//! 1. rejected, if the exact same node set is already registered;
//! 2. merged into the **first** registered community whose generalized
//!    inclusion score with it is at least `epsilon` (that entry is removed and
//!    the union is appended);
//! 3. appended as a new entry otherwise.
//!
//! The scan stops at the first match and the union is not re-checked against
//! the remaining entries, so the final set depends on arrival order and on
//! registry order. Two registered communities can therefore still overlap
//! above `epsilon`.

use super::canonical::Community;
use crate::error::{Error, Result};
use petgraph::graphmap::NodeTrait;
use std::collections::HashSet;

/// What a single [`CommunityRegistry::merge`] call did.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeOutcome<N> {
    /// Identical node set already present; registry unchanged.
    Duplicate,
    /// Folded into an existing entry, which was replaced by the union.
    Merged {
        /// The entry that was removed.
        replaced: Community<N>,
        /// Its generalized inclusion score with the proposal.
        score: f64,
    },
    /// Appended as a new entry.
    Inserted,
}

/// Deduplicated, epsilon-merged set of communities in insertion order.
#[derive(Debug, Clone)]
pub struct CommunityRegistry<N: NodeTrait> {
    epsilon: f64,
    entries: Vec<Community<N>>,
    index: HashSet<Community<N>>,
}

impl<N: NodeTrait> CommunityRegistry<N> {
    /// Create an empty registry.
    ///
    /// # Errors
    ///
    /// `epsilon` must be a number in `[0, 1]`.
    pub fn new(epsilon: f64) -> Result<Self> {
        validate_epsilon(epsilon)?;
        Ok(Self {
            epsilon,
            entries: Vec::new(),
            index: HashSet::new(),
        })
    }

    /// Merge threshold.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Fold one proposal into the registry.
    pub fn merge(&mut self, proposal: Community<N>) -> MergeOutcome<N> {
        if self.index.contains(&proposal) {
            return MergeOutcome::Duplicate;
        }

        let matched = self.entries.iter().enumerate().find_map(|(pos, existing)| {
            proposal
                .generalized_inclusion(existing)
                .filter(|&score| score >= self.epsilon)
                .map(|score| (pos, score))
        });

        match matched {
            Some((pos, score)) => {
                let replaced = self.entries.remove(pos);
                self.index.remove(&replaced);
                let union = proposal.union(&replaced);
                // The union may coincide with another entry; keep keys unique.
                if self.index.insert(union.clone()) {
                    self.entries.push(union);
                }
                MergeOutcome::Merged { replaced, score }
            }
            None => {
                self.index.insert(proposal.clone());
                self.entries.push(proposal);
                MergeOutcome::Inserted
            }
        }
    }

    /// True if exactly this node set is registered.
    pub fn contains(&self, community: &Community<N>) -> bool {
        self.index.contains(community)
    }

    /// Registered communities in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Community<N>> {
        self.entries.iter()
    }

    /// Number of registered communities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the registry, returning communities in registry order.
    pub fn into_communities(self) -> Vec<Community<N>> {
        self.entries
    }
}

pub(crate) fn validate_epsilon(epsilon: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&epsilon) {
        return Err(Error::InvalidParameter {
            name: "epsilon",
            message: "must lie in [0, 1]",
        });
    }
    Ok(())
}
