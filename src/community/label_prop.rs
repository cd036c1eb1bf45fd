//! Overlapping label propagation on an ego network.
//!
//! Nodes carry a *set* of labels instead of a single one. Each pass a node
//! takes every label that reaches the maximum frequency among its neighbors,
//! so ties are kept rather than broken: a node sitting between two groups ends
//! up in both. That is the source of overlap in DEMON.
//!
//! ## Schedule
//!
//! - **Pass 0 (initialization)**: random visiting order. Each node with at
//!   least one neighbor picks one label uniformly among the labels its
//!   neighbors carry (a neighbor with no label yet contributes its own id).
//! - **Passes 1..=R (majority)**: fresh random order each pass; every node
//!   adopts the full set of most-frequent neighbor labels.
//!
//! There is no convergence check: exactly `R + 1` passes always run. After the
//! last pass, nodes without neighbors are labeled with their own id.
//!
//! ## Update visibility
//!
//! [`UpdateMode::Asynchronous`] (the default) lets a node read labels written
//! earlier in the same pass. [`UpdateMode::Synchronous`] reads only the state
//! left by the previous pass. On bipartite pieces (a single edge, for example)
//! the synchronous schedule oscillates instead of agreeing.

use super::canonical::Community;
use petgraph::graphmap::{NodeTrait, UnGraphMap};
use rand::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// When label writes become visible to other nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    /// Writes are visible immediately, within the same pass.
    #[default]
    Asynchronous,
    /// Every node reads the previous pass's labels.
    Synchronous,
}

/// Overlapping label propagation engine.
#[derive(Debug, Clone)]
pub struct OverlappingLabelPropagation {
    /// Majority passes after initialization.
    max_rounds: usize,
    /// Visibility of writes within a pass.
    update_mode: UpdateMode,
}

impl OverlappingLabelPropagation {
    /// Create an engine with 10 majority passes and asynchronous updates.
    pub fn new() -> Self {
        Self {
            max_rounds: 10,
            update_mode: UpdateMode::Asynchronous,
        }
    }

    /// Set the number of majority passes.
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Set update visibility.
    pub fn with_update_mode(mut self, update_mode: UpdateMode) -> Self {
        self.update_mode = update_mode;
        self
    }

    /// Number of majority passes.
    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    /// Update visibility.
    pub fn update_mode(&self) -> UpdateMode {
        self.update_mode
    }

    /// Run all passes on `ego` and return the final label sets.
    ///
    /// All randomness (visiting order, initial pick) is drawn from `rng`.
    pub fn propagate<N, R>(&self, ego: &UnGraphMap<N, ()>, rng: &mut R) -> LabelAssignment<N>
    where
        N: NodeTrait,
        R: Rng + ?Sized,
    {
        let nodes: Vec<N> = ego.nodes().collect();
        let mut labels: HashMap<N, BTreeSet<N>> = HashMap::with_capacity(nodes.len());
        let mut rounds = 0;

        for round in 0..=self.max_rounds {
            let mut order = nodes.clone();
            order.shuffle(rng);

            let previous = match self.update_mode {
                UpdateMode::Synchronous => Some(labels.clone()),
                UpdateMode::Asynchronous => None,
            };

            for &node in &order {
                let freq = label_frequencies(ego, node, previous.as_ref().unwrap_or(&labels));
                if freq.is_empty() {
                    continue;
                }

                let next = if round == 0 {
                    let observed: Vec<N> = freq.keys().copied().collect();
                    match observed.choose(rng) {
                        Some(&label) => BTreeSet::from([label]),
                        None => continue,
                    }
                } else {
                    majority(&freq)
                };

                if labels.get(&node) != Some(&next) {
                    labels.insert(node, next);
                }
            }
            rounds += 1;
        }

        for &node in &nodes {
            if degree(ego, node) == 0 {
                labels.insert(node, BTreeSet::from([node]));
            }
        }

        LabelAssignment {
            nodes,
            labels,
            rounds,
        }
    }
}

impl Default for OverlappingLabelPropagation {
    fn default() -> Self {
        Self::new()
    }
}

/// Final label sets of one propagation run.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelAssignment<N: NodeTrait> {
    /// Ego nodes in subgraph order.
    nodes: Vec<N>,
    labels: HashMap<N, BTreeSet<N>>,
    rounds: usize,
}

impl<N: NodeTrait> LabelAssignment<N> {
    /// Labels carried by `node`, if it belongs to the ego network.
    pub fn labels_of(&self, node: N) -> Option<&BTreeSet<N>> {
        self.labels.get(&node)
    }

    /// Label-update passes executed (initialization included).
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Every label's extension with `center` added back, keyed by label.
    pub fn groups(&self, center: N) -> BTreeMap<N, Community<N>> {
        let mut members: BTreeMap<N, Vec<N>> = BTreeMap::new();
        for &node in &self.nodes {
            if let Some(set) = self.labels.get(&node) {
                for &label in set {
                    members.entry(label).or_insert_with(|| vec![center]).push(node);
                }
            }
        }
        members
            .into_iter()
            .map(|(label, nodes)| (label, Community::from_nodes(nodes)))
            .collect()
    }

    /// Groups whose size (center included) is strictly above `min_community_size`.
    pub fn proposals(&self, center: N, min_community_size: usize) -> Vec<Community<N>> {
        self.groups(center)
            .into_values()
            .filter(|c| c.len() > min_community_size)
            .collect()
    }
}

fn degree<N: NodeTrait>(ego: &UnGraphMap<N, ()>, node: N) -> usize {
    ego.neighbors(node).filter(|&nb| nb != node).count()
}

/// Count, for each label, how many neighbors of `node` carry it.
///
/// A neighbor that has no label yet counts as carrying its own id.
fn label_frequencies<N: NodeTrait>(
    ego: &UnGraphMap<N, ()>,
    node: N,
    labels: &HashMap<N, BTreeSet<N>>,
) -> BTreeMap<N, usize> {
    let mut freq = BTreeMap::new();
    for nb in ego.neighbors(node).filter(|&nb| nb != node) {
        match labels.get(&nb) {
            Some(set) => {
                for &label in set {
                    *freq.entry(label).or_insert(0) += 1;
                }
            }
            None => *freq.entry(nb).or_insert(0) += 1,
        }
    }
    freq
}

/// All labels reaching the maximum frequency.
fn majority<N: NodeTrait>(freq: &BTreeMap<N, usize>) -> BTreeSet<N> {
    let max = freq.values().copied().max().unwrap_or(0);
    freq.iter()
        .filter(|(_, &count)| count == max)
        .map(|(&label, _)| label)
        .collect()
}
