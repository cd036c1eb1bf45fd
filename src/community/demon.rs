//! DEMON driver: every ego network votes, the registry folds the votes.
//!
//! For each center node, in processing order:
//!
//! ```text
//! graph ─ ego_minus_ego(center) ─ label propagation ─ proposals ─┐
//!                                                                ▼
//!                                            CommunityRegistry::merge (one at a time)
//! ```
//!
//! Extraction and propagation for different centers share nothing, so with
//! the `parallel` feature they run on the rayon pool. Merging is
//! order-dependent and stays on the calling thread, applied in processing
//! order.
//!
//! Each center draws from its own `StdRng`, seeded from the run seed and the
//! center's position in the processing order. A fixed seed and order give the
//! same result with or without `parallel`.

use super::canonical::Community;
use super::ego::ego_minus_ego;
use super::label_prop::{OverlappingLabelPropagation, UpdateMode};
use super::registry::{validate_epsilon, CommunityRegistry, MergeOutcome};
use super::traits::OverlappingCommunityDetection;
use crate::error::{Error, Result};
use petgraph::graph::UnGraph;
use petgraph::graphmap::{NodeTrait, UnGraphMap};
use petgraph::visit::EdgeRef;
use rand::prelude::*;
use std::fmt::Debug;
use std::time::Instant;
use tracing::{debug, info, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Spreads per-center seeds apart.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Configuration for a DEMON run.
#[derive(Debug, Clone, PartialEq)]
pub struct DemonConfig {
    /// Merge threshold on generalized inclusion, in `[0, 1]` (default: 0.25).
    /// Lower values merge more.
    pub epsilon: f64,
    /// Proposals must be strictly larger than this (default: 3).
    pub min_community_size: usize,
    /// Majority passes after initialization (default: 10). Must be positive.
    pub max_rounds: usize,
    /// Seed for all propagation randomness (default: none, drawn per run).
    pub seed: Option<u64>,
    /// Label visibility within a pass (default: asynchronous).
    pub update_mode: UpdateMode,
}

impl Default for DemonConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.25,
            min_community_size: 3,
            max_rounds: 10,
            seed: None,
            update_mode: UpdateMode::Asynchronous,
        }
    }
}

impl DemonConfig {
    /// Set the merge threshold.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the exclusive lower bound on proposal size.
    pub fn with_min_community_size(mut self, min_community_size: usize) -> Self {
        self.min_community_size = min_community_size;
        self
    }

    /// Set the number of majority passes.
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set label visibility within a pass.
    pub fn with_update_mode(mut self, update_mode: UpdateMode) -> Self {
        self.update_mode = update_mode;
        self
    }

    /// Check every parameter.
    pub fn validate(&self) -> Result<()> {
        validate_epsilon(self.epsilon)?;
        if self.max_rounds == 0 {
            return Err(Error::InvalidParameter {
                name: "max_rounds",
                message: "must be positive",
            });
        }
        Ok(())
    }
}

/// Counters collected during one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Centers processed.
    pub centers: usize,
    /// Proposals that passed the size filter.
    pub proposals: usize,
    /// Proposals rejected as exact duplicates.
    pub duplicates: usize,
    /// Proposals folded into an existing community.
    pub merged: usize,
    /// Proposals registered as new communities.
    pub inserted: usize,
}

/// Communities found by a run, with its counters.
#[derive(Debug, Clone)]
pub struct DemonRun<N> {
    /// Final communities in registry order.
    pub communities: Vec<Community<N>>,
    /// Run counters.
    pub stats: RunStats,
}

/// DEMON overlapping community detection.
#[derive(Debug, Clone)]
pub struct Demon {
    config: DemonConfig,
    propagation: OverlappingLabelPropagation,
}

impl Demon {
    /// Create a detector with default settings.
    pub fn new() -> Self {
        Self::from_valid(DemonConfig::default())
    }

    /// Create a detector from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for `epsilon` outside `[0, 1]` or
    /// `max_rounds == 0`.
    pub fn with_config(config: DemonConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: DemonConfig) -> Self {
        let propagation = OverlappingLabelPropagation::new()
            .with_max_rounds(config.max_rounds)
            .with_update_mode(config.update_mode);
        Self {
            config,
            propagation,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &DemonConfig {
        &self.config
    }

    /// Process every node of `graph` in node order.
    pub fn run<N, E>(&self, graph: &UnGraphMap<N, E>) -> Result<Vec<Community<N>>>
    where
        N: NodeTrait + Debug + Send + Sync,
        E: Sync,
    {
        self.run_from(graph, graph.nodes())
    }

    /// Process `centers` in the given order.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NodeNotFound`] before doing any work if a center is
    /// not in `graph`.
    pub fn run_from<N, E, I>(&self, graph: &UnGraphMap<N, E>, centers: I) -> Result<Vec<Community<N>>>
    where
        N: NodeTrait + Debug + Send + Sync,
        E: Sync,
        I: IntoIterator<Item = N>,
    {
        Ok(self.run_detailed(graph, centers)?.communities)
    }

    /// Like [`Demon::run_from`], also returning run counters.
    pub fn run_detailed<N, E, I>(&self, graph: &UnGraphMap<N, E>, centers: I) -> Result<DemonRun<N>>
    where
        N: NodeTrait + Debug + Send + Sync,
        E: Sync,
        I: IntoIterator<Item = N>,
    {
        let centers: Vec<N> = centers.into_iter().collect();
        if let Some(missing) = centers.iter().find(|&&c| !graph.contains_node(c)) {
            return Err(Error::NodeNotFound(format!("{missing:?}")));
        }

        let started = Instant::now();
        let base_seed = self.config.seed.unwrap_or_else(|| rand::rng().random());

        #[cfg(feature = "parallel")]
        let batches: Vec<Vec<Community<N>>> = centers
            .par_iter()
            .enumerate()
            .map(|(pos, &center)| {
                let mut rng = center_rng(base_seed, pos);
                self.proposals_for(graph, center, &mut rng)
            })
            .collect::<Result<_>>()?;

        #[cfg(not(feature = "parallel"))]
        let batches: Vec<Vec<Community<N>>> = centers
            .iter()
            .enumerate()
            .map(|(pos, &center)| {
                let mut rng = center_rng(base_seed, pos);
                self.proposals_for(graph, center, &mut rng)
            })
            .collect::<Result<_>>()?;

        let mut registry = CommunityRegistry::new(self.config.epsilon)?;
        let mut stats = RunStats {
            centers: centers.len(),
            ..RunStats::default()
        };

        for (center, batch) in centers.iter().zip(batches) {
            for proposal in batch {
                stats.proposals += 1;
                match registry.merge(proposal) {
                    MergeOutcome::Duplicate => stats.duplicates += 1,
                    MergeOutcome::Merged { replaced, score } => {
                        stats.merged += 1;
                        trace!(center = ?center, replaced_len = replaced.len(), score, "merged");
                    }
                    MergeOutcome::Inserted => stats.inserted += 1,
                }
            }
        }

        info!(
            centers = stats.centers,
            proposals = stats.proposals,
            duplicates = stats.duplicates,
            merged = stats.merged,
            communities = registry.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "demon run complete"
        );

        Ok(DemonRun {
            communities: registry.into_communities(),
            stats,
        })
    }

    /// Proposals from a single ego network.
    ///
    /// Extracts the ego-minus-ego network of `center`, labels it, and keeps
    /// groups (center included) larger than `min_community_size`.
    pub fn proposals_for<N, E, R>(
        &self,
        graph: &UnGraphMap<N, E>,
        center: N,
        rng: &mut R,
    ) -> Result<Vec<Community<N>>>
    where
        N: NodeTrait + Debug,
        R: Rng + ?Sized,
    {
        let ego = ego_minus_ego(graph, center)?;
        let assignment = self.propagation.propagate(&ego, rng);
        let proposals = assignment.proposals(center, self.config.min_community_size);
        debug!(
            center = ?center,
            ego_nodes = ego.node_count(),
            ego_edges = ego.edge_count(),
            proposals = proposals.len(),
            "ego network labeled"
        );
        Ok(proposals)
    }

    /// Run on an index-based graph; node ids are node indices.
    pub fn detect_indexed<N, E>(&self, graph: &UnGraph<N, E>) -> Result<Vec<Vec<usize>>> {
        let mut map: UnGraphMap<usize, ()> =
            UnGraphMap::with_capacity(graph.node_count(), graph.edge_count());
        for idx in graph.node_indices() {
            map.add_node(idx.index());
        }
        for edge in graph.edge_references() {
            let (a, b) = (edge.source().index(), edge.target().index());
            if a != b {
                map.add_edge(a, b, ());
            }
        }
        Ok(self
            .run(&map)?
            .into_iter()
            .map(|c| c.into_iter().collect())
            .collect())
    }
}

impl Default for Demon {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlappingCommunityDetection for Demon {
    fn detect<N, E>(&self, graph: &UnGraphMap<N, E>) -> Result<Vec<Community<N>>>
    where
        N: NodeTrait + Debug + Send + Sync,
        E: Sync,
    {
        self.run(graph)
    }

    fn epsilon(&self) -> f64 {
        self.config.epsilon
    }
}

fn center_rng(base_seed: u64, position: usize) -> StdRng {
    StdRng::seed_from_u64(base_seed.wrapping_add((position as u64).wrapping_mul(SEED_STRIDE)))
}
