//! # demon
//!
//! Local-first discovery of overlapping communities: label each node's ego
//! network, then merge what every ego network proposes.
//!
//! The graph store is `petgraph`'s [`UnGraphMap`](petgraph::graphmap::UnGraphMap);
//! any `Copy + Ord + Hash` id works as a node. Propagation across centers runs
//! on rayon with the `parallel` feature.

pub mod community;
/// Error types used across `demon`.
pub mod error;
pub mod io;

#[cfg(test)]
mod pipeline_tests;

pub use community::{
    ego_minus_ego, Community, CommunityRegistry, Demon, DemonConfig, DemonRun, MergeOutcome,
    OverlappingCommunityDetection, OverlappingLabelPropagation, RunStats, UpdateMode,
};
pub use error::{Error, Result};
