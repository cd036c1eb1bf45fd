//! Overlapping community detection traits.

use super::canonical::Community;
use crate::error::Result;
use petgraph::graphmap::{NodeTrait, UnGraphMap};
use std::fmt::Debug;

/// Trait for algorithms that return possibly overlapping communities.
pub trait OverlappingCommunityDetection {
    /// Detect communities in a graph.
    ///
    /// A node may belong to several communities, or to none.
    fn detect<N, E>(&self, graph: &UnGraphMap<N, E>) -> Result<Vec<Community<N>>>
    where
        N: NodeTrait + Debug + Send + Sync,
        E: Sync;

    /// Merge threshold used to fold overlapping results.
    fn epsilon(&self) -> f64;
}
