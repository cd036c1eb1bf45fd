//! Ego network extraction.
//!
//! DEMON never looks at the whole graph at once. For a center node `e` it
//! takes the *open* ego network: the subgraph induced by the neighbors of
//! `e`, with `e` itself removed.
//!
//! ```text
//! graph:            e-a  e-b  e-c  e-d  a-c  b-d  b-x
//! ego_minus_ego(e): nodes {a, b, c, d}, edges {a-c, b-d}
//! ```
//!
//! Removing the center is what makes the local structure visible: inside the
//! full ego network every node is one hop from `e`, so a propagation run would
//! collapse everything into a single label.

use crate::error::{Error, Result};
use petgraph::graphmap::{NodeTrait, UnGraphMap};
use std::collections::HashSet;
use std::fmt::Debug;

/// Build the subgraph induced on the open neighborhood of `center`.
///
/// Nodes keep the neighbor order of `center` in `graph`; edges are the
/// original edges with both endpoints in that neighborhood. Self-loops and
/// edge weights are dropped.
///
/// # Errors
///
/// Returns [`Error::NodeNotFound`] if `center` is not a node of `graph`.
pub fn ego_minus_ego<N, E>(graph: &UnGraphMap<N, E>, center: N) -> Result<UnGraphMap<N, ()>>
where
    N: NodeTrait + Debug,
{
    if !graph.contains_node(center) {
        return Err(Error::NodeNotFound(format!("{center:?}")));
    }

    let members: HashSet<N> = graph.neighbors(center).filter(|&n| n != center).collect();
    let mut ego = UnGraphMap::with_capacity(members.len(), 0);

    for n in graph.neighbors(center) {
        if n != center {
            ego.add_node(n);
        }
    }
    for u in graph.neighbors(center).filter(|&n| n != center) {
        for v in graph.neighbors(u) {
            // Each undirected edge is seen from both ends; add it once.
            if v != u && u < v && members.contains(&v) {
                ego.add_edge(u, v, ());
            }
        }
    }

    Ok(ego)
}
