//! Overlapping community discovery with DEMON.
//!
//! DEMON (Coscia, Rossetti, Giannotti, Pedreschi 2012) is local-first: every
//! node looks only at its own neighborhood, proposes the groups it sees
//! there, and a global registry merges the proposals.
//!
//! ## Stages
//!
//! 1. **Ego extraction** ([`ego_minus_ego`]): the subgraph induced by the
//!    neighbors of a center node, center removed.
//! 2. **Overlapping label propagation** ([`OverlappingLabelPropagation`]): a
//!    fixed number of majority passes in which ties are kept, so a node can
//!    carry several labels. Each label becomes a group; the center is added
//!    back to every group and small groups are dropped.
//! 3. **Merging** ([`CommunityRegistry`]): each proposal is folded into the
//!    first registered community it overlaps enough with, measured by
//!    generalized inclusion:
//!
//! ```text
//! GI(A, B) = |A ∩ B| / min(|A|, |B|)      merge when GI >= ε
//! ```
//!
//! Dividing by the smaller set means a small community nested inside a large
//! one scores 1.0; Jaccard would score it near zero.
//!
//! ## The ε Parameter
//!
//! - **ε = 0**: any shared node merges (few, large communities)
//! - **ε = 0.25**: default
//! - **ε = 1**: only full containment of the smaller set merges
//!
//! ## Usage
//!
//! ```rust
//! use petgraph::graphmap::UnGraphMap;
//! use demon::community::{Demon, DemonConfig, OverlappingCommunityDetection};
//!
//! // Two 4-cliques sharing node 3.
//! let graph: UnGraphMap<u32, ()> = UnGraphMap::from_edges([
//!     (0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3),
//!     (3, 4), (3, 5), (3, 6), (4, 5), (4, 6), (5, 6),
//! ]);
//!
//! let demon = Demon::with_config(DemonConfig::default().with_seed(7)).unwrap();
//! let communities = demon.detect(&graph).unwrap();
//! for c in &communities {
//!     assert!(c.len() > 3);
//! }
//! ```
//!
//! ## References
//!
//! - Coscia, Rossetti, Giannotti, Pedreschi (2012). "DEMON: a local-first
//!   discovery method for overlapping communities." KDD 2012, 615-623.
//! - Raghavan, Albert, Kumara (2007). "Near linear time algorithm to detect
//!   community structures in large-scale networks."

mod canonical;
mod demon;
mod ego;
mod label_prop;
mod registry;
mod traits;

pub use canonical::Community;
pub use demon::{Demon, DemonConfig, DemonRun, RunStats};
pub use ego::ego_minus_ego;
pub use label_prop::{LabelAssignment, OverlappingLabelPropagation, UpdateMode};
pub use registry::{CommunityRegistry, MergeOutcome};
pub use traits::OverlappingCommunityDetection;
