//! Canonical community representation.
//!
//! A community is stored as a sorted, duplicate-free sequence of node ids.
//! Two node sets with the same members always produce the same value, so a
//! `Community` doubles as the deduplication key of the global registry.

use petgraph::graphmap::NodeTrait;
use std::cmp::Ordering;

/// A set of nodes in canonical (sorted) form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Community<N> {
    nodes: Vec<N>,
}

impl<N: NodeTrait> Community<N> {
    /// Build a community from any collection of nodes.
    ///
    /// Order and repetition in the input do not matter.
    pub fn from_nodes<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
    {
        let mut nodes: Vec<N> = nodes.into_iter().collect();
        nodes.sort_unstable();
        nodes.dedup();
        Self { nodes }
    }

    /// Members in ascending order.
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the community has no members.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Membership test (binary search over the sorted members).
    pub fn contains(&self, node: N) -> bool {
        self.nodes.binary_search(&node).is_ok()
    }

    /// Size of the intersection with `other`.
    pub fn intersection_len(&self, other: &Self) -> usize {
        let (mut i, mut j, mut count) = (0, 0, 0);
        while i < self.nodes.len() && j < other.nodes.len() {
            match self.nodes[i].cmp(&other.nodes[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    count += 1;
                    i += 1;
                    j += 1;
                }
            }
        }
        count
    }

    /// Union of both member sets, already canonical.
    pub fn union(&self, other: &Self) -> Self {
        let mut nodes = Vec::with_capacity(self.nodes.len() + other.nodes.len());
        let (mut i, mut j) = (0, 0);
        while i < self.nodes.len() && j < other.nodes.len() {
            match self.nodes[i].cmp(&other.nodes[j]) {
                Ordering::Less => {
                    nodes.push(self.nodes[i]);
                    i += 1;
                }
                Ordering::Greater => {
                    nodes.push(other.nodes[j]);
                    j += 1;
                }
                Ordering::Equal => {
                    nodes.push(self.nodes[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        nodes.extend_from_slice(&self.nodes[i..]);
        nodes.extend_from_slice(&other.nodes[j..]);
        Self { nodes }
    }

    /// Generalized inclusion: `|A ∩ B| / min(|A|, |B|)`.
    ///
    /// Returns `None` when the two communities share no node, which never
    /// counts as a match regardless of the threshold.
    ///
    /// ```text
    /// A = {1, 2, 3}, B = {2, 3, 4, 5}
    /// |A ∩ B| = 2, min(3, 4) = 3  →  0.667
    /// ```
    pub fn generalized_inclusion(&self, other: &Self) -> Option<f64> {
        let inter = self.intersection_len(other);
        if inter == 0 {
            return None;
        }
        let smaller = self.len().min(other.len());
        Some(inter as f64 / smaller as f64)
    }
}

impl<N: NodeTrait> FromIterator<N> for Community<N> {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        Self::from_nodes(iter)
    }
}

impl<N> IntoIterator for Community<N> {
    type Item = N;
    type IntoIter = std::vec::IntoIter<N>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_form() {
        let a = Community::from_nodes([3u32, 1, 2, 3]);
        let b: Community<u32> = [2u32, 3, 1].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(a.nodes(), &[1, 2, 3]);
        assert!(a.contains(2));
        assert!(!a.contains(4));
    }

    #[test]
    fn test_generalized_inclusion_uses_smaller_set() {
        let c1 = Community::from_nodes([1u32, 2, 3]);
        let c2 = Community::from_nodes([2u32, 3, 4, 5]);
        let score = c1.generalized_inclusion(&c2).unwrap();
        assert!((score - 2.0 / 3.0).abs() < 1e-12);
        // Symmetric.
        assert_eq!(c2.generalized_inclusion(&c1), Some(score));
    }

    #[test]
    fn test_nested_community_scores_one() {
        let small = Community::from_nodes([1u32, 2]);
        let big = Community::from_nodes(1u32..=20);
        assert_eq!(small.generalized_inclusion(&big), Some(1.0));
    }

    #[test]
    fn test_disjoint_has_no_score() {
        let c1 = Community::from_nodes([1u32, 2, 3]);
        let c2 = Community::from_nodes([4u32, 5, 6]);
        assert_eq!(c1.generalized_inclusion(&c2), None);
        assert_eq!(c1.intersection_len(&c2), 0);
    }

    #[test]
    fn test_union_is_sorted() {
        let c1 = Community::from_nodes([1u32, 5, 9]);
        let c2 = Community::from_nodes([2u32, 5, 10]);
        assert_eq!(c1.union(&c2).nodes(), &[1, 2, 5, 9, 10]);
    }
}
