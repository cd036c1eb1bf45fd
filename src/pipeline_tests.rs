#[cfg(test)]
mod tests {
    use crate::community::{
        Community, Demon, DemonConfig, OverlappingCommunityDetection, OverlappingLabelPropagation,
        UpdateMode,
    };
    use crate::io::{read_edgelist, write_communities};
    use crate::Result;
    use petgraph::graphmap::UnGraphMap;
    use proptest::prelude::*;
    use rand::prelude::*;
    use std::collections::HashSet;

    fn two_triangles() -> UnGraphMap<u32, ()> {
        // Triangles {0,1,2} and {3,4,5}, bridged by 2-3.
        UnGraphMap::from_edges([(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)])
    }

    fn graph_from_pairs(pairs: &[(u32, u32)]) -> UnGraphMap<u32, ()> {
        let mut g = UnGraphMap::new();
        for &(a, b) in pairs {
            if a == b {
                g.add_node(a);
            } else {
                g.add_edge(a, b, ());
            }
        }
        g
    }

    #[test]
    fn test_two_triangles_recovered_separately() -> Result<()> {
        let g = two_triangles();
        for seed in 0..10 {
            let config = DemonConfig::default()
                .with_epsilon(0.25)
                .with_min_community_size(2)
                .with_seed(seed);
            let demon = Demon::with_config(config)?;

            let mut found = demon.detect(&g)?;
            found.sort();
            assert_eq!(
                found,
                vec![
                    Community::from_nodes([0, 1, 2]),
                    Community::from_nodes([3, 4, 5]),
                ],
                "seed {seed}"
            );
        }
        Ok(())
    }

    #[test]
    fn test_two_triangles_duplicates_counted() -> Result<()> {
        let g = two_triangles();
        let config = DemonConfig::default().with_min_community_size(2).with_seed(3);
        let run = Demon::with_config(config)?.run_detailed(&g, g.nodes())?;

        assert_eq!(run.stats.centers, 6);
        // Every center proposes its own triangle exactly once.
        assert_eq!(run.stats.proposals, 6);
        assert_eq!(run.stats.inserted, 2);
        assert_eq!(run.stats.duplicates, 4);
        assert_eq!(run.stats.merged, 0);
        Ok(())
    }

    #[test]
    fn test_isolated_node_contributes_nothing() -> Result<()> {
        let mut g = two_triangles();
        g.add_node(42);

        let demon = Demon::with_config(DemonConfig::default().with_seed(5))?;
        let mut rng = StdRng::seed_from_u64(5);
        assert!(demon.proposals_for(&g, 42, &mut rng)?.is_empty());

        let communities = demon.run(&g)?;
        assert!(communities.iter().all(|c| !c.contains(42)));
        Ok(())
    }

    #[test]
    fn test_overlapping_membership_across_cliques() -> Result<()> {
        // Two 5-cliques sharing node 4; with a strict epsilon they stay apart
        // and the shared node sits in both.
        let mut pairs = Vec::new();
        for block in [[0u32, 1, 2, 3, 4], [4, 5, 6, 7, 8]] {
            for i in 0..5 {
                for j in (i + 1)..5 {
                    pairs.push((block[i], block[j]));
                }
            }
        }
        let g = graph_from_pairs(&pairs);
        let config = DemonConfig::default().with_epsilon(1.0).with_seed(11);
        let communities = Demon::with_config(config)?.run(&g)?;

        let left = Community::from_nodes([0, 1, 2, 3, 4]);
        let right = Community::from_nodes([4, 5, 6, 7, 8]);
        assert!(communities.contains(&left));
        assert!(communities.contains(&right));
        Ok(())
    }

    #[test]
    fn test_processing_order_is_respected() -> Result<()> {
        let g = two_triangles();
        let config = DemonConfig::default().with_min_community_size(2).with_seed(9);
        let demon = Demon::with_config(config)?;

        let forward = demon.run_from(&g, [0, 1, 2, 3, 4, 5])?;
        let reverse = demon.run_from(&g, [5, 4, 3, 2, 1, 0])?;
        assert_eq!(forward.first(), Some(&Community::from_nodes([0, 1, 2])));
        assert_eq!(reverse.first(), Some(&Community::from_nodes([3, 4, 5])));
        Ok(())
    }

    #[test]
    fn test_edgelist_roundtrip_through_pipeline() -> Result<()> {
        let input = "0 1\n1 2\n0 2\n3 4\n4 5\n3 5\n2 3\n";
        let g = read_edgelist(input.as_bytes())?;
        let config = DemonConfig::default().with_min_community_size(2).with_seed(1);
        let mut communities = Demon::with_config(config)?.run(&g)?;
        communities.sort();

        let mut out = Vec::new();
        write_communities(&mut out, &communities)?;
        assert_eq!(String::from_utf8(out).unwrap(), "0\t[0, 1, 2]\n1\t[3, 4, 5]\n");
        Ok(())
    }

    #[test]
    fn test_synchronous_mode_is_selectable() -> Result<()> {
        let g = two_triangles();
        let config = DemonConfig::default()
            .with_min_community_size(2)
            .with_update_mode(UpdateMode::Synchronous)
            .with_seed(4);
        let demon = Demon::with_config(config)?;
        assert_eq!(demon.config().update_mode, UpdateMode::Synchronous);
        // Single-edge ego networks oscillate under synchronous updates, so
        // neither triangle survives the size filter.
        assert!(demon.run(&g)?.is_empty());
        Ok(())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn results_respect_size_and_uniqueness(
            pairs in proptest::collection::vec((0u32..25, 0u32..25), 0..80),
            min_size in 0usize..5,
            epsilon in 0.0f64..=1.0,
            seed in any::<u64>(),
        ) {
            let g = graph_from_pairs(&pairs);
            let config = DemonConfig::default()
                .with_epsilon(epsilon)
                .with_min_community_size(min_size)
                .with_seed(seed);
            let communities = Demon::with_config(config).unwrap().run(&g).unwrap();

            let mut seen = HashSet::new();
            for c in &communities {
                prop_assert!(c.len() > min_size);
                prop_assert!(seen.insert(c.clone()), "duplicate community {:?}", c);
                for &n in c.nodes() {
                    prop_assert!(g.contains_node(n));
                }
            }
        }

        #[test]
        fn fixed_seed_is_reproducible(
            pairs in proptest::collection::vec((0u32..20, 0u32..20), 0..60),
            seed in any::<u64>(),
        ) {
            let g = graph_from_pairs(&pairs);
            let demon = Demon::with_config(DemonConfig::default().with_seed(seed)).unwrap();
            prop_assert_eq!(demon.run(&g).unwrap(), demon.run(&g).unwrap());
        }

        #[test]
        fn propagation_runs_full_budget(
            pairs in proptest::collection::vec((0u32..12, 0u32..12), 0..30),
            max_rounds in 1usize..15,
            seed in any::<u64>(),
        ) {
            let ego = graph_from_pairs(&pairs);
            let lp = OverlappingLabelPropagation::new().with_max_rounds(max_rounds);
            let out = lp.propagate(&ego, &mut StdRng::seed_from_u64(seed));
            prop_assert_eq!(out.rounds(), max_rounds + 1);
            for n in ego.nodes() {
                prop_assert!(out.labels_of(n).is_some_and(|s| !s.is_empty()));
            }
        }
    }
}
