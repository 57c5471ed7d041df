use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use petgraph::visit::EdgeRef;

use crate::{SpqrNodeType, UnGraph, spqr_blocks::forest::SpqrForest};

fn distinct_ends(forest: &SpqrForest, hedges: &[usize]) -> HashMap<usize, usize> {
    let mut degree = HashMap::new();
    for &h in hedges {
        let (s, t) = forest.hedges[h].ends;
        *degree.entry(s).or_insert(0) += 1;
        *degree.entry(t).or_insert(0) += 1;
    }
    degree
}

fn check_shape(forest: &SpqrForest, c: usize) {
    let hedges: Vec<usize> = forest.hedges_of(c).collect();
    let degree = distinct_ends(forest, &hedges);

    match forest.node_type(c) {
        SpqrNodeType::S => {
            assert!(hedges.len() >= 3, "S-node {c} has {} edges", hedges.len());
            assert_eq!(hedges.len(), degree.len(), "S-node {c} is not a cycle");
            assert!(
                degree.values().all(|&d| d == 2),
                "S-node {c} is not a cycle"
            );
            // one cycle, not several
            assert_eq!(
                forest.split_cycle(&hedges, &[forest.hedges[hedges[0]].ends.0]).len(),
                1
            );
        }
        SpqrNodeType::P => {
            assert_eq!(degree.len(), 2, "P-node {c} has more than two poles");
            assert!(hedges.len() >= 3, "P-node {c} has {} edges", hedges.len());
        }
        SpqrNodeType::R => {
            assert!(degree.len() >= 4, "R-node {c} has {} nodes", degree.len());
            assert!(
                degree.values().all(|&d| d >= 3),
                "R-node {c} has a node of degree below three"
            );

            let mut pairs: Vec<(usize, usize)> = hedges
                .iter()
                .map(|&h| {
                    let (s, t) = forest.hedges[h].ends;
                    (s.min(t), s.max(t))
                })
                .collect();
            pairs.sort_unstable();
            assert!(
                pairs.windows(2).all(|w| w[0] != w[1]),
                "R-node {c} has parallel edges"
            );
        }
    }
}

/// Panics unless the forest is a valid SPQR tree of `graph`.
///
/// Checks the real edge bijection, the pairing of virtual edges, the skeleton shapes (for
/// R-nodes only the cheap necessary conditions), that no two bonds and no two polygons are
/// adjacent, that the tree is a tree, and that the reference edges orient it from the root.
pub(crate) fn check_forest(forest: &SpqrForest, graph: &UnGraph) {
    for e in graph.edge_references() {
        let eid = e.id().index();
        let h = forest.real_hedge[eid];
        let hedge = &forest.hedges[h];
        assert!(hedge.alive, "real edge {eid} has a dead skeleton edge");
        assert_eq!(hedge.real, Some(eid), "real edge {eid} maps to a foreign skeleton edge");
        assert!(
            hedge.joins(e.source().index(), e.target().index()),
            "real edge {eid} has wrong skeleton ends"
        );
    }

    let mut real_count = 0;
    let mut pair_count = 0;
    for c in forest.canonical_nodes() {
        for h in forest.hedges_of(c) {
            let hedge = &forest.hedges[h];
            assert_eq!(forest.node_of(h), c, "hedge {h} listed in a foreign node");

            match (hedge.real, hedge.twin) {
                (Some(e), None) => {
                    assert_eq!(forest.real_hedge[e], h, "real edge {e} has two skeleton edges");
                    real_count += 1;
                }
                (None, Some(twin)) => {
                    let other = &forest.hedges[twin];
                    assert!(other.alive, "twin of hedge {h} is dead");
                    assert_eq!(other.twin, Some(h), "twins of hedge {h} disagree");
                    assert!(other.joins(hedge.ends.0, hedge.ends.1));
                    let d = forest.node_of(twin);
                    assert_ne!(d, c, "virtual edge {h} is a loop of the tree");

                    let types = (forest.node_type(c), forest.node_type(d));
                    assert!(
                        types.0 != types.1 || types.0 == SpqrNodeType::R,
                        "adjacent {:?}-nodes {c} and {d}",
                        types.0
                    );
                    pair_count += 1;
                }
                _ => panic!("hedge {h} is neither real nor virtual"),
            }
        }
        check_shape(forest, c);
    }
    assert_eq!(real_count, graph.edge_count(), "real edges missing from the skeletons");
    assert_eq!(pair_count % 2, 0);

    let node_count = forest.number_of_nodes();
    assert_eq!(node_count, forest.canonical_nodes().count(), "type counters drifted");
    assert_eq!(pair_count / 2 + 1, node_count, "tree has a cycle or is disconnected");

    // every node hangs below the root
    let root = forest.root;
    assert!(forest.is_canonical(root), "root {root} was merged");
    match forest.root_edge {
        Some(e) => assert_eq!(forest.nodes[root].reference, Some(forest.real_hedge[e])),
        None => assert_eq!(forest.nodes[root].reference, None),
    }

    let mut seen = FixedBitSet::with_capacity(forest.nodes.len());
    let mut stack = vec![root];
    while let Some(c) = stack.pop() {
        assert!(!seen.put(c), "node {c} reached twice");
        for child in forest.children(c) {
            assert_eq!(forest.parent(child), Some(c), "node {child} is oriented away from {c}");
            stack.push(child);
        }
    }
    assert_eq!(seen.count_ones(..), node_count, "orientation misses some nodes");
}
