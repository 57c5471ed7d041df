//! Generators, brute-force oracles and comparison helpers shared by the tests.

pub(crate) mod graph_enumerator;
pub(crate) mod oracles;
pub(crate) mod random_graphs;

use crate::spqr_blocks::forest::SpqrForest;

/// Shape of a tree independent of node ids: for every node its type slot, its sorted real edges
/// and its number of virtual edges, sorted.
///
/// SPQR trees are unique, so two trees of one graph have equal signatures.
pub(crate) fn signature(forest: &SpqrForest) -> Vec<(usize, Vec<usize>, usize)> {
    let mut nodes: Vec<(usize, Vec<usize>, usize)> = forest
        .canonical_nodes()
        .map(|c| {
            let mut real: Vec<usize> = forest
                .hedges_of(c)
                .filter_map(|h| forest.hedges[h].real)
                .collect();
            real.sort_unstable();
            let virtual_count = forest
                .hedges_of(c)
                .filter(|&h| forest.hedges[h].twin.is_some())
                .count();
            (forest.node_type(c).slot(), real, virtual_count)
        })
        .collect();
    nodes.sort();
    nodes
}
