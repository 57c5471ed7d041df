use petgraph::graph::NodeIndex;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{EdgeLabel, UnGraph, block_cut::get_block_cut_tree};

/// Random connected multigraph with `n` nodes and `max(m, n - 1)` edges, self-loops included.
pub(crate) fn random_graph(n: usize, m: usize, seed: usize) -> UnGraph {
    let mut rng = StdRng::seed_from_u64(seed as u64);
    let mut graph = UnGraph::new_undirected();

    for i in 0..n {
        graph.add_node(i as u32);
        if i > 0 {
            let j = rng.random_range(0..i);
            graph.add_edge(NodeIndex::new(i), NodeIndex::new(j), EdgeLabel::Real);
        }
    }

    for _ in n - 1..m {
        let s = rng.random_range(0..n);
        let t = rng.random_range(0..n);
        graph.add_edge(NodeIndex::new(s), NodeIndex::new(t), EdgeLabel::Real);
    }

    graph
}

/// The first block of [`random_graph`], its nodes reindexed to `0..k`.
pub(crate) fn random_biconnected_graph(n: usize, m: usize, seed: usize) -> UnGraph {
    let graph = random_graph(n, m, seed);
    let bct = get_block_cut_tree(&graph);

    bct.blocks[0].clone()
}
