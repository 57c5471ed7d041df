use petgraph::graph::NodeIndex;

use crate::{EdgeLabel, UnGraph};

/// Iterates over the simple graphs on `n` labeled nodes whose edge set, read as a bit mask over
/// the pairs `(i, j)` with `i < j`, lies in `mask..last_mask`.
pub(crate) struct GraphEnumeratorState {
    pub n: usize,
    pub mask: usize,
    pub last_mask: usize,
}

impl Iterator for GraphEnumeratorState {
    type Item = UnGraph;

    fn next(&mut self) -> Option<Self::Item> {
        if self.mask == self.last_mask {
            return None;
        }

        let mut graph = UnGraph::new_undirected();
        for i in 0..self.n {
            graph.add_node(i as u32);
        }

        let mut bit = 0;
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                if self.mask & (1 << bit) != 0 {
                    graph.add_edge(NodeIndex::new(i), NodeIndex::new(j), EdgeLabel::Real);
                }
                bit += 1;
            }
        }

        self.mask += 1;
        Some(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumerates_all_graphs_on_three_nodes() {
        let enumerator = GraphEnumeratorState {
            n: 3,
            mask: 0,
            last_mask: 1 << 3,
        };
        let edge_counts: Vec<usize> = enumerator.map(|g| g.edge_count()).collect();
        assert_eq!(edge_counts, vec![0, 1, 1, 2, 1, 2, 2, 3]);
    }
}
