use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::{EdgeLabel, TreeNode, UnGraph, spqr_blocks::forest::SpqrForest};

/// The pertinent graph of a tree node: all real edges in the subtree rooted at the node.
///
/// For a node other than the root the graph additionally contains one virtual edge standing for
/// the rest of the original graph (the reference edge of the node).
#[derive(Debug, Clone)]
pub struct PertinentGraph {
    tree_node: TreeNode,
    graph: UnGraph,
    original_edge: Vec<Option<EdgeIndex>>,
    original_node: Vec<NodeIndex>,
    virtual_edge: Option<EdgeIndex>,
}

impl PertinentGraph {
    pub(crate) fn build(forest: &SpqrForest, c: usize) -> Self {
        let mut real_edges = Vec::new();
        let mut stack = vec![c];
        while let Some(x) = stack.pop() {
            for h in forest.hedges_of(x) {
                let hedge = &forest.hedges[h];
                if let Some(e) = hedge.real {
                    real_edges.push((e, hedge.ends));
                }
            }
            stack.extend(forest.children(x));
        }
        real_edges.sort_unstable_by_key(|&(e, _)| e);

        let reference_ends = forest.nodes[c]
            .reference
            .filter(|&r| forest.hedges[r].real.is_none())
            .map(|r| forest.hedges[r].ends);

        let mut nodes: Vec<usize> = real_edges
            .iter()
            .map(|&(_, ends)| ends)
            .chain(reference_ends)
            .flat_map(|(s, t)| [s, t])
            .collect();
        nodes.sort_unstable();
        nodes.dedup();

        let mut graph = UnGraph::with_capacity(nodes.len(), real_edges.len() + 1);
        for &x in &nodes {
            graph.add_node(x as u32);
        }
        let local = |x: usize| -> NodeIndex {
            NodeIndex::new(nodes.binary_search(&x).expect("edge end is a node"))
        };

        let mut original_edge = Vec::with_capacity(real_edges.len() + 1);
        for &(e, (s, t)) in &real_edges {
            graph.add_edge(local(s), local(t), EdgeLabel::Real);
            original_edge.push(Some(EdgeIndex::new(e)));
        }
        let virtual_edge = reference_ends.map(|(s, t)| {
            original_edge.push(None);
            graph.add_edge(local(s), local(t), EdgeLabel::Virtual)
        });

        Self {
            tree_node: TreeNode(c),
            graph,
            original_edge,
            original_node: nodes.iter().map(|&x| NodeIndex::new(x)).collect(),
            virtual_edge,
        }
    }

    pub fn tree_node(&self) -> TreeNode {
        self.tree_node
    }

    pub fn get_graph(&self) -> &UnGraph {
        &self.graph
    }

    /// The original edge of a pertinent graph edge, `None` for the virtual edge.
    pub fn original_edge(&self, e: EdgeIndex) -> Option<EdgeIndex> {
        self.original_edge.get(e.index()).copied().flatten()
    }

    pub fn original_node(&self, v: NodeIndex) -> NodeIndex {
        self.original_node[v.index()]
    }

    /// The edge standing for the part of the graph outside the subtree, if the node is not the
    /// root.
    pub fn virtual_edge(&self) -> Option<EdgeIndex> {
        self.virtual_edge
    }
}
