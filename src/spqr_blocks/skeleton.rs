use hashbrown::HashMap;
use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::{EdgeLabel, SpqrNodeType, TreeEdge, TreeNode, UnGraph, spqr_blocks::forest::SpqrForest};

/// The skeleton of a node of an SPQR tree.
///
/// The skeleton graph has its own node and edge indices, node weights are the indices of the
/// original nodes and edge weights tell real edges from virtual ones. Every real edge maps to an
/// edge of the original graph, every virtual edge to the tree edge leading to the neighbouring
/// node, whose skeleton holds the twin of the virtual edge.
///
/// - `S` nodes: the skeleton is a simple cycle,
/// - `P` nodes: two nodes joined by at least three edges,
/// - `R` nodes: a simple triconnected graph.
#[derive(Debug, Clone)]
pub struct Skeleton {
    tree_node: TreeNode,
    node_type: SpqrNodeType,
    graph: UnGraph,
    original: Vec<NodeIndex>,
    real: Vec<Option<EdgeIndex>>,
    twin: Vec<Option<TreeEdge>>,
    reference: Option<EdgeIndex>,
    edge_of_hedge: HashMap<usize, EdgeIndex>,
}

impl Skeleton {
    pub(crate) fn build(forest: &SpqrForest, c: usize) -> Self {
        let mut graph = UnGraph::new_undirected();
        let mut local: HashMap<usize, NodeIndex> = HashMap::new();
        let mut original = Vec::new();
        let mut real = Vec::new();
        let mut twin = Vec::new();
        let mut edge_of_hedge = HashMap::new();

        for h in forest.hedges_of(c) {
            let hedge = &forest.hedges[h];
            let (s, t) = hedge.ends;

            let mut skeleton_node = |x: usize| {
                *local.entry(x).or_insert_with(|| {
                    original.push(NodeIndex::new(x));
                    graph.add_node(x as u32)
                })
            };
            let (ls, lt) = (skeleton_node(s), skeleton_node(t));

            let label = if hedge.real.is_some() {
                EdgeLabel::Real
            } else {
                EdgeLabel::Virtual
            };
            let e = graph.add_edge(ls, lt, label);

            real.push(hedge.real.map(EdgeIndex::new));
            twin.push(hedge.twin.map(|_| forest.tree_edge_of(h)));
            edge_of_hedge.insert(h, e);
        }

        let reference = forest.nodes[c]
            .reference
            .and_then(|r| edge_of_hedge.get(&r).copied());

        Self {
            tree_node: TreeNode(c),
            node_type: forest.node_type(c),
            graph,
            original,
            real,
            twin,
            reference,
            edge_of_hedge,
        }
    }

    /// Rereads the reference edge after the tree was rerooted.
    pub(crate) fn refresh_reference(&mut self, forest: &SpqrForest) {
        self.reference = forest.nodes[self.tree_node.0]
            .reference
            .and_then(|r| self.edge_of_hedge.get(&r).copied());
    }

    pub(crate) fn edge_of_hedge(&self, h: usize) -> Option<EdgeIndex> {
        self.edge_of_hedge.get(&h).copied()
    }

    pub fn get_graph(&self) -> &UnGraph {
        &self.graph
    }

    pub fn tree_node(&self) -> TreeNode {
        self.tree_node
    }

    pub fn node_type(&self) -> SpqrNodeType {
        self.node_type
    }

    /// The node of the original graph represented by the skeleton node `v`.
    pub fn original(&self, v: NodeIndex) -> NodeIndex {
        self.original[v.index()]
    }

    /// The original edge of a real skeleton edge, `None` for virtual edges.
    pub fn real_edge(&self, e: EdgeIndex) -> Option<EdgeIndex> {
        self.real.get(e.index()).copied().flatten()
    }

    pub fn is_virtual(&self, e: EdgeIndex) -> bool {
        self.graph[e] == EdgeLabel::Virtual
    }

    /// The tree edge represented by a virtual skeleton edge.
    pub fn twin_tree_edge(&self, e: EdgeIndex) -> Option<TreeEdge> {
        self.twin.get(e.index()).copied().flatten()
    }

    /// The root edge for the root node, otherwise the virtual edge shared with the parent.
    ///
    /// `None` only for a root chosen without a root edge.
    pub fn reference_edge(&self) -> Option<EdgeIndex> {
        self.reference
    }

    /// Pairs `(skeleton edge, original edge)` of all real edges.
    pub fn real_edges(&self) -> impl Iterator<Item = (EdgeIndex, EdgeIndex)> + '_ {
        self.real
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.map(|r| (EdgeIndex::new(i), r)))
    }

    /// Pairs `(skeleton edge, tree edge)` of all virtual edges.
    pub fn virtual_edges(&self) -> impl Iterator<Item = (EdgeIndex, TreeEdge)> + '_ {
        self.twin
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.map(|t| (EdgeIndex::new(i), t)))
    }
}
