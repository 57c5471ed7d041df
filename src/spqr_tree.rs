use petgraph::graph::EdgeIndex;
use tracing::debug;

use crate::{
    SkeletonEdge, SpqrNodeType, TreeEdge, TreeGraph, TreeNode, UnGraph,
    error::SpqrError,
    spqr_blocks::{
        forest::SpqrForest, pertinent::PertinentGraph, skeleton::Skeleton, visualize,
    },
    triconnected::get_triconnected_components,
    triconnected_blocks::outside_structures::TriconnectedComponents,
};

/// SPQR tree of a biconnected multigraph, built once.
///
/// The tree borrows the original graph, which therefore cannot change while the tree is alive.
/// Tree nodes are numbered `0..k` and [`TreeNode::index`] is the index of the node in
/// [`tree`](Self::tree). All skeletons are built on construction.
///
/// The tree is rooted at the node whose skeleton holds the root edge, the reference edge of any
/// other node is the virtual edge shared with its parent. Rerooting keeps the nodes, edges and
/// skeleton contents, only reference edges and the direction of tree edges change.
///
/// # Example
/// ```
/// use spqr_trees::{SpqrNodeType, input::from_str, spqr_tree::StaticSpqrTree};
///
/// // a square with one diagonal
/// let graph = from_str("0,1\n1,2\n2,3\n3,0\n0,2\n").unwrap();
/// let tree = StaticSpqrTree::new(&graph).unwrap();
///
/// assert_eq!(tree.number_of_s_nodes(), 2);
/// assert_eq!(tree.number_of_p_nodes(), 1);
/// assert_eq!(tree.tree().edge_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct StaticSpqrTree<'g> {
    graph: &'g UnGraph,
    pub(crate) forest: SpqrForest,
    skeletons: Vec<Skeleton>,
    tree: TreeGraph,
    nodes_by_type: [Vec<TreeNode>; 3],
}

impl<'g> StaticSpqrTree<'g> {
    /// Builds the tree rooted at edge `0`.
    ///
    /// # Errors
    /// The graph must be biconnected and loopless, with at least three edges.
    pub fn new(graph: &'g UnGraph) -> Result<Self, SpqrError> {
        Self::with_root_edge(graph, EdgeIndex::new(0))
    }

    pub fn with_root_edge(graph: &'g UnGraph, root_edge: EdgeIndex) -> Result<Self, SpqrError> {
        if root_edge.index() >= graph.edge_count() {
            return Err(SpqrError::EdgeNotInGraph(root_edge.index()));
        }
        let tricon = get_triconnected_components(graph)?;
        Self::from_triconnectivity(graph, &tricon, root_edge)
    }

    /// Builds the tree from triconnected components computed for `graph` before.
    pub fn from_triconnectivity(
        graph: &'g UnGraph,
        tricon: &TriconnectedComponents,
        root_edge: EdgeIndex,
    ) -> Result<Self, SpqrError> {
        if tricon.real_edge_count() != graph.edge_count() {
            return Err(SpqrError::ForeignTriconnectivity {
                components: tricon.real_edge_count(),
                graph: graph.edge_count(),
            });
        }
        if root_edge.index() >= graph.edge_count() {
            return Err(SpqrError::EdgeNotInGraph(root_edge.index()));
        }

        let mut forest = SpqrForest::from_triconnected(graph.node_count(), tricon);
        forest.root_at_edge(root_edge.index());

        let skeletons: Vec<Skeleton> = (0..forest.nodes.len())
            .map(|c| Skeleton::build(&forest, c))
            .collect();

        let mut nodes_by_type: [Vec<TreeNode>; 3] = Default::default();
        for c in forest.canonical_nodes() {
            nodes_by_type[forest.node_type(c).slot()].push(TreeNode(c));
        }

        let tree = forest.tree_graph();
        debug!(
            nodes = tree.node_count(),
            s = nodes_by_type[0].len(),
            p = nodes_by_type[1].len(),
            r = nodes_by_type[2].len(),
            root = forest.root,
            "static SPQR tree built"
        );

        Ok(Self {
            graph,
            forest,
            skeletons,
            tree,
            nodes_by_type,
        })
    }

    fn check(&self, v: TreeNode) -> Result<usize, SpqrError> {
        if v.0 < self.skeletons.len() {
            Ok(v.0)
        } else {
            Err(SpqrError::UnknownTreeNode(v.0))
        }
    }

    fn check_edge(&self, e: EdgeIndex) -> Result<usize, SpqrError> {
        if e.index() < self.graph.edge_count() {
            Ok(e.index())
        } else {
            Err(SpqrError::EdgeNotInGraph(e.index()))
        }
    }

    fn skeleton_edge_of(&self, h: usize) -> SkeletonEdge {
        let c = self.forest.node_of(h);
        SkeletonEdge {
            node: TreeNode(c),
            edge: self.skeletons[c]
                .edge_of_hedge(h)
                .expect("skeleton lists all hedges of its node"),
        }
    }

    pub fn original_graph(&self) -> &'g UnGraph {
        self.graph
    }

    /// The tree itself, node weights are the node handles and edge weights the tree edge
    /// handles. Every edge is directed from the parent to the child.
    pub fn tree(&self) -> &TreeGraph {
        &self.tree
    }

    /// The root edge, `None` after rooting at a node without real edges.
    pub fn root_edge(&self) -> Option<EdgeIndex> {
        self.forest.root_edge.map(EdgeIndex::new)
    }

    pub fn root_node(&self) -> TreeNode {
        TreeNode(self.forest.root)
    }

    fn after_rerooting(&mut self) {
        for skeleton in self.skeletons.iter_mut() {
            skeleton.refresh_reference(&self.forest);
        }
        self.tree = self.forest.tree_graph();
        debug!(root = self.forest.root, "static SPQR tree rerooted");
    }

    /// Roots the tree at the node holding the real edge `e`, which becomes the root edge.
    /// Returns the new root.
    pub fn root_tree_at_edge(&mut self, e: EdgeIndex) -> Result<TreeNode, SpqrError> {
        let e = self.check_edge(e)?;
        self.forest.root_at_edge(e);
        self.after_rerooting();
        Ok(self.root_node())
    }

    /// Roots the tree at `v`. The first real edge of its skeleton becomes the root edge, if
    /// there is one.
    pub fn root_tree_at_node(&mut self, v: TreeNode) -> Result<(), SpqrError> {
        let c = self.check(v)?;
        self.forest.root_at_node(c);
        self.after_rerooting();
        Ok(())
    }

    pub fn type_of(&self, v: TreeNode) -> Result<SpqrNodeType, SpqrError> {
        Ok(self.forest.node_type(self.check(v)?))
    }

    pub fn number_of_s_nodes(&self) -> usize {
        self.nodes_by_type[SpqrNodeType::S.slot()].len()
    }

    pub fn number_of_p_nodes(&self) -> usize {
        self.nodes_by_type[SpqrNodeType::P.slot()].len()
    }

    pub fn number_of_r_nodes(&self) -> usize {
        self.nodes_by_type[SpqrNodeType::R.slot()].len()
    }

    pub fn nodes_of_type(&self, node_type: SpqrNodeType) -> &[TreeNode] {
        &self.nodes_by_type[node_type.slot()]
    }

    pub fn skeleton(&self, v: TreeNode) -> Result<&Skeleton, SpqrError> {
        Ok(&self.skeletons[self.check(v)?])
    }

    /// The skeleton holding the real edge `e`.
    pub fn skeleton_of_real(&self, e: EdgeIndex) -> Result<&Skeleton, SpqrError> {
        let h = self.forest.real_hedge[self.check_edge(e)?];
        Ok(&self.skeletons[self.forest.node_of(h)])
    }

    /// The skeleton edge standing for the real edge `e`.
    pub fn copy_of_real(&self, e: EdgeIndex) -> Result<SkeletonEdge, SpqrError> {
        let h = self.forest.real_hedge[self.check_edge(e)?];
        Ok(self.skeleton_edge_of(h))
    }

    /// The virtual edge of the tree edge `te` in the skeleton of the parent.
    pub fn skeleton_edge_src(&self, te: TreeEdge) -> Result<SkeletonEdge, SpqrError> {
        let (up, _) = self
            .forest
            .tree_edge_halves(te)
            .ok_or(SpqrError::StaleTreeEdge(te.0))?;
        Ok(self.skeleton_edge_of(up))
    }

    /// The virtual edge of the tree edge `te` in the skeleton of the child.
    pub fn skeleton_edge_tgt(&self, te: TreeEdge) -> Result<SkeletonEdge, SpqrError> {
        let (_, down) = self
            .forest
            .tree_edge_halves(te)
            .ok_or(SpqrError::StaleTreeEdge(te.0))?;
        Ok(self.skeleton_edge_of(down))
    }

    pub fn parent(&self, v: TreeNode) -> Result<Option<TreeNode>, SpqrError> {
        Ok(self.forest.parent(self.check(v)?).map(TreeNode))
    }

    pub fn children(&self, v: TreeNode) -> Result<Vec<TreeNode>, SpqrError> {
        let c = self.check(v)?;
        Ok(self.forest.children(c).into_iter().map(TreeNode).collect())
    }

    pub fn neighbors(&self, v: TreeNode) -> Result<Vec<TreeNode>, SpqrError> {
        let c = self.check(v)?;
        Ok(self.forest.neighbors(c).into_iter().map(TreeNode).collect())
    }

    /// All real edges in the subtree of `v`, plus the reference edge of `v` unless `v` is the
    /// root.
    pub fn pertinent_graph(&self, v: TreeNode) -> Result<PertinentGraph, SpqrError> {
        Ok(PertinentGraph::build(&self.forest, self.check(v)?))
    }

    /// DOT rendering of all skeletons glued along the tree edges.
    pub fn to_dot(&self) -> String {
        visualize::visualize_spqr(&self.forest)
    }

    /// DOT rendering of the tree alone.
    pub fn draw_tree(&self) -> String {
        visualize::draw_tree(&self.forest)
    }
}

#[cfg(test)]
mod tests {
    use std::mem;

    use petgraph::visit::EdgeRef;

    use crate::{
        input::from_str,
        spqr_blocks::invariants::check_forest,
        testing::{
            graph_enumerator::GraphEnumeratorState, random_graphs::random_biconnected_graph,
        },
    };

    use super::*;

    fn sorted_edges(graph: &UnGraph) -> Vec<(usize, usize)> {
        let mut edges: Vec<(usize, usize)> = graph
            .edge_references()
            .map(|e| {
                let (mut u, mut v) = (e.source().index(), e.target().index());
                if u > v {
                    mem::swap(&mut u, &mut v);
                }
                (u, v)
            })
            .collect();
        edges.sort();
        edges
    }

    /// Checks the testable properties of a built tree against its graph.
    fn check_tree(graph: &UnGraph, tree: &StaticSpqrTree) {
        check_forest(&tree.forest, graph);

        assert_eq!(
            tree.number_of_s_nodes() + tree.number_of_p_nodes() + tree.number_of_r_nodes(),
            tree.tree().node_count()
        );

        // every real edge has exactly one copy that maps back to it
        let mut copies = 0;
        for e in graph.edge_indices() {
            let copy = tree.copy_of_real(e).unwrap();
            let skeleton = tree.skeleton(copy.node).unwrap();
            assert_eq!(skeleton.real_edge(copy.edge), Some(e));
            assert_eq!(tree.skeleton_of_real(e).unwrap().tree_node(), copy.node);
        }
        for &v in tree.tree().node_weights() {
            copies += tree.skeleton(v).unwrap().real_edges().count();
        }
        assert_eq!(copies, graph.edge_count());

        // both halves of a tree edge are virtual edges of the two endpoints
        for edge in tree.tree().edge_references() {
            let te = *edge.weight();
            let src = tree.skeleton_edge_src(te).unwrap();
            let tgt = tree.skeleton_edge_tgt(te).unwrap();
            assert_eq!(src.node, tree.tree()[edge.source()]);
            assert_eq!(tgt.node, tree.tree()[edge.target()]);

            let (s_skel, t_skel) = (tree.skeleton(src.node).unwrap(), tree.skeleton(tgt.node).unwrap());
            assert_eq!(s_skel.twin_tree_edge(src.edge), Some(te));
            assert_eq!(t_skel.twin_tree_edge(tgt.edge), Some(te));
            assert_eq!(t_skel.reference_edge(), Some(tgt.edge));
            assert_eq!(tree.parent(tgt.node).unwrap(), Some(src.node));
        }

        // the pertinent graph of the root is the whole graph
        let root = tree.pertinent_graph(tree.root_node()).unwrap();
        assert_eq!(root.virtual_edge(), None);
        let mut pertinent: Vec<(usize, usize)> = root
            .get_graph()
            .edge_references()
            .map(|e| {
                let (u, v) = (
                    root.original_node(e.source()).index(),
                    root.original_node(e.target()).index(),
                );
                (u.min(v), u.max(v))
            })
            .collect();
        pertinent.sort();
        assert_eq!(pertinent, sorted_edges(graph));
    }

    #[test]
    fn test_triangle() {
        let graph = from_str("0,1\n1,2\n2,0\n").unwrap();
        let tree = StaticSpqrTree::new(&graph).unwrap();
        check_tree(&graph, &tree);

        assert_eq!(tree.number_of_s_nodes(), 1);
        assert_eq!(tree.number_of_p_nodes(), 0);
        assert_eq!(tree.number_of_r_nodes(), 0);

        let skeleton = tree.skeleton(tree.root_node()).unwrap();
        assert_eq!(skeleton.get_graph().node_count(), 3);
        assert_eq!(skeleton.get_graph().edge_count(), 3);
        assert_eq!(skeleton.real_edge(skeleton.reference_edge().unwrap()), Some(EdgeIndex::new(0)));
    }

    #[test]
    fn test_bond() {
        let graph = from_str("0,1\n0,1\n1,0\n0,1\n").unwrap();
        let tree = StaticSpqrTree::new(&graph).unwrap();
        check_tree(&graph, &tree);

        assert_eq!(tree.nodes_of_type(SpqrNodeType::P).len(), 1);
        assert_eq!(tree.tree().node_count(), 1);

        let skeleton = tree.skeleton(tree.root_node()).unwrap();
        assert_eq!(skeleton.get_graph().node_count(), 2);
        assert_eq!(skeleton.get_graph().edge_count(), 4);
    }

    #[test]
    fn test_rerooting() {
        // two K4s sharing the edge (0, 1), plus a path 0-6-1
        let graph = from_str(
            "0,1\n0,2\n0,3\n1,2\n1,3\n2,3\n0,4\n0,5\n1,4\n1,5\n4,5\n0,6\n6,1\n",
        )
        .unwrap();
        let mut tree = StaticSpqrTree::with_root_edge(&graph, EdgeIndex::new(11)).unwrap();
        check_tree(&graph, &tree);

        assert_eq!(tree.number_of_r_nodes(), 2);
        assert_eq!(tree.number_of_p_nodes(), 1);
        assert_eq!(tree.number_of_s_nodes(), 1);
        assert_eq!(tree.type_of(tree.root_node()).unwrap(), SpqrNodeType::S);

        let types_before: Vec<SpqrNodeType> = (0..tree.tree().node_count())
            .map(|i| tree.type_of(TreeNode(i)).unwrap())
            .collect();
        let edges_before: Vec<usize> = (0..tree.tree().node_count())
            .map(|i| tree.skeleton(TreeNode(i)).unwrap().get_graph().edge_count())
            .collect();

        let root_edge = tree.root_edge().unwrap();
        tree.root_tree_at_edge(root_edge).unwrap();
        check_tree(&graph, &tree);

        let new_root = tree.root_tree_at_edge(EdgeIndex::new(5)).unwrap();
        check_tree(&graph, &tree);
        assert_eq!(tree.type_of(new_root).unwrap(), SpqrNodeType::R);
        assert_eq!(tree.parent(new_root).unwrap(), None);

        let bond = tree.nodes_of_type(SpqrNodeType::P)[0];
        tree.root_tree_at_node(bond).unwrap();
        check_tree(&graph, &tree);
        assert_eq!(tree.root_node(), bond);
        assert_eq!(tree.root_edge(), Some(EdgeIndex::new(0)));

        for i in 0..tree.tree().node_count() {
            assert_eq!(tree.type_of(TreeNode(i)).unwrap(), types_before[i]);
            assert_eq!(
                tree.skeleton(TreeNode(i)).unwrap().get_graph().edge_count(),
                edges_before[i]
            );
        }
    }

    #[test]
    fn test_pertinent_graph_of_child() {
        // the square with a diagonal, rooted at the diagonal
        let graph = from_str("0,1\n1,2\n2,3\n3,0\n0,2\n").unwrap();
        let tree = StaticSpqrTree::with_root_edge(&graph, EdgeIndex::new(4)).unwrap();

        for child in tree.children(tree.root_node()).unwrap() {
            let pertinent = tree.pertinent_graph(child).unwrap();
            let g = pertinent.get_graph();
            assert_eq!(g.node_count(), 3);
            assert_eq!(g.edge_count(), 3);

            let virtual_edge = pertinent.virtual_edge().unwrap();
            assert_eq!(pertinent.original_edge(virtual_edge), None);
            let (a, b) = g.edge_endpoints(virtual_edge).unwrap();
            let mut poles = [pertinent.original_node(a).index(), pertinent.original_node(b).index()];
            poles.sort();
            assert_eq!(poles, [0, 2]);
        }
    }

    #[test]
    fn test_invalid_handles() {
        let graph = from_str("0,1\n1,2\n2,0\n").unwrap();
        assert_eq!(
            StaticSpqrTree::with_root_edge(&graph, EdgeIndex::new(3)).unwrap_err(),
            SpqrError::EdgeNotInGraph(3)
        );

        let tree = StaticSpqrTree::new(&graph).unwrap();
        assert_eq!(tree.skeleton(TreeNode(1)).unwrap_err(), SpqrError::UnknownTreeNode(1));
        assert_eq!(tree.skeleton_edge_src(TreeEdge(0)).unwrap_err(), SpqrError::StaleTreeEdge(0));

        let other = from_str("0,1\n1,2\n2,3\n3,0\n").unwrap();
        let tricon = get_triconnected_components(&other).unwrap();
        assert_eq!(
            StaticSpqrTree::from_triconnectivity(&graph, &tricon, EdgeIndex::new(0)).unwrap_err(),
            SpqrError::ForeignTriconnectivity { components: 4, graph: 3 }
        );
    }

    #[test]
    fn test_dot_output() {
        let graph = from_str("0,1\n1,2\n2,3\n3,0\n0,2\n").unwrap();
        let tree = StaticSpqrTree::new(&graph).unwrap();

        let dot = tree.to_dot();
        assert_eq!(dot.matches("subgraph cluster_").count(), 3);
        assert_eq!(dot.matches("_connector -- ").count(), 2);

        let drawn = tree.draw_tree();
        assert!(drawn.starts_with("digraph T {"));
        assert_eq!(drawn.matches("->").count(), 2);
    }

    #[test]
    fn test_spqr_tree_light() {
        for i in 0..100 {
            let n = 2 + i / 10;
            let m: usize = 1 + i;

            let in_graph = random_biconnected_graph(n, m, i);
            if in_graph.edge_count() < 3 {
                continue;
            }
            let tree = StaticSpqrTree::new(&in_graph).unwrap();
            check_tree(&in_graph, &tree);
        }
    }

    #[cfg(all(test, not(debug_assertions)))]
    #[test]
    fn test_spqr_tree() {
        for i in 0..1000 {
            let n = 2 + i / 10;
            let m: usize = 1 + i;

            let in_graph = random_biconnected_graph(n, m, i);
            if in_graph.edge_count() < 3 {
                continue;
            }
            let tree = StaticSpqrTree::with_root_edge(&in_graph, EdgeIndex::new(i % 3)).unwrap();
            check_tree(&in_graph, &tree);
        }
    }

    #[cfg(all(test, not(debug_assertions)))]
    #[test]
    fn test_spqr_tree_exhaustive() {
        for n in 3..=7 {
            let enumerator = GraphEnumeratorState {
                n,
                mask: 0,
                last_mask: 1 << (n * (n - 1) / 2),
            };

            for in_graph in enumerator.filter(crate::block_cut::is_biconnected) {
                let tree = StaticSpqrTree::new(&in_graph).unwrap();
                check_tree(&in_graph, &tree);
            }
        }
    }
}
