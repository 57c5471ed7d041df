//! SPQR trees that follow a growing graph.
//!
//! [`DynamicSpqrTree`] owns a mutable borrow of the graph, so edges and nodes can only be added
//! through [`DynamicSpqrTree::insert_edge`] and [`DynamicSpqrTree::insert_node`]. Both change the
//! tree locally:
//!
//! - a new edge parallel to a skeleton edge joins (or creates) a P-node,
//! - a new edge inside one skeleton is added to an R-node or splits an S-node in two,
//! - otherwise the tree path between the ends is glued into one R-node, the parts of S- and
//!   P-nodes on the path that stay out of the new rigid component hang from it as new nodes,
//! - a subdivided edge extends its S-node or becomes a new triangle.
//!
//! Tree nodes merged into others keep their id but go stale, see [`DynamicSpqrTree::find_spqr`].

use hashbrown::{HashMap, HashSet};
use petgraph::graph::{EdgeIndex, NodeIndex};
use tracing::{debug, trace};

use crate::{
    EdgeLabel, SkeletonEdge, SpqrNodeType, TreeEdge, TreeGraph, TreeNode, UnGraph,
    error::SpqrError,
    spqr_blocks::{
        forest::SpqrForest, invariants::check_forest, pertinent::PertinentGraph,
        skeleton::Skeleton, visualize,
    },
    triconnected::get_triconnected_components,
    triconnected_blocks::outside_structures::TriconnectedComponents,
};

/// Settings of a [`DynamicSpqrTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DynamicOptions {
    /// Validate the whole tree after every update and panic on a broken invariant.
    pub check_invariants: bool,
}

impl Default for DynamicOptions {
    fn default() -> Self {
        Self {
            check_invariants: cfg!(debug_assertions),
        }
    }
}

/// How an update changed the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Surgery {
    JoinBond,
    NewBondOnVirtual,
    NewBondOnReal,
    AddToRigid,
    SplitPolygon,
    MergePath { length: usize },
    ExtendPolygon,
    NewPolygon,
}

/// The new edge `e = (u, v)` has a skeleton edge parallel to it.
fn join_bond(forest: &mut SpqrForest, e: usize, u: usize, v: usize) -> Option<Surgery> {
    let x = if forest.vertex_hedges[u].len() <= forest.vertex_hedges[v].len() {
        u
    } else {
        v
    };
    forest.prune_vertex(x);
    let h = forest.vertex_hedges[x]
        .iter()
        .copied()
        .find(|&h| forest.hedges[h].joins(u, v))?;

    let c = forest.node_of(h);
    if forest.node_type(c) == SpqrNodeType::P {
        forest.new_hedge(u, v, c, Some(e));
        return Some(Surgery::JoinBond);
    }

    let (s, t) = forest.hedges[h].ends;
    match forest.hedges[h].twin {
        Some(twin) => {
            let d = forest.node_of(twin);
            if forest.node_type(d) == SpqrNodeType::P {
                forest.new_hedge(u, v, d, Some(e));
                return Some(Surgery::JoinBond);
            }

            let top = forest.region_top(&[c, d]);
            forest.kill(h);
            forest.kill(twin);
            let p = forest.new_node(SpqrNodeType::P);
            let links = [
                forest.new_virtual_pair(s, t, c, p),
                forest.new_virtual_pair(s, t, d, p),
            ];
            forest.new_hedge(u, v, p, Some(e));
            forest.reorient(top, &links);
            Some(Surgery::NewBondOnVirtual)
        }
        None => {
            let top = forest.region_top(&[c]);
            let real = forest.hedges[h].real;
            forest.kill(h);
            let p = forest.new_node(SpqrNodeType::P);
            let link = forest.new_virtual_pair(s, t, c, p);
            forest.new_hedge(s, t, p, real);
            forest.new_hedge(u, v, p, Some(e));
            forest.reorient(top, &[link]);
            Some(Surgery::NewBondOnReal)
        }
    }
}

/// Both ends of the new edge lie in the skeleton of `c` and are not adjacent there.
fn insert_into_node(forest: &mut SpqrForest, c: usize, e: usize, u: usize, v: usize) -> Surgery {
    match forest.node_type(c) {
        SpqrNodeType::R => {
            forest.new_hedge(u, v, c, Some(e));
            Surgery::AddToRigid
        }
        SpqrNodeType::S => {
            let top = forest.region_top(&[c]);
            let cycle = forest.alive_hedges(c);
            let mut arcs = forest.split_cycle(&cycle, &[u, v]).into_iter();
            let (Some(first), Some(second), None) = (arcs.next(), arcs.next(), arcs.next()) else {
                panic!("cutting a polygon at two nodes gave other than two arcs");
            };

            forest.set_hedges(c, first);
            let other = forest.new_node(SpqrNodeType::S);
            forest.move_hedges(second, other);
            let p = forest.new_node(SpqrNodeType::P);
            let links = [
                forest.new_virtual_pair(u, v, c, p),
                forest.new_virtual_pair(u, v, other, p),
            ];
            forest.new_hedge(u, v, p, Some(e));
            forest.reorient(top, &links);
            Surgery::SplitPolygon
        }
        SpqrNodeType::P => panic!("bond {c} holds both ends of edge {e} without an edge between them"),
    }
}

/// Glues the tree path between the ends of the new edge into one R-node.
///
/// R-nodes on the path are merged as they are, only the virtual edges between path nodes die.
/// S- and P-nodes give their edges on the path to the new rigid component and keep the rest as
/// new nodes hanging from it.
fn merge_path(forest: &mut SpqrForest, path: &[usize], e: usize, u: usize, v: usize) -> Surgery {
    let top = forest.region_top(path);
    let k = path.len();

    let connectors: Vec<usize> = path.windows(2).map(|w| forest.connector(w[0], w[1])).collect();
    let glue: HashSet<usize> = connectors
        .iter()
        .flat_map(|&h| [h, forest.twin_of(h)])
        .collect();

    let mut pieces: Vec<(SpqrNodeType, Vec<usize>, (usize, usize))> = Vec::new();
    for (i, &x) in path.iter().enumerate() {
        match forest.node_type(x) {
            SpqrNodeType::R => {}
            SpqrNodeType::P => {
                assert!(0 < i && i + 1 < k, "bond {x} at the end of a trimmed path");
                let rest: Vec<usize> = forest
                    .alive_hedges(x)
                    .into_iter()
                    .filter(|h| !glue.contains(h))
                    .collect();
                if rest.len() == 1 {
                    forest.set_hedges(x, rest);
                } else {
                    let ends = forest.hedges[rest[0]].ends;
                    forest.set_hedges(x, Vec::new());
                    pieces.push((SpqrNodeType::P, rest, ends));
                }
            }
            SpqrNodeType::S => {
                let hedges = forest.alive_hedges(x);
                let ends_of = |h: usize| forest.hedges[h].ends;
                let cuts: Vec<usize> = if i == 0 {
                    let (a, b) = ends_of(connectors[0]);
                    vec![u, a, b]
                } else if i + 1 == k {
                    let (a, b) = ends_of(connectors[k - 2]);
                    vec![v, a, b]
                } else {
                    let ((a, b), (c, d)) = (ends_of(connectors[i - 1]), ends_of(connectors[i]));
                    let mut cuts = vec![a, b, c, d];
                    cuts.sort_unstable();
                    cuts.dedup();
                    cuts
                };

                let mut kept = Vec::new();
                for arc in forest.split_cycle(&hedges, &cuts) {
                    let arc: Vec<usize> = arc.into_iter().filter(|h| !glue.contains(h)).collect();
                    match arc.len() {
                        0 => {}
                        1 => kept.extend(arc),
                        _ => {
                            let ends = forest.arc_ends(&arc);
                            pieces.push((SpqrNodeType::S, arc, ends));
                        }
                    }
                }
                forest.set_hedges(x, kept);
            }
        }
    }

    for &h in &glue {
        forest.kill(h);
    }
    let mut merged = path[0];
    for &x in &path[1..] {
        merged = forest.union(merged, x);
    }
    forest.set_type(merged, SpqrNodeType::R);

    let mut links = Vec::with_capacity(pieces.len());
    for (node_type, hedges, (a, b)) in pieces {
        trace!(%node_type, edges = hedges.len(), "piece split off the merged path");
        let piece = forest.new_node(node_type);
        forest.move_hedges(hedges, piece);
        links.push(forest.new_virtual_pair(a, b, piece, merged));
    }
    forest.new_hedge(u, v, merged, Some(e));
    forest.reorient(top, &links);

    Surgery::MergePath { length: k }
}

fn insert_edge(forest: &mut SpqrForest, e: usize, u: usize, v: usize) -> Surgery {
    forest.ensure_vertex(u.max(v));
    if let Some(surgery) = join_bond(forest, e, u, v) {
        return surgery;
    }

    let path = forest.find_path(u, v);
    trace!(?path, "tree path between the ends");
    if let [c] = path[..] {
        insert_into_node(forest, c, e, u, v)
    } else {
        merge_path(forest, &path, e, u, v)
    }
}

/// The edge `e = (u, v)` became `e = (u, w)` and `f = (w, v)`.
fn insert_node(forest: &mut SpqrForest, e: usize, f: usize, u: usize, w: usize, v: usize) -> Surgery {
    let h = forest.real_hedge[e];
    let c = forest.node_of(h);
    let top = forest.region_top(&[c]);
    forest.kill(h);

    if forest.node_type(c) == SpqrNodeType::S {
        forest.new_hedge(u, w, c, Some(e));
        forest.new_hedge(w, v, c, Some(f));
        forest.reorient(top, &[]);
        Surgery::ExtendPolygon
    } else {
        let s = forest.new_node(SpqrNodeType::S);
        let link = forest.new_virtual_pair(u, v, c, s);
        forest.new_hedge(u, w, s, Some(e));
        forest.new_hedge(w, v, s, Some(f));
        forest.reorient(top, &[link]);
        Surgery::NewPolygon
    }
}

/// SPQR tree of a biconnected multigraph that keeps up with insertions.
///
/// Skeletons and the tree snapshot are built lazily and dropped on every update, which is why
/// the queries returning them take `&mut self`. A handle of a tree node merged by an update is
/// rejected with [`SpqrError::StaleTreeNode`], call [`find_spqr`](Self::find_spqr) to get the
/// node it was merged into.
///
/// # Example
/// ```
/// use spqr_trees::{SpqrNodeType, dynamic_spqr_tree::DynamicSpqrTree, input::from_str};
/// use petgraph::graph::NodeIndex;
///
/// // a square is one S-node
/// let mut graph = from_str("0,1\n1,2\n2,3\n3,0\n").unwrap();
/// let mut tree = DynamicSpqrTree::new(&mut graph).unwrap();
///
/// // both diagonals make it a K4, one R-node
/// tree.insert_edge(NodeIndex::new(0), NodeIndex::new(2)).unwrap();
/// tree.insert_edge(NodeIndex::new(1), NodeIndex::new(3)).unwrap();
/// assert_eq!(tree.number_of_r_nodes(), 1);
/// assert_eq!(tree.tree().node_count(), 1);
/// ```
#[derive(Debug)]
pub struct DynamicSpqrTree<'g> {
    graph: &'g mut UnGraph,
    pub(crate) forest: SpqrForest,
    options: DynamicOptions,
    skeletons: HashMap<usize, Skeleton>,
    tree: Option<TreeGraph>,
}

impl<'g> DynamicSpqrTree<'g> {
    /// Builds the tree rooted at edge `0`.
    pub fn new(graph: &'g mut UnGraph) -> Result<Self, SpqrError> {
        Self::with_options(graph, EdgeIndex::new(0), DynamicOptions::default())
    }

    pub fn with_root_edge(graph: &'g mut UnGraph, root_edge: EdgeIndex) -> Result<Self, SpqrError> {
        Self::with_options(graph, root_edge, DynamicOptions::default())
    }

    pub fn with_options(
        graph: &'g mut UnGraph,
        root_edge: EdgeIndex,
        options: DynamicOptions,
    ) -> Result<Self, SpqrError> {
        if root_edge.index() >= graph.edge_count() {
            return Err(SpqrError::EdgeNotInGraph(root_edge.index()));
        }
        let tricon = get_triconnected_components(graph)?;
        Self::from_triconnectivity(graph, &tricon, root_edge, options)
    }

    /// Builds the tree from triconnected components computed for `graph` before.
    pub fn from_triconnectivity(
        graph: &'g mut UnGraph,
        tricon: &TriconnectedComponents,
        root_edge: EdgeIndex,
        options: DynamicOptions,
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
        debug!(
            nodes = forest.number_of_nodes(),
            root = forest.root,
            "dynamic SPQR tree built"
        );

        let tree = Self {
            graph,
            forest,
            options,
            skeletons: HashMap::new(),
            tree: None,
        };
        if options.check_invariants {
            check_forest(&tree.forest, &*tree.graph);
        }
        Ok(tree)
    }

    fn after_update(&mut self, surgery: Surgery, e: usize) {
        debug!(
            ?surgery,
            edge = e,
            nodes = self.forest.number_of_nodes(),
            "SPQR tree updated"
        );
        self.skeletons.clear();
        self.tree = None;
        if self.options.check_invariants {
            check_forest(&self.forest, &*self.graph);
        }
    }

    /// Adds the edge `(u, v)` to the graph and updates the tree. Returns the new edge.
    pub fn insert_edge(&mut self, u: NodeIndex, v: NodeIndex) -> Result<EdgeIndex, SpqrError> {
        for x in [u, v] {
            if x.index() >= self.graph.node_count() {
                return Err(SpqrError::NodeNotInGraph(x.index()));
            }
        }
        if u == v {
            return Err(SpqrError::SelfLoop(u.index()));
        }

        let e = self.graph.add_edge(u, v, EdgeLabel::Real);
        self.update_inserted_edge(e);
        Ok(e)
    }

    /// Subdivides the edge `e = (u, v)` with a new node `w`.
    ///
    /// Afterwards `e` is the edge `(u, w)` and the returned edge `f` is `(w, v)`, indices of all
    /// other edges are kept. The label of `w` is its index.
    pub fn insert_node(&mut self, e: EdgeIndex) -> Result<(NodeIndex, EdgeIndex), SpqrError> {
        let (u, v) = self
            .graph
            .edge_endpoints(e)
            .ok_or(SpqrError::EdgeNotInGraph(e.index()))?;

        let w = self.graph.add_node(self.graph.node_count() as u32);
        // the new last edge takes the place of `e`
        self.graph.add_edge(u, w, EdgeLabel::Real);
        self.graph.remove_edge(e);
        let f = self.graph.add_edge(w, v, EdgeLabel::Real);

        self.update_inserted_node(e, f);
        Ok((w, f))
    }

    /// Updates the tree after `e` was added to the graph.
    pub(crate) fn update_inserted_edge(&mut self, e: EdgeIndex) {
        let (u, v) = self
            .graph
            .edge_endpoints(e)
            .expect("inserted edge is in the graph");
        let surgery = insert_edge(&mut self.forest, e.index(), u.index(), v.index());
        self.after_update(surgery, e.index());
    }

    /// Updates the tree after an edge was split into `e` and `f` by a new node of degree two.
    pub(crate) fn update_inserted_node(&mut self, e: EdgeIndex, f: EdgeIndex) {
        let (a, b) = self.graph.edge_endpoints(e).expect("split edge is in the graph");
        let (c, d) = self.graph.edge_endpoints(f).expect("new edge is in the graph");
        let (u, w) = if a == c || a == d { (b, a) } else { (a, b) };
        let v = if c == w { d } else { c };

        let surgery = insert_node(
            &mut self.forest,
            e.index(),
            f.index(),
            u.index(),
            w.index(),
            v.index(),
        );
        self.after_update(surgery, f.index());
    }

    /// The node `v` was merged into, `v` itself while it is a node of the tree.
    pub fn find_spqr(&self, v: TreeNode) -> Result<TreeNode, SpqrError> {
        if v.0 >= self.forest.nodes.len() {
            return Err(SpqrError::UnknownTreeNode(v.0));
        }
        Ok(TreeNode(self.forest.find_spqr(v.0)))
    }

    fn resolve(&self, v: TreeNode) -> Result<usize, SpqrError> {
        let c = self.find_spqr(v)?;
        if c != v {
            return Err(SpqrError::StaleTreeNode(v.0, c.0));
        }
        Ok(c.0)
    }

    fn check_edge(&self, e: EdgeIndex) -> Result<usize, SpqrError> {
        if e.index() < self.graph.edge_count() {
            Ok(e.index())
        } else {
            Err(SpqrError::EdgeNotInGraph(e.index()))
        }
    }

    fn skeleton_edge_of(&mut self, h: usize) -> SkeletonEdge {
        let c = self.forest.node_of(h);
        let forest = &self.forest;
        let skeleton = self
            .skeletons
            .entry(c)
            .or_insert_with(|| Skeleton::build(forest, c));
        SkeletonEdge {
            node: TreeNode(c),
            edge: skeleton
                .edge_of_hedge(h)
                .expect("skeleton lists all hedges of its node"),
        }
    }

    pub fn original_graph(&self) -> &UnGraph {
        &*self.graph
    }

    /// Snapshot of the current tree, edges run from parents to children.
    pub fn tree(&mut self) -> &TreeGraph {
        let forest = &self.forest;
        self.tree.get_or_insert_with(|| forest.tree_graph())
    }

    pub fn root_edge(&self) -> Option<EdgeIndex> {
        self.forest.root_edge.map(EdgeIndex::new)
    }

    pub fn root_node(&self) -> TreeNode {
        TreeNode(self.forest.find_spqr(self.forest.root))
    }

    pub fn root_tree_at_edge(&mut self, e: EdgeIndex) -> Result<TreeNode, SpqrError> {
        let e = self.check_edge(e)?;
        self.forest.root_at_edge(e);
        self.skeletons.clear();
        self.tree = None;
        Ok(self.root_node())
    }

    /// Roots the tree at `v`, a stale handle is resolved first.
    pub fn root_tree_at_node(&mut self, v: TreeNode) -> Result<(), SpqrError> {
        let c = self.find_spqr(v)?;
        self.forest.root_at_node(c.0);
        self.skeletons.clear();
        self.tree = None;
        Ok(())
    }

    pub fn type_of(&self, v: TreeNode) -> Result<SpqrNodeType, SpqrError> {
        Ok(self.forest.node_type(self.resolve(v)?))
    }

    pub fn number_of_s_nodes(&self) -> usize {
        self.forest.number_of_type(SpqrNodeType::S)
    }

    pub fn number_of_p_nodes(&self) -> usize {
        self.forest.number_of_type(SpqrNodeType::P)
    }

    pub fn number_of_r_nodes(&self) -> usize {
        self.forest.number_of_type(SpqrNodeType::R)
    }

    pub fn nodes_of_type(&self, node_type: SpqrNodeType) -> Vec<TreeNode> {
        self.forest
            .canonical_nodes()
            .filter(|&c| self.forest.node_type(c) == node_type)
            .map(TreeNode)
            .collect()
    }

    /// The skeleton of `v`, built on first access after an update.
    pub fn skeleton(&mut self, v: TreeNode) -> Result<&Skeleton, SpqrError> {
        let c = self.resolve(v)?;
        let forest = &self.forest;
        Ok(self
            .skeletons
            .entry(c)
            .or_insert_with(|| Skeleton::build(forest, c)))
    }

    pub fn skeleton_of_real(&mut self, e: EdgeIndex) -> Result<&Skeleton, SpqrError> {
        let h = self.forest.real_hedge[self.check_edge(e)?];
        let c = self.forest.node_of(h);
        self.skeleton(TreeNode(c))
    }

    pub fn copy_of_real(&mut self, e: EdgeIndex) -> Result<SkeletonEdge, SpqrError> {
        let h = self.forest.real_hedge[self.check_edge(e)?];
        Ok(self.skeleton_edge_of(h))
    }

    pub fn skeleton_edge_src(&mut self, te: TreeEdge) -> Result<SkeletonEdge, SpqrError> {
        let (up, _) = self
            .forest
            .tree_edge_halves(te)
            .ok_or(SpqrError::StaleTreeEdge(te.0))?;
        Ok(self.skeleton_edge_of(up))
    }

    pub fn skeleton_edge_tgt(&mut self, te: TreeEdge) -> Result<SkeletonEdge, SpqrError> {
        let (_, down) = self
            .forest
            .tree_edge_halves(te)
            .ok_or(SpqrError::StaleTreeEdge(te.0))?;
        Ok(self.skeleton_edge_of(down))
    }

    pub fn parent(&self, v: TreeNode) -> Result<Option<TreeNode>, SpqrError> {
        Ok(self.forest.parent(self.resolve(v)?).map(TreeNode))
    }

    pub fn children(&self, v: TreeNode) -> Result<Vec<TreeNode>, SpqrError> {
        let c = self.resolve(v)?;
        Ok(self.forest.children(c).into_iter().map(TreeNode).collect())
    }

    pub fn neighbors(&self, v: TreeNode) -> Result<Vec<TreeNode>, SpqrError> {
        let c = self.resolve(v)?;
        Ok(self.forest.neighbors(c).into_iter().map(TreeNode).collect())
    }

    pub fn pertinent_graph(&self, v: TreeNode) -> Result<PertinentGraph, SpqrError> {
        Ok(PertinentGraph::build(&self.forest, self.resolve(v)?))
    }

    pub fn to_dot(&self) -> String {
        visualize::visualize_spqr(&self.forest)
    }

    pub fn draw_tree(&self) -> String {
        visualize::draw_tree(&self.forest)
    }
}
