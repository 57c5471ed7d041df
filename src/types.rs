use petgraph::graph::EdgeIndex;

/// Enum representing the type of edge in a graph.
///
/// Input graphs carry `Real` edges only. Skeletons and pertinent graphs
/// mark edges that stand for a neighbouring tree node as `Virtual`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum EdgeLabel {
    Real,
    Virtual,
}

impl std::fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeLabel::Real => write!(f, "Real"),
            EdgeLabel::Virtual => write!(f, "Virtual"),
        }
    }
}

/// Wrapper for petgraph's graph type.
///
/// Node weights are labels chosen by the user (skeletons store the index of
/// the original node there).
pub type UnGraph = petgraph::graph::UnGraph<u32, EdgeLabel>;

/// Type of a node of an SPQR tree.
///
/// - `S`: polygon, the skeleton is a simple cycle
/// - `P`: bond, two nodes joined by at least three edges
/// - `R`: rigid, the skeleton is a simple triconnected graph
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub enum SpqrNodeType {
    S,
    P,
    R,
}

impl SpqrNodeType {
    pub(crate) fn slot(self) -> usize {
        match self {
            SpqrNodeType::S => 0,
            SpqrNodeType::P => 1,
            SpqrNodeType::R => 2,
        }
    }
}

impl std::fmt::Display for SpqrNodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpqrNodeType::S => write!(f, "S"),
            SpqrNodeType::P => write!(f, "P"),
            SpqrNodeType::R => write!(f, "R"),
        }
    }
}

/// Handle of a node of an SPQR tree.
///
/// For [`StaticSpqrTree`](crate::spqr_tree::StaticSpqrTree) it is the index of the node in
/// [`tree()`](crate::spqr_tree::StaticSpqrTree::tree). For
/// [`DynamicSpqrTree`](crate::dynamic_spqr_tree::DynamicSpqrTree) handles may go stale once the
/// node gets merged, resolve them with `find_spqr`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub struct TreeNode(pub(crate) usize);

impl TreeNode {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle of an edge of an SPQR tree, that is of a pair of twin virtual edges.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub struct TreeEdge(pub(crate) usize);

impl TreeEdge {
    pub fn index(self) -> usize {
        self.0
    }
}

/// An edge of the skeleton of `node`, indexed in the skeleton's own graph.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct SkeletonEdge {
    pub node: TreeNode,
    pub edge: EdgeIndex,
}

/// Snapshot of an SPQR tree for generic traversal.
///
/// Node weights are the handles accepted by the tree's queries and edge weights the handles of
/// the virtual edge pairs.
pub type TreeGraph = petgraph::graph::UnGraph<TreeNode, TreeEdge>;
