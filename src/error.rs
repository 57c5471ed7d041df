use thiserror::Error;

/// Errors reported to the caller of this crate.
///
/// Broken internal bookkeeping is not reported here, it panics.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpqrError {
    #[error("graph contains a self-loop at node {0}")]
    SelfLoop(usize),
    #[error("graph with {nodes} nodes and {edges} edges is too small for an SPQR tree")]
    TooSmall { nodes: usize, edges: usize },
    #[error("graph is not biconnected")]
    NotBiconnected,
    #[error("edge {0} is not an edge of the graph")]
    EdgeNotInGraph(usize),
    #[error("node {0} is not a node of the graph")]
    NodeNotInGraph(usize),
    #[error("tree node {0} does not exist")]
    UnknownTreeNode(usize),
    #[error("tree node {0} was merged into tree node {1}")]
    StaleTreeNode(usize, usize),
    #[error("tree edge {0} no longer exists")]
    StaleTreeEdge(usize),
    #[error("triconnected components describe {components} edges, the graph has {graph}")]
    ForeignTriconnectivity { components: usize, graph: usize },
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}
